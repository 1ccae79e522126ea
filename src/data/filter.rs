use crate::config::Lookups;
use crate::data::model::{parse_i64, Vacancy};
use crate::error::Result;
use crate::query::{Field, FilterExpr};

// ---------------------------------------------------------------------------
// Predicate dispatch: (field, literal) → test over one vacancy
// ---------------------------------------------------------------------------

/// Does `vac` satisfy the filter expression?
///
/// Field semantics:
/// * Оклад — the literal falls inside the salary fork (integer bounds).
/// * Навыки — every comma-separated token is present in the skill list.
/// * Опыт работы / Премиум-вакансия / Идентификатор валюты оклада — the
///   display-translated value equals the literal.
/// * Дата публикации вакансии — the dd.mm.yyyy rendering equals the literal.
/// * Everything else — raw field value equals the literal verbatim.
pub fn matches(vac: &Vacancy, expr: &FilterExpr, lookups: &Lookups) -> Result<bool> {
    let value = expr.value.as_str();
    match expr.field {
        Field::Salary => {
            let target = parse_i64(value)?;
            let (lo, hi) = vac.salary.bounds()?;
            Ok(lo <= target && target <= hi)
        }
        Field::KeySkills => Ok(value
            .split(", ")
            .all(|token| vac.key_skills.iter().any(|s| s == token))),
        Field::Experience => Ok(lookups.experience_label(&vac.experience_id)? == value),
        Field::Premium => Ok(lookups.bool_label(&vac.premium)? == value),
        Field::SalaryCurrency => Ok(lookups.currency_label(&vac.salary.currency)? == value),
        Field::PublishedAt => Ok(vac.published_date() == value),
        Field::Name => Ok(vac.name == value),
        Field::Description => Ok(vac.description == value),
        Field::Employer => Ok(vac.employer_name == value),
        Field::AreaName => Ok(vac.area_name == value),
    }
}

/// Filter a vacancy list, preserving source order. A predicate failure
/// (malformed bound, unknown token) aborts the whole filter.
pub fn apply_filter<'a>(
    vacancies: &'a [Vacancy],
    expr: &FilterExpr,
    lookups: &Lookups,
) -> Result<Vec<&'a Vacancy>> {
    let mut kept = Vec::new();
    for vac in vacancies {
        if matches(vac, expr, lookups)? {
            kept.push(vac);
        }
    }
    Ok(kept)
}
