use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};

use crate::config::Lookups;
use crate::data::model::Vacancy;
use crate::error::Result;
use crate::query::Field;

// ---------------------------------------------------------------------------
// Ordering dispatch: field → comparison key
// ---------------------------------------------------------------------------

/// Sort a vacancy list by the given field.
///
/// Key semantics:
/// * Навыки — number of skills.
/// * Оклад — fork midpoint converted to roubles.
/// * Дата публикации вакансии — the fully parsed timestamp, not the
///   truncated day rendering.
/// * Опыт работы — fixed tier rank (none < 1-3 < 3-6 < 6+).
/// * Everything else — raw field value, lexicographic.
///
/// The sort is stable and `reverse` flips the comparator, not the input,
/// so equal keys keep their original relative order in both directions.
/// Key extraction errors (unknown currency, malformed bound or timestamp)
/// abort the sort.
pub fn sort_vacancies<'a>(
    rows: Vec<&'a Vacancy>,
    field: Field,
    reverse: bool,
    lookups: &Lookups,
) -> Result<Vec<&'a Vacancy>> {
    match field {
        Field::KeySkills => sorted_by(rows, |v| Ok(v.key_skills.len()), Ord::cmp, reverse),
        Field::Salary => sorted_by(
            rows,
            |v| v.salary.midpoint_rub(lookups),
            f64::total_cmp,
            reverse,
        ),
        Field::PublishedAt => sorted_by(
            rows,
            Vacancy::published_ts,
            <DateTime<FixedOffset> as Ord>::cmp,
            reverse,
        ),
        Field::Experience => sorted_by(
            rows,
            |v| lookups.experience_rank(&v.experience_id),
            Ord::cmp,
            reverse,
        ),
        _ => sorted_by(rows, |v| Ok(raw_field(v, field)), Ord::cmp, reverse),
    }
}

/// Raw string value of a field, for the lexicographic default.
fn raw_field<'a>(vac: &'a Vacancy, field: Field) -> &'a str {
    match field {
        Field::Name => &vac.name,
        Field::Description => &vac.description,
        Field::Employer => &vac.employer_name,
        Field::AreaName => &vac.area_name,
        Field::SalaryCurrency => &vac.salary.currency,
        // Typed keys are handled before we get here; fall back to the raw
        // timestamp and sentinel-bearing fields just in case.
        Field::PublishedAt => &vac.published_at,
        Field::Experience => &vac.experience_id,
        Field::Premium => &vac.premium,
        Field::KeySkills | Field::Salary => &vac.name,
    }
}

/// Extract one key per row, then stable-sort by it.
fn sorted_by<'a, K, KF, CF>(
    rows: Vec<&'a Vacancy>,
    key_fn: KF,
    cmp: CF,
    reverse: bool,
) -> Result<Vec<&'a Vacancy>>
where
    KF: Fn(&'a Vacancy) -> Result<K>,
    CF: Fn(&K, &K) -> Ordering,
{
    let mut keyed = Vec::with_capacity(rows.len());
    for vac in rows {
        keyed.push((key_fn(vac)?, vac));
    }
    keyed.sort_by(|a, b| {
        let ord = cmp(&a.0, &b.0);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });
    Ok(keyed.into_iter().map(|(_, vac)| vac).collect())
}
