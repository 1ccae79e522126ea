use crate::error::{EngineError, Result};

// ---------------------------------------------------------------------------
// Field – the fixed query vocabulary
// ---------------------------------------------------------------------------

/// Every field the query surface can name, as one enum shared by the
/// filter and sort dispatch tables. The two can therefore never disagree
/// about a field's comparison semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    KeySkills,
    Experience,
    Premium,
    Employer,
    Salary,
    AreaName,
    PublishedAt,
    SalaryCurrency,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Description,
        Field::KeySkills,
        Field::Experience,
        Field::Premium,
        Field::Employer,
        Field::Salary,
        Field::AreaName,
        Field::PublishedAt,
        Field::SalaryCurrency,
    ];

    /// The first nine fields, in display order, form the table header.
    /// The currency identifier is filterable and sortable but not shown.
    pub fn table_fields() -> &'static [Field] {
        &Field::ALL[..9]
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Название",
            Field::Description => "Описание",
            Field::KeySkills => "Навыки",
            Field::Experience => "Опыт работы",
            Field::Premium => "Премиум-вакансия",
            Field::Employer => "Компания",
            Field::Salary => "Оклад",
            Field::AreaName => "Название региона",
            Field::PublishedAt => "Дата публикации вакансии",
            Field::SalaryCurrency => "Идентификатор валюты оклада",
        }
    }

    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.label() == label)
    }
}

// ---------------------------------------------------------------------------
// Parsed query components
// ---------------------------------------------------------------------------

/// A parsed filter expression: one field plus one literal. For the skills
/// field the literal is a comma-separated list of required tokens, split
/// at match time.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub field: Field,
    pub value: String,
}

/// 1-based `[start, end)` row window over the formatted table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowWindow {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl RowWindow {
    /// Slice `rows` to the window. Out-of-range bounds clamp to the data.
    pub fn apply<T>(&self, rows: Vec<T>) -> Vec<T> {
        let len = rows.len();
        let start = self.start.unwrap_or(1).saturating_sub(1).min(len);
        let end = self.end.unwrap_or(len + 1).saturating_sub(1).clamp(start, len);
        rows.into_iter().take(end).skip(start).collect()
    }
}

/// The validated query for the tabular display path.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub filter: Option<FilterExpr>,
    pub sort: Option<Field>,
    pub reverse: bool,
    pub window: RowWindow,
    /// Display column labels; `None` shows every table column.
    pub columns: Option<Vec<String>>,
}

impl TableQuery {
    /// Parse and validate the five raw query strings. Every component is
    /// checked here, before any data is touched.
    pub fn parse(
        filter: &str,
        sort: &str,
        reverse: &str,
        window: &str,
        columns: &str,
    ) -> Result<TableQuery> {
        Ok(TableQuery {
            filter: parse_filter(filter)?,
            sort: parse_sort(sort)?,
            reverse: parse_reverse(reverse)?,
            window: parse_window(window)?,
            columns: parse_columns(columns)?,
        })
    }
}

/// Parse `"<label>: <value>"`. Empty input means no filter.
pub fn parse_filter(input: &str) -> Result<Option<FilterExpr>> {
    if input.is_empty() {
        return Ok(None);
    }
    let (label, value) = input
        .split_once(": ")
        .ok_or(EngineError::BadFilterSyntax)?;
    let field = Field::from_label(label).ok_or(EngineError::BadFilterField)?;
    Ok(Some(FilterExpr {
        field,
        value: value.to_string(),
    }))
}

/// Empty input means no sort; anything else must be a known label.
pub fn parse_sort(input: &str) -> Result<Option<Field>> {
    if input.is_empty() {
        return Ok(None);
    }
    Field::from_label(input)
        .map(Some)
        .ok_or(EngineError::BadSortField)
}

/// "Да" reverses, "Нет" and empty keep ascending order.
pub fn parse_reverse(input: &str) -> Result<bool> {
    match input {
        "Да" => Ok(true),
        "Нет" | "" => Ok(false),
        _ => Err(EngineError::BadSortOrder),
    }
}

/// Zero, one or two whitespace-separated 1-based row numbers.
fn parse_window(input: &str) -> Result<RowWindow> {
    let mut bounds = input.split_whitespace().map(|tok| {
        tok.parse::<usize>()
            .map_err(|_| EngineError::BadFilterSyntax)
    });
    let start = bounds.next().transpose()?;
    let end = bounds.next().transpose()?;
    if bounds.next().is_some() {
        return Err(EngineError::BadFilterSyntax);
    }
    Ok(RowWindow { start, end })
}

/// Comma-separated display column labels, validated against the table
/// header. "№" is always shown and may be named redundantly.
fn parse_columns(input: &str) -> Result<Option<Vec<String>>> {
    if input.is_empty() {
        return Ok(None);
    }
    let mut columns = Vec::new();
    for label in input.split(", ") {
        let known =
            label == "№" || Field::table_fields().iter().any(|f| f.label() == label);
        if !known {
            return Err(EngineError::BadColumn);
        }
        if label != "№" {
            columns.push(label.to_string());
        }
    }
    Ok(Some(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_expression_parses() {
        let expr = parse_filter("Оклад: 1000").unwrap().unwrap();
        assert_eq!(expr.field, Field::Salary);
        assert_eq!(expr.value, "1000");
        assert_eq!(parse_filter("").unwrap(), None);
    }

    #[test]
    fn filter_without_separator_is_rejected() {
        assert!(matches!(
            parse_filter("Оклад 1000"),
            Err(EngineError::BadFilterSyntax)
        ));
        // A colon without the trailing space is still malformed.
        assert!(matches!(
            parse_filter("Оклад:1000"),
            Err(EngineError::BadFilterSyntax)
        ));
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert!(matches!(
            parse_filter("Зарплата: 10"),
            Err(EngineError::BadFilterField)
        ));
        assert!(matches!(
            parse_sort("Зарплата"),
            Err(EngineError::BadSortField)
        ));
        assert!(matches!(
            parse_reverse("Может быть"),
            Err(EngineError::BadSortOrder)
        ));
    }

    #[test]
    fn reverse_tokens() {
        assert!(parse_reverse("Да").unwrap());
        assert!(!parse_reverse("Нет").unwrap());
        assert!(!parse_reverse("").unwrap());
    }

    #[test]
    fn window_is_one_based_and_end_exclusive() {
        let window = parse_window("2 4").unwrap();
        let rows = vec!["a", "b", "c", "d", "e"];
        assert_eq!(window.apply(rows), vec!["b", "c"]);

        let open = parse_window("3").unwrap();
        assert_eq!(open.apply(vec!["a", "b", "c", "d"]), vec!["c", "d"]);

        let all = parse_window("").unwrap();
        assert_eq!(all.apply(vec!["a", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn columns_are_validated() {
        let cols = parse_columns("Название, Оклад").unwrap().unwrap();
        assert_eq!(cols, vec!["Название", "Оклад"]);
        assert!(matches!(
            parse_columns("Название, Зарплата"),
            Err(EngineError::BadColumn)
        ));
    }

    #[test]
    fn filter_and_sort_share_the_vocabulary() {
        for field in Field::ALL {
            assert_eq!(Field::from_label(field.label()), Some(field));
        }
    }
}
