use crate::config::Lookups;
use crate::data::model::{parse_f64, Catalog, Salary, Vacancy};
use crate::data::{filter, sort};
use crate::error::Result;
use crate::query::{Field, TableQuery};

/// Cells longer than this are cut and suffixed with an ellipsis.
const MAX_CELL_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Row formatting – the display contract
// ---------------------------------------------------------------------------

/// The nine display cells of one vacancy, in table-header order.
pub fn format_row(vac: &Vacancy, lookups: &Lookups) -> Result<Vec<String>> {
    Ok(vec![
        vac.name.clone(),
        vac.description.clone(),
        vac.key_skills.join("\n"),
        lookups.experience_label(&vac.experience_id)?.to_string(),
        lookups.bool_label(&vac.premium)?.to_string(),
        vac.employer_name.clone(),
        format_salary(&vac.salary, lookups)?,
        vac.area_name.clone(),
        vac.published_date(),
    ])
}

/// `"{from} - {to} ({currency label}) ({tax note})"` with thousands
/// separated by a space, e.g. `900 - 11 000 (Евро) (Без вычета налогов)`.
fn format_salary(salary: &Salary, lookups: &Lookups) -> Result<String> {
    let from = space_thousands(parse_f64(&salary.from)? as i64);
    let to = space_thousands(parse_f64(&salary.to)? as i64);
    let gross_note = if lookups.bool_label(&salary.gross)? == "Да" {
        "Без вычета налогов"
    } else {
        "С вычетом налогов"
    };
    let currency = lookups.currency_label(&salary.currency)?;
    Ok(format!("{from} - {to} ({currency}) ({gross_note})"))
}

fn space_thousands(value: i64) -> String {
    if value >= 1000 {
        format!("{} {:03}", value / 1000, value % 1000)
    } else {
        value.to_string()
    }
}

fn truncate_cell(cell: String) -> String {
    if cell.chars().count() > MAX_CELL_CHARS {
        let mut cut: String = cell.chars().take(MAX_CELL_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        cell
    }
}

// ---------------------------------------------------------------------------
// Table assembly
// ---------------------------------------------------------------------------

/// Header plus formatted, numbered, truncated, windowed rows — everything
/// a text-table widget needs, with no layout decisions made for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Run the display path: filter, sort, format, number, truncate, then
/// apply the column allowlist and the row window.
///
/// Returns `None` when the filter leaves nothing to show — that is a
/// normal outcome, not an error.
pub fn build_view(
    catalog: &Catalog,
    query: &TableQuery,
    lookups: &Lookups,
) -> Result<Option<TableView>> {
    let mut rows: Vec<&Vacancy> = match &query.filter {
        Some(expr) => filter::apply_filter(&catalog.vacancies, expr, lookups)?,
        None => catalog.vacancies.iter().collect(),
    };
    if rows.is_empty() {
        return Ok(None);
    }
    if let Some(field) = query.sort {
        rows = sort::sort_vacancies(rows, field, query.reverse, lookups)?;
    }

    // Numbering runs over the whole sorted set; the window slices the
    // numbered rows, so row 10 keeps its number on every page.
    let mut formatted = Vec::with_capacity(rows.len());
    for (i, vac) in rows.iter().enumerate() {
        let mut cells: Vec<String> = format_row(vac, lookups)?
            .into_iter()
            .map(truncate_cell)
            .collect();
        cells.insert(0, (i + 1).to_string());
        formatted.push(cells);
    }

    let selected: Vec<usize> = match &query.columns {
        Some(labels) => labels
            .iter()
            .filter_map(|label| {
                Field::table_fields()
                    .iter()
                    .position(|f| f.label() == label)
                    .map(|i| i + 1)
            })
            .collect(),
        None => (1..=Field::table_fields().len()).collect(),
    };

    let mut header = vec!["№".to_string()];
    header.extend(
        selected
            .iter()
            .map(|&i| Field::table_fields()[i - 1].label().to_string()),
    );
    let rows = query.window.apply(formatted);
    let rows = rows
        .into_iter()
        .map(|cells| {
            let mut picked = vec![cells[0].clone()];
            picked.extend(selected.iter().map(|&i| cells[i].clone()));
            picked
        })
        .collect();
    Ok(Some(TableView { header, rows }))
}

// ---------------------------------------------------------------------------
// Plain text rendering
// ---------------------------------------------------------------------------

/// Draw the view as a bordered text table. Multi-line cells (skill lists,
/// descriptions) expand the row height.
pub fn render_text(view: &TableView) -> String {
    let ncols = view.header.len();
    let mut widths = vec![0usize; ncols];
    let measure = |widths: &mut Vec<usize>, cells: &[String]| {
        for (i, cell) in cells.iter().enumerate() {
            for line in cell.split('\n') {
                widths[i] = widths[i].max(line.chars().count());
            }
        }
    };
    measure(&mut widths, &view.header);
    for row in &view.rows {
        measure(&mut widths, row);
    }

    let rule: String = {
        let inner: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+\n", inner.join("+"))
    };
    let mut out = String::new();
    out.push_str(&rule);
    out.push_str(&render_cells(&view.header, &widths));
    out.push_str(&rule);
    for row in &view.rows {
        out.push_str(&render_cells(row, &widths));
        out.push_str(&rule);
    }
    out
}

fn render_cells(cells: &[String], widths: &[usize]) -> String {
    let split: Vec<Vec<&str>> = cells.iter().map(|c| c.split('\n').collect()).collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(1);
    let mut out = String::new();
    for line_no in 0..height {
        out.push('|');
        for (i, lines) in split.iter().enumerate() {
            let text = lines.get(line_no).copied().unwrap_or("");
            let pad = widths[i] - text.chars().count();
            out.push(' ');
            out.push_str(text);
            out.push_str(&" ".repeat(pad + 1));
            out.push('|');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NO_DATA;
    use crate::query::TableQuery;

    fn vacancy(name: &str, premium: &str, gross: &str) -> Vacancy {
        Vacancy {
            name: name.to_string(),
            description: NO_DATA.to_string(),
            key_skills: vec!["CSS".to_string(), "HTML".to_string()],
            experience_id: "between1And3".to_string(),
            premium: premium.to_string(),
            employer_name: NO_DATA.to_string(),
            salary: Salary {
                from: "900".to_string(),
                to: "11000".to_string(),
                gross: gross.to_string(),
                currency: "EUR".to_string(),
            },
            area_name: "Москва".to_string(),
            published_at: "2022-07-06T02:05:26+0300".to_string(),
        }
    }

    fn catalog(vacancies: Vec<Vacancy>) -> Catalog {
        let source_rows = vacancies.len();
        Catalog {
            vacancies,
            source_rows,
        }
    }

    #[test]
    fn formats_the_nine_cells() {
        let lk = Lookups::new();
        let row = format_row(&vacancy("Фронт-разработчик", "True", "True"), &lk).unwrap();
        assert_eq!(
            row,
            vec![
                "Фронт-разработчик",
                "Нет данных",
                "CSS\nHTML",
                "От 1 года до 3 лет",
                "Да",
                "Нет данных",
                "900 - 11 000 (Евро) (Без вычета налогов)",
                "Москва",
                "06.07.2022",
            ]
        );
    }

    #[test]
    fn net_salary_note_for_non_gross() {
        let lk = Lookups::new();
        let mut vac = vacancy("Фронт-разработчик", "False", "False");
        vac.salary.from = "1000".to_string();
        let row = format_row(&vac, &lk).unwrap();
        assert_eq!(row[4], "Нет");
        assert_eq!(row[6], "1 000 - 11 000 (Евро) (С вычетом налогов)");
    }

    #[test]
    fn thousands_spacing() {
        assert_eq!(space_thousands(900), "900");
        assert_eq!(space_thousands(1000), "1 000");
        assert_eq!(space_thousands(11000), "11 000");
        assert_eq!(space_thousands(1234567), "1234 567");
    }

    #[test]
    fn long_cells_are_truncated_with_ellipsis() {
        let long: String = "я".repeat(120);
        let cut = truncate_cell(long);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_cell("короткая".to_string()), "короткая");
    }

    #[test]
    fn view_numbers_rows_and_respects_window_and_columns() {
        let lk = Lookups::new();
        let cat = catalog(vec![
            vacancy("Первый", "true", "true"),
            vacancy("Второй", "true", "true"),
            vacancy("Третий", "true", "true"),
        ]);
        let query =
            TableQuery::parse("", "", "", "2 4", "Название, Название региона").unwrap();
        let view = build_view(&cat, &query, &lk).unwrap().unwrap();
        assert_eq!(view.header, vec!["№", "Название", "Название региона"]);
        assert_eq!(
            view.rows,
            vec![
                vec!["2".to_string(), "Второй".to_string(), "Москва".to_string()],
                vec!["3".to_string(), "Третий".to_string(), "Москва".to_string()],
            ]
        );
    }

    #[test]
    fn empty_filter_result_is_none() {
        let lk = Lookups::new();
        let cat = catalog(vec![vacancy("Первый", "true", "true")]);
        let query = TableQuery::parse("Название: Нет такого", "", "", "", "").unwrap();
        assert_eq!(build_view(&cat, &query, &lk).unwrap(), None);
    }

    #[test]
    fn rendered_table_has_borders() {
        let view = TableView {
            header: vec!["№".to_string(), "Название".to_string()],
            rows: vec![vec!["1".to_string(), "Аналитик".to_string()]],
        };
        let text = render_text(&view);
        assert!(text.starts_with('+'));
        assert!(text.contains("| Аналитик"));
        assert_eq!(text.lines().count(), 5);
    }
}
