use std::path::Path;

use log::warn;

use crate::config::NO_DATA;
use crate::data::model::{Catalog, Salary, Vacancy};
use crate::error::{EngineError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a vacancy catalog from a delimited text file.
///
/// The first row names the fields; every following row is one vacancy.
/// A zero-byte file (or BOM-only) is an error; so is a file whose rows all
/// fail shape validation.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = std::fs::read_to_string(path)?;
    let text = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    if text.is_empty() {
        return Err(EngineError::EmptySource);
    }
    parse_catalog(text)
}

/// Parse CSV text into a catalog.
///
/// A row is accepted iff its column count equals the header's and none of
/// its cells is empty. Rejected rows are dropped, not reported per-row;
/// the total is logged once so the loss is at least visible.
pub fn parse_catalog(text: &str) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = Columns::resolve(&headers)?;

    let mut vacancies = Vec::new();
    let mut source_rows = 0usize;
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record?;
        source_rows += 1;
        if record.len() != headers.len() || record.iter().any(str::is_empty) {
            dropped += 1;
            continue;
        }
        let cells: Vec<String> = record.iter().map(clean_text).collect();
        vacancies.push(columns.build(&cells));
    }

    if dropped > 0 {
        warn!("dropped {dropped} of {source_rows} rows during shape validation");
    }
    if vacancies.is_empty() {
        return Err(EngineError::NoData);
    }
    Ok(Catalog {
        vacancies,
        source_rows,
    })
}

// ---------------------------------------------------------------------------
// Text normalization
// ---------------------------------------------------------------------------

/// Strip HTML tags, then collapse runs of whitespace to single spaces —
/// unless the raw cell contains a newline. Newlines separate skill-list
/// entries and description paragraphs, so those cells keep their
/// whitespace untouched.
pub fn clean_text(raw: &str) -> String {
    let stripped = strip_tags(raw);
    if raw.contains('\n') {
        stripped
    } else {
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Remove `<...>` spans. A tag never crosses a line break; a `<` with no
/// closing `>` on the same line is kept verbatim.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        match tail.find(['>', '\n']) {
            Some(i) if tail[i..].starts_with('>') => {
                rest = &tail[i + 1..];
            }
            _ => {
                out.push('<');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Header resolution and row assembly
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row. Mandatory fields must be
/// present; optional ones fall back to the "Нет данных" sentinel per row.
struct Columns {
    name: usize,
    description: Option<usize>,
    key_skills: Option<usize>,
    experience_id: Option<usize>,
    premium: Option<usize>,
    employer_name: Option<usize>,
    salary_from: usize,
    salary_to: usize,
    salary_gross: Option<usize>,
    salary_currency: usize,
    area_name: usize,
    published_at: usize,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |field: &str| headers.iter().position(|h| h == field);
        // Without the mandatory columns no row can become a vacancy, which
        // is the same outcome as a file with no valid rows.
        let require = |field: &str| find(field).ok_or(EngineError::NoData);
        Ok(Columns {
            name: require("name")?,
            description: find("description"),
            key_skills: find("key_skills"),
            experience_id: find("experience_id"),
            premium: find("premium"),
            employer_name: find("employer_name"),
            salary_from: require("salary_from")?,
            salary_to: require("salary_to")?,
            salary_gross: find("salary_gross"),
            salary_currency: require("salary_currency")?,
            area_name: require("area_name")?,
            published_at: require("published_at")?,
        })
    }

    fn build(&self, cells: &[String]) -> Vacancy {
        let cell = |idx: usize| cells[idx].clone();
        let opt = |idx: Option<usize>| match idx {
            Some(i) => cells[i].clone(),
            None => NO_DATA.to_string(),
        };
        let key_skills = match self.key_skills {
            Some(i) => cells[i].split('\n').map(str::to_string).collect(),
            None => vec![NO_DATA.to_string()],
        };
        Vacancy {
            name: cell(self.name),
            description: opt(self.description),
            key_skills,
            experience_id: opt(self.experience_id),
            premium: opt(self.premium),
            employer_name: opt(self.employer_name),
            salary: Salary {
                from: cell(self.salary_from),
                to: cell(self.salary_to),
                gross: opt(self.salary_gross),
                currency: cell(self.salary_currency),
            },
            area_name: cell(self.area_name),
            published_at: cell(self.published_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "name,description,key_skills,experience_id,premium,employer_name,salary_from,salary_to,salary_gross,salary_currency,area_name,published_at";

    fn row(name: &str, area: &str) -> String {
        format!(
            "{name},desc,SQL,noExperience,true,Яндекс,100,1000,true,RUR,{area},2022-07-06T02:05:26+0300"
        )
    }

    #[test]
    fn clean_text_strips_tags_and_collapses_spaces() {
        assert_eq!(
            clean_text("<p>Группа компаний «МИАКОМ»</p>"),
            "Группа компаний «МИАКОМ»"
        );
        assert_eq!(clean_text(" try  do     it  "), "try do it");
        // Identity on a tag-free, already-collapsed string.
        assert_eq!(clean_text("try do it"), "try do it");
    }

    #[test]
    fn clean_text_keeps_whitespace_when_cell_has_newlines() {
        assert_eq!(clean_text("wqerty\nqwer"), "wqerty\nqwer");
        assert_eq!(clean_text("a  b\nc  d"), "a  b\nc  d");
        assert_eq!(clean_text("<b>SQL</b>\nGit"), "SQL\nGit");
    }

    #[test]
    fn unterminated_tag_is_kept() {
        assert_eq!(clean_text("a < b"), "a < b");
        assert_eq!(clean_text("a <b\nc> d"), "a <b\nc> d");
    }

    #[test]
    fn rows_with_wrong_shape_or_empty_cells_are_dropped() {
        let text = format!(
            "{HEADER}\n{}\nshort,row\n{}\n",
            row("Аналитик", "Москва"),
            row("Инженер", "Казань").replace("Яндекс", "")
        );
        let catalog = parse_catalog(&text).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.source_rows, 3);
        assert_eq!(catalog.vacancies[0].name, "Аналитик");
    }

    #[test]
    fn missing_optional_columns_become_sentinels() {
        let text = "name,salary_from,salary_to,salary_currency,area_name,published_at\n\
                    Аналитик,100,1000,RUR,Москва,2022-07-06T02:05:26+0300\n";
        let catalog = parse_catalog(text).unwrap();
        let vac = &catalog.vacancies[0];
        assert_eq!(vac.description, NO_DATA);
        assert_eq!(vac.key_skills, vec![NO_DATA.to_string()]);
        assert_eq!(vac.experience_id, NO_DATA);
        assert_eq!(vac.premium, NO_DATA);
        assert_eq!(vac.employer_name, NO_DATA);
        assert_eq!(vac.salary.gross, NO_DATA);
    }

    #[test]
    fn skills_cell_splits_on_newlines() {
        let text = format!(
            "{HEADER}\n\"Аналитик\",desc,\"SQL\nPython\nGit\",noExperience,true,Яндекс,100,1000,true,RUR,Москва,2022-07-06T02:05:26+0300\n"
        );
        let catalog = parse_catalog(&text).unwrap();
        assert_eq!(
            catalog.vacancies[0].key_skills,
            vec!["SQL", "Python", "Git"]
        );
    }

    #[test]
    fn header_only_file_has_no_data() {
        let text = format!("{HEADER}\n");
        assert!(matches!(parse_catalog(&text), Err(EngineError::NoData)));
    }
}
