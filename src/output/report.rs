use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::stats::StatsBundle;

// ---------------------------------------------------------------------------
// Statistics report output
// ---------------------------------------------------------------------------

/// Write the six series as pretty-printed JSON. This file is the data
/// contract for the workbook/chart/document renderers; layout is theirs.
pub fn write_json(bundle: &StatsBundle, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), bundle)?;
    Ok(())
}

/// The console summary: one line per series.
pub fn summary(bundle: &StatsBundle) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Динамика уровня зарплат по годам: {}",
        format_series(&bundle.salary_by_year)
    );
    let _ = writeln!(
        out,
        "Динамика уровня зарплат по годам для выбранной профессии: {}",
        format_series(&bundle.profession_salary_by_year)
    );
    let _ = writeln!(
        out,
        "Динамика количества вакансий по годам: {}",
        format_series(&bundle.count_by_year)
    );
    let _ = writeln!(
        out,
        "Динамика количества вакансий по годам для выбранной профессии: {}",
        format_series(&bundle.profession_count_by_year)
    );
    let _ = writeln!(
        out,
        "Уровень зарплат по городам (в порядке убывания): {}",
        format_series(&bundle.salary_by_region)
    );
    let _ = writeln!(
        out,
        "Доля вакансий по городам (в порядке убывания): {}",
        format_series(&bundle.share_by_region)
    );
    out
}

fn format_series<V: std::fmt::Display>(entries: &[(String, V)]) -> String {
    let body: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    format!("{{{}}}", body.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> StatsBundle {
        StatsBundle {
            profession: "Аналитик".to_string(),
            salary_by_year: vec![("2021".to_string(), 100), ("2022".to_string(), 200)],
            profession_salary_by_year: vec![
                ("2021".to_string(), 0),
                ("2022".to_string(), 200),
            ],
            count_by_year: vec![("2021".to_string(), 2), ("2022".to_string(), 3)],
            profession_count_by_year: vec![("2021".to_string(), 0), ("2022".to_string(), 1)],
            salary_by_region: vec![("Москва".to_string(), 150)],
            share_by_region: vec![("Москва".to_string(), 1.0)],
        }
    }

    #[test]
    fn summary_has_one_line_per_series() {
        let text = summary(&bundle());
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("Динамика уровня зарплат по годам: {2021: 100, 2022: 200}"));
        assert!(text.contains("Уровень зарплат по городам (в порядке убывания): {Москва: 150}"));
    }

    #[test]
    fn json_round_trips_the_series_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json(&bundle(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["profession"], "Аналитик");
        assert_eq!(value["salary_by_year"][0][0], "2021");
        assert_eq!(value["salary_by_year"][1][1], 200);
    }
}
