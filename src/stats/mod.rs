//! Grouped aggregation over the vacancy catalog.
//!
//! ```text
//!   Catalog ──┬── year series: mean salary / counts, overall and per
//!             │   profession (sequential or per-year partitions on the
//!             │   rayon pool)
//!             └── region rankings: qualified-region cutoff → mean salary
//!                 and catalog share → top-10 by value
//! ```
//!
//! Every result is an ordered `(group key, value)` list; sorting always
//! happens before any top-N truncation.

pub mod parallel;

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::config::Lookups;
use crate::data::model::{Catalog, Vacancy};
use crate::error::Result;

/// Regions kept in the region rankings after sorting by value.
const TOP_REGIONS: usize = 10;

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Which field partitions the catalog into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Publication year, via the derived year view.
    Year,
    /// Region name.
    Region,
}

fn group_key<'a>(vac: &'a Vacancy, group: GroupBy) -> &'a str {
    match group {
        GroupBy::Year => vac.year(),
        GroupBy::Region => &vac.area_name,
    }
}

// ---------------------------------------------------------------------------
// The two aggregate kinds
// ---------------------------------------------------------------------------

/// Mean salary midpoint (in roubles, floored) per group.
///
/// Group keys are seeded from *every* vacancy handed in before the title
/// filter narrows the contributors, so a profession that never appears in
/// some year still yields that year with value 0 instead of a missing key.
/// Results are in first-seen group order.
pub fn salary_by(
    vacs: &[&Vacancy],
    group: GroupBy,
    title_filter: &str,
    lookups: &Lookups,
) -> Result<Vec<(String, i64)>> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    for vac in vacs {
        let key = group_key(vac, group);
        if !sums.contains_key(key) {
            order.push(key.to_string());
            sums.insert(key.to_string(), (0.0, 0));
        }
    }
    for vac in vacs {
        if !title_filter.is_empty() && !vac.name.contains(title_filter) {
            continue;
        }
        let midpoint = vac.salary.midpoint_rub(lookups)?;
        let entry = sums.entry(group_key(vac, group).to_string()).or_default();
        entry.0 += midpoint;
        entry.1 += 1;
    }
    Ok(order
        .into_iter()
        .map(|key| {
            let (sum, n) = sums[&key];
            let mean = if n == 0 {
                0
            } else {
                (sum / n as f64).floor() as i64
            };
            (key, mean)
        })
        .collect())
}

/// Vacancy count per group, with the same key seeding as [`salary_by`].
pub fn count_by(vacs: &[&Vacancy], group: GroupBy, title_filter: &str) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for vac in vacs {
        let key = group_key(vac, group);
        if !counts.contains_key(key) {
            order.push(key.to_string());
            counts.insert(key.to_string(), 0);
        }
    }
    for vac in vacs {
        if !title_filter.is_empty() && !vac.name.contains(title_filter) {
            continue;
        }
        *counts.entry(group_key(vac, group).to_string()).or_default() += 1;
    }
    order
        .into_iter()
        .map(|key| {
            let n = counts[&key];
            (key, n)
        })
        .collect()
}

/// Turn region counts into shares of the whole catalog, rounded to four
/// decimals. `total` is the original catalog size, never the size of a
/// filtered sub-list.
pub fn normalize_counts(counts: Vec<(String, usize)>, total: usize) -> Vec<(String, f64)> {
    counts
        .into_iter()
        .map(|(key, n)| (key, round4(n as f64 / total as f64)))
        .collect()
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

// ---------------------------------------------------------------------------
// Ordering and truncation of ranking results
// ---------------------------------------------------------------------------

/// Ascending by group key; year series use this for year-over-year order.
pub fn sorted_by_key<V>(mut entries: Vec<(String, V)>) -> Vec<(String, V)> {
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

/// Descending by value, stable, then the first `n` entries.
pub fn top_n_by<V, F>(mut entries: Vec<(String, V)>, cmp: F, n: usize) -> Vec<(String, V)>
where
    F: Fn(&V, &V) -> Ordering,
{
    entries.sort_by(|a, b| cmp(&b.1, &a.1));
    entries.truncate(n);
    entries
}

// ---------------------------------------------------------------------------
// Region qualification
// ---------------------------------------------------------------------------

/// Minimum vacancy count a region needs to be statistically meaningful:
/// 1% of the catalog, rounded up. Independent of the top-10 truncation.
pub fn region_cutoff(catalog_size: usize) -> usize {
    catalog_size.div_ceil(100)
}

/// Restrict the catalog to vacancies whose region meets the cutoff.
/// Regions below the floor are excluded from both region rankings, no
/// matter how they would rank.
pub fn qualified_by_region(catalog: &Catalog) -> Vec<&Vacancy> {
    let cutoff = region_cutoff(catalog.len());
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for vac in &catalog.vacancies {
        *counts.entry(vac.area_name.as_str()).or_default() += 1;
    }
    catalog
        .vacancies
        .iter()
        .filter(|vac| counts.get(vac.area_name.as_str()).copied().unwrap_or(0) >= cutoff)
        .collect()
}

// ---------------------------------------------------------------------------
// The full statistics bundle
// ---------------------------------------------------------------------------

/// The six ordered series handed to the report renderers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsBundle {
    pub profession: String,
    /// Mean salary per year, all vacancies.
    pub salary_by_year: Vec<(String, i64)>,
    /// Mean salary per year, vacancies whose title contains the profession.
    pub profession_salary_by_year: Vec<(String, i64)>,
    /// Vacancy count per year, all vacancies.
    pub count_by_year: Vec<(String, usize)>,
    /// Vacancy count per year for the profession.
    pub profession_count_by_year: Vec<(String, usize)>,
    /// Mean salary for the top-10 qualified regions, descending.
    pub salary_by_region: Vec<(String, i64)>,
    /// Catalog share for the top-10 qualified regions, descending.
    pub share_by_region: Vec<(String, f64)>,
}

/// Four year-keyed series in ascending year order.
pub(crate) type YearSeries = (
    Vec<(String, i64)>,
    Vec<(String, i64)>,
    Vec<(String, usize)>,
    Vec<(String, usize)>,
);

pub(crate) fn year_series(
    vacs: &[&Vacancy],
    profession: &str,
    lookups: &Lookups,
) -> Result<YearSeries> {
    Ok((
        sorted_by_key(salary_by(vacs, GroupBy::Year, "", lookups)?),
        sorted_by_key(salary_by(vacs, GroupBy::Year, profession, lookups)?),
        sorted_by_key(count_by(vacs, GroupBy::Year, "")),
        sorted_by_key(count_by(vacs, GroupBy::Year, profession)),
    ))
}

/// Compute the whole bundle. `parallel` switches the four year series to
/// per-year partitions on the rayon pool; results are identical either way.
pub fn build_stats(
    catalog: &Catalog,
    profession: &str,
    parallel: bool,
    lookups: &Lookups,
) -> Result<StatsBundle> {
    let all: Vec<&Vacancy> = catalog.vacancies.iter().collect();
    let (salary_by_year, profession_salary_by_year, count_by_year, profession_count_by_year) =
        if parallel {
            parallel::year_series(&all, profession, lookups)?
        } else {
            year_series(&all, profession, lookups)?
        };

    let qualified = qualified_by_region(catalog);
    let salary_by_region = top_n_by(
        salary_by(&qualified, GroupBy::Region, "", lookups)?,
        Ord::cmp,
        TOP_REGIONS,
    );
    let share_by_region = top_n_by(
        normalize_counts(count_by(&qualified, GroupBy::Region, ""), catalog.len()),
        f64::total_cmp,
        TOP_REGIONS,
    );

    Ok(StatsBundle {
        profession: profession.to_string(),
        salary_by_year,
        profession_salary_by_year,
        count_by_year,
        profession_count_by_year,
        salary_by_region,
        share_by_region,
    })
}
