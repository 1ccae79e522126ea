use std::collections::HashMap;

use rayon::prelude::*;

use super::YearSeries;
use crate::config::Lookups;
use crate::data::model::Vacancy;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Per-year partition aggregation
// ---------------------------------------------------------------------------

/// The four year-keyed series, computed one partition per year on the
/// rayon pool.
///
/// Each year's aggregate depends only on that year's rows, so the split
/// is an embarrassingly parallel reduction: workers share nothing mutable
/// and hand back one scalar tuple per partition. The merged result is
/// identical to the sequential path — per-partition sums run over the
/// same rows in the same encounter order. Any partition error (unknown
/// currency, malformed bound) fails the whole aggregation rather than
/// dropping a year.
pub(crate) fn year_series(
    vacs: &[&Vacancy],
    profession: &str,
    lookups: &Lookups,
) -> Result<YearSeries> {
    let mut years: Vec<&str> = Vec::new();
    let mut partitions: HashMap<&str, Vec<&Vacancy>> = HashMap::new();
    for vac in vacs {
        let year = vac.year();
        if !partitions.contains_key(year) {
            years.push(year);
        }
        partitions.entry(year).or_default().push(vac);
    }

    let mut slices = years
        .par_iter()
        .map(|year| aggregate_partition(year, &partitions[year], profession, lookups))
        .collect::<Result<Vec<YearSlice>>>()?;
    slices.sort_by(|a, b| a.year.cmp(&b.year));

    let mut salary = Vec::with_capacity(slices.len());
    let mut profession_salary = Vec::with_capacity(slices.len());
    let mut count = Vec::with_capacity(slices.len());
    let mut profession_count = Vec::with_capacity(slices.len());
    for slice in slices {
        salary.push((slice.year.clone(), slice.salary));
        profession_salary.push((slice.year.clone(), slice.profession_salary));
        count.push((slice.year.clone(), slice.count));
        profession_count.push((slice.year, slice.profession_count));
    }
    Ok((salary, profession_salary, count, profession_count))
}

/// One year's worth of the four aggregates.
struct YearSlice {
    year: String,
    salary: i64,
    profession_salary: i64,
    count: usize,
    profession_count: usize,
}

fn aggregate_partition(
    year: &str,
    partition: &[&Vacancy],
    profession: &str,
    lookups: &Lookups,
) -> Result<YearSlice> {
    let mut sum = 0.0;
    let mut profession_sum = 0.0;
    let mut count = 0usize;
    let mut profession_count = 0usize;
    for vac in partition {
        let midpoint = vac.salary.midpoint_rub(lookups)?;
        sum += midpoint;
        count += 1;
        if profession.is_empty() || vac.name.contains(profession) {
            profession_sum += midpoint;
            profession_count += 1;
        }
    }
    Ok(YearSlice {
        year: year.to_string(),
        salary: mean_floor(sum, count),
        profession_salary: mean_floor(profession_sum, profession_count),
        count,
        profession_count,
    })
}

fn mean_floor(sum: f64, n: usize) -> i64 {
    if n == 0 {
        0
    } else {
        (sum / n as f64).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NO_DATA;
    use crate::data::model::Salary;

    fn vacancy(name: &str, year: u32, from: &str, to: &str, currency: &str) -> Vacancy {
        Vacancy {
            name: name.to_string(),
            description: NO_DATA.to_string(),
            key_skills: vec![NO_DATA.to_string()],
            experience_id: "noExperience".to_string(),
            premium: "true".to_string(),
            employer_name: NO_DATA.to_string(),
            salary: Salary {
                from: from.to_string(),
                to: to.to_string(),
                gross: "true".to_string(),
                currency: currency.to_string(),
            },
            area_name: "Москва".to_string(),
            published_at: format!("{year}-07-06T02:05:26+0300"),
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let lk = Lookups::new();
        let vacancies = vec![
            vacancy("Аналитик", 2021, "100", "200", "RUR"),
            vacancy("Инженер", 2021, "300", "500", "EUR"),
            vacancy("Аналитик данных", 2022, "700", "900", "RUR"),
            vacancy("Инженер", 2023, "100", "300", "USD"),
            vacancy("Аналитик", 2023, "200", "400", "RUR"),
        ];
        let refs: Vec<&Vacancy> = vacancies.iter().collect();
        let sequential = crate::stats::year_series(&refs, "Аналитик", &lk).unwrap();
        let parallel = year_series(&refs, "Аналитик", &lk).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn empty_profession_mirrors_the_overall_series() {
        let lk = Lookups::new();
        let vacancies = vec![
            vacancy("Аналитик", 2021, "100", "200", "RUR"),
            vacancy("Инженер", 2022, "300", "500", "RUR"),
        ];
        let refs: Vec<&Vacancy> = vacancies.iter().collect();
        let (salary, profession_salary, count, profession_count) =
            year_series(&refs, "", &lk).unwrap();
        assert_eq!(salary, profession_salary);
        assert_eq!(count, profession_count);
    }

    #[test]
    fn a_failing_partition_fails_the_whole_aggregation() {
        let lk = Lookups::new();
        let vacancies = vec![
            vacancy("Аналитик", 2021, "100", "200", "RUR"),
            vacancy("Инженер", 2022, "300", "500", "QWE"),
        ];
        let refs: Vec<&Vacancy> = vacancies.iter().collect();
        assert!(year_series(&refs, "", &lk).is_err());
    }
}
