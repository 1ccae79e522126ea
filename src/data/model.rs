use chrono::{DateTime, FixedOffset};

use crate::config::Lookups;
use crate::error::{EngineError, Result};

// ---------------------------------------------------------------------------
// Salary – compensation sub-record
// ---------------------------------------------------------------------------

/// Compensation fork of one vacancy. Bounds are kept as the raw source
/// strings; parsing happens at the point of use so a malformed bound
/// surfaces as a computation error, not a load-time rejection.
///
/// `from <= to` is assumed, not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Salary {
    /// Lower bound of the fork, raw numeric string.
    pub from: String,
    /// Upper bound of the fork, raw numeric string.
    pub to: String,
    /// Pre-tax flag: "true" / "false" / "Нет данных".
    pub gross: String,
    /// Currency code ("RUR", "EUR", ...).
    pub currency: String,
}

impl Salary {
    /// Convert an amount in this salary's currency into roubles.
    pub fn to_rub(&self, amount: f64, lookups: &Lookups) -> Result<f64> {
        Ok(amount * lookups.rate(&self.currency)?)
    }

    /// Fork midpoint in roubles: `(from + to) / 2 * rate`.
    ///
    /// The salary sort key and the mean-salary aggregate both go through
    /// here, so displayed and aggregated values can never drift apart.
    pub fn midpoint_rub(&self, lookups: &Lookups) -> Result<f64> {
        let lo = parse_f64(&self.from)?;
        let hi = parse_f64(&self.to)?;
        self.to_rub((lo + hi) / 2.0, lookups)
    }

    /// Both bounds as integers, for the range-containment predicate.
    pub fn bounds(&self) -> Result<(i64, i64)> {
        Ok((parse_i64(&self.from)?, parse_i64(&self.to)?))
    }
}

pub(crate) fn parse_f64(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|_| EngineError::BadNumber(s.to_string()))
}

pub(crate) fn parse_i64(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .map_err(|_| EngineError::BadNumber(s.to_string()))
}

// ---------------------------------------------------------------------------
// Vacancy – one accepted posting
// ---------------------------------------------------------------------------

/// One job posting, immutable after load. Optional source fields hold the
/// "Нет данных" sentinel instead of an Option, so formatting is uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct Vacancy {
    pub name: String,
    pub description: String,
    /// Skill list, split on newlines at load time. A missing skills column
    /// yields a one-element sentinel vector.
    pub key_skills: Vec<String>,
    /// Raw experience token ("noExperience", "between1And3", ...).
    pub experience_id: String,
    /// Raw premium token ("true" / "false", any case).
    pub premium: String,
    pub employer_name: String,
    pub salary: Salary,
    pub area_name: String,
    /// Publication timestamp, ISO 8601 with offset, kept verbatim.
    pub published_at: String,
}

impl Vacancy {
    /// Publication year as a string slice of the raw timestamp.
    ///
    /// A derived view: year-grouped aggregation reads this instead of
    /// rewriting `published_at` in place, so the full timestamp stays
    /// available to every other query on the same catalog.
    pub fn year(&self) -> &str {
        self.published_at.get(..4).unwrap_or(&self.published_at)
    }

    /// Date-only rendering, `dd.mm.yyyy`.
    pub fn published_date(&self) -> String {
        let date = self
            .published_at
            .split('T')
            .next()
            .unwrap_or(&self.published_at);
        let mut parts: Vec<&str> = date.split('-').collect();
        parts.reverse();
        parts.join(".")
    }

    /// Fully parsed publication timestamp, for chronological ordering.
    pub fn published_ts(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.published_at, "%Y-%m-%dT%H:%M:%S%z")
            .map_err(|_| EngineError::BadTimestamp(self.published_at.clone()))
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded record set
// ---------------------------------------------------------------------------

/// All accepted vacancies in source order, plus the raw row count before
/// shape filtering.
///
/// Share-of-total statistics divide by `len()` of this catalog, never by
/// the size of a filtered sub-list.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub vacancies: Vec<Vacancy>,
    /// Data rows in the source file before shape validation.
    pub source_rows: usize,
}

impl Catalog {
    /// Number of accepted vacancies.
    pub fn len(&self) -> usize {
        self.vacancies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vacancies.is_empty()
    }
}
