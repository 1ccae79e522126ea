use std::collections::HashMap;

use crate::error::{EngineError, Result};

/// Sentinel stored in optional fields missing from the source schema, so
/// downstream formatting never has to branch on absence.
pub const NO_DATA: &str = "Нет данных";

// ---------------------------------------------------------------------------
// Lookups – read-only reference tables
// ---------------------------------------------------------------------------

/// Reference tables shared by the filter, sort, format and stats paths:
/// currency conversion rates, display translations for raw tokens, and the
/// experience rank order.
///
/// Built once at startup and passed around by reference; nothing here is
/// ever mutated afterwards.
pub struct Lookups {
    currency_to_rub: HashMap<&'static str, f64>,
    currency_labels: HashMap<&'static str, &'static str>,
    experience_labels: HashMap<&'static str, &'static str>,
    experience_ranks: HashMap<&'static str, u8>,
}

impl Lookups {
    pub fn new() -> Self {
        let currency_to_rub = HashMap::from([
            ("AZN", 35.68),
            ("BYR", 23.91),
            ("EUR", 59.90),
            ("GEL", 21.74),
            ("KGS", 0.76),
            ("KZT", 0.13),
            ("RUR", 1.0),
            ("UAH", 1.64),
            ("USD", 60.66),
            ("UZS", 0.0055),
        ]);
        let currency_labels = HashMap::from([
            ("AZN", "Манаты"),
            ("BYR", "Белорусские рубли"),
            ("EUR", "Евро"),
            ("GEL", "Грузинский лари"),
            ("KGS", "Киргизский сом"),
            ("KZT", "Тенге"),
            ("RUR", "Рубли"),
            ("UAH", "Гривны"),
            ("USD", "Доллары"),
            ("UZS", "Узбекский сум"),
        ]);
        let experience_labels = HashMap::from([
            ("noExperience", "Нет опыта"),
            ("between1And3", "От 1 года до 3 лет"),
            ("between3And6", "От 3 до 6 лет"),
            ("moreThan6", "Более 6 лет"),
        ]);
        let experience_ranks = HashMap::from([
            ("noExperience", 0),
            ("between1And3", 1),
            ("between3And6", 2),
            ("moreThan6", 3),
        ]);
        Lookups {
            currency_to_rub,
            currency_labels,
            experience_labels,
            experience_ranks,
        }
    }

    /// Rate multiplying an amount in `code` into roubles.
    ///
    /// Unknown codes are an error, never a silent unit rate.
    pub fn rate(&self, code: &str) -> Result<f64> {
        self.currency_to_rub
            .get(code)
            .copied()
            .ok_or_else(|| EngineError::UnknownCurrency(code.to_string()))
    }

    /// Human-readable label for a currency code ("RUR" → "Рубли").
    pub fn currency_label(&self, code: &str) -> Result<&'static str> {
        self.currency_labels
            .get(code)
            .copied()
            .ok_or_else(|| EngineError::UnknownCurrency(code.to_string()))
    }

    /// Human-readable label for an experience token. The "no data" sentinel
    /// translates to itself.
    pub fn experience_label(&self, token: &str) -> Result<&'static str> {
        if token == NO_DATA {
            return Ok(NO_DATA);
        }
        self.experience_labels
            .get(token)
            .copied()
            .ok_or_else(|| EngineError::UnknownToken(token.to_string()))
    }

    /// Fixed sort rank of an experience tier.
    pub fn experience_rank(&self, token: &str) -> Result<u8> {
        self.experience_ranks
            .get(token)
            .copied()
            .ok_or_else(|| EngineError::UnknownToken(token.to_string()))
    }

    /// "Да"/"Нет" for a raw boolean token, case-insensitive. The "no data"
    /// sentinel translates to itself.
    pub fn bool_label(&self, token: &str) -> Result<&'static str> {
        if token == NO_DATA {
            return Ok(NO_DATA);
        }
        match token.to_ascii_lowercase().as_str() {
            "true" => Ok("Да"),
            "false" => Ok("Нет"),
            _ => Err(EngineError::UnknownToken(token.to_string())),
        }
    }
}

impl Default for Lookups {
    fn default() -> Self {
        Self::new()
    }
}
