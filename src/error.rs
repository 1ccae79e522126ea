use thiserror::Error;

/// Engine-level failures. Display strings double as the user-facing
/// messages, so the binary can print an error as-is and exit.
///
/// Library code only ever returns these; deciding whether a failure ends
/// the process is the caller's business.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Source file has no content at all.
    #[error("Пустой файл")]
    EmptySource,

    /// Structurally valid file, but no row survived validation.
    #[error("Нет данных")]
    NoData,

    /// Filter expression without the `": "` separator.
    #[error("Формат ввода некорректен")]
    BadFilterSyntax,

    /// Filter field label outside the known vocabulary.
    #[error("Параметр поиска некорректен")]
    BadFilterField,

    /// Sort field label outside the known vocabulary.
    #[error("Параметр сортировки некорректен")]
    BadSortField,

    /// Reverse-order token other than "Да" / "Нет" / empty.
    #[error("Порядок сортировки задан некорректно")]
    BadSortOrder,

    /// Display column label outside the table header vocabulary.
    #[error("Параметр столбцов некорректен")]
    BadColumn,

    /// Currency code missing from the conversion table. Deliberately fatal:
    /// defaulting to a unit rate would corrupt every downstream mean.
    #[error("Неизвестная валюта: {0}")]
    UnknownCurrency(String),

    /// Raw enum token (experience, premium, gross) with no display label.
    #[error("Неизвестное значение поля: {0}")]
    UnknownToken(String),

    /// Salary bound that does not parse as a number.
    #[error("Некорректное числовое значение: {0}")]
    BadNumber(String),

    /// Publication timestamp that does not parse as ISO 8601 with offset.
    #[error("Некорректная дата публикации: {0}")]
    BadTimestamp(String),

    #[error("Ошибка чтения файла: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка разбора CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ошибка записи отчёта: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
