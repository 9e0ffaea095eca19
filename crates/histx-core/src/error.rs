use std::fmt::{Display, Formatter};

use thiserror::Error;
use time::Date;

/// Field-level validation errors surfaced before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("item name cannot be empty")]
    EmptyItemName,
    #[error("item name contains a control character at index {index}")]
    ItemNameControlChar { index: usize },

    #[error("invalid calendar date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("begin date {begin} is after end date {end}")]
    InvalidDateRange { begin: Date, end: Date },

    #[error("invalid timestamp '{value}', expected RFC3339 or epoch milliseconds")]
    InvalidTimestamp { value: String },
    #[error("epoch timestamp {millis} is out of representable range")]
    TimestampOutOfRange { millis: i64 },

    #[error("invalid file format '{value}', expected one of csv, json")]
    InvalidFormat { value: String },

    #[error("begin date is required")]
    MissingBeginDate,
    #[error("end date is required")]
    MissingEndDate,
    #[error("file format is required")]
    MissingFileFormat,
    #[error("transition '{transition}' is not available on step '{step}'")]
    UnavailableTransition {
        step: &'static str,
        transition: &'static str,
    },
}

/// Pipeline stage an export error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    UnitLookup,
    HistoryFetch,
    Serialize,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnitLookup => "unit lookup",
            Self::HistoryFetch => "history fetch",
            Self::Serialize => "serialize",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort an export. Every variant names the stage and item so the
/// single surfaced message identifies what failed; partial work is discarded.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{stage} failed for item '{item}': {message}")]
    Transport {
        stage: Stage,
        item: String,
        message: String,
    },

    #[error("{stage} for item '{item}' returned status {status}")]
    Status {
        stage: Stage,
        item: String,
        status: u16,
    },

    #[error("{stage} returned a malformed body for item '{item}': {message}")]
    Malformed {
        stage: Stage,
        item: String,
        message: String,
    },

    #[error("no datapoints found for item '{item}' between {start} and {end}")]
    EmptyHistory {
        item: String,
        start: String,
        end: String,
    },

    #[error("{stage} failed for item '{item}': {source}")]
    Serialization {
        stage: Stage,
        item: String,
        #[source]
        source: serde_json::Error,
    },
}
