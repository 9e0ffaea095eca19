use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::ItemName;
use crate::ValidationError;

/// Requested download file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    /// Extension the download sink appends; the core filename carries none.
    pub const fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl Display for FileFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ValidationError::InvalidFormat {
                value: input.to_owned(),
            }),
        }
    }
}

/// Validated parameters for one export invocation, immutable once handed to
/// the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub item: ItemName,
    pub begin: Date,
    pub end: Date,
    pub format: FileFormat,
}

impl ExportRequest {
    /// Build a request, rejecting inverted date ranges before any network
    /// call is made.
    pub fn new(
        item: ItemName,
        begin: Date,
        end: Date,
        format: FileFormat,
    ) -> Result<Self, ValidationError> {
        if begin > end {
            return Err(ValidationError::InvalidDateRange { begin, end });
        }

        Ok(Self {
            item,
            begin,
            end,
            format,
        })
    }

    /// Suggested filename, `{itemName}_{beginDate}_to_{endDate}`, with no
    /// extension; appending one is the sink's concern.
    pub fn filename(&self) -> String {
        format!("{}_{}_to_{}", self.item, self.begin, self.end)
    }
}
