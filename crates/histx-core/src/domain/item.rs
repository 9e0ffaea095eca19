use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Validated name of a backend item (a named time-series source).
///
/// Case is preserved; items are case-sensitive on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Parse and trim an item name. Must be non-empty after trimming and free
    /// of control characters; everything else is passed through and
    /// URL-encoded at the transport boundary.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyItemName);
        }

        for (index, ch) in trimmed.chars().enumerate() {
            if ch.is_control() {
                return Err(ValidationError::ItemNameControlChar { index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ItemName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for ItemName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let parsed = ItemName::parse("  Temperature_Outdoor ").expect("must parse");
        assert_eq!(parsed.as_str(), "Temperature_Outdoor");
    }

    #[test]
    fn rejects_empty_and_blank_input() {
        assert!(matches!(
            ItemName::parse(""),
            Err(ValidationError::EmptyItemName)
        ));
        assert!(matches!(
            ItemName::parse("   "),
            Err(ValidationError::EmptyItemName)
        ));
    }

    #[test]
    fn rejects_control_characters() {
        let err = ItemName::parse("Temp\u{0007}erature").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::ItemNameControlChar { index: 4 }
        ));
    }
}
