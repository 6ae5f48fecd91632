use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::ValidationReport;

/// Errors returned by the fallible edges of the crate.
///
/// The calculation path itself never fails; see [`crate::core::calculate_line_item`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DefterError {
    /// One or more line items failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationReport),

    /// Request body could not be decoded.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display language for user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    /// Parse a language tag such as `"tr"`, `"tr-TR"` or `"en-GB"`.
    /// Unknown languages fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag.split(['-', '_']).next().unwrap_or_default();
        if lang.eq_ignore_ascii_case("tr") {
            Self::Tr
        } else {
            Self::En
        }
    }
}

/// A single validation error with field path and bilingual message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Path to the invalid field (e.g. "unitPrice" or "items[2].description").
    pub field: String,
    /// English description.
    pub message: String,
    /// Turkish description.
    pub message_tr: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        message_tr: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            message_tr: message_tr.into(),
        }
    }

    /// The message in the requested language.
    pub fn localized(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.message,
            Locale::Tr => &self.message_tr,
        }
    }

    /// Prefix the field path, e.g. `description` → `items[3].description`.
    pub(crate) fn with_prefix(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_from_tag() {
        assert_eq!(Locale::from_tag("tr"), Locale::Tr);
        assert_eq!(Locale::from_tag("tr-TR"), Locale::Tr);
        assert_eq!(Locale::from_tag("TR_tr"), Locale::Tr);
        assert_eq!(Locale::from_tag("en-GB"), Locale::En);
        assert_eq!(Locale::from_tag("de"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn localized_message() {
        let err = ValidationError::new("description", "Description is required", "Açıklama zorunludur");
        assert_eq!(err.localized(Locale::En), "Description is required");
        assert_eq!(err.localized(Locale::Tr), "Açıklama zorunludur");
        assert_eq!(err.to_string(), "description: Description is required");
    }

    #[test]
    fn prefix_field() {
        let err = ValidationError::new("unitPrice", "x", "y").with_prefix("items[4]");
        assert_eq!(err.field, "items[4].unitPrice");
    }
}
