//! Duty identifiers, names and request/response bodies.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Maximum length of a duty name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 255;

/// Length of the canonical 8-4-4-4-12 textual UUID form.
const HYPHENATED_LEN: usize = 36;

/// A duty identifier that passed the UUID format check.
///
/// Only the canonical hyphenated form is accepted; braced, URN and
/// unhyphenated spellings are rejected. Rendering is always lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DutyId(Uuid);

impl DutyId {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != HYPHENATED_LEN {
            return Err(Error::InvalidId);
        }

        Uuid::parse_str(raw).map(Self).map_err(|_| Error::InvalidId)
    }
}

impl fmt::Display for DutyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A trimmed, non-empty duty name of at most [`MAX_NAME_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyName(String);

impl DutyName {
    /// Validate a candidate name taken from a request body.
    ///
    /// `None` covers both an absent field and a body that could not be
    /// decoded at all.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let trimmed = raw.map(str::trim).unwrap_or_default();

        if trimmed.is_empty() {
            return Err(Error::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(Error::NameTooLong { max: MAX_NAME_LEN });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of create and update requests.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DutyInput {
    pub name: Option<String>,
}

impl DutyInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Confirmation body for update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_duty_id_accepts_canonical_form() {
        let id = DutyId::parse("3019c036-ab9f-40d1-979d-219e9a54fd36").unwrap();
        assert_eq!(id.to_string(), "3019c036-ab9f-40d1-979d-219e9a54fd36");
    }

    #[test]
    fn test_duty_id_renders_lowercase() {
        let id = DutyId::parse("BC2D95D7-6084-4DAC-AD04-6CCB754354E9").unwrap();
        assert_eq!(id.to_string(), "bc2d95d7-6084-4dac-ad04-6ccb754354e9");
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("not-a-uuid")]
    #[case("3019c036ab9f40d1979d219e9a54fd36")]
    #[case("{3019c036-ab9f-40d1-979d-219e9a54fd36}")]
    #[case("urn:uuid:3019c036-ab9f-40d1-979d-219e9a54fd36")]
    #[case("3019c036-ab9f-40d1-979d-219e9a54fd3g")]
    #[case("3019c036-ab9f-40d1-979d-219e9a54fd3")]
    fn test_duty_id_rejects_malformed(#[case] raw: &str) {
        assert!(matches!(DutyId::parse(raw), Err(Error::InvalidId)));
    }

    #[test]
    fn test_duty_name_is_trimmed() {
        let name = DutyName::parse(Some("  Buy groceries \n")).unwrap();
        assert_eq!(name.as_str(), "Buy groceries");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("\t\n"))]
    fn test_duty_name_rejects_empty(#[case] raw: Option<&str>) {
        assert!(matches!(DutyName::parse(raw), Err(Error::EmptyName)));
    }

    #[test]
    fn test_duty_name_length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_NAME_LEN);
        assert!(DutyName::parse(Some(&at_limit)).is_ok());

        let over_limit = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            DutyName::parse(Some(&over_limit)),
            Err(Error::NameTooLong { max: MAX_NAME_LEN })
        ));
    }
}
