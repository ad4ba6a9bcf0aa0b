//! Results of validating and submitting an upload.

use serde::{Deserialize, Serialize};

use crate::fields::RequiredFields;

/// Result of checking a header row against the required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// True when no required field is missing.
    pub is_valid: bool,
    /// Missing required fields, in registry order.
    pub missing_fields: Vec<String>,
    /// The headers that were checked.
    pub headers: Vec<String>,
}

impl ValidationOutcome {
    /// Required fields that were found, in registry order.
    pub fn present_fields(&self) -> Vec<&'static str> {
        RequiredFields
            .iter()
            .filter(|field| !self.missing_fields.iter().any(|missing| missing == field))
            .collect()
    }

    pub fn missing_count(&self) -> usize {
        self.missing_fields.len()
    }
}

/// Result of one webhook delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    /// The message on success, the error text on failure.
    pub fn text(&self) -> &str {
        let text = if self.success {
            self.message.as_deref()
        } else {
            self.error.as_deref()
        };
        text.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_fields_excludes_missing() {
        let outcome = ValidationOutcome {
            is_valid: false,
            missing_fields: vec!["email".to_string(), "esp host".to_string()],
            headers: Vec::new(),
        };
        let present = outcome.present_fields();
        assert_eq!(present.len(), 12);
        assert!(!present.contains(&"email"));
        assert_eq!(present.first(), Some(&"account_linkedin_url"));
    }

    #[test]
    fn submission_outcome_text() {
        assert_eq!(SubmissionOutcome::succeeded("sent").text(), "sent");
        assert_eq!(SubmissionOutcome::failed("HTTP 500: boom").text(), "HTTP 500: boom");
    }

    #[test]
    fn submission_outcome_skips_absent_fields() {
        let json = serde_json::to_string(&SubmissionOutcome::failed("nope")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"nope"}"#);
    }
}
