//! OperationOutcome model: the structured diagnostic payload a FHIR
//! server returns for failed operations.

use serde::{Deserialize, Serialize};

/// A FHIR OperationOutcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutcome {
    /// The issues reported by the server
    #[serde(default)]
    pub issue: Vec<OperationOutcomeIssue>,
}

/// One issue of an OperationOutcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutcomeIssue {
    /// Severity: `fatal`, `error`, `warning` or `information`
    pub severity: String,

    /// Issue type code from the FHIR issue-type value set
    pub code: String,

    /// Human-readable diagnostic text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,

    /// FHIRPath expressions locating the issue
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expression: Vec<String>,
}

impl OperationOutcome {
    /// First human-readable diagnostic text, if any issue carries one.
    pub fn first_diagnostics(&self) -> Option<&str> {
        self.issue.iter().find_map(|i| i.diagnostics.as_deref())
    }

    /// True when any issue is of severity `fatal` or `error`.
    pub fn has_errors(&self) -> bool {
        self.issue
            .iter()
            .any(|i| i.severity == "fatal" || i.severity == "error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_round_trip() {
        let json = r#"{"issue":[{"severity":"error","code":"not-found"}]}"#;
        let outcome: OperationOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.issue.len(), 1);
        assert!(outcome.has_errors());
        assert_eq!(outcome.first_diagnostics(), None);
        assert_eq!(serde_json::to_string(&outcome).unwrap(), json);
    }

    #[test]
    fn test_first_diagnostics_skips_issues_without_text() {
        let outcome = OperationOutcome {
            issue: vec![
                OperationOutcomeIssue {
                    severity: "warning".to_string(),
                    code: "informational".to_string(),
                    diagnostics: None,
                    expression: vec![],
                },
                OperationOutcomeIssue {
                    severity: "error".to_string(),
                    code: "invalid".to_string(),
                    diagnostics: Some("name is required".to_string()),
                    expression: vec![],
                },
            ],
        };
        assert_eq!(outcome.first_diagnostics(), Some("name is required"));
    }
}
