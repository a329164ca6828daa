use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable reason attached to a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    NotInteger,
    InvalidJson,
}

/// A single field-level problem found while validating input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field name (camelCase, as it appears on the wire). Empty for the body itself.
    pub path: String,
    pub message: String,
    pub code: IssueCode,
}

impl ValidationIssue {
    pub fn new(path: &str, message: impl Into<String>, code: IssueCode) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
            code,
        }
    }
}

#[derive(Debug, Error)]
pub enum FinAnalysisError {
    #[error("Validation failed: {}", render_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Tool {0} not found")]
    UnknownTool(String),

    #[error("Method {0} not supported")]
    MethodNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinAnalysisError {
    pub(crate) fn overflow(context: &str) -> Self {
        FinAnalysisError::Overflow {
            context: context.to_string(),
        }
    }

    /// Per-field issues, when this is a validation failure.
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            FinAnalysisError::Validation { issues } => Some(issues),
            _ => None,
        }
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| {
            if i.path.is_empty() {
                i.message.clone()
            } else {
                format!("{} — {}", i.path, i.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for FinAnalysisError {
    fn from(e: serde_json::Error) -> Self {
        FinAnalysisError::SerializationError(e.to_string())
    }
}
