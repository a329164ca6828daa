pub mod error;
pub mod schedule;
pub mod stable_json;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "lease")]
pub mod lease;

#[cfg(feature = "tools")]
pub mod tools;

pub use error::{FinAnalysisError, IssueCode, ValidationIssue};
pub use types::*;

/// Standard result type for all fin-analysis operations
pub type FinAnalysisResult<T> = Result<T, FinAnalysisError>;
