//! Input schema shared by the loan and lease analyzers.
//!
//! Validation never stops at the first problem: every field is checked and
//! all issues are returned together so a caller can report them per field.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FinAnalysisError, IssueCode, ValidationIssue};
use crate::types::{Money, Rate};
use crate::FinAnalysisResult;

/// Combined input schema: principal, annual rate, term and an optional
/// residual value. The lease analyzer consumes it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInput {
    /// Amount financed
    pub principal: Money,
    /// Nominal annual rate as a fraction (0.05 = 5%)
    pub annual_rate: Rate,
    /// Number of monthly periods; must be a whole number
    pub term_months: Decimal,
    /// Value retained at term end. Defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_value: Option<Money>,
}

/// Input after every constraint has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub residual_value: Money,
}

/// A field expected in a raw JSON body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldRule {
    pub name: &'static str,
    pub required: bool,
}

pub(crate) const AMORTIZATION_FIELDS: &[FieldRule] = &[
    FieldRule { name: "principal", required: true },
    FieldRule { name: "annualRate", required: true },
    FieldRule { name: "termMonths", required: true },
];

pub(crate) const LEASE_FIELDS: &[FieldRule] = &[
    FieldRule { name: "principal", required: true },
    FieldRule { name: "annualRate", required: true },
    FieldRule { name: "termMonths", required: true },
    FieldRule { name: "residualValue", required: false },
];

impl FinancialInput {
    pub fn validate(&self) -> FinAnalysisResult<ValidatedTerms> {
        validate_terms(
            self.principal,
            self.annual_rate,
            self.term_months,
            self.residual_value,
        )
    }
}

/// Check every constraint and normalise the term to a period count.
pub fn validate_terms(
    principal: Money,
    annual_rate: Rate,
    term_months: Decimal,
    residual_value: Option<Money>,
) -> FinAnalysisResult<ValidatedTerms> {
    let mut issues = Vec::new();

    if principal <= Decimal::ZERO {
        issues.push(ValidationIssue::new(
            "principal",
            "Number must be greater than 0",
            IssueCode::TooSmall,
        ));
    }

    if annual_rate < Decimal::ZERO {
        issues.push(ValidationIssue::new(
            "annualRate",
            "Number must be greater than or equal to 0",
            IssueCode::TooSmall,
        ));
    } else if annual_rate > Decimal::ONE {
        issues.push(ValidationIssue::new(
            "annualRate",
            "Number must be less than or equal to 1",
            IssueCode::TooBig,
        ));
    }

    let term = check_term(term_months, &mut issues);

    let residual_value = residual_value.unwrap_or(Decimal::ZERO);
    if residual_value < Decimal::ZERO {
        issues.push(ValidationIssue::new(
            "residualValue",
            "Number must be greater than or equal to 0",
            IssueCode::TooSmall,
        ));
    }

    match term {
        Some(term_months) if issues.is_empty() => Ok(ValidatedTerms {
            principal,
            annual_rate,
            term_months,
            residual_value,
        }),
        _ => Err(FinAnalysisError::Validation { issues }),
    }
}

fn check_term(term_months: Decimal, issues: &mut Vec<ValidationIssue>) -> Option<u32> {
    let before = issues.len();
    if !term_months.fract().is_zero() {
        issues.push(ValidationIssue::new(
            "termMonths",
            "Expected integer, received float",
            IssueCode::NotInteger,
        ));
    }
    if term_months <= Decimal::ZERO {
        issues.push(ValidationIssue::new(
            "termMonths",
            "Number must be greater than 0",
            IssueCode::TooSmall,
        ));
    }
    if issues.len() > before {
        return None;
    }

    let term = term_months.to_u32();
    if term.is_none() {
        issues.push(ValidationIssue::new(
            "termMonths",
            format!("Number must be less than or equal to {}", u32::MAX),
            IssueCode::TooBig,
        ));
    }
    term
}

/// Shape-check a raw JSON body against `rules`, then deserialize it.
///
/// Missing required fields and non-numeric values become `invalid_type`
/// issues instead of a bare deserialization error.
pub(crate) fn parse_input<T: DeserializeOwned>(
    value: &Value,
    rules: &[FieldRule],
) -> FinAnalysisResult<T> {
    let issues = check_shape(value, rules);
    if !issues.is_empty() {
        return Err(FinAnalysisError::Validation { issues });
    }

    serde_json::from_value(value.clone()).map_err(|e| FinAnalysisError::Validation {
        issues: vec![ValidationIssue::new("", e.to_string(), IssueCode::InvalidType)],
    })
}

fn check_shape(value: &Value, rules: &[FieldRule]) -> Vec<ValidationIssue> {
    let Some(map) = value.as_object() else {
        return vec![ValidationIssue::new(
            "",
            format!("Expected object, received {}", json_kind(value)),
            IssueCode::InvalidType,
        )];
    };

    let mut issues = Vec::new();
    for rule in rules {
        match map.get(rule.name) {
            None | Some(Value::Null) if rule.required => {
                issues.push(ValidationIssue::new(rule.name, "Required", IssueCode::InvalidType));
            }
            None | Some(Value::Null) | Some(Value::Number(_)) => {}
            Some(other) => issues.push(ValidationIssue::new(
                rule.name,
                format!("Expected number, received {}", json_kind(other)),
                IssueCode::InvalidType,
            )),
        }
    }
    issues
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse and validate a raw body against the combined schema.
pub fn validate_financial_value(value: &Value) -> FinAnalysisResult<ValidatedTerms> {
    parse_input::<FinancialInput>(value, LEASE_FIELDS)?.validate()
}

/// Non-failing predicate over the combined schema.
pub fn is_valid_financial_input(value: &Value) -> bool {
    validate_financial_value(value).is_ok()
}
