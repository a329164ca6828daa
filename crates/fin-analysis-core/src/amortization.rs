//! Fully-amortizing installment loan schedules.
//!
//! The level payment comes from the standard annuity formula
//! `P * r / (1 - (1+r)^-n)`, or `P / n` when the rate is zero. Each period
//! charges interest on the running balance and applies the remainder of the
//! payment to principal; the last period retires whatever balance is left so
//! the schedule always ends at exactly zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schedule::{self, PeriodWalk};
use crate::time_value::{periodic_rate, pmt};
use crate::types::{round_currency, AnalysisResult, Money, Rate};
use crate::validation::{self, ValidatedTerms, AMORTIZATION_FIELDS};
use crate::FinAnalysisResult;

/// Loan terms. JSON keys are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationInput {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate as a fraction (0.06 = 6%)
    pub annual_rate: Rate,
    /// Number of monthly payments; must be a whole number
    pub term_months: Decimal,
}

impl AmortizationInput {
    pub fn validate(&self) -> FinAnalysisResult<ValidatedTerms> {
        validation::validate_terms(self.principal, self.annual_rate, self.term_months, None)
    }
}

/// Build the payment schedule for a fully-amortizing loan.
pub fn analyze_amortization(input: &AmortizationInput) -> FinAnalysisResult<AnalysisResult> {
    let terms = input.validate()?;
    let rate = periodic_rate(terms.annual_rate);
    let payment = pmt(rate, terms.term_months, terms.principal, Decimal::ZERO)?;

    let schedule = PeriodWalk {
        opening_balance: terms.principal,
        periodic_rate: rate,
        payment,
        periods: terms.term_months,
        terminal_balance: Decimal::ZERO,
    }
    .run()?;

    Ok(AnalysisResult {
        monthly_payment: round_currency(payment),
        total_payments: schedule::total_payments(&schedule)?,
        total_interest: schedule::total_interest(&schedule)?,
        schedule,
    })
}

/// Parse a raw JSON body, validate it, and build the loan schedule.
pub fn analyze_amortization_value(value: &Value) -> FinAnalysisResult<AnalysisResult> {
    let input: AmortizationInput = validation::parse_input(value, AMORTIZATION_FIELDS)?;
    analyze_amortization(&input)
}
