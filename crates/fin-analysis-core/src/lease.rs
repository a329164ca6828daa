//! Lease schedules that amortize down to a residual value.
//!
//! The payment is the level annuity that carries the financed amount to the
//! residual at term end:
//!
//! `PMT = (PV - FV / (1+r)^n) * r / (1 - (1+r)^-n)`, or `(PV - FV) / n` at r = 0.
//!
//! The last period's principal is plugged to `balance - residual`, so the
//! final recorded balance is the residual value exactly.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::schedule::{self, PeriodWalk};
use crate::time_value::{periodic_rate, pmt};
use crate::types::{round_currency, AnalysisResult};
use crate::validation::{self, FinancialInput, LEASE_FIELDS};
use crate::error::FinAnalysisError;
use crate::FinAnalysisResult;

/// Lease terms: the shared schema, with `residualValue` defaulting to zero.
pub type LeaseInput = FinancialInput;

/// Build the payment schedule for a lease with a residual value.
pub fn analyze_lease(input: &LeaseInput) -> FinAnalysisResult<AnalysisResult> {
    let terms = input.validate()?;
    let rate = periodic_rate(terms.annual_rate);
    let payment = pmt(rate, terms.term_months, terms.principal, terms.residual_value)?;

    let schedule = PeriodWalk {
        opening_balance: terms.principal,
        periodic_rate: rate,
        payment,
        periods: terms.term_months,
        terminal_balance: terms.residual_value,
    }
    .run()?;

    // Every recorded payment is the rounded level payment, so this sum is
    // identically monthly_payment * term_months.
    let total_payments = schedule::total_payments(&schedule)?;
    let total_interest = terms
        .principal
        .checked_sub(terms.residual_value)
        .and_then(|amortized| total_payments.checked_sub(amortized))
        .map(round_currency)
        .ok_or_else(|| FinAnalysisError::overflow("total interest"))?;

    Ok(AnalysisResult {
        monthly_payment: round_currency(payment),
        total_payments,
        total_interest,
        schedule,
    })
}

/// Parse a raw JSON body, validate it, and build the lease schedule.
pub fn analyze_lease_value(value: &Value) -> FinAnalysisResult<AnalysisResult> {
    let input: LeaseInput = validation::parse_input(value, LEASE_FIELDS)?;
    analyze_lease(&input)
}

/// Reasonableness notes about lease terms. Never blocks a computation.
pub fn lease_warnings(input: &LeaseInput) -> Vec<String> {
    let mut warnings = Vec::new();
    let residual = input.residual_value.unwrap_or(Decimal::ZERO);

    if residual >= input.principal {
        warnings.push(format!(
            "Residual value ({residual}) is not below principal ({}); the lease does not amortize",
            input.principal
        ));
    }

    if let Ok(terms) = input.validate() {
        let rate = periodic_rate(terms.annual_rate);
        if let Ok(payment) = pmt(rate, terms.term_months, terms.principal, terms.residual_value) {
            if payment < Decimal::ZERO {
                warnings.push(format!(
                    "Periodic payment is negative ({}); the lessor would pay the lessee",
                    round_currency(payment)
                ));
            }
        }
    }

    warnings
}
