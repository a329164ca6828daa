use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::FinAnalysisError;
use crate::types::{Money, Rate, MONTHS_PER_YEAR};
use crate::FinAnalysisResult;

/// Monthly periodic rate from a nominal annual rate.
pub fn periodic_rate(annual_rate: Rate) -> Rate {
    annual_rate / MONTHS_PER_YEAR
}

/// (1 + r)^n, or `None` when the result leaves the Decimal range.
pub fn compound_factor(rate: Rate, nper: u32) -> Option<Decimal> {
    Decimal::ONE.checked_add(rate)?.checked_powi(i64::from(nper))
}

/// (1 + r)^-n. A compound factor too large to represent discounts to zero;
/// `None` when the reciprocal itself leaves the Decimal range.
pub fn discount_factor(rate: Rate, nper: u32) -> Option<Decimal> {
    match compound_factor(rate, nper) {
        Some(factor) => Decimal::ONE.checked_div(factor),
        None => Some(Decimal::ZERO),
    }
}

/// Level payment that carries `present_value` down to `future_value` over
/// `nper` periods, paid in arrears:
///
/// PMT = (PV - FV / (1+r)^n) * r / (1 - (1+r)^-n)
///
/// At r = 0 this is straight-line: (PV - FV) / n. Unlike the spreadsheet
/// convention the payment is returned as a positive amount. A payment
/// outside the Decimal range is an `Overflow` error.
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> FinAnalysisResult<Money> {
    if nper == 0 {
        return Err(FinAnalysisError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(FinAnalysisError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let n = Decimal::from(nper);
    let straight_line = present_value
        .checked_sub(future_value)
        .and_then(|amortized| amortized.checked_div(n))
        .ok_or_else(|| FinAnalysisError::overflow("payment"))?;
    if rate.is_zero() {
        return Ok(straight_line);
    }

    let (discounted_fv, discount) = match compound_factor(rate, nper) {
        Some(factor) if !factor.is_zero() => (
            future_value.checked_div(factor),
            Decimal::ONE.checked_div(factor),
        ),
        _ => (Some(Decimal::ZERO), Some(Decimal::ZERO)),
    };

    // A rate small enough to vanish at 28 digits behaves like zero.
    let annuity_denominator = discount
        .and_then(|d| Decimal::ONE.checked_sub(d))
        .ok_or_else(|| FinAnalysisError::overflow("discount factor"))?;
    if annuity_denominator.is_zero() {
        return Ok(straight_line);
    }

    discounted_fv
        .and_then(|dfv| present_value.checked_sub(dfv))
        .and_then(|v| v.checked_mul(rate))
        .and_then(|v| v.checked_div(annuity_denominator))
        .ok_or_else(|| FinAnalysisError::overflow("payment"))
}
