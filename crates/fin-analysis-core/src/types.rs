use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::stable_json::stable_hash;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Periods per year for monthly compounding.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Round to cents, half away from zero.
pub fn round_currency(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One period of an amortization schedule. Every amount is rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based period number
    pub month: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub payment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest: Money,
    /// Remaining balance after this period's payment, floored at zero
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Money,
}

/// Result shared by the loan and lease analyzers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_payment: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payments: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Money,
    pub schedule: Vec<ScheduleEntry>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    /// Fingerprint of the assumptions, stable across key order
    pub input_hash: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    let assumptions = serde_json::to_value(assumptions).unwrap_or_default();
    let input_hash = stable_hash(&assumptions);
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions,
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
            input_hash,
        },
    }
}
