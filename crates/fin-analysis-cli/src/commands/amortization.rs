use clap::Args;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::time::Instant;

use fin_analysis_core::amortization;
use fin_analysis_core::types::with_metadata;

use super::{insert_decimal, resolve_body};

/// Arguments for a loan amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a fraction (0.06 = 6%)
    #[arg(long, allow_hyphen_values = true)]
    pub annual_rate: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, allow_hyphen_values = true)]
    pub term_months: Option<Decimal>,
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let body = resolve_body(args.input.as_deref(), || {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let annual_rate = args
            .annual_rate
            .ok_or("--annual-rate is required (or provide --input)")?;
        let term_months = args
            .term_months
            .ok_or("--term-months is required (or provide --input)")?;

        let mut body = Map::new();
        insert_decimal(&mut body, "principal", principal)?;
        insert_decimal(&mut body, "annualRate", annual_rate)?;
        insert_decimal(&mut body, "termMonths", term_months)?;
        Ok(Value::Object(body))
    })?;

    let start = Instant::now();
    let result = amortization::analyze_amortization_value(&body)?;
    let elapsed = start.elapsed().as_micros() as u64;

    tracing::info!(
        periods = result.schedule.len(),
        monthly_payment = %result.monthly_payment,
        "loan schedule built"
    );

    let output = with_metadata(
        "Level-payment annuity, monthly compounding, final-period principal plug",
        &body,
        Vec::new(),
        elapsed,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
