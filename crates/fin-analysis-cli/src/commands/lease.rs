use clap::Args;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::time::Instant;

use fin_analysis_core::lease::{self, LeaseInput};
use fin_analysis_core::types::with_metadata;

use super::{insert_decimal, resolve_body};

/// Arguments for a lease schedule with residual value
#[derive(Args)]
pub struct LeaseArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount financed (capitalised cost of the asset)
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a fraction (0.05 = 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub annual_rate: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, allow_hyphen_values = true)]
    pub term_months: Option<Decimal>,

    /// Value retained at term end (defaults to 0)
    #[arg(long, allow_hyphen_values = true)]
    pub residual_value: Option<Decimal>,
}

pub fn run_lease(args: LeaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
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
        if let Some(residual) = args.residual_value {
            insert_decimal(&mut body, "residualValue", residual)?;
        }
        Ok(Value::Object(body))
    })?;

    let start = Instant::now();
    let result = lease::analyze_lease_value(&body)?;
    let elapsed = start.elapsed().as_micros() as u64;

    // The body already passed validation, so it deserializes.
    let terms: LeaseInput = serde_json::from_value(body.clone())?;
    let warnings = lease::lease_warnings(&terms);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(
        periods = result.schedule.len(),
        monthly_payment = %result.monthly_payment,
        "lease schedule built"
    );

    let output = with_metadata(
        "Annuity with future value, monthly compounding, final-period residual plug",
        &body,
        warnings,
        elapsed,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
