use fin_analysis_core::amortization::{analyze_amortization, AmortizationInput};
use fin_analysis_core::{AnalysisResult, FinAnalysisError, IssueCode};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Helpers
// ===========================================================================

fn loan(principal: Decimal, annual_rate: Decimal, term_months: u32) -> AmortizationInput {
    AmortizationInput {
        principal,
        annual_rate,
        term_months: Decimal::from(term_months),
    }
}

fn sample_loans() -> Vec<AmortizationInput> {
    vec![
        loan(dec!(10000), dec!(0.06), 24),
        loan(dec!(30000), dec!(0.04), 36),
        loan(dec!(200000), dec!(0.045), 360),
        loan(dec!(999.99), dec!(0.1999), 7),
        loan(dec!(1), dec!(0.01), 12),
        loan(dec!(1500), Decimal::ZERO, 7),
        loan(dec!(250000), Decimal::ONE, 48),
    ]
}

fn assert_schedule_invariants(input: &AmortizationInput, result: &AnalysisResult) {
    let n = input.term_months;
    assert_eq!(Decimal::from(result.schedule.len() as u64), n);

    for (i, entry) in result.schedule.iter().enumerate() {
        assert_eq!(entry.month as usize, i + 1, "months must be contiguous");
        assert!(entry.balance >= Decimal::ZERO);
        assert_eq!(entry.payment, result.monthly_payment);
    }

    // Every row, the final plug included, splits within a cent
    for entry in &result.schedule {
        let drift = (entry.payment - (entry.principal + entry.interest)).abs();
        assert!(drift <= dec!(0.01), "row {} drifts by {}", entry.month, drift);
    }
    assert_eq!(result.schedule.last().map(|e| e.balance), Some(Decimal::ZERO));

    let payments: Decimal = result.schedule.iter().map(|e| e.payment).sum();
    let interest: Decimal = result.schedule.iter().map(|e| e.interest).sum();
    assert_eq!(result.total_payments, payments);
    assert_eq!(result.total_interest, interest);
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_two_year_loan_scenario() {
    let input = loan(dec!(10000), dec!(0.06), 24);
    let result = analyze_amortization(&input).unwrap();

    assert_eq!(result.schedule.len(), 24);
    assert!(result.schedule[23].balance.abs() < dec!(0.01));
    assert_eq!(result.monthly_payment, dec!(443.21));
    assert_eq!(result.total_payments, dec!(10637.04));
}

#[test]
fn test_thirty_year_mortgage() {
    let input = loan(dec!(200000), dec!(0.045), 360);
    let result = analyze_amortization(&input).unwrap();

    assert_eq!(result.monthly_payment, dec!(1013.37));
    assert_eq!(result.total_payments, dec!(364813.20));
    assert_eq!(result.schedule[0].interest, dec!(750.00));
    assert_eq!(result.schedule[0].principal, dec!(263.37));
    assert_eq!(result.schedule[0].balance, dec!(199736.63));
    assert_eq!(result.schedule[359].balance, Decimal::ZERO);
}

#[test]
fn test_invariants_hold_across_sample_loans() {
    for input in sample_loans() {
        let result = analyze_amortization(&input).unwrap();
        assert_schedule_invariants(&input, &result);
    }
}

#[test]
fn test_balances_decrease_monotonically() {
    let result = analyze_amortization(&loan(dec!(30000), dec!(0.04), 36)).unwrap();
    for pair in result.schedule.windows(2) {
        assert!(pair[1].balance < pair[0].balance);
    }
}

#[test]
fn test_interest_share_declines_over_time() {
    let result = analyze_amortization(&loan(dec!(30000), dec!(0.04), 36)).unwrap();
    assert!(result.schedule[0].interest > result.schedule[35].interest);
    assert!(result.schedule[0].principal < result.schedule[34].principal);
}

#[test]
fn test_zero_rate_degeneracy() {
    let result = analyze_amortization(&loan(dec!(1000), Decimal::ZERO, 3)).unwrap();
    assert_eq!(result.monthly_payment, dec!(333.33));
    for entry in &result.schedule {
        assert_eq!(entry.interest, Decimal::ZERO);
        assert_eq!(entry.principal, entry.payment);
    }
    assert_eq!(result.schedule[0].balance, dec!(666.67));
    assert_eq!(result.schedule[2].balance, Decimal::ZERO);
    assert_eq!(result.total_payments, dec!(999.99));
}

#[test]
fn test_deterministic() {
    let input = loan(dec!(12345.67), dec!(0.0725), 60);
    assert_eq!(
        analyze_amortization(&input).unwrap(),
        analyze_amortization(&input).unwrap()
    );
}

// ===========================================================================
// Rejection
// ===========================================================================

fn rejection_code(input: AmortizationInput) -> IssueCode {
    match analyze_amortization(&input) {
        Err(FinAnalysisError::Validation { issues }) => issues[0].code,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_rejects_non_positive_principal() {
    assert_eq!(rejection_code(loan(Decimal::ZERO, dec!(0.05), 12)), IssueCode::TooSmall);
    assert_eq!(rejection_code(loan(dec!(-500), dec!(0.05), 12)), IssueCode::TooSmall);
}

#[test]
fn test_rejects_out_of_range_rate() {
    assert_eq!(rejection_code(loan(dec!(1000), dec!(-0.01), 12)), IssueCode::TooSmall);
    assert_eq!(rejection_code(loan(dec!(1000), dec!(1.5), 12)), IssueCode::TooBig);
    assert_eq!(rejection_code(loan(dec!(1000), dec!(5), 12)), IssueCode::TooBig);
}

#[test]
fn test_payment_beyond_decimal_range_is_an_error() {
    let input = loan(dec!(75000000000000000000000000000), Decimal::ONE, 1);
    assert!(matches!(
        analyze_amortization(&input),
        Err(FinAnalysisError::Overflow { .. })
    ));
}

#[test]
fn test_totals_beyond_decimal_range_are_errors() {
    let input = loan(dec!(1000000000000000000000000000), Decimal::ONE, 1200);
    assert!(matches!(
        analyze_amortization(&input),
        Err(FinAnalysisError::Overflow { .. })
    ));
}

#[test]
fn test_rejects_bad_terms() {
    assert_eq!(rejection_code(loan(dec!(1000), dec!(0.05), 0)), IssueCode::TooSmall);
    let mut negative = loan(dec!(1000), dec!(0.05), 1);
    negative.term_months = dec!(-12);
    assert_eq!(rejection_code(negative), IssueCode::TooSmall);
    let mut fractional = loan(dec!(1000), dec!(0.05), 1);
    fractional.term_months = dec!(12.5);
    assert_eq!(rejection_code(fractional), IssueCode::NotInteger);
}
