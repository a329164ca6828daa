//! Period-by-period walk shared by the loan and lease analyzers.

use rust_decimal::Decimal;

use crate::error::FinAnalysisError;
use crate::types::{round_currency, Money, Rate, ScheduleEntry};
use crate::FinAnalysisResult;

/// Parameters of one schedule walk.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodWalk {
    pub opening_balance: Money,
    pub periodic_rate: Rate,
    /// Unrounded level payment
    pub payment: Money,
    pub periods: u32,
    /// Balance the final period must land on (zero for a loan, residual for a lease)
    pub terminal_balance: Money,
}

impl PeriodWalk {
    /// Apply interest then principal each period. The final period's
    /// principal is a plug so the balance ends exactly on the terminal value.
    /// Amounts are carried unrounded and rounded to cents only when recorded.
    pub fn run(&self) -> FinAnalysisResult<Vec<ScheduleEntry>> {
        let mut schedule = Vec::with_capacity(self.periods as usize);
        let mut balance = self.opening_balance;
        let recorded_payment = round_currency(self.payment);

        for month in 1..=self.periods {
            let interest = balance
                .checked_mul(self.periodic_rate)
                .ok_or_else(|| FinAnalysisError::overflow("period interest"))?;
            let principal = if month == self.periods {
                let plug = balance
                    .checked_sub(self.terminal_balance)
                    .ok_or_else(|| FinAnalysisError::overflow("final period"))?;
                balance = self.terminal_balance;
                plug
            } else {
                let principal = self
                    .payment
                    .checked_sub(interest)
                    .ok_or_else(|| FinAnalysisError::overflow("period principal"))?;
                balance = balance
                    .checked_sub(principal)
                    .ok_or_else(|| FinAnalysisError::overflow("running balance"))?;
                principal
            };

            schedule.push(ScheduleEntry {
                month,
                payment: recorded_payment,
                principal: round_currency(principal),
                interest: round_currency(interest),
                balance: round_currency(balance.max(Decimal::ZERO)),
            });
        }

        Ok(schedule)
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Money>, context: &str) -> FinAnalysisResult<Money> {
    amounts
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .map(round_currency)
        .ok_or_else(|| FinAnalysisError::overflow(context))
}

pub(crate) fn total_payments(schedule: &[ScheduleEntry]) -> FinAnalysisResult<Money> {
    checked_total(schedule.iter().map(|e| e.payment), "total payments")
}

pub(crate) fn total_interest(schedule: &[ScheduleEntry]) -> FinAnalysisResult<Money> {
    checked_total(schedule.iter().map(|e| e.interest), "total interest")
}
