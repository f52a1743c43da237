use crate::application::timeline::BalancePoint;
use crate::domain::debt::Debt;
use crate::domain::plan::{CalculationResult, PayoffSummary};
use crate::error::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

/// Decimal places used for monetary columns.
const MONEY_DP: u32 = 2;

#[derive(Serialize)]
struct ScheduleRow<'a> {
    debt_id: &'a str,
    debt_name: &'a str,
    month: u32,
    year: i32,
    payment: Decimal,
    principal: Decimal,
    interest: Decimal,
    remaining_balance: Decimal,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    total_months: u32,
    payoff_date: &'a str,
    total_interest_paid: Decimal,
    total_principal_paid: Decimal,
    converged: bool,
}

/// Writes payoff plans as CSV tables.
///
/// Monetary values are rounded to cents for display.
pub struct PlanWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PlanWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// One row per payment, grouped by debt in input order.
    pub fn write_schedule(&mut self, result: &CalculationResult) -> Result<()> {
        let mut wrote_row = false;
        for plan in &result.schedule {
            for payment in &plan.payments {
                self.writer.serialize(ScheduleRow {
                    debt_id: &plan.debt_id,
                    debt_name: &plan.debt_name,
                    month: payment.month,
                    year: payment.year,
                    payment: money(payment.payment),
                    principal: money(payment.principal),
                    interest: money(payment.interest),
                    remaining_balance: money(payment.remaining_balance),
                })?;
                wrote_row = true;
            }
        }
        if !wrote_row {
            self.writer.write_record([
                "debt_id",
                "debt_name",
                "month",
                "year",
                "payment",
                "principal",
                "interest",
                "remaining_balance",
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_summary(&mut self, summary: &PayoffSummary) -> Result<()> {
        self.writer.serialize(SummaryRow {
            total_months: summary.total_months,
            payoff_date: &summary.payoff_date,
            total_interest_paid: money(summary.total_interest_paid),
            total_principal_paid: money(summary.total_principal_paid),
            converged: summary.converged,
        })?;
        self.writer.flush()?;
        Ok(())
    }

    /// One column per debt, headed by its name, plus the total.
    pub fn write_timeline(&mut self, debts: &[Debt], timeline: &[BalancePoint]) -> Result<()> {
        let mut header = vec!["month".to_string()];
        header.extend(debts.iter().map(|d| d.name.clone()));
        header.push("total_balance".to_string());
        self.writer.write_record(&header)?;

        for point in timeline {
            let mut record = vec![point.month.to_string()];
            record.extend(point.balances.iter().map(|b| money(b.balance).to_string()));
            record.push(money(point.total_balance).to_string());
            self.writer.write_record(&record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn money(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
