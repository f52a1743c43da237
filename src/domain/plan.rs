use super::calendar::YearMonth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label used for the summary payoff date when nothing was scheduled.
pub const NO_PAYOFF_DATE: &str = "N/A";

/// One month's payment against one debt.
///
/// `payment == principal + interest` and `remaining_balance` never drops
/// below zero.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub month: u32,
    pub year: i32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub remaining_balance: Decimal,
}

impl Payment {
    pub fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// The amortization schedule of a single debt.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct DebtPayoffPlan {
    pub debt_id: String,
    pub debt_name: String,
    pub payments: Vec<Payment>,
    pub total_interest_paid: Decimal,
    /// Label of the month of the final payment, e.g. `March 2027`.
    pub payoff_date: Option<String>,
}

impl DebtPayoffPlan {
    pub fn new(debt_id: impl Into<String>, debt_name: impl Into<String>) -> Self {
        Self {
            debt_id: debt_id.into(),
            debt_name: debt_name.into(),
            payments: Vec::new(),
            total_interest_paid: Decimal::ZERO,
            payoff_date: None,
        }
    }

    /// Appends a payment and accumulates its interest.
    ///
    /// Returns `None`, leaving the plan untouched, if the interest total
    /// would leave the `Decimal` range.
    pub fn record(&mut self, payment: Payment) -> Option<()> {
        self.total_interest_paid = self.total_interest_paid.checked_add(payment.interest)?;
        self.payments.push(payment);
        Some(())
    }

    /// Stamps `payoff_date` from the last recorded payment.
    pub fn finalize(&mut self) {
        self.payoff_date = self.payments.last().map(|p| p.period().to_string());
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PayoffSummary {
    pub total_months: u32,
    pub payoff_date: String,
    pub total_interest_paid: Decimal,
    /// Sum of the original balances, independent of the simulation outcome.
    pub total_principal_paid: Decimal,
    /// False when the simulation stopped with balance left, either at the
    /// month cap or because a balance outgrew the `Decimal` range.
    pub converged: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CalculationResult {
    pub schedule: Vec<DebtPayoffPlan>,
    pub summary: PayoffSummary,
}

impl CalculationResult {
    /// The result for an empty debt list.
    pub fn empty() -> Self {
        Self {
            schedule: Vec::new(),
            summary: PayoffSummary {
                total_months: 0,
                payoff_date: NO_PAYOFF_DATE.to_string(),
                total_interest_paid: Decimal::ZERO,
                total_principal_paid: Decimal::ZERO,
                converged: true,
            },
        }
    }

    pub fn plan_for(&self, debt_id: &str) -> Option<&DebtPayoffPlan> {
        self.schedule.iter().find(|plan| plan.debt_id == debt_id)
    }
}
