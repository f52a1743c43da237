use crate::domain::debt::Debt;
use crate::domain::plan::CalculationResult;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct DebtBalance {
    pub debt_id: String,
    pub balance: Decimal,
}

/// Outstanding balances after a given month of the plan.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct BalancePoint {
    /// 0 is the state before the first payment.
    pub month: u32,
    /// One entry per debt, in input order.
    pub balances: Vec<DebtBalance>,
    pub total_balance: Decimal,
}

/// Builds the month-by-month balance series used to chart a plan.
///
/// Plans are matched to debts by id. A debt with no payment left in a month
/// counts as zero.
pub fn balance_timeline(debts: &[Debt], result: &CalculationResult) -> Vec<BalancePoint> {
    (0..=result.summary.total_months)
        .map(|month| {
            let balances: Vec<DebtBalance> = debts
                .iter()
                .map(|debt| DebtBalance {
                    debt_id: debt.id.clone(),
                    balance: balance_after(debt, result, month),
                })
                .collect();
            let total_balance = balances
                .iter()
                .fold(Decimal::ZERO, |acc, b| acc.saturating_add(b.balance));
            BalancePoint {
                month,
                balances,
                total_balance,
            }
        })
        .collect()
}

fn balance_after(debt: &Debt, result: &CalculationResult, month: u32) -> Decimal {
    if month == 0 {
        return debt.balance;
    }
    result
        .plan_for(&debt.id)
        .and_then(|plan| plan.payments.get(month as usize - 1))
        .map(|payment| payment.remaining_balance)
        .unwrap_or(Decimal::ZERO)
}
