use crate::domain::calendar::YearMonth;
use crate::domain::debt::{self, Debt};
use crate::domain::plan::{CalculationResult, DebtPayoffPlan, NO_PAYOFF_DATE, Payment, PayoffSummary};
use crate::domain::ports::ClockBox;
use crate::domain::strategy::Strategy;
use crate::error::Result;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Hard stop for the simulation: 100 years of monthly payments.
pub const MAX_MONTHS: u32 = 1200;

/// Computes debt payoff plans.
///
/// The engine itself is stateless between calls. It only owns the clock that
/// anchors payment dates, so repeated calls with the same input and the same
/// clock produce identical results.
pub struct PayoffEngine {
    clock: ClockBox,
}

impl PayoffEngine {
    pub fn new(clock: ClockBox) -> Self {
        Self { clock }
    }

    /// The month payments are counted from. Month 1 of a plan is the month
    /// after this one.
    pub fn start_month(&self) -> YearMonth {
        YearMonth::from_date(self.clock.today())
    }

    /// Runs the simulation without checking the input.
    ///
    /// Callers are expected to have validated every debt; see [`PayoffEngine::plan`].
    pub fn calculate_payoff(
        &self,
        debts: &[Debt],
        extra_payment: Decimal,
        strategy: Strategy,
    ) -> CalculationResult {
        compute_payoff_plan(debts, extra_payment, strategy, self.start_month())
    }

    /// Validates the input the way the calculator form does, then runs the
    /// simulation.
    pub fn plan(
        &self,
        debts: &[Debt],
        extra_payment: Decimal,
        strategy: Strategy,
    ) -> Result<CalculationResult> {
        debt::ensure_not_empty(debts)?;
        for debt in debts {
            debt.validate()?;
        }
        debt::validate_extra_payment(extra_payment)?;
        Ok(self.calculate_payoff(debts, extra_payment, strategy))
    }
}

/// Working copy of a debt during one simulation run.
struct DebtState<'a> {
    debt: &'a Debt,
    balance: Decimal,
}

impl DebtState<'_> {
    fn is_active(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

/// Everything one simulated month changes, computed before any of it is
/// applied.
struct MonthStep {
    payments: Vec<(usize, Payment)>,
    interest: Decimal,
    snowball_bonus: Decimal,
}

/// Simulates month-by-month repayment of `debts`.
///
/// Each month every active debt gets its minimum payment and the first active
/// debt in `strategy` order also gets the rest of the pool: the extra payment
/// plus the minimums of debts that are already paid off. Payments are dated
/// from the month after `start`.
///
/// Stops once every balance is zero, after [`MAX_MONTHS`] months, or at the
/// first month whose amounts no longer fit in a `Decimal`. In the last two
/// cases the partial plan is returned with `converged == false`.
pub fn compute_payoff_plan(
    debts: &[Debt],
    extra_payment: Decimal,
    strategy: Strategy,
    start: YearMonth,
) -> CalculationResult {
    if debts.is_empty() {
        return CalculationResult::empty();
    }

    let order = strategy.priority_order(debts);
    let mut states: Vec<DebtState> = debts
        .iter()
        .map(|debt| DebtState {
            debt,
            balance: debt.balance,
        })
        .collect();
    let mut schedule: Vec<DebtPayoffPlan> = debts
        .iter()
        .map(|debt| DebtPayoffPlan::new(debt.id.as_str(), debt.name.as_str()))
        .collect();

    let mut snowball_bonus = Decimal::ZERO;
    let mut total_interest_paid = Decimal::ZERO;
    let mut month = 0;
    let mut overflowed = false;

    while states.iter().any(DebtState::is_active) && month < MAX_MONTHS {
        let period = start.plus_months(month + 1);
        let step = simulate_month(&states, &order, extra_payment, snowball_bonus, period);
        let Some((step, total)) = step.and_then(|step| {
            let total = total_interest_paid.checked_add(step.interest)?;
            Some((step, total))
        }) else {
            overflowed = true;
            break;
        };

        month += 1;
        total_interest_paid = total;
        for (i, payment) in step.payments {
            states[i].balance = payment.remaining_balance;
            if !states[i].is_active() {
                debug!(
                    debt_id = %debts[i].id,
                    month,
                    snowball_bonus = %step.snowball_bonus,
                    "debt paid off"
                );
            }
            // Each debt's interest is part of the checked grand total.
            if schedule[i].record(payment).is_none() {
                overflowed = true;
            }
        }
        snowball_bonus = step.snowball_bonus;
        if overflowed {
            break;
        }
    }

    let converged = !states.iter().any(DebtState::is_active);
    if overflowed {
        warn!(
            month,
            "payoff balance exceeds the decimal range; schedule is truncated"
        );
    } else if !converged {
        warn!(
            max_months = MAX_MONTHS,
            "payoff simulation hit the month cap; schedule is truncated"
        );
    }

    for plan in &mut schedule {
        plan.finalize();
    }

    let payoff_date = if month == 0 {
        NO_PAYOFF_DATE.to_string()
    } else {
        start.plus_months(month).to_string()
    };
    let total_principal_paid = debts
        .iter()
        .fold(Decimal::ZERO, |acc, d| acc.saturating_add(d.balance));

    info!(?strategy, total_months = month, converged, "payoff plan computed");

    CalculationResult {
        schedule,
        summary: PayoffSummary {
            total_months: month,
            payoff_date,
            total_interest_paid,
            total_principal_paid,
            converged,
        },
    }
}

/// Computes one month of payments without touching the running state.
///
/// `None` if any amount of the month leaves the `Decimal` range.
fn simulate_month(
    states: &[DebtState],
    order: &[usize],
    extra_payment: Decimal,
    snowball_bonus: Decimal,
    period: YearMonth,
) -> Option<MonthStep> {
    let active: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| states[i].is_active())
        .collect();

    let mut pool = active
        .iter()
        .try_fold(Decimal::ZERO, |acc, &i| acc.checked_add(states[i].debt.min_payment))?
        .checked_add(extra_payment)?
        .checked_add(snowball_bonus)?;

    let mut allocations = vec![Decimal::ZERO; states.len()];
    for &i in &active {
        allocations[i] = states[i].debt.min_payment;
        pool -= states[i].debt.min_payment;
    }
    if let Some(&target) = active.first() {
        allocations[target] += pool;
    }

    let mut step = MonthStep {
        payments: Vec::with_capacity(active.len()),
        interest: Decimal::ZERO,
        snowball_bonus,
    };
    for &i in &active {
        let state = &states[i];
        let interest = state.debt.monthly_interest(state.balance)?;
        let payment = allocations[i].min(state.balance.checked_add(interest)?);
        let principal = payment.checked_sub(interest)?;

        let mut remaining = state.balance.checked_sub(principal)?;
        if remaining <= Decimal::ZERO {
            remaining = Decimal::ZERO;
            // Freed minimums roll into the pool from next month on.
            step.snowball_bonus = step.snowball_bonus.checked_add(state.debt.min_payment)?;
        }

        step.interest = step.interest.checked_add(interest)?;
        step.payments.push((
            i,
            Payment {
                month: period.month,
                year: period.year,
                payment,
                principal,
                interest,
                remaining_balance: remaining,
            },
        ));
    }
    Some(step)
}
