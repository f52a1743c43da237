use crate::error::{PayoffError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A debt as entered by the user.
///
/// The engine treats debts as read-only input. `id` is the join key for
/// everything the engine produces; `name` is only a display label and may
/// repeat.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Debt {
    pub id: String,
    pub name: String,
    /// Principal owed when the plan starts.
    pub balance: Decimal,
    /// Annual percentage rate, e.g. `22.9` for 22.9%.
    pub apr: Decimal,
    pub min_payment: Decimal,
}

impl Debt {
    /// Builds a debt after running the same field checks as [`Debt::validate`].
    ///
    /// The name is stored trimmed.
    pub fn new(
        id: impl Into<String>,
        name: &str,
        balance: Decimal,
        apr: Decimal,
        min_payment: Decimal,
    ) -> Result<Self> {
        let debt = Self {
            id: id.into(),
            name: name.trim().to_string(),
            balance,
            apr,
            min_payment,
        };
        debt.validate()?;
        Ok(debt)
    }

    /// Field-level checks, reported one at a time in form order.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("Debt name is required."));
        }
        if self.balance <= Decimal::ZERO {
            return Err(invalid("Balance must be a positive number."));
        }
        if self.apr < Decimal::ZERO {
            return Err(invalid("APR must be zero or a positive number."));
        }
        if self.min_payment <= Decimal::ZERO {
            return Err(invalid("Minimum payment must be a positive number."));
        }
        if self.min_payment > self.balance {
            return Err(invalid(
                "Minimum payment cannot be greater than the balance.",
            ));
        }
        Ok(())
    }

    /// Interest accrued over one month on `balance` at this debt's APR.
    ///
    /// `None` when the result does not fit in a `Decimal`.
    pub fn monthly_interest(&self, balance: Decimal) -> Option<Decimal> {
        balance
            .checked_mul(self.apr / Decimal::ONE_HUNDRED)?
            .checked_div(Decimal::from(12))
    }
}

/// Rejects an empty debt list before a calculation is requested.
pub fn ensure_not_empty(debts: &[Debt]) -> Result<()> {
    if debts.is_empty() {
        Err(invalid(
            "Please add at least one debt to calculate a payoff plan.",
        ))
    } else {
        Ok(())
    }
}

pub fn validate_extra_payment(extra_payment: Decimal) -> Result<()> {
    if extra_payment < Decimal::ZERO {
        Err(invalid("Extra payment cannot be negative."))
    } else {
        Ok(())
    }
}

fn invalid(message: &str) -> PayoffError {
    PayoffError::ValidationError(message.to_string())
}
