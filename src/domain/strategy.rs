use super::debt::Debt;
use serde::{Deserialize, Serialize};

/// Which debt receives the surplus of the monthly payment pool.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Lowest balance first.
    Snowball,
    /// Highest APR first.
    #[default]
    Avalanche,
}

impl Strategy {
    /// Returns indices into `debts` in payoff priority order.
    ///
    /// The sort is stable, so ties keep their input order. The order is
    /// computed from the starting balances and is never revisited.
    pub fn priority_order(self, debts: &[Debt]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..debts.len()).collect();
        match self {
            Strategy::Snowball => order.sort_by(|&a, &b| debts[a].balance.cmp(&debts[b].balance)),
            Strategy::Avalanche => order.sort_by(|&a, &b| debts[b].apr.cmp(&debts[a].apr)),
        }
        order
    }
}
