//! Domain types: debts, payoff strategies, calendar months and the plan
//! structures the engine produces.

pub mod calendar;
pub mod debt;
pub mod plan;
pub mod ports;
pub mod strategy;
