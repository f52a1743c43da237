//! Application layer: the payoff engine and the views derived from its
//! results.
//!
//! `PayoffEngine` is the entry point. It is synchronous and keeps no state
//! between calls apart from the clock used to date payments.

pub mod engine;
pub mod timeline;
