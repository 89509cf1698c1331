//! Stake calculation for two-outcome hedges and arbitrage splits.

pub mod allocation;
pub mod models;
pub mod optimizer;
