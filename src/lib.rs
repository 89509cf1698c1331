//! Library entrypoint for hedge-engine.
//!
//! Pure, synchronous stake calculations for two-outcome bets: odds
//! conversion, profit boosts, hedge sizing, total-stake allocation and
//! event-contract price conversion. Invalid input yields `None`, never a
//! panic.

pub mod config;
pub mod errors;
pub mod hedge;
pub mod odds;
