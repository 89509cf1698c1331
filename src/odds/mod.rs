//! Odds representations, profit boosts and contract-price conversion.

pub mod boost;
pub mod conversion;
pub mod price;
