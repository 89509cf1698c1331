//! Calculation error types.
//!
//! Every variant is an expected validation outcome. The public `compute_*`
//! entry points collapse these into `None`; the `try_*` variants keep the
//! reason for callers that want to show a hint.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Invalid American odds: {0} (must be outside -100..100 and non-zero)")]
    InvalidOdds(Decimal),

    #[error("Degenerate decimal odds: {0} (must be > 1)")]
    DegenerateOdds(Decimal),

    #[error("Invalid stake: {0} (must be > 0)")]
    InvalidStake(Decimal),

    #[error("Invalid contract price: price {price} + fee {fee}")]
    InvalidContractPrice { price: Decimal, fee: Decimal },

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

impl CalcError {
    /// Short machine-readable tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOdds(_) => "invalid_odds",
            Self::DegenerateOdds(_) => "degenerate_odds",
            Self::InvalidStake(_) => "invalid_stake",
            Self::InvalidContractPrice { .. } => "invalid_contract_price",
            Self::Overflow(_) => "overflow",
        }
    }
}
