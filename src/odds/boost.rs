//! Profit boosts.
//!
//! A boost multiplies only the profit portion of the payout:
//!     boosted = 1 + (decimal - 1) * (1 + boost_pct / 100)
//!
//! Boost percentages are capped at `MAX_BOOST_PCT` on every path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest boost percentage honoured (500%).
pub const MAX_BOOST_PCT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Per-leg boost toggle as entered in the calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostSetting {
    pub enabled: bool,
    pub pct: Decimal,
}

impl BoostSetting {
    pub fn new(pct: Decimal) -> Self {
        Self { enabled: true, pct }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Boost percentage actually applied: 0 when off, else clamped.
    pub fn effective_pct(&self) -> Decimal {
        if self.enabled {
            clamp_boost_pct(self.pct)
        } else {
            Decimal::ZERO
        }
    }
}

/// Clamp a boost percentage to [0, MAX_BOOST_PCT].
pub fn clamp_boost_pct(pct: Decimal) -> Decimal {
    pct.max(Decimal::ZERO).min(MAX_BOOST_PCT)
}

/// Apply a profit boost to decimal odds. None if the boosted odds overflow.
pub fn apply_boost(decimal: Decimal, boost_pct: Decimal) -> Option<Decimal> {
    let pct = clamp_boost_pct(boost_pct);
    if pct.is_zero() || decimal <= Decimal::ONE {
        return Some(decimal);
    }
    (decimal - Decimal::ONE)
        .checked_mul(Decimal::ONE + pct / Decimal::ONE_HUNDRED)?
        .checked_add(Decimal::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_boost_scales_profit_only() {
        // 3.80 with 50% boost: 1 + 2.80 * 1.5 = 5.20
        assert_eq!(apply_boost(dec!(3.80), dec!(50)), Some(dec!(5.20)));
        // 2.00 with 25% boost: 1 + 1.00 * 1.25 = 2.25
        assert_eq!(apply_boost(dec!(2), dec!(25)), Some(dec!(2.25)));
    }

    #[test]
    fn test_zero_or_negative_boost_is_identity() {
        assert_eq!(apply_boost(dec!(3.80), Decimal::ZERO), Some(dec!(3.80)));
        assert_eq!(apply_boost(dec!(1.25), dec!(-40)), Some(dec!(1.25)));
    }

    #[test]
    fn test_boost_capped_at_500() {
        // 2.00 at 500%: 1 + 1.00 * 6 = 7.00. Anything above caps to the same.
        assert_eq!(apply_boost(dec!(2), dec!(500)), Some(dec!(7)));
        assert_eq!(apply_boost(dec!(2), dec!(900)), Some(dec!(7)));
    }

    #[test]
    fn test_setting_effective_pct() {
        assert_eq!(BoostSetting::disabled().effective_pct(), Decimal::ZERO);
        assert_eq!(
            BoostSetting { enabled: false, pct: dec!(50) }.effective_pct(),
            Decimal::ZERO
        );
        assert_eq!(BoostSetting::new(dec!(50)).effective_pct(), dec!(50));
        assert_eq!(BoostSetting::new(dec!(750)).effective_pct(), dec!(500));
    }

    #[test]
    fn test_boost_overflow_is_none() {
        // (MAX - 1) * 1.5 does not fit.
        assert_eq!(apply_boost(Decimal::MAX, dec!(50)), None);
        assert_eq!(apply_boost(Decimal::MAX, Decimal::ZERO), Some(Decimal::MAX));
    }
}
