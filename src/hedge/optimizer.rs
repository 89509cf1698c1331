//! Hedge optimizer: fixed anchor bet plus an offsetting hedge bet.
//!
//! With effective decimal odds d1 (anchor) and d2 (hedge), profit is equal
//! under both outcomes when:
//!     stake1 * (d1 - 1) - stake2 = stake2 * (d2 - 1) - stake1
//!  => stake1 * d1 = stake2 * d2
//!  => stake2* = stake1 * d1 / d2
//!
//! The hedge ratio scales stake2* linearly:
//!     0%   => no hedge
//!     100% => same profit whichever leg wins
//!     200% => double hedge (directional on leg 2)
//!
//! Everything is closed form. Profits are net of stakes, not payouts.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::models::{HedgeRequest, HedgeResult, LegQuote, Settlement};
use crate::errors::CalcError;

/// Upper bound of the hedge ratio slider (200%).
pub const MAX_HEDGE_PCT: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Compute stakes and scenario P&L for a hedge. None on invalid input.
pub fn compute_hedge(request: &HedgeRequest) -> Option<HedgeResult> {
    match try_compute_hedge(request) {
        Ok(result) => Some(result),
        Err(e) => {
            debug!(kind = e.kind(), error = %e, "Hedge calculation rejected");
            None
        }
    }
}

pub fn try_compute_hedge(request: &HedgeRequest) -> Result<HedgeResult, CalcError> {
    let leg1 = LegQuote::from_american(request.odds1, &request.boost1)?;
    let leg2 = LegQuote::from_american(request.odds2, &request.boost2)?;

    if request.stake1 <= Decimal::ZERO {
        return Err(CalcError::InvalidStake(request.stake1));
    }

    let d1 = leg1.effective_decimal;
    let d2 = leg2.effective_decimal;
    let hedge_percent = clamp_hedge_pct(request.hedge_percent);

    // The hedge covers the anchor as placed, so round it first.
    let stake1 = round_stake(request.stake1, request.rounding1)?;
    if stake1 <= Decimal::ZERO {
        return Err(CalcError::InvalidStake(stake1));
    }

    let optimal_stake2 = optimal_hedge_stake(stake1, d1, d2)?;
    let breakeven_stake2 = breakeven_hedge_stake(stake1, d1)?;
    let raw_stake2 = mul(optimal_stake2, hedge_percent / Decimal::ONE_HUNDRED, "hedge stake")?;
    let stake2 = round_stake(raw_stake2, request.rounding2)?;

    let settlement = settle(stake1, stake2, d1, d2)?;

    debug!(
        d1 = %d1,
        d2 = %d2,
        hedge_percent = %hedge_percent,
        stake1 = %stake1,
        stake2 = %stake2,
        guaranteed = %settlement.guaranteed_profit,
        "Hedge computed"
    );

    Ok(HedgeResult {
        leg1,
        leg2,
        hedge_percent,
        stake1,
        stake2,
        optimal_stake2,
        breakeven_stake2,
        settlement,
    })
}

/// Hedge stake that equalizes profit: stake1 * d1 / d2.
pub fn optimal_hedge_stake(stake1: Decimal, d1: Decimal, d2: Decimal) -> Result<Decimal, CalcError> {
    if d2 <= Decimal::ONE {
        return Err(CalcError::DegenerateOdds(d2));
    }
    div(mul(stake1, d1, "optimal hedge stake")?, d2, "optimal hedge stake")
}

/// Hedge stake that makes "leg 1 wins" break even: stake1 * (d1 - 1).
pub fn breakeven_hedge_stake(stake1: Decimal, d1: Decimal) -> Result<Decimal, CalcError> {
    mul(stake1, d1 - Decimal::ONE, "breakeven hedge stake")
}

pub fn clamp_hedge_pct(pct: Decimal) -> Decimal {
    pct.max(Decimal::ZERO).min(MAX_HEDGE_PCT)
}

/// Round a stake to the nearest multiple of `granularity`.
///
/// Missing or non-positive granularity leaves the stake untouched.
pub fn round_stake(stake: Decimal, granularity: Option<Decimal>) -> Result<Decimal, CalcError> {
    match granularity {
        Some(g) if g > Decimal::ZERO => {
            let steps = div(stake, g, "stake rounding")?
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            mul(steps, g, "stake rounding")
        }
        _ => Ok(stake),
    }
}

/// Net P&L of a stake pair under each outcome.
pub fn settle(
    stake1: Decimal,
    stake2: Decimal,
    d1: Decimal,
    d2: Decimal,
) -> Result<Settlement, CalcError> {
    let net_if_leg1_wins = sub(mul(stake1, d1 - Decimal::ONE, "settlement")?, stake2, "settlement")?;
    let net_if_leg2_wins = sub(mul(stake2, d2 - Decimal::ONE, "settlement")?, stake1, "settlement")?;

    let guaranteed_profit = net_if_leg1_wins.min(net_if_leg2_wins);
    let best_profit = net_if_leg1_wins.max(net_if_leg2_wins);
    let total_stake = stake1
        .checked_add(stake2)
        .ok_or(CalcError::Overflow("total stake"))?;

    let arb_pct = if total_stake > Decimal::ZERO {
        mul(div(guaranteed_profit, total_stake, "arb pct")?, Decimal::ONE_HUNDRED, "arb pct")?
    } else {
        Decimal::ZERO
    };

    Ok(Settlement {
        net_if_leg1_wins,
        net_if_leg2_wins,
        guaranteed_profit,
        best_profit,
        total_stake,
        arb_pct,
        has_arb: guaranteed_profit > Decimal::ZERO,
    })
}

// Checked arithmetic: `Decimal` operators panic on overflow.

pub(crate) fn mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    a.checked_mul(b).ok_or(CalcError::Overflow(what))
}

pub(crate) fn div(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    a.checked_div(b).ok_or(CalcError::Overflow(what))
}

pub(crate) fn sub(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    a.checked_sub(b).ok_or(CalcError::Overflow(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_stake() {
        assert_eq!(round_stake(dec!(38.3157), Some(dec!(1))), Ok(dec!(38)));
        assert_eq!(round_stake(dec!(38.5), Some(dec!(1))), Ok(dec!(39)));
        assert_eq!(round_stake(dec!(38.3157), Some(dec!(0.05))), Ok(dec!(38.30)));
        assert_eq!(round_stake(dec!(38.3157), Some(dec!(5))), Ok(dec!(40)));
        assert_eq!(round_stake(dec!(38.3157), None), Ok(dec!(38.3157)));
        assert_eq!(round_stake(dec!(38.3157), Some(Decimal::ZERO)), Ok(dec!(38.3157)));
    }

    #[test]
    fn test_clamp_hedge_pct() {
        assert_eq!(clamp_hedge_pct(dec!(-10)), Decimal::ZERO);
        assert_eq!(clamp_hedge_pct(dec!(150)), dec!(150));
        assert_eq!(clamp_hedge_pct(dec!(250)), dec!(200));
    }

    #[test]
    fn test_settle_even_money() {
        // $50 each side at 2.10 / 2.10:
        //   leg1 wins: 50 * 1.10 - 50 = 5
        //   leg2 wins: 50 * 1.10 - 50 = 5
        let s = settle(dec!(50), dec!(50), dec!(2.10), dec!(2.10)).unwrap();
        assert_eq!(s.net_if_leg1_wins, dec!(5));
        assert_eq!(s.net_if_leg2_wins, dec!(5));
        assert_eq!(s.total_stake, dec!(100));
        assert_eq!(s.arb_pct, dec!(5));
        assert!(s.has_arb);
    }

    #[test]
    fn test_settle_zero_total() {
        let s = settle(Decimal::ZERO, Decimal::ZERO, dec!(2), dec!(2)).unwrap();
        assert_eq!(s.arb_pct, Decimal::ZERO);
        assert!(!s.has_arb);
    }

    #[test]
    fn test_overflow_is_an_error_not_a_panic() {
        // MAX * 1.10 cannot be represented.
        assert_eq!(
            settle(Decimal::MAX, Decimal::ONE, dec!(2.10), dec!(2.10)),
            Err(CalcError::Overflow("settlement"))
        );
        assert!(optimal_hedge_stake(Decimal::MAX, dec!(5), dec!(1.5)).is_err());
        assert!(round_stake(Decimal::MAX, Some(dec!(0.01))).is_err());
    }
}
