//! Total-stake allocation (bias / cap calling convention).
//!
//! Splits a total stake between two legs by a bias percentage:
//!     stake1 = total * bias / 100
//!     stake2 = total - stake1
//!
//! The optimizer at a fixed 100% ratio supplies the leg quotes, the
//! equal-profit split and whether the pair is an arbitrage. Its profit
//! ratios are scale-free, so the total stake is used as the anchor.
//!
//! Neither outcome loses when both payouts cover the total:
//!     stake1 * d1 >= total  =>  bias >= 100 / d1
//!     stake2 * d2 >= total  =>  bias <= 100 - 100 / d2
//! The band is non-empty iff 1/d1 + 1/d2 <= 1.

use rust_decimal::Decimal;
use tracing::debug;

use super::models::{
    AllocationMode, AllocationRequest, AllocationResult, HedgeRequest,
};
use super::optimizer::{mul, settle, sub, try_compute_hedge};
use crate::errors::CalcError;

/// Slack allowed on "neither outcome loses" ($0.01).
pub const NO_LOSS_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Compute an allocation. None on invalid input.
pub fn compute_allocation(request: &AllocationRequest) -> Option<AllocationResult> {
    match try_compute_allocation(request) {
        Ok(result) => Some(result),
        Err(e) => {
            debug!(kind = e.kind(), error = %e, "Allocation rejected");
            None
        }
    }
}

pub fn try_compute_allocation(request: &AllocationRequest) -> Result<AllocationResult, CalcError> {
    if request.total_stake <= Decimal::ZERO {
        return Err(CalcError::InvalidStake(request.total_stake));
    }

    let reference = try_compute_hedge(&HedgeRequest {
        odds1: request.odds1,
        stake1: request.total_stake,
        odds2: request.odds2,
        hedge_percent: Decimal::ONE_HUNDRED,
        boost1: request.boost1,
        boost2: request.boost2,
        rounding1: None,
        rounding2: None,
    })?;

    let d1 = reference.leg1.effective_decimal;
    let d2 = reference.leg2.effective_decimal;
    let has_arb = reference.settlement.has_arb;
    let optimal_bias_pct =
        reference.stake1 / reference.settlement.total_stake * Decimal::ONE_HUNDRED;
    let no_loss_bias_range = no_loss_band(d1, d2);

    let requested_bias_pct = clamp_bias_pct(request.bias_pct);
    let bias_pct = match (request.mode, no_loss_bias_range) {
        (AllocationMode::NoLoss, Some((lo, hi))) if has_arb => requested_bias_pct.max(lo).min(hi),
        _ => requested_bias_pct,
    };

    let stake1 = mul(request.total_stake, bias_pct / Decimal::ONE_HUNDRED, "allocation split")?;
    let stake2 = sub(request.total_stake, stake1, "allocation split")?;
    let (stake1, stake2, capped) =
        apply_caps(stake1, stake2, request.max_stake1, request.max_stake2);

    let settlement = settle(stake1, stake2, d1, d2)?;
    let can_no_loss = has_arb
        && settlement.net_if_leg1_wins >= -NO_LOSS_TOLERANCE
        && settlement.net_if_leg2_wins >= -NO_LOSS_TOLERANCE;
    let edge_pct = -settlement.arb_pct;

    debug!(
        mode = ?request.mode,
        requested_bias = %requested_bias_pct,
        bias = %bias_pct,
        stake1 = %stake1,
        stake2 = %stake2,
        capped,
        has_arb,
        can_no_loss,
        "Allocation computed"
    );

    Ok(AllocationResult {
        mode: request.mode,
        requested_bias_pct,
        bias_pct,
        optimal_bias_pct,
        no_loss_bias_range,
        leg1: reference.leg1,
        leg2: reference.leg2,
        stake1,
        stake2,
        capped,
        settlement,
        has_arb,
        can_no_loss,
        edge_pct,
    })
}

pub fn clamp_bias_pct(pct: Decimal) -> Decimal {
    pct.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED)
}

/// Bias range [lo, hi] where neither outcome loses, if any.
pub fn no_loss_band(d1: Decimal, d2: Decimal) -> Option<(Decimal, Decimal)> {
    if d1 <= Decimal::ONE || d2 <= Decimal::ONE {
        return None;
    }
    let lo = Decimal::ONE_HUNDRED / d1;
    let hi = Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / d2;
    if lo > hi {
        return None;
    }
    Some((lo, hi))
}

/// Scale both stakes down by the tightest cap ratio.
///
/// Caps <= 0 are ignored. Returns the (possibly capped) stakes and whether
/// any cap was binding.
pub fn apply_caps(
    stake1: Decimal,
    stake2: Decimal,
    max_stake1: Option<Decimal>,
    max_stake2: Option<Decimal>,
) -> (Decimal, Decimal, bool) {
    let cap1 = max_stake1.filter(|c| *c > Decimal::ZERO);
    let cap2 = max_stake2.filter(|c| *c > Decimal::ZERO);

    let ratio = |stake: Decimal, cap: Option<Decimal>| match cap {
        Some(cap) if stake > cap => Some(cap / stake),
        _ => None,
    };

    let (scale, leg1_binds) = match (ratio(stake1, cap1), ratio(stake2, cap2)) {
        (None, None) => return (stake1, stake2, false),
        (Some(r1), None) => (r1, true),
        (None, Some(r2)) => (r2, false),
        (Some(r1), Some(r2)) => (r1.min(r2), r1 <= r2),
    };

    // The binding leg lands exactly on its cap; the other never exceeds its own.
    let mut capped1 = stake1 * scale;
    let mut capped2 = stake2 * scale;
    if let Some(cap) = cap1 {
        capped1 = if leg1_binds { cap } else { capped1.min(cap) };
    }
    if let Some(cap) = cap2 {
        capped2 = if leg1_binds { capped2.min(cap) } else { cap };
    }

    (capped1, capped2, true)
}
