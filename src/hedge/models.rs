//! Request and result types for the hedge optimizer and allocation wrapper.
//!
//! Requests deserialize from the calculator form payload; results serialize
//! straight back to it. Decimals travel as strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::odds::boost::{apply_boost, BoostSetting};
use crate::odds::conversion::{american_to_decimal, decimal_to_american, decimal_to_implied_prob};

// =============================================================================
// Legs
// =============================================================================

/// One leg's odds in every representation, before and after its boost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegQuote {
    pub american: Decimal,
    pub decimal: Decimal,
    pub implied_prob: Decimal,
    /// Boost percentage applied (0 when the boost is off).
    pub boost_pct: Decimal,
    pub effective_decimal: Decimal,
    pub effective_american: Decimal,
    pub effective_implied_prob: Decimal,
}

impl LegQuote {
    /// Quote a leg from American odds and its boost toggle.
    pub fn from_american(american: Decimal, boost: &BoostSetting) -> Result<Self, CalcError> {
        let decimal = american_to_decimal(american).ok_or(CalcError::InvalidOdds(american))?;
        let implied_prob =
            decimal_to_implied_prob(decimal).ok_or(CalcError::DegenerateOdds(decimal))?;

        let boost_pct = boost.effective_pct();
        let effective_decimal =
            apply_boost(decimal, boost_pct).ok_or(CalcError::Overflow("boosted odds"))?;
        let effective_american = decimal_to_american(effective_decimal)
            .ok_or(CalcError::Overflow("effective American odds"))?;
        let effective_implied_prob = decimal_to_implied_prob(effective_decimal)
            .ok_or(CalcError::DegenerateOdds(effective_decimal))?;

        Ok(Self {
            american,
            decimal,
            implied_prob,
            boost_pct,
            effective_decimal,
            effective_american,
            effective_implied_prob,
        })
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// Net profit/loss of a stake pair under each outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub net_if_leg1_wins: Decimal,
    pub net_if_leg2_wins: Decimal,
    /// Worst case across both outcomes.
    pub guaranteed_profit: Decimal,
    pub best_profit: Decimal,
    pub total_stake: Decimal,
    /// guaranteed_profit / total_stake * 100. Positive means an arbitrage.
    pub arb_pct: Decimal,
    pub has_arb: bool,
}

// =============================================================================
// Hedge optimizer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeRequest {
    /// Anchor leg, American odds.
    pub odds1: Decimal,
    /// Anchor stake.
    pub stake1: Decimal,
    /// Hedge leg, American odds.
    pub odds2: Decimal,
    /// Percentage of the equal-profit hedge to place, clamped to [0, 200].
    pub hedge_percent: Decimal,
    #[serde(default)]
    pub boost1: BoostSetting,
    #[serde(default)]
    pub boost2: BoostSetting,
    /// Stake granularity per leg (e.g. 1 for whole dollars).
    #[serde(default)]
    pub rounding1: Option<Decimal>,
    #[serde(default)]
    pub rounding2: Option<Decimal>,
}

impl HedgeRequest {
    /// Full (100%) hedge, no boosts, no rounding.
    pub fn new(odds1: Decimal, stake1: Decimal, odds2: Decimal) -> Self {
        Self {
            odds1,
            stake1,
            odds2,
            hedge_percent: Decimal::ONE_HUNDRED,
            boost1: BoostSetting::disabled(),
            boost2: BoostSetting::disabled(),
            rounding1: None,
            rounding2: None,
        }
    }

    pub fn with_hedge_percent(mut self, hedge_percent: Decimal) -> Self {
        self.hedge_percent = hedge_percent;
        self
    }

    pub fn with_boosts(mut self, boost1: BoostSetting, boost2: BoostSetting) -> Self {
        self.boost1 = boost1;
        self.boost2 = boost2;
        self
    }

    pub fn with_rounding(mut self, rounding1: Option<Decimal>, rounding2: Option<Decimal>) -> Self {
        self.rounding1 = rounding1;
        self.rounding2 = rounding2;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HedgeResult {
    pub leg1: LegQuote,
    pub leg2: LegQuote,
    /// Ratio actually used, after clamping.
    pub hedge_percent: Decimal,
    pub stake1: Decimal,
    pub stake2: Decimal,
    /// Hedge stake that equalizes profit across outcomes.
    pub optimal_stake2: Decimal,
    /// Hedge stake that makes "leg 1 wins" exactly zero profit.
    pub breakeven_stake2: Decimal,
    pub settlement: Settlement,
}

// =============================================================================
// Allocation wrapper
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Split exactly as the bias says and report whether it is an arb.
    #[default]
    Arbitrage,
    /// Move the bias into the range where neither outcome loses money.
    NoLoss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub odds1: Decimal,
    pub odds2: Decimal,
    pub total_stake: Decimal,
    /// Share of the total placed on leg 1, clamped to [0, 100].
    pub bias_pct: Decimal,
    #[serde(default)]
    pub boost1: BoostSetting,
    #[serde(default)]
    pub boost2: BoostSetting,
    #[serde(default)]
    pub max_stake1: Option<Decimal>,
    #[serde(default)]
    pub max_stake2: Option<Decimal>,
    #[serde(default)]
    pub mode: AllocationMode,
}

impl AllocationRequest {
    /// Plain arbitrage split, no boosts, no caps.
    pub fn new(odds1: Decimal, odds2: Decimal, total_stake: Decimal, bias_pct: Decimal) -> Self {
        Self {
            odds1,
            odds2,
            total_stake,
            bias_pct,
            boost1: BoostSetting::disabled(),
            boost2: BoostSetting::disabled(),
            max_stake1: None,
            max_stake2: None,
            mode: AllocationMode::Arbitrage,
        }
    }

    pub fn with_mode(mut self, mode: AllocationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_boosts(mut self, boost1: BoostSetting, boost2: BoostSetting) -> Self {
        self.boost1 = boost1;
        self.boost2 = boost2;
        self
    }

    pub fn with_caps(mut self, max_stake1: Option<Decimal>, max_stake2: Option<Decimal>) -> Self {
        self.max_stake1 = max_stake1;
        self.max_stake2 = max_stake2;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub mode: AllocationMode,
    /// Bias as requested, after clamping to [0, 100].
    pub requested_bias_pct: Decimal,
    /// Bias actually used (differs from the request only in no-loss mode).
    pub bias_pct: Decimal,
    /// Bias that puts equal profit on both outcomes.
    pub optimal_bias_pct: Decimal,
    /// Bias range in which neither outcome loses, when one exists.
    pub no_loss_bias_range: Option<(Decimal, Decimal)>,
    pub leg1: LegQuote,
    pub leg2: LegQuote,
    pub stake1: Decimal,
    pub stake2: Decimal,
    /// True when a max-stake cap scaled the stakes down.
    pub capped: bool,
    pub settlement: Settlement,
    /// The odds pair admits a guaranteed profit at the equal-profit split.
    pub has_arb: bool,
    pub can_no_loss: bool,
    /// House-edge framing of `arb_pct` (its negation), display only.
    pub edge_pct: Decimal,
}
