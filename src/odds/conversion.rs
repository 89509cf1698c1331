//! Odds conversion between American, decimal, and implied-probability form.
//!
//! American odds map to decimal odds as:
//!     +a  =>  decimal = 1 + a / 100
//!     -a  =>  decimal = 1 + 100 / a
//!
//! and back:
//!     decimal >= 2  =>  american = (decimal - 1) * 100
//!     decimal <  2  =>  american = -100 / (decimal - 1)
//!
//! American values strictly inside (-100, 100) are not real wagers and are
//! rejected. Both +100 and -100 land on decimal 2.0, which always converts
//! back to +100.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Lift a raw `f64` (e.g. from a form field or slider) into a `Decimal`.
///
/// Returns None for NaN and infinities.
pub fn finite_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Convert American odds to decimal odds.
///
/// Returns None for zero and the (-100, 100) dead zone.
pub fn american_to_decimal(american: Decimal) -> Option<Decimal> {
    if american.abs() < Decimal::ONE_HUNDRED {
        return None;
    }

    if american > Decimal::ZERO {
        Some(Decimal::ONE + american / Decimal::ONE_HUNDRED)
    } else {
        Some(Decimal::ONE + Decimal::ONE_HUNDRED / american.abs())
    }
}

/// Convert decimal odds to American odds.
///
/// Returns None for decimal <= 1 (a certain outcome has no American form)
/// or when the result does not fit in a `Decimal`.
pub fn decimal_to_american(decimal: Decimal) -> Option<Decimal> {
    if decimal <= Decimal::ONE {
        return None;
    }

    let profit = decimal - Decimal::ONE;
    if decimal >= Decimal::TWO {
        profit.checked_mul(Decimal::ONE_HUNDRED)
    } else {
        (-Decimal::ONE_HUNDRED).checked_div(profit)
    }
}

/// Implied probability of decimal odds: 1 / decimal.
pub fn decimal_to_implied_prob(decimal: Decimal) -> Option<Decimal> {
    if decimal <= Decimal::ZERO {
        return None;
    }
    Decimal::ONE.checked_div(decimal)
}

/// Decimal odds for a probability in (0, 1].
pub fn implied_prob_to_decimal(prob: Decimal) -> Option<Decimal> {
    if prob <= Decimal::ZERO || prob > Decimal::ONE {
        return None;
    }
    Some(Decimal::ONE / prob)
}

/// Parse American odds typed by a user: `+280`, `-280`, `280`, `1,200`.
pub fn parse_american(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    if unsigned.is_empty() {
        return None;
    }
    let american = Decimal::from_str(unsigned).ok()?;
    american_to_decimal(american)?;
    Some(american)
}

/// American odds rounded to the nearest integer with an explicit sign.
pub fn format_american(american: Decimal) -> String {
    let rounded = american.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded > Decimal::ZERO {
        format!("+{rounded}")
    } else {
        format!("{rounded}")
    }
}

/// Decimal odds to two places, e.g. `"5.20"`.
pub fn format_decimal_odds(decimal: Decimal) -> String {
    format!("{:.2}", decimal)
}

/// Probability in [0, 1] as a percentage string, e.g. `"41.7%"`.
pub fn format_probability(prob: Decimal) -> String {
    format!("{:.1}%", prob * Decimal::ONE_HUNDRED)
}

// =============================================================================
// Tests
// =============================================================================
