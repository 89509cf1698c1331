//! Event-contract price to odds conversion.
//!
//! A binary contract priced at P pays $1 if the outcome occurs. With a
//! per-contract fee F the effective cost is P + F, so:
//!     implied probability = P + F
//!     decimal odds        = 1 / (P + F)
//!
//! P + F >= 1 means the contract cannot profit and has no odds.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use super::conversion::{decimal_to_american, implied_prob_to_decimal};
use crate::errors::CalcError;

/// Odds implied by a contract price plus fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceConversion {
    pub price: Decimal,
    pub fee: Decimal,
    /// price + fee
    pub effective_price: Decimal,
    /// Same number as `effective_price`, named for display.
    pub implied_prob: Decimal,
    pub decimal: Decimal,
    /// Rounded to the nearest integer.
    pub american: Decimal,
}

/// Convert a contract price and fee into odds. None on invalid input.
pub fn convert_price(price: Decimal, fee: Decimal) -> Option<PriceConversion> {
    match try_convert_price(price, fee) {
        Ok(conversion) => Some(conversion),
        Err(e) => {
            debug!(kind = e.kind(), error = %e, "Price conversion rejected");
            None
        }
    }
}

pub fn try_convert_price(price: Decimal, fee: Decimal) -> Result<PriceConversion, CalcError> {
    let invalid = || CalcError::InvalidContractPrice { price, fee };

    if price <= Decimal::ZERO || price >= Decimal::ONE || fee < Decimal::ZERO {
        return Err(invalid());
    }

    let effective_price = price.checked_add(fee).ok_or_else(invalid)?;
    if effective_price >= Decimal::ONE {
        return Err(invalid());
    }

    let decimal = implied_prob_to_decimal(effective_price).ok_or_else(invalid)?;
    let american = decimal_to_american(decimal)
        .ok_or(CalcError::Overflow("American odds"))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    Ok(PriceConversion {
        price,
        fee,
        effective_price,
        implied_prob: effective_price,
        decimal,
        american,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_with_fee() {
        // 0.40 + 0.02 = 0.42 => 1/0.42 = 2.3809... => (1.3809...) * 100 = +138
        let conv = convert_price(dec!(0.40), dec!(0.02)).unwrap();
        assert_eq!(conv.effective_price, dec!(0.42));
        assert_eq!(conv.implied_prob, dec!(0.42));
        assert_eq!(conv.decimal.round_dp(2), dec!(2.38));
        assert_eq!(conv.american, dec!(138));
    }

    #[test]
    fn test_favourite_price_goes_negative() {
        // 0.75 => decimal 1.3333... => -100 / 0.3333... = -300
        let conv = convert_price(dec!(0.75), Decimal::ZERO).unwrap();
        assert_eq!(conv.american, dec!(-300));
    }

    #[test]
    fn test_invalid_prices() {
        assert!(convert_price(Decimal::ZERO, Decimal::ZERO).is_none());
        assert!(convert_price(Decimal::ONE, Decimal::ZERO).is_none());
        assert!(convert_price(dec!(0.40), dec!(-0.01)).is_none());
        // 0.98 + 0.02 = 1.00 => break-even contract
        assert!(convert_price(dec!(0.98), dec!(0.02)).is_none());
        assert!(convert_price(dec!(0.40), Decimal::MAX).is_none());
        assert_eq!(
            try_convert_price(dec!(0.99), dec!(0.05)),
            Err(CalcError::InvalidContractPrice {
                price: dec!(0.99),
                fee: dec!(0.05),
            })
        );
    }
}
