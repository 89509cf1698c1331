//! Configuration management.
//!
//! Loads a calculator scenario and logging settings from environment
//! variables and .env file.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::hedge::models::{AllocationMode, AllocationRequest, HedgeRequest};
use crate::odds::boost::BoostSetting;
use crate::odds::conversion::parse_american;

/// Scenario and logging configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub calc_mode: CalcMode,
    /// Parse error for an unrecognised CALC_MODE (calc_mode falls back to Hedge).
    pub calc_mode_error: Option<String>,

    // Odds (American, raw text so bad input can be reported)
    pub odds1: String,
    pub odds2: String,

    // Hedge optimizer
    pub stake1: Decimal,
    pub hedge_percent: Decimal,
    pub rounding1: Option<Decimal>,
    pub rounding2: Option<Decimal>,

    // Boosts
    pub boost1_enabled: bool,
    pub boost1_pct: Decimal,
    pub boost2_enabled: bool,
    pub boost2_pct: Decimal,

    // Allocation
    pub total_stake: Decimal,
    pub bias_pct: Decimal,
    pub max_stake1: Option<Decimal>,
    pub max_stake2: Option<Decimal>,
    pub no_loss: bool,

    // Event-contract price
    pub contract_price: Decimal,
    pub contract_fee: Decimal,

    // Logging
    pub log_level: String,
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcMode {
    Hedge,
    Allocation,
    Price,
}

impl FromStr for CalcMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hedge" => Ok(Self::Hedge),
            "allocation" | "arb" => Ok(Self::Allocation),
            "price" => Ok(Self::Price),
            _ => Err(format!("Invalid calc mode: {s}")),
        }
    }
}

impl Settings {
    /// Load settings from environment variables (and .env file).
    pub fn from_env() -> Self {
        // Try to load .env file (ignore if not found).
        let _ = dotenvy::dotenv();

        let (calc_mode, calc_mode_error) = match env_str("CALC_MODE", "hedge").parse() {
            Ok(mode) => (mode, None),
            Err(e) => (CalcMode::Hedge, Some(e)),
        };

        Self {
            calc_mode,
            calc_mode_error,

            odds1: env_str("ODDS1", "+280"),
            odds2: env_str("ODDS2", "-280"),

            stake1: env_decimal("STAKE1", Decimal::new(10, 0)),
            hedge_percent: env_decimal("HEDGE_PERCENT", Decimal::ONE_HUNDRED),
            rounding1: env_decimal_opt("ROUNDING1"),
            rounding2: env_decimal_opt("ROUNDING2"),

            boost1_enabled: env_bool("BOOST1_ENABLED", false),
            boost1_pct: env_decimal("BOOST1_PCT", Decimal::ZERO),
            boost2_enabled: env_bool("BOOST2_ENABLED", false),
            boost2_pct: env_decimal("BOOST2_PCT", Decimal::ZERO),

            total_stake: env_decimal("TOTAL_STAKE", Decimal::ONE_HUNDRED),
            bias_pct: env_decimal("BIAS_PCT", Decimal::new(50, 0)),
            max_stake1: env_decimal_opt("MAX_STAKE1"),
            max_stake2: env_decimal_opt("MAX_STAKE2"),
            no_loss: env_bool("NO_LOSS", false),

            contract_price: env_decimal("CONTRACT_PRICE", Decimal::new(50, 2)),
            contract_fee: env_decimal("CONTRACT_FEE", Decimal::ZERO),

            log_level: env_str("LOG_LEVEL", "info"),
            log_json: env_bool("LOG_JSON", false),
        }
    }

    /// Validate configuration for problems the calculator would silently
    /// ignore or reject.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(e) = &self.calc_mode_error {
            errors.push(format!("CALC_MODE must be hedge, allocation, arb or price ({e})"));
        }

        if self.calc_mode != CalcMode::Price {
            if parse_american(&self.odds1).is_none() {
                errors.push(format!("ODDS1 is not valid American odds: {}", self.odds1));
            }
            if parse_american(&self.odds2).is_none() {
                errors.push(format!("ODDS2 is not valid American odds: {}", self.odds2));
            }
        }

        for (key, value) in [("ROUNDING1", self.rounding1), ("ROUNDING2", self.rounding2)] {
            if matches!(value, Some(g) if g <= Decimal::ZERO) {
                errors.push(format!("{key} must be > 0"));
            }
        }

        for (key, value) in [("MAX_STAKE1", self.max_stake1), ("MAX_STAKE2", self.max_stake2)] {
            if matches!(value, Some(cap) if cap <= Decimal::ZERO) {
                errors.push(format!("{key} must be > 0"));
            }
        }

        if self.contract_fee < Decimal::ZERO {
            errors.push("CONTRACT_FEE must be >= 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn boosts(&self) -> (BoostSetting, BoostSetting) {
        (
            BoostSetting {
                enabled: self.boost1_enabled,
                pct: self.boost1_pct,
            },
            BoostSetting {
                enabled: self.boost2_enabled,
                pct: self.boost2_pct,
            },
        )
    }

    /// Hedge request for the configured scenario. None if the odds don't parse.
    pub fn hedge_request(&self) -> Option<HedgeRequest> {
        let (boost1, boost2) = self.boosts();
        Some(
            HedgeRequest::new(
                parse_american(&self.odds1)?,
                self.stake1,
                parse_american(&self.odds2)?,
            )
            .with_hedge_percent(self.hedge_percent)
            .with_boosts(boost1, boost2)
            .with_rounding(self.rounding1, self.rounding2),
        )
    }

    /// Allocation request for the configured scenario. None if the odds don't parse.
    pub fn allocation_request(&self) -> Option<AllocationRequest> {
        let (boost1, boost2) = self.boosts();
        let mode = if self.no_loss {
            AllocationMode::NoLoss
        } else {
            AllocationMode::Arbitrage
        };
        Some(
            AllocationRequest::new(
                parse_american(&self.odds1)?,
                parse_american(&self.odds2)?,
                self.total_stake,
                self.bias_pct,
            )
            .with_boosts(boost1, boost2)
            .with_caps(self.max_stake1, self.max_stake2)
            .with_mode(mode),
        )
    }
}

// =============================================================================
// Environment helpers
// =============================================================================

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

fn env_decimal(key: &str, default: Decimal) -> Decimal {
    env_decimal_opt(key).unwrap_or(default)
}

fn env_decimal_opt(key: &str) -> Option<Decimal> {
    std::env::var(key)
        .ok()
        .and_then(|v| Decimal::from_str(v.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_settings() -> Settings {
        Settings {
            calc_mode: CalcMode::Hedge,
            calc_mode_error: None,
            odds1: "+280".to_string(),
            odds2: "-280".to_string(),
            stake1: dec!(10),
            hedge_percent: dec!(100),
            rounding1: None,
            rounding2: None,
            boost1_enabled: true,
            boost1_pct: dec!(50),
            boost2_enabled: false,
            boost2_pct: Decimal::ZERO,
            total_stake: dec!(100),
            bias_pct: dec!(50),
            max_stake1: None,
            max_stake2: None,
            no_loss: true,
            contract_price: dec!(0.40),
            contract_fee: dec!(0.02),
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    #[test]
    fn test_calc_mode_parse() {
        assert_eq!("HEDGE".parse::<CalcMode>(), Ok(CalcMode::Hedge));
        assert_eq!("arb".parse::<CalcMode>(), Ok(CalcMode::Allocation));
        assert_eq!("price".parse::<CalcMode>(), Ok(CalcMode::Price));
        assert!("kelly".parse::<CalcMode>().is_err());
    }

    #[test]
    fn test_requests_from_settings() {
        let settings = base_settings();
        assert!(settings.validate().is_ok());

        let hedge = settings.hedge_request().unwrap();
        assert_eq!(hedge.odds1, dec!(280));
        assert_eq!(hedge.odds2, dec!(-280));
        assert_eq!(hedge.boost1.effective_pct(), dec!(50));
        assert_eq!(hedge.boost2.effective_pct(), Decimal::ZERO);

        let alloc = settings.allocation_request().unwrap();
        assert_eq!(alloc.mode, AllocationMode::NoLoss);
        assert_eq!(alloc.total_stake, dec!(100));
    }

    #[test]
    fn test_validate_collects_errors() {
        let settings = Settings {
            odds1: "+50".to_string(),
            rounding2: Some(Decimal::ZERO),
            max_stake1: Some(dec!(-1)),
            contract_fee: dec!(-0.01),
            ..base_settings()
        };
        let errors = settings.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(settings.hedge_request().is_none());
    }

    #[test]
    fn test_validate_reports_unknown_calc_mode() {
        let settings = Settings {
            calc_mode_error: "kelly".parse::<CalcMode>().err(),
            ..base_settings()
        };
        let errors = settings.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("CALC_MODE"));
        assert!(errors[0].contains("kelly"));
    }
}
