//! Hedge / arbitrage calculator.
//!
//! Evaluates one scenario described by environment variables (or .env)
//! and prints the result as JSON:
//! - `CALC_MODE=hedge`: anchor stake + hedge ratio
//! - `CALC_MODE=allocation`: total stake + bias, caps, optional no-loss mode
//! - `CALC_MODE=price`: event-contract price + fee to odds

use tracing::{error, info, warn};

use hedge_engine::config::{CalcMode, Settings};
use hedge_engine::hedge::allocation::compute_allocation;
use hedge_engine::hedge::models::AllocationMode;
use hedge_engine::hedge::optimizer::compute_hedge;
use hedge_engine::odds::conversion::{format_american, format_decimal_odds};
use hedge_engine::odds::price::convert_price;

fn main() -> anyhow::Result<()> {
    // Load configuration.
    let settings = Settings::from_env();

    // Initialize logging.
    init_logging(&settings);

    info!(calc_mode = ?settings.calc_mode, "Configuration loaded");

    // Validate settings.
    if let Err(errors) = settings.validate() {
        for e in &errors {
            error!(error = %e, "Configuration error");
        }
        anyhow::bail!("Configuration validation failed");
    }

    let output = match settings.calc_mode {
        CalcMode::Hedge => {
            let request = settings
                .hedge_request()
                .ok_or_else(|| anyhow::anyhow!("Odds could not be parsed"))?;
            let Some(result) = compute_hedge(&request) else {
                warn!(?request, "No hedge for these inputs");
                anyhow::bail!("Hedge inputs rejected");
            };
            info!(
                leg1 = %format_american(result.leg1.effective_american),
                leg1_decimal = %format_decimal_odds(result.leg1.effective_decimal),
                leg2 = %format_american(result.leg2.effective_american),
                stake2 = %result.stake2.round_dp(2),
                guaranteed = %result.settlement.guaranteed_profit.round_dp(2),
                arb_pct = %result.settlement.arb_pct.round_dp(2),
                has_arb = result.settlement.has_arb,
                "Hedge computed"
            );
            serde_json::to_string_pretty(&result)?
        }
        CalcMode::Allocation => {
            let request = settings
                .allocation_request()
                .ok_or_else(|| anyhow::anyhow!("Odds could not be parsed"))?;
            let Some(result) = compute_allocation(&request) else {
                warn!(?request, "No allocation for these inputs");
                anyhow::bail!("Allocation inputs rejected");
            };
            if request.mode == AllocationMode::NoLoss && !result.can_no_loss {
                warn!("No-loss split not possible for these odds");
            }
            info!(
                bias = %result.bias_pct.round_dp(2),
                stake1 = %result.stake1.round_dp(2),
                stake2 = %result.stake2.round_dp(2),
                capped = result.capped,
                edge_pct = %result.edge_pct.round_dp(2),
                can_no_loss = result.can_no_loss,
                "Allocation computed"
            );
            serde_json::to_string_pretty(&result)?
        }
        CalcMode::Price => {
            let Some(result) = convert_price(settings.contract_price, settings.contract_fee)
            else {
                warn!(
                    price = %settings.contract_price,
                    fee = %settings.contract_fee,
                    "Contract price has no odds"
                );
                anyhow::bail!("Contract price rejected");
            };
            info!(
                decimal = %format_decimal_odds(result.decimal),
                american = %format_american(result.american),
                "Price converted"
            );
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{output}");
    Ok(())
}

fn init_logging(settings: &Settings) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    // Logs go to stderr so stdout stays pure JSON.
    if settings.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
