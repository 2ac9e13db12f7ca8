use crate::data::load_candles_from_json;
use crate::models::parse_parameter_map_from_json;
use crate::registry::StrategyRegistry;
use crate::runner::run_strategy;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

pub fn run(
    data_file: &Path,
    strategy_name: &str,
    params_json: &str,
    initial_capital: f64,
) -> Result<()> {
    let candles = load_candles_from_json(data_file)?;
    let parameters = parse_parameter_map_from_json(params_json)?;
    let registry = StrategyRegistry::with_builtins();

    let output = run_strategy(
        &registry,
        &candles,
        strategy_name,
        &parameters,
        initial_capital,
    )?;

    info!(
        "Strategy {} produced {} signals and {} trades (final balance {:.2}, ROI {:.2}%)",
        output.strategy,
        output.signals.len(),
        output.backtest.total_trades,
        output.backtest.final_balance,
        output.backtest.roi
    );

    let rendered =
        serde_json::to_string_pretty(&output).context("serializing backtest output")?;
    println!("{}", rendered);

    Ok(())
}
