use crate::data::load_candles_from_json;
use crate::registry::StrategyRegistry;
use crate::runner::{run_batch, RunConfig};
use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

pub fn run(data_file: &Path, config_file: &Path) -> Result<()> {
    let candles = load_candles_from_json(data_file)?;
    let raw = std::fs::read_to_string(config_file)
        .with_context(|| format!("reading sweep config {}", config_file.display()))?;
    let configs: Vec<RunConfig> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing sweep config {}", config_file.display()))?;

    if configs.is_empty() {
        return Err(anyhow!("sweep config {} is empty", config_file.display()));
    }

    info!("Running {} configurations", configs.len());
    let registry = Arc::new(StrategyRegistry::with_builtins());
    let results = run_batch(registry, Arc::new(candles), configs);

    let mut failures = 0usize;
    for result in &results {
        match &result.run {
            Ok(output) => {
                println!(
                    "{}\t{}\tsignals={}\ttrades={}\twin_rate={:.2}%\troi={:.2}%\tfinal={:.2}",
                    result.label,
                    result.strategy,
                    output.signals.len(),
                    output.backtest.total_trades,
                    output.backtest.win_rate,
                    output.backtest.roi,
                    output.backtest.final_balance
                );
            }
            Err(error) => {
                failures += 1;
                warn!("Run {} ({}) failed: {}", result.label, result.strategy, error);
                println!("{}\t{}\tFAILED: {}", result.label, result.strategy, error);
            }
        }
    }

    if failures == results.len() {
        return Err(anyhow!("all {} sweep runs failed", failures));
    }

    Ok(())
}
