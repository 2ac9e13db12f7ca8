use crate::engine::BacktestEngine;
use crate::models::{Candle, StrategyRunOutput};
use crate::registry::StrategyRegistry;
use anyhow::{Context, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::result::Result as StdResult;
use std::sync::Arc;
use std::thread;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;

/// Resolve a strategy through the registry, generate its signals, and replay
/// them. Registry and strategy errors are wrapped with strategy-name context
/// before they propagate.
pub fn run_strategy(
    registry: &StrategyRegistry,
    candles: &[Candle],
    strategy_name: &str,
    parameters: &HashMap<String, f64>,
    initial_capital: f64,
) -> Result<StrategyRunOutput> {
    let strategy = registry
        .create(strategy_name, parameters)
        .with_context(|| format!("running strategy {}", strategy_name))?;

    let signals = strategy.generate_signals(candles);
    let backtest = BacktestEngine::new(initial_capital).backtest(candles, &signals);

    Ok(StrategyRunOutput {
        strategy: strategy_name.to_string(),
        signals,
        backtest,
    })
}

fn default_initial_capital() -> f64 {
    DEFAULT_INITIAL_CAPITAL
}

/// One entry of a sweep config file.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub label: String,
    pub strategy: String,
    #[serde(default)]
    pub parameters: HashMap<String, f64>,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
}

#[derive(Debug)]
pub struct BatchRunResult {
    pub label: String,
    pub strategy: String,
    pub run: StdResult<StrategyRunOutput, String>,
}

struct BatchTask {
    position: usize,
    config: RunConfig,
}

struct BatchResultMsg {
    position: usize,
    result: BatchRunResult,
}

/// Run independent configurations in parallel over a shared read-only candle
/// series. Each worker owns its run's portfolio state; results come back in
/// config order.
pub fn run_batch(
    registry: Arc<StrategyRegistry>,
    candles: Arc<Vec<Candle>>,
    configs: Vec<RunConfig>,
) -> Vec<BatchRunResult> {
    let total = configs.len();
    if total == 0 {
        return Vec::new();
    }

    let num_workers = std::cmp::min(total, std::cmp::max(1, num_cpus::get()));
    info!("Using {} worker threads for {} runs", num_workers, total);

    let (task_tx, task_rx): (Sender<BatchTask>, Receiver<BatchTask>) = bounded(total);
    let (result_tx, result_rx): (Sender<BatchResultMsg>, Receiver<BatchResultMsg>) = bounded(total);

    let mut handles = Vec::new();
    for _ in 0..num_workers {
        let rx = task_rx.clone();
        let result_tx = result_tx.clone();
        let registry = Arc::clone(&registry);
        let candles = Arc::clone(&candles);

        let handle = thread::spawn(move || {
            while let Ok(task) = rx.recv() {
                let BatchTask { position, config } = task;
                let run = run_strategy(
                    &registry,
                    candles.as_slice(),
                    &config.strategy,
                    &config.parameters,
                    config.initial_capital,
                )
                .map_err(|e| format!("{:#}", e));

                let message = BatchResultMsg {
                    position,
                    result: BatchRunResult {
                        label: config.label,
                        strategy: config.strategy,
                        run,
                    },
                };
                if result_tx.send(message).is_err() {
                    break;
                }
            }
        });
        handles.push(handle);
    }
    drop(result_tx);

    for (position, config) in configs.into_iter().enumerate() {
        let _ = task_tx.send(BatchTask { position, config });
    }
    drop(task_tx);

    let mut messages: Vec<BatchResultMsg> = result_rx.iter().collect();
    for handle in handles {
        let _ = handle.join();
    }

    messages.sort_by_key(|m| m.position);
    let results: Vec<BatchRunResult> = messages.into_iter().map(|m| m.result).collect();

    let failures = results.iter().filter(|r| r.run.is_err()).count();
    if failures > 0 {
        warn!(
            "Batch completed with {} failure{}",
            failures,
            if failures == 1 { "" } else { "s" }
        );
    }

    results
}
