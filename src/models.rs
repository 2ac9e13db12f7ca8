use crate::errors::EngineError;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalAction {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl SignalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalAction::Buy => "BUY",
            SignalAction::Sell => "SELL",
        }
    }
}

impl FromStr for SignalAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(SignalAction::Buy),
            "SELL" => Ok(SignalAction::Sell),
            other => Err(anyhow!("Unknown signal action '{}'", other)),
        }
    }
}

/// A discrete strategy decision tied to a candle index. `price` is the
/// execution price (strategies fill it with the candle close).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub index: usize,
    pub action: SignalAction,
    pub price: f64,
    pub reason: String,
}

/// A completed round trip. Created only when a SELL closes an open position;
/// an open position at the end of a run never becomes a trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    pub pnl: f64,
    pub pnl_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_capital: f64,
    pub final_balance: f64,
    pub net_profit: f64,
    pub roi: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub max_drawdown: f64,
    pub max_drawdown_percent: f64,
    pub sharpe_ratio: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

/// Output of one complete run: the signals the strategy produced and the
/// aggregated replay result.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyRunOutput {
    pub strategy: String,
    pub signals: Vec<Signal>,
    pub backtest: BacktestResult,
}

fn normalize_parameter_map(
    raw: HashMap<String, Value>,
) -> Result<HashMap<String, f64>, EngineError> {
    let mut cleaned = HashMap::with_capacity(raw.len());

    for (key, value) in raw.into_iter() {
        if let Some(num) = value.as_f64() {
            if num.is_finite() {
                cleaned.insert(key, num);
                continue;
            }
            return Err(EngineError::Parameter(format!(
                "parameter `{}` has non-finite value {}",
                key, value
            )));
        }

        if let Some(text) = value.as_str() {
            match text.trim().parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => {
                    cleaned.insert(key, parsed);
                    continue;
                }
                _ => {
                    return Err(EngineError::Parameter(format!(
                        "parameter `{}` has non-numeric value '{}'",
                        key, text
                    )));
                }
            }
        }

        if let Some(boolean) = value.as_bool() {
            cleaned.insert(key, if boolean { 1.0 } else { 0.0 });
            continue;
        }

        return Err(EngineError::Parameter(format!(
            "parameter `{}` has unsupported value {}",
            key, value
        )));
    }

    Ok(cleaned)
}

/// Parse a JSON object into a numeric parameter map. Numbers, numeric strings
/// and booleans are accepted; anything else fails fast with a parameter error.
pub fn parse_parameter_map_from_json(json: &str) -> Result<HashMap<String, f64>, EngineError> {
    let raw: HashMap<String, Value> = serde_json::from_str(json)
        .map_err(|error| EngineError::Parameter(format!("invalid parameter JSON: {}", error)))?;
    normalize_parameter_map(raw)
}
