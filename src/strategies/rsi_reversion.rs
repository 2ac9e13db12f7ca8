use crate::errors::EngineError;
use crate::indicators;
use crate::models::{Candle, Signal, SignalAction};
use crate::param_utils::{get_param_f64_in, get_param_usize_in};
use crate::strategy::close_prices;
use std::collections::HashMap;

/// RSI mean-reversion. Level-triggered, not edge-triggered: every index where
/// RSI sits below `oversold` emits a BUY and every index above `overbought`
/// emits a SELL, so consecutive candles can repeat the same signal.
pub struct RsiReversionStrategy {
    period: usize,
    oversold: f64,
    overbought: f64,
}

impl RsiReversionStrategy {
    pub fn new(parameters: &HashMap<String, f64>) -> Result<Self, EngineError> {
        let period = get_param_usize_in(parameters, "period", 14, 1, 10_000)?;
        let oversold = get_param_f64_in(parameters, "oversold", 30.0, 0.0, 100.0)?;
        let overbought = get_param_f64_in(parameters, "overbought", 70.0, 0.0, 100.0)?;

        if oversold >= overbought {
            return Err(EngineError::Parameter(format!(
                "`oversold` ({}) must be less than `overbought` ({})",
                oversold, overbought
            )));
        }

        Ok(Self {
            period,
            oversold,
            overbought,
        })
    }
}

impl super::Strategy for RsiReversionStrategy {
    fn name(&self) -> &str {
        "rsi"
    }

    fn min_history(&self) -> usize {
        self.period
    }

    fn generate_signals(&self, candles: &[Candle]) -> Vec<Signal> {
        if candles.len() < self.period {
            return Vec::new();
        }

        let closes = close_prices(candles);
        let rsi = indicators::calculate_rsi(&closes, self.period);

        let mut signals = Vec::new();
        for i in self.period..candles.len() {
            let rsi_val = rsi[i];
            if rsi_val.is_nan() {
                continue;
            }

            if rsi_val < self.oversold {
                signals.push(Signal {
                    index: i,
                    action: SignalAction::Buy,
                    price: candles[i].close,
                    reason: format!("RSI {:.2} < {}", rsi_val, self.oversold),
                });
            } else if rsi_val > self.overbought {
                signals.push(Signal {
                    index: i,
                    action: SignalAction::Sell,
                    price: candles[i].close,
                    reason: format!("RSI {:.2} > {}", rsi_val, self.overbought),
                });
            }
        }

        signals
    }
}
