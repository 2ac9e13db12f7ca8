use crate::errors::EngineError;
use crate::indicators;
use crate::models::{Candle, Signal, SignalAction};
use crate::param_utils::get_param_usize_in;
use std::collections::HashMap;

/// Rolling breakout. The bounds are the extrema of the *previous* `lookback`
/// candles, so the breakout candle itself never inflates its own bound.
pub struct BreakoutStrategy {
    lookback: usize,
}

impl BreakoutStrategy {
    pub fn new(parameters: &HashMap<String, f64>) -> Result<Self, EngineError> {
        let lookback = get_param_usize_in(parameters, "lookback", 20, 1, 10_000)?;
        Ok(Self { lookback })
    }
}

impl super::Strategy for BreakoutStrategy {
    fn name(&self) -> &str {
        "breakout"
    }

    fn min_history(&self) -> usize {
        self.lookback + 1
    }

    fn generate_signals(&self, candles: &[Candle]) -> Vec<Signal> {
        if candles.len() <= self.lookback {
            return Vec::new();
        }

        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let upper = indicators::rolling_max_prev(&highs, self.lookback);
        let lower = indicators::rolling_min_prev(&lows, self.lookback);

        let mut signals = Vec::new();
        for i in self.lookback..candles.len() {
            if upper[i].is_nan() || lower[i].is_nan() {
                continue;
            }

            let close = candles[i].close;
            if close > upper[i] {
                signals.push(Signal {
                    index: i,
                    action: SignalAction::Buy,
                    price: close,
                    reason: "Breakout High".to_string(),
                });
            } else if close < lower[i] {
                signals.push(Signal {
                    index: i,
                    action: SignalAction::Sell,
                    price: close,
                    reason: "Breakout Low".to_string(),
                });
            }
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use crate::testutil::flat_candles_with_spike;

    fn strategy(lookback: usize) -> BreakoutStrategy {
        let params = [("lookback".to_string(), lookback as f64)]
            .into_iter()
            .collect();
        BreakoutStrategy::new(&params).unwrap()
    }

    #[test]
    fn spike_above_prior_highs_emits_one_buy() {
        let candles = flat_candles_with_spike(100, 100.0, 50, 150.0);
        let signals = strategy(20).generate_signals(&candles);

        let buys: Vec<_> = signals
            .iter()
            .filter(|s| s.action == SignalAction::Buy)
            .collect();
        assert_eq!(buys.len(), 1);
        assert_eq!(buys[0].index, 50);
        assert!((buys[0].price - 150.0).abs() < 1e-9);
    }

    #[test]
    fn drop_below_prior_lows_emits_sell() {
        let candles = flat_candles_with_spike(100, 100.0, 50, 60.0);
        let signals = strategy(20).generate_signals(&candles);
        assert!(signals
            .iter()
            .any(|s| s.index == 50 && s.action == SignalAction::Sell));
    }

    #[test]
    fn series_not_longer_than_lookback_yields_nothing() {
        let candles = flat_candles_with_spike(20, 100.0, 10, 150.0);
        assert!(strategy(20).generate_signals(&candles).is_empty());
    }

    #[test]
    fn rejects_zero_lookback() {
        let params = [("lookback".to_string(), 0.0)].into_iter().collect();
        assert!(BreakoutStrategy::new(&params).is_err());
    }
}
