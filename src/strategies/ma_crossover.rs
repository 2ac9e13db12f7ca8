use crate::errors::EngineError;
use crate::indicators;
use crate::models::{Candle, Signal, SignalAction};
use crate::param_utils::{get_param_flag, get_param_usize_in};
use crate::strategy::close_prices;
use std::collections::HashMap;

/// Moving-average crossover. Emits BUY on the golden cross (short moves from
/// `<=` long to `>` long between adjacent indices) and SELL on the death
/// cross. `use_ema` switches both averages from SMA to EMA.
pub struct MaCrossoverStrategy {
    short_window: usize,
    long_window: usize,
    use_ema: bool,
}

impl MaCrossoverStrategy {
    pub fn new(parameters: &HashMap<String, f64>) -> Result<Self, EngineError> {
        let short_window = get_param_usize_in(parameters, "short_window", 20, 1, 10_000)?;
        let long_window = get_param_usize_in(parameters, "long_window", 50, 1, 10_000)?;
        let use_ema = get_param_flag(parameters, "use_ema", false)?;

        if short_window >= long_window {
            return Err(EngineError::Parameter(format!(
                "`short_window` ({}) must be less than `long_window` ({})",
                short_window, long_window
            )));
        }

        Ok(Self {
            short_window,
            long_window,
            use_ema,
        })
    }

    fn ma_label(&self) -> &'static str {
        if self.use_ema {
            "EMA"
        } else {
            "SMA"
        }
    }
}

impl super::Strategy for MaCrossoverStrategy {
    fn name(&self) -> &str {
        "sma"
    }

    fn min_history(&self) -> usize {
        self.long_window
    }

    fn generate_signals(&self, candles: &[Candle]) -> Vec<Signal> {
        if candles.len() < self.long_window {
            return Vec::new();
        }

        let closes = close_prices(candles);
        let (short, long) = if self.use_ema {
            (
                indicators::calculate_ema(&closes, self.short_window),
                indicators::calculate_ema(&closes, self.long_window),
            )
        } else {
            (
                indicators::calculate_sma(&closes, self.short_window),
                indicators::calculate_sma(&closes, self.long_window),
            )
        };

        let mut signals = Vec::new();
        // Both the current and previous averages are defined from
        // long_window onward, the first index eligible for a transition.
        for i in self.long_window..candles.len() {
            let curr_short = short[i];
            let curr_long = long[i];
            let prev_short = short[i - 1];
            let prev_long = long[i - 1];

            if prev_short <= prev_long && curr_short > curr_long {
                signals.push(Signal {
                    index: i,
                    action: SignalAction::Buy,
                    price: candles[i].close,
                    reason: format!(
                        "{} {} crossed above {} {}",
                        self.ma_label(),
                        self.short_window,
                        self.ma_label(),
                        self.long_window
                    ),
                });
            } else if prev_short >= prev_long && curr_short < curr_long {
                signals.push(Signal {
                    index: i,
                    action: SignalAction::Sell,
                    price: candles[i].close,
                    reason: format!(
                        "{} {} crossed below {} {}",
                        self.ma_label(),
                        self.short_window,
                        self.ma_label(),
                        self.long_window
                    ),
                });
            }
        }

        signals
    }
}
