use crate::models::{Candle, EquityPoint, Signal, SignalAction, Trade};
use crate::performance::PerformanceCalculator;
use log::debug;
use std::collections::HashMap;

/// Raw output of one replay before aggregation.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

/// Single-position replay engine. Each `run` owns its portfolio state from
/// scratch; the candle slice and signal list are read-only inputs, so one
/// engine value can serve any number of independent runs.
pub struct BacktestEngine {
    initial_capital: f64,
}

impl BacktestEngine {
    pub fn new(initial_capital: f64) -> Self {
        Self { initial_capital }
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Replay `signals` against `candles` index by index.
    ///
    /// State machine: FLAT (position == 0) or LONG (position > 0). A BUY
    /// while LONG or a SELL while FLAT is skipped silently; business
    /// conditions never raise. One equity point is appended per candle from
    /// the post-transition cash/position at the candle close. An open
    /// position at the last candle is left unrealized: it stays out of the
    /// trade log and is only visible through the equity curve.
    pub fn run(&self, candles: &[Candle], signals: &[Signal]) -> ReplayOutcome {
        // Later entries overwrite earlier ones, so the last signal generated
        // for an index wins. Preserved collision policy, not an accident.
        let mut signal_map: HashMap<usize, &Signal> = HashMap::with_capacity(signals.len());
        for signal in signals {
            signal_map.insert(signal.index, signal);
        }

        let mut cash = self.initial_capital;
        let mut position = 0.0f64;
        let mut entry_price = 0.0f64;
        let mut entry_index = 0usize;
        let mut trades = Vec::new();
        let mut equity_curve = Vec::with_capacity(candles.len());

        for (i, candle) in candles.iter().enumerate() {
            if let Some(signal) = signal_map.get(&i) {
                let exec_price = signal.price;

                match signal.action {
                    SignalAction::Buy if position == 0.0 => {
                        if exec_price.is_finite() && exec_price > 0.0 {
                            let quantity = (cash / exec_price).floor();
                            if quantity > 0.0 {
                                position = quantity;
                                cash -= quantity * exec_price;
                                entry_price = exec_price;
                                entry_index = i;
                            } else {
                                debug!("Buy at index {} skipped: insufficient cash", i);
                            }
                        }
                    }
                    SignalAction::Sell if position > 0.0 => {
                        let revenue = position * exec_price;
                        let cost = position * entry_price;
                        let pnl = revenue - cost;
                        let pnl_pct = if cost > 0.0 { pnl / cost * 100.0 } else { 0.0 };

                        cash += revenue;
                        trades.push(Trade {
                            entry_index,
                            exit_index: i,
                            entry_price,
                            exit_price: exec_price,
                            quantity: position,
                            pnl,
                            pnl_pct,
                        });
                        position = 0.0;
                        entry_price = 0.0;
                    }
                    // Buy while LONG or sell while FLAT: silent no-op.
                    _ => {}
                }
            }

            equity_curve.push(EquityPoint {
                index: i,
                timestamp: candle.timestamp,
                equity: cash + position * candle.close,
                price: candle.close,
            });
        }

        ReplayOutcome {
            trades,
            equity_curve,
        }
    }

    /// Replay and aggregate in one call.
    pub fn backtest(&self, candles: &[Candle], signals: &[Signal]) -> crate::models::BacktestResult {
        let outcome = self.run(candles, signals);
        PerformanceCalculator::summarize(self.initial_capital, outcome.trades, outcome.equity_curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{candles_from_closes, signal};

    #[test]
    fn produces_one_equity_point_per_candle_in_order() {
        let candles = candles_from_closes(&[10.0, 11.0, 12.0, 13.0]);
        let outcome = BacktestEngine::new(1_000.0).run(&candles, &[]);
        assert_eq!(outcome.equity_curve.len(), 4);
        for (i, point) in outcome.equity_curve.iter().enumerate() {
            assert_eq!(point.index, i);
            assert!((point.equity - 1_000.0).abs() < 1e-9);
        }
    }

    #[test]
    fn buy_then_sell_records_one_trade_and_returns_flat() {
        let candles = candles_from_closes(&[10.0, 10.0, 20.0, 20.0]);
        let signals = vec![
            signal(1, SignalAction::Buy, 10.0),
            signal(2, SignalAction::Sell, 20.0),
        ];
        let outcome = BacktestEngine::new(100.0).run(&candles, &signals);

        assert_eq!(outcome.trades.len(), 1);
        let trade = &outcome.trades[0];
        assert_eq!(trade.entry_index, 1);
        assert_eq!(trade.exit_index, 2);
        assert!((trade.quantity - 10.0).abs() < 1e-9);
        assert!((trade.pnl - 100.0).abs() < 1e-9);
        assert!((trade.pnl_pct - 100.0).abs() < 1e-9);
        // Flat after the trade: equity no longer tracks price.
        assert!((outcome.equity_curve[3].equity - 200.0).abs() < 1e-9);
    }

    #[test]
    fn buy_while_long_and_sell_while_flat_are_ignored() {
        let candles = candles_from_closes(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        let signals = vec![
            signal(0, SignalAction::Sell, 10.0),
            signal(1, SignalAction::Buy, 10.0),
            signal(2, SignalAction::Buy, 10.0),
            signal(3, SignalAction::Sell, 10.0),
        ];
        let outcome = BacktestEngine::new(100.0).run(&candles, &signals);
        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].entry_index, 1);
        assert_eq!(outcome.trades[0].exit_index, 3);
    }

    #[test]
    fn insufficient_cash_keeps_state_flat() {
        let candles = candles_from_closes(&[500.0, 600.0]);
        let signals = vec![signal(0, SignalAction::Buy, 500.0)];
        let outcome = BacktestEngine::new(100.0).run(&candles, &signals);
        assert!(outcome.trades.is_empty());
        assert!((outcome.equity_curve[1].equity - 100.0).abs() < 1e-9);
    }

    #[test]
    fn last_signal_at_a_duplicate_index_wins() {
        let candles = candles_from_closes(&[10.0, 10.0]);
        let signals = vec![
            signal(0, SignalAction::Sell, 10.0),
            signal(0, SignalAction::Buy, 10.0),
        ];
        let outcome = BacktestEngine::new(100.0).run(&candles, &signals);
        // The buy (generated last) was applied; equity is marked to market.
        assert!(outcome.trades.is_empty());
        assert!((outcome.equity_curve[0].equity - 100.0).abs() < 1e-9);

        let signals = vec![
            signal(0, SignalAction::Buy, 10.0),
            signal(0, SignalAction::Sell, 10.0),
        ];
        let outcome = BacktestEngine::new(100.0).run(&candles, &signals);
        // The sell (generated last) won, and a sell while FLAT is a no-op.
        assert!(outcome.trades.is_empty());
        assert!((outcome.equity_curve[1].equity - 100.0).abs() < 1e-9);
    }

    #[test]
    fn open_position_marks_to_market_without_a_trade() {
        let candles = candles_from_closes(&[10.0, 10.0, 15.0]);
        let signals = vec![signal(1, SignalAction::Buy, 10.0)];
        let outcome = BacktestEngine::new(100.0).run(&candles, &signals);

        assert!(outcome.trades.is_empty());
        let last = outcome.equity_curve.last().unwrap();
        assert!((last.equity - 150.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_price_buy_is_refused() {
        let candles = candles_from_closes(&[10.0, 10.0]);
        let signals = vec![signal(0, SignalAction::Buy, 0.0)];
        let outcome = BacktestEngine::new(100.0).run(&candles, &signals);
        assert!(outcome.trades.is_empty());
        assert!((outcome.equity_curve[1].equity - 100.0).abs() < 1e-9);
    }
}
