use crate::models::{BacktestResult, EquityPoint, Trade};
use statrs::statistics::Statistics;

struct DrawdownInfo {
    max_drawdown: f64,
    max_drawdown_percent: f64,
}

pub struct PerformanceCalculator;

impl PerformanceCalculator {
    /// Fold a trade log and equity curve into summary metrics. With no
    /// processed candles the final balance falls back to the initial capital;
    /// breakeven trades count as losing.
    pub fn summarize(
        initial_capital: f64,
        trades: Vec<Trade>,
        equity_curve: Vec<EquityPoint>,
    ) -> BacktestResult {
        let final_balance = equity_curve
            .last()
            .map(|point| point.equity)
            .unwrap_or(initial_capital);

        let net_profit = final_balance - initial_capital;
        let roi = if initial_capital > 0.0 {
            net_profit / initial_capital * 100.0
        } else {
            0.0
        };

        let total_trades = trades.len();
        let winning_trades = trades.iter().filter(|t| t.pnl > 0.0).count();
        let losing_trades = total_trades - winning_trades;
        let win_rate = if total_trades > 0 {
            winning_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let drawdown = Self::calculate_max_drawdown(&equity_curve);
        let sharpe_ratio = Self::calculate_sharpe_ratio(&equity_curve);

        BacktestResult {
            initial_capital,
            final_balance,
            net_profit,
            roi,
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            max_drawdown: drawdown.max_drawdown,
            max_drawdown_percent: drawdown.max_drawdown_percent,
            sharpe_ratio,
            trades,
            equity_curve,
        }
    }

    fn calculate_max_drawdown(equity_curve: &[EquityPoint]) -> DrawdownInfo {
        if equity_curve.is_empty() {
            return DrawdownInfo {
                max_drawdown: 0.0,
                max_drawdown_percent: 0.0,
            };
        }

        let mut max_drawdown = 0.0;
        let mut max_drawdown_percent = 0.0;
        let mut peak = equity_curve[0].equity;

        for point in equity_curve {
            if point.equity > peak {
                peak = point.equity;
            } else {
                let drawdown = peak - point.equity;
                let drawdown_percent = if peak > 0.0 {
                    drawdown / peak * 100.0
                } else {
                    0.0
                };

                if drawdown > max_drawdown {
                    max_drawdown = drawdown;
                }
                if drawdown_percent > max_drawdown_percent {
                    max_drawdown_percent = drawdown_percent;
                }
            }
        }

        DrawdownInfo {
            max_drawdown,
            max_drawdown_percent,
        }
    }

    fn calculate_sharpe_ratio(equity_curve: &[EquityPoint]) -> f64 {
        if equity_curve.len() < 2 {
            return 0.0;
        }

        let returns: Vec<f64> = equity_curve
            .windows(2)
            .map(|window| {
                let prev = window[0].equity;
                let curr = window[1].equity;
                if prev > 0.0 {
                    (curr - prev) / prev
                } else {
                    0.0
                }
            })
            .collect();

        let mean_return = returns.clone().mean();
        let std_dev = returns.std_dev();

        if std_dev == 0.0 || !std_dev.is_finite() {
            return 0.0;
        }

        // Annualize assuming daily periods.
        let annualized_return = mean_return * 252.0;
        let annualized_volatility = std_dev * 252.0_f64.sqrt();
        let risk_free_rate = 0.02;

        (annualized_return - risk_free_rate) / annualized_volatility
    }
}
