pub mod backtest;
pub mod list_strategies;
pub mod sweep;
