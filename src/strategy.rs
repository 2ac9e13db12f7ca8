use crate::models::{Candle, Signal};

/// A signal-generating strategy. Implementations are constructed from a
/// numeric parameter map (validated at construction, fail-fast) and then
/// scan a read-only candle slice into an ordered signal list.
pub trait Strategy {
    fn name(&self) -> &str;

    /// Shortest candle series the strategy can act on. Anything shorter
    /// yields an empty signal list, never an error.
    fn min_history(&self) -> usize;

    fn generate_signals(&self, candles: &[Candle]) -> Vec<Signal>;
}

impl std::fmt::Debug for dyn Strategy + Send + Sync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name()).finish()
    }
}

#[path = "strategies/ma_crossover.rs"]
pub mod ma_crossover;

pub use ma_crossover::MaCrossoverStrategy;

#[path = "strategies/rsi_reversion.rs"]
pub mod rsi_reversion;

pub use rsi_reversion::RsiReversionStrategy;

#[path = "strategies/breakout.rs"]
pub mod breakout;

pub use breakout::BreakoutStrategy;

/// Pull the close series out of a candle slice.
pub fn close_prices(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
