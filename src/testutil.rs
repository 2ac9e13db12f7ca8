//! Shared fixtures for unit tests.

use crate::models::{Candle, EquityPoint, Signal, SignalAction, Trade};
use chrono::{Duration, TimeZone, Utc};

pub fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Candles with open = high = low = close, one minute apart.
pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: base_time() + Duration::minutes(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000.0,
        })
        .collect()
}

/// A flat series at `base` with a single candle at `spike_index` whose close
/// (and matching extremum) is `spike_value`.
pub fn flat_candles_with_spike(
    len: usize,
    base: f64,
    spike_index: usize,
    spike_value: f64,
) -> Vec<Candle> {
    (0..len)
        .map(|i| {
            let close = if i == spike_index { spike_value } else { base };
            Candle {
                timestamp: base_time() + Duration::minutes(i as i64),
                open: base,
                high: close.max(base),
                low: close.min(base),
                close,
                volume: 1_000.0,
            }
        })
        .collect()
}

pub fn signal(index: usize, action: SignalAction, price: f64) -> Signal {
    Signal {
        index,
        action,
        price,
        reason: "test".to_string(),
    }
}

pub fn trade_with_pnl(pnl: f64) -> Trade {
    Trade {
        entry_index: 0,
        exit_index: 1,
        entry_price: 100.0,
        exit_price: 100.0 + pnl,
        quantity: 1.0,
        pnl,
        pnl_pct: pnl,
    }
}

pub fn equity_point(index: usize, equity: f64) -> EquityPoint {
    EquityPoint {
        index,
        timestamp: base_time() + Duration::minutes(index as i64),
        equity,
        price: equity,
    }
}
