use crate::errors::EngineError;
use crate::models::Candle;
use anyhow::{anyhow, Context, Result};
use log::info;
use std::path::Path;

/// Load a candle snapshot from a JSON file (an array of candles).
///
/// This is the market-data collaborator's contract in file form: a snapshot
/// with no candles fails with a data-unavailable error, and the sequence is
/// checked for non-decreasing timestamps so the core only ever sees a valid
/// chronological series.
pub fn load_candles_from_json(path: &Path) -> Result<Vec<Candle>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading candle snapshot {}", path.display()))?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing candle snapshot {}", path.display()))?;

    if candles.is_empty() {
        return Err(EngineError::DataUnavailable(format!(
            "no candles in snapshot {}",
            path.display()
        ))
        .into());
    }

    for window in candles.windows(2) {
        if window[1].timestamp < window[0].timestamp {
            return Err(anyhow!(
                "candle snapshot {} is not in chronological order",
                path.display()
            ));
        }
    }

    info!(
        "Loaded {} candles from {} ({} to {})",
        candles.len(),
        path.display(),
        candles.first().map(|c| c.timestamp).unwrap(),
        candles.last().map(|c| c.timestamp).unwrap()
    );

    Ok(candles)
}
