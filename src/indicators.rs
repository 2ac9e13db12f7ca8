//! Pure transforms over a price series. Every function returns a vector
//! aligned 1:1 with its input, with `f64::NAN` marking the leading run of
//! indices where not enough history exists yet. Inputs are never mutated.

/// Simple moving average; undefined for indices `< period - 1`.
pub fn calculate_sma(prices: &[f64], period: usize) -> Vec<f64> {
    let n = prices.len();
    let mut sma_values = vec![f64::NAN; n];
    if period == 0 || n < period {
        return sma_values;
    }

    let mut window_sum: f64 = prices[..period].iter().sum();
    sma_values[period - 1] = window_sum / period as f64;
    for i in period..n {
        window_sum += prices[i] - prices[i - period];
        sma_values[i] = window_sum / period as f64;
    }

    sma_values
}

/// Exponential moving average with smoothing `2 / (period + 1)`, seeded with
/// the first value and therefore defined from index 0.
pub fn calculate_ema(prices: &[f64], period: usize) -> Vec<f64> {
    if prices.is_empty() {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema_values = Vec::with_capacity(prices.len());
    ema_values.push(prices[0]);

    for i in 1..prices.len() {
        let ema = (prices[i] * multiplier) + (ema_values[i - 1] * (1.0 - multiplier));
        ema_values.push(ema);
    }

    ema_values
}

/// Wilder RSI. Gains and losses are smoothed exponentially with
/// `alpha = 1 / period`, seeded at the first delta; undefined for the first
/// `period` samples. `avg_loss == 0` maps to RSI 100.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<f64> {
    let n = prices.len();
    let mut rsi_values = vec![f64::NAN; n];
    if period == 0 || n <= period {
        return rsi_values;
    }

    let alpha = 1.0 / period as f64;
    let mut avg_gain = 0.0f64;
    let mut avg_loss = 0.0f64;

    for i in 1..n {
        let delta = prices[i] - prices[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };

        if i == 1 {
            avg_gain = gain;
            avg_loss = loss;
        } else {
            avg_gain = avg_gain * (1.0 - alpha) + gain * alpha;
            avg_loss = avg_loss * (1.0 - alpha) + loss * alpha;
        }

        if i >= period {
            rsi_values[i] = if avg_loss == 0.0 {
                100.0
            } else {
                let rs = avg_gain / avg_loss;
                100.0 - 100.0 / (1.0 + rs)
            };
        }
    }

    rsi_values
}

/// Maximum of the previous `lookback` values, current index excluded;
/// undefined until `lookback` prior values exist.
pub fn rolling_max_prev(values: &[f64], lookback: usize) -> Vec<f64> {
    rolling_extremum_prev(values, lookback, f64::max)
}

/// Minimum of the previous `lookback` values, current index excluded;
/// undefined until `lookback` prior values exist.
pub fn rolling_min_prev(values: &[f64], lookback: usize) -> Vec<f64> {
    rolling_extremum_prev(values, lookback, f64::min)
}

fn rolling_extremum_prev(
    values: &[f64],
    lookback: usize,
    pick: fn(f64, f64) -> f64,
) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if lookback == 0 {
        return out;
    }

    for (i, slot) in out.iter_mut().enumerate().skip(lookback) {
        let window = &values[i - lookback..i];
        *slot = window.iter().copied().fold(f64::NAN, |acc, v| {
            if acc.is_nan() {
                v
            } else {
                pick(acc, v)
            }
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_pads_leading_indices_and_averages_window() {
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = calculate_sma(&prices, 3);
        assert_eq!(sma.len(), prices.len());
        assert!(sma[0].is_nan());
        assert!(sma[1].is_nan());
        assert!((sma[2] - 2.0).abs() < 1e-9);
        assert!((sma[3] - 3.0).abs() < 1e-9);
        assert!((sma[4] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn sma_on_short_series_is_all_undefined() {
        let sma = calculate_sma(&[1.0, 2.0], 5);
        assert_eq!(sma.len(), 2);
        assert!(sma.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_is_defined_from_first_index() {
        let prices = [10.0, 11.0, 12.0];
        let ema = calculate_ema(&prices, 3);
        assert_eq!(ema.len(), 3);
        assert!((ema[0] - 10.0).abs() < 1e-9);
        // alpha = 0.5 for period 3
        assert!((ema[1] - 10.5).abs() < 1e-9);
        assert!((ema[2] - 11.25).abs() < 1e-9);
    }

    #[test]
    fn rsi_is_100_when_series_only_gains() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let rsi = calculate_rsi(&prices, 14);
        for (i, value) in rsi.iter().enumerate() {
            if i < 14 {
                assert!(value.is_nan(), "index {} should be undefined", i);
            } else {
                assert!((value - 100.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn rsi_is_0_when_series_only_loses() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let rsi = calculate_rsi(&prices, 14);
        assert!(rsi[14].abs() < 1e-9);
        assert!(rsi[19].abs() < 1e-9);
    }

    #[test]
    fn rsi_stays_inside_bounds_on_mixed_series() {
        let prices = [
            100.0, 101.0, 99.5, 102.0, 101.5, 103.0, 102.0, 104.0, 103.5, 105.0, 104.0, 106.0,
            105.5, 107.0, 106.0, 108.0,
        ];
        let rsi = calculate_rsi(&prices, 14);
        assert!(rsi[13].is_nan());
        assert!(rsi[14] > 0.0 && rsi[14] < 100.0);
        assert!(rsi[15] > 0.0 && rsi[15] < 100.0);
    }

    #[test]
    fn rolling_bounds_exclude_the_current_value() {
        let values = [1.0, 5.0, 2.0, 9.0, 3.0];
        let max = rolling_max_prev(&values, 3);
        assert!(max[0].is_nan());
        assert!(max[2].is_nan());
        // window for index 3 is [1, 5, 2]; 9 itself is excluded
        assert!((max[3] - 5.0).abs() < 1e-9);
        assert!((max[4] - 9.0).abs() < 1e-9);

        let min = rolling_min_prev(&values, 3);
        assert!((min[3] - 1.0).abs() < 1e-9);
        assert!((min[4] - 2.0).abs() < 1e-9);
    }
}
