/// Simple Moving Average, aligned to the input series.
/// The first period-1 slots have no value.
pub fn sma(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }

    for (i, window) in data.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period as f64;
        result[i + period - 1] = Some(mean);
    }

    result
}

/// Exponential Moving Average, seeded with the SMA of the first period values
pub fn ema(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed = data[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..data.len() {
        let value = (data[i] - prev) * multiplier + prev;
        result[i] = Some(value);
        prev = value;
    }

    result
}

/// Relative Strength Index over plain averages of gains and losses.
/// A window with no losses reads 100; a window with no movement at all is
/// undefined and stays None.
pub fn rsi(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || data.len() < period + 1 {
        return result;
    }

    for (i, window) in data.windows(period + 1).enumerate() {
        let mut gains = 0.0;
        let mut losses = 0.0;
        for pair in window.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;

        result[i + period] = if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                None
            } else {
                Some(100.0)
            }
        } else {
            let rs = avg_gain / avg_loss;
            Some(100.0 - 100.0 / (1.0 + rs))
        };
    }

    result
}

/// MACD output columns, aligned to the input series
pub struct MacdResult {
    pub macd_line: Vec<Option<f64>>,
    pub signal_line: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD (Moving Average Convergence Divergence). The MACD line starts where
/// the slow EMA starts; the signal line is an EMA over the defined MACD
/// values, re-aligned to the input.
pub fn macd(
    data: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdResult {
    let len = data.len();
    let mut macd_line = vec![None; len];
    let mut signal_line = vec![None; len];
    let mut histogram = vec![None; len];

    if fast_period == 0 || slow_period == 0 || signal_period == 0 || slow_period < fast_period {
        return MacdResult {
            macd_line,
            signal_line,
            histogram,
        };
    }

    let ema_fast = ema(data, fast_period);
    let ema_slow = ema(data, slow_period);

    for i in 0..len {
        if let (Some(fast), Some(slow)) = (ema_fast[i], ema_slow[i]) {
            macd_line[i] = Some(fast - slow);
        }
    }

    let defined: Vec<f64> = macd_line.iter().filter_map(|v| *v).collect();
    let offset = len - defined.len();
    for (j, value) in ema(&defined, signal_period).into_iter().enumerate() {
        signal_line[offset + j] = value;
    }

    for i in 0..len {
        if let (Some(m), Some(s)) = (macd_line[i], signal_line[i]) {
            histogram[i] = Some(m - s);
        }
    }

    MacdResult {
        macd_line,
        signal_line,
        histogram,
    }
}

/// Bollinger band columns, aligned to the input series
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Bollinger Bands: SMA(period) +/- width standard deviations of the window
pub fn bollinger_bands(data: &[f64], period: usize, width: f64) -> BollingerBands {
    let len = data.len();
    let mut upper = vec![None; len];
    let mut middle = vec![None; len];
    let mut lower = vec![None; len];

    if period == 0 || len < period {
        return BollingerBands {
            upper,
            middle,
            lower,
        };
    }

    for (i, window) in data.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
        let std = variance.sqrt();

        let idx = i + period - 1;
        middle[idx] = Some(mean);
        upper[idx] = Some(mean + width * std);
        lower[idx] = Some(mean - width * std);
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}
