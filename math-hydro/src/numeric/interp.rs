//! Linear interpolation and resampling

/// Linear interpolation between `(x0, y0)` and `(x1, y1)` at `x`
#[inline]
pub fn lerp(x0: f64, x1: f64, y0: f64, y1: f64, x: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Piecewise linear interpolation on an ascending grid, `None` outside `[x0, xn]`
pub fn interp_linear(x: &[f64], y: &[f64], xi: f64) -> Option<f64> {
    let n = x.len().min(y.len());
    if n == 0 || xi < x[0] || xi > x[n - 1] {
        return None;
    }
    if n == 1 {
        return Some(y[0]);
    }
    let k = x[..n].partition_point(|&v| v <= xi).clamp(1, n - 1);
    Some(lerp(x[k - 1], x[k], y[k - 1], y[k], xi))
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Resample `y(x)` linearly onto a uniform grid with spacing at most `max_step`
///
/// The returned grid has an odd number of points so that composite Simpson
/// integration closes exactly.
pub fn resample_uniform(x: &[f64], y: &[f64], max_step: f64) -> (Vec<f64>, Vec<f64>) {
    let n = x.len().min(y.len());
    if n < 2 || !(max_step > 0.0) {
        return (x[..n].to_vec(), y[..n].to_vec());
    }
    let span = x[n - 1] - x[0];
    let mut count = (span / max_step).ceil() as usize + 1;
    if count % 2 == 0 {
        count += 1;
    }
    let xf = linspace(x[0], x[n - 1], count);
    let mut k = 1;
    let yf = xf
        .iter()
        .map(|&xi| {
            while k < n - 1 && xi > x[k] {
                k += 1;
            }
            lerp(x[k - 1], x[k], y[k - 1], y[k], xi)
        })
        .collect();
    (xf, yf)
}
