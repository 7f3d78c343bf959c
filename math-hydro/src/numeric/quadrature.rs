//! Numerical integration over sampled data

/// Simpson's rule on an arbitrary (possibly irregular) ascending grid
///
/// Pairs of intervals use the three-point irregular Simpson formula. With an
/// odd number of intervals the last one is closed with the matching
/// three-point end correction. Two samples fall back to the trapezoid rule.
pub fn simpson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    if n == 2 {
        return 0.5 * (x[1] - x[0]) * (y[0] + y[1]);
    }

    let last = if (n - 1) % 2 == 0 { n - 1 } else { n - 2 };
    let mut sum = 0.0;
    let mut i = 0;
    while i + 2 <= last {
        let h0 = x[i + 1] - x[i];
        let h1 = x[i + 2] - x[i + 1];
        let hph = h0 + h1;
        let hdh = h1 / h0;
        let hmh = h0 * h1;
        sum += hph / 6.0
            * ((2.0 - hdh) * y[i] + hph * hph / hmh * y[i + 1] + (2.0 - 1.0 / hdh) * y[i + 2]);
        i += 2;
    }

    if last != n - 1 {
        let h0 = x[n - 2] - x[n - 3];
        let h1 = x[n - 1] - x[n - 2];
        let alpha = (2.0 * h1 * h1 + 3.0 * h0 * h1) / (6.0 * (h0 + h1));
        let beta = (h1 * h1 + 3.0 * h0 * h1) / (6.0 * h0);
        let eta = h1 * h1 * h1 / (6.0 * h0 * (h0 + h1));
        sum += alpha * y[n - 1] + beta * y[n - 2] - eta * y[n - 3];
    }
    sum
}
