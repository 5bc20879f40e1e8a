/// Ordinary least squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// `None` when there are fewer than two points or `x` has no spread.
pub fn ols_fit(xs: &[f64], ys: &[f64]) -> Option<Trend> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        cov += dx * (y - mean_y);
        var_x += dx * dx;
    }
    if var_x.abs() < 1e-10 {
        return None;
    }
    let slope = cov / var_x;
    Some(Trend {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// `(min, max)` of all values, or `None` for empty input.
pub fn extent<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/dashboard/stats.rs"]
mod tests;
