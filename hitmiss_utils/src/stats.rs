/// The mean of a slice of f64
///
/// Returns NaN for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    let n: f64 = xs.len() as f64;
    xs.iter().fold(0.0, |acc, x| x + acc) / n
}

/// The (population) variance of a slice of f64
pub fn var(xs: &[f64]) -> f64 {
    let n: f64 = xs.len() as f64;
    let m = mean(xs);
    let v = xs.iter().fold(0.0, |acc, x| (x - m).mul_add(x - m, acc));
    v / n
}

/// The standard deviation of a slice of f64
pub fn std(xs: &[f64]) -> f64 {
    let v: f64 = var(xs);
    v.sqrt()
}

/// The standard error of the mean, `std / sqrt(n)`
pub fn std_err(xs: &[f64]) -> f64 {
    std(xs) / (xs.len() as f64).sqrt()
}
