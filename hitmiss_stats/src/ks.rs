use std::f64::consts::PI;

/// One-sample Kolmogorov-Smirnov statistic of `xs` against `cdf`
pub fn ks_test<F: Fn(f64) -> f64>(xs: &[f64], cdf: F) -> f64 {
    let mut xs_r: Vec<f64> = xs.to_vec();
    xs_r.sort_unstable_by(|a, b| a.total_cmp(b));

    let n: f64 = xs_r.len() as f64;
    xs_r.iter().enumerate().fold(0.0, |acc, (i, &x)| {
        let fx = cdf(x);
        let d_plus = (i as f64 + 1.0) / n - fx;
        let d_minus = fx - i as f64 / n;
        acc.max(d_plus).max(d_minus)
    })
}

// Computes the emprical CDF of xs on the values in vals
// xs and vals must be sorted
fn empirical_cdf(xs: &[f64], vals: &[f64]) -> Vec<f64> {
    let n: f64 = xs.len() as f64;
    let mut cdf: Vec<f64> = Vec::with_capacity(vals.len());
    let mut ix: usize = 0;
    vals.iter().for_each(|y| {
        while ix < xs.len() && xs[ix] <= *y {
            ix += 1;
        }
        cdf.push((ix as f64) / n);
    });
    cdf
}

/// Two-sample Kolmogorov-Smirnov statistic, the largest distance between
/// the empirical CDFs of `xs` and `ys`
pub fn ks2sample(mut xs: Vec<f64>, mut ys: Vec<f64>) -> f64 {
    let mut all_vals = xs.clone();
    all_vals.extend_from_slice(&ys);

    xs.sort_unstable_by(|a, b| a.total_cmp(b));
    ys.sort_unstable_by(|a, b| a.total_cmp(b));
    all_vals.sort_unstable_by(|a, b| a.total_cmp(b));

    let cdf_x = empirical_cdf(&xs, &all_vals);
    let cdf_y = empirical_cdf(&ys, &all_vals);

    cdf_x
        .iter()
        .zip(cdf_y)
        .fold(0.0, |acc, (px, py)| acc.max((px - py).abs()))
}

/// Survival function of the Kolmogorov distribution, P(K > lambda)
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }

    let sf = if lambda < 1.18 {
        // Jacobi theta form converges fast for small lambda
        let y = (-PI * PI / (8.0 * lambda * lambda)).exp();
        let cdf = (2.0 * PI).sqrt() / lambda
            * (y + y.powi(9) + y.powi(25) + y.powi(49));
        1.0 - cdf
    } else {
        let x = (-2.0 * lambda * lambda).exp();
        2.0 * (x - x.powi(4) + x.powi(9) - x.powi(16))
    };

    sf.clamp(0.0, 1.0)
}

/// Asymptotic p-value of a two-sample KS statistic `d` for samples of size
/// `n` and `m`. Uses Stephens' small-sample correction to the effective
/// size. Returns 1 if either sample is empty.
pub fn ks2sample_pvalue(d: f64, n: usize, m: usize) -> f64 {
    if n == 0 || m == 0 {
        return 1.0;
    }
    let (n, m) = (n as f64, m as f64);
    let ne = (n * m / (n + m)).sqrt();
    kolmogorov_sf((ne + 0.12 + 0.11 / ne) * d)
}
