use serde::{Deserialize, Serialize};

/// An empirical CDF derived from samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalCdf {
    xs: Vec<f64>,
}

impl EmpiricalCdf {
    pub fn new(samples: &[f64]) -> Self {
        let mut xs = Vec::from(samples);
        xs.sort_unstable_by(|a, b| a.total_cmp(b));
        EmpiricalCdf { xs }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Fraction of the samples less than or equal to `x`
    pub fn cdf(&self, x: f64) -> f64 {
        let ix = self.xs.partition_point(|&probe| probe <= x);
        ix as f64 / self.xs.len() as f64
    }

    pub fn f(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&value| self.cdf(value)).collect()
    }

    /// The smallest sample `x` with `cdf(x) >= p`. `None` if there are no
    /// samples or `p` is outside [0, 1].
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if self.xs.is_empty() || !(0.0..=1.0).contains(&p) {
            return None;
        }
        let n = self.xs.len();
        let ix = ((p * n as f64).ceil() as usize).clamp(1, n) - 1;
        Some(self.xs[ix])
    }

    /// Both CDFs evaluated on the pooled, sorted samples
    pub fn pp(&self, other: &Self) -> (Vec<f64>, Vec<f64>) {
        let mut xys = self.xs.clone();
        xys.extend_from_slice(&other.xs);
        xys.sort_unstable_by(|a, b| a.total_cmp(b));
        (self.f(&xys), other.f(&xys))
    }
}
