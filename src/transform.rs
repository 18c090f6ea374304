//! Direct inversion sampling through a closed-form inverse CDF.
use log::debug;
use rand::Rng;

use crate::bounds::Domain;
use crate::error::SamplerError;
use crate::sample_set::SampleSet;
use crate::uniform::UniformSource;

/// Draws samples by pushing open-interval uniforms through an inverse CDF.
///
/// Every uniform draw produces exactly one sample, so the efficiency is 1.
/// The inverse CDF must be the exact, monotone inverse of the target's CDF;
/// that is not checked. Uniforms never take the values 0 or 1, so inverse
/// CDFs of unbounded supports are never evaluated at their poles.
///
/// # Example
///
/// ```rust
/// use hitmiss::{TransformationSampler, UniformSource};
///
/// let mut src = UniformSource::seed_from_u64(1337);
/// let exponential = TransformationSampler::new(|u: f64| -3.0 * (-u).ln_1p());
///
/// let samples = exponential.sample(1_000, &mut src).unwrap();
/// assert_eq!(samples.len(), 1_000);
/// assert!(samples.iter().all(|&x| x > 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct TransformationSampler<F> {
    inv_cdf: F,
    support: Option<Domain>,
}

impl<F> TransformationSampler<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(inv_cdf: F) -> Self {
        Self {
            inv_cdf,
            support: None,
        }
    }

    /// Declare the support of the target. Transformed values outside of it
    /// are reported as evaluation errors. Infinite bounds are allowed.
    pub fn with_support(
        mut self,
        support: Domain,
    ) -> Result<Self, SamplerError> {
        support.validate()?;
        self.support = Some(support);
        Ok(self)
    }

    pub fn support(&self) -> Option<&Domain> {
        self.support.as_ref()
    }

    /// The inverse CDF at `u`, checked for finiteness and support
    pub fn transform(&self, u: f64) -> Result<f64, SamplerError> {
        let x = (self.inv_cdf)(u);
        let in_support = self.support.map_or(true, |dom| dom.contains(x));
        if x.is_finite() && in_support {
            Ok(x)
        } else {
            Err(SamplerError::EvaluationError {
                input: u,
                value: x,
            })
        }
    }

    /// Draw `n` samples. Fails on the first invalid evaluation.
    pub fn sample<R: Rng>(
        &self,
        n: usize,
        src: &mut UniformSource<R>,
    ) -> Result<SampleSet, SamplerError> {
        debug!("transformation sampling {n} values");
        let xs = (0..n)
            .map(|_| self.transform(src.draw_open_unit()))
            .collect::<Result<Vec<f64>, SamplerError>>()?;
        Ok(SampleSet::new(xs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn exponential(u: f64) -> f64 {
        -3.0 * (-u).ln_1p()
    }

    #[test]
    fn zero_samples_is_empty() {
        let mut src = UniformSource::seed_from_u64(0);
        let samples = TransformationSampler::new(exponential)
            .sample(0, &mut src)
            .unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn sample_count_is_exact() {
        let mut src = UniformSource::seed_from_u64(0);
        let sampler = TransformationSampler::new(exponential);
        for n in [1, 7, 1_000] {
            assert_eq!(sampler.sample(n, &mut src).unwrap().len(), n);
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let sampler = TransformationSampler::new(exponential);
        let xs_a = sampler
            .sample(500, &mut UniformSource::seed_from_u64(17))
            .unwrap();
        let xs_b = sampler
            .sample(500, &mut UniformSource::seed_from_u64(17))
            .unwrap();
        assert_eq!(xs_a, xs_b);
    }

    #[test]
    fn exponential_moments() {
        let mut src = UniformSource::seed_from_u64(1337);
        let samples = TransformationSampler::new(exponential)
            .sample(100_000, &mut src)
            .unwrap();
        // standard error of the mean is 3 / sqrt(1e5) ~ 0.0095
        assert_relative_eq!(samples.mean(), 3.0, epsilon = 0.05);
        assert_relative_eq!(samples.var(), 9.0, epsilon = 0.5);
    }

    #[test]
    fn log_pole_is_never_hit() {
        let mut src = UniformSource::seed_from_u64(2);
        let sampler = TransformationSampler::new(|u: f64| -u.ln());
        let samples = sampler.sample(100_000, &mut src).unwrap();
        assert!(samples.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn nan_inverse_is_an_evaluation_error() {
        let mut src = UniformSource::seed_from_u64(2);
        let sampler = TransformationSampler::new(|u: f64| (u - 2.0).sqrt());
        let res = sampler.sample(10, &mut src);
        assert!(matches!(res, Err(SamplerError::EvaluationError { .. })));
    }

    #[test]
    fn leaving_the_support_is_an_evaluation_error() {
        let mut src = UniformSource::seed_from_u64(2);
        let sampler = TransformationSampler::new(|u: f64| 2.0 * u)
            .with_support(Domain::new(0.0, 1.0))
            .unwrap();
        let res = sampler.sample(1_000, &mut src);
        assert!(matches!(res, Err(SamplerError::EvaluationError { .. })));
    }

    #[test]
    fn unbounded_support_is_allowed() {
        let mut src = UniformSource::seed_from_u64(2);
        let sampler = TransformationSampler::new(exponential)
            .with_support(Domain::unbounded_above(0.0))
            .unwrap();
        assert_eq!(sampler.sample(100, &mut src).unwrap().len(), 100);
    }

    #[test]
    fn zero_width_support_is_degenerate() {
        let res = TransformationSampler::new(exponential)
            .with_support(Domain::new(1.0, 1.0));
        assert!(matches!(res, Err(SamplerError::DegenerateEnvelope(_))));
    }
}
