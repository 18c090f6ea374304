//! Seedable uniform deviates, the only source of randomness for both
//! samplers.
use log::debug;
use rand::distributions::{Distribution, Open01, Uniform};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::error::SamplerError;

/// The uniform distribution over `[low, high)`.
///
/// Fails with `InvalidRange` if `low >= high` or if the interval or its width
/// is not finite.
pub fn uniform_range(
    low: f64,
    high: f64,
) -> Result<Uniform<f64>, SamplerError> {
    let finite = low.is_finite() && high.is_finite();
    if finite && low < high && (high - low).is_finite() {
        Ok(Uniform::new(low, high))
    } else {
        Err(SamplerError::InvalidRange { low, high })
    }
}

/// A generator of uniform deviates over arbitrary intervals.
///
/// The source owns its generator. Samplers borrow it mutably for the length
/// of a run, so access is serialized by construction; callers wanting
/// parallel runs should give each run its own independently seeded source.
///
/// # Example
///
/// ```rust
/// use hitmiss::UniformSource;
///
/// let mut src_a = UniformSource::seed_from_u64(1337);
/// let mut src_b = UniformSource::seed_from_u64(1337);
///
/// let x = src_a.draw(-1.0, 1.0).unwrap();
/// assert!((-1.0..1.0).contains(&x));
/// assert_eq!(x, src_b.draw(-1.0, 1.0).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct UniformSource<R = Xoshiro256Plus> {
    rng: R,
    seed: Option<u64>,
}

impl UniformSource {
    /// A source in the deterministic state given by `seed`
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::with_seed(seed)
    }

    /// A source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: Xoshiro256Plus::from_entropy(),
            seed: None,
        }
    }
}

impl<R: SeedableRng> UniformSource<R> {
    /// A source over any seedable generator in the state given by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: R::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Put the source back into the deterministic state given by `value`
    pub fn seed(&mut self, value: u64) {
        debug!("reseeding uniform source with {value}");
        self.rng = R::seed_from_u64(value);
        self.seed = Some(value);
    }
}

impl<R: Rng> UniformSource<R> {
    /// Wrap an existing generator. The seed is unknown.
    pub fn from_rng(rng: R) -> Self {
        Self { rng, seed: None }
    }

    /// The last seed explicitly given to this source, if any
    pub fn seed_value(&self) -> Option<u64> {
        self.seed
    }

    /// One draw from a pre-validated [`uniform_range`]
    #[inline]
    pub fn draw_from(&mut self, range: &Uniform<f64>) -> f64 {
        range.sample(&mut self.rng)
    }

    /// One draw in `[low, high)`
    pub fn draw(&mut self, low: f64, high: f64) -> Result<f64, SamplerError> {
        let range = uniform_range(low, high)?;
        Ok(self.draw_from(&range))
    }

    /// `count` independent draws in `[low, high)`.
    ///
    /// Consumes the generator exactly as `count` calls to
    /// [`draw`](UniformSource::draw) would.
    pub fn draw_many(
        &mut self,
        low: f64,
        high: f64,
        count: usize,
    ) -> Result<Vec<f64>, SamplerError> {
        let range = uniform_range(low, high)?;
        Ok((0..count).map(|_| self.draw_from(&range)).collect())
    }

    /// One draw in the open interval `(0, 1)`. Never returns 0 or 1.
    #[inline]
    pub fn draw_open_unit(&mut self) -> f64 {
        self.rng.sample(Open01)
    }

    /// Direct access to the underlying generator
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
