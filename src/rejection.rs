//! Hit-and-miss (accept-reject) sampling with integral estimation.
//!
//! Proposals `(x, y)` are drawn uniformly from the bounding box
//! `[xmin, xmax) x [ymin, ymax)` and `x` is kept when `y < f(x)`. The fraction
//! of kept proposals times the box area estimates the integral of `f` over
//! the domain.
use hitmiss_utils::linspace;
use log::{debug, info};
use rand::distributions::Uniform;
use rand::Rng;
use serde::Serialize;

use crate::bounds::{validate_box, Domain, Envelope};
use crate::error::SamplerError;
use crate::sample_set::SampleSet;
use crate::uniform::UniformSource;

/// Number of grid points used to check that the target is not identically
/// zero before sampling
pub const DEFAULT_PROBE_POINTS: usize = 128;

/// A proposal point in the bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proposal {
    pub x: f64,
    pub y: f64,
}

/// An evaluated proposal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trial {
    pub x: f64,
    pub y: f64,
    /// The target evaluated at `x`
    pub fx: f64,
    /// `y < fx`. Points exactly on the curve are rejected.
    pub accepted: bool,
}

/// Endless stream of uniform proposals over a bounding box. Each proposal
/// draws `x` first, then `y`.
pub struct Proposals<'s, R> {
    src: &'s mut UniformSource<R>,
    xs: Uniform<f64>,
    ys: Uniform<f64>,
}

impl<'s, R: Rng> Iterator for Proposals<'s, R> {
    type Item = Proposal;

    fn next(&mut self) -> Option<Proposal> {
        let x = self.src.draw_from(&self.xs);
        let y = self.src.draw_from(&self.ys);
        Some(Proposal { x, y })
    }
}

/// Proposals evaluated against the target, with a running trial count.
///
/// A non-finite target value fails only its own trial; the next call draws
/// a fresh proposal. Once the optional trial cap is reached every call
/// yields [`SamplerError::TrialLimitExceeded`]. [`RejectionSampler::sample`]
/// stops at the first error of either kind.
pub struct Trials<'a, 's, F, R> {
    target: &'a F,
    proposals: Proposals<'s, R>,
    n_trials: u64,
    n_accepted: usize,
    max_trials: Option<u64>,
}

impl<'a, 's, F, R> Trials<'a, 's, F, R> {
    /// Proposals generated so far, accepted or not
    pub fn n_trials(&self) -> u64 {
        self.n_trials
    }

    pub fn n_accepted(&self) -> usize {
        self.n_accepted
    }
}

impl<'a, 's, F, R> Iterator for Trials<'a, 's, F, R>
where
    F: Fn(f64) -> f64,
    R: Rng,
{
    type Item = Result<Trial, SamplerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(max_trials) = self.max_trials {
            if self.n_trials >= max_trials {
                return Some(Err(SamplerError::TrialLimitExceeded {
                    max_trials,
                    n_accepted: self.n_accepted,
                }));
            }
        }

        let Proposal { x, y } = self.proposals.next()?;
        self.n_trials += 1;

        let fx = (self.target)(x);
        if !fx.is_finite() {
            return Some(Err(SamplerError::EvaluationError {
                input: x,
                value: fx,
            }));
        }

        let accepted = y < fx;
        if accepted {
            self.n_accepted += 1;
        }
        Some(Ok(Trial { x, y, fx, accepted }))
    }
}

/// The result of a rejection sampling run. Reports are loaded back as
/// [`RunReport`](crate::config::RunReport), so this only serializes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RejectionRun {
    samples: SampleSet,
    n_trials: u64,
    domain: Domain,
    envelope: Envelope,
}

impl RejectionRun {
    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn into_samples(self) -> SampleSet {
        self.samples
    }

    /// Every proposal generated during the run, accepted or rejected
    pub fn n_trials(&self) -> u64 {
        self.n_trials
    }

    pub fn n_accepted(&self) -> usize {
        self.samples.len()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Fraction of proposals accepted
    pub fn efficiency(&self) -> f64 {
        self.n_accepted() as f64 / self.n_trials as f64
    }

    pub fn envelope_area(&self) -> f64 {
        self.domain.width() * self.envelope.height()
    }

    /// Hit-and-miss estimate of the integral of the target over the domain
    pub fn integral_estimate(&self) -> f64 {
        self.efficiency() * self.envelope_area()
    }

    /// Binomial standard error of
    /// [`integral_estimate`](RejectionRun::integral_estimate)
    pub fn integral_std_err(&self) -> f64 {
        let eff = self.efficiency();
        self.envelope_area() * (eff * (1.0 - eff) / self.n_trials as f64).sqrt()
    }
}

/// Accept-reject sampler for a target with a known bounding box.
///
/// The envelope must really bound the target over the domain. That is not
/// checked: an envelope that is too low biases the samples and the integral
/// estimate without raising an error. A malformed envelope under which
/// almost nothing is accepted can also run for a very long time;
/// [`max_trials`](RejectionSampler::max_trials) caps the run if that is a
/// concern.
///
/// # Example
///
/// ```rust
/// use hitmiss::{Domain, Envelope, RejectionSampler, UniformSource};
///
/// let mut src = UniformSource::seed_from_u64(1337);
/// let sampler = RejectionSampler::new(
///     |x: f64| (-x / 3.0).exp(),
///     Domain::new(0.0, 60.0),
///     Envelope::new(0.0, 1.0),
/// )
/// .unwrap();
///
/// let run = sampler.sample(10_000, &mut src).unwrap();
///
/// assert_eq!(run.samples().len(), 10_000);
/// assert!((run.integral_estimate() - 3.0).abs() < 0.3);
/// ```
#[derive(Clone, Debug)]
pub struct RejectionSampler<F> {
    target: F,
    domain: Domain,
    envelope: Envelope,
    max_trials: Option<u64>,
}

impl<F> RejectionSampler<F>
where
    F: Fn(f64) -> f64,
{
    /// Validate the bounding box and probe the target for degeneracy with
    /// [`DEFAULT_PROBE_POINTS`] points.
    pub fn new(
        target: F,
        domain: Domain,
        envelope: Envelope,
    ) -> Result<Self, SamplerError> {
        Self::with_probe_points(target, domain, envelope, DEFAULT_PROBE_POINTS)
    }

    /// Like [`new`](RejectionSampler::new) with a custom probe resolution.
    /// Zero disables the probe.
    ///
    /// The probe evaluates the target at the midpoints of `probe_points`
    /// equal cells of the domain and fails with `DegenerateEnvelope` if none
    /// of the values lies above `max(ymin, 0)`. A target that is non-zero
    /// only on a region narrower than one cell may be reported as
    /// degenerate; use a finer probe for such targets.
    pub fn with_probe_points(
        target: F,
        domain: Domain,
        envelope: Envelope,
        probe_points: usize,
    ) -> Result<Self, SamplerError> {
        validate_box(&domain, &envelope)?;
        if probe_points > 0 {
            probe(&target, &domain, &envelope, probe_points)?;
        }
        Ok(Self {
            target,
            domain,
            envelope,
            max_trials: None,
        })
    }

    /// Abort a run with `TrialLimitExceeded` after this many proposals
    #[must_use]
    pub fn max_trials(mut self, max_trials: Option<u64>) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn envelope_area(&self) -> f64 {
        self.domain.width() * self.envelope.height()
    }

    /// The target evaluated at `x`
    pub fn target(&self, x: f64) -> f64 {
        (self.target)(x)
    }

    /// A fresh, endless stream of proposals over the bounding box
    pub fn proposals<'s, R: Rng>(
        &self,
        src: &'s mut UniformSource<R>,
    ) -> Proposals<'s, R> {
        // bounds were validated on construction
        let xs = Uniform::new(self.domain.xmin, self.domain.xmax);
        let ys = Uniform::new(self.envelope.ymin, self.envelope.ymax);
        Proposals { src, xs, ys }
    }

    /// A fresh stream of evaluated proposals with its trial counter at zero
    pub fn trials<'a, 's, R: Rng>(
        &'a self,
        src: &'s mut UniformSource<R>,
    ) -> Trials<'a, 's, F, R> {
        Trials {
            target: &self.target,
            proposals: self.proposals(src),
            n_trials: 0,
            n_accepted: 0,
            max_trials: self.max_trials,
        }
    }

    /// Draw exactly `n` accepted samples
    pub fn sample<R: Rng>(
        &self,
        n: usize,
        src: &mut UniformSource<R>,
    ) -> Result<RejectionRun, SamplerError> {
        if n == 0 {
            return Err(SamplerError::NoSamplesRequested);
        }
        debug!(
            "rejection sampling {n} values on {:?} under {:?}",
            self.domain, self.envelope
        );

        let mut trials = self.trials(src);
        let xs = trials
            .by_ref()
            .filter_map(|trial| match trial {
                Ok(trial) if trial.accepted => Some(Ok(trial.x)),
                Ok(_) => None,
                Err(err) => Some(Err(err)),
            })
            .take(n)
            .collect::<Result<Vec<f64>, SamplerError>>()?;
        let n_trials = trials.n_trials();

        let run = RejectionRun {
            samples: SampleSet::new(xs),
            n_trials,
            domain: self.domain,
            envelope: self.envelope,
        };
        info!(
            "accepted {} of {} proposals (efficiency {:.4}), integral {:.6}",
            run.n_accepted(),
            run.n_trials(),
            run.efficiency(),
            run.integral_estimate(),
        );
        Ok(run)
    }
}

fn probe<F: Fn(f64) -> f64>(
    target: &F,
    domain: &Domain,
    envelope: &Envelope,
    n_points: usize,
) -> Result<(), SamplerError> {
    let floor = envelope.ymin.max(0.0);
    let edges = linspace(domain.xmin, domain.xmax, n_points + 1);
    for x in edges.windows(2).map(|w| 0.5 * (w[0] + w[1])) {
        let fx = target(x);
        if !fx.is_finite() {
            return Err(SamplerError::EvaluationError {
                input: x,
                value: fx,
            });
        }
        if fx > floor {
            return Ok(());
        }
    }
    Err(SamplerError::DegenerateEnvelope(format!(
        "target never exceeds {floor} on {n_points} probe points of \
        [{}, {}]",
        domain.xmin, domain.xmax
    )))
}
