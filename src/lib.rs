//! Hit-and-miss and inverse-transform sampling of one-dimensional densities.
//!
//! The [`RejectionSampler`] needs only a target function and a bounding box.
//! Besides exactly `n` accepted samples it reports how many proposals that
//! took, which, times the box area, estimates the integral of the target over
//! the domain. The [`TransformationSampler`] needs the closed-form inverse CDF
//! and turns every uniform draw into one sample. Both take their randomness
//! from a seedable [`UniformSource`].
//!
//! # Example
//!
//! Estimate the integral of `exp(-x / 3)` over `[0, 60]`.
//!
//! ```rust
//! use hitmiss::{Domain, Envelope, RejectionSampler, UniformSource};
//!
//! let mut src = UniformSource::seed_from_u64(1337);
//!
//! let sampler = RejectionSampler::new(
//!     |x: f64| (-x / 3.0).exp(),
//!     Domain::unbounded_above(0.0).truncate(60.0).unwrap(),
//!     Envelope::from_max(1.0),
//! )
//! .unwrap();
//!
//! let run = sampler.sample(50_000, &mut src).unwrap();
//!
//! let err = (run.integral_estimate() - 3.0).abs();
//! assert!(err < 5.0 * run.integral_std_err());
//! ```
//!
//! The same target is faster to sample through its inverse CDF, and the
//! samples agree in distribution.
//!
//! ```rust
//! use hitmiss::{TransformationSampler, UniformSource};
//!
//! let mut src = UniformSource::seed_from_u64(1337);
//! let sampler = TransformationSampler::new(|u: f64| -3.0 * (-u).ln_1p());
//!
//! let samples = sampler.sample(50_000, &mut src).unwrap();
//! assert!((samples.mean() - 3.0).abs() < 0.1);
//! ```
#![warn(unused_extern_crates)]
#![warn(
    clippy::all,
    clippy::imprecise_flops,
    clippy::suboptimal_flops,
    clippy::unseparated_literal_suffix,
    clippy::unreadable_literal,
    clippy::option_option,
    clippy::implicit_clone
)]
mod bounds;
pub mod config;
pub mod error;
mod rejection;
mod sample_set;
mod target;
mod transform;
mod uniform;

pub use bounds::{validate_box, Domain, Envelope};
pub use config::{
    load_config, save_report, Method, RunConfig, RunReport, SerializedType,
};
pub use error::{ConfigError, SamplerError};
pub use rejection::{
    Proposal, Proposals, RejectionRun, RejectionSampler, Trial, Trials,
    DEFAULT_PROBE_POINTS,
};
pub use sample_set::SampleSet;
pub use target::Target;
pub use transform::TransformationSampler;
pub use uniform::{uniform_range, UniformSource};

pub use hitmiss_stats as stats;
pub use hitmiss_utils as utils;
