use std::io;

use thiserror::Error;

/// Errors that can arise while drawing uniforms or running a sampler
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SamplerError {
    /// The uniform source was asked for draws on an empty or non-finite
    /// interval
    #[error("invalid uniform range [{low}, {high})")]
    InvalidRange { low: f64, high: f64 },
    /// The domain or envelope bounds are out of order or NaN
    #[error("invalid bounding box: {0}")]
    InvalidEnvelope(String),
    /// The domain still carries an infinite bound. Truncate it first.
    #[error(
        "cannot sample on the unbounded domain [{xmin}, {xmax}]; truncate it \
        to a finite cutoff first"
    )]
    UnboundedDomain { xmin: f64, xmax: f64 },
    /// No proposal could ever be accepted
    #[error("degenerate envelope: {0}")]
    DegenerateEnvelope(String),
    /// The target function or inverse CDF returned a non-finite value, or
    /// an inverse CDF left its declared support
    #[error("evaluation at {input} returned the invalid value {value}")]
    EvaluationError { input: f64, value: f64 },
    /// Asked the rejection sampler for zero samples
    #[error("rejection sampling requires at least one sample")]
    NoSamplesRequested,
    /// The optional trial cap was hit before enough samples were accepted
    #[error(
        "hit the limit of {max_trials} trials with only {n_accepted} \
        samples accepted"
    )]
    TrialLimitExceeded { max_trials: u64, n_accepted: usize },
}

/// Errors that can arise loading, running, or saving a run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IoError: {0}")]
    Io(#[from] io::Error),
    #[error("YamlError: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JsonError: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "Unsupported file extension `{0}`. Options are `yaml`, `yml`, and \
        `json`."
    )]
    UnsupportedExtension(String),
    /// A built-in target was given out-of-range parameters
    #[error("invalid target parameters: {0}")]
    InvalidTarget(String),
    /// Transformation sampling needs a closed-form inverse CDF
    #[error("target `{0}` has no closed-form inverse CDF")]
    NoInverseCdf(String),
    #[error("sampler error: {0}")]
    Sampler(#[from] SamplerError),
}
