//! Serializable descriptions of sampling runs and their reports
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::bounds::{Domain, Envelope};
use crate::error::ConfigError;
use crate::rejection::{RejectionSampler, DEFAULT_PROBE_POINTS};
use crate::sample_set::SampleSet;
use crate::target::Target;
use crate::transform::TransformationSampler;
use crate::uniform::UniformSource;

/// Number of samples a new [`RunConfig`] asks for
pub const DEFAULT_N_SAMPLES: usize = 1_000;

/// Which sampler a run uses
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Method {
    /// Hit-and-miss sampling. Missing bounds fall back to the target's
    /// default domain and envelope.
    Rejection {
        #[serde(default)]
        domain: Option<Domain>,
        #[serde(default)]
        envelope: Option<Envelope>,
        #[serde(default)]
        max_trials: Option<u64>,
        /// Resolution of the all-zero target check. `None` uses
        /// `DEFAULT_PROBE_POINTS`, `Some(0)` skips the check.
        #[serde(default)]
        probe_points: Option<usize>,
    },
    /// Inversion through the target's closed-form inverse CDF
    Transformation,
}

impl Method {
    pub fn rejection() -> Self {
        Self::Rejection {
            domain: None,
            envelope: None,
            max_trials: None,
            probe_points: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rejection { .. } => "rejection",
            Self::Transformation => "transformation",
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Self::rejection()
    }
}

/// Configuration for one sampling run
///
/// # Example
///
/// ```rust
/// use hitmiss::{Domain, RunConfig, Target};
///
/// let report = RunConfig::new(Target::Exponential { tau: 3.0 })
///     .n_samples(5_000)
///     .seed(1337)
///     .domain(Domain::new(0.0, 60.0))
///     .run()
///     .unwrap();
///
/// assert_eq!(report.samples.len(), 5_000);
/// assert_eq!(report.seed, 1337);
/// assert!((report.integral_estimate.unwrap() - 3.0).abs() < 0.3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Seed of the uniform source. Drawn at random when absent and reported.
    #[serde(default)]
    pub seed: Option<u64>,
    pub n_samples: usize,
    pub target: Target,
    #[serde(default)]
    pub method: Method,
}

impl RunConfig {
    pub fn new(target: Target) -> Self {
        Self {
            seed: None,
            n_samples: DEFAULT_N_SAMPLES,
            target,
            method: Method::default(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn transformation(self) -> Self {
        self.method(Method::Transformation)
    }

    /// Rejection sampling on `domain`. Switches the method to rejection.
    pub fn domain(mut self, domain: Domain) -> Self {
        if let Method::Rejection { domain: dom, .. } = self.rejection_method()
        {
            *dom = Some(domain);
        }
        self
    }

    /// Rejection sampling under `envelope`. Switches the method to
    /// rejection.
    pub fn envelope(mut self, envelope: Envelope) -> Self {
        if let Method::Rejection { envelope: env, .. } =
            self.rejection_method()
        {
            *env = Some(envelope);
        }
        self
    }

    /// Cap the number of rejection trials. Switches the method to
    /// rejection.
    pub fn max_trials(mut self, max_trials: Option<u64>) -> Self {
        if let Method::Rejection { max_trials: cap, .. } =
            self.rejection_method()
        {
            *cap = max_trials;
        }
        self
    }

    /// Set the resolution of the all-zero target check, `Some(0)` to skip
    /// it. Switches the method to rejection.
    pub fn probe_points(mut self, probe_points: Option<usize>) -> Self {
        if let Method::Rejection {
            probe_points: points,
            ..
        } = self.rejection_method()
        {
            *points = probe_points;
        }
        self
    }

    fn rejection_method(&mut self) -> &mut Method {
        if self.method == Method::Transformation {
            self.method = Method::rejection();
        }
        &mut self.method
    }

    /// Execute the run
    pub fn run(&self) -> Result<RunReport, ConfigError> {
        self.target.validate()?;

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut src = UniformSource::seed_from_u64(seed);
        let target = self.target;
        info!(
            "running {} sampling of {} with seed {seed}",
            self.method.name(),
            target.name()
        );

        match self.method {
            Method::Rejection {
                domain,
                envelope,
                max_trials,
                probe_points,
            } => {
                let domain = domain.unwrap_or_else(|| target.default_domain());
                let envelope =
                    envelope.unwrap_or_else(|| target.default_envelope());
                let sampler = RejectionSampler::with_probe_points(
                    move |x: f64| target.density(x),
                    domain,
                    envelope,
                    probe_points.unwrap_or(DEFAULT_PROBE_POINTS),
                )?
                .max_trials(max_trials);
                let run = sampler.sample(self.n_samples, &mut src)?;

                Ok(RunReport {
                    seed,
                    method: self.method.name().to_owned(),
                    target,
                    n_samples: self.n_samples,
                    domain: Some(domain),
                    envelope: Some(envelope),
                    n_trials: Some(run.n_trials()),
                    efficiency: Some(run.efficiency()),
                    integral_estimate: Some(run.integral_estimate()),
                    integral_std_err: Some(run.integral_std_err()),
                    analytic_integral: target.integral(&domain),
                    mean: moment(run.samples(), SampleSet::mean),
                    std: moment(run.samples(), SampleSet::std),
                    samples: run.into_samples(),
                })
            }
            Method::Transformation => {
                if !target.has_inv_cdf() {
                    return Err(ConfigError::NoInverseCdf(
                        target.name().to_owned(),
                    ));
                }
                let support = target.support();
                let sampler = TransformationSampler::new(move |u: f64| {
                    target.inv_cdf(u).unwrap_or(f64::NAN)
                })
                .with_support(support)?;
                let samples = sampler.sample(self.n_samples, &mut src)?;

                Ok(RunReport {
                    seed,
                    method: self.method.name().to_owned(),
                    target,
                    n_samples: self.n_samples,
                    domain: None,
                    envelope: None,
                    n_trials: None,
                    efficiency: None,
                    integral_estimate: None,
                    integral_std_err: None,
                    analytic_integral: target.integral(&support),
                    mean: moment(&samples, SampleSet::mean),
                    std: moment(&samples, SampleSet::std),
                    samples,
                })
            }
        }
    }
}

fn moment(samples: &SampleSet, f: fn(&SampleSet) -> f64) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(f(samples))
    }
}

/// The outcome of [`RunConfig::run`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// The seed actually used, so any run can be repeated
    pub seed: u64,
    pub method: String,
    pub target: Target,
    pub n_samples: usize,
    pub domain: Option<Domain>,
    pub envelope: Option<Envelope>,
    pub n_trials: Option<u64>,
    pub efficiency: Option<f64>,
    pub integral_estimate: Option<f64>,
    pub integral_std_err: Option<f64>,
    /// Closed-form integral of the target over the sampled domain, or over
    /// the full support for transformation runs
    pub analytic_integral: f64,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub samples: SampleSet,
}

/// File formats for configs and reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerializedType {
    Yaml,
    Json,
}

impl FromStr for SerializedType {
    type Err = ConfigError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        match ext {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedExtension(ext.to_owned())),
        }
    }
}

impl SerializedType {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ConfigError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Invalid file type",
                ))
            })?;
        Self::from_str(ext)
    }
}

/// Write `obj` as YAML or JSON depending on the extension of `path`
pub fn serialize_obj<T, P>(obj: &T, path: P) -> Result<(), ConfigError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let bytes = match SerializedType::from_path(&path)? {
        SerializedType::Yaml => serde_yaml::to_string(obj)?.into_bytes(),
        SerializedType::Json => serde_json::to_vec_pretty(obj)?,
    };
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    let mut writer = io::BufWriter::new(file);
    writer.write_all(&bytes)?;
    Ok(())
}

/// Read a YAML or JSON file depending on the extension of `path`
pub fn deserialize_file<T, P>(path: P) -> Result<T, ConfigError>
where
    for<'de> T: Deserialize<'de>,
    P: AsRef<Path>,
{
    let serialized_type = SerializedType::from_path(&path)?;
    let mut file = io::BufReader::new(fs::File::open(path)?);
    let mut ser = String::new();
    file.read_to_string(&mut ser)?;

    let obj = match serialized_type {
        SerializedType::Yaml => serde_yaml::from_str(&ser)?,
        SerializedType::Json => serde_json::from_str(&ser)?,
    };
    Ok(obj)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    info!("Loading run config at {:?}...", path.as_ref());
    deserialize_file(path)
}

pub fn save_config<P: AsRef<Path>>(
    config: &RunConfig,
    path: P,
) -> Result<(), ConfigError> {
    serialize_obj(config, path)
}

pub fn save_report<P: AsRef<Path>>(
    report: &RunReport,
    path: P,
) -> Result<(), ConfigError> {
    info!("Saving run report to {:?}...", path.as_ref());
    serialize_obj(report, path)
}

pub fn load_report<P: AsRef<Path>>(path: P) -> Result<RunReport, ConfigError> {
    deserialize_file(path)
}
