use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, ValueEnum};
use hitmiss::{Domain, Envelope, Method, RunConfig, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    Exponential,
    Linear,
    Gaussian,
    Cauchy,
}

/// A pair of bounds written `low,high`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds(pub f64, pub f64);

impl FromStr for Bounds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `low,high`, got '{s}'"))?;
        let parse = |x: &str| {
            x.trim()
                .parse::<f64>()
                .map_err(|err| format!("cannot parse '{x}': {err}"))
        };
        Ok(Self(parse(low)?, parse(high)?))
    }
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// The built-in target density
    #[clap(long, value_enum)]
    pub target: TargetKind,
    /// Scale of the exponential
    #[clap(long, default_value = "1.0")]
    pub tau: f64,
    /// Upper end of the linear density's support
    #[clap(long, default_value = "1.0")]
    pub upper: f64,
    /// Location of the gaussian
    #[clap(long, default_value = "0.0", allow_hyphen_values = true)]
    pub mu: f64,
    /// Scale of the gaussian
    #[clap(long, default_value = "1.0")]
    pub sigma: f64,
    /// Location of the cauchy
    #[clap(long, default_value = "0.0", allow_hyphen_values = true)]
    pub x0: f64,
    /// Scale of the cauchy
    #[clap(long, default_value = "1.0")]
    pub gamma: f64,
}

impl TargetArgs {
    pub fn target(&self) -> Target {
        match self.target {
            TargetKind::Exponential => Target::Exponential { tau: self.tau },
            TargetKind::Linear => Target::Linear { upper: self.upper },
            TargetKind::Gaussian => Target::Gaussian {
                mu: self.mu,
                sigma: self.sigma,
            },
            TargetKind::Cauchy => Target::Cauchy {
                x0: self.x0,
                gamma: self.gamma,
            },
        }
    }
}

#[derive(Parser, Debug)]
pub struct RejectArgs {
    #[clap(flatten)]
    pub target: TargetArgs,
    /// The number of samples to accept
    #[clap(short = 'n', long = "n-samples", default_value = "1000")]
    pub n_samples: usize,
    /// The PRNG seed
    #[clap(long)]
    pub seed: Option<u64>,
    /// Proposal domain as `xmin,xmax`. Defaults to the target's.
    #[clap(long, allow_hyphen_values = true)]
    pub domain: Option<Bounds>,
    /// Envelope as `ymin,ymax`. Defaults to `0,max density`.
    #[clap(long, allow_hyphen_values = true)]
    pub envelope: Option<Bounds>,
    /// Give up after this many proposals
    #[clap(long)]
    pub max_trials: Option<u64>,
    /// Grid points used to check that the target is not zero everywhere.
    /// Raise it for narrow targets; 0 skips the check.
    #[clap(long)]
    pub probe_points: Option<usize>,
    /// Save the run report here (.yaml or .json)
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl RejectArgs {
    pub fn run_config(&self) -> RunConfig {
        let method = Method::Rejection {
            domain: self.domain.map(|Bounds(a, b)| Domain::new(a, b)),
            envelope: self.envelope.map(|Bounds(a, b)| Envelope::new(a, b)),
            max_trials: self.max_trials,
            probe_points: self.probe_points,
        };
        let config = RunConfig::new(self.target.target())
            .n_samples(self.n_samples)
            .method(method);
        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TransformArgs {
    #[clap(flatten)]
    pub target: TargetArgs,
    /// The number of samples to draw
    #[clap(short = 'n', long = "n-samples", default_value = "1000")]
    pub n_samples: usize,
    /// The PRNG seed
    #[clap(long)]
    pub seed: Option<u64>,
    /// Save the run report here (.yaml or .json)
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl TransformArgs {
    pub fn run_config(&self) -> RunConfig {
        let config = RunConfig::new(self.target.target())
            .n_samples(self.n_samples)
            .transformation();
        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to a run config (.yaml or .json)
    #[clap(name = "CONFIG")]
    pub config: PathBuf,
    /// Save the run report here (.yaml or .json)
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[clap(
    name = "hitmiss",
    about = "Hit-and-miss and inverse-transform sampling",
    version
)]
pub enum Opt {
    /// Rejection sample a built-in target and estimate its integral
    #[clap(name = "reject")]
    Reject(RejectArgs),
    /// Sample a built-in target through its inverse CDF
    #[clap(name = "transform")]
    Transform(TransformArgs),
    /// Execute a run config file
    #[clap(name = "run")]
    Run(RunArgs),
}
