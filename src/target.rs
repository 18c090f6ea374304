//! Built-in target densities.
//!
//! The densities are unnormalised the way they are usually written down
//! (the exponential is `exp(-x / tau)`, not `exp(-x / tau) / tau`), so the
//! hit-and-miss integral estimate has something to recover.
use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

use serde::{Deserialize, Serialize};
use special::Error as _;

use crate::bounds::{Domain, Envelope};
use crate::error::ConfigError;

/// A named one-dimensional target density
///
/// # Example
///
/// ```rust
/// use hitmiss::{Domain, Target};
///
/// let target = Target::Exponential { tau: 3.0 };
///
/// assert_eq!(target.default_domain(), Domain::new(0.0, 60.0));
/// assert_eq!(target.density(0.0), 1.0);
/// assert!(target.has_inv_cdf());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    /// `exp(-x / tau)` on `[0, inf)`
    Exponential { tau: f64 },
    /// `x` on `[0, upper]`
    Linear { upper: f64 },
    /// `exp(-(x - mu)^2 / (2 sigma^2))` on the real line
    Gaussian { mu: f64, sigma: f64 },
    /// `1 / (1 + ((x - x0) / gamma)^2)` on the real line
    Cauchy { x0: f64, gamma: f64 },
}

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exponential { .. } => "exponential",
            Self::Linear { .. } => "linear",
            Self::Gaussian { .. } => "gaussian",
            Self::Cauchy { .. } => "cauchy",
        }
    }

    /// Check that scale parameters are positive and locations finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidTarget(format!(
                    "{} requires a positive, finite {name}, got {value}",
                    self.name()
                )))
            }
        };
        let finite = |name: &str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidTarget(format!(
                    "{} requires a finite {name}, got {value}",
                    self.name()
                )))
            }
        };

        match *self {
            Self::Exponential { tau } => positive("tau", tau),
            Self::Linear { upper } => positive("upper", upper),
            Self::Gaussian { mu, sigma } => {
                finite("mu", mu)?;
                positive("sigma", sigma)
            }
            Self::Cauchy { x0, gamma } => {
                finite("x0", x0)?;
                positive("gamma", gamma)
            }
        }
    }

    /// The unnormalised density at `x`; zero outside the support
    pub fn density(&self, x: f64) -> f64 {
        match *self {
            Self::Exponential { tau } => {
                if x < 0.0 {
                    0.0
                } else {
                    (-x / tau).exp()
                }
            }
            Self::Linear { upper } => {
                if (0.0..=upper).contains(&x) {
                    x
                } else {
                    0.0
                }
            }
            Self::Gaussian { mu, sigma } => {
                let z = (x - mu) / sigma;
                (-0.5 * z * z).exp()
            }
            Self::Cauchy { x0, gamma } => {
                let z = (x - x0) / gamma;
                z.mul_add(z, 1.0).recip()
            }
        }
    }

    pub fn has_inv_cdf(&self) -> bool {
        !matches!(self, Self::Gaussian { .. })
    }

    /// The inverse of the normalised CDF over the full support, if it has a
    /// closed form
    pub fn inv_cdf(&self, u: f64) -> Option<f64> {
        match *self {
            Self::Exponential { tau } => Some(-tau * (-u).ln_1p()),
            Self::Linear { upper } => Some(upper * u.sqrt()),
            Self::Gaussian { .. } => None,
            Self::Cauchy { x0, gamma } => {
                Some(gamma.mul_add((PI * (u - 0.5)).tan(), x0))
            }
        }
    }

    /// The true support, possibly unbounded
    pub fn support(&self) -> Domain {
        match *self {
            Self::Exponential { .. } => Domain::unbounded_above(0.0),
            Self::Linear { upper } => Domain::new(0.0, upper),
            Self::Gaussian { .. } | Self::Cauchy { .. } => {
                Domain::new(f64::NEG_INFINITY, f64::INFINITY)
            }
        }
    }

    /// A finite domain holding all but a negligible part of the mass
    pub fn default_domain(&self) -> Domain {
        match *self {
            Self::Exponential { tau } => Domain::new(0.0, 20.0 * tau),
            Self::Linear { upper } => Domain::new(0.0, upper),
            Self::Gaussian { mu, sigma } => Domain::new(
                8.0_f64.mul_add(-sigma, mu),
                8.0_f64.mul_add(sigma, mu),
            ),
            Self::Cauchy { x0, gamma } => Domain::new(
                100.0_f64.mul_add(-gamma, x0),
                100.0_f64.mul_add(gamma, x0),
            ),
        }
    }

    /// `[0, max density]`, the tightest envelope of the form `[0, ymax]`
    pub fn default_envelope(&self) -> Envelope {
        match *self {
            Self::Linear { upper } => Envelope::from_max(upper),
            _ => Envelope::from_max(1.0),
        }
    }

    /// Closed-form integral of the unnormalised density over `domain`
    pub fn integral(&self, domain: &Domain) -> f64 {
        match *self {
            Self::Exponential { tau } => {
                let a = domain.xmin.max(0.0);
                let b = domain.xmax.max(a);
                tau * ((-a / tau).exp() - (-b / tau).exp())
            }
            Self::Linear { upper } => {
                let a = domain.xmin.clamp(0.0, upper);
                let b = domain.xmax.clamp(a, upper);
                0.5 * (b * b - a * a)
            }
            Self::Gaussian { mu, sigma } => {
                let scale = SQRT_2 * sigma;
                let erf = |x: f64| ((x - mu) / scale).error();
                sigma * FRAC_PI_2.sqrt() * (erf(domain.xmax) - erf(domain.xmin))
            }
            Self::Cauchy { x0, gamma } => {
                let atan = |x: f64| ((x - x0) / gamma).atan();
                gamma * (atan(domain.xmax) - atan(domain.xmin))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1E-10;

    #[test]
    fn exponential_integral() {
        let target = Target::Exponential { tau: 3.0 };
        let truth = 3.0 * (1.0 - (-20.0_f64).exp());
        assert_relative_eq!(
            target.integral(&target.default_domain()),
            truth,
            epsilon = TOL
        );
        assert_relative_eq!(
            target.integral(&target.support()),
            3.0,
            epsilon = TOL
        );
    }

    #[test]
    fn linear_integral() {
        let target = Target::Linear { upper: FRAC_PI_2 };
        assert_relative_eq!(
            target.integral(&target.default_domain()),
            PI * PI / 8.0,
            epsilon = TOL
        );
    }

    #[test]
    fn gaussian_integral_over_real_line() {
        let target = Target::Gaussian {
            mu: 1.0,
            sigma: 2.0,
        };
        let whole = Domain::new(f64::NEG_INFINITY, f64::INFINITY);
        assert_relative_eq!(
            target.integral(&whole),
            2.0 * (2.0 * PI).sqrt(),
            epsilon = 1E-8
        );
    }

    #[test]
    fn cauchy_integral_over_real_line() {
        let target = Target::Cauchy {
            x0: 0.0,
            gamma: 0.5,
        };
        assert_relative_eq!(
            target.integral(&target.support()),
            0.5 * PI,
            epsilon = TOL
        );
    }

    #[test]
    fn inv_cdf_inverts_the_normalised_cdf() {
        let exponential = Target::Exponential { tau: 3.0 };
        // CDF(x) = 1 - exp(-x / 3)
        let x = exponential.inv_cdf(0.5).unwrap();
        assert_relative_eq!(x, 3.0 * 2.0_f64.ln(), epsilon = TOL);

        let linear = Target::Linear { upper: 2.0 };
        // CDF(x) = x^2 / 4
        assert_relative_eq!(linear.inv_cdf(0.25).unwrap(), 1.0, epsilon = TOL);

        let cauchy = Target::Cauchy {
            x0: 1.0,
            gamma: 2.0,
        };
        assert_relative_eq!(cauchy.inv_cdf(0.5).unwrap(), 1.0, epsilon = TOL);
        assert_relative_eq!(cauchy.inv_cdf(0.75).unwrap(), 3.0, epsilon = TOL);

        let gaussian = Target::Gaussian {
            mu: 0.0,
            sigma: 1.0,
        };
        assert!(!gaussian.has_inv_cdf());
        assert_eq!(gaussian.inv_cdf(0.5), None);
    }

    #[test]
    fn default_envelopes_bound_the_densities() {
        let targets = [
            Target::Exponential { tau: 3.0 },
            Target::Linear { upper: 2.5 },
            Target::Gaussian {
                mu: -1.0,
                sigma: 0.5,
            },
            Target::Cauchy {
                x0: 2.0,
                gamma: 3.0,
            },
        ];
        for target in targets {
            let domain = target.default_domain();
            let envelope = target.default_envelope();
            let n = 1_000;
            for ix in 0..=n {
                let x = domain.xmin + domain.width() * ix as f64 / n as f64;
                let fx = target.density(x);
                assert!(fx >= envelope.ymin && fx <= envelope.ymax);
            }
        }
    }

    #[test]
    fn density_is_zero_outside_bounded_support() {
        assert_eq!(Target::Exponential { tau: 1.0 }.density(-0.1), 0.0);
        assert_eq!(Target::Linear { upper: 1.0 }.density(1.5), 0.0);
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(Target::Exponential { tau: 0.0 }.validate().is_err());
        assert!(Target::Linear { upper: -1.0 }.validate().is_err());
        assert!(Target::Gaussian {
            mu: f64::NAN,
            sigma: 1.0
        }
        .validate()
        .is_err());
        assert!(Target::Cauchy {
            x0: 0.0,
            gamma: f64::INFINITY
        }
        .validate()
        .is_err());
        assert!(Target::Exponential { tau: 3.0 }.validate().is_ok());
    }

    #[test]
    fn yaml_names_the_kind() {
        let target = Target::Cauchy {
            x0: 0.0,
            gamma: 2.0,
        };
        let yaml = serde_yaml::to_string(&target).unwrap();
        assert!(yaml.contains("kind: cauchy"));

        let back: Target = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, target);
    }

    #[test]
    fn json_names_the_kind() {
        let target: Target =
            serde_json::from_str(r#"{"kind": "exponential", "tau": 3.0}"#)
                .unwrap();
        assert_eq!(target, Target::Exponential { tau: 3.0 });
    }
}
