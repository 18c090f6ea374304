//! The bounding box of a hit-and-miss sampler: a [`Domain`] in x and an
//! [`Envelope`] in y.
use serde::{Deserialize, Serialize};

use crate::error::SamplerError;

/// The support `[xmin, xmax]` proposals are drawn from
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Domain {
    pub xmin: f64,
    pub xmax: f64,
}

impl Domain {
    pub fn new(xmin: f64, xmax: f64) -> Self {
        Self { xmin, xmax }
    }

    /// A domain with no upper bound. It must be [truncated](Domain::truncate)
    /// before it can be used for rejection sampling.
    pub fn unbounded_above(xmin: f64) -> Self {
        Self {
            xmin,
            xmax: f64::INFINITY,
        }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn is_bounded(&self) -> bool {
        self.xmin.is_finite() && self.xmax.is_finite()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.xmin <= x && x <= self.xmax
    }

    /// Resolve the upper bound to at most `cutoff`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use hitmiss::Domain;
    /// let domain = Domain::unbounded_above(0.0).truncate(60.0).unwrap();
    /// assert_eq!(domain, Domain::new(0.0, 60.0));
    /// assert!(domain.is_bounded());
    /// ```
    pub fn truncate(self, cutoff: f64) -> Result<Self, SamplerError> {
        if !cutoff.is_finite() || cutoff <= self.xmin {
            return Err(SamplerError::InvalidEnvelope(format!(
                "cutoff {cutoff} does not lie above xmin = {}",
                self.xmin
            )));
        }
        Ok(Self {
            xmin: self.xmin,
            xmax: self.xmax.min(cutoff),
        })
    }

    pub(crate) fn check_ordered(&self) -> Result<(), SamplerError> {
        if self.xmin.is_nan() || self.xmax.is_nan() || self.xmin > self.xmax {
            Err(SamplerError::InvalidEnvelope(format!(
                "domain [{}, {}] is not ordered",
                self.xmin, self.xmax
            )))
        } else {
            Ok(())
        }
    }

    pub(crate) fn check_width(&self) -> Result<(), SamplerError> {
        if self.xmin == self.xmax {
            Err(SamplerError::DegenerateEnvelope(format!(
                "domain [{}, {}] has zero width",
                self.xmin, self.xmax
            )))
        } else {
            Ok(())
        }
    }

    /// Ordering and width checks. Infinite bounds are allowed here.
    pub(crate) fn validate(&self) -> Result<(), SamplerError> {
        self.check_ordered()?;
        self.check_width()
    }
}

/// The range `[ymin, ymax]` enclosing the graph of the target over its
/// domain.
///
/// Tightness is never checked: if the target exceeds `ymax` somewhere the
/// sampler still runs, but the samples under-represent that region and the
/// integral estimate comes out low.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    pub ymin: f64,
    pub ymax: f64,
}

impl Envelope {
    pub fn new(ymin: f64, ymax: f64) -> Self {
        Self { ymin, ymax }
    }

    /// The envelope `[0, ymax]`
    pub fn from_max(ymax: f64) -> Self {
        Self { ymin: 0.0, ymax }
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    fn check_ordered(&self) -> Result<(), SamplerError> {
        if !(self.ymin.is_finite() && self.ymax.is_finite())
            || self.ymin > self.ymax
        {
            Err(SamplerError::InvalidEnvelope(format!(
                "envelope [{}, {}] is not a finite ordered range",
                self.ymin, self.ymax
            )))
        } else {
            Ok(())
        }
    }

    fn check_height(&self) -> Result<(), SamplerError> {
        if self.ymin == self.ymax {
            Err(SamplerError::DegenerateEnvelope(format!(
                "envelope [{}, {}] has zero height",
                self.ymin, self.ymax
            )))
        } else if self.ymax <= 0.0 {
            Err(SamplerError::DegenerateEnvelope(format!(
                "envelope upper bound {} is not positive",
                self.ymax
            )))
        } else {
            Ok(())
        }
    }
}

/// Validate a bounding box for hit-and-miss sampling and return its area.
///
/// Malformed bounds are reported before unbounded ones, and both before
/// degenerate (zero-area) ones.
pub fn validate_box(
    domain: &Domain,
    envelope: &Envelope,
) -> Result<f64, SamplerError> {
    domain.check_ordered()?;
    envelope.check_ordered()?;

    if !domain.is_bounded() {
        return Err(SamplerError::UnboundedDomain {
            xmin: domain.xmin,
            xmax: domain.xmax,
        });
    }

    domain.check_width()?;
    envelope.check_height()?;

    let area = domain.width() * envelope.height();
    if area.is_finite() {
        Ok(area)
    } else {
        Err(SamplerError::InvalidEnvelope(format!(
            "bounding box area {area} is not finite"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn is_degenerate<T>(res: Result<T, SamplerError>) -> bool {
        matches!(res, Err(SamplerError::DegenerateEnvelope(_)))
    }

    fn is_invalid<T>(res: Result<T, SamplerError>) -> bool {
        matches!(res, Err(SamplerError::InvalidEnvelope(_)))
    }

    #[test]
    fn area_of_unit_box() {
        let area =
            validate_box(&Domain::new(0.0, 60.0), &Envelope::from_max(1.0))
                .unwrap();
        assert_relative_eq!(area, 60.0);
    }

    #[test]
    fn zero_height_envelope_is_degenerate() {
        let res =
            validate_box(&Domain::new(0.0, 1.0), &Envelope::new(0.0, 0.0));
        assert!(is_degenerate(res));
    }

    #[test]
    fn zero_width_domain_is_degenerate() {
        let res =
            validate_box(&Domain::new(2.0, 2.0), &Envelope::from_max(1.0));
        assert!(is_degenerate(res));
    }

    #[test]
    fn non_positive_ymax_is_degenerate() {
        let res =
            validate_box(&Domain::new(0.0, 1.0), &Envelope::new(-2.0, 0.0));
        assert!(is_degenerate(res));
    }

    #[test]
    fn reversed_bounds_are_invalid() {
        assert!(is_invalid(validate_box(
            &Domain::new(1.0, 0.0),
            &Envelope::from_max(1.0)
        )));
        assert!(is_invalid(validate_box(
            &Domain::new(0.0, 1.0),
            &Envelope::new(1.0, 0.5)
        )));
        assert!(is_invalid(validate_box(
            &Domain::new(f64::NAN, 1.0),
            &Envelope::from_max(1.0)
        )));
    }

    #[test]
    fn invalid_is_reported_before_degenerate() {
        let res =
            validate_box(&Domain::new(1.0, 1.0), &Envelope::new(1.0, 0.0));
        assert!(is_invalid(res));
    }

    #[test]
    fn unbounded_domain_must_be_truncated() {
        let domain = Domain::unbounded_above(0.0);
        let res = validate_box(&domain, &Envelope::from_max(1.0));
        assert!(matches!(res, Err(SamplerError::UnboundedDomain { .. })));

        let domain = domain.truncate(60.0).unwrap();
        assert!(validate_box(&domain, &Envelope::from_max(1.0)).is_ok());
    }

    #[test]
    fn truncate_keeps_a_tighter_upper_bound() {
        let domain = Domain::new(0.0, 10.0).truncate(60.0).unwrap();
        assert_eq!(domain.xmax, 10.0);
    }

    #[test]
    fn truncate_below_xmin_is_invalid() {
        assert!(is_invalid(Domain::unbounded_above(5.0).truncate(1.0)));
        assert!(is_invalid(Domain::unbounded_above(5.0).truncate(f64::NAN)));
    }

    #[test]
    fn domain_validate_allows_infinite_support() {
        assert!(Domain::unbounded_above(0.0).validate().is_ok());
        assert!(Domain::new(f64::NEG_INFINITY, f64::INFINITY)
            .validate()
            .is_ok());
    }

    #[test]
    fn domain_serde_yaml() {
        let domain: Domain = serde_yaml::from_str("xmin: 0.0\nxmax: 60.0\n")
            .unwrap();
        assert_eq!(domain, Domain::new(0.0, 60.0));
    }
}
