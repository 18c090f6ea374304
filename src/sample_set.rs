use hitmiss_utils::{mean, std, std_err, var, MinMax};
use serde::{Deserialize, Serialize};

/// The ordered output of one sampling run. Immutable once produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleSet {
    xs: Vec<f64>,
}

impl SampleSet {
    pub(crate) fn new(xs: Vec<f64>) -> Self {
        Self { xs }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.xs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.xs.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.xs
    }

    pub fn mean(&self) -> f64 {
        mean(&self.xs)
    }

    pub fn var(&self) -> f64 {
        var(&self.xs)
    }

    pub fn std(&self) -> f64 {
        std(&self.xs)
    }

    /// Standard error of the sample mean
    pub fn std_err(&self) -> f64 {
        std_err(&self.xs)
    }

    /// Smallest and largest sample, `None` if empty
    pub fn minmax(&self) -> Option<(f64, f64)> {
        self.xs.iter().copied().minmax()
    }
}

impl AsRef<[f64]> for SampleSet {
    fn as_ref(&self) -> &[f64] {
        &self.xs
    }
}

impl From<SampleSet> for Vec<f64> {
    fn from(samples: SampleSet) -> Self {
        samples.xs
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.xs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn moments() {
        let samples = SampleSet::new(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples.mean(), 2.0, epsilon = 1E-12);
        assert_relative_eq!(samples.var(), 2.0, epsilon = 1E-12);
        assert_eq!(samples.minmax(), Some((0.0, 4.0)));
    }

    #[test]
    fn empty_set() {
        let samples = SampleSet::default();
        assert!(samples.is_empty());
        assert_eq!(samples.minmax(), None);
    }

    #[test]
    fn serializes_as_plain_list() {
        let samples = SampleSet::new(vec![0.5, 1.5]);
        let json = serde_json::to_string(&samples).unwrap();
        assert_eq!(json, "[0.5,1.5]");
    }
}
