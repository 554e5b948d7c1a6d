//! Tunables for the size-targeting search.

use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Search configuration.
///
/// Deserializes from partial input; missing fields take the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetSizeOptions {
    /// Maximum encode attempts in the shrink regime.
    pub max_iterations: u32,
    /// Quality the shrink regime starts from.
    pub initial_quality: f64,
    /// Relative half-width of the acceptance band around the target.
    pub tolerance: f64,
    /// Upper bound for either output dimension when growing.
    pub max_dimension: u32,
}

impl Default for TargetSizeOptions {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            initial_quality: 0.9,
            tolerance: 0.05,
            max_dimension: 16_384,
        }
    }
}

impl TargetSizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), FitError> {
        if self.max_iterations == 0 {
            return Err(FitError::InvalidOptions(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !(self.initial_quality > 0.0 && self.initial_quality <= 1.0) {
            return Err(FitError::InvalidOptions(format!(
                "initial_quality must be in (0, 1], got {}",
                self.initial_quality
            )));
        }
        if !(0.0..1.0).contains(&self.tolerance) {
            return Err(FitError::InvalidOptions(format!(
                "tolerance must be in [0, 1), got {}",
                self.tolerance
            )));
        }
        if self.max_dimension == 0 {
            return Err(FitError::InvalidOptions(
                "max_dimension must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Whether `size` falls inside the acceptance band around `target`.
    pub fn within_tolerance(&self, size: usize, target: usize) -> bool {
        (size as f64 - target as f64).abs() <= target as f64 * self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = TargetSizeOptions::new();
        assert_eq!(opts.max_iterations, 20);
        assert!((opts.initial_quality - 0.9).abs() < f64::EPSILON);
        assert!((opts.tolerance - 0.05).abs() < f64::EPSILON);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_within_tolerance_band() {
        let opts = TargetSizeOptions::default();
        assert!(opts.within_tolerance(100_000, 100_000));
        assert!(opts.within_tolerance(95_000, 100_000));
        assert!(opts.within_tolerance(105_000, 100_000));
        assert!(!opts.within_tolerance(94_999, 100_000));
        assert!(!opts.within_tolerance(105_001, 100_000));
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let mut opts = TargetSizeOptions::default();
        opts.max_iterations = 0;
        assert!(matches!(opts.validate(), Err(FitError::InvalidOptions(_))));
    }

    #[test]
    fn test_rejects_out_of_range_quality() {
        let mut opts = TargetSizeOptions::default();
        opts.initial_quality = 0.0;
        assert!(opts.validate().is_err());
        opts.initial_quality = 1.5;
        assert!(opts.validate().is_err());
        opts.initial_quality = f64::NAN;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        let mut opts = TargetSizeOptions::default();
        opts.tolerance = 1.0;
        assert!(opts.validate().is_err());
        opts.tolerance = -0.1;
        assert!(opts.validate().is_err());
    }
}
