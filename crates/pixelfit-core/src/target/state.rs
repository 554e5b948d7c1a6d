//! Per-invocation search state and the shrink-regime step policy.

use crate::codec::{EncodeRequest, EncodedResult};

/// Distance beyond which the search adjusts dimensions instead of quality,
/// as a fraction of the target.
const FAR_FRACTION: f64 = 0.5;
/// Smallest per-step linear scale when shrinking dimensions.
const MIN_SHRINK_STEP: f64 = 0.7;
/// Largest per-step linear scale when growing dimensions.
const MAX_GROW_STEP: f64 = 1.2;
/// Quality never drops below this while fine-tuning.
const QUALITY_FLOOR: f64 = 0.5;
/// Per-step quality bump after undershooting.
const QUALITY_BUMP: f64 = 1.05;

/// Which lever a step pulled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Far above target: dimensions scaled down.
    ShrinkDimensions,
    /// Close above target: quality lowered.
    LowerQuality,
    /// At or below target: dimensions and quality raised.
    Grow,
}

/// Mutable state threaded through one shrink-regime search.
///
/// Owned by a single invocation and dropped when it resolves.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub width: u32,
    pub height: u32,
    pub quality: f64,
    /// Encode attempts made so far.
    pub iteration: u32,
    /// Closest result seen so far by absolute distance to the target.
    pub best: Option<EncodedResult>,
    pub best_diff: f64,
    max_dimension: u32,
}

impl SearchState {
    pub fn new(width: u32, height: u32, quality: f64, max_dimension: u32) -> Self {
        Self {
            width,
            height,
            quality,
            iteration: 0,
            best: None,
            best_diff: f64::INFINITY,
            max_dimension,
        }
    }

    /// Choose the parameters for the next attempt from the last measured size.
    pub fn advance(&mut self, current_size: usize, target: usize) -> Step {
        let ratio = (target as f64 / current_size as f64).sqrt();
        let size_difference = current_size as f64 - target as f64;

        if size_difference > 0.0 {
            if size_difference > target as f64 * FAR_FRACTION {
                let factor = ratio.max(MIN_SHRINK_STEP);
                self.scale_dimensions(factor);
                Step::ShrinkDimensions
            } else {
                let factor = 0.95 + (ratio - 1.0) * 0.1;
                self.quality = (self.quality * factor).max(QUALITY_FLOOR);
                Step::LowerQuality
            }
        } else {
            let factor = capped_growth(
                ratio.min(MAX_GROW_STEP),
                self.width,
                self.height,
                self.max_dimension,
            );
            self.scale_dimensions(factor);
            self.quality = (self.quality * QUALITY_BUMP).min(1.0);
            Step::Grow
        }
    }

    /// The encode request for the current parameters.
    pub fn request(&self) -> EncodeRequest {
        EncodeRequest::new(self.width, self.height, self.quality.clamp(0.0, 1.0))
    }

    /// Count an attempt and keep it if it is strictly closer than the best so far.
    ///
    /// Returns `true` when the attempt became the new best.
    pub fn record(&mut self, result: &EncodedResult, target: usize) -> bool {
        self.iteration += 1;
        let diff = (result.size_bytes() as f64 - target as f64).abs();
        if diff < self.best_diff {
            self.best_diff = diff;
            self.best = Some(result.clone());
            true
        } else {
            false
        }
    }

    fn scale_dimensions(&mut self, factor: f64) {
        self.width = scale_floor(self.width, factor);
        self.height = scale_floor(self.height, factor);
    }
}

/// Limit a growth factor so the longer side stays within `max_dimension`.
///
/// Both axes share the returned factor, so the aspect ratio survives the
/// cap. A raster already past the cap is held at its size, never shrunk.
pub(crate) fn capped_growth(factor: f64, width: u32, height: u32, max_dimension: u32) -> f64 {
    let longest = width.max(height).max(1) as f64;
    let limit = (max_dimension as f64 / longest).max(1.0);
    factor.min(limit)
}

fn scale_floor(value: u32, factor: f64) -> u32 {
    let scaled = (value as f64 * factor).floor();
    if scaled.is_finite() {
        (scaled as u64).clamp(1, u32::MAX as u64) as u32
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SearchState {
        SearchState::new(1000, 800, 0.9, 16_384)
    }

    #[test]
    fn test_new_state() {
        let s = state();
        assert_eq!((s.width, s.height), (1000, 800));
        assert_eq!(s.iteration, 0);
        assert!(s.best.is_none());
        assert!(s.best_diff.is_infinite());
    }

    #[test]
    fn test_far_overshoot_shrinks_dimensions_capped() {
        let mut s = state();
        // ratio = sqrt(1/16) = 0.25, capped at 0.7
        let step = s.advance(1_600_000, 100_000);
        assert_eq!(step, Step::ShrinkDimensions);
        assert!((699..=700).contains(&s.width));
        assert!((559..=560).contains(&s.height));
        assert!((s.quality - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_far_overshoot_uses_ratio_when_gentle() {
        let mut s = state();
        // 160k vs 100k: diff 60k > 50k, ratio = sqrt(0.625) ~ 0.79
        let step = s.advance(160_000, 100_000);
        assert_eq!(step, Step::ShrinkDimensions);
        assert_eq!(s.width, 790);
        assert_eq!(s.height, 632);
    }

    #[test]
    fn test_close_overshoot_lowers_quality_only() {
        let mut s = state();
        // 121k vs 100k: ratio = sqrt(100/121) = 10/11
        let step = s.advance(121_000, 100_000);
        assert_eq!(step, Step::LowerQuality);
        assert_eq!((s.width, s.height), (1000, 800));

        let expected = 0.9 * (0.95 + (10.0 / 11.0 - 1.0) * 0.1);
        assert!((s.quality - expected).abs() < 1e-12);
    }

    #[test]
    fn test_quality_floor() {
        let mut s = state();
        s.quality = 0.51;
        s.advance(140_000, 100_000);
        assert!((s.quality - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_undershoot_grows_capped() {
        let mut s = state();
        // ratio = 2, capped at 1.2
        let step = s.advance(25_000, 100_000);
        assert_eq!(step, Step::Grow);
        assert!((1199..=1200).contains(&s.width));
        assert!((959..=960).contains(&s.height));
        assert!((s.quality - 0.945).abs() < 1e-12);
    }

    #[test]
    fn test_undershoot_quality_caps_at_one() {
        let mut s = state();
        s.quality = 0.99;
        s.advance(90_000, 100_000);
        assert!((s.quality - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exact_match_routes_to_grow() {
        let mut s = state();
        let step = s.advance(100_000, 100_000);
        assert_eq!(step, Step::Grow);
        // ratio is 1, so dimensions are untouched
        assert_eq!((s.width, s.height), (1000, 800));
    }

    #[test]
    fn test_dimensions_never_reach_zero() {
        let mut s = SearchState::new(1, 1, 0.9, 16_384);
        s.advance(10_000_000, 100);
        assert_eq!((s.width, s.height), (1, 1));
    }

    #[test]
    fn test_growth_respects_max_dimension() {
        let mut s = SearchState::new(1000, 1000, 0.9, 1100);
        s.advance(10_000, 100_000);
        assert_eq!((s.width, s.height), (1100, 1100));
    }

    #[test]
    fn test_growth_cap_keeps_aspect_ratio() {
        let mut s = SearchState::new(20_000, 500, 0.9, 16_384);
        for _ in 0..4 {
            assert_eq!(s.advance(10_000, 100_000), Step::Grow);
        }
        assert_eq!((s.width, s.height), (20_000, 500));

        let mut s = SearchState::new(1000, 250, 0.9, 1100);
        s.advance(10_000, 100_000);
        assert_eq!((s.width, s.height), (1100, 275));
    }

    #[test]
    fn test_capped_growth() {
        assert!((capped_growth(1.2, 1000, 500, 16_384) - 1.2).abs() < f64::EPSILON);
        assert!((capped_growth(4.0, 2000, 1000, 4000) - 2.0).abs() < f64::EPSILON);
        assert!((capped_growth(4.0, 1000, 2000, 4000) - 2.0).abs() < f64::EPSILON);
        assert!((capped_growth(1.2, 20_000, 500, 16_384) - 1.0).abs() < f64::EPSILON);
        assert!((capped_growth(3.0, 0, 0, 10) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_keeps_strictly_better() {
        let mut s = state();
        let first = EncodedResult::new(vec![0; 120]);
        let tie = EncodedResult::new(vec![1; 80]);
        let better = EncodedResult::new(vec![2; 110]);

        assert!(s.record(&first, 100));
        assert!(!s.record(&tie, 100), "ties keep the earlier result");
        assert_eq!(s.best.as_ref().unwrap().payload()[0], 0);

        assert!(s.record(&better, 100));
        assert_eq!(s.best.as_ref().unwrap().size_bytes(), 110);
        assert!((s.best_diff - 10.0).abs() < f64::EPSILON);
        assert_eq!(s.iteration, 3);
    }

    #[test]
    fn test_request_clamps_quality() {
        let mut s = state();
        s.quality = 1.3;
        let req = s.request();
        assert!((req.quality - 1.0).abs() < f64::EPSILON);
        assert_eq!((req.width, req.height), (1000, 800));
        assert!(req.source.is_none());
    }
}
