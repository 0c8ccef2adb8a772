//! Letterbox sizing: fit a source image into a target bounding box.
//!
//! Pure geometry, no pixel operations. [`Letterbox`] describes the box and
//! the acceptance rules, [`Letterbox::plan`] turns source dimensions into
//! the scaled size plus centering offsets that the pipeline composites with.

use crate::errors::{Dimension, PlanError};

/// Background of the letterbox canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Transparent black bars.
    Transparent,
    /// Solid RGBA bars.
    Solid([u8; 4]),
    /// The source image stretched over the whole canvas, then box-blurred
    /// with the given block size.
    Blur { block: u32 },
}

impl Default for Background {
    fn default() -> Self {
        Self::Transparent
    }
}

/// Letterbox constraint: target box, extra scale ratio, and the minimum
/// source size accepted.
///
/// # Example
///
/// ```
/// use letterfit::Letterbox;
///
/// let plan = Letterbox::new(400, 400).plan(800, 600).unwrap();
/// assert_eq!((plan.final_width, plan.final_height), (400, 300));
/// assert_eq!((plan.offset_x, plan.offset_y), (0, 50));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Letterbox {
    pub target_width: u32,
    pub target_height: u32,
    /// Extra scale factor applied on top of the fitting ratio (1.0 = exact fit).
    pub ratio: f64,
    pub min_width: u32,
    pub min_height: u32,
    pub background: Background,
}

impl Letterbox {
    /// Create a constraint for the given target box with ratio 1.0, no
    /// minimum source size and a transparent background.
    pub fn new(target_width: u32, target_height: u32) -> Self {
        Self {
            target_width,
            target_height,
            ratio: 1.0,
            min_width: 0,
            min_height: 0,
            background: Background::Transparent,
        }
    }

    /// Set the extra scale factor applied after fitting.
    ///
    /// Values below 1.0 shrink the image inside the box; values above 1.0
    /// zoom past it (the compositors clip the overflow).
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Reject source images smaller than the given size.
    pub fn min_source(mut self, min_width: u32, min_height: u32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Set the canvas background used when the scaled image does not fill
    /// the whole box.
    pub fn background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Compute the scaled size and centering offsets for a source image.
    ///
    /// The nominal ratio is the largest uniform scale that keeps the source
    /// entirely inside the target box; `ratio` is multiplied on top of it.
    /// Final dimensions truncate toward zero and offsets use truncating
    /// integer division, so the same inputs always produce the same plan.
    pub fn plan(&self, source_width: u32, source_height: u32) -> Result<FitPlan, PlanError> {
        if source_width == 0 || source_height == 0 {
            return Err(PlanError::ZeroSourceDimension);
        }
        if self.target_width == 0 || self.target_height == 0 {
            return Err(PlanError::ZeroTargetDimension);
        }
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(PlanError::InvalidRatio);
        }
        if source_width < self.min_width {
            return Err(PlanError::SourceTooSmall {
                dimension: Dimension::Width,
                actual: source_width,
                min: self.min_width,
            });
        }
        if source_height < self.min_height {
            return Err(PlanError::SourceTooSmall {
                dimension: Dimension::Height,
                actual: source_height,
                min: self.min_height,
            });
        }

        let nominal = f64::min(
            self.target_width as f64 / source_width as f64,
            self.target_height as f64 / source_height as f64,
        );
        let adjusted = nominal * self.ratio;

        // Truncation toward zero, like an integer cast.
        let final_width = (source_width as f64 * adjusted) as u32;
        let final_height = (source_height as f64 * adjusted) as u32;

        Ok(FitPlan {
            final_width,
            final_height,
            offset_x: (self.target_width as i64 - final_width as i64) / 2,
            offset_y: (self.target_height as i64 - final_height as i64) / 2,
        })
    }
}

/// Scaled dimensions and centering offsets produced by [`Letterbox::plan`].
///
/// Offsets are signed: a ratio above 1.0 can push the scaled image past the
/// box edges, in which case compositing clips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlan {
    pub final_width: u32,
    pub final_height: u32,
    pub offset_x: i64,
    pub offset_y: i64,
}

impl FitPlan {
    /// Whether the scaled image exactly fills the given box, so no canvas
    /// and no compositing are needed.
    pub fn fills(&self, target_width: u32, target_height: u32) -> bool {
        self.final_width == target_width && self.final_height == target_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downscale_landscape_into_square() {
        // 800x600 into 400x400: width constrains, so 400x300 with bars above and below
        let plan = Letterbox::new(400, 400).plan(800, 600).unwrap();
        assert_eq!((plan.final_width, plan.final_height), (400, 300));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 50));
        assert!(!plan.fills(400, 400));
    }

    #[test]
    fn downscale_portrait_into_square() {
        let plan = Letterbox::new(400, 400).plan(600, 800).unwrap();
        assert_eq!((plan.final_width, plan.final_height), (300, 400));
        assert_eq!((plan.offset_x, plan.offset_y), (50, 0));
    }

    #[test]
    fn same_aspect_fills_the_box() {
        let plan = Letterbox::new(400, 400).plan(800, 800).unwrap();
        assert_eq!((plan.final_width, plan.final_height), (400, 400));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 0));
        assert!(plan.fills(400, 400));
    }

    #[test]
    fn ratio_scales_after_fitting() {
        let plan = Letterbox::new(400, 400).ratio(0.5).plan(800, 600).unwrap();
        assert_eq!((plan.final_width, plan.final_height), (200, 150));
        assert_eq!((plan.offset_x, plan.offset_y), (100, 125));
    }

    #[test]
    fn ratio_above_one_overflows_with_negative_offsets() {
        let plan = Letterbox::new(400, 400).ratio(2.0).plan(800, 600).unwrap();
        assert_eq!((plan.final_width, plan.final_height), (800, 600));
        assert_eq!((plan.offset_x, plan.offset_y), (-200, -100));
    }

    #[test]
    fn final_dimensions_truncate_toward_zero() {
        // 480 * (333/640) = 249.75 truncates to 249, not 250.
        let plan = Letterbox::new(333, 333).plan(640, 480).unwrap();
        assert_eq!((plan.final_width, plan.final_height), (333, 249));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 42));
    }

    #[test]
    fn unit_ratio_never_exceeds_the_box() {
        let letterbox = Letterbox::new(400, 400);
        for &(w, h) in &[(1, 1), (399, 401), (401, 399), (1000, 3), (3, 1000), (4928, 3279)] {
            let plan = letterbox.plan(w, h).unwrap();
            assert!(plan.final_width <= 400, "{w}x{h} gave width {}", plan.final_width);
            assert!(plan.final_height <= 400, "{w}x{h} gave height {}", plan.final_height);
            assert!(plan.offset_x >= 0 && plan.offset_y >= 0);
        }
    }

    #[test]
    fn unit_ratio_preserves_aspect() {
        let plan = Letterbox::new(250, 250).plan(1333, 741).unwrap();
        let source = 1333.0 / 741.0;
        let scaled = plan.final_width as f64 / plan.final_height as f64;
        // Truncation can move each dimension by less than a pixel.
        assert!((source - scaled).abs() < 0.02, "{source} vs {scaled}");
    }

    #[test]
    fn source_below_minimum_width_is_rejected() {
        let err = Letterbox::new(400, 400)
            .min_source(400, 400)
            .plan(300, 300)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::SourceTooSmall {
                dimension: Dimension::Width,
                actual: 300,
                min: 400,
            }
        );
        assert!(err.to_string().contains("Width"));
    }

    #[test]
    fn width_violation_is_reported_before_height() {
        let err = Letterbox::new(400, 400)
            .min_source(400, 400)
            .plan(100, 200)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::SourceTooSmall { dimension: Dimension::Width, actual: 100, .. }
        ));
    }

    #[test]
    fn source_below_minimum_height_is_rejected() {
        let err = Letterbox::new(400, 400)
            .min_source(400, 400)
            .plan(500, 399)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::SourceTooSmall { dimension: Dimension::Height, actual: 399, min: 400 }
        ));
    }

    #[test]
    fn zero_source_is_rejected() {
        let err = Letterbox::new(400, 400).plan(0, 600).unwrap_err();
        assert_eq!(err, PlanError::ZeroSourceDimension);
    }

    #[test]
    fn zero_target_is_rejected() {
        let err = Letterbox::new(0, 400).plan(800, 600).unwrap_err();
        assert_eq!(err, PlanError::ZeroTargetDimension);
    }

    #[test]
    fn bad_ratios_are_rejected() {
        for ratio in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Letterbox::new(400, 400).ratio(ratio).plan(800, 600).unwrap_err();
            assert_eq!(err, PlanError::InvalidRatio, "ratio {ratio}");
        }
    }
}
