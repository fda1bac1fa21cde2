//! Inclusive HSV color ranges used by the segmentation pipeline.

use opencv::core::Scalar;
use serde::{Deserialize, Serialize};

/// An inclusive range of HSV values, one `(lower, upper)` pair per channel.
///
/// Channel order is hue, saturation, value. Hue uses the 0-180 scale,
/// saturation and value the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    /// Lower bound per channel, inclusive
    pub lower: [u8; 3],
    /// Upper bound per channel, inclusive
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Range matching green objects
    pub const fn green() -> Self {
        Self::new([40, 110, 85], [85, 255, 255])
    }

    /// Range matching orange objects
    pub const fn orange() -> Self {
        Self::new([0, 110, 110], [35, 255, 255])
    }

    /// The full HSV space; the neutral default when no color is selected
    pub const fn full() -> Self {
        Self::new([0, 0, 0], [180, 255, 255])
    }

    /// A range is well-formed when every lower bound is at most its upper bound
    pub fn is_valid(&self) -> bool {
        self.lower.iter().zip(self.upper.iter()).all(|(l, u)| l <= u)
    }

    /// True when `hsv` lies within the range on every channel, bounds inclusive
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        self.lower
            .iter()
            .zip(self.upper.iter())
            .zip(hsv.iter())
            .all(|((l, u), v)| l <= v && v <= u)
    }

    /// Lower bound as an `OpenCV` scalar for thresholding
    pub fn lower_bound(&self) -> Scalar {
        Scalar::new(f64::from(self.lower[0]), f64::from(self.lower[1]), f64::from(self.lower[2]), 0.0)
    }

    /// Upper bound as an `OpenCV` scalar for thresholding
    pub fn upper_bound(&self) -> Scalar {
        Scalar::new(f64::from(self.upper[0]), f64::from(self.upper[1]), f64::from(self.upper[2]), 0.0)
    }
}

impl Default for ColorRange {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ColorRange::green().is_valid());
        assert!(ColorRange::orange().is_valid());
        assert!(ColorRange::full().is_valid());
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let range = ColorRange::new([90, 0, 0], [60, 255, 255]);
        assert!(!range.is_valid());
    }

    #[test]
    fn test_contains_is_inclusive_at_both_bounds() {
        let range = ColorRange::green();
        assert!(range.contains([40, 110, 85]));
        assert!(range.contains([85, 255, 255]));
        assert!(range.contains([60, 200, 200]));
        assert!(!range.contains([39, 110, 85]));
        assert!(!range.contains([86, 255, 255]));
        assert!(!range.contains([60, 109, 85]));
    }

    #[test]
    fn test_scalar_bounds_match_channels() {
        let range = ColorRange::orange();
        let lower = range.lower_bound();
        let upper = range.upper_bound();
        assert_eq!(lower[0], 0.0);
        assert_eq!(lower[1], 110.0);
        assert_eq!(lower[2], 110.0);
        assert_eq!(upper[0], 35.0);
        assert_eq!(upper[1], 255.0);
        assert_eq!(upper[2], 255.0);
    }
}
