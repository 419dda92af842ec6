//! Boundary range tester for the playable area
//!
//! An axis-aligned range over world space. Shots outside it are pruned;
//! the player uses the excess distances to slide back onto the range
//! instead of having movement blocked outright.

use serde::{Deserialize, Serialize};

use super::error::{SimError, finite};

/// Axis-aligned playable range. Strict ordering (`min < max`) is required
/// on both axes at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Result<Self, SimError> {
        finite("bounds min_x", min_x)?;
        finite("bounds max_x", max_x)?;
        finite("bounds min_y", min_y)?;
        finite("bounds max_y", max_y)?;
        if min_x >= max_x {
            return Err(SimError::OutOfRange {
                what: "bounds x range",
                value: max_x - min_x,
            });
        }
        if min_y >= max_y {
            return Err(SimError::OutOfRange {
                what: "bounds y range",
                value: max_y - min_y,
            });
        }
        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    /// Closed-interval exclusion: true iff `x` lies outside `[min_x, max_x]`.
    /// NaN counts as outside, so a corrupted coordinate can never pass as
    /// in range.
    #[inline]
    pub fn is_outside_x(&self, x: f32) -> bool {
        !(self.min_x..=self.max_x).contains(&x)
    }

    /// Closed-interval exclusion on the y axis.
    #[inline]
    pub fn is_outside_y(&self, y: f32) -> bool {
        !(self.min_y..=self.max_y).contains(&y)
    }

    /// Magnitude of the excess beyond the nearer x edge; zero inside.
    #[inline]
    pub fn x_excess(&self, x: f32) -> f32 {
        if x < self.min_x {
            self.min_x - x
        } else if x > self.max_x {
            x - self.max_x
        } else {
            0.0
        }
    }

    /// Magnitude of the excess beyond the nearer y edge; zero inside.
    #[inline]
    pub fn y_excess(&self, y: f32) -> f32 {
        if y < self.min_y {
            self.min_y - y
        } else if y > self.max_y {
            y - self.max_y
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_or_empty_range() {
        assert!(matches!(
            Bounds::new(800.0, 0.0, 0.0, 600.0),
            Err(SimError::OutOfRange { .. })
        ));
        assert!(matches!(
            Bounds::new(0.0, 800.0, 600.0, 600.0),
            Err(SimError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            Bounds::new(f32::NAN, 800.0, 0.0, 600.0),
            Err(SimError::InvalidValue { .. })
        ));
        assert!(matches!(
            Bounds::new(0.0, f32::INFINITY, 0.0, 600.0),
            Err(SimError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_outside_closed_interval() {
        let bounds = Bounds::new(0.0, 800.0, 0.0, 600.0).unwrap();
        assert!(!bounds.is_outside_x(0.0));
        assert!(!bounds.is_outside_x(800.0));
        assert!(bounds.is_outside_x(-0.1));
        assert!(bounds.is_outside_x(850.0));
        assert!(!bounds.is_outside_y(600.0));
        assert!(bounds.is_outside_y(600.1));
        assert!(bounds.is_outside_x(f32::NAN));
    }

    #[test]
    fn test_excess_distances() {
        let bounds = Bounds::new(0.0, 800.0, 0.0, 600.0).unwrap();
        assert_eq!(bounds.x_excess(850.0), 50.0);
        assert_eq!(bounds.x_excess(-25.0), 25.0);
        assert_eq!(bounds.x_excess(400.0), 0.0);
        assert_eq!(bounds.y_excess(612.5), 12.5);
        assert_eq!(bounds.y_excess(0.0), 0.0);
    }
}
