use crate::error::InputError;
use crate::zones::{compute_zones, Zone};

/// A building plot footprint in meters.
///
/// `orientation` records the compass rotation of the plot in degrees
/// `[0, 360)` for display and interpretation; stored coordinates are never
/// rotated by it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
    pub orientation: f64,
}

impl Footprint {
    /// Creates a footprint with zero orientation.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonPositiveDimension`] if either dimension is
    /// not positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, InputError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(InputError::NonPositiveDimension {
                dimension: "width",
                value: width,
            });
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(InputError::NonPositiveDimension {
                dimension: "height",
                value: height,
            });
        }
        Ok(Self {
            width,
            height,
            orientation: 0.0,
        })
    }

    /// Sets the compass orientation, normalized into `[0, 360)`.
    #[must_use]
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees.rem_euclid(360.0);
        self
    }

    /// Footprint area in square meters.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// The nine compass zones of this footprint.
    #[must_use]
    pub fn zones(&self) -> [Zone; 9] {
        compute_zones(self.width, self.height)
    }
}
