//! Spatial calibration of the pixel grid.

/// Pixel-size calibration with a unit label.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Calibration {
    /// Physical width of one pixel, in `unit`s.
    pub pixel_width: f64,
    /// Physical height of one pixel, in `unit`s.
    pub pixel_height: f64,
    /// Unit label; the literal `"pixel"` marks an uncalibrated grid.
    pub unit: String,
}

impl Calibration {
    /// Isotropic calibration with one pixel size for both axes.
    pub fn isotropic(pixel_size: f64, unit: impl Into<String>) -> Self {
        Self {
            pixel_width: pixel_size,
            pixel_height: pixel_size,
            unit: unit.into(),
        }
    }

    /// Linear pixel-to-unit scale, when the calibration is usable for radial
    /// distances: pixels must be square and the unit must not be the
    /// unitless `"pixel"`. Anything else disables calibration for the scan.
    pub fn linear_scale(&self) -> Option<f64> {
        if self.unit == "pixel" || self.pixel_width != self.pixel_height {
            None
        } else {
            Some(self.pixel_width)
        }
    }
}
