//! Scan geometry: center, radius and the angular sector.

/// Geometry of one sector-restricted radial scan.
///
/// The struct is plain data and immutable by convention: interactive layers
/// hold and edit their own copy, then pass it into the computation. Angles
/// are in degrees, counter-clockwise from the +x axis, with image rows
/// growing downward (the scan inverts the vertical axis accordingly).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectorGeometry {
    /// Circle center x, in pixel coordinates.
    pub center_x: f64,
    /// Circle center y, in pixel coordinates.
    pub center_y: f64,
    /// Disk radius in pixels.
    pub radius: f64,
    /// Starting angle in degrees.
    pub start_angle_deg: i32,
    /// Angular half-width in degrees; the sector spans start ± integration.
    pub integration_angle_deg: i32,
}

impl SectorGeometry {
    pub fn new(
        center_x: f64,
        center_y: f64,
        radius: f64,
        start_angle_deg: i32,
        integration_angle_deg: i32,
    ) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            start_angle_deg,
            integration_angle_deg,
        }
    }

    /// Apply the input corrections callers historically relied on:
    /// a negative radius or integration angle is sign-flipped, and an
    /// integration angle over 180 is taken modulo 180.
    ///
    /// After normalization `radius >= 0` and
    /// `integration_angle_deg ∈ [0, 180]`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut g = self;
        if g.radius < 0.0 {
            g.radius = -g.radius;
        }
        if g.integration_angle_deg < 0 {
            g.integration_angle_deg = -g.integration_angle_deg;
        }
        if g.integration_angle_deg > 180 {
            g.integration_angle_deg %= 180;
        }
        g
    }

    /// Number of radius bins: one per whole pixel of radius.
    ///
    /// A radius below one pixel yields zero bins and an empty profile.
    pub fn n_bins(&self) -> usize {
        if self.radius <= 0.0 {
            0
        } else {
            self.radius.floor() as usize
        }
    }
}
