//! Radius measurement derived from the scan geometry.

use crate::{Calibration, SectorGeometry};

/// Radius of the scan circle in pixels and, when calibrated, physical units.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadiusMeasurement {
    /// Radius in pixels.
    pub radius_px: f64,
    /// Radius in calibrated units, when the calibration applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_units: Option<f64>,
    /// Unit label accompanying `radius_units`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Report the scan radius, calibrated when the calibration is usable.
pub fn measure_radius(
    geometry: &SectorGeometry,
    calibration: Option<&Calibration>,
) -> RadiusMeasurement {
    let geom = geometry.normalized();
    match calibration.and_then(|cal| cal.linear_scale().map(|s| (s, cal.unit.clone()))) {
        Some((scale, unit)) => RadiusMeasurement {
            radius_px: geom.radius,
            radius_units: Some(scale * geom.radius),
            unit: Some(unit),
        },
        None => RadiusMeasurement {
            radius_px: geom.radius,
            radius_units: None,
            unit: None,
        },
    }
}
