//! Stack orchestration: one profile per slice plus display extrema.

use crate::profile::profile_with_bounds;
use crate::trig::SectorBounds;
use crate::{Calibration, Error, OverflowPolicy, SampleSource, SectorGeometry};

/// Per-slice radial profiles with global bin-value extrema.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackProfile {
    /// Outer-edge distance of each bin, shared by all slices.
    pub radius_axis: Vec<f32>,
    /// Mean intensity per bin, one row per slice; empty bins are `NaN`.
    pub mean_intensity: Vec<Vec<f32>>,
    /// Smallest finite bin mean across all slices; `NaN` when every bin of
    /// every slice is empty.
    pub min_value: f32,
    /// Largest finite bin mean across all slices; `NaN` when every bin of
    /// every slice is empty.
    pub max_value: f32,
    /// Axis unit label (`"pixel"` when uncalibrated).
    pub unit: String,
}

impl StackProfile {
    pub fn n_bins(&self) -> usize {
        self.radius_axis.len()
    }

    pub fn n_slices(&self) -> usize {
        self.mean_intensity.len()
    }
}

/// Smallest and largest finite values of one slice's bin means.
fn slice_min_max(values: &[f32]) -> Option<(f32, f32)> {
    let mut mm = None;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        mm = Some(match mm {
            None => (v, v),
            Some((lo, hi)) => (f32::min(lo, v), f32::max(hi, v)),
        });
    }
    mm
}

/// Compute the sector-masked radial profile of every slice of a stack.
///
/// The sector bounds are computed once from the normalized geometry and
/// shared across slices; each slice is scanned independently and
/// sequentially. The extrema are merged from each slice's own min/max for
/// downstream display scaling.
///
/// Fails with [`Error::StackRequired`] when the source holds fewer than two
/// slices; callers wanting single-image analysis use
/// [`radial_profile`](crate::radial_profile) instead.
pub fn stack_radial_profile(
    geometry: &SectorGeometry,
    source: &impl SampleSource,
    calibration: Option<&Calibration>,
    overflow: OverflowPolicy,
) -> Result<StackProfile, Error> {
    let n_slices = source.n_slices();
    if n_slices <= 1 {
        return Err(Error::StackRequired { n_slices });
    }

    let geom = geometry.normalized();
    let bounds = SectorBounds::from_angles(geom.start_angle_deg, geom.integration_angle_deg);

    let mut radius_axis = Vec::new();
    let mut unit = String::new();
    let mut mean_intensity = Vec::with_capacity(n_slices);
    let mut extrema = None;

    for slice in 0..n_slices {
        let p = profile_with_bounds(&geom, &bounds, source, slice, calibration, overflow);
        if slice == 0 {
            radius_axis = p.radius_axis;
            unit = p.unit;
        }
        if let Some((lo, hi)) = slice_min_max(&p.mean_intensity) {
            extrema = Some(match extrema {
                None => (lo, hi),
                Some((min, max)) => (f32::min(min, lo), f32::max(max, hi)),
            });
        }
        mean_intensity.push(p.mean_intensity);
    }

    let (min_value, max_value) = extrema.unwrap_or((f32::NAN, f32::NAN));
    tracing::debug!(
        n_slices,
        n_bins = radius_axis.len(),
        min_value,
        max_value,
        "stack radial profile computed"
    );

    Ok(StackProfile {
        radius_axis,
        mean_intensity,
        min_value,
        max_value,
        unit,
    })
}
