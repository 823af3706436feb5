//! Sector-masked radial binning over a single slice.

use crate::trig::SectorBounds;
use crate::{Calibration, SampleSource, SectorGeometry};

/// What to do with a sample whose bin index lands past the last bin.
///
/// The legacy fold rule shifts every bin one index down, so the last bin
/// accepts distances up to one bin width past the nominal radius; anything
/// farther (bounding-square corners inside the sector) overflows. The
/// historical behavior silently drops such samples; the equally historical
/// disputed correction clamps them into the last bin. Both are kept as
/// explicit, testable choices rather than resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OverflowPolicy {
    /// Drop samples whose bin index reaches `n_bins`.
    #[default]
    Discard,
    /// Clamp overflowing indices into the last bin.
    ClampToLast,
}

/// Mean intensity per radius bin for one slice.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadialProfile {
    /// Outer-edge distance of each bin, in `unit`s.
    pub radius_axis: Vec<f32>,
    /// Mean intensity per bin; `NaN` for bins no pixel fell into.
    pub mean_intensity: Vec<f32>,
    /// Number of qualifying pixels per bin.
    pub counts: Vec<u32>,
    /// Axis unit label (`"pixel"` when uncalibrated).
    pub unit: String,
}

impl RadialProfile {
    pub fn n_bins(&self) -> usize {
        self.radius_axis.len()
    }

    pub(crate) fn empty(unit: String) -> Self {
        Self {
            radius_axis: Vec::new(),
            mean_intensity: Vec::new(),
            counts: Vec::new(),
            unit,
        }
    }
}

/// Map a distance from the center to its radius bin.
///
/// An index of exactly 0 is folded into bin 0 via the legacy
/// "treat as 1, then subtract 1" rule, so center-boundary samples never
/// produce bin -1. Overflowing indices go through `overflow`.
#[inline]
pub(crate) fn bin_index(
    dist: f64,
    radius: f64,
    n_bins: usize,
    overflow: OverflowPolicy,
) -> Option<usize> {
    let mut idx = ((dist / radius) * n_bins as f64).floor() as i64;
    if idx == 0 {
        idx = 1;
    }
    let idx = (idx - 1) as usize;
    if idx < n_bins {
        Some(idx)
    } else {
        match overflow {
            OverflowPolicy::Discard => None,
            OverflowPolicy::ClampToLast => Some(n_bins - 1),
        }
    }
}

/// Compute the sector-masked radial profile of one slice.
///
/// The geometry is normalized first (see [`SectorGeometry::normalized`]);
/// sector bounds are derived from the normalized angles. Pure function of
/// its inputs.
pub fn radial_profile(
    geometry: &SectorGeometry,
    source: &impl SampleSource,
    slice: usize,
    calibration: Option<&Calibration>,
    overflow: OverflowPolicy,
) -> RadialProfile {
    let geom = geometry.normalized();
    let bounds = SectorBounds::from_angles(geom.start_angle_deg, geom.integration_angle_deg);
    profile_with_bounds(&geom, &bounds, source, slice, calibration, overflow)
}

/// Single-slice binner with precomputed sector bounds.
///
/// Stack mode calls this once per slice so the bounds sweep runs only once.
/// `geom` must already be normalized.
pub(crate) fn profile_with_bounds(
    geom: &SectorGeometry,
    bounds: &SectorBounds,
    source: &impl SampleSource,
    slice: usize,
    calibration: Option<&Calibration>,
    overflow: OverflowPolicy,
) -> RadialProfile {
    let scale = calibration.and_then(Calibration::linear_scale);
    let unit = match (calibration, scale) {
        (Some(cal), Some(_)) => cal.unit.clone(),
        _ => "pixel".to_string(),
    };

    let n_bins = geom.n_bins();
    if n_bins == 0 {
        return RadialProfile::empty(unit);
    }

    let (cx, cy, r) = (geom.center_x, geom.center_y, geom.radius);
    let mut counts = vec![0u32; n_bins];
    let mut sums = vec![0f64; n_bins];

    // Unit-step scan of the disk's bounding square, both ends inclusive.
    let mut a = cx - r;
    while a <= cx + r {
        let mut b = cy - r;
        while b <= cy + r {
            let dist = ((a - cx) * (a - cx) + (b - cy) * (b - cy)).sqrt();
            // The center point has no direction; the divisions below would
            // produce NaN and poison the bounds comparison.
            if dist > 0.0 {
                let dx = (a - cx) / dist;
                // Vertical axis inverted: rows grow downward, angles grow
                // counter-clockwise upward.
                let dy = (cy - b) / dist;
                if bounds.contains(dx, dy) {
                    if let Some(i) = bin_index(dist, r, n_bins, overflow) {
                        counts[i] += 1;
                        sums[i] += f64::from(source.sample(slice, a as i32, b as i32));
                    }
                }
            }
            b += 1.0;
        }
        a += 1.0;
    }

    let s = scale.unwrap_or(1.0);
    let mut radius_axis = Vec::with_capacity(n_bins);
    let mut mean_intensity = Vec::with_capacity(n_bins);
    for i in 0..n_bins {
        radius_axis.push((s * r * (i + 1) as f64 / n_bins as f64) as f32);
        mean_intensity.push(if counts[i] == 0 {
            f32::NAN
        } else {
            (sums[i] / f64::from(counts[i])) as f32
        });
    }

    RadialProfile {
        radius_axis,
        mean_intensity,
        counts,
        unit,
    }
}

#[cfg(test)]
mod tests {
    use image::GrayImage;

    use super::{bin_index, radial_profile, OverflowPolicy, RadialProfile};
    use crate::test_utils::{gradient_gray, one_hot_gray};
    use crate::{Calibration, SampleSource, SectorGeometry};

    fn full_circle(cx: f64, cy: f64, r: f64) -> SectorGeometry {
        SectorGeometry::new(cx, cy, r, 0, 180)
    }

    /// Unmasked reference binner: same scan, no sector test.
    fn naive_full_circle(geom: &SectorGeometry, img: &GrayImage) -> RadialProfile {
        let n_bins = geom.n_bins();
        let (cx, cy, r) = (geom.center_x, geom.center_y, geom.radius);
        let mut counts = vec![0u32; n_bins];
        let mut sums = vec![0f64; n_bins];
        let mut a = cx - r;
        while a <= cx + r {
            let mut b = cy - r;
            while b <= cy + r {
                let dist = ((a - cx) * (a - cx) + (b - cy) * (b - cy)).sqrt();
                if dist > 0.0 {
                    if let Some(i) = bin_index(dist, r, n_bins, OverflowPolicy::Discard) {
                        counts[i] += 1;
                        sums[i] += f64::from(img.sample(0, a as i32, b as i32));
                    }
                }
                b += 1.0;
            }
            a += 1.0;
        }
        let mut radius_axis = Vec::new();
        let mut mean_intensity = Vec::new();
        for i in 0..n_bins {
            radius_axis.push((r * (i + 1) as f64 / n_bins as f64) as f32);
            mean_intensity.push(if counts[i] == 0 {
                f32::NAN
            } else {
                (sums[i] / f64::from(counts[i])) as f32
            });
        }
        RadialProfile {
            radius_axis,
            mean_intensity,
            counts,
            unit: "pixel".into(),
        }
    }

    #[test]
    fn full_integration_equals_unmasked_average() {
        let img = gradient_gray(25, 25);
        let geom = full_circle(12.0, 12.0, 9.3);
        let got = radial_profile(&geom, &img, 0, None, OverflowPolicy::Discard);
        let want = naive_full_circle(&geom, &img);
        assert_eq!(got.counts, want.counts);
        assert_eq!(got.radius_axis, want.radius_axis);
        // Identical accumulation order, so bitwise-equal means.
        assert_eq!(got.mean_intensity, want.mean_intensity);
    }

    #[test]
    fn zero_integration_counts_only_the_ray() {
        // Single bright pixel on the 0-degree ray at distance 5. Only pixels
        // with direction exactly (1, 0) qualify: row y == 10, x > 10.
        let img = one_hot_gray(21, 21, 15, 10, 200);
        let geom = SectorGeometry::new(10.0, 10.0, 8.0, 0, 0);
        let p = radial_profile(&geom, &img, 0, None, OverflowPolicy::Discard);

        assert_eq!(p.n_bins(), 8);
        // Exactly the eight ray pixels at distances 1..=8, one per bin.
        assert_eq!(p.counts, vec![1; 8]);
        for (i, &v) in p.mean_intensity.iter().enumerate() {
            if i == 4 {
                assert_eq!(v, 200.0);
            } else {
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn narrow_sector_leaves_uncovered_bins_nan() {
        // A one-degree half-width around 45° admits only the exact diagonal
        // pixels (10+k, 10-k); their distances k*sqrt(2) skip bins 2 and 5.
        let img = one_hot_gray(21, 21, 14, 6, 200);
        let geom = SectorGeometry::new(10.0, 10.0, 8.0, 45, 1);
        let p = radial_profile(&geom, &img, 0, None, OverflowPolicy::Discard);

        assert_eq!(p.counts, vec![1, 1, 0, 1, 1, 0, 1, 1]);
        for (i, &v) in p.mean_intensity.iter().enumerate() {
            match i {
                2 | 5 => assert!(v.is_nan(), "empty bin must be NaN"),
                4 => assert_eq!(v, 200.0),
                _ => assert_eq!(v, 0.0),
            }
        }
    }

    #[test]
    fn exact_boundary_sample_lands_in_last_bin_under_both_policies() {
        // Ray pixel at distance exactly 8 == radius: the fold rule keeps it.
        let img = one_hot_gray(21, 21, 18, 10, 80);
        let geom = SectorGeometry::new(10.0, 10.0, 8.0, 0, 0);
        for policy in [OverflowPolicy::Discard, OverflowPolicy::ClampToLast] {
            let p = radial_profile(&geom, &img, 0, None, policy);
            assert_eq!(p.counts[7], 1);
            assert_eq!(p.mean_intensity[7], 80.0);
        }
    }

    #[test]
    fn overflow_policies_differ_on_far_corner_pixels() {
        let img = one_hot_gray(21, 21, 17, 3, 80);
        // Full circle so the corners of the bounding square pass the sector
        // test; (17, 3) sits at distance sqrt(98) ~ 9.9 > radius + bin width.
        let geom = full_circle(10.0, 10.0, 8.0);
        let discard = radial_profile(&geom, &img, 0, None, OverflowPolicy::Discard);
        let clamp = radial_profile(&geom, &img, 0, None, OverflowPolicy::ClampToLast);

        assert_eq!(discard.counts[..7], clamp.counts[..7]);
        assert!(clamp.counts[7] > discard.counts[7]);

        // Clamping pulls exactly the square-corner points at distance >= 9
        // into the last bin.
        let mut extra = 0u32;
        for y in 2..=18i32 {
            for x in 2..=18i32 {
                let dx = f64::from(x) - 10.0;
                let dy = f64::from(y) - 10.0;
                if (dx * dx + dy * dy).sqrt() >= 9.0 {
                    extra += 1;
                }
            }
        }
        assert_eq!(clamp.counts[7], discard.counts[7] + extra);
        // The bright corner pixel contributes only under clamping.
        assert_eq!(discard.mean_intensity[7], 0.0);
        let expected = (80.0f64 / f64::from(clamp.counts[7])) as f32;
        assert_eq!(clamp.mean_intensity[7], expected);
    }

    #[test]
    fn counts_match_brute_force_sector_membership() {
        let img = gradient_gray(21, 21);
        let geom = SectorGeometry::new(10.0, 10.0, 10.0, 0, 90);
        let p = radial_profile(&geom, &img, 0, None, OverflowPolicy::Discard);

        // Independent membership: off center, (image-convention) polar angle
        // within start ± integration, and inside the legacy acceptance disk —
        // the fold shifts bins outward, so the last bin accepts distances up
        // to one bin width past the nominal radius.
        let mut expected = 0u32;
        for y in 0..21i32 {
            for x in 0..21i32 {
                let dx = f64::from(x) - 10.0;
                let dy = 10.0 - f64::from(y);
                let r = (dx * dx + dy * dy).sqrt();
                if r == 0.0 || r >= 11.0 {
                    continue;
                }
                let ang = dy.atan2(dx).to_degrees();
                if (-90.0..=90.0).contains(&ang) {
                    expected += 1;
                }
            }
        }
        assert_eq!(p.counts.iter().sum::<u32>(), expected);
    }

    #[test]
    fn calibrated_axis_reports_outer_bin_edges() {
        let img = gradient_gray(21, 21);
        let geom = full_circle(10.0, 10.0, 10.0);
        let cal = Calibration::isotropic(0.5, "um");
        let p = radial_profile(&geom, &img, 0, Some(&cal), OverflowPolicy::Discard);
        assert_eq!(p.unit, "um");
        assert_eq!(p.radius_axis[9], 5.0);
        assert_eq!(p.radius_axis[0], 0.5);
    }

    #[test]
    fn pixel_unit_calibration_is_ignored() {
        let img = gradient_gray(21, 21);
        let geom = full_circle(10.0, 10.0, 10.0);
        let cal = Calibration::isotropic(0.5, "pixel");
        let p = radial_profile(&geom, &img, 0, Some(&cal), OverflowPolicy::Discard);
        assert_eq!(p.unit, "pixel");
        assert_eq!(p.radius_axis[9], 10.0);
    }

    #[test]
    fn zero_radius_yields_empty_profile() {
        let img = gradient_gray(21, 21);
        let geom = full_circle(10.0, 10.0, 0.0);
        let p = radial_profile(&geom, &img, 0, None, OverflowPolicy::Discard);
        assert_eq!(p.n_bins(), 0);
        assert!(p.mean_intensity.is_empty());
        assert!(p.counts.is_empty());
    }

    #[test]
    fn negative_radius_is_corrected_before_binning() {
        let img = gradient_gray(21, 21);
        let neg = SectorGeometry::new(10.0, 10.0, -10.0, 0, 180);
        let pos = full_circle(10.0, 10.0, 10.0);
        let a = radial_profile(&neg, &img, 0, None, OverflowPolicy::Discard);
        let b = radial_profile(&pos, &img, 0, None, OverflowPolicy::Discard);
        assert_eq!(a, b);
    }

    #[test]
    fn bin_index_folds_center_boundary_into_first_bin() {
        assert_eq!(bin_index(0.04, 10.0, 10, OverflowPolicy::Discard), Some(0));
        assert_eq!(bin_index(1.5, 10.0, 10, OverflowPolicy::Discard), Some(0));
        assert_eq!(bin_index(2.0, 10.0, 10, OverflowPolicy::Discard), Some(1));
        assert_eq!(bin_index(9.99, 10.0, 10, OverflowPolicy::Discard), Some(8));
    }

    #[test]
    fn bin_index_boundary_and_overflow() {
        // Exactly at the radius: folded into the last bin by both policies.
        assert_eq!(bin_index(10.0, 10.0, 10, OverflowPolicy::Discard), Some(9));
        // One bin width beyond: the policies part ways.
        assert_eq!(bin_index(11.0, 10.0, 10, OverflowPolicy::Discard), None);
        assert_eq!(
            bin_index(11.0, 10.0, 10, OverflowPolicy::ClampToLast),
            Some(9)
        );
    }
}
