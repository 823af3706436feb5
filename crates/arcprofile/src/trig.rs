//! Numerically-robust trigonometry and the sector inclusion bounds.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// IEEE-754 remainder, used only for its exact zero test.
///
/// The quotient rounding mode is irrelevant here: the remainder is zero
/// exactly when `x` is a representable multiple of `y`, which any
/// nearest-integer rounding of `x / y` detects.
#[inline]
fn ieee_remainder(x: f64, y: f64) -> f64 {
    x - (x / y).round() * y
}

/// Cosine with exact values at multiples of 90 degrees.
///
/// Plain `f64::cos` evaluates `cos(PI)` to -0.9999999999999998; the sector
/// bounds built from these values are later compared with `<=`/`>=` against
/// unit direction vectors, so the cardinal directions must come out exact.
pub fn cos_exact(rad: f64) -> f64 {
    if ieee_remainder(rad, TAU) == 0.0 {
        1.0
    } else if ieee_remainder(rad, PI) == 0.0 {
        -1.0
    } else if ieee_remainder(rad, FRAC_PI_2) == 0.0 {
        0.0
    } else {
        rad.cos()
    }
}

/// Sine with exact zeros at multiples of 180 degrees.
pub fn sin_exact(rad: f64) -> f64 {
    if ieee_remainder(rad, PI) == 0.0 {
        0.0
    } else {
        rad.sin()
    }
}

/// Min/max cosine and sine attained over a swept angular sector.
///
/// Testing sector membership of a pixel by comparing its direction cosine
/// and sine against these four bounds is O(1) per pixel and keeps all
/// trigonometry and angle-wraparound arithmetic out of the scan loop.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectorBounds {
    pub cos_min: f64,
    pub cos_max: f64,
    pub sin_min: f64,
    pub sin_max: f64,
}

impl SectorBounds {
    /// Sweep the integer degrees `start - integration ..= start + integration`
    /// (one sample per degree, `2 * integration + 1` samples) and record the
    /// extremes of cosine and sine.
    ///
    /// `integration_deg` is expected normalized to `[0, 180]`; zero collapses
    /// the sector to a single ray, 180 covers the full circle. Cardinal
    /// directions are integer degrees, so whenever one falls inside the sweep
    /// its exact value (0, ±1) lands in the bounds.
    pub fn from_angles(start_deg: i32, integration_deg: i32) -> Self {
        let rad0 = PI * f64::from(start_deg - integration_deg) / 180.0;
        let mut b = Self {
            cos_min: cos_exact(rad0),
            cos_max: cos_exact(rad0),
            sin_min: sin_exact(rad0),
            sin_max: sin_exact(rad0),
        };
        for k in 1..=2 * integration_deg {
            let rad = PI * f64::from(start_deg - integration_deg + k) / 180.0;
            let c = cos_exact(rad);
            if c > b.cos_max {
                b.cos_max = c;
            } else if c < b.cos_min {
                b.cos_min = c;
            }
            let s = sin_exact(rad);
            if s > b.sin_max {
                b.sin_max = s;
            } else if s < b.sin_min {
                b.sin_min = s;
            }
        }
        b
    }

    /// Whether a unit direction `(dx, dy)` lies within the sector bounds.
    #[inline]
    pub fn contains(&self, dx: f64, dy: f64) -> bool {
        dx >= self.cos_min && dx <= self.cos_max && dy >= self.sin_min && dy <= self.sin_max
    }
}
