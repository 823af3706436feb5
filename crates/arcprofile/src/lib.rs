//! arcprofile — sector-masked radial intensity profiles.
//!
//! Given a circle center, a radius, a starting angle and an angular
//! half-width, the crate accumulates pixel intensities of a grayscale image
//! (or a stack of same-size slices) into radius bins, restricted to pixels
//! lying inside both the circular disk and the angular sector, and reports
//! the mean intensity per bin.
//!
//! The computation is staged as:
//!
//! 1. **Sector bounds** – exact min/max cosine and sine attained over the
//!    swept angular range, used as an O(1) inclusion test in the pixel scan
//!    ([`SectorBounds`]).
//! 2. **Radial binner** – bounding-square scan, sector membership, per-bin
//!    count/sum accumulation and mean normalization ([`radial_profile`]).
//! 3. **Stack binner** – one profile per slice sharing the same bounds, plus
//!    global bin-value extrema for display scaling
//!    ([`stack_radial_profile`]).
//!
//! All entry points are pure functions of an immutable [`SectorGeometry`]
//! plus a [`SampleSource`]; output persistence goes through an explicit
//! [`ProfileSink`] supplied by the caller.

mod calib;
mod error;
mod geometry;
mod measure;
mod profile;
mod sink;
mod source;
mod stack;
mod trig;

#[cfg(test)]
mod test_utils;

pub use calib::Calibration;
pub use error::Error;
pub use geometry::SectorGeometry;
pub use measure::{measure_radius, RadiusMeasurement};
pub use profile::{radial_profile, OverflowPolicy, RadialProfile};
pub use sink::{ProfileSink, TextFileSink};
pub use source::{SampleSource, SliceStack};
pub use stack::{stack_radial_profile, StackProfile};
pub use trig::{cos_exact, sin_exact, SectorBounds};
