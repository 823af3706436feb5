//! Profile output sinks.
//!
//! Persistence is decoupled from the computation: the binner returns plain
//! data and callers pass a sink when they want the profile written out.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, RadialProfile};

/// Consumer of computed radial profiles.
pub trait ProfileSink {
    fn write_profile(&mut self, profile: &RadialProfile) -> Result<(), Error>;
}

/// Two-column plain-text dump in the historical format.
///
/// The file is named `<title><x0> <y0>.txt` from the first data point and
/// holds one `"<radius> <intensity> \n"` line per bin. Kept byte-compatible
/// for existing downstream readers; an empty profile writes nothing.
#[derive(Debug, Clone)]
pub struct TextFileSink {
    dir: PathBuf,
    title: String,
}

impl TextFileSink {
    pub fn new(dir: impl AsRef<Path>, title: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            title: title.into(),
        }
    }

    /// Path the next profile with these first data points would be written to.
    pub fn target_path(&self, x0: f32, y0: f32) -> PathBuf {
        self.dir.join(format!("{}{} {}.txt", self.title, x0, y0))
    }
}

impl ProfileSink for TextFileSink {
    fn write_profile(&mut self, profile: &RadialProfile) -> Result<(), Error> {
        let (Some(&x0), Some(&y0)) = (
            profile.radius_axis.first(),
            profile.mean_intensity.first(),
        ) else {
            return Ok(());
        };
        let mut file = File::create(self.target_path(x0, y0))?;
        for (x, y) in profile.radius_axis.iter().zip(&profile.mean_intensity) {
            write!(file, "{} {} \n", x, y)?;
        }
        Ok(())
    }
}
