//! Sample sources: how the binner reads scalar intensities.

use image::GrayImage;

use crate::Error;

/// Read-only scalar sample access over one or more same-size slices.
///
/// Out-of-bounds reads return `0.0`. The scan visits every grid point of the
/// disk's bounding square, which may hang over the image edge; the zero fill
/// matches the edge behavior of the pixel accessors this interface abstracts
/// over.
pub trait SampleSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn n_slices(&self) -> usize;
    /// Intensity at `(x, y)` of `slice`, `0.0` outside the grid.
    fn sample(&self, slice: usize, x: i32, y: i32) -> f32;
}

/// A single grayscale image is a one-slice source of raw 0–255 intensities.
impl SampleSource for GrayImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn n_slices(&self) -> usize {
        1
    }

    fn sample(&self, _slice: usize, x: i32, y: i32) -> f32 {
        let (w, h) = self.dimensions();
        if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
            return 0.0;
        }
        f32::from(self.get_pixel(x as u32, y as u32)[0])
    }
}

/// Owned stack of same-geometry `f32` slices.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceStack {
    width: u32,
    height: u32,
    slices: Vec<Vec<f32>>,
}

impl SliceStack {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            slices: Vec::new(),
        }
    }

    /// Append a slice stored in row-major order.
    pub fn push_slice(&mut self, data: Vec<f32>) -> Result<(), Error> {
        let expected = self.width as usize * self.height as usize;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        self.slices.push(data);
        Ok(())
    }

    /// Build a stack from grayscale images; all must share the dimensions of
    /// the first.
    pub fn from_gray(images: &[GrayImage]) -> Result<Self, Error> {
        let (w, h) = images
            .first()
            .map(GrayImage::dimensions)
            .unwrap_or((0, 0));
        let mut stack = Self::new(w, h);
        for img in images {
            let (iw, ih) = img.dimensions();
            if (iw, ih) != (w, h) {
                return Err(Error::DimensionMismatch {
                    w,
                    h,
                    actual_w: iw,
                    actual_h: ih,
                });
            }
            stack.push_slice(img.as_raw().iter().map(|&p| f32::from(p)).collect())?;
        }
        Ok(stack)
    }
}

impl SampleSource for SliceStack {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn n_slices(&self) -> usize {
        self.slices.len()
    }

    fn sample(&self, slice: usize, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0.0;
        }
        let Some(data) = self.slices.get(slice) else {
            return 0.0;
        };
        data[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::{SampleSource, SliceStack};
    use crate::Error;

    #[test]
    fn gray_image_sampling_with_zero_border() {
        let mut img = GrayImage::new(4, 3);
        img.put_pixel(2, 1, Luma([200]));
        assert_eq!(img.sample(0, 2, 1), 200.0);
        assert_eq!(img.sample(0, -1, 1), 0.0);
        assert_eq!(img.sample(0, 4, 0), 0.0);
        assert_eq!(img.sample(0, 0, 3), 0.0);
        assert_eq!(img.n_slices(), 1);
    }

    #[test]
    fn slice_stack_rejects_wrong_sizes() {
        let mut stack = SliceStack::new(2, 2);
        assert!(matches!(
            stack.push_slice(vec![1.0; 3]),
            Err(Error::SizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
        stack.push_slice(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stack.sample(0, 1, 1), 4.0);
        assert_eq!(stack.sample(1, 1, 1), 0.0);
    }

    #[test]
    fn from_gray_requires_matching_dimensions() {
        let a = GrayImage::new(4, 4);
        let b = GrayImage::new(4, 5);
        assert!(matches!(
            SliceStack::from_gray(&[a.clone(), b]),
            Err(Error::DimensionMismatch { .. })
        ));
        let stack = SliceStack::from_gray(&[a.clone(), a]).unwrap();
        assert_eq!(stack.n_slices(), 2);
        assert_eq!((stack.width(), stack.height()), (4, 4));
    }
}
