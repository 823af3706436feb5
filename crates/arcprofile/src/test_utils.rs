//! Shared test fixtures: synthetic grayscale slices.

use image::{GrayImage, Luma};

/// Deterministic non-uniform image: intensity varies with position.
pub(crate) fn gradient_gray(w: u32, h: u32) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            img.put_pixel(x, y, Luma([((x * 31 + y * 17) % 251) as u8]));
        }
    }
    img
}

/// All-zero image with a single bright pixel.
pub(crate) fn one_hot_gray(w: u32, h: u32, x: u32, y: u32, value: u8) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    img.put_pixel(x, y, Luma([value]));
    img
}

/// Stack of constant-valued slices sharing one geometry.
pub(crate) fn constant_stack(w: u32, h: u32, values: &[f32]) -> crate::SliceStack {
    let mut stack = crate::SliceStack::new(w, h);
    for &v in values {
        stack
            .push_slice(vec![v; w as usize * h as usize])
            .expect("slice size matches");
    }
    stack
}
