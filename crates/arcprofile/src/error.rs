//! Error type shared by profile computations and sinks.

/// Errors surfaced by profile computations and output sinks.
///
/// Degenerate geometry (zero radius, a sector catching no pixels) is not an
/// error: it produces empty output or `NaN` bins. The library never
/// terminates the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stack analysis demands more than one slice.
    #[error("stack analysis requires more than one slice, got {n_slices}")]
    StackRequired { n_slices: usize },

    /// A slice buffer does not match the declared dimensions.
    #[error("slice size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A slice's dimensions differ from the first slice of the stack.
    #[error("slice dimensions {actual_w}x{actual_h} differ from stack dimensions {w}x{h}")]
    DimensionMismatch {
        w: u32,
        h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
