use thiserror::Error;

/// Errors raised while validating a caller's pixel buffer into a
/// [`crate::RoiImage`]. Algorithmic ambiguity inside the detector itself
/// (degenerate band, zero/multiple spark clusters, an undecided Fill-end)
/// is never an error here — it resolves to a graceful fallback and is
/// reported through [`crate::SparkResult`] instead.
#[derive(Error, Debug)]
pub enum SparkError {
    #[error("empty image: width={width} height={height}")]
    EmptyImage { width: usize, height: usize },

    #[error(
        "buffer length mismatch: expected {expected} bytes for {width}x{height}x{channels}, got {actual}"
    )]
    BufferLengthMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, SparkError>;
