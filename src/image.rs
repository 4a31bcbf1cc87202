use crate::consts::{CHANNEL_MAX, LUMA_B, LUMA_G, LUMA_R};
use crate::error::{Result, SparkError};
use crate::scratch::Scratch;

/// The closed set of pixel layouts the core accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    Gray,
    Bgr,
    Bgra,
}

impl PixelLayout {
    fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Bgr => 3,
            PixelLayout::Bgra => 4,
        }
    }
}

/// A validated, read-only view of one ROI frame: a byte buffer plus the
/// dimensions and layout needed to interpret it. Construction is the only
/// fallible step; every other operation on a `RoiImage` is infallible.
#[derive(Clone, Copy, Debug)]
pub struct RoiImage<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    layout: PixelLayout,
}

impl<'a> RoiImage<'a> {
    pub fn new(data: &'a [u8], width: usize, height: usize, layout: PixelLayout) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SparkError::EmptyImage { width, height });
        }
        let channels = layout.channels();
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(SparkError::BufferLengthMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// BGR triple at (row, col), regardless of the source layout. A
    /// single-channel source is replicated to BGR, matching the analyzer's
    /// "upscale to BGR by replication" color preparation step.
    #[inline]
    fn bgr_at(&self, row: usize, col: usize) -> (f32, f32, f32) {
        let channels = self.layout.channels();
        let idx = (row * self.width + col) * channels;
        match self.layout {
            PixelLayout::Gray => {
                let v = self.data[idx] as f32;
                (v, v, v)
            }
            PixelLayout::Bgr | PixelLayout::Bgra => (
                self.data[idx] as f32,
                self.data[idx + 1] as f32,
                self.data[idx + 2] as f32,
            ),
        }
    }

    /// Derives the grayscale, HSV-saturation, and HSV-value planes into
    /// `scratch.gray`/`scratch.sat`/`scratch.val`, each a `(height, width)`
    /// array with samples on a 0..255 scale. `scratch`'s image-shaped planes
    /// are resized only if they don't already match this ROI's shape.
    pub(crate) fn fill_gray_s_v(&self, scratch: &mut Scratch) {
        scratch.ensure_image_shape(self.height, self.width);
        for row in 0..self.height {
            for col in 0..self.width {
                let (b, g, r) = self.bgr_at(row, col);
                scratch.gray[[row, col]] = LUMA_B * b + LUMA_G * g + LUMA_R * r;
                let max = b.max(g).max(r);
                let min = b.min(g).min(r);
                scratch.val[[row, col]] = max;
                scratch.sat[[row, col]] = if max > 0.0 {
                    (max - min) / max * CHANNEL_MAX
                } else {
                    0.0
                };
            }
        }
    }
}
