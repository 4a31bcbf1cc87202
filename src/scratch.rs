use ndarray::Array2;

/// Working buffers for [`crate::analysis::band::find_band_rows_by_s`],
/// resized lazily rather than allocated fresh per call.
#[derive(Default)]
pub(crate) struct BandScratch {
    pub row_mean: Vec<f32>,
}

/// Working buffers for [`crate::analysis::spark::detect_spark_on_band`].
#[derive(Default)]
pub(crate) struct SparkScratch {
    pub votes: Vec<usize>,
    pub strong: Vec<bool>,
    pub col_mean: Vec<f32>,
    pub percentile_buf: Vec<f32>,
}

/// All reusable per-ROI working storage for one `Detector`: the gray/HSV
/// S/V planes plus the smaller scratch vectors the band and spark analyzers
/// sort/vote into. Resized lazily to the current ROI shape and otherwise
/// reused across calls, following the teacher's pattern of a
/// pipeline-stage-owned scratch buffer (e.g. `stack/*`, `filters/*`) rather
/// than allocating fresh arrays every frame.
#[derive(Default)]
pub(crate) struct Scratch {
    pub gray: Array2<f32>,
    pub sat: Array2<f32>,
    pub val: Array2<f32>,
    pub band: BandScratch,
    pub spark: SparkScratch,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reallocates the image-shaped planes only when the ROI shape actually
    /// changed; a steady ROI size across a stream never reallocates them.
    pub fn ensure_image_shape(&mut self, height: usize, width: usize) {
        if self.gray.dim() != (height, width) {
            self.gray = Array2::zeros((height, width));
            self.sat = Array2::zeros((height, width));
            self.val = Array2::zeros((height, width));
        }
    }
}
