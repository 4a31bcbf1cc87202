use crate::analysis::band::{self, BandRows};
use crate::analysis::energy;
use crate::analysis::spark::{self, SparkLocation};
use crate::config::DetectorConfig;
use crate::image::RoiImage;
use crate::scratch::Scratch;

/// Per-frame geometry and photometry, immutable once computed.
#[derive(Clone, Copy, Debug)]
pub struct FrameInfo {
    pub band_row_start: usize,
    pub band_row_end: usize,
    pub spark: Option<SparkLocation>,
    pub energy: f64,
    pub non_spark_energy: f64,
}

impl FrameInfo {
    pub fn band(&self) -> BandRows {
        BandRows {
            start: self.band_row_start,
            end: self.band_row_end,
        }
    }

    /// `SparkRaw`: true iff this frame's own analysis found exactly one
    /// spark cluster, independent of any window-level dropout correction.
    pub fn spark_raw(&self) -> bool {
        self.spark.is_some()
    }
}

/// Runs the full per-frame analysis: color preparation, band detection,
/// spark detection, and the two band energies. Writes the gray/S/V planes
/// into `scratch`, reusing its buffers instead of allocating fresh ones;
/// `scratch.gray` holds this frame's grayscale plane on return.
pub fn analyze(image: &RoiImage, config: &DetectorConfig, scratch: &mut Scratch) -> FrameInfo {
    image.fill_gray_s_v(scratch);
    let band = band::find_band_rows_by_s(&scratch.sat, config.min_band_run, &mut scratch.band);
    let spark = spark::detect_spark_on_band(&scratch.gray, &scratch.val, band, config, &mut scratch.spark);
    let energy = energy::band_energy(&scratch.val, band);
    let non_spark_energy = energy::non_spark_energy(&scratch.val, band, spark, energy);

    FrameInfo {
        band_row_start: band.start,
        band_row_end: band.end,
        spark,
        energy,
        non_spark_energy,
    }
}
