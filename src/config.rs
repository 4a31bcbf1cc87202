use serde::{Deserialize, Serialize};

use crate::consts::{
    ENERGY_EPS, JUMP_THRESHOLD, LEFT_SKIP_RATIO, MERGE_GAP_RATIO, MIN_BAND_RUN, MIN_SPARK_WIDTH,
    SPARK_EXPAND_PERCENTILE,
};

/// Tunable thresholds for the frame analyzer and state machine.
///
/// The defaults reproduce the fixed constants the algorithm was designed
/// around; overriding a field only makes sense when the caller's ROI scale
/// or capture pipeline deviates from the assumptions those constants encode.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum column-to-column gray jump counted as a strong-jump column.
    #[serde(default = "default_jump_threshold")]
    pub jump_threshold: f32,
    /// V-channel anti-jitter epsilon used throughout the state machine.
    #[serde(default = "default_energy_eps")]
    pub energy_eps: f64,
    /// Fraction of ROI width masked off on the left before spark detection.
    #[serde(default = "default_left_skip_ratio")]
    pub left_skip_ratio: f64,
    /// Fraction of ROI width used as the jump-column run merge gap.
    #[serde(default = "default_merge_gap_ratio")]
    pub merge_gap_ratio: f64,
    /// Percentile of the column-mean V profile used to expand the spark.
    #[serde(default = "default_spark_expand_percentile")]
    pub spark_expand_percentile: f64,
    /// Minimum contiguous row run accepted as the band.
    #[serde(default = "default_min_band_run")]
    pub min_band_run: usize,
    /// Minimum accepted width of an expanded spark cluster.
    #[serde(default = "default_min_spark_width")]
    pub min_spark_width: usize,
}

fn default_jump_threshold() -> f32 {
    JUMP_THRESHOLD
}
fn default_energy_eps() -> f64 {
    ENERGY_EPS
}
fn default_left_skip_ratio() -> f64 {
    LEFT_SKIP_RATIO
}
fn default_merge_gap_ratio() -> f64 {
    MERGE_GAP_RATIO
}
fn default_spark_expand_percentile() -> f64 {
    SPARK_EXPAND_PERCENTILE
}
fn default_min_band_run() -> usize {
    MIN_BAND_RUN
}
fn default_min_spark_width() -> usize {
    MIN_SPARK_WIDTH
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            jump_threshold: JUMP_THRESHOLD,
            energy_eps: ENERGY_EPS,
            left_skip_ratio: LEFT_SKIP_RATIO,
            merge_gap_ratio: MERGE_GAP_RATIO,
            spark_expand_percentile: SPARK_EXPAND_PERCENTILE,
            min_band_run: MIN_BAND_RUN,
            min_spark_width: MIN_SPARK_WIDTH,
        }
    }
}

impl DetectorConfig {
    /// `LEFT_SKIP = max(1, floor(W * left_skip_ratio))`.
    pub fn left_skip(&self, width: usize) -> usize {
        ((width as f64 * self.left_skip_ratio).floor() as usize).max(1)
    }

    /// `mergeGap = max(2, round(W * merge_gap_ratio))`.
    pub fn merge_gap(&self, width: usize) -> usize {
        ((width as f64 * self.merge_gap_ratio).round() as usize).max(2)
    }
}
