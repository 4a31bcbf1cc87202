use crate::fsm::SparkState;

/// One emitted classification, aligned to a single input frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkResult {
    pub state: SparkState,
    pub progress: f64,
    pub is_fade50: bool,
    pub spark_detected: bool,
    /// Rightmost spark column index, or `-1` if none — matches the
    /// wire-neutral contract of an externally-consumed result record.
    pub spark_index: i32,
    pub band_left: i32,
    pub band_right: i32,
}

pub(crate) fn assemble(
    state: SparkState,
    max_spark_x: usize,
    width: usize,
    spark_detected: bool,
    idx: Option<usize>,
    band_l: Option<usize>,
    band_r: Option<usize>,
    is_fade50: bool,
) -> SparkResult {
    let progress = match state {
        SparkState::Idle => 0.0,
        SparkState::Fill => {
            let denom = (width.saturating_sub(1)).max(1) as f64;
            (max_spark_x as f64 / denom).clamp(0.0, 1.0)
        }
        SparkState::TurnLight | SparkState::Fade => 1.0,
    };
    SparkResult {
        state,
        progress,
        is_fade50,
        spark_detected,
        spark_index: idx.map(|v| v as i32).unwrap_or(-1),
        band_left: band_l.map(|v| v as i32).unwrap_or(-1),
        band_right: band_r.map(|v| v as i32).unwrap_or(-1),
    }
}
