/// V-channel anti-jitter epsilon: ~0.5% of the 0..255 value range.
pub const ENERGY_EPS: f64 = 255.0 * 0.00314;

/// Minimum column-to-column gray jump (on a 0..255 scale) to count as a
/// "strong-jump column" candidate for the spark's leading edge.
pub const JUMP_THRESHOLD: f32 = 18.0;

/// Fraction of ROI width masked off on the left: the bar's cap is never
/// the spark.
pub const LEFT_SKIP_RATIO: f64 = 0.10;

/// Fraction of ROI width used as the maximum gap (in non-strong-jump
/// columns) across which two jump-column runs still merge into one cluster.
pub const MERGE_GAP_RATIO: f64 = 0.02;

/// Percentile of the column-mean V profile used to expand the spark seed
/// column into its full width.
pub const SPARK_EXPAND_PERCENTILE: f64 = 97.0;

/// Minimum contiguous run length, in rows, to accept as the band; shorter
/// runs fall back to treating the whole ROI as the band.
pub const MIN_BAND_RUN: usize = 3;

/// Minimum accepted width (in columns) of an expanded spark cluster.
pub const MIN_SPARK_WIDTH: usize = 2;

/// Rec. 601 luma coefficients, applied to (B, G, R) byte triples.
pub const LUMA_B: f32 = 0.114;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_R: f32 = 0.299;

/// Maximum value of a single 8-bit channel sample.
pub const CHANNEL_MAX: f32 = 255.0;
