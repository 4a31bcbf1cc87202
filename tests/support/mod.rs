//! Synthetic ROI fixture builder shared by the integration tests.
//!
//! Band rows carry a fixed-ratio BGR color scaled by a per-frame brightness
//! factor. Scaling preserves the HSV saturation ratio exactly, so "is this
//! row part of the band" (driven by saturation) and "how bright is the
//! band" (driven by the scale factor) can be controlled independently. A
//! spark is a three-column-wide brighter stripe within the band: the single
//! rising edge into the stripe is the one column strong enough to register
//! as a jump, and its three columns survive the percentile-expansion step.

pub const WIDTH: usize = 100;
pub const HEIGHT: usize = 10;
pub const BAND_START: usize = 2;
pub const BAND_END: usize = 6;
pub const SPIKE_WIDTH: usize = 3;

const BASE: (u8, u8, u8) = (60, 90, 180); // (b, g, r)
const OFF_BAND_GRAY: u8 = 100;
const SPIKE_FACTOR: f32 = 1.0;

/// `v_bg = 180 * bg_factor` for the [`BASE`] triple used here — handy for
/// picking a `bg_factor` that lands NonSparkEnergy/Energy on a wanted value.
pub fn bg_factor_for_v(v: f64) -> f32 {
    (v / 180.0) as f32
}

pub fn make_roi_bgr(spark_col: Option<usize>, bg_factor: f32) -> Vec<u8> {
    let mut buf = vec![0u8; WIDTH * HEIGHT * 3];
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let idx = (row * WIDTH + col) * 3;
            if (BAND_START..=BAND_END).contains(&row) {
                let in_spike = spark_col.map_or(false, |c| col >= c && col < c + SPIKE_WIDTH);
                let factor = if in_spike { SPIKE_FACTOR } else { bg_factor };
                let scale = |v: u8| ((v as f32 * factor).round().clamp(0.0, 255.0)) as u8;
                buf[idx] = scale(BASE.0);
                buf[idx + 1] = scale(BASE.1);
                buf[idx + 2] = scale(BASE.2);
            } else {
                buf[idx] = OFF_BAND_GRAY;
                buf[idx + 1] = OFF_BAND_GRAY;
                buf[idx + 2] = OFF_BAND_GRAY;
            }
        }
    }
    buf
}
