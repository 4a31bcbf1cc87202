use ndarray::Array2;

use crate::scratch::BandScratch;

/// Inclusive row range of the bright horizontal bar within the ROI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandRows {
    pub start: usize,
    pub end: usize,
}

impl BandRows {
    pub fn height(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Finds the band as the longest contiguous run of rows whose mean
/// saturation is at or above the midpoint of the row-mean range. Falls
/// back to the whole image when no run reaches `min_run` rows.
///
/// `scratch.row_mean` is reused across calls instead of allocating a fresh
/// `Vec` per frame.
pub fn find_band_rows_by_s(sat: &Array2<f32>, min_run: usize, scratch: &mut BandScratch) -> BandRows {
    let h = sat.nrows();
    let w = sat.ncols();
    scratch.row_mean.clear();
    scratch
        .row_mean
        .extend((0..h).map(|y| sat.row(y).iter().sum::<f32>() / w as f32));
    let row_mean = &scratch.row_mean;

    let lo = row_mean.iter().cloned().fold(f32::INFINITY, f32::min);
    let hi = row_mean.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mid = (lo + hi) / 2.0;

    let mut best: Option<(usize, usize)> = None;
    let mut run_start: Option<usize> = None;
    for y in 0..h {
        if row_mean[y] >= mid {
            if run_start.is_none() {
                run_start = Some(y);
            }
        } else if let Some(s) = run_start.take() {
            consider_run(&mut best, s, y - 1);
        }
    }
    if let Some(s) = run_start {
        consider_run(&mut best, s, h - 1);
    }

    match best {
        Some((start, end)) if end - start + 1 >= min_run => BandRows { start, end },
        _ => BandRows {
            start: 0,
            end: h.saturating_sub(1),
        },
    }
}

fn consider_run(best: &mut Option<(usize, usize)>, start: usize, end: usize) {
    let len = end - start + 1;
    let better = match best {
        Some((bs, be)) => len > be - bs + 1,
        None => true,
    };
    if better {
        *best = Some((start, end));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[f32], width: usize) -> Array2<f32> {
        let h = values.len();
        Array2::from_shape_fn((h, width), |(y, _)| values[y])
    }

    #[test]
    fn finds_longest_high_saturation_run() {
        let sat = rows(&[0.0, 0.0, 200.0, 200.0, 200.0, 0.0, 100.0, 100.0], 4);
        let mut scratch = BandScratch::default();
        let band = find_band_rows_by_s(&sat, 3, &mut scratch);
        assert_eq!(band, BandRows { start: 2, end: 4 });
    }

    #[test]
    fn falls_back_to_whole_image_when_run_too_short() {
        let sat = rows(&[0.0, 200.0, 0.0, 0.0], 4);
        let mut scratch = BandScratch::default();
        let band = find_band_rows_by_s(&sat, 3, &mut scratch);
        assert_eq!(band, BandRows { start: 0, end: 3 });
    }
}
