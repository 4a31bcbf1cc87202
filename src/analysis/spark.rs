use ndarray::Array2;

use crate::analysis::band::BandRows;
use crate::config::DetectorConfig;
use crate::scratch::SparkScratch;

/// The spark's horizontal location on the band, once detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SparkLocation {
    /// Rightmost column index of the spark — `SparkIdxRaw` in the design.
    pub idx: usize,
    pub band_l: usize,
    pub band_r: usize,
}

/// Locates the single bright moving spark on the band, or reports none.
///
/// `gray` and `val` must share the ROI's full `(height, width)` shape;
/// only rows within `band` are consulted. `scratch`'s vectors are reused
/// across calls instead of being allocated fresh per frame.
pub fn detect_spark_on_band(
    gray: &Array2<f32>,
    val: &Array2<f32>,
    band: BandRows,
    config: &DetectorConfig,
    scratch: &mut SparkScratch,
) -> Option<SparkLocation> {
    let w = gray.ncols();
    if w < 2 {
        return None;
    }
    let left_skip = config.left_skip(w).min(w - 1);
    let band_height = band.height();
    let min_votes = band_height / 2 + 1;

    // J[y, x] = G[y, x+1] - G[y, x], for x in [0, w-2]; votes over band rows.
    scratch.votes.clear();
    scratch.votes.resize(w - 1, 0);
    for x in 0..w - 1 {
        if x < left_skip {
            continue;
        }
        let mut v = 0usize;
        for y in band.start..=band.end {
            if gray[[y, x + 1]] - gray[[y, x]] >= config.jump_threshold {
                v += 1;
            }
        }
        scratch.votes[x] = v;
    }
    scratch.strong.clear();
    scratch.strong.extend(scratch.votes.iter().map(|&v| v >= min_votes));

    let runs = find_runs(&scratch.strong);
    let merge_gap = config.merge_gap(w);
    let merged = merge_runs(runs, merge_gap);
    if merged.len() != 1 {
        return None;
    }
    let (_, cluster_end) = merged[0];
    let seed_col = (cluster_end + 1).clamp(left_skip, w - 1);

    scratch.col_mean.clear();
    scratch.col_mean.extend((0..w).map(|x| {
        let sum: f32 = (band.start..=band.end).map(|y| val[[y, x]]).sum();
        sum / band_height as f32
    }));
    let col_mean = &scratch.col_mean;
    let q97 = percentile(col_mean, config.spark_expand_percentile, &mut scratch.percentile_buf);

    let mut l = seed_col;
    let mut r = seed_col;
    while l > left_skip && col_mean[l - 1] >= q97 {
        l -= 1;
    }
    while r + 1 < w && col_mean[r + 1] >= q97 {
        r += 1;
    }

    if r - l + 1 < config.min_spark_width {
        return None;
    }
    Some(SparkLocation {
        idx: r,
        band_l: l,
        band_r: r,
    })
}

/// Maximal contiguous runs of `true`, as inclusive `(start, end)` index pairs.
fn find_runs(strong: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &s) in strong.iter().enumerate() {
        if s {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s0) = start.take() {
            runs.push((s0, i - 1));
        }
    }
    if let Some(s0) = start {
        runs.push((s0, strong.len() - 1));
    }
    runs
}

/// Merges adjacent runs separated by at most `gap` non-strong columns.
fn merge_runs(runs: Vec<(usize, usize)>, gap: usize) -> Vec<(usize, usize)> {
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for run in runs {
        match merged.last_mut() {
            Some(last) if run.0 - last.1 - 1 <= gap => last.1 = run.1,
            _ => merged.push(run),
        }
    }
    merged
}

/// Linear-interpolated percentile (0..100) over an unsorted slice. `buf` is
/// the sort scratch space, reused across calls instead of allocating a
/// fresh copy of `values` per frame.
fn percentile(values: &[f32], p: f64, buf: &mut Vec<f32>) -> f32 {
    buf.clear();
    buf.extend_from_slice(values);
    buf.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = buf.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return buf[0];
    }
    let rank = (p / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return buf[lo];
    }
    let frac = (rank - lo as f64) as f32;
    buf[lo] + frac * (buf[hi] - buf[lo])
}
