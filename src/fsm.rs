use ndarray::Array2;

use crate::config::DetectorConfig;
use crate::frame_info::FrameInfo;
use crate::result::{assemble, SparkResult};
use crate::window::Tick;

/// The four-state classification of the bar's lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SparkState {
    #[default]
    Idle,
    Fill,
    TurnLight,
    Fade,
}

/// Mutable cross-tick state the classifier carries forward: the current
/// state, the running spark extent, and the two cached baselines used to
/// decide Fill-end and Fade termination.
#[derive(Default)]
pub(crate) struct FsmState {
    pub state: SparkState,
    pub max_spark_x: usize,
    pub has_last_spark: bool,
    pub last_spark_non_spark_energy: f64,
    pub has_no_spark_baseline: bool,
    pub baseline_non_spark_energy: f64,
    pub baseline_row_start: usize,
    pub baseline_row_end: usize,
    pub baseline_gray: Option<Array2<f32>>,
}

impl FsmState {
    /// Clears all per-cycle caches and returns to the initial `Idle` state.
    pub fn enter_idle(&mut self) {
        self.state = SparkState::Idle;
        self.max_spark_x = 0;
        self.has_last_spark = false;
        self.last_spark_non_spark_energy = 0.0;
        self.has_no_spark_baseline = false;
        self.baseline_non_spark_energy = 0.0;
        self.baseline_row_start = 0;
        self.baseline_row_end = 0;
        self.baseline_gray = None;
    }

    fn cache_baseline_from(&mut self, info: &FrameInfo, gray: &Array2<f32>) {
        self.baseline_non_spark_energy = info.non_spark_energy;
        self.baseline_row_start = info.band_row_start;
        self.baseline_row_end = info.band_row_end;
        self.baseline_gray = Some(gray.clone());
        self.has_no_spark_baseline = true;
    }
}

/// `curr.N ≥ last − eps ∧ next.N ≥ curr.N − eps`.
fn is_non_decreasing(last: f64, curr: f64, next: f64, eps: f64) -> bool {
    curr >= last - eps && next >= curr - eps
}

/// `curr.N < last − eps ∧ next.N < curr.N − eps`.
fn is_strictly_decreasing(last: f64, curr: f64, next: f64, eps: f64) -> bool {
    curr < last - eps && next < curr - eps
}

/// `curr.E ≥ prev.E − eps ∧ curr.E > next.E + eps`. Deliberately
/// asymmetric: non-strict on the left, strict on the right, so that a
/// jitter-sized wobble never registers as a peak.
fn is_peak(prev_e: f64, curr_e: f64, next_e: f64, eps: f64) -> bool {
    curr_e >= prev_e - eps && curr_e > next_e + eps
}

/// Classifies `curr` of `tick` against `fsm`, mutating `fsm` to the next
/// state and returning the result aligned to `curr`.
pub(crate) fn classify(tick: &Tick, fsm: &mut FsmState, width: usize, config: &DetectorConfig) -> SparkResult {
    let (prev, curr, next, prev_gray, curr_gray, frame_index) = tick;
    let frame_index = *frame_index;
    let eps = config.energy_eps;

    let confirmed_absence = !curr.spark_raw() && !next.spark_raw();
    if !confirmed_absence {
        // Dropout correction: curr's own detection wins; failing that, a
        // spark confirmed absent only if neither curr nor next have it, so
        // here next (at least) still has one — fall back to prev's if it
        // was the frame that actually carried the spark.
        let loc = curr.spark.or(prev.spark);
        let spark_detected = loc.is_some();
        if let Some(l) = loc {
            fsm.max_spark_x = fsm.max_spark_x.max(l.idx);
        }
        fsm.has_last_spark = true;
        fsm.last_spark_non_spark_energy = curr.non_spark_energy;
        fsm.has_no_spark_baseline = false;
        let prior_state = fsm.state;
        fsm.state = SparkState::Fill;
        tracing::trace!(
            frame_index,
            n = curr.non_spark_energy,
            spark_detected,
            "{prior_state:?} -> Fill"
        );
        return assemble(
            SparkState::Fill,
            fsm.max_spark_x,
            width,
            spark_detected,
            loc.map(|l| l.idx),
            loc.map(|l| l.band_l),
            loc.map(|l| l.band_r),
            false,
        );
    }

    match fsm.state {
        SparkState::Idle => {
            fsm.enter_idle();
            assemble(SparkState::Idle, 0, width, false, None, None, None, false)
        }

        SparkState::Fill => {
            if !fsm.has_last_spark {
                tracing::debug!(frame_index, "Fill with no cached spark energy; defensively resetting to Idle");
                fsm.enter_idle();
                return assemble(SparkState::Idle, 0, width, false, None, None, None, false);
            }
            let last = fsm.last_spark_non_spark_energy;
            let curr_n = curr.non_spark_energy;
            let next_n = next.non_spark_energy;

            if is_non_decreasing(last, curr_n, next_n, eps) {
                fsm.cache_baseline_from(curr, curr_gray);
                fsm.state = SparkState::TurnLight;
                tracing::trace!(frame_index, last, curr_n, next_n, "Fill -> TurnLight");
                assemble(SparkState::TurnLight, fsm.max_spark_x, width, false, None, None, None, false)
            } else if is_strictly_decreasing(last, curr_n, next_n, eps) {
                fsm.cache_baseline_from(curr, curr_gray);
                fsm.state = SparkState::Fade;
                tracing::trace!(frame_index, last, curr_n, next_n, "Fill -> Fade");
                assemble(SparkState::Fade, fsm.max_spark_x, width, false, None, None, None, false)
            } else {
                assemble(SparkState::Fill, fsm.max_spark_x, width, false, None, None, None, false)
            }
        }

        SparkState::TurnLight => {
            if is_peak(prev.energy, curr.energy, next.energy, eps) {
                fsm.state = SparkState::Fade;
                tracing::trace!(frame_index, e = curr.energy, "TurnLight -> Fade (peak)");
            }
            assemble(SparkState::TurnLight, fsm.max_spark_x, width, false, None, None, None, false)
        }

        SparkState::Fade => {
            if !fsm.has_no_spark_baseline {
                fsm.cache_baseline_from(prev, prev_gray);
            }
            if curr.non_spark_energy <= fsm.baseline_non_spark_energy {
                let result = assemble(SparkState::Fade, fsm.max_spark_x, width, false, None, None, None, true);
                tracing::debug!(
                    frame_index,
                    n = curr.non_spark_energy,
                    baseline = fsm.baseline_non_spark_energy,
                    "Fade -> Idle (terminal)"
                );
                fsm.enter_idle();
                result
            } else {
                assemble(SparkState::Fade, fsm.max_spark_x, width, false, None, None, None, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_is_asymmetric_around_eps() {
        // Right side must be strictly greater than next + eps...
        assert!(!is_peak(100.0, 100.0, 99.3, 0.8));
        assert!(is_peak(100.0, 100.0, 99.1, 0.8));
        // ...but the left side only needs to be within eps of prev.
        assert!(is_peak(100.5, 100.0, 90.0, 0.8));
        assert!(!is_peak(101.0, 100.0, 90.0, 0.8));
    }

    #[test]
    fn non_decreasing_and_strictly_decreasing_are_mutually_exclusive() {
        for curr in [40, 45, 50, 55, 60] {
            let c = curr as f64;
            let nd = is_non_decreasing(50.0, c, c, 0.8);
            let sd = is_strictly_decreasing(50.0, c, c, 0.8);
            assert!(!(nd && sd), "curr={c} triggered both");
        }
    }

    #[test]
    fn constant_offset_within_eps_does_not_change_fill_end_decision() {
        let eps = 0.8;
        let (last, curr, next) = (55.0, 55.3, 55.5);
        let base = is_non_decreasing(last, curr, next, eps);
        let delta = 0.3; // <= eps
        let shifted = is_non_decreasing(last + delta, curr + delta, next + delta, eps);
        assert_eq!(base, shifted);
    }
}
