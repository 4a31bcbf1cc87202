use ndarray::Array2;

use crate::frame_info::FrameInfo;

/// `(prev, curr, next, prev_gray, curr_gray, curr_frame_index)` for one
/// classifiable tick. `curr_frame_index` is the 0-based ingestion index of
/// `curr`, carried through for transition logging.
pub type Tick = (FrameInfo, FrameInfo, FrameInfo, Array2<f32>, Array2<f32>, u64);

/// One slot of the three-frame FIFO: a frame's grayscale image alongside
/// its analyzed `FrameInfo`. The grayscale image is retained because
/// baseline caching at Fill-end or in Fade references `curr`'s or `prev`'s
/// gray image, not just its scalar summary.
#[derive(Clone, Debug)]
pub struct FrameSlot {
    pub gray: Array2<f32>,
    pub info: FrameInfo,
    pub frame_index: u64,
}

/// Length-3 FIFO of frame slots. Ingests one new frame per `push`, shifting
/// `curr -> prev` and the new frame in as `curr`/`next` as appropriate, and
/// surfaces a classifiable tick once two frames have already been seen.
#[derive(Default)]
pub struct ThreeFrameWindow {
    prev: Option<FrameSlot>,
    curr: Option<FrameSlot>,
}

impl ThreeFrameWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests `slot` as the newest frame. Returns `None` for the first two
    /// calls (warmup); from the third call on, returns the tick to classify
    /// `curr` using `(prev, curr, next=slot)`, then rotates the window.
    pub fn push(&mut self, slot: FrameSlot) -> Option<Tick> {
        match (self.prev.take(), self.curr.take()) {
            (None, None) => {
                self.curr = Some(slot);
                None
            }
            (None, Some(curr)) => {
                self.prev = Some(curr);
                self.curr = Some(slot);
                None
            }
            (Some(prev), Some(curr)) => {
                let tick = (
                    prev.info,
                    curr.info,
                    slot.info,
                    prev.gray.clone(),
                    curr.gray.clone(),
                    curr.frame_index,
                );
                self.prev = Some(curr);
                self.curr = Some(slot);
                Some(tick)
            }
            (Some(_), None) => unreachable!("window invariant: curr is always set once prev is"),
        }
    }

    /// Clears the window back to its empty, pre-warmup state.
    pub fn reset(&mut self) {
        self.prev = None;
        self.curr = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(frame_index: u64, energy: f64) -> FrameSlot {
        FrameSlot {
            gray: Array2::zeros((1, 1)),
            info: FrameInfo {
                band_row_start: 0,
                band_row_end: 0,
                spark: None,
                energy,
                non_spark_energy: energy,
            },
            frame_index,
        }
    }

    #[test]
    fn first_two_pushes_return_none() {
        let mut w = ThreeFrameWindow::new();
        assert!(w.push(slot(0, 1.0)).is_none());
        assert!(w.push(slot(1, 2.0)).is_none());
    }

    #[test]
    fn third_push_emits_tick_for_first_frame() {
        let mut w = ThreeFrameWindow::new();
        w.push(slot(0, 1.0));
        w.push(slot(1, 2.0));
        let (prev, curr, next, _, _, curr_frame_index) = w.push(slot(2, 3.0)).unwrap();
        assert_eq!(prev.energy, 1.0);
        assert_eq!(curr.energy, 2.0);
        assert_eq!(next.energy, 3.0);
        assert_eq!(curr_frame_index, 1);
    }

    #[test]
    fn reset_returns_to_warmup() {
        let mut w = ThreeFrameWindow::new();
        w.push(slot(0, 1.0));
        w.push(slot(1, 2.0));
        w.push(slot(2, 3.0));
        w.reset();
        assert!(w.push(slot(3, 4.0)).is_none());
        assert!(w.push(slot(4, 5.0)).is_none());
    }
}
