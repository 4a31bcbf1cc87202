use crate::config::DetectorConfig;
use crate::error::Result;
use crate::frame_info;
use crate::fsm::{self, FsmState};
use crate::image::{PixelLayout, RoiImage};
use crate::result::SparkResult;
use crate::scratch::Scratch;
use crate::window::{FrameSlot, ThreeFrameWindow};

/// A single cast-bar spark detector instance. Owns all mutable state for
/// one stream: the three-frame window, the state machine's caches, the
/// per-ROI scratch buffers, and the ingestion frame counter. Not
/// reentrant — one instance serves exactly one stream from one consumer
/// thread, matching the core's single-threaded, pull-driven design.
pub struct Detector {
    config: DetectorConfig,
    window: ThreeFrameWindow,
    fsm: FsmState,
    scratch: Scratch,
    width: usize,
    next_frame_index: u64,
}

impl Detector {
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            config,
            window: ThreeFrameWindow::new(),
            fsm: FsmState::default(),
            scratch: Scratch::new(),
            width: 0,
            next_frame_index: 0,
        }
    }

    /// Validates `data` as a ROI image of the given shape/layout, then
    /// feeds it to [`Detector::process_roi`]. Returns `Err` without
    /// advancing the window or the state machine on a malformed buffer.
    pub fn process_frame(
        &mut self,
        data: &[u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Result<Option<SparkResult>> {
        let image = RoiImage::new(data, width, height, layout)?;
        Ok(self.process_roi(&image))
    }

    /// Feeds one already-validated ROI image through the window and, once
    /// the three-frame FIFO has filled, the state machine. Returns `None`
    /// during the two-tick warmup and thereafter one result per call.
    pub fn process_roi(&mut self, image: &RoiImage) -> Option<SparkResult> {
        self.width = image.width();
        let info = frame_info::analyze(image, &self.config, &mut self.scratch);
        let frame_index = self.next_frame_index;
        self.next_frame_index += 1;
        let slot = FrameSlot {
            gray: self.scratch.gray.clone(),
            info,
            frame_index,
        };
        let tick = self.window.push(slot)?;
        Some(fsm::classify(&tick, &mut self.fsm, self.width, &self.config))
    }

    /// Clears the window, all state-machine caches, and the frame counter,
    /// returning the detector to its freshly-created `Idle` condition
    /// without releasing its scratch allocations.
    pub fn reset(&mut self) {
        self.window.reset();
        self.fsm.enter_idle();
        self.next_frame_index = 0;
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
