//! Installs a real `tracing-subscriber` layer and drives a full
//! Idle/Fill/TurnLight/Fade cycle through it, checking that the FSM's
//! transition logs actually land on the wire with a frame index attached.

mod support;

use std::io;
use std::sync::{Arc, Mutex};

use castspark_core::{Detector, PixelLayout};
use support::{bg_factor_for_v, make_roi_bgr, HEIGHT, WIDTH};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn push(det: &mut Detector, spark_col: Option<usize>, v: f64) {
    let buf = make_roi_bgr(spark_col, bg_factor_for_v(v));
    det.process_frame(&buf, WIDTH, HEIGHT, PixelLayout::Bgr)
        .expect("well-formed synthetic frame");
}

#[test]
fn fill_to_turnlight_transition_is_logged_with_a_frame_index() {
    let sink = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut det = Detector::new();
        push(&mut det, None, 55.0);
        push(&mut det, None, 55.0);
        push(&mut det, Some(10), 55.0); // Idle -> Fill
        push(&mut det, None, 55.0); // Fill -> TurnLight (non-decreasing)
        push(&mut det, None, 55.0);
    });

    let log = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
    assert!(log.contains("-> Fill"), "missing Fill-entry log, got: {log}");
    assert!(log.contains("Fill -> TurnLight"), "missing Fill->TurnLight log, got: {log}");
    assert!(log.contains("frame_index"), "transition logs must carry a frame index, got: {log}");
}
