mod analysis;
mod config;
mod consts;
mod detector;
mod error;
mod frame_info;
mod fsm;
mod image;
mod result;
mod scratch;
mod window;

pub use config::DetectorConfig;
pub use detector::Detector;
pub use error::{Result, SparkError};
pub use fsm::SparkState;
pub use image::{PixelLayout, RoiImage};
pub use result::SparkResult;
