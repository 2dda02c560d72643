pub mod rpi;
pub mod usb;

use image::RgbImage;
use thiserror::Error;

/// Everything that can go wrong while producing a frame.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no USB camera detected")]
    CameraAbsent,
    #[error("camera returned no frame")]
    NoFrame,
    #[error("still-capture utility exited with status {status}")]
    UtilityFailed { status: i32 },
    #[error("still-capture utility not found")]
    UtilityMissing,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single-shot frame source. Implementations acquire and release any
/// device handles within one call.
pub trait FrameSource {
    fn acquire(&mut self) -> Result<RgbImage, CaptureError>;
}
