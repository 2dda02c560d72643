use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use image::RgbImage;

use super::{CaptureError, FrameSource};

const STILL_UTILITY: &str = "raspistill";
const FRAME_WIDTH: &str = "640";
const FRAME_HEIGHT: &str = "480";

/// Raspberry Pi camera module. Shells out to the platform still-capture
/// utility, which writes the raw frame straight to `raw_path`; the raw
/// file can therefore remain on disk even when later stages fail.
pub struct RpiCamera {
    raw_path: PathBuf,
}

impl RpiCamera {
    pub fn new(raw_path: PathBuf) -> Self {
        Self { raw_path }
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }
}

impl FrameSource for RpiCamera {
    fn acquire(&mut self) -> Result<RgbImage, CaptureError> {
        let status = Command::new(STILL_UTILITY)
            .args(["-w", FRAME_WIDTH, "-h", FRAME_HEIGHT, "-o"])
            .arg(&self.raw_path)
            .status();

        let status = match status {
            Ok(status) => status,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(CaptureError::UtilityMissing);
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context("run still-capture utility")
                    .into());
            }
        };
        if !status.success() {
            return Err(CaptureError::UtilityFailed {
                status: status.code().unwrap_or(-1),
            });
        }

        let image = image::open(&self.raw_path)
            .with_context(|| format!("reload captured still {}", self.raw_path.display()))?;
        Ok(image.to_rgb8())
    }
}
