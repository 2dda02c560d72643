use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::camera::rpi::RpiCamera;
use crate::camera::usb::UsbCamera;
use crate::camera::{CaptureError, FrameSource};
use crate::config::{CameraKind, Config};
use crate::detection::{self, HoughParams};
use crate::farmware::{MessageKind, MessageLog};
use crate::{output, rotate};

/// One capture run, dispatched on the configured camera strategy. Returns
/// the path of the annotated image, or None when the run ended in a logged
/// terminal state.
pub fn run(config: &Config, log: &dyn MessageLog) -> Result<Option<PathBuf>> {
    match config.camera {
        CameraKind::Usb => run_usb(Path::new("/dev"), config, log),
        CameraKind::Rpi => {
            // The still utility writes the raw frame here; the directory
            // must exist before it runs.
            fs::create_dir_all(&config.images_dir)?;
            let raw_path = output::upload_path(&config.images_dir, &output::image_filename());
            capture_rpi(RpiCamera::new(raw_path), config, log)
        }
    }
}

/// USB entry point: probe the device nodes under `dev_dir`, then capture.
/// An absent camera is a logged terminal state, not an error.
pub fn run_usb(dev_dir: &Path, config: &Config, log: &dyn MessageLog) -> Result<Option<PathBuf>> {
    match UsbCamera::detect_in(dev_dir) {
        Ok(camera) => capture_usb(camera, config, log),
        Err(_) => {
            log.log("USB Camera not detected.", MessageKind::Error)?;
            Ok(None)
        }
    }
}

/// USB path: acquire, rotate when calibration data exists, detect, save.
/// The `rotated_` prefix is only added when the rotation actually ran.
pub fn capture_usb(
    mut source: impl FrameSource,
    config: &Config,
    log: &dyn MessageLog,
) -> Result<Option<PathBuf>> {
    let frame = match source.acquire() {
        Ok(frame) => frame,
        Err(_) => {
            log.log("Problem getting image.", MessageKind::Error)?;
            return Ok(None);
        }
    };

    let mut filename = output::image_filename();
    let mut frame = match config.calibration_angle {
        Some(angle) => {
            filename = format!("rotated_{filename}");
            rotate::rotate(frame, angle)
        }
        None => frame,
    };

    let circles = detection::detect_and_mark(&mut frame, &HoughParams::default())?;
    let path = output::upload_path(&config.images_dir, &filename);
    output::save_image(&frame, &path)?;
    info!("image saved: {} ({} circles)", path.display(), circles.len());
    Ok(Some(path))
}

/// Raspberry Pi path: the utility already wrote the raw frame to disk, so
/// detection runs on the reloaded file and the result is saved under a
/// fresh `marked_` name. No calibration rotation on this path.
pub fn capture_rpi(
    mut source: impl FrameSource,
    config: &Config,
    log: &dyn MessageLog,
) -> Result<Option<PathBuf>> {
    let mut frame = match source.acquire() {
        Ok(frame) => frame,
        Err(CaptureError::UtilityMissing) => {
            log.log("Raspberry Pi Camera not detected.", MessageKind::Error)?;
            return Ok(None);
        }
        Err(_) => {
            log.log("Problem getting image.", MessageKind::Error)?;
            return Ok(None);
        }
    };

    let circles = detection::detect_and_mark(&mut frame, &HoughParams::default())?;
    let marked_name = format!("marked_{}", output::image_filename());
    let path = output::upload_path(&config.images_dir, &marked_name);
    output::save_image(&frame, &path)?;
    info!("image saved: {} ({} circles)", path.display(), circles.len());
    Ok(Some(path))
}
