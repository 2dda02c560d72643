pub mod annotate;
pub mod hough;
pub mod preprocessing;

use anyhow::Result;
use image::RgbImage;

pub use hough::HoughParams;

/// Blur strength used before edge extraction.
pub const BLUR_SIGMA: f32 = 2.0;

/// A detected circle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub cx: u32,
    pub cy: u32,
    pub radius: u32,
}

/// Runs the fixed grayscale → blur → Hough chain on the frame and draws
/// every detection onto it. Zero detections is a valid outcome; the frame
/// is left untouched in that case.
pub fn detect_and_mark(frame: &mut RgbImage, params: &HoughParams) -> Result<Vec<Circle>> {
    let gray = preprocessing::to_grayscale(frame);
    let blurred = preprocessing::apply_blur(&gray, BLUR_SIGMA);
    let circles = hough::detect_circles(&blurred, params);
    annotate::mark_circles(frame, &circles)?;
    Ok(circles)
}
