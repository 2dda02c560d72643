use image::{GrayImage, RgbImage, imageops};
use imageproc::filter::gaussian_blur_f32;

/// Convert the captured frame to grayscale
pub fn to_grayscale(frame: &RgbImage) -> GrayImage {
    imageops::grayscale(frame)
}

/// Apply Gaussian blur to suppress noise before edge voting
pub fn apply_blur(gray: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(gray, sigma)
}
