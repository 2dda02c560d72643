use image::{Rgb, RgbImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

/// Splits a calibration angle into whole quarter turns plus a residual.
///
/// The parts recombine exactly: `turns * 90 + residual == angle`, and the
/// residual magnitude never exceeds 45 degrees. A remainder beyond 45°
/// takes one extra turn in the sign-appropriate direction so the affine
/// step stays small.
pub fn decompose_angle(angle: f32) -> (i32, f32) {
    let mut turns = (angle / 90.0).trunc() as i32;
    if angle.abs() % 90.0 > 45.0 {
        turns += if angle < 0.0 { -1 } else { 1 };
    }
    (turns, angle - 90.0 * turns as f32)
}

/// Applies the stored calibration rotation: exact quarter turns first
/// (lossless transpositions), then the residual as an affine rotation
/// about the image center. The residual step preserves dimensions; corners
/// uncovered by it are filled black.
pub fn rotate(image: RgbImage, angle: f32) -> RgbImage {
    let (turns, residual) = decompose_angle(angle);
    let turned = match turns.rem_euclid(4) {
        1 => imageops::rotate90(&image),
        2 => imageops::rotate180(&image),
        3 => imageops::rotate270(&image),
        _ => image,
    };
    if residual == 0.0 {
        return turned;
    }
    rotate_about_center(
        &turned,
        residual.to_radians(),
        Interpolation::Bilinear,
        Rgb([0, 0, 0]),
    )
}
