use ab_glyph::{FontRef, PxScale};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_text_mut};

use super::Circle;

const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
const CENTER_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
const LABEL_COLOR: Rgb<u8> = Rgb([200, 200, 0]);
const CENTER_DOT_RADIUS: i32 = 3;
const LABEL_SCALE: f32 = 22.0;

const FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Draws every detection onto the frame: circle outline at the detected
/// radius, a filled dot on the center and the center coordinates as text
/// beside it. A no-op for an empty detection list.
pub fn mark_circles(frame: &mut RgbImage, circles: &[Circle]) -> Result<()> {
    if circles.is_empty() {
        return Ok(());
    }
    let font = FontRef::try_from_slice(FONT_BYTES).context("parse embedded label font")?;
    let scale = PxScale::from(LABEL_SCALE);

    for circle in circles {
        let center = (circle.cx as i32, circle.cy as i32);

        // Three concentric rings approximate the 3 px outline width.
        for offset in -1..=1i32 {
            let radius = circle.radius as i32 + offset;
            if radius > 0 {
                draw_hollow_circle_mut(frame, center, radius, OUTLINE_COLOR);
            }
        }
        draw_filled_circle_mut(frame, center, CENTER_DOT_RADIUS, CENTER_COLOR);

        let label = format!("({}, {})", circle.cx, circle.cy);
        draw_text_mut(frame, LABEL_COLOR, center.0, center.1, scale, &font, &label);
    }
    Ok(())
}
