use std::sync::Mutex;

use image::{Rgb, RgbImage};

use circle_track::camera::{CaptureError, FrameSource};
use circle_track::farmware::{MessageKind, MessageLog};

pub const DARK: Rgb<u8> = Rgb([20, 20, 20]);
pub const BRIGHT: Rgb<u8> = Rgb([230, 230, 230]);

/// Dark frame with a single bright filled disc.
pub fn disc_image(width: u32, height: u32, cx: u32, cy: u32, radius: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx as f32;
        let dy = y as f32 - cy as f32;
        if (dx * dx + dy * dy).sqrt() <= radius as f32 {
            BRIGHT
        } else {
            DARK
        }
    })
}

/// Uniform dark frame with no circular edges at all.
pub fn blank_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, DARK)
}

/// Frame source that hands out copies of a fixed frame.
pub struct StaticFrame(pub RgbImage);

impl FrameSource for StaticFrame {
    fn acquire(&mut self) -> Result<RgbImage, CaptureError> {
        Ok(self.0.clone())
    }
}

/// Frame source simulating a camera that opened but returned no frame.
pub struct NoFrameSource;

impl FrameSource for NoFrameSource {
    fn acquire(&mut self) -> Result<RgbImage, CaptureError> {
        Err(CaptureError::NoFrame)
    }
}

/// Frame source simulating an absent still-capture utility.
pub struct MissingUtilitySource;

impl FrameSource for MissingUtilitySource {
    fn acquire(&mut self) -> Result<RgbImage, CaptureError> {
        Err(CaptureError::UtilityMissing)
    }
}

/// Message log that records everything it is asked to send.
#[derive(Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<(String, MessageKind)>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, MessageKind)> {
        self.messages.lock().unwrap().clone()
    }
}

impl MessageLog for RecordingLog {
    fn log(&self, message: &str, kind: MessageKind) -> anyhow::Result<()> {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), kind));
        Ok(())
    }
}
