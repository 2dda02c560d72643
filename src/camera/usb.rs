use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use image::{Rgb, RgbImage};
use log::info;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

use super::{CaptureError, FrameSource};

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;
const BUFFER_COUNT: u32 = 4;
/// Time to let the device settle after the buffers are mapped.
const SETTLE: Duration = Duration::from_millis(100);
/// Frames discarded so auto-exposure and white balance stabilize.
pub const WARMUP_FRAMES: usize = 20;

/// USB webcam backed by V4L2.
pub struct UsbCamera {
    device_path: PathBuf,
}

impl UsbCamera {
    /// Probes `/dev/video0` and falls back to `/dev/video1` once.
    pub fn detect() -> Result<Self, CaptureError> {
        Self::detect_in(Path::new("/dev"))
    }

    /// Same probe rooted at an arbitrary device directory.
    pub fn detect_in(dev_dir: &Path) -> Result<Self, CaptureError> {
        for port in 0..=1u32 {
            let path = dev_dir.join(format!("video{port}"));
            if path.exists() {
                return Ok(Self { device_path: path });
            }
            info!("no camera detected at video{port}");
        }
        Err(CaptureError::CameraAbsent)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            device_path: path.into(),
        }
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }
}

impl FrameSource for UsbCamera {
    fn acquire(&mut self) -> Result<RgbImage, CaptureError> {
        let device = Device::with_path(&self.device_path)
            .with_context(|| format!("open capture device {}", self.device_path.display()))?;
        let format = Capture::set_format(
            &device,
            &Format::new(FRAME_WIDTH, FRAME_HEIGHT, FourCC::new(b"MJPG")),
        )
        .context("negotiate capture format")?;
        let mut stream = Stream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT)
            .context("map capture buffers")?;

        thread::sleep(SETTLE);
        drain_warmup(|| stream.next().map(|_| ()));

        let (data, _meta) = stream.next().map_err(|_| CaptureError::NoFrame)?;
        if data.is_empty() {
            return Err(CaptureError::NoFrame);
        }
        decode_frame(data, &format)
    }
}

/// Runs every warm-up grab regardless of individual failures; only the
/// read that follows decides whether the capture succeeded.
pub fn drain_warmup<E>(mut grab: impl FnMut() -> Result<(), E>) {
    for _ in 0..WARMUP_FRAMES {
        let _ = grab();
    }
}

/// Decodes the raw buffer according to the fourcc the driver actually
/// negotiated, which may differ from the one requested.
fn decode_frame(data: &[u8], format: &Format) -> Result<RgbImage, CaptureError> {
    match &format.fourcc.repr {
        b"MJPG" => {
            let decoded = image::load_from_memory(data).context("decode MJPEG frame")?;
            Ok(decoded.to_rgb8())
        }
        b"YUYV" => yuyv_to_rgb(data, format.width, format.height),
        other => Err(anyhow!(
            "unsupported pixel format {}",
            String::from_utf8_lossy(other)
        )
        .into()),
    }
}

/// Packed YUY2: every four bytes hold two horizontally adjacent pixels
/// sharing one chroma pair.
fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Result<RgbImage, CaptureError> {
    let expected = (width * height * 2) as usize;
    if width % 2 != 0 || data.len() < expected {
        return Err(CaptureError::NoFrame);
    }

    let mut out = RgbImage::new(width, height);
    for (i, chunk) in data[..expected].chunks_exact(4).enumerate() {
        let (y0, u, y1, v) = (
            chunk[0] as f32,
            chunk[1] as f32 - 128.0,
            chunk[2] as f32,
            chunk[3] as f32 - 128.0,
        );
        let px = 2 * i as u32;
        let (x, row) = (px % width, px / width);
        out.put_pixel(x, row, yuv_pixel(y0, u, v));
        out.put_pixel(x + 1, row, yuv_pixel(y1, u, v));
    }
    Ok(out)
}

fn yuv_pixel(y: f32, u: f32, v: f32) -> Rgb<u8> {
    let r = y + 1.402 * v;
    let g = y - 0.344 * u - 0.714 * v;
    let b = y + 1.772 * u;
    Rgb([clamp_u8(r), clamp_u8(g), clamp_u8(b)])
}

fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
