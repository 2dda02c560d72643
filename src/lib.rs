pub mod app;
pub mod camera;
pub mod config;
pub mod detection;
pub mod farmware;
pub mod output;
pub mod rotate;

pub use camera::{CaptureError, FrameSource};
pub use config::{CameraKind, Config};
pub use detection::{Circle, HoughParams, detect_and_mark};
pub use farmware::{ConsoleLog, FarmwareLog, MessageKind, MessageLog};
