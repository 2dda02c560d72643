use std::env;
use std::path::PathBuf;

/// Fallback output directory when `IMAGES_DIR` is not set.
pub const DEFAULT_IMAGES_DIR: &str = "/tmp/images";

const CAMERA_VAR: &str = "camera";
const IMAGES_DIR_VAR: &str = "IMAGES_DIR";
const CALIBRATION_VAR: &str = "CAMERA_CALIBRATION_total_rotation_angle";
const FARMWARE_URL_VAR: &str = "FARMWARE_URL";
const FARMWARE_TOKEN_VAR: &str = "FARMWARE_TOKEN";

/// Which capture strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKind {
    Usb,
    Rpi,
}

impl CameraKind {
    /// The `camera` variable selects the Raspberry Pi module whenever it
    /// mentions `RPI`; anything else (including absence) means USB.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.contains("RPI") => CameraKind::Rpi,
            _ => CameraKind::Usb,
        }
    }
}

/// Host-provided endpoint for remote logging.
#[derive(Debug, Clone)]
pub struct FarmwareEnv {
    pub url: String,
    pub token: String,
}

/// Everything the process reads from its environment. Presence checks
/// only; missing or malformed values fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub camera: CameraKind,
    pub images_dir: PathBuf,
    pub calibration_angle: Option<f32>,
    pub farmware: Option<FarmwareEnv>,
}

impl Config {
    pub fn from_env() -> Self {
        let camera = CameraKind::from_env_value(env::var(CAMERA_VAR).ok().as_deref());

        let images_dir = env::var(IMAGES_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_IMAGES_DIR));

        let calibration_angle = parse_calibration(env::var(CALIBRATION_VAR).ok().as_deref());

        let farmware = match (env::var(FARMWARE_URL_VAR), env::var(FARMWARE_TOKEN_VAR)) {
            (Ok(url), Ok(token)) => Some(FarmwareEnv { url, token }),
            _ => None,
        };

        Self {
            camera,
            images_dir,
            calibration_angle,
            farmware,
        }
    }
}

/// An unparseable angle behaves like an absent one: the rotation step is
/// skipped and the original frame is kept.
pub fn parse_calibration(value: Option<&str>) -> Option<f32> {
    value.and_then(|v| v.trim().parse().ok())
}
