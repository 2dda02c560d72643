mod common;

use std::path::PathBuf;

use circle_track::app::{capture_rpi, capture_usb, run_usb};
use circle_track::config::{CameraKind, Config};
use circle_track::farmware::MessageKind;
use common::{MissingUtilitySource, NoFrameSource, RecordingLog, StaticFrame, disc_image};

fn test_config(images_dir: PathBuf, calibration_angle: Option<f32>) -> Config {
    Config {
        camera: CameraKind::Usb,
        images_dir,
        calibration_angle,
        farmware: None,
    }
}

#[test]
fn failed_usb_read_logs_and_writes_nothing() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let config = test_config(dir.path().to_path_buf(), None);
    let log = RecordingLog::new();

    let saved = capture_usb(NoFrameSource, &config, &log)?;

    assert!(saved.is_none());
    assert_eq!(
        log.messages(),
        vec![("Problem getting image.".to_string(), MessageKind::Error)]
    );
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn absent_camera_logs_and_writes_nothing() -> anyhow::Result<()> {
    let dev = tempfile::TempDir::new()?;
    let dir = tempfile::TempDir::new()?;
    let config = test_config(dir.path().to_path_buf(), None);
    let log = RecordingLog::new();

    let saved = run_usb(dev.path(), &config, &log)?;

    assert!(saved.is_none());
    assert_eq!(
        log.messages(),
        vec![("USB Camera not detected.".to_string(), MessageKind::Error)]
    );
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn usb_capture_without_calibration_uses_plain_name() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let config = test_config(dir.path().to_path_buf(), None);
    let log = RecordingLog::new();

    let saved = capture_usb(StaticFrame(disc_image(320, 240, 160, 120, 60)), &config, &log)?;

    let path = saved.expect("capture should produce a file");
    assert!(path.exists());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(!name.starts_with("rotated_"), "unexpected prefix: {name}");
    assert!(name.ends_with(".jpg"));
    assert!(log.messages().is_empty());
    Ok(())
}

#[test]
fn usb_capture_with_calibration_adds_rotated_prefix() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let config = test_config(dir.path().to_path_buf(), Some(0.0));
    let log = RecordingLog::new();

    let saved = capture_usb(StaticFrame(disc_image(320, 240, 160, 120, 60)), &config, &log)?;

    let path = saved.expect("capture should produce a file");
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("rotated_"), "missing prefix: {name}");
    Ok(())
}

#[test]
fn missing_still_utility_logs_the_specific_message() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let config = test_config(dir.path().to_path_buf(), None);
    let log = RecordingLog::new();

    let saved = capture_rpi(MissingUtilitySource, &config, &log)?;

    assert!(saved.is_none());
    assert_eq!(
        log.messages(),
        vec![(
            "Raspberry Pi Camera not detected.".to_string(),
            MessageKind::Error
        )]
    );
    Ok(())
}

#[test]
fn rpi_capture_saves_under_marked_prefix() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let config = test_config(dir.path().to_path_buf(), None);
    let log = RecordingLog::new();

    let saved = capture_rpi(StaticFrame(disc_image(320, 240, 160, 120, 60)), &config, &log)?;

    let path = saved.expect("capture should produce a file");
    assert!(path.exists());
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("marked_"), "missing prefix: {name}");
    assert!(name.ends_with(".jpg"));
    Ok(())
}
