use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;
use time::OffsetDateTime;

/// Timestamped output name, e.g. `1692800000.jpg`. Runs within the same
/// second reuse the name and overwrite the earlier file.
pub fn image_filename() -> String {
    format!("{}.jpg", OffsetDateTime::now_utc().unix_timestamp())
}

/// Full path for an image destined for upload.
pub fn upload_path(images_dir: &Path, filename: &str) -> PathBuf {
    images_dir.join(filename)
}

/// Writes the final frame as JPEG, creating the output directory when
/// missing. No atomicity, no existence check before overwrite.
pub fn save_image(frame: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    frame
        .save(path)
        .with_context(|| format!("write image {}", path.display()))?;
    Ok(())
}
