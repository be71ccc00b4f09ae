use std::path::{Path, PathBuf};

use tracing::debug;

use crate::inspection::common::error::{InspectionError, Result};

/// Extensions picked up from an input folder, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Image files directly inside `dir`, sorted by path. Subfolders are not visited.
pub fn find_images<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir)
        .map_err(|e| InspectionError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            images.push(path);
        }
    }
    images.sort();

    debug!("Found {} images in {}", images.len(), dir.display());
    Ok(images)
}
