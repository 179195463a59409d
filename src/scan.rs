//! Media directory scanning.
//!
//! Reads the immediate entries of a directory (no recursion) and sorts every
//! regular file into images or videos by extension. Subdirectories and
//! every other file are ignored.
//!
//! ```text
//! references/
//! ├── gesture-deck.toml   # ignored (config)
//! ├── pose-01.JPG         # image (extensions are case-insensitive)
//! ├── pose-02.webp        # image
//! ├── dance.mp4           # video
//! ├── notes.txt           # ignored
//! └── archive/            # ignored (not scanned)
//! ```
//!
//! The resulting [`Inventory`] lists paths in sorted order so that a seeded
//! random source produces the same session on every run.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Which decoder a pool entry needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];

/// Classify a path by its extension (case-insensitive).
///
/// The extension is whatever follows the last `.` of the file name, so a
/// dotfile such as `.png` counts as a PNG.
pub fn classify(path: &Path) -> Option<MediaKind> {
    let name = path.file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Everything usable found in one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub images: Vec<PathBuf>,
    pub videos: Vec<PathBuf>,
}

impl Inventory {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty()
    }
}

pub fn scan(dir: &Path) -> Result<Inventory, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let mut inventory = Inventory::default();
    for path in files {
        match classify(&path) {
            Some(MediaKind::Image) => inventory.images.push(path),
            Some(MediaKind::Video) => inventory.videos.push(path),
            None => {}
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        images = inventory.images.len(),
        videos = inventory.videos.len(),
        "scanned media directory"
    );
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::touch;
    use tempfile::TempDir;

    #[test]
    fn classify_known_extensions() {
        assert_eq!(classify(Path::new("a.jpg")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("a.jpeg")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("a.png")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("a.bmp")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("a.webp")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("a.mp4")), Some(MediaKind::Video));
        assert_eq!(classify(Path::new("a.mov")), Some(MediaKind::Video));
        assert_eq!(classify(Path::new("a.avi")), Some(MediaKind::Video));
        assert_eq!(classify(Path::new("a.mkv")), Some(MediaKind::Video));
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(classify(Path::new("POSE.JPG")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("clip.MoV")), Some(MediaKind::Video));
    }

    #[test]
    fn classify_ignores_other_files() {
        assert_eq!(classify(Path::new("notes.txt")), None);
        assert_eq!(classify(Path::new("photo.tiff")), None);
        assert_eq!(classify(Path::new("png")), None);
        assert_eq!(classify(Path::new("noext")), None);
        assert_eq!(classify(Path::new("trailing.")), None);
    }

    #[test]
    fn classify_dotfiles_by_suffix() {
        assert_eq!(classify(Path::new(".png")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new("/refs/.MP4")), Some(MediaKind::Video));
        assert_eq!(classify(Path::new(".hidden.jpg")), Some(MediaKind::Image));
        assert_eq!(classify(Path::new(".gitignore")), None);
    }

    #[test]
    fn scan_includes_dotfile_media() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join(".png"));
        touch(&tmp.path().join("a.png"));

        let inventory = scan(tmp.path()).unwrap();
        assert_eq!(
            inventory.images,
            vec![tmp.path().join(".png"), tmp.path().join("a.png")]
        );
    }

    #[test]
    fn scan_sorts_into_images_and_videos() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("b.png"));
        touch(&tmp.path().join("a.JPG"));
        touch(&tmp.path().join("clip.mp4"));
        touch(&tmp.path().join("readme.txt"));

        let inventory = scan(tmp.path()).unwrap();
        assert_eq!(
            inventory.images,
            vec![tmp.path().join("a.JPG"), tmp.path().join("b.png")]
        );
        assert_eq!(inventory.videos, vec![tmp.path().join("clip.mp4")]);
    }

    #[test]
    fn scan_is_not_recursive() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested.join("deep.png"));
        // A directory named like an image is not a file.
        std::fs::create_dir(tmp.path().join("folder.png")).unwrap();

        let inventory = scan(tmp.path()).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn scan_missing_directory_errors() {
        let result = scan(Path::new("/nonexistent/gesture-deck/media"));
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn scan_file_path_errors() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.png");
        touch(&file);
        assert!(matches!(scan(&file), Err(ScanError::NotADirectory(_))));
    }
}
