use directories::UserDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("No content available for download.")]
    Empty,

    #[error("Failed to locate home directory")]
    NoHome,

    #[error("Failed to save file: {0}")]
    Io(#[from] io::Error),
}

/// The user's Downloads directory, or `~/Downloads` if the platform has none.
pub fn downloads_dir() -> Result<PathBuf, DownloadError> {
    let dirs = UserDirs::new().ok_or(DownloadError::NoHome)?;
    Ok(dirs
        .download_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dirs.home_dir().join("Downloads")))
}

/// Write `data` as `file_name` in the Downloads directory.
pub fn save_to_downloads(file_name: &str, data: &[u8]) -> Result<PathBuf, DownloadError> {
    if data.is_empty() {
        return Err(DownloadError::Empty);
    }
    save_into(&downloads_dir()?, file_name, data)
}

/// Ask the user where to put `data`; `Ok(None)` when the dialog is cancelled.
pub fn save_as(file_name: &str, data: &[u8]) -> Result<Option<PathBuf>, DownloadError> {
    if data.is_empty() {
        return Err(DownloadError::Empty);
    }
    let mut dialog = rfd::FileDialog::new().set_file_name(file_name);
    if let Ok(dir) = downloads_dir() {
        dialog = dialog.set_directory(dir);
    }
    let Some(path) = dialog.save_file() else {
        return Ok(None);
    };
    fs::write(&path, data)?;
    info!("Saved {} bytes to {:?}", data.len(), path);
    Ok(Some(path))
}

fn save_into(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf, DownloadError> {
    if data.is_empty() {
        return Err(DownloadError::Empty);
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, data)?;
    info!("Saved {} bytes to {:?}", data.len(), path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_dir() -> PathBuf {
        std::env::temp_dir().join(format!("test_downloads_{}", Uuid::new_v4()))
    }

    #[test]
    fn saves_into_missing_directory() {
        let dir = test_dir();
        let path = save_into(&dir, "current.html", b"<p>hi</p>").unwrap();
        assert_eq!(path, dir.join("current.html"));
        assert_eq!(fs::read(&path).unwrap(), b"<p>hi</p>");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = test_dir();
        save_into(&dir, "previous.html", b"old").unwrap();
        let path = save_into(&dir, "previous.html", b"new").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn refuses_empty_content() {
        let dir = test_dir();
        assert!(matches!(save_into(&dir, "x.png", b""), Err(DownloadError::Empty)));
        assert!(!dir.exists());
    }
}
