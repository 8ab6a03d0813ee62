//! File discovery module for finding video files to process.
//!
//! Scans the top level of a directory for files with a supported video
//! extension. Subdirectories are not searched.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Extensions accepted for conversion input, lowercase.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "m4v", "mkv", "3gp", "mov", "wmv"];

/// Checks whether a path carries a supported video extension
/// (case-insensitive). Does not touch the file system.
#[must_use]
pub fn is_supported_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|supported| ext_str.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Finds video files eligible for processing in the specified directory.
///
/// Results are sorted by path so batch order is stable across platforms.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the discovered video files
/// * `Err(CoreError::NoFilesFound)` - If the directory holds no supported files
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            (path.is_file() && is_supported_video(&path)).then_some(path)
        })
        .collect();

    files.sort();

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_video() {
        assert!(is_supported_video(Path::new("movie.mp4")));
        assert!(is_supported_video(Path::new("movie.MKV")));
        assert!(is_supported_video(Path::new("clip.3gp")));
        assert!(is_supported_video(Path::new("/abs/path/old.Wmv")));

        assert!(!is_supported_video(Path::new("notes.txt")));
        assert!(!is_supported_video(Path::new("archive.tar.gz")));
        assert!(!is_supported_video(Path::new("no_extension")));
    }

    #[test]
    fn test_find_processable_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mkv", "a.mp4", "notes.txt", "c.MOV"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.mp4")).unwrap();

        let files = find_processable_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.mp4", "b.mkv", "c.MOV"]);
    }

    #[test]
    fn test_find_processable_files_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "x").unwrap();
        assert!(matches!(
            find_processable_files(dir.path()),
            Err(CoreError::NoFilesFound)
        ));
    }
}
