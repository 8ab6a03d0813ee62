//! Utility functions for formatting and file housekeeping.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Subdirectory that processed input files are moved into.
pub const INPUT_FILES_DIR: &str = "inputFiles";

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns
/// "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Safely extracts the filename from a path with consistent error handling.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| {
            CoreError::PathError(format!("Failed to get filename for {}", path.display()))
        })?
        .to_string_lossy()
        .to_string())
}

/// Moves a processed input file into the `inputFiles/` subdirectory next to
/// it, creating the directory on demand. Returns the new location.
pub fn move_input_file(input_path: &Path) -> CoreResult<PathBuf> {
    let file_name = input_path.file_name().ok_or_else(|| {
        CoreError::PathError(format!(
            "Failed to get filename for {}",
            input_path.display()
        ))
    })?;
    let parent = input_path.parent().unwrap_or_else(|| Path::new(""));
    let target_dir = parent.join(INPUT_FILES_DIR);
    std::fs::create_dir_all(&target_dir)?;

    let target = target_dir.join(file_name);
    std::fs::rename(input_path, &target)?;
    log::debug!(
        "Moved {} -> {}",
        input_path.display(),
        target.display()
    );
    Ok(target)
}
