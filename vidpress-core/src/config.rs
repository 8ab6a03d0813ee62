//! Configuration structures and constants for the vidpress-core library.
//!
//! The settings record is an explicit struct passed by reference into the
//! orchestration core. It can be loaded from a JSON settings file with named
//! optional keys; missing keys (or a missing file) take the documented
//! defaults.

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// Default constants

/// Default logical output codec.
pub const DEFAULT_OUTPUT_CODEC: &str = "h265";

/// Default CRF (Constant Rate Factor) quality value for the x264/x265
/// encoders. Lower values produce higher quality but larger files.
pub const DEFAULT_CRF: u32 = 28;

/// Upper bound accepted for CRF values (x264/x265 range).
pub const MAX_CRF: u32 = 51;

/// Default location of the persisted conversion log, relative to the
/// working directory.
pub const DEFAULT_LOG_FILE: &str = "logs/conversion_log.json";

/// Width/height multipliers applied to the input dimensions via a scale
/// filter. `1.0` leaves the dimension unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScaleFactors {
    pub width: f64,
    pub height: f64,
}

/// Trim window in seconds from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrimWindow {
    pub start: f64,
    pub stop: f64,
}

/// Main configuration structure for the vidpress-core library.
///
/// Holds the conversion parameters shared by every file in a batch. It is
/// created by the consumer of the library (e.g., vidpress-cli) and passed to
/// the `process_videos` function by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Logical output codec ("h265", "h264", "ffv1", "rawvideo"). Names
    /// outside the known set are passed to ffmpeg unchanged.
    pub output_codec: String,

    /// CRF quality value for the x264/x265 encoders (0-51)
    pub crf: u32,

    /// Optional width/height scale factors applied via `-vf scale`
    pub scale: Option<ScaleFactors>,

    /// Optional output frame-rate override (`-r`)
    pub frame_rate: Option<f64>,

    /// Optional trim window (`-ss`/`-to`)
    pub trim: Option<TrimWindow>,

    /// Overwrite existing output files without asking
    pub overwrite: bool,

    /// Move each input file into an `inputFiles/` subdirectory after a
    /// successful conversion
    pub move_input: bool,

    /// Path of the persisted conversion log (JSON array)
    pub log_file: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            output_codec: DEFAULT_OUTPUT_CODEC.to_string(),
            crf: DEFAULT_CRF,
            scale: None,
            frame_rate: None,
            trim: None,
            overwrite: false,
            move_input: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl CoreConfig {
    /// Loads the configuration from a JSON settings file.
    ///
    /// A missing file is not an error: every key has a default, so the
    /// defaults are returned. A present but malformed file is an error.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            log::debug!(
                "Settings file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Validates the configuration, returning the first problem found.
    pub fn validate(&self) -> CoreResult<()> {
        if self.output_codec.trim().is_empty() {
            return Err(CoreError::Config("output codec must not be empty".into()));
        }
        if self.crf > MAX_CRF {
            return Err(CoreError::Config(format!(
                "CRF {} is out of range (0-{MAX_CRF})",
                self.crf
            )));
        }
        if let Some(scale) = &self.scale {
            if scale.width <= 0.0 || scale.height <= 0.0 {
                return Err(CoreError::Config(format!(
                    "scale factors must be positive (got {}x{})",
                    scale.width, scale.height
                )));
            }
        }
        if let Some(fps) = self.frame_rate {
            if fps <= 0.0 || !fps.is_finite() {
                return Err(CoreError::Config(format!(
                    "frame-rate override must be positive (got {fps})"
                )));
            }
        }
        if let Some(trim) = &self.trim {
            if trim.start < 0.0 || trim.stop <= trim.start {
                return Err(CoreError::Config(format!(
                    "trim window must satisfy 0 <= start < stop (got {}..{})",
                    trim.start, trim.stop
                )));
            }
        }
        Ok(())
    }
}
