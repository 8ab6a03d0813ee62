//! Conversion outcome types.
//!
//! Exactly one `ConversionOutcome` is produced per conversion attempt.

use std::fmt;
use std::path::PathBuf;

/// Why a conversion was skipped before spending any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The input is already encoded with the requested output codec.
    AlreadyTargetCodec,
    /// The output file exists and the caller declined to overwrite it.
    OutputDeclined,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyTargetCodec => {
                write!(f, "input is already in the requested format")
            }
            Self::OutputDeclined => {
                write!(f, "output file exists and overwrite was declined")
            }
        }
    }
}

/// Result of one conversion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    /// Nothing was done; the reason explains why.
    Skipped(SkipReason),
    /// ffmpeg exited cleanly and the output file exists. `output_size` was
    /// read after process exit; `ratio` is `None` when the input size was
    /// unknown (zero).
    Succeeded {
        output_path: PathBuf,
        output_size: u64,
        ratio: Option<f64>,
    },
    /// ffmpeg exited with a non-zero status.
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

impl ConversionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Computes output_size/input_size rounded to 3 decimals.
///
/// The ratio is only defined when the input size is positive.
#[must_use]
pub fn size_ratio(input_size: u64, output_size: u64) -> Option<f64> {
    if input_size == 0 {
        return None;
    }
    let ratio = output_size as f64 / input_size as f64;
    Some((ratio * 1000.0).round() / 1000.0)
}
