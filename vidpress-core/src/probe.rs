//! Media probing via ffprobe.
//!
//! Reduces ffprobe's structured output to the handful of facts the
//! orchestration core needs: input codec, size, frame rate, duration, and a
//! total-frame estimate derived from the latter two. The estimate is known
//! to be inaccurate for variable-frame-rate sources.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Facts about one input file, derived once before conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Codec name of the first video stream, as reported by ffprobe
    pub codec: String,
    /// Size of the input file on disk, in bytes
    pub input_size: u64,
    /// floor(duration * frame_rate); 0 when either is unavailable
    pub total_frames: u64,
    /// Frames per second of the first video stream
    pub frame_rate: f64,
    /// Container duration in seconds
    pub duration_secs: f64,
}

impl ProbeResult {
    /// The degraded result used when probing fails: conversion proceeds with
    /// an unknown codec and no size/frame information.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            codec: "unknown".to_string(),
            input_size: 0,
            total_frames: 0,
            frame_rate: 1.0,
            duration_secs: 0.0,
        }
    }
}

/// Trait for executing ffprobe against an input file.
pub trait FfprobeExecutor {
    fn probe_file(&self, input_path: &Path) -> CoreResult<ProbeResult>;
}

/// Concrete implementation of `FfprobeExecutor` using the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn probe_file(&self, input_path: &Path) -> CoreResult<ProbeResult> {
        log::debug!("Running ffprobe on: {}", input_path.display());

        let metadata = ffprobe(input_path)
            .map_err(|err| map_ffprobe_error(err, input_path))?;

        let duration_secs = metadata
            .format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);

        let video_stream = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"));

        let (codec, frame_rate) = match video_stream {
            Some(stream) => {
                let codec = stream
                    .codec_name
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string());
                (codec, parse_frame_rate(&stream.r_frame_rate))
            }
            None => {
                log::warn!("No video stream found in {}", input_path.display());
                ("unknown".to_string(), 1.0)
            }
        };

        let input_size = std::fs::metadata(input_path)?.len();

        Ok(ProbeResult {
            codec,
            input_size,
            total_frames: total_frames(duration_secs, frame_rate),
            frame_rate,
            duration_secs,
        })
    }
}

/// Parses an ffprobe frame-rate fraction string ("30000/1001").
///
/// A zero denominator or an unparsable string falls back to 1.0.
#[must_use]
pub fn parse_frame_rate(fraction: &str) -> f64 {
    let mut parts = fraction.splitn(2, '/');
    let numerator = parts.next().and_then(|n| n.trim().parse::<f64>().ok());
    let denominator = parts.next().and_then(|d| d.trim().parse::<f64>().ok());
    match (numerator, denominator) {
        (Some(num), Some(den)) if den != 0.0 => num / den,
        (Some(num), None) if num > 0.0 => num,
        _ => 1.0,
    }
}

/// Estimates the total frame count as floor(duration * frame_rate).
#[must_use]
pub fn total_frames(duration_secs: f64, frame_rate: f64) -> u64 {
    if duration_secs <= 0.0 || frame_rate <= 0.0 {
        return 0;
    }
    (duration_secs * frame_rate).floor() as u64
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error("ffprobe", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error("ffprobe", output.status, stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::FfprobeParse(format!(
            "ffprobe output deserialization for {}: {err}",
            input_path.display()
        )),
        _ => CoreError::FfprobeParse(format!(
            "unknown ffprobe error for {}: {err:?}",
            input_path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("30/1"), 30.0);
        assert_eq!(parse_frame_rate("25/1"), 25.0);
        assert!((parse_frame_rate("30000/1001") - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("24"), 24.0);

        // Fallbacks
        assert_eq!(parse_frame_rate("0/0"), 1.0);
        assert_eq!(parse_frame_rate("30/0"), 1.0);
        assert_eq!(parse_frame_rate(""), 1.0);
        assert_eq!(parse_frame_rate("garbage"), 1.0);
        assert_eq!(parse_frame_rate("a/b"), 1.0);
    }

    #[test]
    fn test_total_frames_is_floor_of_duration_times_rate() {
        assert_eq!(total_frames(10.0, 30.0), 300);
        assert_eq!(total_frames(10.5, 30.0), 315);
        assert_eq!(total_frames(1.0, 29.97), 29);
        assert_eq!(total_frames(0.033, 30.0), 0);
    }

    #[test]
    fn test_total_frames_zero_when_unavailable() {
        assert_eq!(total_frames(0.0, 30.0), 0);
        assert_eq!(total_frames(10.0, 0.0), 0);
        assert_eq!(total_frames(-5.0, 30.0), 0);
    }

    #[test]
    fn test_unknown_probe_result() {
        let probe = ProbeResult::unknown();
        assert_eq!(probe.codec, "unknown");
        assert_eq!(probe.input_size, 0);
        assert_eq!(probe.total_frames, 0);
    }
}
