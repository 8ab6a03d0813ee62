//! FFmpeg command construction.
//!
//! Maps a logical output codec name to encoder flags and an output container
//! extension via static lookup tables, then composes the full argument list
//! for one conversion. Unknown codec names are passed to ffmpeg unchanged
//! (identity fallback) rather than validated against a whitelist.

use crate::config::{CoreConfig, ScaleFactors, TrimWindow};
use crate::error::{CoreError, CoreResult};

use ffmpeg_sidecar::command::FfmpegCommand;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Encoder flag sets per logical codec. CRF is appended separately for the
/// encoders that take one.
static ENCODER_FLAGS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    map.insert("h265", &["-c:v", "libx265", "-preset", "medium"]);
    map.insert("h264", &["-c:v", "libx264", "-preset", "medium"]);
    map.insert(
        "ffv1",
        &["-c:v", "ffv1", "-level", "3", "-coder", "1", "-context", "1"],
    );
    map.insert("rawvideo", &["-c:v", "rawvideo", "-pix_fmt", "yuv420p"]);
    map
});

/// Output container extension per logical codec; anything not listed gets mp4.
static OUTPUT_EXTENSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("rawvideo", "avi");
    map
});

/// ffprobe codec names that differ from the logical names used for output
/// selection.
static CODEC_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("hevc", "h265");
    map.insert("avc", "h264");
    map
});

/// Normalizes an input codec name reported by ffprobe to the logical codec
/// vocabulary. Unknown names pass through unchanged.
#[must_use]
pub fn normalize_codec(name: &str) -> &str {
    CODEC_ALIASES.get(name).copied().unwrap_or(name)
}

/// Returns the output container extension for a logical codec.
#[must_use]
pub fn output_extension(codec: &str) -> &'static str {
    OUTPUT_EXTENSIONS.get(codec).copied().unwrap_or("mp4")
}

/// Parameters for one conversion attempt. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub output_codec: String,
    pub crf: u32,
    pub scale: Option<ScaleFactors>,
    pub frame_rate: Option<f64>,
    pub trim: Option<TrimWindow>,
    pub overwrite: bool,
}

impl ConversionRequest {
    /// Builds the request for one input file from the shared settings record.
    #[must_use]
    pub fn from_config(config: &CoreConfig, input_path: &Path) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_codec: config.output_codec.clone(),
            crf: config.crf,
            scale: config.scale,
            frame_rate: config.frame_rate,
            trim: config.trim,
            overwrite: config.overwrite,
        }
    }

    /// Derives the output path: `<stem>_out.<ext>` next to the input file.
    pub fn output_path(&self) -> CoreResult<PathBuf> {
        let stem = self
            .input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                CoreError::PathError(format!(
                    "Failed to get file stem for {}",
                    self.input_path.display()
                ))
            })?;
        let directory = self.input_path.parent().unwrap_or_else(|| Path::new(""));
        let extension = output_extension(&self.output_codec);
        Ok(directory.join(format!("{stem}_out.{extension}")))
    }
}

/// Returns the encoder argument list for a logical codec.
///
/// Known codecs use their flag set from the lookup table; x264/x265 also get
/// the CRF appended. An unknown codec becomes a bare `-c:v <name>`.
fn encoder_args(codec: &str, crf: u32) -> Vec<String> {
    match ENCODER_FLAGS.get(codec) {
        Some(flags) => {
            let mut args: Vec<String> = flags.iter().map(|s| (*s).to_string()).collect();
            if matches!(codec, "h264" | "h265") {
                args.push("-crf".to_string());
                args.push(crf.to_string());
            }
            args
        }
        None => vec!["-c:v".to_string(), codec.to_string()],
    }
}

/// Builds the complete ffmpeg command for a conversion request.
///
/// Argument order: overwrite, input, frame-rate override, scale filter,
/// encoder flags, audio stream copy, trim window, output path.
pub fn build_command(request: &ConversionRequest) -> CoreResult<(FfmpegCommand, PathBuf)> {
    let output_path = request.output_path()?;

    let mut cmd = FfmpegCommand::new();
    cmd.arg("-y");
    cmd.input(request.input_path.to_string_lossy().as_ref());

    if let Some(fps) = request.frame_rate {
        cmd.args(["-r", &fps.to_string()]);
    }

    if let Some(scale) = &request.scale {
        cmd.args([
            "-vf",
            &format!("scale=iw*{}:ih*{}", scale.width, scale.height),
        ]);
    }

    for arg in encoder_args(&request.output_codec, request.crf) {
        cmd.arg(arg);
    }

    cmd.args(["-c:a", "copy"]);

    if let Some(trim) = &request.trim {
        cmd.args(["-ss", &trim.start.to_string()]);
        cmd.args(["-to", &trim.stop.to_string()]);
    }

    cmd.output(output_path.to_string_lossy().as_ref());

    log::debug!("Built ffmpeg command: {cmd:?}");
    Ok((cmd, output_path))
}
