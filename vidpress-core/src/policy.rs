//! Conversion policy: skip/overwrite decisions made before any work is spent.

use crate::command::{ConversionRequest, normalize_codec};
use crate::outcome::SkipReason;
use crate::probe::ProbeResult;
use std::path::Path;

/// Seam for asking the caller whether an existing output file may be
/// overwritten. The shell decides how: a flag, a terminal prompt, a dialog.
pub trait OverwriteConfirmer {
    fn confirm_overwrite(&self, output_path: &Path) -> bool;
}

/// Confirmer with a fixed answer. Useful when the decision was already made
/// up front (an `--overwrite` flag, or a non-interactive run).
#[derive(Debug, Clone, Copy)]
pub struct StaticConfirmer(pub bool);

impl OverwriteConfirmer for StaticConfirmer {
    fn confirm_overwrite(&self, _output_path: &Path) -> bool {
        self.0
    }
}

/// What to do with one conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Proceed,
    Skip(SkipReason),
}

/// Evaluates the skip policy for one request.
///
/// Skips when the normalized input codec already matches the requested
/// output codec, or when the output file exists and neither the overwrite
/// flag nor the confirmer allows replacing it. The overwrite flag forces a
/// re-encode even when the codec already matches.
pub fn evaluate<C: OverwriteConfirmer>(
    request: &ConversionRequest,
    probe: &ProbeResult,
    output_path: &Path,
    confirmer: &C,
) -> PolicyDecision {
    if !request.overwrite && normalize_codec(&probe.codec) == request.output_codec {
        return PolicyDecision::Skip(SkipReason::AlreadyTargetCodec);
    }

    if output_path.exists() && !request.overwrite && !confirmer.confirm_overwrite(output_path) {
        return PolicyDecision::Skip(SkipReason::OutputDeclined);
    }

    PolicyDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use std::path::PathBuf;

    fn request(output_codec: &str, overwrite: bool) -> ConversionRequest {
        let config = CoreConfig {
            output_codec: output_codec.to_string(),
            overwrite,
            ..Default::default()
        };
        ConversionRequest::from_config(&config, &PathBuf::from("/videos/input.mkv"))
    }

    fn probe(codec: &str) -> ProbeResult {
        ProbeResult {
            codec: codec.to_string(),
            input_size: 1_000_000,
            total_frames: 300,
            frame_rate: 30.0,
            duration_secs: 10.0,
        }
    }

    #[test]
    fn test_skip_when_codec_already_matches() {
        // ffprobe reports "hevc" for h265 content
        let decision = evaluate(
            &request("h265", false),
            &probe("hevc"),
            Path::new("/videos/input_out.mp4"),
            &StaticConfirmer(false),
        );
        assert_eq!(decision, PolicyDecision::Skip(SkipReason::AlreadyTargetCodec));
    }

    #[test]
    fn test_overwrite_forces_reencode_of_matching_codec() {
        let decision = evaluate(
            &request("h265", true),
            &probe("hevc"),
            Path::new("/videos/input_out.mp4"),
            &StaticConfirmer(false),
        );
        assert_eq!(decision, PolicyDecision::Proceed);
    }

    #[test]
    fn test_proceed_when_codec_differs() {
        let decision = evaluate(
            &request("h265", false),
            &probe("h264"),
            Path::new("/videos/input_out.mp4"),
            &StaticConfirmer(false),
        );
        assert_eq!(decision, PolicyDecision::Proceed);
    }

    #[test]
    fn test_unknown_probe_codec_proceeds() {
        let decision = evaluate(
            &request("h265", false),
            &ProbeResult::unknown(),
            Path::new("/videos/input_out.mp4"),
            &StaticConfirmer(false),
        );
        assert_eq!(decision, PolicyDecision::Proceed);
    }

    #[test]
    fn test_existing_output_declined_skips() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("input_out.mp4");
        std::fs::write(&output, "existing").unwrap();

        let decision = evaluate(
            &request("h265", false),
            &probe("h264"),
            &output,
            &StaticConfirmer(false),
        );
        assert_eq!(decision, PolicyDecision::Skip(SkipReason::OutputDeclined));
    }

    #[test]
    fn test_existing_output_confirmed_proceeds() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("input_out.mp4");
        std::fs::write(&output, "existing").unwrap();

        let decision = evaluate(
            &request("h265", false),
            &probe("h264"),
            &output,
            &StaticConfirmer(true),
        );
        assert_eq!(decision, PolicyDecision::Proceed);
    }

    #[test]
    fn test_overwrite_flag_short_circuits_confirmer() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("input_out.mp4");
        std::fs::write(&output, "existing").unwrap();

        let decision = evaluate(
            &request("h265", true),
            &probe("h264"),
            &output,
            &StaticConfirmer(false),
        );
        assert_eq!(decision, PolicyDecision::Proceed);
    }

    #[test]
    fn test_missing_output_never_asks() {
        let decision = evaluate(
            &request("h265", false),
            &probe("h264"),
            Path::new("/videos/definitely_not_there_out.mp4"),
            &StaticConfirmer(false),
        );
        assert_eq!(decision, PolicyDecision::Proceed);
    }
}
