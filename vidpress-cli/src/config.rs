// vidpress-cli/src/config.rs
//
// Merges the JSON settings file with command-line overrides into the core
// configuration record.

use crate::cli::{ConvertArgs, HistoryArgs};
use vidpress_core::config::{ScaleFactors, TrimWindow};
use vidpress_core::{CoreConfig, CoreResult};

use std::path::{Path, PathBuf};

/// Settings file consulted when --config is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "vidpress.json";

/// Number of history entries shown by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 15;

fn load_base_config(config_path: Option<&Path>) -> CoreResult<CoreConfig> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    CoreConfig::load(&path)
}

/// Builds the effective configuration for a convert run: settings file
/// values first, then command-line overrides.
pub fn build_convert_config(args: &ConvertArgs) -> CoreResult<CoreConfig> {
    let mut config = load_base_config(args.config.as_deref())?;

    if let Some(codec) = &args.codec {
        config.output_codec = codec.clone();
    }
    if let Some(crf) = args.crf {
        config.crf = crf;
    }
    if let (Some(width), Some(height)) = (args.scale_width, args.scale_height) {
        config.scale = Some(ScaleFactors { width, height });
    }
    if let Some(fps) = args.frame_rate {
        config.frame_rate = Some(fps);
    }
    if let (Some(start), Some(stop)) = (args.trim_start, args.trim_end) {
        config.trim = Some(TrimWindow { start, stop });
    }
    if args.overwrite {
        config.overwrite = true;
    }
    if args.move_input {
        config.move_input = true;
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = log_file.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Resolves the conversion log location for the history command.
pub fn resolve_history_log(args: &HistoryArgs) -> CoreResult<PathBuf> {
    if let Some(log_file) = &args.log_file {
        return Ok(log_file.clone());
    }
    Ok(load_base_config(args.config.as_deref())?.log_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::cli::{Cli, Commands};

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        let mut full = vec!["vidpress", "convert"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Convert(args) => args,
            Commands::History(_) => unreachable!(),
        }
    }

    #[test]
    fn test_args_override_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(
            &settings,
            r#"{"output_codec": "h264", "crf": 20, "move_input": true}"#,
        )
        .unwrap();

        let config_flag = format!("--config={}", settings.display());
        let args = convert_args(&["in.mkv", &config_flag, "--codec", "ffv1"]);
        let config = build_convert_config(&args).unwrap();

        // CLI flag wins over the file
        assert_eq!(config.output_codec, "ffv1");
        // File values survive when no flag is given
        assert_eq!(config.crf, 20);
        assert!(config.move_input);
    }

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let args = convert_args(&["in.mkv"]);
        let config = build_convert_config(&args).unwrap();
        assert_eq!(config.output_codec, "h265");
        assert_eq!(config.crf, 28);
    }

    #[test]
    fn test_scale_and_trim_pairs_combined() {
        let args = convert_args(&[
            "in.mkv",
            "--scale-width",
            "0.5",
            "--scale-height",
            "0.25",
            "--trim-start",
            "2",
            "--trim-end",
            "8",
        ]);
        let config = build_convert_config(&args).unwrap();
        assert_eq!(
            config.scale,
            Some(ScaleFactors {
                width: 0.5,
                height: 0.25
            })
        );
        assert_eq!(
            config.trim,
            Some(TrimWindow {
                start: 2.0,
                stop: 8.0
            })
        );
    }

    #[test]
    fn test_invalid_merged_config_rejected() {
        let args = convert_args(&["in.mkv", "--trim-start", "10", "--trim-end", "5"]);
        assert!(build_convert_config(&args).is_err());
    }
}
