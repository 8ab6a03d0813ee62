// vidpress-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Vidpress: Batch video conversion tool",
    long_about = "Batch-converts video files between codecs using ffmpeg via the vidpress-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts video files to the selected output codec
    Convert(ConvertArgs),
    /// Shows or clears the persisted conversion history
    History(HistoryArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input video files, or a directory to scan for them
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Logical output codec (h265, h264, ffv1, rawvideo; other names are
    /// passed to ffmpeg unchanged)
    #[arg(short = 'c', long, value_name = "CODEC")]
    pub codec: Option<String>,

    /// CRF quality for the x264/x265 encoders (0-51, lower is higher quality)
    #[arg(long, value_name = "CRF", value_parser = clap::value_parser!(u32).range(0..=51))]
    pub crf: Option<u32>,

    /// Width scale factor applied to the input width (e.g. 0.5)
    #[arg(long, value_name = "FACTOR", requires = "scale_height")]
    pub scale_width: Option<f64>,

    /// Height scale factor applied to the input height (e.g. 0.5)
    #[arg(long, value_name = "FACTOR", requires = "scale_width")]
    pub scale_height: Option<f64>,

    /// Output frame-rate override
    #[arg(long, value_name = "FPS")]
    pub frame_rate: Option<f64>,

    /// Trim window start, in seconds from the beginning of the input
    #[arg(long, value_name = "SECONDS", requires = "trim_end")]
    pub trim_start: Option<f64>,

    /// Trim window end, in seconds from the beginning of the input
    #[arg(long, value_name = "SECONDS", requires = "trim_start")]
    pub trim_end: Option<f64>,

    /// Overwrite existing output files without asking
    #[arg(short = 'y', long)]
    pub overwrite: bool,

    /// Move each input file into an inputFiles/ subdirectory after a
    /// successful conversion
    #[arg(long)]
    pub move_input: bool,

    /// Optional: JSON settings file with defaults for the options above.
    /// Can also be set via the VIDPRESS_CONFIG environment variable.
    #[arg(long, value_name = "FILE", env = "VIDPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Optional: Override the conversion log location
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Number of recent entries to show
    #[arg(short = 'n', long, default_value_t = crate::config::DEFAULT_HISTORY_LIMIT)]
    pub limit: usize,

    /// Wipe the conversion history instead of showing it
    #[arg(long)]
    pub clear: bool,

    /// Optional: JSON settings file naming the conversion log location
    #[arg(long, value_name = "FILE", env = "VIDPRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Optional: Override the conversion log location
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_convert_basic_args() {
        let cli = Cli::parse_from(["vidpress", "convert", "a.mkv", "b.mp4"]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.inputs.len(), 2);
                assert!(args.codec.is_none());
                assert!(args.crf.is_none());
                assert!(!args.overwrite);
                assert!(!args.move_input);
            }
            Commands::History(_) => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_parse_convert_full_options() {
        let cli = Cli::parse_from([
            "vidpress",
            "convert",
            "input.mkv",
            "--codec",
            "h264",
            "--crf",
            "23",
            "--scale-width",
            "0.5",
            "--scale-height",
            "0.5",
            "--frame-rate",
            "24",
            "--trim-start",
            "1.5",
            "--trim-end",
            "10",
            "--overwrite",
            "--move-input",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.codec.as_deref(), Some("h264"));
                assert_eq!(args.crf, Some(23));
                assert_eq!(args.scale_width, Some(0.5));
                assert_eq!(args.scale_height, Some(0.5));
                assert_eq!(args.frame_rate, Some(24.0));
                assert_eq!(args.trim_start, Some(1.5));
                assert_eq!(args.trim_end, Some(10.0));
                assert!(args.overwrite);
                assert!(args.move_input);
            }
            Commands::History(_) => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_crf_out_of_range_rejected() {
        let result = Cli::try_parse_from(["vidpress", "convert", "a.mkv", "--crf", "300"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_scale_width_requires_height() {
        let result =
            Cli::try_parse_from(["vidpress", "convert", "a.mkv", "--scale-width", "0.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_history_defaults() {
        let cli = Cli::parse_from(["vidpress", "history"]);
        match cli.command {
            Commands::History(args) => {
                assert_eq!(args.limit, crate::config::DEFAULT_HISTORY_LIMIT);
                assert!(!args.clear);
            }
            Commands::Convert(_) => panic!("expected history command"),
        }
    }
}
