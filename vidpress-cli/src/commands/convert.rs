//! Implementation of the 'convert' subcommand.
//!
//! Resolves the input file list, merges settings, and hands the batch to the
//! vidpress-core library on a background worker thread while the terminal
//! handler renders progress.

use crate::cli::ConvertArgs;
use crate::config::build_convert_config;
use crate::progress::TerminalEventHandler;

use vidpress_core::events::EventDispatcher;
use vidpress_core::external::{SidecarSpawner, StdFsMetadataProvider};
use vidpress_core::policy::OverwriteConfirmer;
use vidpress_core::probe::CrateFfprobeExecutor;
use vidpress_core::{CoreError, FileReport, format_duration, is_supported_video, process_videos};

use console::style;
use log::{info, warn};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Asks on the terminal before replacing an existing output file.
struct TerminalConfirmer;

impl OverwriteConfirmer for TerminalConfirmer {
    fn confirm_overwrite(&self, output_path: &Path) -> bool {
        print!(
            "Output file '{}' already exists. Overwrite? [y/N] ",
            output_path.display()
        );
        std::io::stdout().flush().ok();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Expands the input arguments into the list of files to convert.
///
/// Each argument may be a video file or a directory to scan (top level). A
/// directory without any supported files is tolerated with a warning.
fn resolve_input_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CoreError> {
    let mut files = Vec::new();
    for input in inputs {
        let metadata = std::fs::metadata(input).map_err(|e| {
            CoreError::PathError(format!(
                "Failed to access input path '{}': {e}",
                input.display()
            ))
        })?;

        if metadata.is_dir() {
            match vidpress_core::find_processable_files(input) {
                Ok(mut found) => files.append(&mut found),
                Err(CoreError::NoFilesFound) => {
                    warn!("No processable video files in {}", input.display());
                }
                Err(e) => return Err(e),
            }
        } else if is_supported_video(input) {
            files.push(input.clone());
        } else {
            return Err(CoreError::PathError(format!(
                "Input file '{}' is not a supported video file",
                input.display()
            )));
        }
    }
    Ok(files)
}

pub fn run_convert(args: ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let total_start_time = Instant::now();

    let config = build_convert_config(&args)?;
    let files = resolve_input_files(&args.inputs)?;

    if files.is_empty() {
        println!("No processable video files found in the specified input path(s).");
        return Ok(());
    }

    println!(
        "{} {} file(s), output codec {}",
        style("Input:").bold(),
        files.len(),
        style(&config.output_codec).bold()
    );
    info!("Conversion run started: {}", crate::logging::get_timestamp());
    info!("Conversion log: {}", config.log_file.display());

    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(TerminalEventHandler::new()));

    // One background worker per invocation; the batch runs sequentially on
    // it while this thread waits.
    let worker = std::thread::spawn(move || {
        process_videos(
            &SidecarSpawner,
            &CrateFfprobeExecutor::new(),
            &StdFsMetadataProvider,
            &TerminalConfirmer,
            &config,
            &files,
            &dispatcher,
        )
    });

    let reports = worker
        .join()
        .map_err(|_| "conversion worker thread panicked")??;

    print_summary(&reports);
    println!(
        "{} {}",
        style("Total time:").bold(),
        format_duration(total_start_time.elapsed().as_secs_f64())
    );

    let failed = reports
        .iter()
        .filter(|r| {
            matches!(
                r.outcome,
                vidpress_core::ConversionOutcome::Failed { .. }
            )
        })
        .count();
    if failed > 0 {
        return Err(format!("{failed} conversion(s) failed").into());
    }

    Ok(())
}

fn print_summary(reports: &[FileReport]) {
    use vidpress_core::ConversionOutcome;

    for report in reports {
        if let ConversionOutcome::Succeeded {
            output_path,
            output_size,
            ratio,
        } = &report.outcome
        {
            let ratio_text = ratio
                .map(|r| format!("{r:.3}"))
                .unwrap_or_else(|| "n/a".to_string());
            info!(
                "{} -> {} ({}, relative size {ratio_text})",
                report.input_path.display(),
                output_path.display(),
                vidpress_core::format_bytes(*output_size),
            );
        }
    }
}
