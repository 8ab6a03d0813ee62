// ============================================================================
// vidpress-core/src/processing.rs
// ============================================================================
//
// MAIN CONVERSION ORCHESTRATION
//
// Coordinates the whole conversion workflow for a batch of files: probing
// input media, applying the skip policy, building and running the ffmpeg
// command, classifying the result, and updating the persisted history.
//
// WORKFLOW (per file, sequential on the calling thread):
//   1. Probe the input (codec, size, total-frame estimate)
//   2. Evaluate the skip policy (same codec, existing output)
//   3. Build the ffmpeg command for the requested codec and options
//   4. Run ffmpeg, streaming progress events to the dispatcher
//   5. Classify the exit status, compute output size and ratio,
//      append the history entry, optionally move the input file
//
// A failed or skipped file never aborts the batch.

use crate::command::{ConversionRequest, build_command};
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::events::{Event, EventDispatcher};
use crate::external::{FfmpegSpawner, FileMetadataProvider, check_dependency};
use crate::history::{ConversionLog, LogEntry};
use crate::outcome::{ConversionOutcome, size_ratio};
use crate::policy::{OverwriteConfirmer, PolicyDecision};
use crate::probe::{FfprobeExecutor, ProbeResult};
use crate::runner::run_conversion;
use crate::utils::{get_filename_safe, move_input_file};

use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Outcome of one file in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub input_path: PathBuf,
    pub outcome: ConversionOutcome,
}

/// Processes a list of video files according to the provided configuration.
///
/// This is the main entry point of the vidpress-core library. The function
/// is generic over the injected collaborators so tests can run it without
/// real ffmpeg/ffprobe binaries:
///
/// - `S`: `FfmpegSpawner` - spawns ffmpeg processes
/// - `P`: `FfprobeExecutor` - probes input files
/// - `M`: `FileMetadataProvider` - reads file sizes
/// - `C`: `OverwriteConfirmer` - answers overwrite questions
///
/// Files are processed sequentially on the calling thread; the ffmpeg
/// subprocess is the only concurrent entity. Exactly one outcome is
/// produced per file.
///
/// # Returns
///
/// * `Ok(Vec<FileReport>)` - One report per input file, in batch order
/// * `Err(CoreError)` - Only for batch-level failures (missing external
///   tools, unusable input path); per-file failures are reported in the
///   corresponding `FileReport`
pub fn process_videos<S, P, M, C>(
    spawner: &S,
    prober: &P,
    metadata_provider: &M,
    confirmer: &C,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
    dispatcher: &EventDispatcher,
) -> CoreResult<Vec<FileReport>>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
    M: FileMetadataProvider,
    C: OverwriteConfirmer,
{
    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    info!("External dependency check passed.");

    let history = ConversionLog::new(&config.log_file);
    let mut reports: Vec<FileReport> = Vec::new();
    let (mut converted, mut skipped, mut failed) = (0usize, 0usize, 0usize);

    dispatcher.emit(Event::BatchStarted {
        total_files: files_to_process.len(),
    });

    for input_path in files_to_process {
        let filename = get_filename_safe(input_path)?;
        info!("Processing: {filename}");

        // Probe failure degrades to an unknown codec and zero sizes; the
        // conversion itself still runs.
        let probe = match prober.probe_file(input_path) {
            Ok(probe) => probe,
            Err(e) => {
                warn!("Probe failed for {filename}: {e}. Proceeding with unknown input codec.");
                dispatcher.emit(Event::StatusUpdate {
                    message: format!("Probe failed for {filename}, converting anyway"),
                });
                ProbeResult::unknown()
            }
        };

        let request = ConversionRequest::from_config(config, input_path);
        let output_path = request.output_path()?;

        if let PolicyDecision::Skip(reason) =
            crate::policy::evaluate(&request, &probe, &output_path, confirmer)
        {
            info!("Skipping {filename}: {reason}");
            dispatcher.emit(Event::ConversionSkipped {
                filename: filename.clone(),
                reason,
            });
            reports.push(FileReport {
                input_path: input_path.clone(),
                outcome: ConversionOutcome::Skipped(reason),
            });
            skipped += 1;
            info!("----------------------------------------");
            continue;
        }

        let (cmd, output_path) = build_command(&request)?;

        dispatcher.emit(Event::ConversionStarted {
            filename: filename.clone(),
            input_codec: probe.codec.clone(),
            output_codec: request.output_codec.clone(),
            total_frames: probe.total_frames,
        });

        let outcome = match run_conversion(spawner, cmd, probe.total_frames, dispatcher) {
            Ok(summary) if summary.status.success() => finish_success(
                metadata_provider,
                &history,
                config,
                input_path,
                &filename,
                &probe,
                &request,
                &output_path,
                dispatcher,
            ),
            Ok(summary) => {
                let stderr = summary.stderr.trim().to_string();
                error!(
                    "ffmpeg failed for {filename} ({}): {stderr}",
                    summary.status
                );
                ConversionOutcome::Failed {
                    exit_code: summary.status.code(),
                    stderr,
                }
            }
            Err(e) => {
                error!("Could not run ffmpeg for {filename}: {e}");
                ConversionOutcome::Failed {
                    exit_code: None,
                    stderr: e.to_string(),
                }
            }
        };

        match &outcome {
            ConversionOutcome::Succeeded { .. } => converted += 1,
            ConversionOutcome::Failed { stderr, .. } => {
                dispatcher.emit(Event::ConversionFailed {
                    filename: filename.clone(),
                    message: stderr.clone(),
                });
                failed += 1;
            }
            ConversionOutcome::Skipped(_) => {}
        }

        reports.push(FileReport {
            input_path: input_path.clone(),
            outcome,
        });
        info!("----------------------------------------");
    }

    dispatcher.emit(Event::BatchComplete {
        converted,
        skipped,
        failed,
    });

    Ok(reports)
}

/// Finalizes a successful conversion: reads the output size, computes the
/// size ratio, records the history entry, and moves the input file aside
/// when configured to.
#[allow(clippy::too_many_arguments)]
fn finish_success<M: FileMetadataProvider>(
    metadata_provider: &M,
    history: &ConversionLog,
    config: &CoreConfig,
    input_path: &Path,
    filename: &str,
    probe: &ProbeResult,
    request: &ConversionRequest,
    output_path: &Path,
    dispatcher: &EventDispatcher,
) -> ConversionOutcome {
    // Succeeded implies the output exists and its size was readable after
    // process exit; anything else is classified as a failure.
    let output_size = match metadata_provider.get_size(output_path) {
        Ok(size) => size,
        Err(e) => {
            error!(
                "ffmpeg exited cleanly but output {} is unreadable: {e}",
                output_path.display()
            );
            return ConversionOutcome::Failed {
                exit_code: Some(0),
                stderr: format!("output file size could not be read: {e}"),
            };
        }
    };

    let ratio = size_ratio(probe.input_size, output_size);

    let entry = LogEntry {
        directory: input_path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        file_name: filename.to_string(),
        input_codec: probe.codec.clone(),
        output_codec: request.output_codec.clone(),
        input_size: probe.input_size,
        output_size,
        ratio,
    };
    if let Err(e) = history.append(entry) {
        warn!("Failed to update conversion log {}: {e}", history.path().display());
    }

    dispatcher.emit(Event::ConversionCompleted {
        filename: filename.to_string(),
        input_size: probe.input_size,
        output_size,
        ratio,
    });

    if config.move_input {
        if let Err(e) = move_input_file(input_path) {
            warn!("Failed to move input file {}: {e}", input_path.display());
        }
    }

    ConversionOutcome::Succeeded {
        output_path: output_path.to_path_buf(),
        output_size,
        ratio,
    }
}
