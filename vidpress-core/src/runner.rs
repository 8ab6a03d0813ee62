//! FFmpeg process execution and progress parsing.
//!
//! Spawns the transcode through the `FfmpegSpawner` seam, drains its event
//! stream on the calling thread, converts frame counts into a clamped
//! percentage, and emits `ConversionProgress` events. Blocks until the
//! stream is exhausted, then waits for the exit status.

use crate::error::CoreResult;
use crate::events::{Event, EventDispatcher};
use crate::external::{FfmpegProcess, FfmpegSpawner};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel as FfmpegLogLevel};
use std::process::ExitStatus;

/// What the subprocess left behind: its exit status and the captured stderr
/// text for failure reporting.
#[derive(Debug)]
pub struct RunSummary {
    pub status: ExitStatus,
    pub stderr: String,
}

/// Converts a frame count into a percentage of the probed total, clamped to
/// 100 because the total-frame estimate can undershoot the real count.
#[must_use]
pub fn compute_percent(frame: u64, total_frames: u64) -> f32 {
    if total_frames == 0 {
        return 0.0;
    }
    ((frame as f64 / total_frames as f64) * 100.0).min(100.0) as f32
}

/// Extracts the frame number from an ffmpeg status line (`frame=  123 ...`).
#[must_use]
pub fn parse_frame_number(line: &str) -> Option<u64> {
    let rest = line.split("frame=").nth(1)?;
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Tracks progress across the event stream of one conversion.
///
/// Progress is monotonically non-decreasing and never exceeds 100, even when
/// the frame estimate was inexact.
pub struct ProgressTracker<'a> {
    total_frames: u64,
    last_percent: f32,
    stderr: String,
    dispatcher: &'a EventDispatcher,
}

impl<'a> ProgressTracker<'a> {
    #[must_use]
    pub fn new(total_frames: u64, dispatcher: &'a EventDispatcher) -> Self {
        Self {
            total_frames,
            last_percent: 0.0,
            stderr: String::new(),
            dispatcher,
        }
    }

    /// The accumulated stderr text.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn handle_event(&mut self, event: FfmpegEvent) -> CoreResult<()> {
        match event {
            FfmpegEvent::Progress(progress) => {
                let frame = u64::from(progress.frame);
                let raw = if progress.raw_log_message.is_empty() {
                    format!(
                        "frame={} fps={:.1} time={} speed={:.2}x",
                        frame, progress.fps, progress.time, progress.speed
                    )
                } else {
                    progress.raw_log_message
                };
                self.report(frame, raw);
            }
            FfmpegEvent::Log(level, message) => self.handle_log(level, message),
            FfmpegEvent::Error(error) => {
                log::debug!("ffmpeg stderr: {error}");
                self.stderr.push_str(&error);
                self.stderr.push('\n');
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_log(&mut self, level: FfmpegLogLevel, message: String) {
        // Status lines can surface as plain log output depending on the
        // ffmpeg loglevel configuration; they still carry the frame counter.
        if let Some(frame) = parse_frame_number(&message) {
            self.report(frame, message);
            return;
        }

        match level {
            FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => {
                log::debug!(target: "ffmpeg_log", "{message}");
                self.stderr.push_str(&message);
                self.stderr.push('\n');
            }
            FfmpegLogLevel::Warning => log::warn!(target: "ffmpeg_log", "{message}"),
            _ => log::trace!(target: "ffmpeg_log", "{message}"),
        }
    }

    fn report(&mut self, frame: u64, raw: String) {
        let percent = compute_percent(frame, self.total_frames).max(self.last_percent);
        self.last_percent = percent;
        self.dispatcher.emit(Event::ConversionProgress {
            percent,
            frame,
            total_frames: self.total_frames,
            raw,
        });
    }
}

/// Runs one ffmpeg conversion to completion.
///
/// # Arguments
///
/// * `spawner` - Implementation of `FfmpegSpawner` used to start the process
/// * `cmd` - The fully built ffmpeg command
/// * `total_frames` - Probed total-frame estimate for percentage conversion
/// * `dispatcher` - Receives `ConversionProgress` events
///
/// # Returns
///
/// * `Ok(RunSummary)` - Exit status plus captured stderr; the caller
///   classifies success/failure
/// * `Err(CoreError)` - Only when the process could not be spawned or waited on
pub fn run_conversion<S: FfmpegSpawner>(
    spawner: &S,
    cmd: FfmpegCommand,
    total_frames: u64,
    dispatcher: &EventDispatcher,
) -> CoreResult<RunSummary> {
    let mut process = spawner.spawn(cmd)?;
    let mut tracker = ProgressTracker::new(total_frames, dispatcher);

    process.handle_events(|event| tracker.handle_event(event))?;
    let status = process.wait()?;

    Ok(RunSummary {
        status,
        stderr: tracker.stderr().to_string(),
    })
}
