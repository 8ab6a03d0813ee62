// --- Mocking Infrastructure (for testing) ---
//
// Compiled only for unit tests or when the "test-mocks" feature is enabled,
// so that integration tests of downstream crates can run without real
// ffmpeg/ffprobe binaries.

use super::{FfmpegProcess, FfmpegSpawner, FileMetadataProvider};
use crate::error::{CoreError, CoreResult};
use crate::probe::{FfprobeExecutor, ProbeResult};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Builds an `ExitStatus` with the given exit code (unix wait status layout).
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

/// Mock implementation of `FfmpegProcess`.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Mock implementation of `FfmpegSpawner` that replays a fixed event stream
/// and records the debug rendering of every spawned command.
pub struct MockFfmpegSpawner {
    events: Vec<FfmpegEvent>,
    exit_status: ExitStatus,
    spawned: RefCell<Vec<String>>,
}

impl MockFfmpegSpawner {
    pub fn new(events: Vec<FfmpegEvent>, exit_status: ExitStatus) -> Self {
        Self {
            events,
            exit_status,
            spawned: RefCell::new(Vec::new()),
        }
    }

    #[cfg(unix)]
    pub fn succeeding(events: Vec<FfmpegEvent>) -> Self {
        Self::new(events, exit_status(0))
    }

    #[cfg(unix)]
    pub fn failing(events: Vec<FfmpegEvent>, code: i32) -> Self {
        Self::new(events, exit_status(code))
    }

    /// Debug renderings of the commands passed to `spawn`, in call order.
    pub fn spawned_commands(&self) -> Vec<String> {
        self.spawned.borrow().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        self.spawned.borrow_mut().push(format!("{cmd:?}"));
        Ok(MockFfmpegProcess {
            events_to_emit: self.events.clone(),
            exit_status: self.exit_status,
        })
    }
}

/// Mock implementation of `FfprobeExecutor` returning canned probe results
/// keyed by file name, with an optional fallback error.
#[derive(Default)]
pub struct MockFfprobeExecutor {
    results: HashMap<PathBuf, ProbeResult>,
    fail_unknown: bool,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, path: impl Into<PathBuf>, result: ProbeResult) -> Self {
        self.results.insert(path.into(), result);
        self
    }

    /// Makes probes of unregistered paths fail instead of returning defaults.
    pub fn failing_for_unknown(mut self) -> Self {
        self.fail_unknown = true;
        self
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe_file(&self, input_path: &Path) -> CoreResult<ProbeResult> {
        match self.results.get(input_path) {
            Some(result) => Ok(result.clone()),
            None if self.fail_unknown => Err(CoreError::FfprobeParse(format!(
                "no mock probe result for {}",
                input_path.display()
            ))),
            None => Ok(ProbeResult::unknown()),
        }
    }
}

/// Mock implementation of `FileMetadataProvider` with per-path sizes.
#[derive(Default)]
pub struct MockMetadataProvider {
    sizes: HashMap<PathBuf, u64>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, path: impl Into<PathBuf>, size: u64) -> Self {
        self.sizes.insert(path.into(), size);
        self
    }
}

impl FileMetadataProvider for MockMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        self.sizes.get(path).copied().ok_or_else(|| {
            CoreError::PathError(format!("no mock size for {}", path.display()))
        })
    }
}
