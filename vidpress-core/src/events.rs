//! Progress and status events emitted by the orchestration core.
//!
//! The core never prints to the terminal itself; it emits `Event` values
//! through an `EventDispatcher`, and the shell decides how to render them.

use crate::outcome::SkipReason;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Event {
    /// Batch processing started
    BatchStarted {
        total_files: usize,
    },

    /// A single conversion is about to run
    ConversionStarted {
        filename: String,
        input_codec: String,
        output_codec: String,
        total_frames: u64,
    },

    /// Live progress for the running conversion. `raw` is the most recent
    /// ffmpeg status line, for shells that display it verbatim.
    ConversionProgress {
        percent: f32,
        frame: u64,
        total_frames: u64,
        raw: String,
    },

    /// A conversion was skipped before any work was spent
    ConversionSkipped {
        filename: String,
        reason: SkipReason,
    },

    /// A conversion finished and the output file was verified
    ConversionCompleted {
        filename: String,
        input_size: u64,
        output_size: u64,
        ratio: Option<f64>,
    },

    /// ffmpeg exited with a non-zero status
    ConversionFailed {
        filename: String,
        message: String,
    },

    /// Free-form status line
    StatusUpdate {
        message: String,
    },

    /// Batch processing finished
    BatchComplete {
        converted: usize,
        skipped: usize,
        failed: usize,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
