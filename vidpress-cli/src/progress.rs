// vidpress-cli/src/progress.rs
//
// Terminal rendering of core events: a progress bar per conversion plus
// colored status lines. The core never touches the terminal itself.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;
use vidpress_core::{Event, EventHandler, format_bytes};

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("  [{bar:40}] {pos:>3}% {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Renders core events on the terminal.
pub struct TerminalEventHandler {
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalEventHandler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn start_bar(&self) {
        let bar = ProgressBar::new(100);
        bar.set_style(bar_style());
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl Default for TerminalEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for TerminalEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::BatchStarted { total_files } => {
                println!("{} {total_files} file(s) to process", "Batch:".bold());
            }
            Event::ConversionStarted {
                filename,
                input_codec,
                output_codec,
                ..
            } => {
                println!(
                    "{} {filename} ({input_codec} -> {output_codec})",
                    "Converting:".bold()
                );
                self.start_bar();
            }
            Event::ConversionProgress { percent, raw, .. } => {
                if let Ok(slot) = self.bar.lock() {
                    if let Some(bar) = slot.as_ref() {
                        bar.set_position(*percent as u64);
                        bar.set_message(raw.clone());
                    }
                }
            }
            Event::ConversionSkipped { filename, reason } => {
                self.finish_bar();
                println!("{} {filename}: {reason}", "Skipped".yellow().bold());
            }
            Event::ConversionCompleted {
                filename,
                input_size,
                output_size,
                ratio,
            } => {
                self.finish_bar();
                let ratio_text = ratio
                    .map(|r| format!("{r:.3}x"))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "{} {filename}: {} -> {} (relative size {ratio_text})",
                    "Completed".green().bold(),
                    format_bytes(*input_size),
                    format_bytes(*output_size),
                );
            }
            Event::ConversionFailed { filename, message } => {
                self.finish_bar();
                let reason = message.lines().last().unwrap_or("unknown error");
                eprintln!("{} {filename}: {reason}", "Failed".red().bold());
            }
            Event::StatusUpdate { message } => {
                println!("{message}");
            }
            Event::BatchComplete {
                converted,
                skipped,
                failed,
            } => {
                println!(
                    "{} {converted} converted, {skipped} skipped, {failed} failed",
                    "Done:".bold()
                );
            }
        }
    }
}
