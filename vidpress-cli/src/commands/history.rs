//! Implementation of the 'history' subcommand.
//!
//! Shows (or clears) the persisted conversion log.

use crate::cli::HistoryArgs;
use crate::config::resolve_history_log;
use console::style;
use vidpress_core::{ConversionLog, format_bytes};

pub fn run_history(args: HistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let log = ConversionLog::new(resolve_history_log(&args)?);

    if args.clear {
        log.clear()?;
        println!("Conversion history cleared ({}).", log.path().display());
        return Ok(());
    }

    let entries = log.tail(args.limit)?;
    if entries.is_empty() {
        println!("No conversion history at {}.", log.path().display());
        return Ok(());
    }

    println!(
        "{} (last {} of {}):",
        style("Conversion history").bold(),
        entries.len(),
        log.path().display()
    );
    for entry in entries {
        let ratio = entry
            .ratio
            .map(|r| format!("{r:.3}x"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {}  {} -> {}  {} -> {}  ({ratio})",
            style(&entry.file_name).bold(),
            entry.input_codec,
            entry.output_codec,
            format_bytes(entry.input_size),
            format_bytes(entry.output_size),
        );
        println!("    in {}", entry.directory);
    }

    Ok(())
}
