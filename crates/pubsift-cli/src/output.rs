use std::io::Write;

use owo_colors::OwoColorize;
use pubsift_ingest::{PipelineConfig, RunSummary};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print what a run visited, kept and wrote.
pub fn print_summary(
    w: &mut dyn Write,
    config: &PipelineConfig,
    summary: &RunSummary,
    dry_run: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(
        w,
        "Parsed {} list items from {} ({} page)",
        summary.items_visited,
        config.source_url,
        config.variant.as_str()
    )?;

    let kept = format!("Kept {} records", summary.records_kept);
    if color.enabled() {
        write!(w, "{}", kept.bold())?;
    } else {
        write!(w, "{}", kept)?;
    }
    if summary.duplicates_dropped > 0 {
        write!(w, " ({} duplicates dropped)", summary.duplicates_dropped)?;
    }
    writeln!(w)?;

    if summary.used_fallback {
        let note = "No recognised section headings; every list item was collected as unknown";
        if color.enabled() {
            writeln!(w, "{}", note.yellow())?;
        } else {
            writeln!(w, "{}", note)?;
        }
    }

    if dry_run {
        let note = "(dry run: nothing written)";
        if color.enabled() {
            writeln!(w, "{}", note.dimmed())?;
        } else {
            writeln!(w, "{}", note)?;
        }
        return Ok(());
    }

    for path in &summary.outputs {
        if color.enabled() {
            writeln!(w, "{} {}", "Wrote".green(), path.display())?;
        } else {
            writeln!(w, "Wrote {}", path.display())?;
        }
    }
    Ok(())
}
