use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

use macrolog_core::TrackerError;
use macrolog_core::codec::{CSV_FILE_NAME, CSV_MIME, JSON_FILE_NAME, JSON_MIME};

use super::AppTracker;
use super::helpers::exit_with_notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_FILE_NAME,
            ExportFormat::Json => JSON_FILE_NAME,
        }
    }

    fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME,
            ExportFormat::Json => JSON_MIME,
        }
    }
}

/// A directory target gets the default file name for the format.
fn resolve_output(path: &Path, format: ExportFormat) -> PathBuf {
    if path.is_dir() {
        path.join(format.file_name())
    } else {
        path.to_path_buf()
    }
}

pub(crate) fn cmd_export(
    tracker: &AppTracker,
    format: ExportFormat,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let content = match format {
        ExportFormat::Csv => tracker.export_csv()?,
        ExportFormat::Json => tracker.export_json()?,
    };

    let Some(output) = output else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
        return Ok(());
    };

    let path = resolve_output(output, format);
    std::fs::write(&path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let count = tracker.entries().len();
    if json {
        println!(
            "{}",
            serde_json::json!({
                "path": path.display().to_string(),
                "content_type": format.mime(),
                "entries": count,
            })
        );
    } else {
        println!("Exported {count} entries to {}", path.display());
    }
    Ok(())
}

/// Replace the log with the contents of `file`. An unreadable or invalid
/// file leaves the log untouched.
pub(crate) async fn cmd_import(tracker: &mut AppTracker, file: &Path, json: bool) -> Result<()> {
    let text = match tokio::fs::read_to_string(file).await {
        Ok(text) => text,
        Err(e) => exit_with_notice(
            &format!("Invalid JSON file: could not read {} ({e})", file.display()),
            json,
        ),
    };

    let summary = match tracker.import_json(&text) {
        Ok(summary) => summary,
        Err(TrackerError::Format(msg)) => {
            exit_with_notice(&format!("Invalid JSON file: {msg}"), json)
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let imported = summary.imported;
        println!("Imported {imported} entries from {}", file.display());
        if summary.ids_assigned > 0 {
            let assigned = summary.ids_assigned;
            println!("Assigned new IDs to {assigned} entries");
        }
    }
    Ok(())
}
