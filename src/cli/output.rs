//! Output formatting utilities

use crate::application::BuildReport;
use crate::domain::Entry;
use crate::infrastructure::CreateOutcome;
use std::path::Path;

/// Format a list of entries for display
pub fn format_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.filename);
        output.push('\n');
    }
    output
}

pub fn format_create_outcome(outcome: &CreateOutcome) -> String {
    match outcome {
        CreateOutcome::Created(entry) => format!("Created new entry: {}", entry.filename),
        CreateOutcome::AlreadyExists(entry) => {
            format!("Entry for {} already exists.", entry.title)
        }
    }
}

/// One line per converted file, naming the written output file
pub fn format_converted(entry: &Entry, output: &Path) -> String {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("Converted {} to HTML: {}", entry.filename, name)
}

/// Summary of a site build: conversions, failures, then the index
pub fn format_build_report(report: &BuildReport) -> String {
    let mut lines = Vec::new();

    for converted in &report.converted {
        lines.push(format_converted(&converted.entry, &converted.output));
    }
    for failed in &report.failed {
        lines.push(format!("Error: {}.", failed.error));
    }
    if let Some(index) = &report.index {
        let name = index
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(format!("Generated {}", name));
    }

    lines.join("\n")
}
