//! Operator-facing output for every command.
//!
//! # Output Format
//!
//! ## Copy
//!
//! ```text
//! Category 3
//!     001 c.jpg → 0003-1.jpg
//!     002 d.jpg → 0003-2.jpg
//!     003 e.jpg → 0003-3.jpg
//!     3 photos copied
//!     Slide: 0003-0.jpg
//! Category 6
//!     no entries found
//!     Warning: no slide (tried 0006-0.jpg, 0006.jpg)
//!
//! Short categories (fewer than 3 photos)
//!     6: 0 photos
//!
//! Missing slides
//!     6
//! ```
//!
//! ## Init
//!
//! ```text
//! Categories
//!     7 (created)
//!     12a (exists)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::copy::CopyEvent;
use crate::layout::{InitSummary, Removal};
use crate::types::AnomalyReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn photos(count: usize) -> String {
    match count {
        1 => "1 photo".to_string(),
        n => format!("{n} photos"),
    }
}

// ============================================================================
// Copy
// ============================================================================

/// Format a single copy progress event as display lines.
pub fn format_copy_event(event: &CopyEvent) -> Vec<String> {
    match event {
        CopyEvent::SlidesUnavailable { dir } => vec![format!(
            "Warning: slides directory {} does not exist; continuing without slides",
            dir.display()
        )],
        CopyEvent::CategoryStarted { category } => vec![format!("Category {category}")],
        CopyEvent::PhotoCopied {
            index,
            source,
            dest,
        } => vec![format!(
            "{}{} {} \u{2192} {}",
            indent(1),
            format_index(*index),
            source,
            dest
        )],
        CopyEvent::CategoryCopied { count: 0, .. } => {
            vec![format!("{}no entries found", indent(1))]
        }
        CopyEvent::CategoryCopied { count, .. } => {
            vec![format!("{}{} copied", indent(1), photos(*count))]
        }
        CopyEvent::SlideCopied { file, .. } => vec![format!("{}Slide: {}", indent(1), file)],
        CopyEvent::SlideMissing { tried, .. } => vec![format!(
            "{}Warning: no slide (tried {})",
            indent(1),
            tried.join(", ")
        )],
    }
}

/// Print a copy progress event to stdout.
pub fn print_copy_event(event: &CopyEvent) {
    for line in format_copy_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-run anomaly summary.
pub fn format_report(report: &AnomalyReport, min_entries: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if report.is_clean() {
        lines.push(String::new());
        lines.push("No anomalies".to_string());
        return lines;
    }

    if !report.short_categories.is_empty() {
        lines.push(String::new());
        lines.push(format!("Short categories (fewer than {})", photos(min_entries)));
        for short in &report.short_categories {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                short.category,
                photos(short.count)
            ));
        }
    }

    if !report.missing_slides.is_empty() {
        lines.push(String::new());
        lines.push("Missing slides".to_string());
        for category in &report.missing_slides {
            lines.push(format!("{}{}", indent(1), category));
        }
    }

    lines
}

/// Print the anomaly summary to stdout.
pub fn print_report(report: &AnomalyReport, min_entries: usize) {
    for line in format_report(report, min_entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Init / cleanup / archive
// ============================================================================

/// Format what `init` did under `cats_dir`.
pub fn format_init(summary: &InitSummary, cats_dir: &Path) -> Vec<String> {
    let mut lines = vec![cats_dir.display().to_string()];
    for id in &summary.created {
        lines.push(format!("{}{} (created)", indent(1), id));
    }
    for id in &summary.existing {
        lines.push(format!("{}{} (exists)", indent(1), id));
    }
    if summary.created.is_empty() && summary.existing.is_empty() {
        lines.push(format!("{}no categories listed", indent(1)));
    }
    lines
}

pub fn print_init(summary: &InitSummary, cats_dir: &Path) {
    for line in format_init(summary, cats_dir) {
        println!("{}", line);
    }
}

pub fn format_cleanup(removals: &[Removal]) -> Vec<String> {
    removals
        .iter()
        .map(|removal| match removal {
            Removal::Removed(path) => format!("Removed {}", path.display()),
            Removal::NotPresent(path) => format!("Skipped {} (not present)", path.display()),
        })
        .collect()
}

pub fn print_cleanup(removals: &[Removal]) {
    for line in format_cleanup(removals) {
        println!("{}", line);
    }
}

pub fn print_archive(archive: &Path) {
    println!("Archive written: {}", archive.display());
}
