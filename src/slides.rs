//! Per-category slides.
//!
//! A slide is a title image shown before a category's photos. Slides live in
//! their own directory and may follow either of two naming conventions; the
//! first one present wins:
//!
//! | Try | Filename      | Lands in the presentation as |
//! |-----|---------------|------------------------------|
//! | 1   | `0012a-0.jpg` | `0012a-0.jpg`                |
//! | 2   | `0012a.jpg`   | `0012a.jpg`                  |
//!
//! Both sort ahead of the category's first photo (`0012a-1.jpg`). A missing
//! slide is a warning, never a failure.

use crate::category::CategoryId;
use crate::copy::{CopyError, CopyEvent, replace_file};
use crate::naming::{Seq, presentation_name};
use std::path::Path;

const CONVENTIONS: [Seq; 2] = [Seq::Position(0), Seq::Bare];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideOutcome {
    /// Copied under this filename.
    Copied(String),
    Missing,
}

/// Find the slide for `cat` in `slides_dir` and copy it into `to`.
///
/// `name` labels the category in events.
pub fn resolve_slide(
    cat: &CategoryId,
    name: &str,
    slides_dir: &Path,
    to: &Path,
    on_event: &mut impl FnMut(CopyEvent),
) -> Result<SlideOutcome, CopyError> {
    let candidates: Vec<String> = CONVENTIONS
        .iter()
        .map(|seq| presentation_name(cat, *seq))
        .collect();

    match candidates.iter().find(|file| slides_dir.join(file).is_file()) {
        Some(file) => {
            replace_file(&slides_dir.join(file), &to.join(file))?;
            on_event(CopyEvent::SlideCopied {
                category: name.to_string(),
                file: file.clone(),
            });
            Ok(SlideOutcome::Copied(file.clone()))
        }
        None => {
            on_event(CopyEvent::SlideMissing {
                category: name.to_string(),
                tried: candidates,
            });
            Ok(SlideOutcome::Missing)
        }
    }
}
