//! Copying category photos into the presentation directory.
//!
//! This is the core of `award-deck copy`. For each selected category it:
//!
//! 1. Lists the `.jpg` files in the category directory (case-insensitive)
//! 2. Sorts them by filename, which is how operators control order
//!    (`1-third.jpg`, `2-second.jpg`, `3-first.jpg`)
//! 3. Drops the first `skip` files
//! 4. Copies the rest as `NNNNs-1.jpg`, `NNNNs-2.jpg`, ... (see [`crate::naming`])
//! 5. Optionally attaches the category slide (see [`crate::slides`])
//!
//! ```text
//! Categories/3/                 Presentation/
//! ├── a.jpg    (skipped)
//! ├── b.jpg    (skipped)
//! ├── c.jpg   ─────────────→    ├── 0003-1.jpg
//! ├── d.jpg   ─────────────→    ├── 0003-2.jpg
//! └── e.jpg   ─────────────→    └── 0003-3.jpg
//! ```
//!
//! ## Overwrite semantics
//!
//! A destination file left over from a previous run is deleted before the
//! new copy is written, so re-running `copy` replaces content rather than
//! merging into it. Destination files that no longer correspond to a source
//! (e.g. a category shrank from 4 photos to 3) are left alone.
//!
//! ## Failures
//!
//! Any I/O failure aborts the whole run. Files copied before the failure
//! stay in place; the operator fixes the input and runs `copy` again.
//!
//! ## Anomalies
//!
//! Non-fatal findings are returned as values: each category yields a
//! [`CategoryOutcome`], and [`summarize`] folds them into an
//! [`AnomalyReport`]. A regular category (number below the special-award
//! threshold) with fewer than `min_entries` photos is reported, including
//! categories with no photos at all.

use crate::category::{CategoryId, ParseError, SPECIAL_AWARD_FROM, parse_category};
use crate::naming::{Seq, presentation_name};
use crate::scan::{ScanError, list_categories, select_categories};
use crate::slides::{SlideOutcome, resolve_slide};
use crate::types::{AnomalyReport, ShortCategory};
use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Regular categories with fewer photos than this are reported by default.
pub const MIN_ENTRIES: usize = 3;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("categories directory {0} does not exist; run `award-deck init` first")]
    MissingCategories(PathBuf),
    #[error("cannot read category directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    BadCategory(#[from] ParseError),
}

/// Settings for one copy run.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Raw category names to restrict to. Empty means all.
    pub only: BTreeSet<String>,
    /// Leading files (in filename order) to leave out of every category.
    pub skip: usize,
    /// Where per-category slides live, if slides are wanted.
    pub slides_dir: Option<PathBuf>,
    pub min_entries: usize,
    pub special_award_from: u32,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            only: BTreeSet::new(),
            skip: 0,
            slides_dir: None,
            min_entries: MIN_ENTRIES,
            special_award_from: SPECIAL_AWARD_FROM,
        }
    }
}

/// Progress reported while copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyEvent {
    /// The slides directory was requested but does not exist. Sent once.
    SlidesUnavailable { dir: PathBuf },
    CategoryStarted { category: String },
    PhotoCopied {
        index: usize,
        source: String,
        dest: String,
    },
    /// All photos of a category are in place. `count` may be zero.
    CategoryCopied { category: String, count: usize },
    SlideCopied { category: String, file: String },
    SlideMissing {
        category: String,
        tried: Vec<String>,
    },
}

/// Result of copying one category's photos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCopy {
    pub count: usize,
}

/// Everything a single category contributed to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub name: String,
    pub category: CategoryId,
    pub copy: CategoryCopy,
    /// `None` when slides are disabled for the run.
    pub slide: Option<SlideOutcome>,
}

/// Copy one category's photos into `to` under canonical sequence names.
///
/// `name` is the category's directory name, used as its label in events.
pub fn copy_category(
    cat: &CategoryId,
    name: &str,
    from: &Path,
    to: &Path,
    skip: usize,
    on_event: &mut impl FnMut(CopyEvent),
) -> Result<CategoryCopy, CopyError> {
    let photos = list_photos(from)?;

    let mut count = 0;
    for (i, source) in photos.iter().skip(skip).enumerate() {
        let index = i + 1;
        let dest_name = presentation_name(cat, Seq::Position(index));
        replace_file(source, &to.join(&dest_name))?;
        count = index;
        on_event(CopyEvent::PhotoCopied {
            index,
            source: file_name(source),
            dest: dest_name,
        });
    }

    on_event(CopyEvent::CategoryCopied {
        category: name.to_string(),
        count,
    });
    Ok(CategoryCopy { count })
}

/// Copy every selected category from `cats_root` into `presentation_dir`.
///
/// `cats_root` must exist; `presentation_dir` is created when missing.
pub fn run_copy(
    cats_root: &Path,
    presentation_dir: &Path,
    options: &CopyOptions,
    on_event: &mut impl FnMut(CopyEvent),
) -> Result<AnomalyReport, CopyError> {
    if !cats_root.is_dir() {
        return Err(CopyError::MissingCategories(cats_root.to_path_buf()));
    }
    fs::create_dir_all(presentation_dir)?;

    let slides_dir = match &options.slides_dir {
        Some(dir) if dir.is_dir() => Some(dir.as_path()),
        Some(dir) => {
            on_event(CopyEvent::SlidesUnavailable { dir: dir.clone() });
            None
        }
        None => None,
    };

    let names = select_categories(list_categories(cats_root)?, &options.only)?;
    debug!("copying {} categories from {}", names.len(), cats_root.display());

    let mut outcomes = Vec::with_capacity(names.len());
    for name in names {
        let category = parse_category(&name)?;
        on_event(CopyEvent::CategoryStarted {
            category: name.clone(),
        });

        let copy = copy_category(
            &category,
            &name,
            &cats_root.join(&name),
            presentation_dir,
            options.skip,
            on_event,
        )?;
        let slide = match slides_dir {
            Some(dir) => Some(resolve_slide(
                &category,
                &name,
                dir,
                presentation_dir,
                on_event,
            )?),
            None => None,
        };

        outcomes.push(CategoryOutcome {
            name,
            category,
            copy,
            slide,
        });
    }

    Ok(summarize(&outcomes, options))
}

/// Fold per-category outcomes into the run's anomaly report.
pub fn summarize(outcomes: &[CategoryOutcome], options: &CopyOptions) -> AnomalyReport {
    outcomes
        .iter()
        .fold(AnomalyReport::default(), |mut report, outcome| {
            if !outcome.category.is_special(options.special_award_from)
                && outcome.copy.count < options.min_entries
            {
                report.short_categories.push(ShortCategory {
                    category: outcome.name.clone(),
                    count: outcome.copy.count,
                });
            }
            if let Some(SlideOutcome::Missing) = outcome.slide {
                report.missing_slides.push(outcome.name.clone());
            }
            report
        })
}

/// `.jpg` files directly inside `dir`, sorted by filename.
fn list_photos(dir: &Path) -> Result<Vec<PathBuf>, CopyError> {
    let mut photos = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.map_err(|source| CopyError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_jpeg(&entry.file_name().to_string_lossy()) {
            photos.push(entry.into_path());
        }
    }
    photos.sort_by_key(|p| file_name(p));
    Ok(photos)
}

fn is_jpeg(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".jpg")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Copy `from` to `to`, deleting whatever was at `to` first.
///
/// When both paths name the same file it is left untouched.
pub(crate) fn replace_file(from: &Path, to: &Path) -> Result<(), CopyError> {
    let failed = |source| CopyError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    if to.exists() {
        if same_file(from, to) {
            debug!("{} already in place", to.display());
            return Ok(());
        }
        debug!("removing stale {}", to.display());
        fs::remove_file(to).map_err(failed)?;
    }
    debug!("copying {} -> {}", from.display(), to.display());
    fs::copy(from, to).map_err(failed)?;
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
