//! Creating and removing the working directories.
//!
//! `init` seeds the categories directory from the contest's category list,
//! a comma-separated data file whose first field is the category id:
//!
//! ```text
//! # id,name,class
//! 7,Armor,Large Scale
//!
//! 12a,Aircraft
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. The file above
//! yields `Categories/7/` and `Categories/12a/`.
//!
//! `cleanup` removes directory trees outright.

use crate::category::parse_category;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot read data file {path}: {source}")]
    DataFile { path: PathBuf, source: io::Error },
    #[error("cannot create {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("cannot remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

/// What `init` did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitSummary {
    pub created: Vec<String>,
    pub existing: Vec<String>,
}

/// What `cleanup` did for one path.
#[derive(Debug, PartialEq, Eq)]
pub enum Removal {
    Removed(PathBuf),
    NotPresent(PathBuf),
}

/// Category ids from data-file content, in file order.
pub fn parse_category_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let id = line.split(',').next().unwrap_or_default().trim();
            (!id.is_empty()).then(|| id.to_string())
        })
        .collect()
}

/// Create one directory per category listed in `datafile` under `cats_dir`.
pub fn init(datafile: &Path, cats_dir: &Path) -> Result<InitSummary, LayoutError> {
    let content = fs::read_to_string(datafile).map_err(|source| LayoutError::DataFile {
        path: datafile.to_path_buf(),
        source,
    })?;

    let mut summary = InitSummary::default();
    for id in parse_category_list(&content) {
        if parse_category(&id).is_err() {
            warn!("{id:?} is not a category id; `copy` will ignore its directory");
        }
        let dir = cats_dir.join(&id);
        if dir.is_dir() {
            summary.existing.push(id);
            continue;
        }
        debug!("creating {}", dir.display());
        fs::create_dir_all(&dir).map_err(|source| LayoutError::Create {
            path: dir.clone(),
            source,
        })?;
        summary.created.push(id);
    }
    Ok(summary)
}

/// Recursively delete each path. Paths that do not exist are reported, not
/// treated as errors.
pub fn cleanup(paths: &[PathBuf]) -> Result<Vec<Removal>, LayoutError> {
    paths
        .iter()
        .map(|path| {
            if !path.exists() {
                return Ok(Removal::NotPresent(path.clone()));
            }
            debug!("removing {}", path.display());
            fs::remove_dir_all(path).map_err(|source| LayoutError::Remove {
                path: path.clone(),
                source,
            })?;
            Ok(Removal::Removed(path.clone()))
        })
        .collect()
}

/// Which paths `cleanup` should remove given its positional arguments.
///
/// No arguments removes both defaults; otherwise only the given paths.
pub fn cleanup_targets(
    args: &[PathBuf],
    cats_dir: &Path,
    presentation_dir: &Path,
) -> Vec<PathBuf> {
    if args.is_empty() {
        vec![cats_dir.to_path_buf(), presentation_dir.to_path_buf()]
    } else {
        args.to_vec()
    }
}
