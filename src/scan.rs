//! Category directory discovery.
//!
//! The categories root holds one directory per contest category, populated
//! by hand before `copy` runs:
//!
//! ```text
//! Categories/
//! ├── 1/
//! ├── 3/
//! │   ├── 1-third.jpg
//! │   ├── 2-second.jpg
//! │   └── 3-first.jpg
//! ├── 5a/
//! ├── 5b/
//! ├── 900/
//! └── notes/        # no leading digit → ignored
//! ```
//!
//! Discovery happens in two steps. [`list_categories`] finds candidate
//! names (directories starting with a digit, in whatever order the
//! filesystem returns them). [`select_categories`] applies the operator's
//! `--only` subset and puts the survivors into presentation order.

use crate::category::{ParseError, parse_category, starts_with_digit};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read categories directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error(transparent)]
    BadCategory(#[from] ParseError),
}

/// List immediate child directories of `root` whose name starts with a digit.
///
/// Hidden entries and plain files are skipped. No parsing happens here.
pub fn list_categories(root: &Path) -> Result<Vec<String>, ScanError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| ScanError::Unreadable {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if starts_with_digit(&name) {
            names.push(name.into_owned());
        }
    }
    Ok(names)
}

/// Restrict to `only` (exact raw-name match) when it is non-empty, then sort
/// by category order.
///
/// Every surviving name must parse; a failure aborts the selection. Names
/// that parse to the same category keep a stable order by raw name.
pub fn select_categories(
    all: Vec<String>,
    only: &BTreeSet<String>,
) -> Result<Vec<String>, ScanError> {
    let mut keyed = all
        .into_iter()
        .filter(|name| only.is_empty() || only.contains(name))
        .map(|name| parse_category(&name).map(|id| (id, name)))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort();
    Ok(keyed.into_iter().map(|(_, name)| name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lists_only_numbered_directories() {
        let tmp = TempDir::new().unwrap();
        category_tree(tmp.path(), &[("1", &[]), ("12a", &[]), ("notes", &[])]);
        write_file(&tmp.path().join("7-readme.txt"), "not a category");

        let mut found = list_categories(tmp.path()).unwrap();
        found.sort();
        assert_eq!(found, vec!["1", "12a"]);
    }

    #[test]
    fn empty_root_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(list_categories(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = list_categories(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, ScanError::Unreadable { .. }));
    }

    #[test]
    fn does_not_descend_into_categories() {
        let tmp = TempDir::new().unwrap();
        category_tree(tmp.path(), &[("3", &[])]);
        fs::create_dir_all(tmp.path().join("3/4")).unwrap();

        assert_eq!(list_categories(tmp.path()).unwrap(), vec!["3"]);
    }

    #[test]
    fn select_all_sorts_by_category_order() {
        let all = names(&["10", "5b", "900", "2", "5", "5a"]);
        let selected = select_categories(all, &BTreeSet::new()).unwrap();
        assert_eq!(selected, names(&["2", "5", "5a", "5b", "10", "900"]));
    }

    #[test]
    fn select_subset_keeps_order() {
        let all = names(&["5a", "900", "1", "3", "5b"]);
        let selected = select_categories(all, &set(&["3", "5a"])).unwrap();
        assert_eq!(selected, names(&["3", "5a"]));
    }

    #[test]
    fn subset_match_is_exact() {
        let all = names(&["12", "12a"]);
        let selected = select_categories(all, &set(&["12"])).unwrap();
        assert_eq!(selected, names(&["12"]));
    }

    #[test]
    fn subset_with_unknown_names_selects_nothing_extra() {
        let all = names(&["1", "2"]);
        let selected = select_categories(all, &set(&["2", "77"])).unwrap();
        assert_eq!(selected, names(&["2"]));
    }

    #[test]
    fn unparsable_name_fails_the_selection() {
        let all = names(&["3", "99999999999", "1"]);
        let err = select_categories(all, &BTreeSet::new()).unwrap_err();
        assert!(matches!(err, ScanError::BadCategory(ParseError::OutOfRange(_))));
    }

    #[test]
    fn unparsable_name_outside_the_subset_is_ignored() {
        let all = names(&["3", "99999999999"]);
        let selected = select_categories(all, &set(&["3"])).unwrap();
        assert_eq!(selected, names(&["3"]));
    }

    #[test]
    fn equal_categories_order_by_raw_name() {
        let all = names(&["12a-late", "12a"]);
        let selected = select_categories(all, &BTreeSet::new()).unwrap();
        assert_eq!(selected, names(&["12a", "12a-late"]));
    }
}
