//! Shared test utilities for the award-deck test suite.
//!
//! Builds category trees in temp directories and reads back what a run
//! left behind.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! category_tree(tmp.path(), &[
//!     ("3", &["a.jpg", "b.jpg"]),
//!     ("12a", &[]),
//! ]);
//!
//! // Each photo's body is "<category>/<file>", so copies are traceable:
//! assert_eq!(read(&tmp.path().join("3/a.jpg")), "3/a.jpg");
//! ```

use std::path::Path;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create one directory per category under `root`, each holding the named
/// files. File contents are `"<category>/<file>"`.
pub fn category_tree(root: &Path, categories: &[(&str, &[&str])]) {
    for (category, files) in categories {
        let dir = root.join(category);
        std::fs::create_dir_all(&dir).unwrap();
        for file in *files {
            write_file(&dir.join(file), &format!("{category}/{file}"));
        }
    }
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

// =========================================================================
// Inspection
// =========================================================================

/// Read a file as UTF-8. Panics with the path on failure.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Sorted names of the entries directly inside `dir`.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
