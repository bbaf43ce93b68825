//! Canonical filenames in the presentation directory.
//!
//! Every file copied into the presentation gets a name derived from its
//! category and sequence position, so a plain filename sort of the
//! presentation directory is the slideshow order:
//!
//! ```text
//! Presentation/
//! ├── 0003-0.jpg     # slide for category 3
//! ├── 0003-1.jpg
//! ├── 0003-2.jpg
//! ├── 0012a.jpg      # slide for category 12a (bare convention)
//! ├── 0012a-1.jpg
//! └── 0900-1.jpg
//! ```
//!
//! Slides use either the `-0` position or no position at all; see
//! [`crate::slides`] for how the two conventions are resolved.

use crate::category::CategoryId;

/// Position of a file within its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seq {
    /// `NNNNs-<n>.jpg`. Photos use 1-based positions; slides may use 0.
    Position(usize),
    /// `NNNNs.jpg`, no position.
    Bare,
}

/// Derive the presentation filename for a category and position.
///
/// - `(7b, Position(3))` → `"0007b-3.jpg"`
/// - `(12, Bare)` → `"0012.jpg"`
/// - `(12345, Position(1))` → `"12345-1.jpg"` (padding is a minimum width)
pub fn presentation_name(cat: &CategoryId, seq: Seq) -> String {
    match seq {
        Seq::Position(n) => format!("{:04}{}-{}.jpg", cat.number, cat.suffix, n),
        Seq::Bare => format!("{:04}{}.jpg", cat.number, cat.suffix),
    }
}
