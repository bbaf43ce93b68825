//! Data-quality findings from one `copy` run.
//!
//! These are the only outputs of a copy besides the files themselves. They
//! serialize to JSON for `copy --json`.

use serde::Serialize;

/// A regular category that ended up with too few photos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortCategory {
    /// Raw category directory name.
    pub category: String,
    /// Photos copied (after skipping). May be zero.
    pub count: usize,
}

/// Findings accumulated over one copy, in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnomalyReport {
    pub short_categories: Vec<ShortCategory>,
    /// Categories for which slides were enabled but none was found.
    pub missing_slides: Vec<String>,
}

impl AnomalyReport {
    pub fn is_clean(&self) -> bool {
        self.short_categories.is_empty() && self.missing_slides.is_empty()
    }
}
