//! # award-deck
//!
//! Assembles the photos of a contest awards presentation into one ordered
//! slideshow directory. The filesystem is the data source: one directory per
//! category, photos ordered by filename, output ordered by filename too.
//!
//! # Workflow
//!
//! ```text
//! 1. init      categories.csv  →  Categories/<id>/        (empty dirs)
//!    (operator drops winning photos into each category directory)
//! 2. copy      Categories/     →  Presentation/NNNNs-k.jpg + anomaly report
//! 3. archive   Presentation/   →  Presentation.zip | Presentation.tgz
//! 4. cleanup   removes Categories/ and Presentation/
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`category`] | Category ids (`12a` → number 12, suffix `a`) and their order |
//! | [`naming`] | Presentation filenames (`0012a-3.jpg`, `0012a.jpg`) |
//! | [`scan`] | Finds category directories and selects/sorts them |
//! | [`copy`] | Copies each category's photos; drives a whole run |
//! | [`slides`] | Attaches optional per-category title slides |
//! | [`types`] | The anomaly report produced by a run |
//! | [`layout`] | Creates category directories from the data file; removes trees |
//! | [`archive`] | Packs the presentation with an external zip/tar tool |
//! | [`manual`] | The built-in manual |
//! | [`config`] | `award-deck.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Names Are the Order
//!
//! A slideshow program plays files in name order, so the presentation
//! directory carries its order in the filenames alone: the category number
//! zero-padded to four digits, its suffix, then the position. No playlist,
//! no manifest.
//!
//! ## Anomalies Are Values
//!
//! Short categories and missing slides are data-quality findings, not
//! errors. Each component returns what it found and [`copy::run_copy`]
//! folds those into a single [`types::AnomalyReport`]. Findings never change
//! the exit code; only fatal errors do.
//!
//! ## Fail Fast, Re-run
//!
//! The tool is run by hand. Any I/O failure stops the run with a message,
//! and a re-run after fixing the input overwrites whatever the failed run
//! left behind.

pub mod archive;
pub mod category;
pub mod config;
pub mod copy;
pub mod layout;
pub mod manual;
pub mod naming;
pub mod output;
pub mod scan;
pub mod slides;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
