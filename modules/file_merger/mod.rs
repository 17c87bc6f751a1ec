//! File Merger
//!
//! Concatenates the part files of a parts directory back into one file.
//! The split-info record, when present, fixes the part count and supplies a
//! default destination. Without it, parts are probed in order until one is
//! missing.

pub mod types;
pub mod merger;

pub use types::*;
pub use merger::FileMerger;
