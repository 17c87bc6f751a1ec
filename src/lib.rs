//! # File Splitter Library
//!
//! Splits a file into numbered part files inside a parts directory and merges
//! them back into the original file:
//! - Fixed-size (binary) splitting by byte count
//! - Newline-aligned splitting that never cuts a line in half
//! - A small JSON split-info record so a merge needs no extra parameters
//! - Merging with an exact part count, or by probing parts until one is missing
//!
//! ## Example Usage
//!
//! ```no_run
//! use file_splitter_lib::{FileMerger, FileSplitter, MergeConfig, SplitConfig, SplitMode};
//!
//! fn main() -> anyhow::Result<()> {
//!     let split_config = SplitConfig {
//!         parts_size: 10_000_000,
//!         parts_dir: "parts".into(),
//!         file_path: "video.mp4".into(),
//!         mode: SplitMode::Binary,
//!     };
//!     let outcome = FileSplitter::with_config(split_config).run()?;
//!     println!("Split into {} parts", outcome.part_count);
//!
//!     // The destination path is recovered from the split-info record
//!     let merger = FileMerger::with_config(MergeConfig {
//!         parts_dir: "parts".into(),
//!         file_path: None,
//!     });
//!     let merged = merger.merge()?;
//!     println!("Merged {} parts into {}", merged.parts_merged, merged.destination.display());
//!
//!     Ok(())
//! }
//! ```

// Include the modules from the modules directory
#[path = "../modules/mod.rs"]
pub mod modules;

// Re-export everything from modules for easy access
pub use modules::*;

// Re-export commonly used external types for convenience
pub use anyhow::Context;
pub use serde::{Serialize, Deserialize};
pub use tracing;

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library information
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
