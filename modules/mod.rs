//! Library modules for file splitting and merging
//!
//! This library provides modules for:
//! - Typed errors shared by both directions
//! - The split-info record persisted next to the parts
//! - Splitting a file into parts (binary or newline mode)
//! - Merging parts back into a single file

pub mod error;
pub mod split_info;
pub mod file_splitter;
pub mod file_merger;

// Re-export commonly used types and structs
pub use error::{FileSplitError, IoContext, Result};
pub use split_info::{SplitInfo, split_info_path, SPLIT_INFO_FILE_NAME};
pub use file_splitter::{
    FileSplitter, SplitConfig, SplitMode, SplitOutcome, part_file_path,
    DEFAULT_PARTS_DIR, DEFAULT_PARTS_SIZE,
};
pub use file_merger::{FileMerger, MergeConfig, MergeOutcome, MergePlan};
