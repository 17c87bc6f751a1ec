use std::path::PathBuf;

use crate::modules::file_splitter::DEFAULT_PARTS_DIR;
use crate::modules::split_info::SplitInfo;

/// Buffer size for reading each part
pub const MERGE_BUFFER_SIZE: usize = 8192;

/// Configuration for merge operations
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Directory holding the part files and the split-info record
    pub parts_dir: PathBuf,
    /// Destination file. Falls back to the path in the split-info record.
    pub file_path: Option<PathBuf>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            parts_dir: PathBuf::from(DEFAULT_PARTS_DIR),
            file_path: None,
        }
    }
}

/// How many parts a merge reads, decided before any part is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePlan {
    /// The record says there are no parts
    Empty,
    /// The record fixes the count; a missing part is an error
    Exact(u64),
    /// No record; read parts until the first missing one
    Probe,
}

impl MergePlan {
    pub fn from_split_info(split_info: Option<&SplitInfo>) -> Self {
        match split_info {
            Some(info) if info.part_count == 0 => MergePlan::Empty,
            Some(info) => MergePlan::Exact(info.part_count),
            None => MergePlan::Probe,
        }
    }
}

/// Result of a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub destination: PathBuf,
    /// Number of part files appended to the destination
    pub parts_merged: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_split_info() {
        assert_eq!(MergePlan::from_split_info(None), MergePlan::Probe);
        assert_eq!(MergePlan::from_split_info(Some(&SplitInfo::new(0, "a"))), MergePlan::Empty);
        assert_eq!(MergePlan::from_split_info(Some(&SplitInfo::new(4, ""))), MergePlan::Exact(4));
    }
}
