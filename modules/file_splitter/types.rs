use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::modules::error::{FileSplitError, IoContext, Result};

/// Part size used when the configured size is zero or negative
pub const DEFAULT_PARTS_SIZE: u64 = 25_000_000;
/// Parts directory used when none is configured
pub const DEFAULT_PARTS_DIR: &str = "splitted";
/// Part files are named `<prefix><n>.<extension>`, `n` starting at 1
pub const PART_FILE_PREFIX: &str = "splitted_";
pub const PART_FILE_EXTENSION: &str = "bin";

/// Path of part `index` (1-based) inside `parts_dir`
pub fn part_file_path(parts_dir: &Path, index: u64) -> PathBuf {
    parts_dir.join(format!("{}{}.{}", PART_FILE_PREFIX, index, PART_FILE_EXTENSION))
}

/// Create (or truncate) part `index` for buffered writing
pub(crate) fn create_part_file(parts_dir: &Path, index: u64) -> Result<(PathBuf, BufWriter<File>)> {
    let path = part_file_path(parts_dir, index);
    let file = File::create(&path)
        .io_context(|| format!("Could not create part file '{}'", path.display()))?;
    Ok((path, BufWriter::new(file)))
}

/// How the source file is cut into parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Fixed-size parts on byte boundaries
    #[default]
    Binary,
    /// Whole lines per part, bounded by the part size
    Newline,
}

impl FromStr for SplitMode {
    type Err = FileSplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "binary" | "bin" => Ok(SplitMode::Binary),
            "newline" | "nl" => Ok(SplitMode::Newline),
            other => Err(FileSplitError::validation(format!(
                "Invalid split mode '{}'. Allowed values: binary, newline",
                other
            ))),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::Binary => f.write_str("binary"),
            SplitMode::Newline => f.write_str("newline"),
        }
    }
}

/// Configuration for file splitting operations
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Target part size in bytes. Zero or negative means `DEFAULT_PARTS_SIZE`.
    pub parts_size: i64,
    /// Directory receiving the part files and the split-info record
    pub parts_dir: PathBuf,
    /// Source file to split
    pub file_path: PathBuf,
    pub mode: SplitMode,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            parts_size: DEFAULT_PARTS_SIZE as i64,
            parts_dir: PathBuf::from(DEFAULT_PARTS_DIR),
            file_path: PathBuf::new(),
            mode: SplitMode::Binary,
        }
    }
}

impl SplitConfig {
    pub fn effective_parts_size(&self) -> u64 {
        if self.parts_size <= 0 {
            DEFAULT_PARTS_SIZE
        } else {
            self.parts_size as u64
        }
    }

    pub fn effective_parts_dir(&self) -> &Path {
        if self.parts_dir.as_os_str().is_empty() {
            Path::new(DEFAULT_PARTS_DIR)
        } else {
            &self.parts_dir
        }
    }
}

/// Result of a full split run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOutcome {
    pub part_count: u64,
    /// Whether the parts directory had to be created
    pub created_dir: bool,
}

/// Trait for file splitting implementations
pub trait SplitStrategy {
    /// Write `source` out as part files `1..=n` under `parts_dir`, returning `n`
    fn split(&self, source: &mut dyn BufRead, parts_dir: &Path, parts_size: u64) -> Result<u64>;

    /// Get the mode this strategy implements
    fn mode(&self) -> SplitMode;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing_and_aliases() {
        assert_eq!("binary".parse::<SplitMode>().unwrap(), SplitMode::Binary);
        assert_eq!(" BIN\n".parse::<SplitMode>().unwrap(), SplitMode::Binary);
        assert_eq!("newline".parse::<SplitMode>().unwrap(), SplitMode::Newline);
        assert_eq!("Nl".parse::<SplitMode>().unwrap(), SplitMode::Newline);
        assert!("utf8".parse::<SplitMode>().unwrap_err().is_validation());
    }

    #[test]
    fn test_parts_size_normalization() {
        for size in [0, -1, -25_000_000] {
            let config = SplitConfig { parts_size: size, ..Default::default() };
            assert_eq!(config.effective_parts_size(), DEFAULT_PARTS_SIZE);
        }
        let config = SplitConfig { parts_size: 4096, ..Default::default() };
        assert_eq!(config.effective_parts_size(), 4096);
    }

    #[test]
    fn test_empty_parts_dir_uses_default() {
        let config = SplitConfig { parts_dir: PathBuf::new(), ..Default::default() };
        assert_eq!(config.effective_parts_dir(), Path::new("splitted"));
    }

    #[test]
    fn test_part_file_naming() {
        let path = part_file_path(Path::new("out"), 12);
        assert_eq!(path, Path::new("out").join("splitted_12.bin"));
    }
}
