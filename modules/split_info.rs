//! Split-info record stored next to the part files.
//!
//! Written once by the splitter after every part is on disk, read by the
//! merger to learn how many parts to expect and where the original file lived.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::{IoContext, Result};

/// File name of the record inside the parts directory
pub const SPLIT_INFO_FILE_NAME: &str = "splitted_info.json";

const TEMP_SUFFIX: &str = ".tmp";

/// Part count and original file path of a split
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitInfo {
    /// Number of part files, numbered `1..=part_count`
    #[serde(rename = "PartCount")]
    pub part_count: u64,
    /// Source path at split time. Only a hint, may be empty or stale.
    #[serde(rename = "FilePath")]
    pub file_path: String,
}

/// Location of the record inside `parts_dir`
pub fn split_info_path(parts_dir: &Path) -> PathBuf {
    parts_dir.join(SPLIT_INFO_FILE_NAME)
}

impl SplitInfo {
    pub fn new(part_count: u64, file_path: impl Into<String>) -> Self {
        Self {
            part_count,
            file_path: file_path.into(),
        }
    }

    /// Read and parse the record at `path`
    pub fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .io_context(|| format!("Could not open info file '{}'", path.display()))?;

        serde_json::from_reader(BufReader::new(file))
            .map_err(io::Error::from)
            .io_context(|| format!("Could not parse the info file '{}'", path.display()))
    }

    /// Write the record to `path`, replacing any previous record atomically
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        let file = File::create(&temp_path)
            .io_context(|| format!("Could not create the split info file '{}'", temp_path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, self)
            .map_err(io::Error::from)
            .io_context(|| "Could not create the split information")?;
        writer
            .flush()
            .and_then(|_| writer.get_ref().sync_all())
            .io_context(|| format!("Could not write the split information to '{}'", temp_path.display()))?;
        drop(writer);

        fs::rename(&temp_path, path)
            .io_context(|| format!("Could not move the split info file into place at '{}'", path.display()))?;

        debug!("Wrote split info to {}: {:?}", path.display(), self);
        Ok(())
    }

    /// Load the record from `parts_dir`, or `None` if it is missing or unreadable
    pub fn probe(parts_dir: &Path) -> Option<Self> {
        let path = split_info_path(parts_dir);
        match Self::read_from(&path) {
            Ok(info) => {
                debug!("Loaded split info from {}: {:?}", path.display(), info);
                Some(info)
            }
            Err(e) => {
                warn!("No usable split info: {}", e);
                None
            }
        }
    }
}
