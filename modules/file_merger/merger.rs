use super::types::*;
use crate::modules::error::{FileSplitError, IoContext, Result};
use crate::modules::file_splitter::{part_file_path, DEFAULT_PARTS_DIR};
use crate::modules::split_info::SplitInfo;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Concatenates part files back into the original file
pub struct FileMerger {
    config: MergeConfig,
}

impl FileMerger {
    /// Create a new merger with default configuration
    pub fn new() -> Self {
        Self {
            config: MergeConfig::default(),
        }
    }

    /// Create a new merger with custom configuration
    pub fn with_config(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn parts_dir(&self) -> &Path {
        if self.config.parts_dir.as_os_str().is_empty() {
            Path::new(DEFAULT_PARTS_DIR)
        } else {
            &self.config.parts_dir
        }
    }

    /// Check that the parts directory exists and is a directory
    pub fn validate(&self) -> Result<()> {
        let parts_dir = self.parts_dir();
        match fs::metadata(parts_dir) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(FileSplitError::validation(format!(
                "'{}' is not a directory",
                parts_dir.display()
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FileSplitError::validation(format!(
                "'{}' does not exist",
                parts_dir.display()
            ))),
            Err(e) => Err(e).io_context(|| format!("Could not inspect parts dir '{}'", parts_dir.display())),
        }
    }

    /// Load the split-info record; `None` when missing or unreadable
    pub fn load_split_info(&self) -> Option<SplitInfo> {
        SplitInfo::probe(self.parts_dir())
    }

    /// Pick the destination: configured path first, then the recorded one
    pub fn resolve_destination(&self, split_info: Option<&SplitInfo>) -> Result<PathBuf> {
        if let Some(path) = self.config.file_path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path.clone());
        }

        split_info
            .map(|info| info.file_path.as_str())
            .filter(|recorded| !recorded.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| FileSplitError::validation("File path is required"))
    }

    /// Merge all parts into the destination file
    pub fn merge(&self) -> Result<MergeOutcome> {
        self.validate()?;

        let split_info = self.load_split_info();
        let destination = self.resolve_destination(split_info.as_ref())?;
        let plan = MergePlan::from_split_info(split_info.as_ref());

        info!(
            "Merging parts from {} into {} ({:?})",
            self.parts_dir().display(),
            destination.display(),
            plan
        );

        let file = File::create(&destination)
            .io_context(|| format!("Could not create destination file '{}'", destination.display()))?;
        let mut writer = BufWriter::new(file);

        let merged = match plan {
            MergePlan::Empty => Ok(0),
            MergePlan::Exact(part_count) => self.merge_exact(part_count, &mut writer, &destination),
            MergePlan::Probe => {
                warn!("Could not find any part count, merging until a part is missing");
                self.merge_probing(&mut writer, &destination)
            }
        };

        let parts_merged = merged
            .and_then(|count| {
                writer
                    .flush()
                    .io_context(|| format!("Could not write to destination file '{}'", destination.display()))?;
                Ok(count)
            })
            .map_err(|e| {
                warn!("Merge failed, partial output left at {}", destination.display());
                e
            })?;

        info!("Merged {} parts into {}", parts_merged, destination.display());
        Ok(MergeOutcome {
            destination,
            parts_merged,
        })
    }

    fn merge_exact(&self, part_count: u64, writer: &mut BufWriter<File>, destination: &Path) -> Result<u64> {
        for index in 1..=part_count {
            let path = part_file_path(self.parts_dir(), index);
            let part = File::open(&path)
                .io_context(|| format!("Could not open part file '{}'", path.display()))?;
            append_part(part, &path, writer, destination)?;
        }
        Ok(part_count)
    }

    fn merge_probing(&self, writer: &mut BufWriter<File>, destination: &Path) -> Result<u64> {
        let mut merged = 0;
        loop {
            let path = part_file_path(self.parts_dir(), merged + 1);
            let part = match File::open(&path) {
                Ok(part) => part,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("No part at {}, stopping", path.display());
                    break;
                }
                Err(e) => {
                    return Err(e).io_context(|| format!("Could not open part file '{}'", path.display()));
                }
            };
            append_part(part, &path, writer, destination)?;
            merged += 1;
        }
        Ok(merged)
    }
}

impl Default for FileMerger {
    fn default() -> Self {
        Self::new()
    }
}

fn append_part(part: File, path: &Path, writer: &mut BufWriter<File>, destination: &Path) -> Result<()> {
    let mut reader = BufReader::with_capacity(MERGE_BUFFER_SIZE, part);
    let bytes = io::copy(&mut reader, writer).io_context(|| {
        format!(
            "Could not write the whole part '{}' to the destination file '{}'",
            path.display(),
            destination.display()
        )
    })?;
    debug!("Appended {} ({} bytes)", path.display(), bytes);
    Ok(())
}
