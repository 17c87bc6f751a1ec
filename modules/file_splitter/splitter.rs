use super::types::*;
use super::splitter_types::{BinarySplitter, NewlineSplitter};
use crate::modules::error::{FileSplitError, IoContext, Result};
use crate::modules::split_info::{split_info_path, SplitInfo};
use std::fs::{self, DirBuilder, File};
use std::io::{self, BufReader};
use std::path::Path;
use tracing::info;

/// Splits a source file into part files and records the split-info next to them
pub struct FileSplitter {
    config: SplitConfig,
}

impl FileSplitter {
    /// Create a new file splitter with default configuration
    pub fn new() -> Self {
        Self {
            config: SplitConfig::default(),
        }
    }

    /// Create a new file splitter with custom configuration
    pub fn with_config(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn parts_dir(&self) -> &Path {
        self.config.effective_parts_dir()
    }

    pub fn parts_size(&self) -> u64 {
        self.config.effective_parts_size()
    }

    /// Make sure the parts directory exists, returning whether it was created
    pub fn prepare_destination(&self) -> Result<bool> {
        let parts_dir = self.parts_dir();

        match fs::metadata(parts_dir) {
            Ok(metadata) if metadata.is_dir() => Ok(false),
            Ok(_) => Err(FileSplitError::validation(format!(
                "'{}' is not a directory",
                parts_dir.display()
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Creating parts dir '{}'", parts_dir.display());
                let mut builder = DirBuilder::new();
                #[cfg(unix)]
                {
                    use std::os::unix::fs::DirBuilderExt;
                    builder.mode(0o755);
                }
                builder
                    .create(parts_dir)
                    .io_context(|| format!("Could not create parts dir '{}'", parts_dir.display()))?;
                Ok(true)
            }
            Err(e) => Err(e).io_context(|| format!("Could not inspect parts dir '{}'", parts_dir.display())),
        }
    }

    /// Check the source file and parts directory before splitting
    ///
    /// A missing parts directory is fine here, `prepare_destination` creates it.
    pub fn validate(&self) -> Result<()> {
        let file_path = &self.config.file_path;
        if file_path.as_os_str().is_empty() {
            return Err(FileSplitError::validation("File path is required"));
        }

        match fs::metadata(file_path) {
            Ok(metadata) if metadata.is_dir() => {
                return Err(FileSplitError::validation(format!(
                    "'{}' is a directory, not a file",
                    file_path.display()
                )));
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FileSplitError::validation(format!(
                    "File '{}' does not exist",
                    file_path.display()
                )));
            }
            Err(e) => {
                return Err(e).io_context(|| format!("Could not inspect source file '{}'", file_path.display()));
            }
        }

        let parts_dir = self.parts_dir();
        if let Ok(metadata) = fs::metadata(parts_dir) {
            if !metadata.is_dir() {
                return Err(FileSplitError::validation(format!(
                    "'{}' is not a directory",
                    parts_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Prepare the parts directory and split in the configured mode
    pub fn run(&self) -> Result<SplitOutcome> {
        let created_dir = self.prepare_destination()?;
        let part_count = self.split()?;
        Ok(SplitOutcome {
            part_count,
            created_dir,
        })
    }

    /// Split in the configured mode, returning the number of parts written
    pub fn split(&self) -> Result<u64> {
        let strategy: Box<dyn SplitStrategy> = match self.config.mode {
            SplitMode::Binary => Box::new(BinarySplitter),
            SplitMode::Newline => Box::new(NewlineSplitter),
        };

        self.split_with(strategy.as_ref())
    }

    /// Split into fixed-size parts regardless of the configured mode
    pub fn split_fixed(&self) -> Result<u64> {
        self.split_with(&BinarySplitter)
    }

    /// Split into newline-aligned parts regardless of the configured mode
    pub fn split_newline(&self) -> Result<u64> {
        self.split_with(&NewlineSplitter)
    }

    fn split_with(&self, strategy: &dyn SplitStrategy) -> Result<u64> {
        self.validate()?;

        let file_path = &self.config.file_path;
        let parts_dir = self.parts_dir();
        let parts_size = self.parts_size();

        info!(
            "Splitting {} into {} parts of up to {} bytes in {}",
            file_path.display(),
            strategy.mode(),
            parts_size,
            parts_dir.display()
        );

        let source = File::open(file_path)
            .io_context(|| format!("Could not open source file '{}'", file_path.display()))?;
        let mut reader = BufReader::new(source);

        let part_count = strategy.split(&mut reader, parts_dir, parts_size)?;

        SplitInfo::new(part_count, file_path.to_string_lossy())
            .write_to(&split_info_path(parts_dir))?;

        info!("Split {} into {} parts", file_path.display(), part_count);
        Ok(part_count)
    }
}

impl Default for FileSplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn splitter_for(source: PathBuf, parts_dir: PathBuf, parts_size: i64) -> FileSplitter {
        FileSplitter::with_config(SplitConfig {
            parts_size,
            parts_dir,
            file_path: source,
            mode: SplitMode::Binary,
        })
    }

    #[test]
    fn test_prepare_destination_creates_dir() {
        let dir = TempDir::new().unwrap();
        let parts_dir = dir.path().join("parts");
        let splitter = splitter_for(PathBuf::from("unused"), parts_dir.clone(), 10);

        assert!(splitter.prepare_destination().unwrap());
        assert!(parts_dir.is_dir());
        // Second call finds it in place
        assert!(!splitter.prepare_destination().unwrap());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&parts_dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o700, 0o700);
        }
    }

    #[test]
    fn test_prepare_destination_rejects_regular_file() {
        let dir = TempDir::new().unwrap();
        let parts_dir = dir.path().join("parts");
        fs::write(&parts_dir, b"occupied").unwrap();

        let err = splitter_for(PathBuf::from("unused"), parts_dir, 10)
            .prepare_destination()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_inputs() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.bin");
        fs::write(&source, b"payload").unwrap();

        let empty_path = splitter_for(PathBuf::new(), dir.path().join("parts"), 10);
        assert!(empty_path.validate().unwrap_err().is_validation());

        let missing = splitter_for(dir.path().join("nope.bin"), dir.path().join("parts"), 10);
        assert!(missing.validate().unwrap_err().is_validation());

        // Missing parts dir is tolerated
        let ok = splitter_for(source.clone(), dir.path().join("parts"), 10);
        assert!(ok.validate().is_ok());

        let parts_is_file = splitter_for(source.clone(), source.clone(), 10);
        assert!(parts_is_file.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_non_positive_size_uses_default() {
        for size in [0, -5] {
            let splitter = splitter_for(PathBuf::from("x"), PathBuf::from("y"), size);
            assert_eq!(splitter.parts_size(), DEFAULT_PARTS_SIZE);
        }
    }

    #[test]
    fn test_run_writes_split_info() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.bin");
        fs::write(&source, vec![1u8; 2500]).unwrap();
        let parts_dir = dir.path().join("parts");

        let outcome = splitter_for(source.clone(), parts_dir.clone(), 1000).run().unwrap();

        assert_eq!(outcome, SplitOutcome { part_count: 3, created_dir: true });
        let info = SplitInfo::probe(&parts_dir).unwrap();
        assert_eq!(info.part_count, 3);
        assert_eq!(info.file_path, source.to_string_lossy());
    }

    #[test]
    fn test_explicit_mode_entry_points() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("lines.txt");
        fs::write(&source, "first line\nsecond line\n").unwrap();
        let parts_dir = dir.path().join("parts");
        fs::create_dir(&parts_dir).unwrap();
        let splitter = splitter_for(source, parts_dir, 4);

        assert_eq!(splitter.split_fixed().unwrap(), 6);
        assert_eq!(splitter.split_newline().unwrap(), 2);
    }
}
