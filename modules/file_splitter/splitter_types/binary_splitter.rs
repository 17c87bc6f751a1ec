use super::super::types::*;
use crate::modules::error::{IoContext, Result};
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use tracing::debug;

/// Fixed-size splitting strategy that cuts strictly on byte counts
pub struct BinarySplitter;

impl SplitStrategy for BinarySplitter {
    fn split(&self, source: &mut dyn BufRead, parts_dir: &Path, parts_size: u64) -> Result<u64> {
        let mut part_count = 0;

        loop {
            // Only input that is actually there gets a part, so an exact multiple
            // of the part size ends without an empty trailing file
            let at_end = source
                .fill_buf()
                .io_context(|| "Could not read from source file")?
                .is_empty();
            if at_end {
                break;
            }

            part_count += 1;
            let (path, mut writer) = create_part_file(parts_dir, part_count)?;

            let mut chunk = (&mut *source).take(parts_size);
            let bytes_written = io::copy(&mut chunk, &mut writer)
                .io_context(|| format!("Could not write to part file '{}'", path.display()))?;
            writer
                .flush()
                .io_context(|| format!("Could not write the whole part to the part file '{}'", path.display()))?;

            debug!("Wrote part {} ({} bytes) to {}", part_count, bytes_written, path.display());
        }

        Ok(part_count)
    }

    fn mode(&self) -> SplitMode {
        SplitMode::Binary
    }
}
