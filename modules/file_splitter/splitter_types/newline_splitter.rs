use super::super::types::*;
use crate::modules::error::{IoContext, Result};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

/// Line terminator written after every terminated source line
#[cfg(windows)]
pub const LINE_ENDING: &[u8] = b"\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &[u8] = b"\n";

/// Line-oriented splitting strategy that never cuts a line across two parts
///
/// A part is closed before a line that would push it past the part size, unless
/// the part is still empty. A single line longer than the part size therefore
/// gets a part of its own that exceeds the limit.
pub struct NewlineSplitter;

impl SplitStrategy for NewlineSplitter {
    fn split(&self, source: &mut dyn BufRead, parts_dir: &Path, parts_size: u64) -> Result<u64> {
        let mut part_count = 1;
        let (mut path, mut writer) = create_part_file(parts_dir, part_count)?;
        let mut current_size: u64 = 0;
        let mut line = Vec::new();

        loop {
            line.clear();
            let bytes_read = source
                .read_until(b'\n', &mut line)
                .io_context(|| "Could not read from source file")?;
            if bytes_read == 0 {
                break;
            }

            let terminated = strip_line_terminator(&mut line);
            let line_size = line.len() as u64 + if terminated { LINE_ENDING.len() as u64 } else { 0 };

            if current_size > 0 && current_size + line_size > parts_size {
                writer
                    .flush()
                    .io_context(|| format!("Could not write to part file '{}'", path.display()))?;
                debug!("Closed part {} at {} bytes", part_count, current_size);

                part_count += 1;
                (path, writer) = create_part_file(parts_dir, part_count)?;
                current_size = 0;
            }

            writer
                .write_all(&line)
                .and_then(|_| if terminated { writer.write_all(LINE_ENDING) } else { Ok(()) })
                .io_context(|| format!("Could not write the whole line to the part file '{}'", path.display()))?;
            current_size += line_size;
        }

        writer
            .flush()
            .io_context(|| format!("Could not write to part file '{}'", path.display()))?;
        debug!("Closed part {} at {} bytes", part_count, current_size);

        Ok(part_count)
    }

    fn mode(&self) -> SplitMode {
        SplitMode::Newline
    }
}

/// Drop a trailing `\n` or `\r\n`, reporting whether the line had one
fn strip_line_terminator(line: &mut Vec<u8>) -> bool {
    if line.last() != Some(&b'\n') {
        return false;
    }
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn split_text(text: &str, parts_size: u64) -> (TempDir, u64) {
        let dir = TempDir::new().unwrap();
        let mut source = Cursor::new(text.as_bytes().to_vec());
        let count = NewlineSplitter.split(&mut source, dir.path(), parts_size).unwrap();
        (dir, count)
    }

    fn read_part(dir: &TempDir, index: u64) -> String {
        String::from_utf8(fs::read(part_file_path(dir.path(), index)).unwrap()).unwrap()
    }

    fn nl() -> &'static str {
        std::str::from_utf8(LINE_ENDING).unwrap()
    }

    #[test]
    fn test_lines_grouped_under_limit() {
        // Each line is 5 bytes plus terminator
        let (dir, count) = split_text("aaaaa\nbbbbb\nccccc\nddddd\n", 13);

        assert_eq!(count, 2);
        assert_eq!(read_part(&dir, 1), format!("aaaaa{0}bbbbb{0}", nl()));
        assert_eq!(read_part(&dir, 2), format!("ccccc{0}ddddd{0}", nl()));
    }

    #[test]
    fn test_oversized_line_gets_own_part() {
        let long = "x".repeat(50);
        let (dir, count) = split_text(&format!("ab\n{}\ncd\n", long), 10);

        assert_eq!(count, 3);
        assert_eq!(read_part(&dir, 1), format!("ab{}", nl()));
        assert_eq!(read_part(&dir, 2), format!("{}{}", long, nl()));
        assert_eq!(read_part(&dir, 3), format!("cd{}", nl()));
    }

    #[test]
    fn test_empty_input_still_creates_one_part() {
        let (dir, count) = split_text("", 10);

        assert_eq!(count, 1);
        assert_eq!(read_part(&dir, 1), "");
    }

    #[test]
    fn test_unterminated_last_line_kept_as_is() {
        let (dir, count) = split_text("one\ntwo", 1000);

        assert_eq!(count, 1);
        assert_eq!(read_part(&dir, 1), format!("one{}two", nl()));
    }

    #[test]
    fn test_crlf_input_rewritten_with_host_terminator() {
        let (dir, _) = split_text("one\r\ntwo\r\n", 1000);
        assert_eq!(read_part(&dir, 1), format!("one{0}two{0}", nl()));
    }

    #[test]
    fn test_strip_line_terminator() {
        let mut line = b"abc\r\n".to_vec();
        assert!(strip_line_terminator(&mut line));
        assert_eq!(line, b"abc");

        let mut line = b"abc".to_vec();
        assert!(!strip_line_terminator(&mut line));
        assert_eq!(line, b"abc");
    }
}
