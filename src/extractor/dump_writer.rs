use crate::error::{CodeDumpError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const ENTRY_SEPARATOR: &str = "-------------------------";

/// Size in bytes of the entry `write_entry` produces for `header` and `content`.
pub fn entry_len(header: &str, content: &str) -> u64 {
    (header.len() + content.len() + ENTRY_SEPARATOR.len() + 4) as u64
}

/// Writes one dump entry: `<header>:\n<content>\n<separator>\n`.
pub fn write_entry<W: Write>(writer: &mut W, header: &str, content: &str) -> std::io::Result<u64> {
    writer.write_all(header.as_bytes())?;
    writer.write_all(b":\n")?;
    writer.write_all(content.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(ENTRY_SEPARATOR.as_bytes())?;
    writer.write_all(b"\n")?;

    Ok(entry_len(header, content))
}

/// The output document. Creating it truncates any previous dump; dropping it
/// closes the file on every path.
pub struct DumpWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    bytes_written: u64,
}

impl DumpWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_buffer(path, 64 * 1024)
    }

    pub fn create_with_buffer<P: AsRef<Path>>(path: P, buffer_size: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| CodeDumpError::OutputFile {
            path: path.display().to_string(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "created output document");

        Ok(Self {
            path,
            writer: BufWriter::with_capacity(buffer_size.max(4096), file),
            bytes_written: 0,
        })
    }

    pub fn append_entry(&mut self, header: &str, content: &str) -> Result<u64> {
        let bytes = write_entry(&mut self.writer, header, content).map_err(|e| {
            CodeDumpError::OutputFile {
                path: self.path.display().to_string(),
                source: e,
            }
        })?;

        self.bytes_written += bytes;
        Ok(bytes)
    }

    /// Flushes buffered entries and closes the file.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush().map_err(|e| CodeDumpError::OutputFile {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(self.bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_separator_width() {
        assert_eq!(ENTRY_SEPARATOR.len(), 25);
        assert!(ENTRY_SEPARATOR.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_entry_format() {
        let mut buffer = Vec::new();
        let bytes = write_entry(&mut buffer, "./a.txt", "hello").unwrap();

        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(written, "./a.txt:\nhello\n-------------------------\n");
        assert_eq!(bytes, written.len() as u64);
        assert_eq!(entry_len("./a.txt", "hello"), bytes);
    }

    #[test]
    fn test_content_trailing_newline_leaves_blank_line() {
        let mut buffer = Vec::new();
        write_entry(&mut buffer, "./b.rs", "fn main() {}\n").unwrap();

        let written = String::from_utf8(buffer).unwrap();
        assert!(written.ends_with("fn main() {}\n\n-------------------------\n"));
    }

    #[test]
    fn test_create_truncates_previous_dump() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dump.txt");
        fs::write(&path, "old content that must disappear").unwrap();

        let mut writer = DumpWriter::create(&path).unwrap();
        assert_eq!(writer.append_entry("./x.txt", "x").unwrap(), 37);
        let total = writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "./x.txt:\nx\n-------------------------\n");
        assert_eq!(total, content.len() as u64);
    }

    #[test]
    fn test_create_empty_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dump.txt");

        let writer = DumpWriter::create(&path).unwrap();
        assert_eq!(writer.finish().unwrap(), 0);

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = DumpWriter::create(temp_dir.path().join("missing").join("dump.txt"));

        assert!(matches!(result, Err(CodeDumpError::OutputFile { .. })));
    }
}
