use crate::scanner::{EntryKind, FileCandidate, FileFilter};
use std::fs;
use std::io;
use std::path::Path;

/// What happened to a single discovered file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Decoded text, ready to append verbatim.
    Text(String),
    /// The dump file itself; never reported.
    OutputFile,
    /// FIFO, socket or device; never opened.
    Special,
    Binary { extension: String },
    /// Bytes are not UTF-8. `valid_up_to` is the offset of the first bad sequence.
    Undecodable { valid_up_to: usize },
    Unreadable(io::Error),
}

/// `Text` is only returned for candidates whose header path is valid UTF-8.
pub fn classify(filter: &FileFilter, candidate: &FileCandidate) -> FileOutcome {
    if filter.is_output_file(&candidate.file_name) {
        return FileOutcome::OutputFile;
    }

    if candidate.kind == EntryKind::Special {
        return FileOutcome::Special;
    }

    if let Some(extension) = filter.matching_extension(&candidate.file_name) {
        return FileOutcome::Binary {
            extension: extension.to_string(),
        };
    }

    if candidate.header_path().is_none() {
        return FileOutcome::Unreadable(io::Error::new(
            io::ErrorKind::InvalidData,
            "file path is not valid UTF-8",
        ));
    }

    read_text(&candidate.source_path)
}

/// Reads the whole file before decoding so nothing partial ever reaches the dump.
pub fn read_text(path: &Path) -> FileOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileOutcome::Unreadable(e),
    };

    match String::from_utf8(bytes) {
        Ok(text) => FileOutcome::Text(text),
        Err(e) => FileOutcome::Undecodable {
            valid_up_to: e.utf8_error().valid_up_to(),
        },
    }
}
