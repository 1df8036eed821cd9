use crate::config::Config;
use crate::error::{Result, UserFriendlyError};
use crate::extractor::dump_writer::{entry_len, DumpWriter};
use crate::extractor::file_reader::{classify, FileOutcome};
use crate::scanner::{FileFilter, TreeWalker};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct DumpProgress {
    pub files_written: usize,
    pub bytes_written: u64,
    pub skipped_binary: Vec<String>,
    pub skipped_special: Vec<String>,
    pub decode_failures: Vec<String>,
    pub errors: Vec<String>,
    pub start_time: Instant,
}

impl DumpProgress {
    pub fn new() -> Self {
        Self {
            files_written: 0,
            bytes_written: 0,
            skipped_binary: Vec::new(),
            skipped_special: Vec::new(),
            decode_failures: Vec::new(),
            errors: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn update_file(&mut self, bytes: u64) {
        self.files_written += 1;
        self.bytes_written += bytes;
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn files_skipped(&self) -> usize {
        self.skipped_binary.len()
            + self.skipped_special.len()
            + self.decode_failures.len()
            + self.errors.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for DumpProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-file notifications emitted while the dump runs, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub enum DumpEvent {
    Written { path: String, bytes: u64 },
    SkippedBinary { path: String, extension: String },
    SkippedSpecial { path: String },
    Undecodable { path: String },
    Failed { path: String, reason: String },
    WalkFailed { message: String },
}

pub struct Dumper {
    config: Config,
    root: PathBuf,
}

impl Dumper {
    pub fn new<P: Into<PathBuf>>(config: Config, root: P) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.output.file_name)
    }

    /// Truncates the output document, then appends every eligible file under
    /// the root. Only failures on the output document itself abort the run.
    pub fn run(&self, on_event: Option<&dyn Fn(&DumpEvent)>) -> Result<DumpProgress> {
        self.config.validate()?;
        let walker = self.walker();
        walker.validate_root()?;

        let mut writer = DumpWriter::create(self.output_path())?;
        let progress = self.process(&walker, Some(&mut writer), on_event)?;
        writer.finish()?;

        tracing::info!(
            files = progress.files_written,
            bytes = progress.bytes_written,
            skipped = progress.files_skipped(),
            "dump finished"
        );

        Ok(progress)
    }

    /// Classifies every file exactly like `run` without touching the output
    /// document. Byte counts are the sizes the entries would have.
    pub fn plan(&self, on_event: Option<&dyn Fn(&DumpEvent)>) -> Result<DumpProgress> {
        self.config.validate()?;
        let walker = self.walker();
        walker.validate_root()?;

        self.process(&walker, None, on_event)
    }

    fn walker(&self) -> TreeWalker {
        TreeWalker::new(&self.root).with_sorting(self.config.filters.sort_entries)
    }

    fn process(
        &self,
        walker: &TreeWalker,
        mut writer: Option<&mut DumpWriter>,
        on_event: Option<&dyn Fn(&DumpEvent)>,
    ) -> Result<DumpProgress> {
        let filter = FileFilter::new(&self.config);
        let mut progress = DumpProgress::new();

        let emit = |event: DumpEvent| {
            if let Some(callback) = on_event {
                callback(&event);
            }
        };

        for item in walker.candidates() {
            let candidate = match item {
                Ok(candidate) => candidate,
                Err(e) => {
                    tracing::warn!(error = %e, "walk error");
                    progress.add_error(e.to_string());
                    emit(DumpEvent::WalkFailed {
                        message: e.user_message(),
                    });
                    continue;
                }
            };

            // Lossy only when the path is not UTF-8, and such files are never written
            let display_path = candidate.display_path();

            match classify(&filter, &candidate) {
                FileOutcome::Text(content) => {
                    let bytes = match writer.as_deref_mut() {
                        Some(writer) => writer.append_entry(&display_path, &content)?,
                        None => entry_len(&display_path, &content),
                    };
                    tracing::debug!(path = %display_path, bytes, "appended file");
                    progress.update_file(bytes);
                    emit(DumpEvent::Written {
                        path: display_path,
                        bytes,
                    });
                }
                FileOutcome::OutputFile => {
                    tracing::debug!(path = %display_path, "skipping output document");
                }
                FileOutcome::Special => {
                    progress.skipped_special.push(display_path.clone());
                    emit(DumpEvent::SkippedSpecial { path: display_path });
                }
                FileOutcome::Binary { extension } => {
                    progress.skipped_binary.push(display_path.clone());
                    emit(DumpEvent::SkippedBinary {
                        path: display_path,
                        extension,
                    });
                }
                FileOutcome::Undecodable { valid_up_to } => {
                    tracing::debug!(path = %display_path, valid_up_to, "invalid UTF-8");
                    progress.decode_failures.push(display_path.clone());
                    emit(DumpEvent::Undecodable { path: display_path });
                }
                FileOutcome::Unreadable(source) => {
                    tracing::debug!(path = %candidate.source_path.display(), error = %source, "read failed");
                    progress.add_error(format!("Failed to read {}: {}", display_path, source));
                    emit(DumpEvent::Failed {
                        path: display_path,
                        reason: source.to_string(),
                    });
                }
            }
        }

        Ok(progress)
    }
}
