use crate::config::Config;
use crate::extractor::DumpProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpReport {
    pub root: String,
    pub output_file: String,
    pub dry_run: bool,
    pub generated_at: DateTime<Utc>,
    pub duration_ms: u128,
    pub files_written: usize,
    pub bytes_written: u64,
    pub skipped_binary: Vec<String>,
    pub skipped_special: Vec<String>,
    pub decode_failures: Vec<String>,
    pub errors: Vec<String>,
    pub config_used: ConfigSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub output_file_name: String,
    pub skip_extensions: Vec<String>,
    pub sort_entries: bool,
}

impl From<&Config> for ConfigSnapshot {
    fn from(config: &Config) -> Self {
        Self {
            output_file_name: config.output.file_name.clone(),
            skip_extensions: config.filters.skip_extensions.clone(),
            sort_entries: config.filters.sort_entries,
        }
    }
}

impl DumpReport {
    pub fn new(
        root: &Path,
        output_file: &Path,
        progress: &DumpProgress,
        config: &Config,
        dry_run: bool,
    ) -> Self {
        Self {
            root: root.display().to_string(),
            output_file: output_file.display().to_string(),
            dry_run,
            generated_at: Utc::now(),
            duration_ms: progress.elapsed().as_millis(),
            files_written: progress.files_written,
            bytes_written: progress.bytes_written,
            skipped_binary: progress.skipped_binary.clone(),
            skipped_special: progress.skipped_special.clone(),
            decode_failures: progress.decode_failures.clone(),
            errors: progress.errors.clone(),
            config_used: ConfigSnapshot::from(config),
        }
    }
}
