use crate::error::{CodeDumpError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "project_code_dump.txt";

/// Images, archives, executables, media, fonts and compiled Python artifacts.
pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".svg",
    ".pdf", ".zip", ".rar", ".tar", ".gz",
    ".exe", ".dll", ".so", ".dylib",
    ".mp3", ".wav", ".mp4", ".avi", ".mov",
    ".ttf", ".woff", ".woff2", ".eot",
    ".pyc", ".pyo", ".pyd",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    pub skip_extensions: Vec<String>,
    pub sort_entries: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            skip_extensions: DEFAULT_SKIP_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            sort_entries: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CodeDumpError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CodeDumpError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| CodeDumpError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        config.filters.skip_extensions = normalize_extensions(&config.filters.skip_extensions);
        tracing::debug!(path = %path.display(), "loaded configuration file");

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["codedump.toml", ".codedump.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref file_name) = cli_args.output_file_name {
            self.output.file_name = file_name.trim().to_string();
        }

        if let Some(ref extra) = cli_args.extra_skip_extensions {
            for ext in normalize_extensions(extra) {
                if !self.filters.skip_extensions.contains(&ext) {
                    self.filters.skip_extensions.push(ext);
                }
            }
        }

        if let Some(sort_entries) = cli_args.sort_entries {
            self.filters.sort_entries = sort_entries;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.output.file_name.as_str();

        if name.is_empty() {
            return Err(CodeDumpError::Config {
                message: "Output file name must not be empty".to_string(),
            });
        }

        // The output lives directly in the root, and self-exclusion compares bare names
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(CodeDumpError::Config {
                message: format!("Output file name must be a plain file name: {}", name),
            });
        }

        if let Some(bad) = self
            .filters
            .skip_extensions
            .iter()
            .find(|ext| ext.len() < 2 || !ext.starts_with('.'))
        {
            return Err(CodeDumpError::Config {
                message: format!("Invalid skip extension: '{}'", bad),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

/// Lowercases each entry and adds the leading dot when it is missing.
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(extensions.len());

    for ext in extensions {
        let ext = ext.as_ref().trim().to_lowercase();
        if ext.is_empty() {
            continue;
        }

        let ext = if ext.starts_with('.') {
            ext
        } else {
            format!(".{}", ext)
        };

        if !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }

    normalized
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_file_name: Option<String>,
    pub extra_skip_extensions: Option<Vec<String>>,
    pub sort_entries: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_file_name(mut self, name: Option<String>) -> Self {
        self.output_file_name = name;
        self
    }

    pub fn with_extra_skip_extensions(mut self, extensions: Option<Vec<String>>) -> Self {
        self.extra_skip_extensions = extensions;
        self
    }

    pub fn with_sort_entries(mut self, sort: Option<bool>) -> Self {
        self.sort_entries = sort;
        self
    }
}
