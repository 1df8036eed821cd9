use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeDumpError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid root directory: {path}")]
    InvalidRoot { path: String },

    #[error("Cannot write output file {path}: {source}")]
    OutputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot traverse {path}: {message}")]
    Walk { path: String, message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CodeDumpError {
    fn user_message(&self) -> String {
        match self {
            CodeDumpError::InvalidRoot { path } => {
                format!("Cannot dump directory: {}", path)
            }
            CodeDumpError::OutputFile { path, source } => {
                format!("Cannot write output file {}: {}", path, source)
            }
            CodeDumpError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            CodeDumpError::Walk { path, message } => {
                format!("Skipping part of the tree at {}: {}", path, message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CodeDumpError::InvalidRoot { .. } => Some(
                "Pass an existing directory as the first argument, or run from inside the project directory.".to_string()
            ),
            CodeDumpError::OutputFile { .. } => Some(
                "Ensure you have write permission for the root directory, or choose another name with --output.".to_string()
            ),
            CodeDumpError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CodeDumpError {
    fn from(error: toml::de::Error) -> Self {
        CodeDumpError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeDumpError>;
