use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codedump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concatenate every text file in a directory tree into one dump file")]
#[command(
    long_about = "CodeDump walks a directory recursively and writes the content of every \
                  UTF-8 text file into a single output file, each entry headed by its \
                  relative path. Binary files (by extension) and undecodable files are skipped."
)]
#[command(after_help = "EXAMPLES:\n  \
    codedump\n  \
    codedump ./my-project --output context.txt\n  \
    codedump --skip lock,csv --no-sort\n  \
    codedump --dry-run --output-format json")]
pub struct Cli {
    /// Directory to dump
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Output file name, created inside the root directory
    #[arg(short, long, env = "CODEDUMP_OUTPUT")]
    pub output: Option<String>,

    /// Additional extensions to skip (comma-separated)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Extra file extensions to treat as binary (e.g., lock,csv)"
    )]
    pub skip: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Keep the filesystem's own enumeration order
    #[arg(long, help = "Do not sort directory entries (output order becomes filesystem dependent)")]
    pub no_sort: bool,

    /// Output format for diagnostics
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (classify files without writing the dump)
    #[arg(long, help = "Show what would be dumped without writing the output file")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_file_name(self.output.clone())
            .with_extra_skip_extensions(self.skip.clone())
            .with_sort_entries(if self.no_sort { Some(false) } else { None })
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["codedump"]).unwrap();

        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.skip.is_none());
        assert!(!cli.no_sort);
        assert!(!cli.dry_run);
        assert!(matches!(cli.output_format, OutputFormat::Human));
    }

    #[test]
    fn test_overrides_from_arguments() {
        let cli = Cli::try_parse_from([
            "codedump",
            "some/dir",
            "--output",
            "all.txt",
            "--skip",
            "lock,CSV",
            "--no-sort",
        ])
        .unwrap();

        assert_eq!(cli.root, PathBuf::from("some/dir"));

        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides());

        assert_eq!(config.output.file_name, "all.txt");
        assert!(config.filters.skip_extensions.contains(&".lock".to_string()));
        assert!(config.filters.skip_extensions.contains(&".csv".to_string()));
        assert!(!config.filters.sort_entries);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["codedump", "-q", "-v"]).is_err());

        let cli = Cli::try_parse_from(["codedump", "-vv"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);
    }

    #[test]
    fn test_output_format_values() {
        let cli = Cli::try_parse_from(["codedump", "--output-format", "json"]).unwrap();
        assert!(matches!(cli.output_format, OutputFormat::Json));
        assert_eq!(cli.output_mode(), OutputMode::Json);

        assert!(Cli::try_parse_from(["codedump", "--output-format", "xml"]).is_err());
    }
}
