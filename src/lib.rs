pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FilterConfig, OutputConfig};
pub use error::{CodeDumpError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ConfigSnapshot, DumpEvent, DumpProgress, DumpReport, DumpWriter, Dumper, FileOutcome,
};
pub use scanner::{FileCandidate, FileFilter, TreeWalker};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};

/// Main library interface: one configured dump of one root directory.
pub struct CodeDump {
    config: Config,
    root: PathBuf,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl CodeDump {
    pub fn new<P: Into<PathBuf>>(
        config: Config,
        root: P,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Result<Self> {
        config.validate()?;

        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Ok(Self {
            config,
            root: root.into(),
            output_formatter,
            progress_manager,
        })
    }

    /// Create a CodeDump instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Self::new(
            config,
            cli_args.root.clone(),
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
    }

    /// Write the dump file, announcing every skipped or failing file on the console.
    pub fn dump(&self) -> Result<DumpReport> {
        let dumper = self.dumper();

        self.output_formatter.start_operation(&format!(
            "Extracting code... the result will be saved to '{}'",
            self.config.output.file_name
        ));

        let spinner = self.progress_manager.create_spinner("Dumping files...");
        let on_event = |event: &DumpEvent| {
            self.progress_manager
                .suspend(|| self.output_formatter.print_event(event));
            ui::progress::update_dump_progress(&spinner, event);
        };

        let progress = match dumper.run(Some(&on_event)) {
            Ok(progress) => progress,
            Err(e) => {
                spinner.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &spinner,
            &format!("Dumped {} files", progress.files_written),
            progress.elapsed(),
        );

        self.output_formatter.success(&format!(
            "Done! All code was saved to '{}'",
            self.config.output.file_name
        ));

        Ok(DumpReport::new(
            &self.root,
            &dumper.output_path(),
            &progress,
            &self.config,
            false,
        ))
    }

    /// Classify every file without creating or truncating the dump file.
    pub fn dry_run(&self) -> Result<DumpReport> {
        let dumper = self.dumper();

        self.output_formatter
            .info("DRY RUN MODE - the output file will not be written");
        self.output_formatter.debug(&format!(
            "Skipping extensions: {}",
            self.config.filters.skip_extensions.join(", ")
        ));

        let on_event = |event: &DumpEvent| match event {
            DumpEvent::Written { path, bytes } => self.output_formatter.info(&format!(
                "Would include: {} ({})",
                path,
                ui::output::format_bytes(*bytes)
            )),
            other => self.output_formatter.print_event(other),
        };

        let progress = dumper.plan(Some(&on_event))?;

        Ok(DumpReport::new(
            &self.root,
            &dumper.output_path(),
            &progress,
            &self.config,
            true,
        ))
    }

    fn dumper(&self) -> Dumper {
        Dumper::new(self.config.clone(), self.root.clone())
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &CodeDumpError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Dump `root` with the default configuration and no console output.
pub fn dump_directory<P: AsRef<Path>>(root: P) -> Result<DumpProgress> {
    Dumper::new(Config::default(), root.as_ref()).run(None)
}
