use clap::Parser;
use codedump::{Cli, CodeDump, CodeDumpError, OutputFormatter, UserFriendlyError};
use std::process;
use tracing::Level;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let codedump = match CodeDump::from_cli(&cli) {
        Ok(codedump) => codedump,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    let result = if cli.dry_run {
        codedump.dry_run()
    } else {
        codedump.dump()
    };

    match result {
        Ok(report) => {
            codedump.output_formatter().print_dump_report(&report);
            // Per-file failures are reported, never fatal
            0
        }
        Err(e) => {
            codedump.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &CodeDumpError) -> i32 {
    match error {
        CodeDumpError::InvalidRoot { .. } => 2,
        CodeDumpError::OutputFile { .. } => 3,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "codedump.toml".to_string());

    match CodeDump::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  codedump --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(cli: &Cli, error: &CodeDumpError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    // Diagnostics on stdout belong to the formatter; tracing goes to stderr
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
