use crate::error::{CodeDumpError, UserFriendlyError};
use crate::extractor::{DumpEvent, DumpReport};
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    /// One diagnostic line per skipped, undecodable or failing file.
    pub fn print_event(&self, event: &DumpEvent) {
        if self.mode == OutputMode::Json {
            self.print_json_event(event);
            return;
        }

        match event {
            DumpEvent::Written { path, bytes } => {
                self.debug(&format!("Added {} ({})", path, format_bytes(*bytes)));
            }
            DumpEvent::SkippedBinary { path, .. } => {
                self.info(&format!("Skipped (binary file): {}", path));
            }
            DumpEvent::SkippedSpecial { path } => {
                self.info(&format!("Skipped (not a regular file): {}", path));
            }
            DumpEvent::Undecodable { path } => {
                self.warning(&format!("Unreadable file (unknown encoding): {}", path));
            }
            DumpEvent::Failed { path, reason } => {
                self.error(&format!("Error processing file {}: {}", path, reason));
            }
            DumpEvent::WalkFailed { message } => {
                self.warning(message);
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &CodeDumpError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_dump_report(&self, report: &DumpReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_report(report);
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                if !self.quiet {
                    self.print_plain_report(report);
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (&CHECKMARK, style(message).green().bold()),
                MessageType::Error => (&CROSS, style(message).red().bold()),
                MessageType::Warning => (&WARNING, style(message).yellow().bold()),
                MessageType::Info => (&INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_event(&self, event: &DumpEvent) {
        let value = match event {
            DumpEvent::Written { path, bytes } => {
                if !self.should_show_message(1) {
                    return;
                }
                serde_json::json!({ "type": "written", "path": path, "bytes": bytes })
            }
            DumpEvent::SkippedBinary { path, extension } => {
                if self.quiet {
                    return;
                }
                serde_json::json!({ "type": "skipped_binary", "path": path, "extension": extension })
            }
            DumpEvent::SkippedSpecial { path } => {
                if self.quiet {
                    return;
                }
                serde_json::json!({ "type": "skipped_special", "path": path })
            }
            DumpEvent::Undecodable { path } => {
                if self.quiet {
                    return;
                }
                serde_json::json!({ "type": "decode_error", "path": path })
            }
            DumpEvent::Failed { path, reason } => {
                serde_json::json!({ "type": "error", "path": path, "reason": reason })
            }
            DumpEvent::WalkFailed { message } => {
                if self.quiet {
                    return;
                }
                serde_json::json!({ "type": "walk_error", "message": message })
            }
        };

        self.print_json_object(&value);
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &DumpReport) {
        let title = if report.dry_run {
            "Dry Run Summary"
        } else {
            "Dump Summary"
        };
        self.print_header(title);

        let value = |v: String| {
            if self.use_colors {
                style(v).cyan().bold().to_string()
            } else {
                v
            }
        };

        println!("  Root:            {}", report.root);
        println!("  Output file:     {}", report.output_file);
        println!("  Files written:   {}", value(report.files_written.to_string()));
        println!("  Bytes written:   {}", value(format_bytes(report.bytes_written)));
        println!("  Binary skipped:  {}", report.skipped_binary.len());
        println!("  Special skipped: {}", report.skipped_special.len());
        println!("  Decode errors:   {}", report.decode_failures.len());
        println!("  Other errors:    {}", report.errors.len());
        println!(
            "  Time taken:      {}",
            value(format_duration(Duration::from_millis(report.duration_ms as u64)))
        );

        self.print_separator();
    }

    fn print_plain_report(&self, report: &DumpReport) {
        if report.dry_run {
            println!("REPORT: Dry run completed");
        } else {
            println!("REPORT: Dump completed");
        }
        println!("Output: {}", report.output_file);
        println!("Files: {}", report.files_written);
        println!("Size: {} bytes", report.bytes_written);
        println!("Skipped binary: {}", report.skipped_binary.len());
        if !report.skipped_special.is_empty() {
            println!("Skipped special: {}", report.skipped_special.len());
        }
        println!("Decode errors: {}", report.decode_failures.len());
        if !report.errors.is_empty() {
            println!("Errors: {}", report.errors.len());
        }
        println!("Duration: {}ms", report.duration_ms);
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
