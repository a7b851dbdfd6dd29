use clap::ValueEnum;
use movie_sync_core::ValidationErrors;
use movie_sync_models::{AlertKind, AlertState};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Success,
    Error,
    Info,
    Warning,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Info => "info",
            Level::Warning => "warning",
        }
    }
}

/// Terminal writer honouring `--output` and `--quiet`
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn emit(&self, level: Level, msg: &str) {
        // Errors are shown even in quiet mode
        if self.quiet && level != Level::Error {
            return;
        }
        match self.format {
            OutputFormat::Human => match level {
                Level::Success => println!("{} {}", "✓".green(), msg),
                Level::Error => eprintln!("{} {}", "✗".red(), msg),
                Level::Info => println!("{}", msg),
                Level::Warning => println!("{} {}", "⚠".yellow(), msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": level.as_str(), "message": msg }));
            }
        }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.emit(Level::Success, msg.as_ref());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        self.emit(Level::Error, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.emit(Level::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.emit(Level::Warning, msg.as_ref());
    }

    /// Render the active alert in the colour of its kind
    pub fn alert(&self, alert: &AlertState) {
        match alert.kind {
            AlertKind::Success => self.success(&alert.message),
            AlertKind::Failure => self.error(&alert.message),
        }
    }

    /// Inline per-field messages, one line per failing field
    pub fn field_errors(&self, errors: &ValidationErrors) {
        match self.format {
            OutputFormat::Human => {
                for (field, message) in errors.iter() {
                    eprintln!("  {} {}: {}", "✗".red(), field.label().bold(), message);
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "validation", "errors": errors }));
            }
        }
    }

    /// Print structured data; ignored in human mode where callers render tables
    pub fn json(&self, data: &serde_json::Value) {
        if self.is_human() || self.quiet {
            return;
        }
        self.print_json(data);
    }

    /// Print a rendered block (table, detail view) in human mode only
    pub fn block(&self, text: impl std::fmt::Display) {
        if self.is_human() && !self.quiet {
            println!("{}", text);
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            _ => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }
}
