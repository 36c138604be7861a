//! Result presentation
//!
//! The composer has no UI of its own; everything user-visible goes
//! through a `ResultReporter`. Both calls are fire-and-forget.

use crate::composer::ComposerError;
use crate::result::{CompletedBuild, Severity};

/// Presentation surface for build outcomes
pub trait ResultReporter {
    /// Present a successful build (after relocation, if any)
    fn show_result(&self, result: &CompletedBuild);

    /// Present a build failure
    fn show_error(&self, reason: &ComposerError);
}

/// Output format for the console reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Console reporter used by the CLI
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter {
    format: OutputFormat,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl ResultReporter for ConsoleReporter {
    fn show_result(&self, result: &CompletedBuild) {
        match self.format {
            OutputFormat::Json => match serde_json::to_string_pretty(result) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error serializing result: {e}"),
            },
            OutputFormat::Human => {
                for diag in result.errors.iter().chain(result.warnings.iter()) {
                    let tag = match diag.severity {
                        Severity::Error => "error",
                        Severity::Warning => "warning",
                    };
                    match (&diag.file_path, diag.line) {
                        (Some(file), Some(line)) => {
                            eprintln!("{}:{}: {}: {}", file.display(), line, tag, diag.message)
                        }
                        _ => eprintln!("{}: {}", tag, diag.message),
                    }
                }
                println!(
                    "Compiled {} ({} errors, {} warnings)",
                    result.output_file_path.display(),
                    result.errors.len(),
                    result.warnings.len()
                );
            }
        }
    }

    fn show_error(&self, reason: &ComposerError) {
        match self.format {
            OutputFormat::Json => {
                let payload = serde_json::json!({ "error": reason.to_string() });
                match serde_json::to_string_pretty(&payload) {
                    Ok(json) => eprintln!("{json}"),
                    Err(e) => eprintln!("Error serializing error: {e}"),
                }
            }
            OutputFormat::Human => {
                eprintln!("Build failed: {reason}");
                for diag in reason.diagnostics() {
                    match (&diag.file_path, diag.line) {
                        (Some(file), Some(line)) => {
                            eprintln!("{}:{}: {}", file.display(), line, diag.message)
                        }
                        _ => eprintln!("  {}", diag.message),
                    }
                }
            }
        }
    }
}
