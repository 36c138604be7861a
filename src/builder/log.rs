//! TeX log interpretation
//!
//! Recovers diagnostics and the produced artifact's path from an
//! engine log written with `-file-line-error`. The authoritative
//! success signal is the `Output written on ...` line; an engine can
//! finish without logging a single error and still produce nothing.

use regex_lite::Regex;
use std::fs;
use std::path::Path;

use crate::result::{BuildResult, Diagnostic};

/// Parse the log file at `log_path`
///
/// `None` when the log does not exist or cannot be read at all.
/// Relative artifact paths are resolved against the log's directory.
pub fn parse_log_file(log_path: &Path) -> Option<BuildResult> {
    let bytes = fs::read(log_path).ok()?;
    // Engine logs are frequently not valid UTF-8
    let content = String::from_utf8_lossy(&bytes);

    let log_dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    Some(parse_log(&content, log_dir))
}

/// Parse log text, resolving artifact paths against `log_dir`
pub fn parse_log(content: &str, log_dir: &Path) -> BuildResult {
    let output_re = Regex::new(r"^Output written on (.+?) \((\d+) pages?").unwrap();
    let no_output_re = Regex::new(r"^No pages of output").unwrap();
    let file_line_re = Regex::new(r"^(?:\./)?([^:]+\.\w+):(\d+):\s*(?:LaTeX Error:\s*)?(.+)$").unwrap();
    let bang_re = Regex::new(r"^!\s*(?:LaTeX Error:\s*)?(.+)$").unwrap();
    let latex_warning_re = Regex::new(r"^LaTeX Warning:\s*(.+)$").unwrap();
    let package_warning_re = Regex::new(r"^Package \w+ Warning:\s*(.+)$").unwrap();
    let box_re = Regex::new(r"^((?:Overfull|Underfull) \\[hv]box .+)$").unwrap();

    let mut result = BuildResult::default();

    for line in content.lines() {
        if let Some(captures) = output_re.captures(line) {
            let artifact = Path::new(captures.get(1).map(|m| m.as_str()).unwrap_or_default());
            let resolved = if artifact.is_absolute() {
                artifact.to_path_buf()
            } else {
                log_dir.join(artifact)
            };
            result.output_file_path = Some(resolved);
            continue;
        }

        if no_output_re.is_match(line) {
            result.output_file_path = None;
            continue;
        }

        if let Some(captures) = file_line_re.captures(line) {
            let file = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let line_no = captures
                .get(2)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(0);
            let message = captures.get(3).map(|m| m.as_str()).unwrap_or_default();
            result
                .errors
                .push(Diagnostic::error(message).at(file, line_no));
            continue;
        }

        if let Some(captures) = bang_re.captures(line) {
            let message = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            // "! Emergency stop." style lines carry no location
            result.errors.push(Diagnostic::error(message));
            continue;
        }

        if let Some(captures) = latex_warning_re.captures(line) {
            result
                .warnings
                .push(Diagnostic::warning(captures.get(1).map(|m| m.as_str()).unwrap_or_default()));
            continue;
        }

        if let Some(captures) = package_warning_re.captures(line) {
            result
                .warnings
                .push(Diagnostic::warning(captures.get(1).map(|m| m.as_str()).unwrap_or_default()));
            continue;
        }

        if let Some(captures) = box_re.captures(line) {
            result
                .warnings
                .push(Diagnostic::warning(captures.get(1).map(|m| m.as_str()).unwrap_or_default()));
        }
    }

    result
}
