//! Builder contract and registry
//!
//! A `Builder` wraps one external TeX toolchain: it runs the tool
//! against a root file and interprets the log the tool leaves behind.
//! The registry is an explicit value constructed at startup; selection
//! combines the root file's type with the configured builder name.

mod latexmk;
pub mod log;
mod pdflatex;

pub use latexmk::LatexmkBuilder;
pub use pdflatex::PdflatexBuilder;

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::resolver;
use crate::result::BuildResult;

/// Errors from invoking an external toolchain
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with status {code}")]
    Exited { tool: String, code: i32 },

    #[error("{tool} terminated by signal")]
    Terminated { tool: String },
}

/// A pluggable adapter around one external compilation toolchain
pub trait Builder {
    /// Name the registry and configuration select this builder by
    fn name(&self) -> &str;

    /// Argument vector for the toolchain invocation, exposed for
    /// inspection without executing anything
    fn construct_args(&self, root_path: &Path) -> Vec<String>;

    /// Invoke the toolchain against the root file
    ///
    /// `Ok(())` corresponds to a zero exit status; any other
    /// completion surfaces as a `BuilderError`.
    fn run(&self, root_path: &Path) -> Result<(), BuilderError>;

    /// Interpret the toolchain's log output
    ///
    /// `None` means no parseable log exists at all, which callers
    /// treat as a failed build.
    fn parse_log_file(&self, root_path: &Path) -> Option<BuildResult>;
}

/// Explicit registry of available builders
///
/// Held by the composer instead of any process-wide lookup; tests
/// register mocks through the same surface.
#[derive(Default)]
pub struct BuilderRegistry {
    builders: Vec<Arc<dyn Builder>>,
}

impl BuilderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the standard builder set
    pub fn standard(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(LatexmkBuilder::new(config.clone())));
        registry.register(Arc::new(PdflatexBuilder::new(config.clone())));
        registry
    }

    /// Register a builder under its own name
    pub fn register(&mut self, builder: Arc<dyn Builder>) {
        self.builders.push(builder);
    }

    /// Select a builder for the root file
    ///
    /// `None` when the file type is unsupported or no registered
    /// builder carries the requested name.
    pub fn get_builder(&self, root_path: &Path, name: &str) -> Option<Arc<dyn Builder>> {
        if !resolver::is_tex_file(root_path) {
            return None;
        }
        self.builders.iter().find(|b| b.name() == name).cloned()
    }
}

/// Run an external tool, mapping its completion onto `BuilderError`
pub(crate) fn run_tool(tool: &str, args: &[String]) -> Result<(), BuilderError> {
    let status = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| BuilderError::Launch {
            tool: tool.to_string(),
            source,
        })?;

    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(BuilderError::Exited {
            tool: tool.to_string(),
            code,
        }),
        None => Err(BuilderError::Terminated {
            tool: tool.to_string(),
        }),
    }
}

/// Directory the toolchain writes into for this root file
pub(crate) fn effective_output_dir(root_path: &Path, config: &Config) -> PathBuf {
    let source_dir = root_path.parent().unwrap_or_else(|| Path::new("."));
    if config.output_directory.is_empty() {
        source_dir.to_path_buf()
    } else {
        source_dir.join(&config.output_directory)
    }
}

/// Path of the log file the toolchain leaves for this root file
pub(crate) fn log_file_path(root_path: &Path, config: &Config) -> PathBuf {
    let stem = root_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    effective_output_dir(root_path, config).join(format!("{stem}.log"))
}
