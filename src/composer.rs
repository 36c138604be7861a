//! Build/clean orchestration
//!
//! The composer owns the decision sequence between "user requested a
//! build" and a validated, reported outcome: editor query, root
//! resolution, save-if-modified, builder selection, run, log
//! validation, relocation, report. Each stage strictly depends on the
//! previous one's result; nothing here is cached across invocations.

use std::io;
use thiserror::Error;

use crate::builder::{BuilderError, BuilderRegistry};
use crate::cleaner::{self, CleanResolution};
use crate::config::Config;
use crate::editor::EditorGateway;
use crate::relocate;
use crate::reporter::ResultReporter;
use crate::resolver;
use crate::result::{CompletedBuild, Diagnostic};

/// Orchestration failures
///
/// `Skipped` is the silent no-op: no buildable document was in front
/// of the user, nothing is reported. Every other variant is reported
/// through the `ResultReporter` exactly once per `build()` call.
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("nothing to build")]
    Skipped,

    #[error("no builder named {0:?} is registered for this file type")]
    NoBuilder(String),

    #[error(transparent)]
    Build(#[from] BuilderError),

    #[error("no parseable build log was produced")]
    MissingLog,

    #[error("build produced no output artifact ({} log errors)", errors.len())]
    MissingArtifact {
        errors: Vec<Diagnostic>,
        warnings: Vec<Diagnostic>,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ComposerError {
    /// Whether this failure is a silent no-op (never reported)
    pub fn is_silent(&self) -> bool {
        matches!(self, ComposerError::Skipped)
    }

    /// Log diagnostics attached to this failure, if any
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ComposerError::MissingArtifact { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            ComposerError::Skipped => 2,
            ComposerError::NoBuilder(_) => 10,
            ComposerError::Build(_) => 40,
            ComposerError::MissingLog => 41,
            ComposerError::MissingArtifact { .. } => 42,
            ComposerError::Io(_) => 1,
        }
    }
}

/// The orchestrator
pub struct Composer {
    config: Config,
    gateway: Box<dyn EditorGateway>,
    registry: BuilderRegistry,
    reporter: Box<dyn ResultReporter>,
    verbose: bool,
}

impl Composer {
    pub fn new(
        config: Config,
        gateway: Box<dyn EditorGateway>,
        registry: BuilderRegistry,
        reporter: Box<dyn ResultReporter>,
    ) -> Self {
        Self {
            config,
            gateway,
            registry,
            reporter,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the document in front of the user
    ///
    /// Exactly one of `show_result`/`show_error` fires on any path
    /// that got past editor query and root resolution; neither fires
    /// for the silent no-op exits.
    pub fn build(&self) -> Result<CompletedBuild, ComposerError> {
        match self.run_build() {
            Ok(build) => {
                self.reporter.show_result(&build);
                Ok(build)
            }
            Err(e) => {
                if !e.is_silent() {
                    self.reporter.show_error(&e);
                }
                Err(e)
            }
        }
    }

    fn run_build(&self) -> Result<CompletedBuild, ComposerError> {
        let details = self
            .gateway
            .editor_details()
            .ok_or(ComposerError::Skipped)?;
        let file_path = details.file_path.clone().ok_or(ComposerError::Skipped)?;

        let root_path =
            resolver::resolve_root_file_path(&file_path).ok_or(ComposerError::Skipped)?;

        // Save strictly before the builder is invoked
        if details.editor.is_modified() {
            details.editor.save()?;
        }

        let builder = self
            .registry
            .get_builder(&root_path, &self.config.builder)
            .ok_or_else(|| ComposerError::NoBuilder(self.config.builder.clone()))?;

        if self.verbose {
            eprintln!("Running {} on {}...", builder.name(), root_path.display());
        }
        builder.run(&root_path)?;

        if self.verbose {
            eprintln!("Parsing build log...");
        }
        let result = builder
            .parse_log_file(&root_path)
            .ok_or(ComposerError::MissingLog)?;

        let completed = result
            .into_completed()
            .map_err(|rejected| ComposerError::MissingArtifact {
                errors: rejected.errors,
                warnings: rejected.warnings,
            })?;

        let completed = if self.should_move_result() {
            if self.verbose {
                eprintln!("Moving artifact to the source directory...");
            }
            relocate::move_result(completed, &root_path)?
        } else {
            completed
        };

        Ok(completed)
    }

    /// Delete the generated files associated with the current document
    ///
    /// Resolves with one record per candidate, in candidate order.
    /// The reporter is never involved in cleaning.
    pub fn clean(&self) -> Result<Vec<CleanResolution>, ComposerError> {
        let details = self
            .gateway
            .editor_details()
            .ok_or(ComposerError::Skipped)?;
        let file_path = details.file_path.ok_or(ComposerError::Skipped)?;

        // Unsupported file types stop before root resolution runs
        if !resolver::is_tex_file(&file_path) {
            return Err(ComposerError::Skipped);
        }

        let root_path =
            resolver::resolve_root_file_path(&file_path).ok_or(ComposerError::Skipped)?;

        if self.verbose {
            eprintln!("Cleaning artifacts of {}...", root_path.display());
        }
        Ok(cleaner::clean(&root_path, &self.config.clean_extensions)?)
    }

    /// Whether a successful build's artifact should be relocated
    pub fn should_move_result(&self) -> bool {
        relocate::should_move_result(&self.config)
    }

    /// Resolve the root document without building, for inspection
    pub fn resolve_root(&self) -> Result<std::path::PathBuf, ComposerError> {
        let details = self
            .gateway
            .editor_details()
            .ok_or(ComposerError::Skipped)?;
        let file_path = details.file_path.ok_or(ComposerError::Skipped)?;
        resolver::resolve_root_file_path(&file_path).ok_or(ComposerError::Skipped)
    }
}
