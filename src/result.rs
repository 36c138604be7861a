//! Build result types
//!
//! A builder's log parser yields a loosely-structured `BuildResult`
//! whose artifact path may be absent. Validation narrows it into a
//! `CompletedBuild` with a guaranteed artifact path; the reporter only
//! ever sees the narrowed form. The presence of a usable artifact is
//! the authoritative success signal, not an empty error list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Schema version for build_record.json
pub const RECORD_SCHEMA_VERSION: u32 = 1;

/// Schema identifier for build_record.json
pub const RECORD_SCHEMA_ID: &str = "tex-compose/build_record@1";

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic recovered from a toolchain log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the diagnostic
    pub severity: Severity,

    /// Message text as it appeared in the log
    pub message: String,

    /// Source file the toolchain attributed the diagnostic to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Line number within `file_path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Diagnostic {
    /// Create an error diagnostic with no source location
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            file_path: None,
            line: None,
        }
    }

    /// Create a warning diagnostic with no source location
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            file_path: None,
            line: None,
        }
    }

    /// Attach a source location
    pub fn at(mut self, file_path: impl Into<PathBuf>, line: u32) -> Self {
        self.file_path = Some(file_path.into());
        self.line = Some(line);
        self
    }
}

/// Raw log-parse result produced by a builder's log parser
///
/// `output_file_path` may be absent even when `errors` is empty; such
/// a result is a failed build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    /// Path of the produced artifact, if the toolchain produced one
    pub output_file_path: Option<PathBuf>,

    /// Error diagnostics, in log order
    pub errors: Vec<Diagnostic>,

    /// Warning diagnostics, in log order
    pub warnings: Vec<Diagnostic>,
}

impl BuildResult {
    /// Narrow into a `CompletedBuild`
    ///
    /// Returns the result back unchanged when no artifact path is
    /// present, so the caller can report the log diagnostics.
    pub fn into_completed(self) -> Result<CompletedBuild, BuildResult> {
        match self.output_file_path {
            Some(output_file_path) => Ok(CompletedBuild {
                output_file_path,
                errors: self.errors,
                warnings: self.warnings,
            }),
            None => Err(self),
        }
    }
}

/// A validated, successful build with a known artifact path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedBuild {
    /// Path of the produced artifact
    pub output_file_path: PathBuf,

    /// Error diagnostics, in log order (a successful run may still log errors)
    pub errors: Vec<Diagnostic>,

    /// Warning diagnostics, in log order
    pub warnings: Vec<Diagnostic>,
}

impl CompletedBuild {
    /// Replace the artifact path after a relocation
    pub fn relocated_to(mut self, output_file_path: PathBuf) -> Self {
        self.output_file_path = output_file_path;
        self
    }
}

/// Build record (build_record.json)
///
/// Written next to the artifact on request after a successful build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// Build identifier (ULID)
    pub build_id: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// Resolved root file the build ran against
    pub root_file: PathBuf,

    /// Final artifact path (post-relocation)
    pub output_file: PathBuf,

    /// SHA-256 digest of the artifact bytes
    pub output_sha256: String,

    /// Number of error diagnostics in the log
    pub error_count: usize,

    /// Number of warning diagnostics in the log
    pub warning_count: usize,
}

impl BuildRecord {
    /// Build a record from a completed build, digesting the artifact
    pub fn from_build(root_file: &Path, build: &CompletedBuild) -> io::Result<Self> {
        let bytes = fs::read(&build.output_file_path)?;
        let output_sha256 = hex::encode(Sha256::digest(&bytes));

        Ok(Self {
            schema_version: RECORD_SCHEMA_VERSION,
            schema_id: RECORD_SCHEMA_ID.to_string(),
            build_id: ulid::Ulid::new().to_string(),
            created_at: Utc::now(),
            root_file: root_file.to_path_buf(),
            output_file: build.output_file_path.clone(),
            output_sha256,
            error_count: build.errors.len(),
            warning_count: build.warnings.len(),
        })
    }

    /// Write the record as pretty JSON
    pub fn write(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}
