//! Editor gateway
//!
//! The composer never touches an editing surface directly; it asks an
//! `EditorGateway` for the active document and drives the returned
//! `DocumentHandle` for the single save side effect. The CLI supplies
//! a filesystem-backed implementation; tests supply scripted mocks.

use std::io;
use std::path::{Path, PathBuf};

/// Handle to the document a build or clean targets
pub trait DocumentHandle {
    /// Whether the document has unsaved modifications
    fn is_modified(&self) -> bool;

    /// Persist unsaved modifications
    fn save(&self) -> io::Result<()>;
}

/// The build/clean target at invocation time
///
/// `file_path` is absent for a document that has never been saved;
/// the composer treats that as a silent no-op. Details are recomputed
/// on every invocation, never cached.
pub struct EditorDetails {
    /// Handle to the active document
    pub editor: Box<dyn DocumentHandle>,

    /// Path of the active document on disk, when it has one
    pub file_path: Option<PathBuf>,
}

/// Access to the active document
///
/// Returns `None` when there is no suitable active document at all
/// (e.g., the focused surface is not a text editor).
pub trait EditorGateway {
    fn editor_details(&self) -> Option<EditorDetails>;
}

/// Document handle for a file already on disk
///
/// The CLI has no editing buffer; the target is never modified, so
/// `save` has nothing to do.
#[derive(Debug, Clone)]
pub struct FsDocument {
    path: PathBuf,
}

impl FsDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentHandle for FsDocument {
    fn is_modified(&self) -> bool {
        false
    }

    fn save(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Gateway over a file named on the command line
///
/// Yields no details when the file does not exist, which the composer
/// treats the same as having no active document.
#[derive(Debug, Clone)]
pub struct FsEditorGateway {
    file: PathBuf,
}

impl FsEditorGateway {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }
}

impl EditorGateway for FsEditorGateway {
    fn editor_details(&self) -> Option<EditorDetails> {
        if !self.file.is_file() {
            return None;
        }

        Some(EditorDetails {
            editor: Box::new(FsDocument::new(&self.file)),
            file_path: Some(self.file.clone()),
        })
    }
}
