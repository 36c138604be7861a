//! Generated-file cleanup
//!
//! The candidate set is derived purely from the root file's stem and
//! the configured extension list; whether a candidate exists on disk
//! never changes the set or its order.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of one deletion attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanResolution {
    /// Candidate path the deletion was attempted on
    pub file_path: PathBuf,

    /// Whether a file was actually removed
    pub removed: bool,
}

/// Candidate artifact paths for `root_path`, in configured order
///
/// Strips the root's extension and appends each configured extension
/// (which includes its leading separator). Membership does not imply
/// existence.
pub fn candidate_paths(root_path: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let base = root_path.with_extension("");
    extensions
        .iter()
        .map(|ext| PathBuf::from(format!("{}{}", base.to_string_lossy(), ext)))
        .collect()
}

/// Remove the candidates that exist
///
/// A missing candidate is a per-candidate no-op, not an error; any
/// other filesystem failure aborts the clean. Resolutions come back
/// in candidate order.
pub fn clean(root_path: &Path, extensions: &[String]) -> io::Result<Vec<CleanResolution>> {
    candidate_paths(root_path, extensions)
        .into_iter()
        .map(|file_path| match fs::remove_file(&file_path) {
            Ok(()) => Ok(CleanResolution {
                file_path,
                removed: true,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CleanResolution {
                file_path,
                removed: false,
            }),
            Err(e) => Err(e),
        })
        .collect()
}
