//! Artifact relocation
//!
//! "Move to source directory" only means something when output was
//! redirected away from the source directory in the first place; with
//! no redirect there is nothing to move back.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::Config;
use crate::result::CompletedBuild;

/// Whether a successful build's artifact should be moved
///
/// True only when an output directory is configured AND the
/// move-to-source-directory option is enabled.
pub fn should_move_result(config: &Config) -> bool {
    !config.output_directory.is_empty() && config.move_result_to_source_directory
}

/// Move the artifact into the root file's directory
///
/// Returns the build with its artifact path updated. Rename first;
/// cross-device moves fall back to copy + remove. An existing file at
/// the destination is overwritten.
pub fn move_result(build: CompletedBuild, root_path: &Path) -> io::Result<CompletedBuild> {
    let dest_dir = root_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = build.output_file_path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "artifact path has no file name")
    })?;
    let dest = dest_dir.join(file_name);

    if dest == build.output_file_path {
        return Ok(build);
    }

    if fs::rename(&build.output_file_path, &dest).is_err() {
        fs::copy(&build.output_file_path, &dest)?;
        fs::remove_file(&build.output_file_path)?;
    }

    Ok(build.relocated_to(dest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(output_directory: &str, move_result: bool) -> Config {
        Config {
            output_directory: output_directory.to_string(),
            move_result_to_source_directory: move_result,
            ..Config::default()
        }
    }

    #[test]
    fn test_policy_truth_table() {
        assert!(!should_move_result(&config("", false)));
        assert!(!should_move_result(&config("", true)));
        assert!(!should_move_result(&config("baz", false)));
        assert!(should_move_result(&config("baz", true)));
    }

    #[test]
    fn test_move_updates_path_and_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        fs::create_dir(&out_dir).unwrap();

        let root = dir.path().join("file.tex");
        fs::write(&root, "\\documentclass{article}").unwrap();
        let artifact = out_dir.join("file.pdf");
        fs::write(&artifact, b"%PDF-1.5").unwrap();

        let build = CompletedBuild {
            output_file_path: artifact.clone(),
            errors: vec![],
            warnings: vec![],
        };

        let moved = move_result(build, &root).unwrap();
        assert_eq!(moved.output_file_path, dir.path().join("file.pdf"));
        assert!(moved.output_file_path.is_file());
        assert!(!artifact.exists());
    }

    #[test]
    fn test_move_to_same_location_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("file.tex");
        let artifact = dir.path().join("file.pdf");
        fs::write(&artifact, b"%PDF-1.5").unwrap();

        let build = CompletedBuild {
            output_file_path: artifact.clone(),
            errors: vec![],
            warnings: vec![],
        };

        let moved = move_result(build, &root).unwrap();
        assert_eq!(moved.output_file_path, artifact);
        assert!(artifact.is_file());
    }

    #[test]
    fn test_missing_artifact_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let build = CompletedBuild {
            output_file_path: dir.path().join("out").join("ghost.pdf"),
            errors: vec![],
            warnings: vec![],
        };

        assert!(move_result(build, &PathBuf::from(dir.path().join("file.tex"))).is_err());
    }
}
