//! Build flow integration tests
//!
//! Each test exercises a complete build decision sequence through the
//! composer using the scripted mocks plus a real temp directory, so
//! root resolution and relocation run against the filesystem.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tex_compose::mock::{CallLog, MockBuilder, MockEditor, MockGateway, RecordingReporter};
use tex_compose::{BuildResult, BuilderRegistry, Composer, ComposerError, Config};

// =============================================================================
// Test helpers
// =============================================================================

struct Scenario {
    dir: tempfile::TempDir,
    file: PathBuf,
    log: CallLog,
    reporter: RecordingReporter,
}

impl Scenario {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("thesis.tex");
        fs::write(
            &file,
            "\\documentclass{report}\n\\begin{document}\nBody\n\\end{document}\n",
        )
        .unwrap();
        Self {
            dir,
            file,
            log: CallLog::default(),
            reporter: RecordingReporter::new(),
        }
    }

    fn composer_with(&self, config: Config, gateway: MockGateway, builder: MockBuilder) -> Composer {
        let mut registry = BuilderRegistry::new();
        registry.register(Arc::new(builder));
        Composer::new(
            config,
            Box::new(gateway),
            registry,
            Box::new(self.reporter.clone()),
        )
    }

    fn parsed_pdf(&self, path: &PathBuf) -> BuildResult {
        BuildResult {
            output_file_path: Some(path.clone()),
            errors: vec![],
            warnings: vec![],
        }
    }
}

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn test_full_build_cycle_reports_result_once() {
    let scenario = Scenario::new();
    let artifact = scenario.dir.path().join("thesis.pdf");
    fs::write(&artifact, b"%PDF-1.5").unwrap();

    let editor = MockEditor::new(scenario.log.clone());
    let gateway = MockGateway::file(editor, scenario.file.clone());
    let builder = MockBuilder::succeeding(scenario.log.clone(), scenario.parsed_pdf(&artifact));
    let composer = scenario.composer_with(Config::default(), gateway, builder);

    let build = composer.build().unwrap();
    assert_eq!(build.output_file_path, artifact);
    assert_eq!(scenario.reporter.result_count(), 1);
    assert_eq!(scenario.reporter.error_count(), 0);
    assert_eq!(*scenario.log.lock().unwrap(), vec!["run", "parse"]);
}

#[test]
fn test_modified_document_is_saved_before_the_run_begins() {
    let scenario = Scenario::new();
    let artifact = scenario.dir.path().join("thesis.pdf");
    fs::write(&artifact, b"%PDF-1.5").unwrap();

    let editor = MockEditor::new(scenario.log.clone());
    editor.set_modified(true);
    let gateway = MockGateway::file(editor.clone(), scenario.file.clone());
    let builder = MockBuilder::succeeding(scenario.log.clone(), scenario.parsed_pdf(&artifact));
    let composer = scenario.composer_with(Config::default(), gateway, builder);

    composer.build().unwrap();

    assert_eq!(editor.save_count(), 1);
    assert_eq!(*scenario.log.lock().unwrap(), vec!["save", "run", "parse"]);
}

#[test]
fn test_relocation_moves_artifact_and_reports_the_new_path() {
    let scenario = Scenario::new();
    let out_dir = scenario.dir.path().join("build");
    fs::create_dir(&out_dir).unwrap();
    let artifact = out_dir.join("thesis.pdf");
    fs::write(&artifact, b"%PDF-1.5").unwrap();

    let editor = MockEditor::new(scenario.log.clone());
    let gateway = MockGateway::file(editor, scenario.file.clone());
    let builder = MockBuilder::succeeding(scenario.log.clone(), scenario.parsed_pdf(&artifact));

    let config = Config {
        output_directory: "build".to_string(),
        move_result_to_source_directory: true,
        ..Config::default()
    };
    let composer = scenario.composer_with(config, gateway, builder);

    let build = composer.build().unwrap();
    let final_path = scenario.dir.path().join("thesis.pdf");
    assert_eq!(build.output_file_path, final_path);
    assert!(final_path.is_file());
    assert!(!artifact.exists());
    assert_eq!(
        scenario.reporter.last_result().unwrap().output_file_path,
        final_path
    );
}

#[test]
fn test_redirected_output_stays_put_without_the_move_option() {
    let scenario = Scenario::new();
    let out_dir = scenario.dir.path().join("build");
    fs::create_dir(&out_dir).unwrap();
    let artifact = out_dir.join("thesis.pdf");
    fs::write(&artifact, b"%PDF-1.5").unwrap();

    let editor = MockEditor::new(scenario.log.clone());
    let gateway = MockGateway::file(editor, scenario.file.clone());
    let builder = MockBuilder::succeeding(scenario.log.clone(), scenario.parsed_pdf(&artifact));

    let config = Config {
        output_directory: "build".to_string(),
        move_result_to_source_directory: false,
        ..Config::default()
    };
    let composer = scenario.composer_with(config, gateway, builder);

    let build = composer.build().unwrap();
    assert_eq!(build.output_file_path, artifact);
    assert!(artifact.is_file());
}

// =============================================================================
// No-op exits
// =============================================================================

#[test]
fn test_no_active_editor_is_a_silent_no_op() {
    let scenario = Scenario::new();
    let builder = MockBuilder::succeeding(scenario.log.clone(), BuildResult::default());
    let composer = scenario.composer_with(Config::default(), MockGateway::no_editor(), builder);

    let err = composer.build().unwrap_err();
    assert!(err.is_silent());
    assert_eq!(scenario.reporter.result_count(), 0);
    assert_eq!(scenario.reporter.error_count(), 0);
    assert!(scenario.log.lock().unwrap().is_empty());
}

#[test]
fn test_unsaved_document_is_a_silent_no_op() {
    let scenario = Scenario::new();
    let editor = MockEditor::new(scenario.log.clone());
    let builder = MockBuilder::succeeding(scenario.log.clone(), BuildResult::default());
    let composer = scenario.composer_with(Config::default(), MockGateway::unsaved(editor), builder);

    let err = composer.build().unwrap_err();
    assert!(matches!(err, ComposerError::Skipped));
    assert_eq!(scenario.reporter.result_count(), 0);
    assert_eq!(scenario.reporter.error_count(), 0);
}

#[test]
fn test_unsupported_extension_is_a_silent_no_op() {
    let scenario = Scenario::new();
    let odd = scenario.dir.path().join("notes.org");
    fs::write(&odd, "* heading\n").unwrap();

    let editor = MockEditor::new(scenario.log.clone());
    let gateway = MockGateway::file(editor, odd);
    let builder = MockBuilder::succeeding(scenario.log.clone(), BuildResult::default());
    let composer = scenario.composer_with(Config::default(), gateway, builder);

    let err = composer.build().unwrap_err();
    assert!(err.is_silent());
    assert_eq!(scenario.reporter.error_count(), 0);
    assert!(scenario.log.lock().unwrap().is_empty());
}

// =============================================================================
// Reported failures
// =============================================================================

#[test]
fn test_toolchain_exit_failure_is_reported() {
    let scenario = Scenario::new();
    let editor = MockEditor::new(scenario.log.clone());
    let gateway = MockGateway::file(editor, scenario.file.clone());
    let builder = MockBuilder::with_exit(scenario.log.clone(), 12);
    let composer = scenario.composer_with(Config::default(), gateway, builder);

    let err = composer.build().unwrap_err();
    assert!(matches!(err, ComposerError::Build(_)));
    assert_eq!(scenario.reporter.error_count(), 1);
    assert_eq!(scenario.reporter.result_count(), 0);
    assert!(scenario.reporter.last_error().unwrap().contains("12"));
}

#[test]
fn test_missing_log_is_reported() {
    let scenario = Scenario::new();
    let editor = MockEditor::new(scenario.log.clone());
    let gateway = MockGateway::file(editor, scenario.file.clone());
    let builder = MockBuilder::without_log(scenario.log.clone());
    let composer = scenario.composer_with(Config::default(), gateway, builder);

    let err = composer.build().unwrap_err();
    assert!(matches!(err, ComposerError::MissingLog));
    assert_eq!(scenario.reporter.error_count(), 1);
}

#[test]
fn test_artifactless_result_is_reported_even_with_clean_log() {
    let scenario = Scenario::new();
    let editor = MockEditor::new(scenario.log.clone());
    let gateway = MockGateway::file(editor, scenario.file.clone());
    // Parser found a log, the log lists zero errors, yet no artifact.
    let builder = MockBuilder::succeeding(scenario.log.clone(), BuildResult::default());
    let composer = scenario.composer_with(Config::default(), gateway, builder);

    let err = composer.build().unwrap_err();
    assert!(matches!(err, ComposerError::MissingArtifact { .. }));
    assert_eq!(scenario.reporter.error_count(), 1);
    assert_eq!(scenario.reporter.result_count(), 0);
}

#[test]
fn test_save_failure_is_reported_not_silent() {
    let scenario = Scenario::new();
    let editor = MockEditor::new(scenario.log.clone());
    editor.set_modified(true);
    editor.set_fail_save(true);
    let gateway = MockGateway::file(editor, scenario.file.clone());
    let builder = MockBuilder::succeeding(scenario.log.clone(), BuildResult::default());
    let composer = scenario.composer_with(Config::default(), gateway, builder);

    let err = composer.build().unwrap_err();
    assert!(matches!(err, ComposerError::Io(_)));
    assert!(!err.is_silent());
    assert_eq!(scenario.reporter.error_count(), 1);
    // The builder never ran
    assert_eq!(*scenario.log.lock().unwrap(), vec!["save"]);
}

#[test]
fn test_exit_codes_distinguish_failure_classes() {
    assert_eq!(ComposerError::Skipped.exit_code(), 2);
    assert_eq!(ComposerError::MissingLog.exit_code(), 41);
    assert_eq!(
        ComposerError::MissingArtifact {
            errors: vec![],
            warnings: vec![],
        }
        .exit_code(),
        42
    );
}
