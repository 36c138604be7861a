//! Mock builder

use std::path::Path;

use super::CallLog;
use crate::builder::{Builder, BuilderError};
use crate::result::BuildResult;

/// Scripted outcome for `MockBuilder::run`
enum RunScript {
    Succeed,
    Exit(i32),
}

/// Scripted builder
///
/// Registers under "latexmk" by default so a default `Config` selects
/// it; use [`MockBuilder::named`] to register under another name.
pub struct MockBuilder {
    name: String,
    run: RunScript,
    parse_result: Option<BuildResult>,
    log: CallLog,
}

impl MockBuilder {
    /// A builder whose run succeeds and whose log parses to `result`
    pub fn succeeding(log: CallLog, result: BuildResult) -> Self {
        Self {
            name: "latexmk".to_string(),
            run: RunScript::Succeed,
            parse_result: Some(result),
            log,
        }
    }

    /// A builder whose run exits with `code`
    pub fn with_exit(log: CallLog, code: i32) -> Self {
        Self {
            name: "latexmk".to_string(),
            run: RunScript::Exit(code),
            parse_result: None,
            log,
        }
    }

    /// A builder whose run succeeds but leaves no parseable log
    pub fn without_log(log: CallLog) -> Self {
        Self {
            name: "latexmk".to_string(),
            run: RunScript::Succeed,
            parse_result: None,
            log,
        }
    }

    /// Change the name the registry selects this builder by
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

impl Builder for MockBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    fn construct_args(&self, root_path: &Path) -> Vec<String> {
        vec![root_path.to_string_lossy().into_owned()]
    }

    fn run(&self, _root_path: &Path) -> Result<(), BuilderError> {
        self.log.lock().unwrap().push("run".to_string());
        match self.run {
            RunScript::Succeed => Ok(()),
            RunScript::Exit(code) => Err(BuilderError::Exited {
                tool: self.name.clone(),
                code,
            }),
        }
    }

    fn parse_log_file(&self, _root_path: &Path) -> Option<BuildResult> {
        self.log.lock().unwrap().push("parse".to_string());
        self.parse_result.clone()
    }
}
