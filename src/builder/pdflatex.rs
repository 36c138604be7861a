//! Direct engine builder
//!
//! Invokes the configured TeX engine once, without latexmk's rerun
//! handling. Useful where latexmk is unavailable or a single pass is
//! known to be enough.

use std::path::Path;

use super::{effective_output_dir, log, log_file_path, run_tool, Builder, BuilderError};
use crate::config::Config;
use crate::result::BuildResult;

pub struct PdflatexBuilder {
    config: Config,
}

impl PdflatexBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn tool(&self) -> String {
        self.config
            .engine_path
            .clone()
            .unwrap_or_else(|| self.config.engine.command().to_string())
    }
}

impl Builder for PdflatexBuilder {
    fn name(&self) -> &str {
        "pdflatex"
    }

    fn construct_args(&self, root_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-interaction=nonstopmode".to_string(),
            "-file-line-error".to_string(),
            "-synctex=1".to_string(),
        ];

        if self.config.enable_shell_escape {
            args.push("-shell-escape".to_string());
        }

        if !self.config.output_directory.is_empty() {
            let out_dir = effective_output_dir(root_path, &self.config);
            args.push(format!("-output-directory={}", out_dir.to_string_lossy()));
        }

        args.push(root_path.to_string_lossy().into_owned());
        args
    }

    fn run(&self, root_path: &Path) -> Result<(), BuilderError> {
        run_tool(&self.tool(), &self.construct_args(root_path))
    }

    fn parse_log_file(&self, root_path: &Path) -> Option<BuildResult> {
        log::parse_log_file(&log_file_path(root_path, &self.config))
    }
}
