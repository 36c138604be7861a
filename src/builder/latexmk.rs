//! latexmk builder
//!
//! Drives `latexmk`, which handles the rerun-until-stable dance and
//! bibliography/index passes itself.

use std::path::Path;

use super::{log, log_file_path, run_tool, Builder, BuilderError};
use crate::config::Config;
use crate::result::BuildResult;

pub struct LatexmkBuilder {
    config: Config,
}

impl LatexmkBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn tool(&self) -> &str {
        "latexmk"
    }
}

impl Builder for LatexmkBuilder {
    fn name(&self) -> &str {
        "latexmk"
    }

    fn construct_args(&self, root_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-interaction=nonstopmode".to_string(),
            "-f".to_string(),
            "-cd".to_string(),
            "-file-line-error".to_string(),
            "-synctex=1".to_string(),
            self.config.engine.latexmk_flag().to_string(),
        ];

        if self.config.enable_shell_escape {
            args.push("-shell-escape".to_string());
        }

        if let Some(engine_path) = &self.config.engine_path {
            args.push(format!("-pdflatex={engine_path}"));
        }

        if !self.config.output_directory.is_empty() {
            args.push(format!("-outdir={}", self.config.output_directory));
        }

        args.push(root_path.to_string_lossy().into_owned());
        args
    }

    fn run(&self, root_path: &Path) -> Result<(), BuilderError> {
        run_tool(self.tool(), &self.construct_args(root_path))
    }

    fn parse_log_file(&self, root_path: &Path) -> Option<BuildResult> {
        log::parse_log_file(&log_file_path(root_path, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Engine;

    #[test]
    fn test_default_args() {
        let builder = LatexmkBuilder::new(Config::default());
        let args = builder.construct_args(Path::new("/a/foo.tex"));

        assert_eq!(
            args,
            vec![
                "-interaction=nonstopmode",
                "-f",
                "-cd",
                "-file-line-error",
                "-synctex=1",
                "-pdf",
                "/a/foo.tex",
            ]
        );
    }

    #[test]
    fn test_engine_flags() {
        for (engine, flag) in [
            (Engine::Lualatex, "-lualatex"),
            (Engine::Xelatex, "-xelatex"),
            (Engine::Ps, "-ps"),
            (Engine::Dvi, "-dvi"),
        ] {
            let config = Config {
                engine,
                ..Config::default()
            };
            let args = LatexmkBuilder::new(config).construct_args(Path::new("foo.tex"));
            assert!(args.contains(&flag.to_string()), "missing {flag}");
        }
    }

    #[test]
    fn test_output_directory_and_shell_escape() {
        let config = Config {
            output_directory: "out".to_string(),
            enable_shell_escape: true,
            ..Config::default()
        };
        let args = LatexmkBuilder::new(config).construct_args(Path::new("foo.tex"));

        assert!(args.contains(&"-outdir=out".to_string()));
        assert!(args.contains(&"-shell-escape".to_string()));
    }

    #[test]
    fn test_engine_path_override() {
        let config = Config {
            engine_path: Some("/opt/tex/bin/pdflatex".to_string()),
            ..Config::default()
        };
        let args = LatexmkBuilder::new(config).construct_args(Path::new("foo.tex"));
        assert!(args.contains(&"-pdflatex=/opt/tex/bin/pdflatex".to_string()));
    }
}
