//! tex-compose - LaTeX build/clean orchestration lane
//!
//! Sequences editor state, root resolution, builder selection, log
//! interpretation, artifact relocation and cleanup around pluggable
//! external TeX toolchains. The composer owns the decision sequences;
//! the toolchains themselves stay behind the `Builder` trait.

pub mod builder;
pub mod cleaner;
pub mod composer;
pub mod config;
pub mod editor;
pub mod mock;
pub mod relocate;
pub mod reporter;
pub mod resolver;
pub mod result;

pub use builder::{Builder, BuilderError, BuilderRegistry, LatexmkBuilder, PdflatexBuilder};
pub use cleaner::CleanResolution;
pub use composer::{Composer, ComposerError};
pub use config::{Config, ConfigError, EffectiveConfig, Engine};
pub use editor::{EditorDetails, EditorGateway, FsEditorGateway};
pub use reporter::{ConsoleReporter, OutputFormat, ResultReporter};
pub use result::{BuildRecord, BuildResult, CompletedBuild, Diagnostic, Severity};
