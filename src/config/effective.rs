//! Effective configuration with provenance
//!
//! Captures the merged configuration plus information about where
//! each contributing layer came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// Schema version for effective_config
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "tex-compose/effective_config@1";

/// Default repo config file name
pub const REPO_CONFIG_FILE: &str = ".texcompose.toml";

/// Errors while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(toml::de::Error),
}

/// TeX engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Pdflatex,
    Lualatex,
    Xelatex,
    Ps,
    Dvi,
}

impl Engine {
    /// latexmk output-format flag for this engine
    pub fn latexmk_flag(&self) -> &'static str {
        match self {
            Engine::Pdflatex => "-pdf",
            Engine::Lualatex => "-lualatex",
            Engine::Xelatex => "-xelatex",
            Engine::Ps => "-ps",
            Engine::Dvi => "-dvi",
        }
    }

    /// Command name for direct engine invocation
    pub fn command(&self) -> &'static str {
        match self {
            Engine::Pdflatex => "pdflatex",
            Engine::Lualatex => "lualatex",
            Engine::Xelatex => "xelatex",
            // ps/dvi output needs a converter pass that latexmk normally
            // drives; direct invocation runs plain latex.
            Engine::Ps | Engine::Dvi => "latex",
        }
    }

    /// Extension of the artifact this engine produces
    pub fn output_extension(&self) -> &'static str {
        match self {
            Engine::Pdflatex | Engine::Lualatex | Engine::Xelatex => "pdf",
            Engine::Ps => "ps",
            Engine::Dvi => "dvi",
        }
    }
}

/// Typed configuration consumed by the composer and builders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Builder name, matched against the registry
    pub builder: String,

    /// TeX engine
    pub engine: Engine,

    /// Output directory relative to the root file ("" = source dir)
    pub output_directory: String,

    /// Move the artifact back to the source directory after the build
    pub move_result_to_source_directory: bool,

    /// Extensions considered generated, in clean order (leading dot included)
    pub clean_extensions: Vec<String>,

    /// Pass -shell-escape to the engine
    pub enable_shell_escape: bool,

    /// Override the engine executable path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            builder: defaults.builder,
            engine: Engine::Pdflatex,
            output_directory: defaults.output_directory,
            move_result_to_source_directory: defaults.move_result_to_source_directory,
            clean_extensions: defaults.clean_extensions,
            enable_shell_escape: defaults.enable_shell_escape,
            engine_path: None,
        }
    }
}

/// Origin of a configuration source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    User,
    Repo,
    Cli,
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this source
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Effective configuration with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// The merged, typed configuration
    pub config: Config,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build the effective config from layers
    ///
    /// Precedence: builtin < user < repo < CLI. Missing files are
    /// skipped, not errors.
    pub fn build(
        user_config_path: Option<&Path>,
        repo_config_path: Option<&Path>,
        cli_overrides: Option<toml::Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: built-in defaults
        layers.push(BuiltinDefaults::default().to_value());
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layers 2-3: user and repo config files
        for (origin, path) in [
            (ConfigOrigin::User, user_config_path),
            (ConfigOrigin::Repo, repo_config_path),
        ] {
            if let Some(path) = path {
                if path.exists() {
                    let (value, digest) = Self::load_toml_file(path)?;
                    layers.push(value);
                    sources.push(ConfigSource {
                        origin,
                        path: Some(path.to_string_lossy().to_string()),
                        digest: Some(digest),
                    });
                }
            }
        }

        // Layer 4: CLI overrides
        if let Some(overrides) = cli_overrides {
            layers.push(overrides);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let config: Config = merged.try_into().map_err(ConfigError::Invalid)?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            config,
            sources,
        })
    }

    /// Load a TOML file, returning its value and raw-byte digest
    fn load_toml_file(path: &Path) -> Result<(toml::Value, String), ConfigError> {
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        let digest = hex::encode(Sha256::digest(&bytes));

        let text = String::from_utf8_lossy(&bytes);
        let value = text
            .parse::<toml::Value>()
            .map_err(|source| ConfigError::Parse {
                path: path.to_string_lossy().to_string(),
                source,
            })?;

        Ok((value, digest))
    }

    /// Default user config path (~/.config/tex-compose/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("tex-compose").join("config.toml"));
        }
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("tex-compose")
                .join("config.toml")
        })
    }
}
