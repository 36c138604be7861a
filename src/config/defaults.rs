//! Built-in lane defaults (layer 1)
//!
//! Hardcoded defaults for all configuration values.

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Builder to drive (default: "latexmk")
    pub builder: String,

    /// TeX engine (default: "pdflatex")
    pub engine: String,

    /// Output directory relative to the root file (default: "" = source dir)
    pub output_directory: String,

    /// Move the artifact back to the source directory (default: true)
    pub move_result_to_source_directory: bool,

    /// Extensions considered generated, in clean order
    pub clean_extensions: Vec<String>,

    /// Pass -shell-escape to the engine (default: false)
    pub enable_shell_escape: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            builder: "latexmk".to_string(),
            engine: "pdflatex".to_string(),
            output_directory: String::new(),
            move_result_to_source_directory: true,
            clean_extensions: [
                ".aux",
                ".bbl",
                ".blg",
                ".fdb_latexmk",
                ".fls",
                ".idx",
                ".ilg",
                ".ind",
                ".lof",
                ".log",
                ".lol",
                ".lot",
                ".out",
                ".synctex.gz",
                ".toc",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            enable_shell_escape: false,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to a TOML value for merging
    pub fn to_value(&self) -> toml::Value {
        toml::Value::try_from(self).expect("defaults serialize to TOML")
    }
}
