//! Configuration merge system
//!
//! Implements the 4-layer configuration merge:
//! 1. Built-in lane defaults
//! 2. User config (~/.config/tex-compose/config.toml)
//! 3. Repo config (.texcompose.toml)
//! 4. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{
    Config, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, Engine, REPO_CONFIG_FILE,
};
pub use merge::{deep_merge, merge_layers};
