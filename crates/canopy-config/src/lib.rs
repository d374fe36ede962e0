//! Runtime configuration for Canopy.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Every section is `#[serde(default)]`, so partial or older
//! files still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, RulesConfig, TemplatesConfig};
pub use error::ConfigError;
