//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Canopy command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "canopy", about = "Decorated feature and structure template placement")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of placements to attempt.
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Template directory containing the manifest.
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// JSON decoration rule file.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(attempts) = args.attempts {
            self.generation.attempts = attempts;
        }
        if let Some(ref dir) = args.templates {
            self.templates.directory = Some(dir.clone());
        }
        if let Some(ref path) = args.rules {
            self.rules.path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
