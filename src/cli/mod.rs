//! Command-line interface module

use clap::Parser;
use std::path::PathBuf;

use crate::conversion::{Normalizer, NormalizerOptions};
use crate::error::{ConversionError, ConversionResult, NormalizeError};
use crate::mapping::{MappingConfig, MappingRegistry};

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "normconv")]
#[command(about = "Normalize JSON payloads with typed instances into plain JSON")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
pub struct Args {
    /// Input JSON payload (string, file, or directory)
    #[arg()]
    pub input: Option<String>,

    /// Mapping file with the `classes` table (.toml or .json)
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read the payload from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Maximum nesting depth (default: 512)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only check that payloads normalize, don't write output
    #[arg(long)]
    pub validate_only: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub normalizer: Normalizer,
}

impl CliConfig {
    /// Create CLI configuration from arguments, loading the mapping file if one is given
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let registry = match &args.mapping {
            Some(path) => MappingConfig::load(path)?.into_registry(),
            None => MappingRegistry::default(),
        };

        let mut options = NormalizerOptions::default();
        if let Some(depth) = args.max_depth {
            options = options.with_max_depth(Some(depth));
        }

        let normalizer = Normalizer::with_options(registry, options)?;
        tracing::debug!(
            entries = normalizer.registry().len(),
            max_depth = ?normalizer.options().max_depth,
            "normalizer ready"
        );

        Ok(Self { args, normalizer })
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Serialize a normalized tree the way the user asked for
    pub fn render(&self, value: &serde_json::Value) -> ConversionResult<String> {
        let rendered = if self.args.compact {
            serde_json::to_string(value)
        } else {
            serde_json::to_string_pretty(value)
        };

        rendered.map_err(|e| ConversionError::other(e.into()))
    }
}

/// Show a success message (if not in quiet mode)
pub fn show_success(message: &str, quiet: bool) {
    if !quiet {
        println!("✓ {}", message);
    }
}

/// Show an error message
pub fn show_error(message: &str) {
    eprintln!("✗ {}", message);
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    show_error(&error.user_message());

    if let ConversionError::Normalize(NormalizeError::DepthExceeded { .. }) = error {
        eprintln!("\nTip: Use --max-depth to raise the nesting limit");
    }

    eprintln!("\nTry 'normconv --help' for usage information.");
}
