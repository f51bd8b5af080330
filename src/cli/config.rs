use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::config_model::{AccessibilityIdentifierConfig, GenerationMode};
use crate::export::test_code::TestDialect;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "a11y-autoid",
    version,
    about = "Deterministic accessibility identifier generation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Namespace prefixed onto generated identifiers
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Generation mode: automatic, manual or semantic
    #[arg(long, global = true)]
    pub mode: Option<String>,

    /// Turn automatic identifiers off globally
    #[arg(long, global = true)]
    pub disable_auto_ids: bool,

    /// Path to config file (default: a11y-autoid.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one identifier
    Generate {
        /// Stable key of the object (embedded verbatim)
        #[arg(long, conflicts_with = "content")]
        id: Option<String>,

        /// Object content, used when there is no stable key
        #[arg(long)]
        content: Option<String>,

        /// Element role, e.g. button or item
        #[arg(long, default_value = "element")]
        role: String,

        /// Logical grouping, e.g. list or a screen name
        #[arg(long, default_value = "")]
        context: String,

        /// Human-readable label to fold in after sanitization
        #[arg(long)]
        label: Option<String>,

        /// Screen context segment
        #[arg(long)]
        screen: Option<String>,
    },

    /// Print the sanitized form of a label
    Sanitize {
        /// Label text
        label: String,
    },

    /// Resolve identifiers for a YAML view tree
    Resolve {
        /// Path to the view tree YAML file
        #[arg(long)]
        tree: String,

        /// Screen context segment
        #[arg(long)]
        screen: Option<String>,

        /// Print the identifier audit after the listing
        #[arg(long)]
        audit: bool,

        /// Write generated UI-test code into this directory
        #[arg(long)]
        export_dir: Option<String>,

        /// UI-test dialect: xcuitest or playwright
        #[arg(long)]
        dialect: Option<String>,

        /// Copy generated UI-test code to the clipboard
        #[arg(long)]
        clipboard: bool,

        /// Append one JSON line per element to this file
        #[arg(long)]
        trace: Option<String>,

        /// Print the debug log of generated identifiers
        #[arg(long)]
        debug_log: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `a11y-autoid.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub identifiers: AccessibilityIdentifierConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub dialect: TestDialect,

    pub output_dir: Option<String>,

    #[serde(default)]
    pub audit: bool,
}

pub const DEFAULT_CONFIG_FILE: &str = "a11y-autoid.yaml";

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Apply global CLI flags on top of the file configuration.
pub fn build_identifier_config(
    file: &AppConfig,
    namespace: Option<&str>,
    mode: Option<GenerationMode>,
    disable_auto_ids: bool,
) -> AccessibilityIdentifierConfig {
    let mut config = file.identifiers.clone();
    if let Some(ns) = namespace {
        config.namespace = ns.to_string();
    }
    if let Some(mode) = mode {
        config.mode = mode;
    }
    if disable_auto_ids {
        config.enable_auto_ids = false;
    }
    config
}
