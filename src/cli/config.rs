use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::codec::Format;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-builder",
    version,
    about = "Define forms, move them around as JSON or XML, and collect submissions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding saved forms and submissions
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// JSON-lines event log path
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: form-builder.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved form titles
    List,

    /// Import a definition file and save it as a new form
    Save {
        /// Definition file (.json or .xml)
        #[arg(long)]
        file: String,

        /// Encoding of the file: json or xml (default: from extension)
        #[arg(long)]
        format: Option<Format>,
    },

    /// Export a saved form as <title>.json or <title>.xml
    Export {
        /// Title of the saved form
        #[arg(long)]
        title: String,

        /// Output encoding: json or xml
        #[arg(long)]
        format: Option<Format>,

        /// Directory to write the file into
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Render a saved form and its recent submissions as HTML
    Render {
        /// Title of the saved form
        #[arg(long)]
        title: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Fill in a saved form and store the submission
    Submit {
        /// Title of the saved form
        #[arg(long)]
        title: String,

        /// Field value as name=value (repeatable)
        #[arg(long = "value", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },

    /// Print the last 10 submissions of a saved form
    Show {
        /// Title of the saved form
        #[arg(long)]
        title: String,
    },
}

/// Parse `name=value`; the value may be empty, the name may not.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{}'", s)),
    }
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-builder.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: Format,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: Format::Json,
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_trace_path")]
    pub path: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_trace_path(),
        }
    }
}

// Serde default helpers
fn default_store_path() -> String { ".form-builder".to_string() }
fn default_output_dir() -> String { ".".to_string() }
fn default_trace_path() -> String { "form-builder-trace.jsonl".to_string() }
fn default_true() -> bool { true }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-builder.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (CLI > config file > defaults)
// ============================================================================

/// Settings shared by every subcommand after merging CLI and config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub store_path: String,
    pub trace_path: Option<String>,
}

pub fn resolve(cli: &Cli, config: &AppConfig) -> Resolved {
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| config.store.path.clone());

    // An explicit --trace wins even when the config disables tracing
    let trace_path = match &cli.trace {
        Some(p) => Some(p.clone()),
        None if config.trace.enabled => Some(config.trace.path.clone()),
        None => None,
    };

    Resolved {
        store_path,
        trace_path,
    }
}

/// Format for importing `file`: explicit flag, then extension, then config.
pub fn resolve_import_format(flag: Option<Format>, file: &str, config: &AppConfig) -> Format {
    flag.or_else(|| {
        std::path::Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Format::from_extension)
    })
    .unwrap_or(config.export.format)
}
