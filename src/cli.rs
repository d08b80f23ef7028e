//! CLI argument parsing for rjmx-mapper
//!
//! This module provides the command-line interface using clap derive macros.
//!
//! # Options
//!
//! - `--config` / `-c`: Configuration file path (default: config.yaml, env: RJMX_CONFIG)
//! - `--jolokia-url`: Jolokia endpoint URL (env: RJMX_JOLOKIA_URL)
//! - `--http-method`: Request method, GET or POST (env: RJMX_HTTP_METHOD)
//! - `--validate`: Validate configuration and mappings, then exit
//! - `--log-level` / `-l`: Log level (trace/debug/info/warn/error, env: RJMX_LOG_LEVEL)
//! - `--output-format`: Output format for the request plan (text/json/yaml)
//!
//! # Precedence
//!
//! Configuration values are resolved in the following order (highest to lowest priority):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// rjmx-mapper - Jolokia request builder for JMX metric mappings
///
/// Compiles the configured MBean attribute mappings into Jolokia read
/// requests and prints them together with the response attribute mapping.
#[derive(Parser, Debug)]
#[command(name = "rjmx-mapper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config.yaml",
        env = "RJMX_CONFIG"
    )]
    pub config: PathBuf,

    /// Jolokia endpoint URL (overrides config file)
    #[arg(long, value_name = "URL", env = "RJMX_JOLOKIA_URL")]
    pub jolokia_url: Option<String>,

    /// HTTP method for read requests (overrides config file)
    /// "GET" selects one request per attribute; anything else builds a single POST
    #[arg(long, value_name = "METHOD", env = "RJMX_HTTP_METHOD")]
    pub http_method: Option<String>,

    /// Validate configuration and mappings without printing the request plan
    #[arg(long)]
    pub validate: bool,

    /// Log level
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "RJMX_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// Output format for the request plan
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level - default
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Output format options for the request plan
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}
