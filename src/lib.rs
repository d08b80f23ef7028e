//! rjmx-mapper library
//!
//! This crate turns declarative JMX metric mappings (MBean names plus
//! attribute names) into Jolokia read requests, and builds the attribute
//! mapping used to label the values Jolokia returns.

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod plan;

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::collector::{AttributeMapping, HttpRequest, JolokiaHttpClient};
use crate::config::Config;
use crate::error::{AppResult, BuildError};

/// Initialize the logging subsystem
///
/// Logs go to stderr so the request plan on stdout stays machine-readable.
///
/// # Arguments
/// * `level` - Log level string (trace, debug, info, warn, error)
///
/// # Errors
/// Returns an error if the logging system fails to initialize
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Validate a fully resolved configuration and build its requests
///
/// Validation runs here, after CLI and environment overrides have been
/// applied, so an overridden file value never fails the run.
///
/// # Errors
/// Returns `AppError::Config` for an invalid configuration and
/// `AppError::Build` when any mapping fails to compile.
pub fn build_requests(
    config: &Config,
) -> AppResult<(JolokiaHttpClient, Vec<HttpRequest>, AttributeMapping)> {
    config.validate()?;

    let client = config.jolokia.client();
    let (requests, mapping) = client
        .build_requests_and_mappings(&config.jolokia.url, &config.mappings)
        .inspect_err(|e| {
            if let BuildError::MalformedMBeanName(name_err) = e {
                warn!(mbean = %name_err.name(), "Rejected mapping with malformed mbean name");
            }
        })?;

    Ok((client, requests, mapping))
}
