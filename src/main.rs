//! rjmx-mapper - Jolokia request builder for JMX metric mappings
//!
//! This binary loads the mapping configuration, builds the Jolokia read
//! requests and prints them together with the response attribute mapping.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use rjmx_mapper::cli::Cli;
use rjmx_mapper::config::Config;
use rjmx_mapper::plan::RequestPlan;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    rjmx_mapper::init_logging(&cli.log_level.to_string())?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting rjmx-mapper");

    // Load configuration, then apply CLI overrides
    let mut config = Config::load_or_default(&cli.config)?;
    config.apply_overrides(cli.jolokia_url, cli.http_method);

    let (client, requests, mapping) = rjmx_mapper::build_requests(&config)?;

    info!(
        method = %client.method(),
        requests = requests.len(),
        attributes = mapping.len(),
        "Built Jolokia requests"
    );

    if cli.validate {
        println!("Configuration is valid");
        return Ok(());
    }

    let plan = RequestPlan::new(client.method(), &requests, &mapping)?;
    print!("{}", plan.render(cli.output_format)?);

    Ok(())
}
