//! Folio CLI Binary
//!
//! Command-line interface for the Folio archive manifest tool.

use clap::Parser;
use folio::cli::{Cli, RunContext};
use folio::config::ConfigLoader;
use folio::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Folio CLI starting");

    // Create CLI context
    let context = match RunContext::new(cli.root.clone(), cli.config.clone()) {
        Ok(ctx) => {
            info!("CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error initializing archive context: {}", e);
            eprintln!("{}", folio::cli::map_error(&e));
            process::exit(1);
        }
    };

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", folio::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults. Logging is
/// off entirely unless --verbose or an explicit --log-level asks for it.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    if !cli.verbose && cli.log_level.is_none() {
        let mut config = LoggingConfig::default();
        config.level = "off".to_string();
        return config;
    }

    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.root)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    } else if config.output == "file" && config.file.is_none() {
        config.file = Some(cli.root.join(".folio").join("folio.log"));
    }

    config
}
