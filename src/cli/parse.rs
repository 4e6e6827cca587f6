//! CLI parse: clap types for Folio. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio CLI - Deterministic archive manifest tool
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Deterministic manifest builder for static document archives")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Archive root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the archive state directory and default config
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Scan the archive and rewrite the manifest
    Scan {
        /// Manifest output path (overrides configuration)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compare the archive against its manifest and report drift
    Verify {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Report hygiene findings (names, empty files, duplicate content)
    Audit {
        /// Rename uppercase file names to lowercase
        #[arg(long)]
        fix: bool,
        /// Skip the confirmation prompt when fixing
        #[arg(long)]
        yes: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show manifest summary for the archive
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
