//! CLI commands and argument parsing

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Singer tap for the WhatConverts API
#[derive(Parser, Debug)]
#[command(name = "tap-whatconverts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the configuration schema
    Spec,

    /// Test connection to the API
    Check {
        /// Inline config JSON
        #[arg(long)]
        config_json: Option<String>,
    },

    /// Print the catalog of available streams
    Discover {
        /// Inline config JSON
        #[arg(long)]
        config_json: Option<String>,
    },

    /// List available stream names
    Streams,

    /// Read data from streams
    Read {
        /// Streams to sync (comma-separated, empty = all)
        #[arg(long)]
        streams: Option<String>,

        /// Catalog file; only streams selected in it are synced
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Inline config JSON
        #[arg(long)]
        config_json: Option<String>,
    },
}
