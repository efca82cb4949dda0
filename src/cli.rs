//! Command-line interface definitions for nlab.
//!
//! The definitions are shared between the main binary and the xtask man page
//! generator.
//!
//! Note: Field-level documentation is provided via clap attributes, so we
//! allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for nlab.
#[derive(Parser)]
#[command(
    name = "nlab",
    version = crate::VERSION,
    about = "Catalogue data sources into manifests and compare them over time",
    long_about = "Walks a data source, records every file with its size, mtime, media type \
                  and SHA-256 hash in a manifest, stores manifests and diffs them"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output (also enables debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Collect a manifest of artifacts under a path
    Collect {
        /// File or directory to collect
        path: PathBuf,

        /// Only keep paths matching this glob (repeatable)
        #[arg(short, long = "include", value_name = "GLOB")]
        include: Vec<String>,

        /// Drop paths matching this glob (repeatable)
        #[arg(short, long = "exclude", value_name = "GLOB")]
        exclude: Vec<String>,

        /// Skip SHA-256 hashing of file contents
        #[arg(long)]
        no_hash: bool,

        /// Only look at the top level of a directory
        #[arg(long)]
        no_recursive: bool,

        /// Print the summary without storing the manifest
        #[arg(long)]
        no_save: bool,
    },

    /// List stored manifests, oldest first
    List,

    /// Show a stored manifest
    Show {
        /// Manifest ID
        id: String,

        /// Print the raw JSON document
        #[arg(long)]
        json: bool,
    },

    /// Delete a stored manifest
    Delete {
        /// Manifest ID
        id: String,
    },

    /// Delete all stored manifests
    Clear {
        /// Actually delete; without this only the count is reported
        #[arg(short, long)]
        force: bool,
    },

    /// Compare two stored manifests
    Diff {
        /// ID of the older manifest
        old: String,

        /// ID of the newer manifest
        new: String,

        /// List every changed path
        #[arg(short, long)]
        detailed: bool,
    },

    /// Get or set configuration values
    Config {
        /// Configuration key (e.g. collect.recursive)
        key: Option<String>,

        /// Value to set
        value: Option<String>,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
