//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Batch tools for a page-fragment content pipeline
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root; relative paths in the config resolve against it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: fragkit.toml)
    #[arg(short = 'C', long, default_value = "fragkit.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Package each fragment directory into its own zip archive
    Zip {
        /// Fragment collection directory (overrides `[zip.source]`)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Directory the archives are written to (overrides `[zip.output]`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fragments to archive (overrides `[zip.fragments]`)
        fragments: Vec<String>,
    },

    /// Prefix bare config variables in fragment templates with `configuration.`
    Fix {
        /// Glob selecting the files to rewrite (overrides `[fix.pattern]`)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Report files that need fixing without writing them; fails if any do
        #[arg(long)]
        check: bool,
    },
}

impl Cli {
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Fix { check: true, .. })
    }
}
