//! # Orrery CLI Module
//!
//! This module implements the CLI interface for Orrery.
//!
//! ## Available Commands
//!
//! - `export` - Export the current turn to a JSON document
//! - `status` - Show snapshot record counts
//! - `pack` - Convert a JSON snapshot to the binary format
//! - `unpack` - Convert a binary snapshot back to JSON
//! - `hash` - BLAKE3 digest of the export (with the `crypto-hash` feature)

mod commands;

use crate::config::OrreryConfig;
use clap::{Parser, Subcommand};
use orrery_core::OrreryError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Orrery - cluster turn-state exporter
///
/// Reads one turn of the simulation store and emits a deterministic,
/// diff-stable JSON document for external viewers and tools.
#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the turn-state document
    Export {
        /// Snapshot file (binary or JSON); falls back to the configured default
        snapshot: Option<PathBuf>,

        /// Output file path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the document for human readers (same content either way)
        #[arg(long)]
        pretty: bool,
    },

    /// Show snapshot record counts
    Status {
        /// Snapshot file (binary or JSON); falls back to the configured default
        snapshot: Option<PathBuf>,
    },

    /// Convert a JSON snapshot to the binary interchange format
    Pack {
        /// Input JSON snapshot
        #[arg(short, long)]
        input: PathBuf,

        /// Output binary snapshot
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a binary snapshot back to JSON
    Unpack {
        /// Input binary snapshot
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON snapshot
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compute a BLAKE3 digest of the exported document
    #[cfg(feature = "crypto-hash")]
    Hash {
        /// Snapshot file (binary or JSON); falls back to the configured default
        snapshot: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Pick the snapshot path: the command argument wins over the config.
fn snapshot_path(
    arg: Option<PathBuf>,
    config: &OrreryConfig,
) -> Result<PathBuf, OrreryError> {
    arg.or_else(|| config.snapshot.clone()).ok_or_else(|| {
        OrreryError::InvalidSnapshot(
            "No snapshot given and none configured; pass a path or set 'snapshot' in orrery.toml"
                .to_string(),
        )
    })
}

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli, config: &OrreryConfig) -> Result<(), OrreryError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Export {
            snapshot,
            output,
            pretty,
        }) => cmd_export(&snapshot_path(snapshot, config)?, output.as_deref(), pretty),
        Some(Commands::Status { snapshot }) => {
            cmd_status(&snapshot_path(snapshot, config)?, json_mode)
        }
        Some(Commands::Pack { input, output }) => cmd_pack(&input, &output),
        Some(Commands::Unpack { input, output }) => cmd_unpack(&input, &output),
        #[cfg(feature = "crypto-hash")]
        Some(Commands::Hash { snapshot }) => {
            cmd_hash(&snapshot_path(snapshot, config)?, json_mode)
        }
        None => {
            // No subcommand - show status by default
            cmd_status(&snapshot_path(None, config)?, json_mode)
        }
    }
}
