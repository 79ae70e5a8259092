//! # Orrery - Cluster Turn-State Exporter
//!
//! The main binary for the Orrery deterministic export engine.
//!
//! This application provides:
//! - `export` - turn-state JSON document generation
//! - `status` - snapshot inspection
//! - `pack` / `unpack` - snapshot format conversion
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/orrery (THE BINARY)         │
//! │                                               │
//! │  ┌─────────────┐        ┌─────────────────┐  │
//! │  │   CLI       │        │   Config        │  │
//! │  │  (clap)     │        │   (TOML)        │  │
//! │  └──────┬──────┘        └────────┬────────┘  │
//! │         │                        │           │
//! │         └───────────┬────────────┘           │
//! │                     ▼                        │
//! │             ┌───────────────┐                │
//! │             │  orrery-core  │                │
//! │             │  (THE LOGIC)  │                │
//! │             └───────────────┘                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Export a turn to stdout
//! orrery -q export turn-031.dat
//!
//! # Export to a file, indented
//! orrery export turn-031.dat -o cluster.json --pretty
//!
//! # Inspect a snapshot
//! orrery status turn-031.dat
//! ```

use clap::Parser;
use orrery::cli;
use orrery::config::OrreryConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Load configuration before tracing init so the file can pick the
    // log format.
    let config = match OrreryConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cli, &config);

    // Display startup banner. Skipped when the document itself goes to
    // stdout, so the output stays machine-readable.
    let exporting_to_stdout = matches!(
        cli.command,
        Some(cli::Commands::Export { output: None, .. })
    );
    if !cli.quiet && !exporting_to_stdout {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing — ORRERY_LOG_FORMAT=json enables machine-parseable
/// output; the config file's `log_format` is the fallback.
fn init_tracing(cli: &cli::Cli, config: &OrreryConfig) {
    let log_format = std::env::var("ORRERY_LOG_FORMAT")
        .ok()
        .or_else(|| config.log_format.clone())
        .unwrap_or_else(|| "text".to_string());

    let default_filter = if cli.verbose {
        "orrery=debug,orrery_core=debug"
    } else {
        "orrery=info,orrery_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Print the Orrery startup banner.
fn print_banner() {
    println!(
        r#"
   ██████╗ ██████╗ ██████╗ ███████╗██████╗ ██╗   ██╗
  ██╔═══██╗██╔══██╗██╔══██╗██╔════╝██╔══██╗╚██╗ ██╔╝
  ██║   ██║██████╔╝██████╔╝█████╗  ██████╔╝ ╚████╔╝
  ██║   ██║██╔══██╗██╔══██╗██╔══╝  ██╔══██╗  ╚██╔╝
  ╚██████╔╝██║  ██║██║  ██║███████╗██║  ██║   ██║
   ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝   ╚═╝

  Cluster Turn-State Exporter v{}

  Deterministic • Diff-Stable • Complete
"#,
        env!("CARGO_PKG_VERSION")
    );
}
