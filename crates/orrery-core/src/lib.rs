//! # orrery-core
//!
//! The deterministic turn-state exporter for Orrery - THE LOGIC.
//!
//! This crate converts one turn of a simulated cluster (star systems,
//! planets, species, colonies, ships) into a portable hierarchical
//! document for external tools that have no access to the simulation
//! store. The store records relationships only implicitly — coordinate
//! equality, bit-indexed relation sets, positional sentinel codes,
//! sentinel-terminated collections — and this crate reconstructs them
//! into an explicit, compact, deterministically-ordered document.
//!
//! ## Pipeline
//!
//! Strictly linear and synchronous:
//!
//! ```text
//! snapshot  →  export graph  →  document tree  →  byte stream
//!  (store)      (graph)          (marshal)        (serde_json)
//! ```
//!
//! ## Architectural Constraints
//!
//! - The snapshot is read-only; the builder never mutates it
//! - No async, no network dependencies (pure Rust)
//! - Integer arithmetic only; insertion-ordered map nodes
//! - No state survives an export call

// =============================================================================
// MODULES
// =============================================================================

pub mod export;
pub mod formats;
pub mod graph;
pub mod marshal;
pub mod relations;
pub mod store;
pub mod tables;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{Coords, OrreryError};

// =============================================================================
// RE-EXPORTS: Snapshot & Export
// =============================================================================

pub use export::{build_document, export_to_vec, export_to_writer};
pub use formats::{SnapshotHeader, snapshot_from_bytes, snapshot_to_bytes};
pub use graph::ExportGraph;
pub use relations::decode_relation;
pub use store::Snapshot;

#[cfg(feature = "crypto-hash")]
pub use export::document_hash;
