//! # Core Type Definitions
//!
//! Shared identifiers and the error type for the Orrery exporter.
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where deterministic ordering matters

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Integer coordinates of a point in the cluster.
///
/// Systems are identified by coordinate equality at export time, so this
/// type is the key for every cross-reference the builder resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coords {
    /// Create a new coordinate triple.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while exporting a turn.
///
/// - No silent failures
/// - Use `Result<T, OrreryError>` for fallible operations
/// - The core should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum OrreryError {
    /// The snapshot file or payload is malformed and cannot be read.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred while reading input or writing the document.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for OrreryError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
