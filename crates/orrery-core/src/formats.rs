//! # Snapshot Interchange Format
//!
//! Binary serialization for simulation-store snapshots.
//!
//! Format: Header (5 bytes) + postcard-serialized snapshot data.
//! - 4 bytes: Magic ("ORRY")
//! - 1 byte: Version
//!
//! Pre-deserialization validation keeps corrupted or hostile files from
//! triggering large allocations: the header is checked first and the
//! payload size is bounded by [`MAX_SNAPSHOT_PAYLOAD_SIZE`].

use crate::store::Snapshot;
use crate::tables::{FORMAT_VERSION, MAGIC_BYTES, MAX_SNAPSHOT_PAYLOAD_SIZE};
use crate::types::OrreryError;

/// Minimum valid file size (header only).
const MIN_FILE_SIZE: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes all snapshot data.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), OrreryError> {
        if &self.magic != MAGIC_BYTES {
            return Err(OrreryError::InvalidSnapshot(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(OrreryError::InvalidSnapshot(format!(
                "Unsupported version: {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OrreryError> {
        if bytes.len() < MIN_FILE_SIZE {
            return Err(OrreryError::InvalidSnapshot(
                "File too short for header".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

/// Serialize a snapshot to the binary interchange format.
pub fn snapshot_to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>, OrreryError> {
    let payload = postcard::to_allocvec(snapshot)
        .map_err(|e| OrreryError::SerializationError(format!("Snapshot: {}", e)))?;

    let header = SnapshotHeader::new();
    let mut bytes = Vec::with_capacity(MIN_FILE_SIZE + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Deserialize a snapshot from the binary interchange format.
///
/// The header and payload size are validated before any graph-sized
/// allocation happens.
pub fn snapshot_from_bytes(bytes: &[u8]) -> Result<Snapshot, OrreryError> {
    let header = SnapshotHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = &bytes[MIN_FILE_SIZE..];
    if payload.len() > MAX_SNAPSHOT_PAYLOAD_SIZE {
        return Err(OrreryError::InvalidSnapshot(format!(
            "Payload size {} exceeds maximum allowed {}",
            payload.len(),
            MAX_SNAPSHOT_PAYLOAD_SIZE
        )));
    }

    postcard::from_bytes(payload)
        .map_err(|e| OrreryError::SerializationError(format!("Snapshot: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================
