//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use orrery_core::{
    OrreryError, Snapshot, build_document, export_to_writer, snapshot_from_bytes,
    snapshot_to_bytes,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "crypto-hash")]
use orrery_core::document_hash;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum snapshot file size (200 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_SNAPSHOT_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), OrreryError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| OrreryError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(OrreryError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate file path for security.
///
/// This function:
/// 1. Canonicalizes the path to resolve symlinks and ".."
/// 2. Ensures the path exists
/// 3. Ensures the path is a file (not a directory)
fn validate_file_path(path: &Path) -> Result<PathBuf, OrreryError> {
    // Canonicalize resolves "..", symlinks, and validates existence
    let canonical = path.canonicalize().map_err(|e| {
        OrreryError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    // Ensure it's a file, not a directory
    if !canonical.is_file() {
        return Err(OrreryError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate output path for security.
///
/// For output files, we validate the parent directory exists and is writable.
fn validate_output_path(path: &Path) -> Result<PathBuf, OrreryError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    // Canonicalize parent to resolve ".." and symlinks
    let canonical_parent = parent.canonicalize().map_err(|e| {
        OrreryError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(OrreryError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| OrreryError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SNAPSHOT LOADING
// =============================================================================

/// Load a snapshot from disk, accepting either the binary interchange
/// format or a plain JSON snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, OrreryError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, MAX_SNAPSHOT_FILE_SIZE)?;

    let bytes = std::fs::read(&canonical)
        .map_err(|e| OrreryError::IoError(format!("Read '{}': {}", path.display(), e)))?;

    // Binary first (magic bytes make misidentification impossible),
    // then JSON.
    match snapshot_from_bytes(&bytes) {
        Ok(snapshot) => Ok(snapshot),
        Err(binary_err) => serde_json::from_slice(&bytes).map_err(|json_err| {
            OrreryError::InvalidSnapshot(format!(
                "'{}' is neither a binary snapshot ({}) nor JSON ({})",
                path.display(),
                binary_err,
                json_err
            ))
        }),
    }
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Export the turn-state document to a file or stdout.
pub fn cmd_export(
    snapshot_path: &Path,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), OrreryError> {
    let snapshot = load_snapshot(snapshot_path)?;

    let bytes = if pretty {
        let document = build_document(&snapshot);
        let mut pretty_bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| OrreryError::SerializationError(e.to_string()))?;
        pretty_bytes.push(b'\n');
        pretty_bytes
    } else {
        let mut compact = Vec::new();
        export_to_writer(&snapshot, &mut compact)?;
        compact
    };

    match output {
        Some(path) => {
            let validated = validate_output_path(path)?;
            std::fs::write(&validated, &bytes)
                .map_err(|e| OrreryError::IoError(format!("Write '{}': {}", path.display(), e)))?;
            tracing::info!(
                output = %validated.display(),
                size = bytes.len(),
                "Export written"
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&bytes)
                .and_then(|()| handle.flush())
                .map_err(|e| OrreryError::IoError(format!("Write stdout: {}", e)))?;
        }
    }

    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show snapshot record counts.
pub fn cmd_status(snapshot_path: &Path, json_mode: bool) -> Result<(), OrreryError> {
    let snapshot = load_snapshot(snapshot_path)?;

    let colony_count: usize = snapshot.species.iter().map(|sp| sp.namplas.len()).sum();
    let ship_count: usize = snapshot.species.iter().map(|sp| sp.ships.len()).sum();

    if json_mode {
        let output = serde_json::json!({
            "snapshot": snapshot_path.to_string_lossy(),
            "turn_number": snapshot.galaxy.turn_number,
            "radius": snapshot.galaxy.radius,
            "systems": snapshot.stars.len(),
            "planets": snapshot.planets.len(),
            "species": snapshot.species.len(),
            "colonies": colony_count,
            "ships": ship_count
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        println!("Snapshot: {}", snapshot_path.display());
        println!("  Turn:     {}", snapshot.galaxy.turn_number);
        println!("  Radius:   {}", snapshot.galaxy.radius);
        println!("  Systems:  {}", snapshot.stars.len());
        println!("  Planets:  {}", snapshot.planets.len());
        println!("  Species:  {}", snapshot.species.len());
        println!("  Colonies: {}", colony_count);
        println!("  Ships:    {}", ship_count);
    }

    Ok(())
}

// =============================================================================
// PACK / UNPACK COMMANDS
// =============================================================================

/// Convert a JSON snapshot to the binary interchange format.
pub fn cmd_pack(input: &Path, output: &Path) -> Result<(), OrreryError> {
    let canonical = validate_file_path(input)?;
    validate_file_size(&canonical, MAX_SNAPSHOT_FILE_SIZE)?;

    let bytes = std::fs::read(&canonical)
        .map_err(|e| OrreryError::IoError(format!("Read '{}': {}", input.display(), e)))?;
    let snapshot: Snapshot = serde_json::from_slice(&bytes)
        .map_err(|e| OrreryError::InvalidSnapshot(format!("'{}': {}", input.display(), e)))?;

    let packed = snapshot_to_bytes(&snapshot)?;
    let validated = validate_output_path(output)?;
    std::fs::write(&validated, &packed)
        .map_err(|e| OrreryError::IoError(format!("Write '{}': {}", output.display(), e)))?;

    println!(
        "Packed {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        packed.len()
    );
    Ok(())
}

/// Convert a binary snapshot back to JSON.
pub fn cmd_unpack(input: &Path, output: &Path) -> Result<(), OrreryError> {
    let snapshot = load_snapshot(input)?;

    let mut json = serde_json::to_vec_pretty(&snapshot)
        .map_err(|e| OrreryError::SerializationError(e.to_string()))?;
    json.push(b'\n');

    let validated = validate_output_path(output)?;
    std::fs::write(&validated, &json)
        .map_err(|e| OrreryError::IoError(format!("Write '{}': {}", output.display(), e)))?;

    println!(
        "Unpacked {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        json.len()
    );
    Ok(())
}

// =============================================================================
// HASH COMMAND
// =============================================================================

/// Compute a BLAKE3 digest of the exported document.
#[cfg(feature = "crypto-hash")]
pub fn cmd_hash(snapshot_path: &Path, json_mode: bool) -> Result<(), OrreryError> {
    let snapshot = load_snapshot(snapshot_path)?;
    let digest = document_hash(&snapshot)?;

    if json_mode {
        let output = serde_json::json!({
            "snapshot": snapshot_path.to_string_lossy(),
            "algorithm": "blake3",
            "digest": digest
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        println!("{}  {}", digest, snapshot_path.display());
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
