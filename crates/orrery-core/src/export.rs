//! # Export Entry Point
//!
//! The one operation the crate exists for: turn a snapshot into the
//! interchange document. Control flow is strictly linear — snapshot →
//! export graph → document tree → byte stream — and nothing is retained
//! between invocations.
//!
//! There is no partial-failure mode: the document tree is materialized
//! completely before the first byte is written, so an output failure
//! leaves either a whole document or nothing usable behind.

use crate::graph::ExportGraph;
use crate::marshal::marshal_globals;
use crate::store::Snapshot;
use crate::types::OrreryError;
use serde_json::Value;
use std::io::Write;

// =============================================================================
// EXPORT FUNCTIONS
// =============================================================================

/// Build the document tree for one turn.
///
/// Pure: the same snapshot always produces the same tree, with the same
/// member order in every map node.
#[must_use]
pub fn build_document(snapshot: &Snapshot) -> Value {
    marshal_globals(&ExportGraph::build(snapshot))
}

/// Export the current turn to an output stream as a single JSON
/// document, newline-terminated.
///
/// Output is byte-identical for identical snapshots. A stream failure
/// fails the whole export; there is no retry and no partial document.
pub fn export_to_writer<W: Write>(snapshot: &Snapshot, out: &mut W) -> Result<(), OrreryError> {
    let document = build_document(snapshot);
    serde_json::to_writer(&mut *out, &document)
        .map_err(|e| OrreryError::SerializationError(e.to_string()))?;
    out.write_all(b"\n")?;
    out.flush()?;
    tracing::info!(turn = snapshot.galaxy.turn_number, "exported turn document");
    Ok(())
}

/// Export to an in-memory buffer. Convenience for callers that hash or
/// compare documents rather than streaming them.
pub fn export_to_vec(snapshot: &Snapshot) -> Result<Vec<u8>, OrreryError> {
    let mut bytes = Vec::new();
    export_to_writer(snapshot, &mut bytes)?;
    Ok(bytes)
}

// =============================================================================
// CRYPTOGRAPHIC HASH SUPPORT
// =============================================================================

/// Compute a BLAKE3 hash of the exported document, as a 64-character
/// hex string.
///
/// Because the export is byte-stable, the digest identifies a turn-state
/// exactly and can be compared across machines.
///
/// # Requires
///
/// Only available with the `crypto-hash` feature enabled.
#[cfg(feature = "crypto-hash")]
pub fn document_hash(snapshot: &Snapshot) -> Result<String, OrreryError> {
    let bytes = export_to_vec(snapshot)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::store::{ColonyRecord, Galaxy, PlanetRecord, ShipRecord, SpeciesRecord, StarRecord};
    use crate::tables::IN_DEEP_SPACE;
    use serde_json::Value;

    /// One system at (10,20,30) with planets at orbits 1 and 2, one
    /// species with a colony at orbit 1, and one ship in deep space.
    fn scenario(ship_at_colony_system: bool) -> Snapshot {
        let ship_coords = if ship_at_colony_system {
            (10, 20, 30)
        } else {
            (50, 60, 70)
        };
        Snapshot {
            galaxy: Galaxy {
                turn_number: 3,
                radius: 15,
                d_num_species: 2,
                num_species: 1,
            },
            stars: vec![StarRecord {
                id: 1,
                x: 10,
                y: 20,
                z: 30,
                planet_index: 0,
                num_planets: 2,
                ..Default::default()
            }],
            planets: vec![
                PlanetRecord {
                    id: 11,
                    orbit: 1,
                    ..Default::default()
                },
                PlanetRecord {
                    id: 12,
                    orbit: 2,
                    ..Default::default()
                },
            ],
            species: vec![SpeciesRecord {
                id: 1,
                name: "Vanguard".to_string(),
                govt_name: "Directorate".to_string(),
                govt_type: "Technocracy".to_string(),
                namplas: vec![ColonyRecord {
                    name: "Homeworld".to_string(),
                    x: 10,
                    y: 20,
                    z: 30,
                    orbit: 1,
                    ..Default::default()
                }],
                ships: vec![ShipRecord {
                    name: "Pathfinder".to_string(),
                    class: 2,
                    status: IN_DEEP_SPACE,
                    x: ship_coords.0,
                    y: ship_coords.1,
                    z: ship_coords.2,
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn exporting_twice_is_byte_identical() {
        let snapshot = scenario(true);
        let first = export_to_vec(&snapshot).expect("export");
        let second = export_to_vec(&snapshot).expect("export");
        assert_eq!(first, second);
        assert_eq!(first.last(), Some(&b'\n'));
    }

    #[test]
    fn root_members_are_turn_cluster_species() {
        let document = build_document(&scenario(true));
        assert_eq!(document.get("turn"), Some(&Value::from(3)));
        let cluster = document.get("cluster").expect("cluster");
        assert_eq!(cluster.get("radius"), Some(&Value::from(15)));
        assert_eq!(cluster.get("d_num_species"), Some(&Value::from(2)));
        assert_eq!(cluster.get("num_species"), Some(&Value::from(1)));
        assert_eq!(
            cluster.get("systems").and_then(|s| s.as_array()).map(|s| s.len()),
            Some(1)
        );
        assert!(document.get("species").is_some());
    }

    #[test]
    fn colony_node_references_system_and_orbit() {
        let document = build_document(&scenario(true));
        let colony = &document["species"][0]["colonies"][0];
        assert_eq!(colony.get("name"), Some(&Value::from("Homeworld")));
        assert_eq!(colony.get("system"), Some(&Value::from(1)));
        assert_eq!(colony.get("orbit"), Some(&Value::from(1)));
        assert_eq!(colony.get("homeworld"), Some(&Value::Bool(true)));
    }

    #[test]
    fn ship_location_renders_colony_name_on_match() {
        let document = build_document(&scenario(true));
        let location = &document["species"][0]["ships"][0]["location"];
        assert_eq!(location.get("colony"), Some(&Value::from("Homeworld")));
        assert!(location.get("x").is_none());
        assert_eq!(location.get("deep_space"), Some(&Value::Bool(true)));
    }

    #[test]
    fn ship_location_falls_back_to_raw_coordinates() {
        let document = build_document(&scenario(false));
        let location = &document["species"][0]["ships"][0]["location"];
        assert!(location.get("colony").is_none());
        assert_eq!(location.get("x"), Some(&Value::from(50)));
        assert_eq!(location.get("y"), Some(&Value::from(60)));
        assert_eq!(location.get("z"), Some(&Value::from(70)));
        assert_eq!(location.get("deep_space"), Some(&Value::Bool(true)));
    }

    #[test]
    fn document_parses_as_json() {
        let bytes = export_to_vec(&scenario(true)).expect("export");
        let parsed: Value = serde_json::from_slice(&bytes).expect("valid JSON");
        assert!(parsed.is_object());
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn document_hash_is_stable() {
        let snapshot = scenario(true);
        let a = document_hash(&snapshot).expect("hash");
        let b = document_hash(&snapshot).expect("hash");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
