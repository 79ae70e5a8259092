//! # Simulation-Store Snapshot
//!
//! Read-only view of one turn of the simulation store, as handed to the
//! exporter. The records keep the store's internal layout: fixed-size
//! positional slots, packed relation words, sentinel values. Resolving
//! that layout into explicit references is the builder's job
//! ([`crate::graph`]); nothing in this module interprets the data.
//!
//! The snapshot is owned by the caller and never mutated here.

use crate::tables::{MAX_PLANET_GASES, MAX_SPECIES_GASES, NUM_CONTACT_WORDS, NUM_TECH};
use serde::{Deserialize, Serialize};

// =============================================================================
// GALAXY
// =============================================================================

/// Galaxy-wide constants for the exported turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Galaxy {
    /// Turn number being exported. Non-negative.
    pub turn_number: i32,
    /// Cluster radius in parsecs.
    pub radius: i32,
    /// Number of species the cluster was designed for.
    pub d_num_species: i32,
    /// Number of species actually present.
    pub num_species: i32,
}

// =============================================================================
// STARS & PLANETS
// =============================================================================

/// One star system record.
///
/// Planets live in the snapshot's flat planet table;
/// `planet_index`/`num_planets` delimit this system's slice of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StarRecord {
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Stellar type code (dwarf, degenerate, main sequence, giant).
    pub star_type: i32,
    pub color: i32,
    pub size: i32,
    /// Non-zero if some species' homeworld is here.
    pub home_system: i32,
    /// Non-zero if a natural wormhole starts here.
    pub worm_here: i32,
    /// Coordinates of the wormhole exit. Meaningful only if `worm_here`.
    pub worm_x: i32,
    pub worm_y: i32,
    pub worm_z: i32,
    /// Index of this system's first planet in the flat planet table.
    pub planet_index: i32,
    pub num_planets: i32,
    pub message: i32,
    /// Packed visitation set: bit `i` set means species `i + 1` has
    /// visited this system.
    pub visited_by: [u32; NUM_CONTACT_WORDS],
}

/// One planet record, in the snapshot's flat planet table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetRecord {
    pub id: i32,
    /// Orbit slot within the owning system, 1-based.
    pub orbit: i32,
    pub temperature_class: i32,
    pub pressure_class: i32,
    /// Special code: 1 ideal home, 2 ideal colony, 3 radioactive hellhole.
    pub special: i32,
    /// Atmospheric gas codes by slot; 0 is an empty slot.
    pub gas: [i32; MAX_PLANET_GASES],
    /// Percentage of the atmosphere for the gas in the same slot.
    pub gas_percent: [i32; MAX_PLANET_GASES],
    pub diameter: i32,
    /// Surface gravity in hundredths of Earth gravity.
    pub gravity: i32,
    pub mining_difficulty: i32,
    pub econ_efficiency: i32,
    pub md_increase: i32,
    pub message: i32,
}

// =============================================================================
// SPECIES
// =============================================================================

/// One species, with its colony and ship records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesRecord {
    /// Species number, 1-based and unique.
    pub id: i32,
    pub name: String,
    pub govt_name: String,
    pub govt_type: String,
    pub auto_orders: i32,
    pub econ_units: i32,
    /// Economic base of the homeworld at game start.
    pub hp_original_base: i32,
    /// Required atmospheric gas code and tolerated percentage band.
    pub required_gas: i32,
    pub required_gas_min: i32,
    pub required_gas_max: i32,
    /// Neutral gas codes by slot; the list ends at the first 0 slot.
    pub neutral_gas: [i32; MAX_SPECIES_GASES],
    /// Poison gas codes by slot; the list ends at the first 0 slot.
    pub poison_gas: [i32; MAX_SPECIES_GASES],
    pub init_tech_level: [i32; NUM_TECH],
    pub tech_level: [i32; NUM_TECH],
    pub tech_knowledge: [i32; NUM_TECH],
    pub tech_eps: [i32; NUM_TECH],
    /// Packed relation sets: bit `i` set means the relation holds with
    /// species `i + 1`.
    pub contact: [u32; NUM_CONTACT_WORDS],
    pub ally: [u32; NUM_CONTACT_WORDS],
    pub enemy: [u32; NUM_CONTACT_WORDS],
    /// Colonies in store order; the first one is the homeworld.
    pub namplas: Vec<ColonyRecord>,
    /// Ships in store order, including deleted "Unused" slots.
    pub ships: Vec<ShipRecord>,
}

/// One named-planet (colony) record of a species.
///
/// The colony's system and planet are stored only as raw coordinates
/// and an orbit slot; the builder resolves them by scanning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyRecord {
    pub id: i32,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Orbit slot of the colony's planet, 1-based.
    pub orbit: i32,
    pub hiding: i32,
    pub hidden: i32,
    pub ma_base: i32,
    pub mi_base: i32,
    pub pop_units: i32,
    pub shipyards: i32,
    pub siege_eff: i32,
    pub special: i32,
    pub use_on_ambush: i32,
    pub message: i32,
    /// Inventory quantities by item slot ([`crate::tables::ITEM_CODES`]).
    pub item_quantity: Vec<i32>,
    pub aus_needed: i32,
    pub aus_to_install: i32,
    pub auto_aus: i32,
    pub ius_needed: i32,
    pub ius_to_install: i32,
    pub auto_ius: i32,
}

/// One ship record of a species.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipRecord {
    /// Bare name; deleted slots carry the "Unused" sentinel.
    pub name: String,
    /// Class code ([`crate::tables::SHIP_CLASS_ABBR`]).
    pub class: i32,
    /// Drive type: 0 FTL, 1 sub-light, 2 starbase.
    pub drive: i32,
    pub tonnage: i32,
    pub age: i32,
    /// Status code ([`crate::tables`]): under construction, on surface,
    /// in orbit, in deep space, jumped in combat, forced jump.
    pub status: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Orbit slot the ship is at, 0 when not at a planet.
    pub orbit: i32,
    pub dest_x: i32,
    pub dest_y: i32,
    pub dest_z: i32,
    pub arrived_via_wormhole: i32,
    pub just_jumped: i32,
    /// Colony sequence position, 9999 for the homeworld, 0 when unset.
    pub loading_point: i32,
    pub unloading_point: i32,
    pub remaining_cost: i32,
    pub special: i32,
    /// Inventory quantities by item slot.
    pub item_quantity: Vec<i32>,
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// The full read-only snapshot of one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub galaxy: Galaxy,
    /// Star systems in store order.
    pub stars: Vec<StarRecord>,
    /// Flat planet table, indexed by the stars' `planet_index` fields.
    pub planets: Vec<PlanetRecord>,
    /// Species roster in store order.
    pub species: Vec<SpeciesRecord>,
}

impl Snapshot {
    /// Planets of one system, as a slice of the flat planet table.
    ///
    /// Out-of-range indexes (a malformed snapshot) yield an empty slice
    /// rather than a panic; the exporter trusts but never indexes blindly.
    #[must_use]
    pub fn planets_of(&self, star: &StarRecord) -> &[PlanetRecord] {
        let start = star.planet_index.max(0) as usize;
        let end = start.saturating_add(star.num_planets.max(0) as usize);
        if start > self.planets.len() {
            return &[];
        }
        &self.planets[start..end.min(self.planets.len())]
    }
}

// =============================================================================
// TESTS
// =============================================================================
