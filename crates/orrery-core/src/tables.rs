//! # Innate Reference Tables
//!
//! Hardcoded runtime constants and reference tables for the Orrery core.
//!
//! The simulation store records codes (gas indexes, item slots, tech
//! tracks, ship classes) positionally; these tables translate positions
//! into the display codes the export document carries. They are compiled
//! into the binary and immutable at runtime.

// =============================================================================
// CAPACITY CONSTANTS
// =============================================================================

/// Maximum number of species a cluster can hold.
pub const MAX_SPECIES: usize = 100;

/// Number of `u32` words in a packed relation set (one bit per species).
pub const NUM_CONTACT_WORDS: usize = MAX_SPECIES.div_ceil(32);

/// Number of inventory item slots per colony or ship.
pub const MAX_ITEMS: usize = 38;

/// Number of atmospheric gas slots per planet.
pub const MAX_PLANET_GASES: usize = 4;

/// Number of neutral/poison gas slots per species.
pub const MAX_SPECIES_GASES: usize = 6;

/// Number of technology tracks.
pub const NUM_TECH: usize = 6;

// =============================================================================
// SENTINELS
// =============================================================================

/// Loading/unloading point sentinel that resolves to the homeworld colony.
pub const HOMEWORLD_POINT: i32 = 9999;

/// Name given to deleted ship slots; such slots end the logical sequence
/// of live ships and are skipped by the builder.
pub const UNUSED_SHIP_NAME: &str = "Unused";

// =============================================================================
// SHIP STATUS CODES
// =============================================================================

pub const UNDER_CONSTRUCTION: i32 = 0;
pub const ON_SURFACE: i32 = 1;
pub const IN_ORBIT: i32 = 2;
pub const IN_DEEP_SPACE: i32 = 3;
pub const JUMPED_IN_COMBAT: i32 = 4;
pub const FORCED_JUMP: i32 = 5;

// =============================================================================
// PLANET SPECIAL CODES
// =============================================================================

pub const IDEAL_HOME_PLANET: i32 = 1;
pub const IDEAL_COLONY_PLANET: i32 = 2;
pub const RADIOACTIVE_HELLHOLE: i32 = 3;

// =============================================================================
// REFERENCE TABLES
// =============================================================================

/// Gas display codes, indexed by the store's gas code. Index 0 is the
/// empty slot and must never appear in an exported gas entry.
pub const GAS_CODES: [&str; 14] = [
    "", "H2", "CH4", "He", "NH3", "N2", "CO2", "O2", "HCl", "Cl2", "F2", "H2O", "SO2", "H2S",
];

/// Technology track codes, in store order.
pub const TECH_CODES: [&str; NUM_TECH] = ["MI", "MA", "ML", "GV", "LS", "BI"];

/// Technology track display names, in store order.
pub const TECH_NAMES: [&str; NUM_TECH] = [
    "Mining",
    "Manufacturing",
    "Military",
    "Gravitics",
    "Life Support",
    "Biology",
];

/// Inventory item codes, indexed by inventory slot.
pub const ITEM_CODES: [&str; MAX_ITEMS] = [
    "RM", "PD", "SU", "DR", "CU", "IU", "AU", "FS", "JP", "FM", "FJ", "GT", "FD", "TP", "GW",
    "SG1", "SG2", "SG3", "SG4", "SG5", "SG6", "SG7", "SG8", "SG9", "GU1", "GU2", "GU3", "GU4",
    "GU5", "GU6", "GU7", "GU8", "GU9", "X1", "X2", "X3", "X4", "X5",
];

/// Ship class abbreviations, indexed by the store's class code.
pub const SHIP_CLASS_ABBR: [&str; 18] = [
    "PB", "CT", "ES", "FF", "DD", "CL", "CS", "CA", "CC", "BC", "BS", "DN", "SD", "BM", "BW",
    "BR", "BA", "TR",
];

/// Class code of a starbase (the only class with meaningful tonnage).
pub const SHIP_CLASS_STARBASE: i32 = 16;

/// Class code of a transport (tonnage is part of its display name).
pub const SHIP_CLASS_TRANSPORT: i32 = 17;

/// Drive suffix appended to the class abbreviation, indexed by the
/// store's drive type (FTL, sub-light, starbase).
pub const SHIP_DRIVE_SUFFIX: [&str; 3] = ["", "S", "S"];

// =============================================================================
// SNAPSHOT FORMAT
// =============================================================================

/// Magic bytes for the Orrery binary snapshot header.
pub const MAGIC_BYTES: &[u8; 4] = b"ORRY";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the snapshot layout.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum allowed snapshot payload size (100 MB).
///
/// Validated before deserialization to prevent allocation exhaustion
/// from corrupted headers.
pub const MAX_SNAPSHOT_PAYLOAD_SIZE: usize = 100 * 1024 * 1024;
