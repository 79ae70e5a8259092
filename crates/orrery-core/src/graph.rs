//! # Extraction / Graph Builder
//!
//! Walks the snapshot's record collections and produces the transient,
//! fully-resolved export graph: every implicit reference in the store
//! (coordinate equality, positional sentinel codes, bit-indexed relation
//! sets, sentinel-terminated ship slots) is replaced by an explicit
//! reference or an explicit list.
//!
//! Building is a single pure read of the snapshot. Resolution is always
//! "first match in store order wins"; an unresolved reference is a valid
//! state, left unset and rendered later in its fallback form.

use crate::relations::decode_relation;
use crate::store::{ColonyRecord, PlanetRecord, ShipRecord, Snapshot, SpeciesRecord, StarRecord};
use crate::tables::{
    FORCED_JUMP, GAS_CODES, HOMEWORLD_POINT, IDEAL_COLONY_PLANET, IDEAL_HOME_PLANET, IN_DEEP_SPACE,
    IN_ORBIT, ITEM_CODES, JUMPED_IN_COMBAT, MAX_ITEMS, ON_SURFACE, RADIOACTIVE_HELLHOLE,
    SHIP_CLASS_ABBR, SHIP_CLASS_STARBASE, SHIP_CLASS_TRANSPORT, SHIP_DRIVE_SUFFIX, TECH_CODES,
    TECH_NAMES, UNDER_CONSTRUCTION, UNUSED_SHIP_NAME,
};
use crate::types::Coords;

// =============================================================================
// EXPORT GRAPH ENTITIES
// =============================================================================

/// One export unit: the whole turn-state, fully cross-referenced.
///
/// Lives only for the duration of the export call and is consumed by the
/// document marshaller ([`crate::marshal`]).
#[derive(Debug, Clone)]
pub struct ExportGraph {
    pub turn: i32,
    pub cluster: Cluster,
    pub species: Vec<Species>,
}

/// Galaxy-wide constants and the system sequence, in store order.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub radius: i32,
    pub d_num_species: i32,
    pub num_species: i32,
    pub systems: Vec<System>,
}

/// A star system with its planets and decoded visitation list.
#[derive(Debug, Clone)]
pub struct System {
    pub id: i32,
    pub coords: Coords,
    pub star_type: i32,
    pub color: i32,
    pub size: i32,
    pub home_system: bool,
    /// Id of the system at the far end of a wormhole here, 0 for none.
    pub wormhole_exit: i32,
    pub message: i32,
    /// Species ids that have visited this system, ascending.
    pub visited_by: Vec<u16>,
    pub planets: Vec<Planet>,
}

/// A planet with its gas list and decoded special flags.
///
/// The three special flags come from one source code and are therefore
/// mutually exclusive.
#[derive(Debug, Clone)]
pub struct Planet {
    pub id: i32,
    pub orbit: i32,
    pub diameter: i32,
    pub econ_efficiency: i32,
    pub gravity: i32,
    pub mining_difficulty: i32,
    pub md_increase: i32,
    pub pressure_class: i32,
    pub temperature_class: i32,
    pub ideal_home_planet: bool,
    pub ideal_colony_planet: bool,
    pub radioactive_hellhole: bool,
    pub message: i32,
    pub gases: Vec<Gas>,
}

/// One atmospheric component. On a planet it carries a percentage; in a
/// species' requirement list it carries a tolerance band instead.
#[derive(Debug, Clone)]
pub struct Gas {
    pub code: &'static str,
    pub atmos_pct: i32,
    pub min_pct: i32,
    pub max_pct: i32,
    pub required: bool,
}

/// A species with everything it owns, relations already decoded.
#[derive(Debug, Clone)]
pub struct Species {
    pub id: i32,
    pub name: String,
    pub govt_name: String,
    pub govt_type: String,
    pub auto_orders: bool,
    pub econ_units: i32,
    pub hp_original_base: i32,
    pub skills: Vec<Skill>,
    pub required_gases: Vec<Gas>,
    pub neutral_gases: Vec<Gas>,
    pub poison_gases: Vec<Gas>,
    pub contacts: Vec<u16>,
    pub allies: Vec<u16>,
    pub enemies: Vec<u16>,
    pub colonies: Vec<Colony>,
    pub ships: Vec<Ship>,
}

/// One technology track of a species.
#[derive(Debug, Clone)]
pub struct Skill {
    pub code: &'static str,
    pub name: &'static str,
    pub init_level: i32,
    pub current_level: i32,
    pub knowledge_level: i32,
    pub xps: i32,
}

/// A settlement of a species. The first colony in the sequence is the
/// species' homeworld by construction.
#[derive(Debug, Clone)]
pub struct Colony {
    pub id: i32,
    pub name: String,
    pub homeworld: bool,
    pub hiding: bool,
    pub hidden: bool,
    /// Id of the resolved system, unset when no coordinate match exists.
    pub system_id: Option<i32>,
    /// Orbit of the resolved planet within that system.
    pub orbit: Option<i32>,
    /// Coordinates of the resolved system; ships are matched to colonies
    /// through these, not through the document fields.
    pub coords: Option<Coords>,
    pub inventory: Vec<Item>,
    pub develop: Vec<DevelopOrder>,
    pub ma_base: i32,
    pub mi_base: i32,
    pub pop_units: i32,
    pub siege_eff: i32,
    pub special: i32,
    pub use_on_ambush: bool,
    pub message: i32,
}

/// A vessel of a species. `name` is the full display name.
#[derive(Debug, Clone)]
pub struct Ship {
    pub name: String,
    pub age: i32,
    pub arrived_via_wormhole: bool,
    pub just_jumped: bool,
    pub status: i32,
    pub location: Location,
    pub destination: Location,
    pub loading_point: Option<String>,
    pub unloading_point: Option<String>,
    pub remaining_cost: i32,
    pub special: i32,
    /// Meaningful only for starbases; 0 otherwise.
    pub tonnage: i32,
    pub inventory: Vec<Item>,
}

/// One non-zero inventory line.
#[derive(Debug, Clone)]
pub struct Item {
    pub code: &'static str,
    pub quantity: i32,
}

/// A pending AU/IU installation order.
#[derive(Debug, Clone)]
pub struct DevelopOrder {
    pub code: &'static str,
    pub auto_install: bool,
    pub units_needed: i32,
    pub units_to_install: i32,
}

/// A spatial reference: either a colony name or raw coordinates plus an
/// orbit, with at most one travel-status flag. Exactly one positional
/// form is rendered per use site.
#[derive(Debug, Clone, Default)]
pub struct Location {
    pub colony: Option<String>,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub orbit: i32,
    pub deep_space: bool,
    pub in_orbit: bool,
    pub on_surface: bool,
}

// =============================================================================
// BUILDER
// =============================================================================

impl ExportGraph {
    /// Build the fully-resolved export graph from a snapshot.
    ///
    /// A single pure read: the snapshot is never mutated, and no state
    /// survives the call. The snapshot is trusted to be internally
    /// consistent; unresolved references are kept, not repaired.
    #[must_use]
    pub fn build(snapshot: &Snapshot) -> Self {
        let participants = snapshot.galaxy.num_species.max(0) as usize;

        let systems: Vec<System> = snapshot
            .stars
            .iter()
            .map(|star| build_system(snapshot, star, participants))
            .collect();

        let species: Vec<Species> = snapshot
            .species
            .iter()
            .map(|sp| build_species(sp, &systems, participants))
            .collect();

        tracing::debug!(
            turn = snapshot.galaxy.turn_number,
            systems = systems.len(),
            species = species.len(),
            "built export graph"
        );

        Self {
            turn: snapshot.galaxy.turn_number,
            cluster: Cluster {
                radius: snapshot.galaxy.radius,
                d_num_species: snapshot.galaxy.d_num_species,
                num_species: snapshot.galaxy.num_species,
                systems,
            },
            species,
        }
    }
}

fn build_system(snapshot: &Snapshot, star: &StarRecord, participants: usize) -> System {
    let planets = snapshot.planets_of(star).iter().map(build_planet).collect();

    // A wormhole exit is stored only as raw coordinates; resolve it to
    // the exit system's id, first match in store order.
    let wormhole_exit = if star.worm_here != 0 {
        let exit = Coords::new(star.worm_x, star.worm_y, star.worm_z);
        snapshot
            .stars
            .iter()
            .find(|s| Coords::new(s.x, s.y, s.z) == exit)
            .map_or(0, |s| s.id)
    } else {
        0
    };

    System {
        id: star.id,
        coords: Coords::new(star.x, star.y, star.z),
        star_type: star.star_type,
        color: star.color,
        size: star.size,
        home_system: star.home_system != 0,
        wormhole_exit,
        message: star.message,
        visited_by: decode_relation(&star.visited_by, None, participants),
        planets,
    }
}

fn build_planet(planet: &PlanetRecord) -> Planet {
    let mut gases = Vec::new();
    // Planet gas slots may be sparse; keep every non-empty slot in
    // original slot order, with its percentage.
    for (slot, &gas) in planet.gas.iter().enumerate() {
        if gas != 0 {
            gases.push(Gas {
                code: gas_code(gas),
                atmos_pct: planet.gas_percent[slot],
                min_pct: 0,
                max_pct: 0,
                required: false,
            });
        }
    }

    Planet {
        id: planet.id,
        orbit: planet.orbit,
        diameter: planet.diameter,
        econ_efficiency: planet.econ_efficiency,
        gravity: planet.gravity,
        mining_difficulty: planet.mining_difficulty,
        md_increase: planet.md_increase,
        pressure_class: planet.pressure_class,
        temperature_class: planet.temperature_class,
        ideal_home_planet: planet.special == IDEAL_HOME_PLANET,
        ideal_colony_planet: planet.special == IDEAL_COLONY_PLANET,
        radioactive_hellhole: planet.special == RADIOACTIVE_HELLHOLE,
        message: planet.message,
        gases,
    }
}

fn build_species(sp: &SpeciesRecord, systems: &[System], participants: usize) -> Species {
    let skills = (0..TECH_CODES.len())
        .map(|l| Skill {
            code: TECH_CODES[l],
            name: TECH_NAMES[l],
            init_level: sp.init_tech_level[l],
            current_level: sp.tech_level[l],
            knowledge_level: sp.tech_knowledge[l],
            xps: sp.tech_eps[l],
        })
        .collect();

    let required_gases = if sp.required_gas != 0 {
        vec![Gas {
            code: gas_code(sp.required_gas),
            atmos_pct: 0,
            min_pct: sp.required_gas_min,
            max_pct: sp.required_gas_max,
            required: true,
        }]
    } else {
        Vec::new()
    };

    let self_id = sp.id.max(0) as u16;
    let colonies: Vec<Colony> = sp
        .namplas
        .iter()
        .enumerate()
        .map(|(n, colony)| build_colony(colony, n == 0, systems))
        .collect();
    let ships = sp
        .ships
        .iter()
        .filter(|ship| ship.name != UNUSED_SHIP_NAME)
        .map(|ship| build_ship(ship, &colonies))
        .collect();

    Species {
        id: sp.id,
        name: sp.name.clone(),
        govt_name: sp.govt_name.clone(),
        govt_type: sp.govt_type.clone(),
        auto_orders: sp.auto_orders != 0,
        econ_units: sp.econ_units,
        hp_original_base: sp.hp_original_base,
        skills,
        required_gases,
        neutral_gases: species_gas_list(&sp.neutral_gas),
        poison_gases: species_gas_list(&sp.poison_gas),
        contacts: decode_relation(&sp.contact, Some(self_id), participants),
        allies: decode_relation(&sp.ally, Some(self_id), participants),
        enemies: decode_relation(&sp.enemy, Some(self_id), participants),
        colonies,
        ships,
    }
}

/// Neutral/poison gas slots are gap-free by construction; the list ends
/// at the first empty slot.
fn species_gas_list(slots: &[i32]) -> Vec<Gas> {
    let mut gases = Vec::new();
    for &gas in slots {
        if gas == 0 {
            break;
        }
        gases.push(Gas {
            code: gas_code(gas),
            atmos_pct: 0,
            min_pct: 0,
            max_pct: 0,
            required: false,
        });
    }
    gases
}

fn build_colony(colony: &ColonyRecord, homeworld: bool, systems: &[System]) -> Colony {
    // The store keeps only raw coordinates and an orbit slot; resolve to
    // the first system with matching coordinates, then to the first
    // planet with a matching orbit. No match leaves the reference unset.
    let stored = Coords::new(colony.x, colony.y, colony.z);
    let system = systems.iter().find(|s| s.coords == stored);
    let orbit = system.and_then(|s| {
        s.planets
            .iter()
            .find(|p| p.orbit == colony.orbit)
            .map(|p| p.orbit)
    });
    if system.is_none() {
        tracing::warn!(colony = %colony.name, x = colony.x, y = colony.y, z = colony.z,
            "colony coordinates match no system; exporting unlocated");
    }

    let mut develop = Vec::new();
    if colony.auto_aus != 0 || colony.aus_needed != 0 || colony.aus_to_install != 0 {
        develop.push(DevelopOrder {
            code: "AU",
            auto_install: colony.auto_aus != 0,
            units_needed: colony.aus_needed,
            units_to_install: colony.aus_to_install,
        });
    }
    if colony.auto_ius != 0 || colony.ius_needed != 0 || colony.ius_to_install != 0 {
        develop.push(DevelopOrder {
            code: "IU",
            auto_install: colony.auto_ius != 0,
            units_needed: colony.ius_needed,
            units_to_install: colony.ius_to_install,
        });
    }

    Colony {
        id: colony.id,
        name: colony.name.clone(),
        homeworld,
        hiding: colony.hiding != 0,
        hidden: colony.hidden != 0,
        system_id: system.map(|s| s.id),
        orbit,
        coords: system.map(|s| s.coords),
        inventory: build_inventory(&colony.item_quantity),
        develop,
        ma_base: colony.ma_base,
        mi_base: colony.mi_base,
        pop_units: colony.pop_units,
        siege_eff: colony.siege_eff,
        special: colony.special,
        use_on_ambush: colony.use_on_ambush != 0,
        message: colony.message,
    }
}

fn build_ship(ship: &ShipRecord, colonies: &[Colony]) -> Ship {
    // A ship's displayed location is the name of the first colony whose
    // resolved system coordinates equal the ship's raw coordinates; the
    // orbit is deliberately not compared. Without a match the location
    // falls back to raw coordinates plus the travel-status flag.
    let at = Coords::new(ship.x, ship.y, ship.z);
    let colony_name = colonies
        .iter()
        .find(|c| c.coords == Some(at))
        .map(|c| c.name.clone());

    let location = Location {
        colony: colony_name,
        x: ship.x,
        y: ship.y,
        z: ship.z,
        orbit: ship.orbit,
        deep_space: ship.status == IN_DEEP_SPACE,
        in_orbit: ship.status == IN_ORBIT,
        on_surface: ship.status == ON_SURFACE,
    };

    let destination = Location {
        x: ship.dest_x,
        y: ship.dest_y,
        z: ship.dest_z,
        ..Location::default()
    };

    Ship {
        name: ship_display_name(ship),
        age: ship.age,
        arrived_via_wormhole: ship.arrived_via_wormhole != 0,
        just_jumped: ship.just_jumped != 0,
        status: ship.status,
        location,
        destination,
        loading_point: resolve_transfer_point(ship.loading_point, colonies),
        unloading_point: resolve_transfer_point(ship.unloading_point, colonies),
        remaining_cost: ship.remaining_cost,
        special: ship.special,
        tonnage: if ship.class == SHIP_CLASS_STARBASE {
            ship.tonnage
        } else {
            0
        },
        inventory: build_inventory(&ship.item_quantity),
    }
}

/// Resolve a loading/unloading point sentinel to a colony name.
///
/// 9999 means the homeworld (first colony), a positive value is a
/// position in the colony sequence, and 0 means unset. An out-of-range
/// position is treated as unset rather than repaired.
fn resolve_transfer_point(point: i32, colonies: &[Colony]) -> Option<String> {
    if point == HOMEWORLD_POINT {
        colonies.first().map(|c| c.name.clone())
    } else if point > 0 {
        colonies.get(point as usize).map(|c| c.name.clone())
    } else {
        None
    }
}

/// Collect the non-zero inventory lines, in item-slot order.
fn build_inventory(quantities: &[i32]) -> Vec<Item> {
    quantities
        .iter()
        .take(MAX_ITEMS)
        .enumerate()
        .filter(|&(_, &qty)| qty != 0)
        .map(|(slot, &qty)| Item {
            code: ITEM_CODES[slot],
            quantity: qty,
        })
        .collect()
}

/// Full display name of a ship: class abbreviation (with tonnage for
/// transports), drive suffix, bare name, and a construction marker.
fn ship_display_name(ship: &ShipRecord) -> String {
    let class = SHIP_CLASS_ABBR
        .get(ship.class.max(0) as usize)
        .copied()
        .unwrap_or("");
    let suffix = SHIP_DRIVE_SUFFIX
        .get(ship.drive.max(0) as usize)
        .copied()
        .unwrap_or("");
    let mut name = if ship.class == SHIP_CLASS_TRANSPORT {
        format!("{class}{}{suffix} {}", ship.tonnage, ship.name)
    } else {
        format!("{class}{suffix} {}", ship.name)
    };
    if ship.status == UNDER_CONSTRUCTION {
        name.push_str(" (C)");
    }
    name
}

fn gas_code(code: i32) -> &'static str {
    GAS_CODES.get(code.max(0) as usize).copied().unwrap_or("")
}

/// True if the status code means the ship was thrown off course.
#[must_use]
pub fn is_forced_jump(status: i32) -> bool {
    status == FORCED_JUMP
}

/// True if the status code means the ship jumped mid-combat.
#[must_use]
pub fn is_jumped_in_combat(status: i32) -> bool {
    status == JUMPED_IN_COMBAT
}

/// True if the status code means the ship is still being built.
#[must_use]
pub fn is_under_construction(status: i32) -> bool {
    status == UNDER_CONSTRUCTION
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::store::Galaxy;

    fn star(id: i32, x: i32, y: i32, z: i32, planet_index: i32, num_planets: i32) -> StarRecord {
        StarRecord {
            id,
            x,
            y,
            z,
            planet_index,
            num_planets,
            ..Default::default()
        }
    }

    fn planet(id: i32, orbit: i32) -> PlanetRecord {
        PlanetRecord {
            id,
            orbit,
            ..Default::default()
        }
    }

    fn colony_at(name: &str, x: i32, y: i32, z: i32, orbit: i32) -> ColonyRecord {
        ColonyRecord {
            name: name.to_string(),
            x,
            y,
            z,
            orbit,
            ..Default::default()
        }
    }

    fn base_snapshot() -> Snapshot {
        Snapshot {
            galaxy: Galaxy {
                turn_number: 12,
                radius: 10,
                d_num_species: 4,
                num_species: 2,
            },
            stars: vec![star(1, 10, 20, 30, 0, 2), star(2, 4, 5, 6, 2, 1)],
            planets: vec![planet(101, 1), planet(102, 2), planet(201, 1)],
            species: vec![SpeciesRecord {
                id: 1,
                name: "Tharn".to_string(),
                govt_name: "The Council".to_string(),
                govt_type: "Oligarchy".to_string(),
                required_gas: 7,
                required_gas_min: 10,
                required_gas_max: 60,
                namplas: vec![
                    colony_at("Homeworld", 10, 20, 30, 1),
                    colony_at("Outpost", 4, 5, 6, 1),
                ],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn colony_resolves_to_system_and_planet() {
        let graph = ExportGraph::build(&base_snapshot());
        let home = &graph.species[0].colonies[0];
        assert_eq!(home.system_id, Some(1));
        assert_eq!(home.orbit, Some(1));
        assert_eq!(home.coords, Some(Coords::new(10, 20, 30)));
        assert!(home.homeworld);
        assert!(!graph.species[0].colonies[1].homeworld);
    }

    #[test]
    fn unmatched_colony_coordinates_leave_reference_unset() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].namplas[0].x = 99;
        let graph = ExportGraph::build(&snapshot);
        let home = &graph.species[0].colonies[0];
        assert_eq!(home.system_id, None);
        assert_eq!(home.orbit, None);
        assert_eq!(home.coords, None);
    }

    #[test]
    fn unmatched_orbit_still_resolves_the_system() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].namplas[0].orbit = 9;
        let graph = ExportGraph::build(&snapshot);
        let home = &graph.species[0].colonies[0];
        assert_eq!(home.system_id, Some(1));
        assert_eq!(home.orbit, None);
    }

    #[test]
    fn ship_location_takes_first_colony_at_matching_system() {
        let mut snapshot = base_snapshot();
        // Second colony in the same system: first declared name wins.
        snapshot.species[0]
            .namplas
            .push(colony_at("Annex", 10, 20, 30, 2));
        snapshot.species[0].ships.push(ShipRecord {
            name: "Nimble".to_string(),
            x: 10,
            y: 20,
            z: 30,
            orbit: 2,
            status: IN_ORBIT,
            ..Default::default()
        });
        let graph = ExportGraph::build(&snapshot);
        let ship = &graph.species[0].ships[0];
        assert_eq!(ship.location.colony.as_deref(), Some("Homeworld"));
        assert!(ship.location.in_orbit);
        assert!(!ship.location.deep_space);
    }

    #[test]
    fn ship_without_colony_match_keeps_raw_coordinates() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].ships.push(ShipRecord {
            name: "Wanderer".to_string(),
            x: 7,
            y: 8,
            z: 9,
            status: IN_DEEP_SPACE,
            ..Default::default()
        });
        let graph = ExportGraph::build(&snapshot);
        let ship = &graph.species[0].ships[0];
        assert_eq!(ship.location.colony, None);
        assert_eq!(
            (ship.location.x, ship.location.y, ship.location.z),
            (7, 8, 9)
        );
        assert!(ship.location.deep_space);
    }

    #[test]
    fn unused_ship_slots_are_skipped() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].ships = vec![
            ShipRecord {
                name: "Alpha".to_string(),
                class: 2,
                status: IN_DEEP_SPACE,
                ..Default::default()
            },
            ShipRecord {
                name: UNUSED_SHIP_NAME.to_string(),
                ..Default::default()
            },
            ShipRecord {
                name: "Beta".to_string(),
                class: 2,
                status: IN_DEEP_SPACE,
                ..Default::default()
            },
        ];
        let graph = ExportGraph::build(&snapshot);
        let names: Vec<&str> = graph.species[0]
            .ships
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["ES Alpha", "ES Beta"]);
    }

    #[test]
    fn transfer_point_sentinels_resolve() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].ships.push(ShipRecord {
            name: "Hauler".to_string(),
            loading_point: HOMEWORLD_POINT,
            unloading_point: 1,
            status: IN_DEEP_SPACE,
            ..Default::default()
        });
        snapshot.species[0].ships.push(ShipRecord {
            name: "Idle".to_string(),
            loading_point: 0,
            unloading_point: 40, // out of range: treated as unset
            status: IN_DEEP_SPACE,
            ..Default::default()
        });
        let graph = ExportGraph::build(&snapshot);
        let hauler = &graph.species[0].ships[0];
        assert_eq!(hauler.loading_point.as_deref(), Some("Homeworld"));
        assert_eq!(hauler.unloading_point.as_deref(), Some("Outpost"));
        let idle = &graph.species[0].ships[1];
        assert_eq!(idle.loading_point, None);
        assert_eq!(idle.unloading_point, None);
    }

    #[test]
    fn wormhole_exit_resolves_by_coordinates() {
        let mut snapshot = base_snapshot();
        snapshot.stars[0].worm_here = 1;
        snapshot.stars[0].worm_x = 4;
        snapshot.stars[0].worm_y = 5;
        snapshot.stars[0].worm_z = 6;
        let graph = ExportGraph::build(&snapshot);
        assert_eq!(graph.cluster.systems[0].wormhole_exit, 2);
        assert_eq!(graph.cluster.systems[1].wormhole_exit, 0);
    }

    #[test]
    fn relations_exclude_own_species() {
        let mut snapshot = base_snapshot();
        // Bits 0 and 1 set: species 1 and 2. Own id 1 must be dropped.
        snapshot.species[0].contact = [0b11, 0, 0, 0];
        snapshot.species[0].enemy = [0b10, 0, 0, 0];
        let graph = ExportGraph::build(&snapshot);
        assert_eq!(graph.species[0].contacts, vec![2]);
        assert_eq!(graph.species[0].enemies, vec![2]);
        assert!(graph.species[0].allies.is_empty());
    }

    #[test]
    fn visited_by_respects_roster_size() {
        let mut snapshot = base_snapshot();
        // Bit 2 would be species 3, beyond the 2-species roster.
        snapshot.stars[0].visited_by = [0b101, 0, 0, 0];
        let graph = ExportGraph::build(&snapshot);
        assert_eq!(graph.cluster.systems[0].visited_by, vec![1]);
    }

    #[test]
    fn planet_gas_slots_keep_order_and_skip_gaps() {
        let mut snapshot = base_snapshot();
        snapshot.planets[0].gas = [5, 0, 7, 2];
        snapshot.planets[0].gas_percent = [70, 0, 25, 5];
        let graph = ExportGraph::build(&snapshot);
        let gases = &graph.cluster.systems[0].planets[0].gases;
        let codes: Vec<&str> = gases.iter().map(|g| g.code).collect();
        assert_eq!(codes, vec!["N2", "O2", "CH4"]);
        assert_eq!(gases[0].atmos_pct, 70);
    }

    #[test]
    fn species_gas_lists_stop_at_first_empty_slot() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].neutral_gas = [1, 3, 0, 9, 0, 0];
        let graph = ExportGraph::build(&snapshot);
        let codes: Vec<&str> = graph.species[0].neutral_gases.iter().map(|g| g.code).collect();
        assert_eq!(codes, vec!["H2", "He"]);
    }

    #[test]
    fn required_gas_carries_band_and_flag() {
        let graph = ExportGraph::build(&base_snapshot());
        let required = &graph.species[0].required_gases;
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].code, "O2");
        assert_eq!((required[0].min_pct, required[0].max_pct), (10, 60));
        assert!(required[0].required);
    }

    #[test]
    fn develop_orders_present_only_when_any_field_set() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].namplas[0].ius_needed = 50;
        let graph = ExportGraph::build(&snapshot);
        let develop = &graph.species[0].colonies[0].develop;
        assert_eq!(develop.len(), 1);
        assert_eq!(develop[0].code, "IU");
        assert_eq!(develop[0].units_needed, 50);
        assert!(graph.species[0].colonies[1].develop.is_empty());
    }

    #[test]
    fn planet_special_flags_are_mutually_exclusive() {
        let mut snapshot = base_snapshot();
        snapshot.planets[0].special = RADIOACTIVE_HELLHOLE;
        let graph = ExportGraph::build(&snapshot);
        let p = &graph.cluster.systems[0].planets[0];
        assert!(p.radioactive_hellhole);
        assert!(!p.ideal_home_planet);
        assert!(!p.ideal_colony_planet);
    }

    #[test]
    fn tonnage_kept_only_for_starbases() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].ships.push(ShipRecord {
            name: "Bastion".to_string(),
            class: SHIP_CLASS_STARBASE,
            drive: 2,
            tonnage: 10,
            status: IN_ORBIT,
            ..Default::default()
        });
        snapshot.species[0].ships.push(ShipRecord {
            name: "Mule".to_string(),
            class: SHIP_CLASS_TRANSPORT,
            tonnage: 5,
            status: IN_DEEP_SPACE,
            ..Default::default()
        });
        let graph = ExportGraph::build(&snapshot);
        assert_eq!(graph.species[0].ships[0].tonnage, 10);
        assert_eq!(graph.species[0].ships[0].name, "BAS Bastion");
        assert_eq!(graph.species[0].ships[1].tonnage, 0);
        assert_eq!(graph.species[0].ships[1].name, "TR5 Mule");
    }

    #[test]
    fn under_construction_marks_the_display_name() {
        let mut snapshot = base_snapshot();
        snapshot.species[0].ships.push(ShipRecord {
            name: "Unfinished".to_string(),
            class: 3,
            status: UNDER_CONSTRUCTION,
            ..Default::default()
        });
        let graph = ExportGraph::build(&snapshot);
        assert_eq!(graph.species[0].ships[0].name, "FF Unfinished (C)");
    }

    #[test]
    fn inventory_keeps_only_non_zero_slots() {
        let mut snapshot = base_snapshot();
        let mut quantities = vec![0; MAX_ITEMS];
        quantities[0] = 120; // RM
        quantities[6] = 3; // AU
        snapshot.species[0].namplas[0].item_quantity = quantities;
        let graph = ExportGraph::build(&snapshot);
        let inv = &graph.species[0].colonies[0].inventory;
        assert_eq!(inv.len(), 2);
        assert_eq!((inv[0].code, inv[0].quantity), ("RM", 120));
        assert_eq!((inv[1].code, inv[1].quantity), ("AU", 3));
    }
}
