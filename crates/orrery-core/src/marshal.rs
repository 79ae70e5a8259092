//! # Document Marshaller
//!
//! Maps the export graph onto the document tree: one pure function per
//! entity, composed bottom-up. The tree nodes are `serde_json` values;
//! with `preserve_order` enabled, map members serialize in insertion
//! order, which is what keeps the byte stream diff-stable across turns.
//!
//! Presence rule: a zero counter, false flag, empty string or empty
//! optional collection is omitted from the document entirely, never
//! emitted as an explicit zero/false/null. The collections whose absence
//! would be structurally ambiguous are always emitted, even when empty:
//! a system's planets, a planet's gases, a species' skills and gas
//! lists, its colonies and ships, the cluster's systems and the export's
//! species.

use crate::graph::{
    Cluster, Colony, DevelopOrder, ExportGraph, Gas, Item, Location, Planet, Ship, Skill, Species,
    System, is_forced_jump, is_jumped_in_combat, is_under_construction,
};
use serde_json::{Map, Value};

// =============================================================================
// MAP HELPERS
// =============================================================================

fn put(map: &mut Map<String, Value>, key: &str, value: Value) {
    map.insert(key.to_string(), value);
}

/// Numbers in this domain are always integers; zero means absent.
fn put_nonzero(map: &mut Map<String, Value>, key: &str, value: i32) {
    if value != 0 {
        put(map, key, Value::from(value));
    }
}

/// Flags are emitted only when set.
fn put_flag(map: &mut Map<String, Value>, key: &str, flag: bool) {
    if flag {
        put(map, key, Value::Bool(true));
    }
}

fn put_str(map: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.is_empty() {
        put(map, key, Value::from(value));
    }
}

// =============================================================================
// ROOT & CLUSTER
// =============================================================================

/// Marshal the whole export unit. The root members are always present.
#[must_use]
pub fn marshal_globals(graph: &ExportGraph) -> Value {
    let mut map = Map::new();
    put(&mut map, "turn", Value::from(graph.turn));
    put(&mut map, "cluster", marshal_cluster(&graph.cluster));
    put(
        &mut map,
        "species",
        Value::Array(graph.species.iter().map(marshal_species).collect()),
    );
    Value::Object(map)
}

fn marshal_cluster(cluster: &Cluster) -> Value {
    let mut map = Map::new();
    put(&mut map, "radius", Value::from(cluster.radius));
    put(&mut map, "d_num_species", Value::from(cluster.d_num_species));
    put(&mut map, "num_species", Value::from(cluster.num_species));
    put(
        &mut map,
        "systems",
        Value::Array(cluster.systems.iter().map(marshal_system).collect()),
    );
    Value::Object(map)
}

fn marshal_system(system: &System) -> Value {
    let mut map = Map::new();
    put_nonzero(&mut map, "id", system.id);
    let coords = Location {
        x: system.coords.x,
        y: system.coords.y,
        z: system.coords.z,
        ..Location::default()
    };
    put(&mut map, "coords", marshal_location(&coords));
    put_nonzero(&mut map, "type", system.star_type);
    put_nonzero(&mut map, "color", system.color);
    put_nonzero(&mut map, "size", system.size);
    put_flag(&mut map, "home_system", system.home_system);
    put_nonzero(&mut map, "message", system.message);
    put_nonzero(&mut map, "wormhole_exit", system.wormhole_exit);
    if !system.visited_by.is_empty() {
        put(&mut map, "visited_by", marshal_id_list(&system.visited_by));
    }
    put(
        &mut map,
        "planets",
        Value::Array(system.planets.iter().map(marshal_planet).collect()),
    );
    Value::Object(map)
}

fn marshal_planet(planet: &Planet) -> Value {
    let mut map = Map::new();
    put_nonzero(&mut map, "id", planet.id);
    put_nonzero(&mut map, "orbit", planet.orbit);
    put_nonzero(&mut map, "diameter", planet.diameter);
    put_nonzero(&mut map, "econ_efficiency", planet.econ_efficiency);
    put(
        &mut map,
        "gases",
        Value::Array(planet.gases.iter().map(marshal_gas).collect()),
    );
    put_nonzero(&mut map, "gravity", planet.gravity);
    put_flag(&mut map, "ideal_home_planet", planet.ideal_home_planet);
    put_flag(&mut map, "ideal_colony_planet", planet.ideal_colony_planet);
    put_nonzero(&mut map, "md_increase", planet.md_increase);
    put_nonzero(&mut map, "message", planet.message);
    put_nonzero(&mut map, "mining_difficulty", planet.mining_difficulty);
    put_nonzero(&mut map, "pressure_class", planet.pressure_class);
    put_flag(&mut map, "radioactive_hell_hole", planet.radioactive_hellhole);
    put_nonzero(&mut map, "temperature_class", planet.temperature_class);
    Value::Object(map)
}

fn marshal_gas(gas: &Gas) -> Value {
    let mut map = Map::new();
    put_str(&mut map, "code", gas.code);
    put_nonzero(&mut map, "atmos_pct", gas.atmos_pct);
    // The band is one fact: if either bound is set, emit both.
    if gas.min_pct != 0 || gas.max_pct != 0 {
        put(&mut map, "min_pct", Value::from(gas.min_pct));
        put(&mut map, "max_pct", Value::from(gas.max_pct));
    }
    put_flag(&mut map, "required", gas.required);
    Value::Object(map)
}

// =============================================================================
// SPECIES
// =============================================================================

fn marshal_species(species: &Species) -> Value {
    let mut map = Map::new();
    put_nonzero(&mut map, "sp", species.id);
    put_str(&mut map, "name", &species.name);
    put_str(&mut map, "govt_name", &species.govt_name);
    put_str(&mut map, "govt_type", &species.govt_type);
    put_flag(&mut map, "auto_orders", species.auto_orders);
    put_nonzero(&mut map, "econ_units", species.econ_units);
    put_nonzero(&mut map, "hp_original_base", species.hp_original_base);
    put(
        &mut map,
        "skills",
        Value::Array(species.skills.iter().map(marshal_skill).collect()),
    );
    put(
        &mut map,
        "required_gases",
        Value::Array(species.required_gases.iter().map(marshal_gas).collect()),
    );
    put(
        &mut map,
        "neutral_gases",
        Value::Array(species.neutral_gases.iter().map(marshal_gas).collect()),
    );
    put(
        &mut map,
        "poison_gases",
        Value::Array(species.poison_gases.iter().map(marshal_gas).collect()),
    );
    if !species.contacts.is_empty() {
        put(&mut map, "contacts", marshal_id_list(&species.contacts));
    }
    if !species.allies.is_empty() {
        put(&mut map, "allies", marshal_id_list(&species.allies));
    }
    if !species.enemies.is_empty() {
        put(&mut map, "enemies", marshal_id_list(&species.enemies));
    }
    put(
        &mut map,
        "colonies",
        Value::Array(species.colonies.iter().map(marshal_colony).collect()),
    );
    put(
        &mut map,
        "ships",
        Value::Array(species.ships.iter().map(marshal_ship).collect()),
    );
    Value::Object(map)
}

fn marshal_skill(skill: &Skill) -> Value {
    let mut map = Map::new();
    put_str(&mut map, "code", skill.code);
    put_str(&mut map, "name", skill.name);
    put_nonzero(&mut map, "init_level", skill.init_level);
    put_nonzero(&mut map, "current_level", skill.current_level);
    put_nonzero(&mut map, "knowledge_level", skill.knowledge_level);
    put_nonzero(&mut map, "xps", skill.xps);
    Value::Object(map)
}

fn marshal_id_list(ids: &[u16]) -> Value {
    Value::Array(ids.iter().map(|&id| Value::from(id)).collect())
}

// =============================================================================
// COLONIES
// =============================================================================

fn marshal_colony(colony: &Colony) -> Value {
    let mut map = Map::new();
    put_str(&mut map, "name", &colony.name);
    // The planet reference is meaningful only under a resolved system.
    if let Some(system_id) = colony.system_id {
        put(&mut map, "system", Value::from(system_id));
        if let Some(orbit) = colony.orbit {
            put(&mut map, "orbit", Value::from(orbit));
        }
    }
    put_flag(&mut map, "homeworld", colony.homeworld);
    put_flag(&mut map, "hidden", colony.hidden);
    put_flag(&mut map, "hiding", colony.hiding);
    if !colony.inventory.is_empty() {
        put(&mut map, "inventory", marshal_inventory(&colony.inventory));
    }
    if !colony.develop.is_empty() {
        put(
            &mut map,
            "develop",
            Value::Array(colony.develop.iter().map(marshal_develop).collect()),
        );
    }
    put_nonzero(&mut map, "ma_base", colony.ma_base);
    put_nonzero(&mut map, "message", colony.message);
    put_nonzero(&mut map, "mi_base", colony.mi_base);
    put_nonzero(&mut map, "pop_units", colony.pop_units);
    put_nonzero(&mut map, "siege_eff", colony.siege_eff);
    put_nonzero(&mut map, "special", colony.special);
    put_flag(&mut map, "use_on_ambush", colony.use_on_ambush);
    Value::Object(map)
}

fn marshal_develop(order: &DevelopOrder) -> Value {
    let mut map = Map::new();
    put_str(&mut map, "code", order.code);
    put_flag(&mut map, "auto_install", order.auto_install);
    put_nonzero(&mut map, "units_needed", order.units_needed);
    put_nonzero(&mut map, "units_to_install", order.units_to_install);
    Value::Object(map)
}

/// Inventory renders as a map of item code to quantity; only non-zero
/// lines exist in the graph, so every member is meaningful.
fn marshal_inventory(items: &[Item]) -> Value {
    let mut map = Map::new();
    for item in items {
        put(&mut map, item.code, Value::from(item.quantity));
    }
    Value::Object(map)
}

// =============================================================================
// SHIPS
// =============================================================================

fn marshal_ship(ship: &Ship) -> Value {
    let mut map = Map::new();
    put_str(&mut map, "name", &ship.name);
    put_nonzero(&mut map, "age", ship.age);
    put_flag(&mut map, "arrived_via_wormhole", ship.arrived_via_wormhole);
    put_flag(&mut map, "forced_jump", is_forced_jump(ship.status));
    if !ship.inventory.is_empty() {
        put(&mut map, "inventory", marshal_inventory(&ship.inventory));
    }
    put(&mut map, "location", marshal_location(&ship.location));
    // An unset destination is stored as all-zero coordinates.
    if ship.destination.x != 0 {
        put(&mut map, "destination", marshal_location(&ship.destination));
    }
    put_flag(&mut map, "jumped_in_combat", is_jumped_in_combat(ship.status));
    put_flag(&mut map, "just_jumped", ship.just_jumped);
    if let Some(ref point) = ship.loading_point {
        put_str(&mut map, "loading_point", point);
    }
    put_nonzero(&mut map, "remaining_cost", ship.remaining_cost);
    put_nonzero(&mut map, "tonnage", ship.tonnage);
    put_flag(&mut map, "under_construction", is_under_construction(ship.status));
    put_nonzero(&mut map, "special", ship.special);
    if let Some(ref point) = ship.unloading_point {
        put_str(&mut map, "unloading_point", point);
    }
    Value::Object(map)
}

/// Render a location as either a colony name or raw coordinates, never
/// both, followed by the travel-status flags (mutually exclusive by
/// construction, derived from one status code).
fn marshal_location(location: &Location) -> Value {
    let mut map = Map::new();
    match location.colony {
        Some(ref colony) => put_str(&mut map, "colony", colony),
        None => {
            put(&mut map, "x", Value::from(location.x));
            put(&mut map, "y", Value::from(location.y));
            put(&mut map, "z", Value::from(location.z));
            put_nonzero(&mut map, "orbit", location.orbit);
        }
    }
    put_flag(&mut map, "deep_space", location.deep_space);
    put_flag(&mut map, "in_orbit", location.in_orbit);
    put_flag(&mut map, "on_surface", location.on_surface);
    Value::Object(map)
}

// =============================================================================
// TESTS
// =============================================================================
