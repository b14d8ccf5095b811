// crates/geocity-core/src/reverse.rs

//! Reverse lookup: nearest meaningful city for a coordinate pair.
//!
//! The query point's level-10 cell plus a 2-ring of edge neighbors (up to
//! 13 distinct cells) bounds the search. Two filters shape the answer: a
//! hard ~100 km cutoff so that open-ocean and polar queries return "no
//! match", and a neighborhood override so that a coordinate inside a
//! suburb resolves to the big city around it rather than the suburb
//! record itself.

use crate::index::{CellIndex, CELL_LEVEL};
use crate::model::CityRecord;
use crate::s2::{angular_distance, CellId};
use std::collections::HashSet;

/// Hard distance cutoff, ~100 km in radians on the unit sphere.
pub const MAX_MATCH_RADIUS: f64 = 0.0157;
/// Radius within which a much larger neighbor overrides a small best
/// match, ~10 km.
const OVERRIDE_RADIUS: f64 = 0.00157;
/// Population below which the best match is suspected to be a
/// neighborhood rather than a city proper.
const OVERRIDE_POPULATION: u64 = 500_000;
/// A neighbor must be at least this many times more populous to take
/// over.
const OVERRIDE_FACTOR: u64 = 10;

pub fn resolve(cities: &[CityRecord], cells: &CellIndex, lat: f64, lng: f64) -> CityRecord {
    if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        return CityRecord::empty();
    }

    let (lat_rad, lng_rad) = (lat.to_radians(), lng.to_radians());
    let query_cell =
        CellId::from_lat_lng(lat_rad, lng_rad).parent_at_level(CELL_LEVEL);

    let mut search: HashSet<CellId> = HashSet::new();
    search.insert(query_cell);
    for ring in query_cell.edge_neighbors() {
        search.insert(ring);
        search.extend(ring.edge_neighbors());
    }

    let mut ranked: Vec<(u32, f64)> = Vec::new();
    for cell in search {
        for &id in cells.get(cell) {
            let city = &cities[id as usize];
            let distance = angular_distance(
                lat_rad,
                lng_rad,
                city.latitude.to_radians(),
                city.longitude.to_radians(),
            );
            ranked.push((id, distance));
        }
    }
    if ranked.is_empty() {
        return CityRecord::empty();
    }
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let (best_id, best_distance) = ranked[0];
    if best_distance > MAX_MATCH_RADIUS {
        return CityRecord::empty();
    }

    let mut best = &cities[best_id as usize];
    if best.population < OVERRIDE_POPULATION {
        for &(id, distance) in &ranked[1..] {
            if distance > OVERRIDE_RADIUS {
                break;
            }
            let candidate = &cities[id as usize];
            if candidate.population >= best.population.saturating_mul(OVERRIDE_FACTOR) {
                best = candidate;
                break;
            }
        }
    }
    best.clone()
}
