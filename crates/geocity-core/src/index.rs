// crates/geocity-core/src/index.rs

//! The two candidate-gathering indexes: name → city ids and spatial cell →
//! city ids. Both are built once from the sorted corpus and never mutate.

use crate::model::CityRecord;
use crate::s2::CellId;
use crate::text::lower;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Level-10 cells are the quantum of the reverse lookup: coarse enough that
/// a city and its suburbs share a cell, fine enough that a 2-ring
/// neighborhood stays in the low hundreds of candidates.
pub const CELL_LEVEL: u32 = 10;

/// Inverted index from lowercased name (primary and each comma-split alt
/// name) to the city indices carrying it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameIndex {
    entries: HashMap<String, Vec<u32>>,
}

impl NameIndex {
    /// Index every city's primary name plus each trimmed, non-empty
    /// comma-split alt name. Splitting happens on commas only; alt names
    /// routinely contain spaces ("Ho Chi Minh City") and splitting on
    /// whitespace would shred them.
    pub fn build(cities: &[CityRecord]) -> Self {
        let mut index = Self::default();
        for (i, city) in cities.iter().enumerate() {
            if city.city.is_empty() {
                continue;
            }
            index.insert(&lower(&city.city), i as u32);
            for alt in city.alt_names() {
                index.insert(&lower(alt), i as u32);
            }
        }
        index
    }

    fn insert(&mut self, key: &str, id: u32) {
        let ids = self.entries.entry(key.to_string()).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// All city indices stored under `key_lower`. Unknown keys yield an
    /// empty slice.
    pub fn get(&self, key_lower: &str) -> &[u32] {
        self.entries.get(key_lower).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over every (key, ids) pair. This is the expensive path the
    /// fuzzy candidate scan takes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map from level-10 cell id to the city indices located in that cell.
#[derive(Debug, Clone, Default)]
pub struct CellIndex {
    cells: HashMap<u64, Vec<u32>>,
}

impl CellIndex {
    pub fn build(cities: &[CityRecord]) -> Self {
        let mut index = Self::default();
        for (i, city) in cities.iter().enumerate() {
            let leaf =
                CellId::from_lat_lng(city.latitude.to_radians(), city.longitude.to_radians());
            let cell = leaf.parent_at_level(CELL_LEVEL);
            index.cells.entry(cell.0).or_default().push(i as u32);
        }
        index
    }

    pub fn get(&self, cell: CellId) -> &[u32] {
        self.cells.get(&cell.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
