// crates/geocity-core/src/model.rs

//! Domain types: the city corpus, the country table and admin-1 divisions.
//!
//! All of these are built once at load time and never mutate afterwards.
//! `CityRecord` values handed to callers are independent clones; nothing in
//! here borrows from the facade.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One city of the corpus.
///
/// Country and region are stored as interner ids; use
/// [`crate::Geocoder::city_country`] / [`crate::Geocoder::city_region`] to
/// resolve them back to code strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// Display name. Empty means "no match" (the sentinel record).
    pub city: String,
    /// Raw comma-separated alternative-name blob from the source data.
    pub city_alt: String,
    pub country_id: u32,
    pub region_id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
}

impl CityRecord {
    /// The "no match" sentinel: empty name, zero everything.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_empty()
    }

    /// Trimmed, non-empty entries of the alt-name blob. Split on ASCII
    /// commas only: alt names like "Ho Chi Minh City" contain spaces.
    pub fn alt_names(&self) -> impl Iterator<Item = &str> {
        self.city_alt
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One row of the GeoNames country table, keyed by ISO-2 code.
///
/// The trailing fields are kept verbatim from the source; the engine only
/// interprets `iso`, `iso3`, `name` and `continent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub iso: String,
    pub iso3: String,
    pub iso_numeric: String,
    pub fips: String,
    pub name: String,
    pub capital: String,
    pub area_km2: String,
    pub population: String,
    /// Continent code: AF, AN, AS, EU, NA, OC or SA.
    pub continent: String,
    pub tld: String,
    pub currency_code: String,
    pub currency_name: String,
    pub phone: String,
    pub postal_code_format: String,
    pub postal_code_regex: String,
    pub languages: String,
    pub geoname_id: String,
    pub neighbours: String,
    pub equivalent_fips: String,
}

/// A first-level administrative division, e.g. ("US", "TX") → "Texas".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDivision {
    pub country: String,
    pub code: String,
    pub name: String,
}

/// Lookup structure over [`AdminDivision`] rows, used by the qualifier
/// extractor to recognize international subdivisions.
#[derive(Debug, Clone, Default)]
pub struct AdminDirectory {
    by_key: HashMap<(String, String), String>,
    countries_by_code: HashMap<String, Vec<String>>,
}

impl AdminDirectory {
    pub fn new(divisions: Vec<AdminDivision>) -> Self {
        let mut directory = Self::default();
        for division in divisions {
            directory
                .countries_by_code
                .entry(division.code.clone())
                .or_default()
                .push(division.country.clone());
            directory
                .by_key
                .insert((division.country, division.code), division.name);
        }
        directory
    }

    /// Is (country ISO-2, division code) a known subdivision?
    pub fn contains(&self, country: &str, code: &str) -> bool {
        self.by_key
            .contains_key(&(country.to_string(), code.to_string()))
    }

    /// If exactly one country uses `code`, return that country's ISO-2.
    pub fn sole_country_for_code(&self, code: &str) -> Option<&str> {
        match self.countries_by_code.get(code) {
            Some(countries) if countries.len() == 1 => Some(countries[0].as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Aggregate corpus counts, as reported by `Geocoder::stats`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CorpusStats {
    pub cities: usize,
    pub countries: usize,
    pub admin_divisions: usize,
    pub name_keys: usize,
}
