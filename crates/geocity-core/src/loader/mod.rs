// crates/geocity-core/src/loader/mod.rs

//! Corpus construction: binary caches when they exist, full rebuild from
//! the GeoNames dumps when they do not.
//!
//! The three cache files are authoritative for the corpus. Any of them
//! missing, empty or undecodable forces a rebuild from source, after which
//! the caches are rewritten (best-effort). The admin-1 division table is
//! small and is re-parsed from source on every construction.

pub mod cache_io;
pub mod download;
pub mod geonames;

use crate::config::GeoConfig;
use crate::error::{GeoCityError, Result};
use crate::index::NameIndex;
use crate::intern::StringInterner;
use crate::model::{AdminDirectory, CityRecord, CountryInfo};
use crate::text::lower;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const CITIES_CACHE: &str = "cities.msgpack";
pub const COUNTRIES_CACHE: &str = "countries.msgpack";
pub const NAME_INDEX_CACHE: &str = "nameIndex.msgpack";

pub const CITIES_SOURCE: &str = "cities1000.txt";
pub const COUNTRIES_SOURCE: &str = "countryInfo.txt";
pub const ADMIN_SOURCE: &str = "admin1CodesASCII.txt";
pub const WORLD_CITIES_SOURCE: &str = "worldcitiespop.txt";

const COUNTRIES_URL: &str = "https://download.geonames.org/export/dump/countryInfo.txt";
const ADMIN_URL: &str = "https://download.geonames.org/export/dump/admin1CodesASCII.txt";

/// Smallest corpus that can be a healthy GeoNames snapshot; anything under
/// this is a truncated or corrupt download.
pub const MIN_CITY_COUNT: usize = 140_000;
pub const MIN_COUNTRY_COUNT: usize = 200;

/// Everything the facade owns after construction.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub cities: Vec<CityRecord>,
    pub countries: Vec<CountryInfo>,
    pub admin: AdminDirectory,
    pub country_codes: StringInterner,
    pub region_codes: StringInterner,
    pub name_index: NameIndex,
}

/// The `cities.msgpack` bundle: records plus the two interner tables, so
/// that cached ids stay consistent with runtime lookups.
#[derive(Serialize, Deserialize)]
struct CityTable {
    country_codes: StringInterner,
    region_codes: StringInterner,
    cities: Vec<CityRecord>,
}

pub fn load(config: &GeoConfig) -> Result<Corpus> {
    let admin = load_admin(config)?;

    if let Some(corpus) = load_cached(config, &admin) {
        info!(
            "corpus loaded from cache: {} cities, {} countries",
            corpus.cities.len(),
            corpus.countries.len()
        );
        return Ok(corpus);
    }
    rebuild(config, admin)
}

/// Plausibility check on a freshly constructed corpus.
pub fn validate(corpus: &Corpus) -> Result<()> {
    if corpus.cities.len() < MIN_CITY_COUNT {
        return Err(GeoCityError::Validation(format!(
            "only {} cities loaded, expected at least {MIN_CITY_COUNT}",
            corpus.cities.len()
        )));
    }
    if corpus.countries.len() < MIN_COUNTRY_COUNT {
        return Err(GeoCityError::Validation(format!(
            "only {} countries loaded, expected at least {MIN_COUNTRY_COUNT}",
            corpus.countries.len()
        )));
    }
    Ok(())
}

fn load_admin(config: &GeoConfig) -> Result<AdminDirectory> {
    let path = config.data_dir.join(ADMIN_SOURCE);
    download::ensure_file(&path, ADMIN_URL)?;
    let divisions = geonames::parse_admin_divisions(File::open(&path)?);
    Ok(AdminDirectory::new(divisions))
}

fn load_cached(config: &GeoConfig, admin: &AdminDirectory) -> Option<Corpus> {
    let dir = config.cache_dir.as_path();
    let mut table: CityTable = cache_io::read_cache(dir, CITIES_CACHE)?;
    let countries: Vec<CountryInfo> = cache_io::read_cache(dir, COUNTRIES_CACHE)?;
    let name_index: NameIndex = cache_io::read_cache(dir, NAME_INDEX_CACHE)?;

    if table.cities.is_empty() || countries.is_empty() || name_index.is_empty() {
        return None;
    }
    // Every index entry must point into the corpus; a mismatched pair of
    // cache files is treated like corruption.
    let len = table.cities.len() as u32;
    if name_index
        .iter()
        .any(|(_, ids)| ids.iter().any(|&id| id >= len))
    {
        log::warn!("name index cache is inconsistent with city cache, rebuilding");
        return None;
    }

    table.country_codes.rehydrate();
    table.region_codes.rehydrate();
    Some(Corpus {
        cities: table.cities,
        countries,
        admin: admin.clone(),
        country_codes: table.country_codes,
        region_codes: table.region_codes,
        name_index,
    })
}

fn rebuild(config: &GeoConfig, admin: AdminDirectory) -> Result<Corpus> {
    info!("rebuilding corpus from source data");

    let countries_path = config.data_dir.join(COUNTRIES_SOURCE);
    download::ensure_file(&countries_path, COUNTRIES_URL)?;
    let countries = geonames::parse_countries(File::open(&countries_path)?);

    let cities_path = config.data_dir.join(CITIES_SOURCE);
    if !cities_path.is_file() {
        return Err(GeoCityError::NotFound(cities_path));
    }
    let mut country_codes = StringInterner::new();
    let mut region_codes = StringInterner::new();
    let mut cities = geonames::parse_cities(
        File::open(&cities_path)?,
        &mut country_codes,
        &mut region_codes,
    );

    merge_optional_world_cities(&config.data_dir, &mut cities, &country_codes);

    // Case-insensitive name order: stable record indices and deterministic
    // tie-breaks everywhere downstream.
    cities.sort_by(|a, b| lower(&a.city).cmp(&lower(&b.city)));

    let name_index = NameIndex::build(&cities);

    let dir = config.cache_dir.as_path();
    cache_io::write_cache(
        dir,
        CITIES_CACHE,
        &CityTable {
            country_codes: country_codes.clone(),
            region_codes: region_codes.clone(),
            cities: cities.clone(),
        },
    );
    cache_io::write_cache(dir, COUNTRIES_CACHE, &countries);
    cache_io::write_cache(dir, NAME_INDEX_CACHE, &name_index);

    info!(
        "corpus rebuilt: {} cities, {} countries",
        cities.len(),
        countries.len()
    );
    Ok(Corpus {
        cities,
        countries,
        admin,
        country_codes,
        region_codes,
        name_index,
    })
}

fn merge_optional_world_cities(
    data_dir: &Path,
    cities: &mut [CityRecord],
    country_codes: &StringInterner,
) {
    let path = data_dir.join(WORLD_CITIES_SOURCE);
    match File::open(&path) {
        Ok(file) => geonames::merge_world_cities(file, cities, country_codes),
        Err(_) => log::debug!("no world-cities file at {}, skipping", path.display()),
    }
}
