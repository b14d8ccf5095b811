// crates/geocity-core/src/loader/geonames.rs

//! Line parsers for the GeoNames dump files and the optional MaxMind
//! world-cities CSV. All parsing is positional; malformed rows are
//! dropped, never fatal.

use crate::intern::StringInterner;
use crate::model::{AdminDivision, CityRecord, CountryInfo};
use log::debug;
use std::io::{BufRead, BufReader, Read};

/// Field count of both `cities1000.txt` and `countryInfo.txt`.
const GEONAMES_FIELDS: usize = 19;

/// Parse the `cities1000` tab-separated dump.
///
/// Field positions (0-based): 1 name, 3 alt-names blob, 4 latitude,
/// 5 longitude, 8 country ISO-2, 10 admin1 code, 14 population. Rows with
/// a wrong field count, non-numeric coordinates or an empty name are
/// dropped.
pub fn parse_cities(
    reader: impl Read,
    country_codes: &mut StringInterner,
    region_codes: &mut StringInterner,
) -> Vec<CityRecord> {
    let mut cities = Vec::new();
    let mut dropped = 0usize;
    for line in BufReader::new(reader).lines().map_while(|l| l.ok()) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != GEONAMES_FIELDS {
            dropped += 1;
            continue;
        }
        let name = fields[1].trim();
        if name.is_empty() {
            dropped += 1;
            continue;
        }
        let (latitude, longitude) = match (fields[4].parse::<f64>(), fields[5].parse::<f64>()) {
            (Ok(lat), Ok(lng)) if lat.is_finite() && lng.is_finite() => (lat, lng),
            _ => {
                dropped += 1;
                continue;
            }
        };
        cities.push(CityRecord {
            city: name.to_string(),
            city_alt: fields[3].to_string(),
            country_id: country_codes.intern(fields[8].trim()),
            region_id: region_codes.intern(fields[10].trim()),
            latitude,
            longitude,
            population: fields[14].trim().parse().unwrap_or(0),
        });
    }
    if dropped > 0 {
        debug!("dropped {dropped} malformed city rows");
    }
    cities
}

/// Parse `countryInfo.txt`: 19 tab-separated fields, `#` comment lines
/// skipped, rows with an ISO-2 of `""` or `"0"` dropped.
pub fn parse_countries(reader: impl Read) -> Vec<CountryInfo> {
    let mut countries = Vec::new();
    for line in BufReader::new(reader).lines().map_while(|l| l.ok()) {
        if line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != GEONAMES_FIELDS {
            continue;
        }
        let iso = fields[0].trim();
        if iso.is_empty() || iso == "0" {
            continue;
        }
        countries.push(CountryInfo {
            iso: iso.to_string(),
            iso3: fields[1].to_string(),
            iso_numeric: fields[2].to_string(),
            fips: fields[3].to_string(),
            name: fields[4].to_string(),
            capital: fields[5].to_string(),
            area_km2: fields[6].to_string(),
            population: fields[7].to_string(),
            continent: fields[8].to_string(),
            tld: fields[9].to_string(),
            currency_code: fields[10].to_string(),
            currency_name: fields[11].to_string(),
            phone: fields[12].to_string(),
            postal_code_format: fields[13].to_string(),
            postal_code_regex: fields[14].to_string(),
            languages: fields[15].to_string(),
            geoname_id: fields[16].to_string(),
            neighbours: fields[17].to_string(),
            equivalent_fips: fields[18].to_string(),
        });
    }
    countries
}

/// Parse `admin1CodesASCII.txt`: a `"<ISO2>.<CODE>"` key followed by the
/// human-readable division name.
pub fn parse_admin_divisions(reader: impl Read) -> Vec<AdminDivision> {
    let mut divisions = Vec::new();
    for line in BufReader::new(reader).lines().map_while(|l| l.ok()) {
        let mut fields = line.split('\t');
        let (Some(key), Some(name)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Some((country, code)) = key.split_once('.') else {
            continue;
        };
        if country.is_empty() || code.is_empty() {
            continue;
        }
        divisions.push(AdminDivision {
            country: country.to_string(),
            code: code.to_string(),
            name: name.to_string(),
        });
    }
    divisions
}

/// Fold the optional MaxMind world-cities CSV (seven comma-separated
/// fields: country, city, accent city, region, population, latitude,
/// longitude) into the corpus: an accented spelling becomes an extra alias
/// of the matching record. Rows without a match are ignored.
pub fn merge_world_cities(
    reader: impl Read,
    cities: &mut [CityRecord],
    country_codes: &StringInterner,
) {
    use std::collections::HashMap;

    let mut by_key: HashMap<(u32, String), usize> = HashMap::new();
    for (i, city) in cities.iter().enumerate() {
        by_key
            .entry((city.country_id, crate::text::lower(&city.city)))
            .or_insert(i);
    }

    let mut merged = 0usize;
    for line in BufReader::new(reader).lines().map_while(|l| l.ok()) {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 7 {
            continue;
        }
        let country = fields[0].trim().to_uppercase();
        let plain = fields[1].trim();
        let accented = fields[2].trim();
        if accented.is_empty() || accented == plain {
            continue;
        }
        let Some(country_id) = country_codes.lookup(&country) else {
            continue;
        };
        let Some(&i) = by_key.get(&(country_id, crate::text::lower(plain))) else {
            continue;
        };
        let record = &mut cities[i];
        if record.city != accented && !record.alt_names().any(|alt| alt == accented) {
            if !record.city_alt.is_empty() {
                record.city_alt.push(',');
            }
            record.city_alt.push_str(accented);
            merged += 1;
        }
    }
    if merged > 0 {
        debug!("merged {merged} accented spellings from world-cities");
    }
}
