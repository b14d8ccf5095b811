// crates/geocity-core/src/score.rs

//! Forward scoring: turn a noisy query plus extracted qualifiers into the
//! single best city record.
//!
//! Two modes. The default mode scores every gathered candidate against a
//! bonus table and keeps the highest scorer; exact mode only admits
//! candidates whose display name equals the query and then applies a
//! qualifier-preference ladder.

use crate::extract::Qualifiers;
use crate::index::NameIndex;
use crate::intern::StringInterner;
use crate::model::CityRecord;
use crate::text::{fold_key, lower};
use std::collections::BTreeSet;
use strsim::levenshtein;

/// Borrowed view of everything the scorer needs from the facade.
pub struct ScoreInput<'a> {
    pub cities: &'a [CityRecord],
    pub names: &'a NameIndex,
    pub country_codes: &'a StringInterner,
    pub region_codes: &'a StringInterner,
}

/// Candidate gathering shared by both modes: the full query, the re-joined
/// name slice and each individual token are looked up in the name index.
/// With a positive fuzzy distance every index key is additionally scanned
/// for near-misses of the name tokens; that scan is the expensive path and
/// only runs when the caller opted in.
fn gather(input: &ScoreInput<'_>, query: &str, quals: &Qualifiers, fuzzy_distance: u32) -> Vec<u32> {
    let mut candidates: BTreeSet<u32> = BTreeSet::new();

    candidates.extend(input.names.get(&lower(query)));
    let joined = quals.name_slice.join(" ");
    candidates.extend(input.names.get(&joined));
    for token in &quals.name_slice {
        candidates.extend(input.names.get(token.trim()));
    }

    if fuzzy_distance > 0 {
        let fuzzy_tokens: Vec<&String> = quals
            .name_slice
            .iter()
            .filter(|t| t.chars().count() > 2)
            .collect();
        if !fuzzy_tokens.is_empty() {
            for (key, ids) in input.names.iter() {
                if fuzzy_tokens
                    .iter()
                    .any(|t| levenshtein(key, t) <= fuzzy_distance as usize)
                {
                    candidates.extend(ids);
                }
            }
        }
    }

    candidates.into_iter().collect()
}

/// Default (scored) mode.
pub fn resolve_scored(
    input: &ScoreInput<'_>,
    query: &str,
    quals: &Qualifiers,
    fuzzy_distance: u32,
) -> CityRecord {
    let candidates = gather(input, query, quals, fuzzy_distance);
    if candidates.is_empty() {
        return CityRecord::empty();
    }

    let query_lower = lower(query);
    let query_folded = fold_key(query);
    // The effective name once qualifiers are stripped: "Paris, TX" scores
    // its city-name match through "paris".
    let joined = quals.name_slice.join(" ");
    let joined_folded = fold_key(&joined);
    let two_char_abbrevs: Vec<&String> = quals
        .abbrevs
        .iter()
        .filter(|a| a.chars().count() == 2)
        .collect();

    let mut scored: Vec<(u32, i32)> = Vec::with_capacity(candidates.len());
    for &id in &candidates {
        let city = &input.cities[id as usize];
        let country = input.country_codes.get(city.country_id);
        let region = input.region_codes.get(city.region_id);
        let city_lower = lower(&city.city);

        let mut score = 0i32;

        if two_char_abbrevs.iter().any(|a| a.eq_ignore_ascii_case(region)) {
            score += 5;
        }
        if two_char_abbrevs.iter().any(|a| a.as_str() == country) {
            score += 3;
        }
        if !quals.country_iso.is_empty() && quals.country_iso == country {
            score += 4;
        }
        let region_hit = !quals.state_code.is_empty() && quals.state_code == region;
        if region_hit {
            score += 4;
        }
        if city.alt_names().any(|alt| lower(alt) == query_lower) {
            score += 3;
        }
        if city.alt_names().any(|alt| alt == query) {
            score += 5;
        }
        let city_folded = fold_key(&city.city);
        let name_hit = city_lower == query_lower
            || city_folded == query_folded
            || (!joined.is_empty() && (city_lower == joined || city_folded == joined_folded));
        if name_hit {
            score += 7;
        }
        // A qualified exact name match is unambiguous; stop scoring.
        if region_hit && name_hit {
            return city.clone();
        }
        if fuzzy_distance > 0 {
            for token in &quals.name_slice {
                if token.chars().count() > 2
                    && levenshtein(token, &city_lower) <= fuzzy_distance as usize
                {
                    score += 5;
                }
            }
        }
        for token in &quals.name_slice {
            if city_lower.contains(token.as_str()) {
                score += 2;
            }
            if city_lower == *token {
                score += 1;
            }
        }

        scored.push((id, score));
    }

    // With no country qualifier, nudge the scores toward real cities and
    // toward the most populous contender.
    if quals.country_iso.is_empty() {
        let mut top: Option<(usize, u64)> = None;
        for (n, (id, score)) in scored.iter_mut().enumerate() {
            let population = input.cities[*id as usize].population;
            if population >= 1000 {
                *score += 1;
            }
            if top.map_or(true, |(_, best)| population > best) {
                top = Some((n, population));
            }
        }
        if let Some((n, _)) = top {
            scored[n].1 += 1;
        }
    }

    let mut best: Option<(u32, i32, u64)> = None;
    for (id, score) in scored {
        let population = input.cities[id as usize].population;
        let better = match best {
            None => true,
            Some((_, s, p)) => score > s || (score == s && population > p),
        };
        if better {
            best = Some((id, score, population));
        }
    }

    match best {
        Some((id, score, _)) if score > 0 => input.cities[id as usize].clone(),
        _ => CityRecord::empty(),
    }
}

/// Exact-match mode: only candidates whose display name equals the query
/// (or the re-joined name slice) case-insensitively survive; qualifiers
/// then act as preferences, not scores.
pub fn resolve_exact(
    input: &ScoreInput<'_>,
    query: &str,
    quals: &Qualifiers,
    fuzzy_distance: u32,
) -> CityRecord {
    let candidates = gather(input, query, quals, fuzzy_distance);

    let query_lower = lower(query);
    let joined = quals.name_slice.join(" ");
    let surviving: Vec<u32> = candidates
        .into_iter()
        .filter(|&id| {
            let city_lower = lower(&input.cities[id as usize].city);
            city_lower == query_lower || (!joined.is_empty() && city_lower == joined)
        })
        .collect();

    if surviving.is_empty() {
        return CityRecord::empty();
    }
    if surviving.len() == 1 {
        return input.cities[surviving[0] as usize].clone();
    }

    let region_matches = |id: u32| {
        !quals.state_code.is_empty()
            && quals.state_code == input.region_codes.get(input.cities[id as usize].region_id)
    };
    let country_matches = |id: u32| {
        !quals.country_iso.is_empty()
            && quals.country_iso == input.country_codes.get(input.cities[id as usize].country_id)
    };

    for tier in 0..3 {
        let ids = surviving.iter().copied().filter(|&id| match tier {
            0 => region_matches(id) && country_matches(id),
            1 => region_matches(id),
            _ => country_matches(id),
        });
        if let Some(record) = most_populous(input, ids) {
            return record;
        }
    }
    most_populous(input, surviving.into_iter()).unwrap_or_else(CityRecord::empty)
}

fn most_populous(
    input: &ScoreInput<'_>,
    ids: impl Iterator<Item = u32>,
) -> Option<CityRecord> {
    ids.max_by_key(|&id| (input.cities[id as usize].population, std::cmp::Reverse(id)))
        .map(|id| input.cities[id as usize].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::QualifierExtractor;
    use crate::model::{AdminDirectory, CountryInfo};

    struct Fixture {
        cities: Vec<CityRecord>,
        names: NameIndex,
        countries: StringInterner,
        regions: StringInterner,
        extractor: QualifierExtractor,
        admin: AdminDirectory,
    }

    impl Fixture {
        fn new(mut raw: Vec<(&str, &str, &str, &str, u64)>) -> Self {
            raw.sort_by(|a, b| lower(a.0).cmp(&lower(b.0)));
            let mut countries = StringInterner::new();
            let mut regions = StringInterner::new();
            let cities: Vec<CityRecord> = raw
                .into_iter()
                .map(|(name, alt, country, region, population)| CityRecord {
                    city: name.into(),
                    city_alt: alt.into(),
                    country_id: countries.intern(country),
                    region_id: regions.intern(region),
                    population,
                    ..Default::default()
                })
                .collect();
            let names = NameIndex::build(&cities);
            let country_table = vec![
                info("US", "United States"),
                info("FR", "France"),
                info("GB", "United Kingdom"),
                info("IN", "India"),
                info("CA", "Canada"),
            ];
            Self {
                cities,
                names,
                countries,
                regions,
                extractor: QualifierExtractor::new(&country_table),
                admin: AdminDirectory::default(),
            }
        }

        fn input(&self) -> ScoreInput<'_> {
            ScoreInput {
                cities: &self.cities,
                names: &self.names,
                country_codes: &self.countries,
                region_codes: &self.regions,
            }
        }

        fn scored(&self, query: &str, fuzzy_distance: u32) -> CityRecord {
            let quals = self.extractor.extract(query, &self.admin);
            resolve_scored(&self.input(), query, &quals, fuzzy_distance)
        }

        fn exact(&self, query: &str) -> CityRecord {
            let quals = self.extractor.extract(query, &self.admin);
            resolve_exact(&self.input(), query, &quals, 0)
        }
    }

    fn info(iso: &str, name: &str) -> CountryInfo {
        CountryInfo {
            iso: iso.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    fn fixture() -> Fixture {
        Fixture::new(vec![
            ("Paris", "", "FR", "11", 2_140_000),
            ("Paris", "", "US", "TX", 24_000),
            ("Mumbai", "Bombay,Bombaim", "IN", "16", 12_400_000),
            ("London", "", "GB", "ENG", 8_900_000),
            ("London", "", "CA", "08", 383_000),
            ("Springfield", "", "US", "IL", 116_000),
            ("Springfield", "", "US", "MO", 169_000),
        ])
    }

    #[test]
    fn alt_name_crosses_initial_letter() {
        let record = fixture().scored("Bombay", 0);
        assert_eq!(record.city, "Mumbai");
    }

    #[test]
    fn state_qualifier_disambiguates() {
        let f = fixture();
        let record = f.scored("Paris, TX", 0);
        assert_eq!(record.city, "Paris");
        assert_eq!(f.regions.get(record.region_id), "TX");
        assert_eq!(f.countries.get(record.country_id), "US");
    }

    #[test]
    fn country_qualifier_disambiguates() {
        let f = fixture();
        let record = f.scored("Paris, France", 0);
        assert_eq!(f.countries.get(record.country_id), "FR");
    }

    #[test]
    fn bare_name_prefers_population() {
        let f = fixture();
        let record = f.scored("London", 0);
        assert_eq!(f.countries.get(record.country_id), "GB");
    }

    #[test]
    fn fuzzy_matches_typo() {
        let f = fixture();
        assert!(f.scored("Londn", 0).is_empty());
        let record = f.scored("Londn", 1);
        assert_eq!(record.city, "London");
        assert_eq!(f.countries.get(record.country_id), "GB");
    }

    #[test]
    fn nonsense_yields_empty() {
        let f = fixture();
        assert!(f.scored("Zxqwvbn", 0).is_empty());
        assert!(f.scored("!@#$%", 0).is_empty());
    }

    #[test]
    fn exact_mode_population_tiebreak() {
        let f = fixture();
        let record = f.exact("London");
        assert_eq!(record.city, "London");
        assert_eq!(f.countries.get(record.country_id), "GB");
    }

    #[test]
    fn exact_mode_state_preference() {
        let f = fixture();
        // MO Springfield is more populous; the state qualifier must win.
        let record = f.exact("Springfield, IL");
        assert_eq!(f.regions.get(record.region_id), "IL");
    }

    #[test]
    fn exact_mode_rejects_partial_names() {
        let f = fixture();
        assert!(f.exact("Lond").is_empty());
    }

    #[test]
    fn scored_mode_case_sensitive_alt_bonus() {
        // Same alt name in different case: the record matching
        // case-sensitively outranks the case-folded one.
        let f = Fixture::new(vec![
            ("Alpha", "Krung Thep", "US", "AA", 1000),
            ("Beta", "krung thep", "FR", "BB", 1000),
        ]);
        let record = f.scored("Krung Thep", 0);
        assert_eq!(record.city, "Alpha");
    }

    #[test]
    fn determinism() {
        let f = fixture();
        for _ in 0..3 {
            assert_eq!(f.scored("Paris", 0), f.scored("Paris", 0));
            assert_eq!(f.exact("London"), f.exact("London"));
        }
    }
}
