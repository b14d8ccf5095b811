// crates/geocity-core/src/geocoder.rs

//! The public facade: one immutable value owning the corpus and both
//! indexes. Queries are reentrant and lock-free; construction does all the
//! I/O up front.

use crate::config::GeoConfig;
use crate::error::Result;
use crate::extract::QualifierExtractor;
use crate::index::{CellIndex, NameIndex};
use crate::intern::StringInterner;
use crate::loader::{self, Corpus};
use crate::model::{AdminDivision, AdminDirectory, CityRecord, CorpusStats, CountryInfo};
use crate::text::{lower, normalize_query};
use crate::{reverse, score};
use once_cell::sync::OnceCell;

/// Per-query options.
#[derive(Debug, Clone, Default)]
pub struct GeocodeOptions {
    /// Only admit candidates whose display name equals the query.
    pub exact_city: bool,
    /// Maximum Levenshtein distance for typo matching. Zero disables the
    /// fuzzy scan; positive values take the expensive full-index path.
    pub fuzzy_distance: u32,
}

// Shared instance behind `Geocoder::shared`. First construction is
// serialized by the cell; every caller sees the same value.
static SHARED: OnceCell<Geocoder> = OnceCell::new();

pub struct Geocoder {
    corpus: Corpus,
    cells: CellIndex,
    extractor: QualifierExtractor,
}

impl Geocoder {
    /// Load (or rebuild) the corpus per `config`, build the indexes and
    /// validate corpus plausibility.
    pub fn create(config: GeoConfig) -> Result<Self> {
        let corpus = loader::load(&config)?;
        loader::validate(&corpus)?;
        Ok(Self::from_corpus(corpus))
    }

    /// The lazily-initialized process-wide instance, built with the
    /// default configuration.
    pub fn shared() -> Result<&'static Geocoder> {
        SHARED.get_or_try_init(|| Self::create(GeoConfig::default()))
    }

    /// Build a facade straight from in-memory parts. No corpus-size
    /// validation; meant for embedding small datasets and for tests.
    pub fn from_parts(
        mut cities: Vec<CityRecord>,
        countries: Vec<CountryInfo>,
        divisions: Vec<AdminDivision>,
        country_codes: StringInterner,
        region_codes: StringInterner,
    ) -> Self {
        cities.sort_by(|a, b| lower(&a.city).cmp(&lower(&b.city)));
        let name_index = NameIndex::build(&cities);
        Self::from_corpus(Corpus {
            cities,
            countries,
            admin: AdminDirectory::new(divisions),
            country_codes,
            region_codes,
            name_index,
        })
    }

    fn from_corpus(corpus: Corpus) -> Self {
        let cells = CellIndex::build(&corpus.cities);
        let extractor = QualifierExtractor::new(&corpus.countries);
        Self {
            corpus,
            cells,
            extractor,
        }
    }

    /// Resolve a free-text location query to the single best city record.
    /// Total: anything unresolvable comes back as the empty record.
    pub fn geocode(&self, query: &str, options: &GeocodeOptions) -> CityRecord {
        let query = normalize_query(query);
        if query.is_empty() {
            return CityRecord::empty();
        }
        let qualifiers = self.extractor.extract(&query, &self.corpus.admin);
        let input = score::ScoreInput {
            cities: &self.corpus.cities,
            names: &self.corpus.name_index,
            country_codes: &self.corpus.country_codes,
            region_codes: &self.corpus.region_codes,
        };
        if options.exact_city {
            score::resolve_exact(&input, &query, &qualifiers, options.fuzzy_distance)
        } else {
            score::resolve_scored(&input, &query, &qualifiers, options.fuzzy_distance)
        }
    }

    /// Resolve a coordinate pair to the nearest meaningful city. Total:
    /// invalid or remote coordinates come back as the empty record.
    pub fn reverse_geocode(&self, lat: f64, lng: f64) -> CityRecord {
        reverse::resolve(&self.corpus.cities, &self.cells, lat, lng)
    }

    /// The ISO-2 country code of a record ("" for the empty record).
    pub fn city_country(&self, record: &CityRecord) -> &str {
        self.corpus.country_codes.get(record.country_id)
    }

    /// The admin-1 region code of a record ("" for the empty record).
    pub fn city_region(&self, record: &CityRecord) -> &str {
        self.corpus.region_codes.get(record.region_id)
    }

    /// Country-table row for an ISO-2 code, case-insensitive.
    pub fn find_country(&self, iso2: &str) -> Option<&CountryInfo> {
        self.corpus
            .countries
            .iter()
            .find(|c| c.iso.eq_ignore_ascii_case(iso2))
    }

    pub fn cities(&self) -> &[CityRecord] {
        &self.corpus.cities
    }

    pub fn countries(&self) -> &[CountryInfo] {
        &self.corpus.countries
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            cities: self.corpus.cities.len(),
            countries: self.corpus.countries.len(),
            admin_divisions: self.corpus.admin.len(),
            name_keys: self.corpus.name_index.len(),
        }
    }
}
