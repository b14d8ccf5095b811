//! geocity-core — offline forward/reverse city geocoding.
//!
//! The engine answers two questions against an in-memory corpus of
//! GeoNames cities:
//!
//! - **Forward**: `"Paris, TX"`, `"Bombay"` or `"Londn"` → the single best
//!   matching city record.
//! - **Reverse**: a `(latitude, longitude)` pair → the nearest meaningful
//!   city, preferring the city proper over one of its neighborhoods.
//!
//! Both queries are total: anything unresolvable yields the empty
//! [`CityRecord`] (`city == ""`). After construction the
//! [`Geocoder`] is immutable and can be queried from any number of threads
//! without synchronization.
//!
//! ```no_run
//! use geocity_core::{GeoConfig, Geocoder, GeocodeOptions};
//!
//! # fn main() -> geocity_core::Result<()> {
//! let geocoder = Geocoder::create(GeoConfig::default())?;
//!
//! let record = geocoder.geocode("Paris, TX", &GeocodeOptions::default());
//! assert_eq!(record.city, "Paris");
//! assert_eq!(geocoder.city_country(&record), "US");
//!
//! let berlin = geocoder.reverse_geocode(52.52, 13.405);
//! assert_eq!(berlin.city, "Berlin");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod geocoder;
pub mod index;
pub mod intern;
pub mod loader;
pub mod model;
pub mod reverse;
pub mod s2;
pub mod score;
pub mod text;

// Re-exports for convenience
pub use crate::config::GeoConfig;
pub use crate::error::{GeoCityError, Result};
pub use crate::geocoder::{GeocodeOptions, Geocoder};
pub use crate::intern::StringInterner;
pub use crate::model::{AdminDivision, CityRecord, CorpusStats, CountryInfo};
