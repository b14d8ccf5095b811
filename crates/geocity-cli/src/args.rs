use clap::{Parser, Subcommand};

/// CLI arguments for geocity
#[derive(Debug, Parser)]
#[command(
    name = "geocity",
    version,
    about = "Offline city geocoding against the GeoNames corpus"
)]
pub struct CliArgs {
    /// Directory holding the GeoNames source files
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Directory holding the MessagePack caches
    #[arg(long = "cache-dir", global = true)]
    pub cache_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded corpus
    Stats,

    /// Resolve a free-text location query to a city
    Geocode {
        /// The query, e.g. "Paris, TX" or "Bombay"
        query: String,

        /// Only accept an exact city-name match
        #[arg(long)]
        exact: bool,

        /// Maximum edit distance for typo matching (0 disables)
        #[arg(long, default_value_t = 0)]
        fuzzy: u32,
    },

    /// Resolve a coordinate pair to the nearest city
    Reverse {
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lng: f64,
    },

    /// Drop the binary caches and rebuild them from source
    RebuildCache,

    /// Load the corpus and check its plausibility
    Validate,
}
