//! geocity — command-line companion to geocity-core
//!
//! Ordinary programs over the public API: inspect the corpus, run forward
//! and reverse queries from a terminal, regenerate the binary caches, and
//! validate a freshly downloaded dataset.
//!
//! Usage examples
//! --------------
//!
//! - Resolve a query
//!   $ geocity geocode "Paris, TX"
//!   $ geocity geocode --fuzzy 1 "Londn"
//!
//! - Nearest city for a coordinate
//!   $ geocity reverse 52.52 13.405
//!
//! - Regenerate the MessagePack caches after a dataset update
//!   $ geocity rebuild-cache
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use geocity_core::{CityRecord, GeoConfig, GeocodeOptions, Geocoder};
use std::fs;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let mut config = GeoConfig::default();
    if let Some(dir) = &args.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(dir) = &args.cache_dir {
        config = config.with_cache_dir(dir);
    }

    match args.command {
        Commands::Stats => {
            let geocoder = Geocoder::create(config)?;
            let stats = geocoder.stats();
            println!("Corpus statistics:");
            println!("  Cities: {}", stats.cities);
            println!("  Countries: {}", stats.countries);
            println!("  Admin divisions: {}", stats.admin_divisions);
            println!("  Name-index keys: {}", stats.name_keys);
        }

        Commands::Geocode { query, exact, fuzzy } => {
            let geocoder = Geocoder::create(config)?;
            let options = GeocodeOptions {
                exact_city: exact,
                fuzzy_distance: fuzzy,
            };
            print_record(&geocoder, &geocoder.geocode(&query, &options));
        }

        Commands::Reverse { lat, lng } => {
            let geocoder = Geocoder::create(config)?;
            print_record(&geocoder, &geocoder.reverse_geocode(lat, lng));
        }

        Commands::RebuildCache => {
            for name in [
                geocity_core::loader::CITIES_CACHE,
                geocity_core::loader::COUNTRIES_CACHE,
                geocity_core::loader::NAME_INDEX_CACHE,
            ] {
                let path = config.cache_dir.join(name);
                if path.exists() {
                    fs::remove_file(&path)
                        .with_context(|| format!("removing {}", path.display()))?;
                }
            }
            let geocoder = Geocoder::create(config)?;
            println!("Caches rebuilt: {} cities", geocoder.stats().cities);
        }

        Commands::Validate => {
            let geocoder = Geocoder::create(config)?;
            let stats = geocoder.stats();
            println!(
                "Corpus OK: {} cities, {} countries, {} admin divisions",
                stats.cities, stats.countries, stats.admin_divisions
            );
        }
    }

    Ok(())
}

fn print_record(geocoder: &Geocoder, record: &CityRecord) {
    if record.is_empty() {
        println!("No match");
        return;
    }
    println!("{}", record.city);
    println!("  Country: {}", geocoder.city_country(record));
    println!("  Region: {}", geocoder.city_region(record));
    println!("  Coordinates: {:.5}, {:.5}", record.latitude, record.longitude);
    println!("  Population: {}", record.population);
}
