// crates/geocity-core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by corpus construction.
///
/// The query API (`geocode` / `reverse_geocode`) never returns these: it is
/// total and reports "no match" through the empty [`crate::CityRecord`].
/// Everything here happens before a `Geocoder` exists.
#[derive(Debug, Error)]
pub enum GeoCityError {
    /// A source data file is missing and could not be fetched.
    #[error("source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Download of a source file failed.
    ///
    /// Undecodable caches never surface here: the loader swallows them and
    /// rebuilds from source.
    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    /// The materialized corpus is implausibly small (truncated download or
    /// corrupt source).
    #[error("corpus validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, GeoCityError>;
