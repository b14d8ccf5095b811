// crates/geocity-core/src/config.rs

use std::path::PathBuf;

/// Where the engine finds (and downloads) source data and keeps its binary
/// caches. Both directories default to repository-relative paths.
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Source files (`cities1000.txt`, `countryInfo.txt`, ...) live and are
    /// downloaded here.
    pub data_dir: PathBuf,
    /// MessagePack cache files live here.
    pub cache_dir: PathBuf,
}

impl Default for GeoConfig {
    fn default() -> Self {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        Self {
            data_dir: root.join("data"),
            cache_dir: root.join("cache"),
        }
    }
}

impl GeoConfig {
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }
}
