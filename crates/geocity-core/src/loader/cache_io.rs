// crates/geocity-core/src/loader/cache_io.rs

//! MessagePack cache files, readable plain or `.bz2`-compressed.
//!
//! Reads are forgiving: a missing, empty or undecodable cache returns
//! `None` and the caller rebuilds from source. Writes are best-effort: a
//! failure is logged and ignored, the in-memory corpus is already usable.

use bzip2::read::BzDecoder;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Load `<dir>/<name>` or `<dir>/<name>.bz2`, whichever exists.
pub fn read_cache<T: DeserializeOwned>(dir: &Path, name: &str) -> Option<T> {
    let plain = dir.join(name);
    let bytes = if plain.is_file() {
        fs::read(&plain).ok()?
    } else {
        let compressed = dir.join(format!("{name}.bz2"));
        let file = File::open(&compressed).ok()?;
        let mut bytes = Vec::new();
        BzDecoder::new(file).read_to_end(&mut bytes).ok()?;
        bytes
    };
    if bytes.is_empty() {
        debug!("cache {name} is empty, rebuilding");
        return None;
    }
    match rmp_serde::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("cache {name} is unreadable ({err}), rebuilding");
            None
        }
    }
}

/// Serialize `value` to `<dir>/<name>`. Never fails the caller.
pub fn write_cache<T: Serialize>(dir: &Path, name: &str, value: &T) {
    let result = fs::create_dir_all(dir)
        .map_err(|e| e.to_string())
        .and_then(|_| rmp_serde::to_vec(value).map_err(|e| e.to_string()))
        .and_then(|bytes| fs::write(dir.join(name), bytes).map_err(|e| e.to_string()));
    if let Err(err) = result {
        warn!("could not write cache {name}: {err}");
    }
}
