// crates/geocity-core/src/loader/download.rs

use crate::error::{GeoCityError, Result};
use log::info;
use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch `url` into `path` unless the file already exists. An existing
/// file is never re-downloaded.
pub fn ensure_file(path: &Path, url: &str) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    info!("downloading {url}");
    let agent = ureq::AgentBuilder::new()
        .timeout(DOWNLOAD_TIMEOUT)
        .build();
    let response = agent.get(url).call().map_err(|err| GeoCityError::Download {
        url: url.to_string(),
        reason: err.to_string(),
    })?;

    let mut file = File::create(path)?;
    std::io::copy(&mut response.into_reader(), &mut file)?;
    Ok(())
}
