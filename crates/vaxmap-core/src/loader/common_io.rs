// crates/vaxmap-core/src/loader/common_io.rs
use super::Source;
use crate::config::FetchConfig;
use crate::error::{Result, VaxError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Opens a snapshot, buffers it, and gunzips it when its name ends in `.gz`.
/// Returns a generic reader so the parsers don't care about the transport.
pub fn open_stream(source: &Source, fetch: &FetchConfig) -> Result<Box<dyn Read>> {
    let raw: Box<dyn Read> = match source {
        Source::Path(path) => open_file(path)?,
        Source::Url(url) => fetch_url(url, fetch)?,
    };

    if source.is_gzipped() {
        return gunzip(raw);
    }
    Ok(raw)
}

fn open_file(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        VaxError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;
    Ok(Box::new(BufReader::new(file)))
}

#[cfg(feature = "fetch")]
fn fetch_url(url: &str, fetch: &FetchConfig) -> Result<Box<dyn Read>> {
    debug!(url, timeout_secs = fetch.timeout_secs, "downloading snapshot");
    let client = reqwest::blocking::Client::builder()
        .timeout(fetch.timeout())
        .build()?;
    let bytes = client.get(url).send()?.error_for_status()?.bytes()?;
    debug!(url, bytes = bytes.len(), "snapshot downloaded");
    Ok(Box::new(std::io::Cursor::new(bytes)))
}

#[cfg(not(feature = "fetch"))]
fn fetch_url(url: &str, _fetch: &FetchConfig) -> Result<Box<dyn Read>> {
    debug!(url, "refusing remote source");
    Err(VaxError::InvalidData(format!(
        "URL source {url} requires the 'fetch' feature"
    )))
}

#[cfg(feature = "compact")]
fn gunzip(reader: Box<dyn Read>) -> Result<Box<dyn Read>> {
    use flate2::read::GzDecoder;
    Ok(Box::new(GzDecoder::new(reader)))
}

#[cfg(not(feature = "compact"))]
fn gunzip(_reader: Box<dyn Read>) -> Result<Box<dyn Read>> {
    Err(VaxError::InvalidData(
        "Gzip source requested but 'compact' disabled".into(),
    ))
}
