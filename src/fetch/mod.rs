//! Loading the raw dataset bytes from disk or over HTTP.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// GETs `url`, failing on transport errors and non-success statuses.
pub fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::blocking::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Reads dataset bytes from a local path or an `http(s)://` URL.
///
/// Gzip payloads are detected by their magic bytes and decompressed.
#[tracing::instrument]
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source)
            .with_context(|| format!("failed to fetch dataset from {source}"))?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read dataset file {source}"))?
    };
    debug!(bytes = bytes.len(), "Dataset bytes received");

    maybe_decompress(bytes).with_context(|| format!("failed to decompress {source}"))
}

fn maybe_decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }
    let mut out = Vec::new();
    GzDecoder::new(bytes.as_slice()).read_to_end(&mut out)?;
    debug!(compressed = bytes.len(), decompressed = out.len(), "Gzip dataset decompressed");
    Ok(out)
}
