mod client;
mod basic;
pub mod auth;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::{Result, anyhow};
use reqwest::header::{ACCEPT, HeaderValue};

/// Fetches up to `limit` of the newest rows from a Socrata-style endpoint.
///
/// Rows are requested newest-first by internal id so the recency filter sees
/// the freshest data even when the dataset is larger than `limit`. A
/// non-success HTTP status is an error; callers treat it as "no data" and
/// fall back to the embedded dataset.
pub async fn fetch_rows<C: HttpClient>(client: &C, endpoint: &str, limit: usize) -> Result<Vec<u8>> {
    let url = format!("{endpoint}?$limit={limit}&$order=:id DESC");

    let mut req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        return Err(anyhow!(
            "open-data request failed with status {}",
            resp.status()
        ));
    }

    Ok(resp.bytes().await?.to_vec())
}
