//! Stock photo fetch.
//!
//! One blocking search request against the Unsplash API, then one blocking
//! download of the first hit's regular-size rendition, decoded in memory.
//! Both run on the event thread; the window is unresponsive until they
//! finish.

use std::io::Read;

use image::DynamicImage;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Compile-time placeholder; paste a real Unsplash access key to use the
/// photo search.
const ACCESS_KEY: &str = "get your own";

const SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Errors during photo search and download
#[derive(Error, Debug)]
pub enum FetchError {
    /// The search request failed or returned an unreadable body
    #[error("photo search failed: {0}")]
    Search(String),
    /// The photo download failed
    #[error("photo download failed: {0}")]
    Download(String),
    /// The downloaded bytes are not a decodable image
    #[error("downloaded photo is not a valid image: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    urls: PhotoUrls,
}

#[derive(Deserialize)]
struct PhotoUrls {
    regular: String,
}

/// Search for a photo matching the query and download the first hit.
///
/// Returns `Ok(None)` when the search succeeds but matches nothing.
pub fn fetch_photo(query: &str) -> Result<Option<DynamicImage>, FetchError> {
    let body = ureq::get(SEARCH_URL)
        .query("query", query)
        .query("client_id", ACCESS_KEY)
        .call()
        .map_err(|e| FetchError::Search(e.to_string()))?
        .into_string()
        .map_err(|e| FetchError::Search(e.to_string()))?;

    let Some(url) = first_photo_url(&body)? else {
        return Ok(None);
    };

    info!("Downloading {}", url);
    let mut bytes = Vec::new();
    ureq::get(&url)
        .call()
        .map_err(|e| FetchError::Download(e.to_string()))?
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| FetchError::Download(e.to_string()))?;

    let photo = image::load_from_memory(&bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(Some(photo))
}

/// Pull the first result's regular-size URL out of a search response body.
fn first_photo_url(body: &str) -> Result<Option<String>, FetchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Search(e.to_string()))?;
    Ok(response.results.into_iter().next().map(|r| r.urls.regular))
}
