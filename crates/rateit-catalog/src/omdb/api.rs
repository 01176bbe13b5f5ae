use rateit_models::{parse_imdb_rating, parse_runtime_minutes, MovieDetail, SearchPage, SearchResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use crate::error::CatalogError;

pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong with fetching movies!";
pub const DETAIL_FAILED_MESSAGE: &str = "Something went wrong with fetching movie details!";

// OMDb signals success with Response: "True" | "False" and puts the reason in Error
#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
}

fn is_true(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

pub fn search_url(base_url: &str, api_key: &str, query: &str) -> String {
    format!(
        "{}?apikey={}&s={}",
        base_url,
        urlencoding::encode(api_key),
        urlencoding::encode(query)
    )
}

pub fn detail_url(base_url: &str, api_key: &str, id: &str) -> String {
    format!(
        "{}?apikey={}&i={}&plot=short",
        base_url,
        urlencoding::encode(api_key),
        urlencoding::encode(id)
    )
}

/// Decode a search body. `Response: "False"` becomes a not-found page.
pub fn parse_search_body(body: &str) -> Result<SearchPage, CatalogError> {
    let data: OmdbSearchResponse = serde_json::from_str(body)?;

    if !is_true(&data.response) {
        return Ok(SearchPage::not_found(data.error.unwrap_or_else(|| "Movie not found!".to_string())));
    }

    let results: Vec<SearchResult> = data
        .search
        .into_iter()
        .map(|item| SearchResult {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: item.poster,
        })
        .collect();

    let total_results = data
        .total_results
        .as_deref()
        .and_then(|t| t.parse().ok())
        .or_else(|| u32::try_from(results.len()).ok());

    Ok(SearchPage {
        found: true,
        results,
        total_results,
        message: None,
    })
}

/// Decode a detail body, normalizing runtime and rating strings.
pub fn parse_detail_body(body: &str) -> Result<MovieDetail, CatalogError> {
    let data: OmdbDetailResponse = serde_json::from_str(body)?;

    if !is_true(&data.response) {
        return Err(CatalogError::NotFound(
            data.error.unwrap_or_else(|| "Movie details not found!".to_string()),
        ));
    }

    Ok(MovieDetail {
        runtime_minutes: parse_runtime_minutes(&data.runtime),
        imdb_rating: parse_imdb_rating(&data.imdb_rating),
        id: data.imdb_id,
        title: data.title,
        year: data.year,
        poster_url: data.poster,
        plot: data.plot,
        released: data.released,
        actors: data.actors,
        director: data.director,
        genre: data.genre,
    })
}

/// Search the catalog by title substring
pub async fn search_by_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<SearchPage, CatalogError> {
    let url = search_url(base_url, api_key, query);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if let Some(err) = status_error(status, SEARCH_FAILED_MESSAGE) {
        let error_text = response.text().await.unwrap_or_default();
        debug!("OMDb search for '{}' failed: HTTP {} - {}", query, status, error_text);
        return Err(err);
    }

    let body = response.text().await?;
    parse_search_body(&body)
}

/// Non-2xx answers become `Status` errors carrying the user-facing message.
fn status_error(status: StatusCode, message: &str) -> Option<CatalogError> {
    if status.is_success() {
        return None;
    }
    Some(CatalogError::Status {
        status: status.as_u16(),
        message: message.to_string(),
    })
}

/// Fetch the full record for one catalog id
pub async fn fetch_detail(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<MovieDetail, CatalogError> {
    let url = detail_url(base_url, api_key, id);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if let Some(err) = status_error(status, DETAIL_FAILED_MESSAGE) {
        let error_text = response.text().await.unwrap_or_default();
        debug!("OMDb detail lookup for '{}' failed: HTTP {} - {}", id, status, error_text);
        return Err(err);
    }

    let body = response.text().await?;
    parse_detail_body(&body)
}
