//! Catalog records, pagination and the content area state

use serde::{Deserialize, Deserializer, Serialize};

/// Fixed upstream page size
pub const PAGE_SIZE: u32 = 10;

/// Placeholder OMDb uses for missing values
const NOT_AVAILABLE: &str = "N/A";

/// A movie, series or episode from a search page.
///
/// Field names follow the OMDb wire format so that the same shape is used
/// for decoding responses and for the persisted favorites array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(
        rename = "Poster",
        default,
        deserialize_with = "not_available_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub poster: Option<String>,
    #[serde(
        rename = "Type",
        default,
        deserialize_with = "not_available_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

/// Full record returned by a detail lookup
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DetailRecord {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, deserialize_with = "not_available_as_none")]
    pub poster: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "not_available_as_none")]
    pub kind: Option<String>,
    #[serde(rename = "Genre", default, deserialize_with = "not_available_as_none")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, deserialize_with = "not_available_as_none")]
    pub director: Option<String>,
    #[serde(rename = "Actors", default, deserialize_with = "not_available_as_none")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, deserialize_with = "not_available_as_none")]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "rating_from_string")]
    pub rating: Option<f32>,
    #[serde(rename = "Runtime", default, deserialize_with = "not_available_as_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Released", default, deserialize_with = "not_available_as_none")]
    pub released: Option<String>,
}

impl DetailRecord {
    /// The search-shaped subset, suitable for storing as a favorite
    pub fn as_item(&self) -> SearchResultItem {
        SearchResultItem {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
            kind: self.kind.clone(),
        }
    }

    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => format!("{:.1}/10", rating),
            None => format!("{}/10", NOT_AVAILABLE),
        }
    }
}

/// One decoded search response
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchPage {
    pub items: Vec<SearchResultItem>,
    pub total_results: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed
    pub page: u32,
    pub total_results: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, total_results: 0 }
    }
}

impl Pagination {
    pub fn total_pages(&self) -> u32 {
        self.total_results.div_ceil(PAGE_SIZE)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// State for the results grid, pager and detail panel.
///
/// `is_loading` and `error_message` live together so a single lock covers
/// the pair.
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub results: Vec<SearchResultItem>,
    pub pagination: Pagination,
    pub selected_index: usize,
    pub detail: Option<DetailRecord>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl ContentState {
    pub fn selected_result(&self) -> Option<&SearchResultItem> {
        self.results.get(self.selected_index)
    }
}

fn not_available_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty() && v != NOT_AVAILABLE))
}

fn rating_from_string<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = not_available_as_none(deserializer)?;
    Ok(value.and_then(|v| v.trim().parse::<f32>().ok()))
}
