//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: UI-level types (focused section, query, popups)
//! - `content`: Catalog records, pagination and content area state
//! - `error`: API and persistence error types
//! - `favorites`: Favorites list and its key-value persistence
//! - `omdb_client`: OMDb API client
//! - `app_model`: Main application model with state management methods

mod types;
mod content;
mod error;
mod favorites;
mod omdb_client;
mod app_model;

#[cfg(test)]
pub(crate) mod test_support;

pub use types::{ActiveSection, UiState};

pub use content::{ContentState, DetailRecord, Pagination, SearchResultItem};

pub use favorites::FavoritesStore;

pub use omdb_client::{MovieApi, OmdbClient};

pub use app_model::AppModel;
