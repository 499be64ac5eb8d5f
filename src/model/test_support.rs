//! Scripted collaborators for model and controller tests

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::content::{DetailRecord, SearchPage, SearchResultItem};
use super::error::{ApiError, PersistenceError};
use super::favorites::{FavoritesStore, KeyValueStore, MemoryStore};
use super::omdb_client::MovieApi;

/// `MovieApi` answering from canned responses.
///
/// Unknown searches answer `Movie not found!`, unknown ids `Incorrect IMDb ID.`
/// A gated query blocks until its sender fires.
#[derive(Default)]
pub struct FakeApi {
    searches: Mutex<HashMap<(String, u32), Result<SearchPage, ApiError>>>,
    details: Mutex<HashMap<String, Result<DetailRecord, ApiError>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_search(self, query: &str, page: u32, result: Result<SearchPage, ApiError>) -> Self {
        self.searches.lock().unwrap().insert((query.to_string(), page), result);
        self
    }

    pub fn with_details(self, imdb_id: &str, result: Result<DetailRecord, ApiError>) -> Self {
        self.details.lock().unwrap().insert(imdb_id.to_string(), result);
        self
    }

    /// Holds calls for `key` (a query or an id) until the returned sender fires
    pub fn gate(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub async fn wait_for_calls(&self, count: usize) {
        while self.calls.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }

    async fn pass_gate(&self, key: &str) {
        let gate = self.gates.lock().unwrap().remove(key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait]
impl MovieApi for FakeApi {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        self.calls.lock().unwrap().push(format!("search:{}:{}", query, page));
        self.pass_gate(query).await;
        self.searches
            .lock()
            .unwrap()
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Upstream("Movie not found!".to_string())))
    }

    async fn fetch_details(&self, imdb_id: &str) -> Result<DetailRecord, ApiError> {
        self.calls.lock().unwrap().push(format!("details:{}", imdb_id));
        self.pass_gate(imdb_id).await;
        self.details
            .lock()
            .unwrap()
            .get(imdb_id)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::Upstream("Incorrect IMDb ID.".to_string())))
    }
}

/// Store whose writes always fail
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Io(io::Error::other("disk full")))
    }
}

/// Favorites backed by a fresh in-memory store
pub fn memory_favorites() -> FavoritesStore {
    FavoritesStore::new(Arc::new(MemoryStore::default()))
}

pub fn item(imdb_id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "1999".to_string(),
        poster: None,
        kind: Some("movie".to_string()),
    }
}

/// A page of `count` generated items reporting `total` matches
pub fn page_of(count: usize, total: u32) -> SearchPage {
    SearchPage {
        items: (0..count)
            .map(|i| item(&format!("tt{:07}", i), &format!("Movie {}", i)))
            .collect(),
        total_results: total,
    }
}

pub fn detail(imdb_id: &str, title: &str) -> DetailRecord {
    DetailRecord {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "1999".to_string(),
        poster: None,
        kind: Some("movie".to_string()),
        genre: Some("Action, Sci-Fi".to_string()),
        director: Some("Lana Wachowski, Lilly Wachowski".to_string()),
        actors: Some("Keanu Reeves, Laurence Fishburne".to_string()),
        plot: Some("A hacker learns the nature of his reality.".to_string()),
        rating: Some(8.7),
        runtime: Some("136 min".to_string()),
        released: None,
    }
}
