//! Favorites list and its write-through persistence

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::content::SearchResultItem;
use super::error::PersistenceError;

const FAVORITES_KEY: &str = "favorites";

/// Synchronous string-keyed store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Stores each key as `<dir>/<key>.json`
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        // Write aside and rename so a reader never sees half a file
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// Loads and saves the favorites array under a fixed key
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn from_dir(dir: &Path) -> Self {
        Self::new(Arc::new(FileStore::new(dir)))
    }

    /// Never fails: absent or unreadable data yields an empty list.
    pub fn load(&self) -> Favorites {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Favorites::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read favorites, starting empty");
                return Favorites::default();
            }
        };

        match serde_json::from_str::<Vec<SearchResultItem>>(&raw) {
            Ok(items) => {
                let favorites = Favorites::from_items(items);
                tracing::debug!(count = favorites.len(), "Favorites loaded");
                favorites
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored favorites are malformed, starting empty");
                Favorites::default()
            }
        }
    }

    /// Overwrites the stored array with the full list
    pub fn save(&self, favorites: &Favorites) -> Result<(), PersistenceError> {
        let content = serde_json::to_string(favorites.items())?;
        self.store.set(FAVORITES_KEY, &content)
    }
}

/// Ordered favorites, unique by IMDb id
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Favorites {
    items: Vec<SearchResultItem>,
}

impl Favorites {
    /// Keeps the first occurrence of each id
    pub fn from_items(items: Vec<SearchResultItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.imdb_id.clone()))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[SearchResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.items.iter().any(|fav| fav.imdb_id == imdb_id)
    }

    /// Removes the entry with the same id, or appends the item.
    /// Returns whether the item is a favorite afterwards.
    pub fn toggle(&mut self, item: SearchResultItem) -> bool {
        if self.contains(&item.imdb_id) {
            self.items.retain(|fav| fav.imdb_id != item.imdb_id);
            false
        } else {
            self.items.push(item);
            true
        }
    }
}

/// In-process store for tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
