//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::content::{ContentState, Pagination, SearchResultItem};
use super::favorites::{Favorites, FavoritesStore};
use super::omdb_client::MovieApi;
use super::types::{ActiveSection, UiState};

pub const SEARCH_FAILED_MESSAGE: &str = "Error searching movies.";
pub const DETAILS_FAILED_MESSAGE: &str = "Error loading movie details.";

/// Main application model containing all state.
///
/// Shared as `Arc<AppModel>`. Guards are never held across an API await, so
/// the draw loop can snapshot state while a request is outstanding.
/// Lock order when nesting: favorites, then ui_state or content_state.
pub struct AppModel {
    api: Arc<dyn MovieApi>,
    favorites_store: FavoritesStore,
    ui_state: Mutex<UiState>,
    content_state: Mutex<ContentState>,
    favorites: Mutex<Favorites>,
    should_quit: Mutex<bool>,
}

impl AppModel {
    pub fn new(api: Arc<dyn MovieApi>, favorites_store: FavoritesStore) -> Self {
        let favorites = favorites_store.load();
        Self {
            api,
            favorites_store,
            ui_state: Mutex::new(UiState::default()),
            content_state: Mutex::new(ContentState::default()),
            favorites: Mutex::new(favorites),
            should_quit: Mutex::new(false),
        }
    }

    // ========================================================================
    // Search, details and favorites
    // ========================================================================

    pub async fn set_query(&self, text: String) {
        self.ui_state.lock().await.search_query = text;
    }

    /// Runs the current query for `page`. Does nothing while the query is empty.
    ///
    /// Overlapping calls are not cancelled: each applies its own outcome when it
    /// settles, so the last one to settle decides the final state.
    pub async fn run_search(&self, page: u32) {
        let query = self.ui_state.lock().await.search_query.clone();
        if query.is_empty() {
            tracing::debug!("Search skipped, query is empty");
            return;
        }

        self.begin_request().await;
        tracing::debug!(query = %query, page, "Performing search");

        let result = self.api.search(&query, page).await;

        let mut content = self.content_state.lock().await;
        match result {
            Ok(found) => {
                tracing::info!(
                    query = %query,
                    page,
                    items = found.items.len(),
                    total = found.total_results,
                    "Search completed successfully"
                );
                content.results = found.items;
                content.pagination = Pagination {
                    page,
                    total_results: found.total_results,
                };
                content.selected_index = 0;
                content.error_message = None;
            }
            Err(e) => {
                tracing::warn!(query = %query, page, error = %e, "Search failed");
                content.results.clear();
                content.pagination.total_results = 0;
                content.selected_index = 0;
                content.error_message = Some(e.user_message(SEARCH_FAILED_MESSAGE));
            }
        }
        content.is_loading = false;
    }

    /// Fetches and shows a detail record. A failure keeps the detail that was
    /// already open.
    pub async fn view_details(&self, imdb_id: &str) {
        self.begin_request().await;

        let result = self.api.fetch_details(imdb_id).await;

        let mut content = self.content_state.lock().await;
        match result {
            Ok(detail) => {
                tracing::info!(imdb_id, title = %detail.title, "Details loaded");
                content.detail = Some(detail);
                content.error_message = None;
            }
            Err(e) => {
                tracing::warn!(imdb_id, error = %e, "Detail lookup failed");
                content.error_message = Some(e.user_message(DETAILS_FAILED_MESSAGE));
            }
        }
        content.is_loading = false;
    }

    pub async fn close_details(&self) {
        self.content_state.lock().await.detail = None;
    }

    /// Adds or removes `item` and writes the whole list through to storage.
    /// Returns whether the item is a favorite afterwards.
    ///
    /// A failed write keeps the in-memory change and is reported in the error
    /// field.
    pub async fn toggle_favorite(&self, item: SearchResultItem) -> bool {
        let mut favorites = self.favorites.lock().await;
        let imdb_id = item.imdb_id.clone();
        let is_favorite = favorites.toggle(item);
        tracing::debug!(imdb_id = %imdb_id, is_favorite, count = favorites.len(), "Favorite toggled");

        let saved = self.favorites_store.save(&favorites);

        {
            let mut ui = self.ui_state.lock().await;
            if favorites.is_empty() {
                ui.favorites_selected = 0;
            } else {
                ui.favorites_selected = ui.favorites_selected.min(favorites.len() - 1);
            }
        }

        if let Err(e) = saved {
            tracing::warn!(error = %e, "Failed to persist favorites");
            let mut content = self.content_state.lock().await;
            content.error_message = Some(format!("Could not save favorites: {}", e));
        }

        is_favorite
    }

    /// Loading and error change together under one guard
    async fn begin_request(&self) {
        let mut content = self.content_state.lock().await;
        content.is_loading = true;
        content.error_message = None;
    }

    // ========================================================================
    // Snapshots for rendering
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn get_favorites(&self) -> Vec<SearchResultItem> {
        self.favorites.lock().await.items().to_vec()
    }

    #[cfg(test)]
    pub async fn is_favorite(&self, imdb_id: &str) -> bool {
        self.favorites.lock().await.contains(imdb_id)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn move_selection_up(&self) {
        let section = self.ui_state.lock().await.active_section;
        match section {
            ActiveSection::Results => {
                let mut content = self.content_state.lock().await;
                content.selected_index = content.selected_index.saturating_sub(1);
            }
            ActiveSection::Favorites => {
                let mut state = self.ui_state.lock().await;
                state.favorites_selected = state.favorites_selected.saturating_sub(1);
            }
            ActiveSection::Search => {}
        }
    }

    pub async fn move_selection_down(&self) {
        let section = self.ui_state.lock().await.active_section;
        match section {
            ActiveSection::Results => {
                let mut content = self.content_state.lock().await;
                if content.selected_index < content.results.len().saturating_sub(1) {
                    content.selected_index += 1;
                }
            }
            ActiveSection::Favorites => {
                let count = self.favorites.lock().await.len();
                let mut state = self.ui_state.lock().await;
                if state.favorites_selected < count.saturating_sub(1) {
                    state.favorites_selected += 1;
                }
            }
            ActiveSection::Search => {}
        }
    }

    pub async fn get_selected_result(&self) -> Option<SearchResultItem> {
        self.content_state.lock().await.selected_result().cloned()
    }

    pub async fn get_selected_favorite(&self) -> Option<SearchResultItem> {
        let favorites = self.favorites.lock().await;
        let index = self.ui_state.lock().await.favorites_selected;
        favorites.items().get(index).cloned()
    }

    /// Page before the current one, if the pager offers it
    pub async fn previous_page(&self) -> Option<u32> {
        let content = self.content_state.lock().await;
        (!content.results.is_empty() && content.pagination.has_prev())
            .then(|| content.pagination.page - 1)
    }

    /// Page after the current one, if the pager offers it
    pub async fn next_page(&self) -> Option<u32> {
        let content = self.content_state.lock().await;
        (!content.results.is_empty() && content.pagination.has_next())
            .then(|| content.pagination.page + 1)
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}
