//! Search, pagination, detail and favorites actions
//!
//! Network-backed actions run on their own task so the draw loop keeps
//! rendering the loading state. Favorites toggles are awaited in place.

use tokio::task::JoinHandle;

use crate::model::{ActiveSection, SearchResultItem};
use super::AppController;

impl AppController {
    pub fn spawn_search(&self, page: u32) -> JoinHandle<()> {
        let model = self.model.clone();
        tokio::spawn(async move {
            model.run_search(page).await;
        })
    }

    pub async fn submit_search(&self) -> Option<JoinHandle<()>> {
        let query = self.model.get_ui_state().await.search_query;
        if query.is_empty() {
            return None;
        }
        self.model.set_active_section(ActiveSection::Results).await;
        Some(self.spawn_search(1))
    }

    /// Requests the previous page if the pager has it enabled
    pub async fn previous_page(&self) -> Option<JoinHandle<()>> {
        let page = self.model.previous_page().await?;
        tracing::debug!(page, "Previous page");
        Some(self.spawn_search(page))
    }

    /// Requests the next page if the pager has it enabled
    pub async fn next_page(&self) -> Option<JoinHandle<()>> {
        let page = self.model.next_page().await?;
        tracing::debug!(page, "Next page");
        Some(self.spawn_search(page))
    }

    pub fn spawn_view_details(&self, imdb_id: String) -> JoinHandle<()> {
        let model = self.model.clone();
        tokio::spawn(async move {
            model.view_details(&imdb_id).await;
        })
    }

    /// Adds or removes the movie shown in the detail panel, if one is open
    pub async fn toggle_detail_favorite(&self) {
        if let Some(detail) = self.model.get_content_state().await.detail {
            self.toggle_favorite(detail.as_item()).await;
        }
    }

    pub async fn toggle_favorite(&self, item: SearchResultItem) {
        let title = item.title.clone();
        let is_favorite = self.model.toggle_favorite(item).await;
        tracing::info!(title = %title, is_favorite, "Favorite updated");
    }
}
