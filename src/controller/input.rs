//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Help popup swallows everything until closed
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        match ui_state.active_section {
            ActiveSection::Search => match key.code {
                KeyCode::Enter => {
                    self.submit_search().await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.set_query(String::new()).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    let mut query = ui_state.search_query;
                    query.pop();
                    model.set_query(query).await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) {
                        // Ctrl+Q still quits while typing, other chords are not text
                        if c == 'q' || c == 'Q' {
                            model.set_should_quit(true).await;
                        }
                        return Ok(());
                    }
                    let mut query = ui_state.search_query;
                    query.push(c);
                    model.set_query(query).await;
                    return Ok(());
                }
                _ => {}
            },
            ActiveSection::Results => match key.code {
                KeyCode::Enter => {
                    if let Some(item) = model.get_selected_result().await {
                        self.spawn_view_details(item.imdb_id);
                    }
                    return Ok(());
                }
                KeyCode::Char('f') | KeyCode::Char('F') => {
                    if let Some(item) = model.get_selected_result().await {
                        self.toggle_favorite(item).await;
                    }
                    return Ok(());
                }
                KeyCode::Left | KeyCode::Char('[') => {
                    self.previous_page().await;
                    return Ok(());
                }
                KeyCode::Right | KeyCode::Char(']') => {
                    self.next_page().await;
                    return Ok(());
                }
                _ => {}
            },
            ActiveSection::Favorites => match key.code {
                KeyCode::Enter => {
                    if let Some(item) = model.get_selected_favorite().await {
                        self.spawn_view_details(item.imdb_id);
                    }
                    return Ok(());
                }
                KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Delete => {
                    if let Some(item) = model.get_selected_favorite().await {
                        self.toggle_favorite(item).await;
                    }
                    return Ok(());
                }
                _ => {}
            },
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => {
                model.close_details().await;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.toggle_detail_favorite().await;
            }
            KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::test_support::{detail, memory_favorites, page_of, FakeApi};
    use crate::model::AppModel;
    use crate::view::AppView;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn screen_text(controller: &AppController) -> String {
        let model = &controller.model;
        let (ui_state, content_state, favorites) = (
            model.get_ui_state().await,
            model.get_content_state().await,
            model.get_favorites().await,
        );

        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal
            .draw(|f| AppView::render(f, &ui_state, &content_state, &favorites))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn controller_with(api: Arc<FakeApi>) -> AppController {
        AppController::new(Arc::new(AppModel::new(api, memory_favorites())))
    }

    async fn type_text(controller: &AppController, text: &str) {
        for c in text.chars() {
            controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
    }

    async fn settle(controller: &AppController) {
        while controller.model.get_content_state().await.is_loading {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn typing_edits_the_query() {
        let controller = controller_with(Arc::new(FakeApi::default()));

        type_text(&controller, "Matrixx").await;
        controller.handle_key_event(press(KeyCode::Backspace)).await.unwrap();
        assert_eq!(controller.model.get_ui_state().await.search_query, "Matrix");

        // 'q' is text while typing
        type_text(&controller, " q").await;
        assert!(!controller.model.should_quit().await);

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert_eq!(controller.model.get_ui_state().await.search_query, "");
    }

    #[tokio::test]
    async fn control_chords_are_not_query_text() {
        let controller = controller_with(Arc::new(FakeApi::default()));

        type_text(&controller, "Mat").await;
        controller.handle_key_event(ctrl('w')).await.unwrap();
        controller.handle_key_event(ctrl('c')).await.unwrap();
        assert_eq!(controller.model.get_ui_state().await.search_query, "Mat");
        assert!(!controller.model.should_quit().await);

        controller.handle_key_event(ctrl('q')).await.unwrap();
        assert!(controller.model.should_quit().await);
        assert_eq!(controller.model.get_ui_state().await.search_query, "Mat");
    }

    #[tokio::test]
    async fn failed_details_leave_grid_and_pager_on_screen() {
        let api = Arc::new(
            FakeApi::default()
                .with_search("Matrix", 1, Ok(page_of(10, 25)))
                .with_search("Matrix", 2, Ok(page_of(10, 25))),
        );
        let controller = controller_with(api.clone());

        type_text(&controller, "Matrix").await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(1).await;
        settle(&controller).await;

        // No detail is scripted for the selected row
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(2).await;
        settle(&controller).await;

        let content = controller.model.get_content_state().await;
        assert_eq!(content.error_message.as_deref(), Some("Incorrect IMDb ID."));
        assert_eq!(content.results.len(), 10);

        // Every key that still acts on the grid has its control visible
        let text = screen_text(&controller).await;
        assert!(text.contains("Incorrect IMDb ID."));
        assert!(text.contains("Movie 0"));
        assert!(text.contains("Page 1 of 3"));

        controller.handle_key_event(press(KeyCode::Char(']'))).await.unwrap();
        api.wait_for_calls(3).await;
        settle(&controller).await;

        assert_eq!(
            api.calls(),
            vec![
                "search:Matrix:1".to_string(),
                "details:tt0000000".to_string(),
                "search:Matrix:2".to_string(),
            ]
        );
        let content = controller.model.get_content_state().await;
        assert_eq!(content.pagination.page, 2);
        assert!(content.error_message.is_none());
    }

    #[tokio::test]
    async fn s_toggles_the_open_detail_as_favorite() {
        let api = Arc::new(
            FakeApi::default()
                .with_search("Matrix", 1, Ok(page_of(1, 1)))
                .with_details("tt0000000", Ok(detail("tt0000000", "Movie 0"))),
        );
        let controller = controller_with(api.clone());

        // Nothing open yet
        controller.model.set_active_section(ActiveSection::Results).await;
        controller.handle_key_event(press(KeyCode::Char('s'))).await.unwrap();
        assert!(controller.model.get_favorites().await.is_empty());

        controller.model.set_active_section(ActiveSection::Search).await;
        type_text(&controller, "Matrix").await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(1).await;
        settle(&controller).await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(2).await;
        settle(&controller).await;

        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        assert_eq!(controller.model.get_ui_state().await.active_section, ActiveSection::Favorites);

        controller.handle_key_event(press(KeyCode::Char('s'))).await.unwrap();
        let favorites = controller.model.get_favorites().await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].imdb_id, "tt0000000");
        assert_eq!(favorites[0].title, "Movie 0");

        controller.handle_key_event(press(KeyCode::Char('S'))).await.unwrap();
        assert!(controller.model.get_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn enter_on_empty_query_does_not_search() {
        let api = Arc::new(FakeApi::default());
        let controller = controller_with(api.clone());

        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        tokio::task::yield_now().await;

        assert!(api.calls().is_empty());
        assert_eq!(controller.model.get_ui_state().await.active_section, ActiveSection::Search);
    }

    #[tokio::test]
    async fn enter_searches_first_page_and_focuses_results() {
        let api = Arc::new(FakeApi::default().with_search("Matrix", 1, Ok(page_of(3, 3))));
        let controller = controller_with(api.clone());

        type_text(&controller, "Matrix").await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(1).await;
        settle(&controller).await;

        assert_eq!(api.calls(), vec!["search:Matrix:1".to_string()]);
        assert_eq!(controller.model.get_content_state().await.results.len(), 3);
        assert_eq!(controller.model.get_ui_state().await.active_section, ActiveSection::Results);
    }

    #[tokio::test]
    async fn disabled_pager_keys_issue_no_request() {
        let api = Arc::new(FakeApi::default().with_search("Matrix", 1, Ok(page_of(3, 3))));
        let controller = controller_with(api.clone());

        type_text(&controller, "Matrix").await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(1).await;
        settle(&controller).await;

        controller.handle_key_event(press(KeyCode::Left)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Right)).await.unwrap();
        tokio::task::yield_now().await;

        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn next_page_key_requests_following_page() {
        let api = Arc::new(
            FakeApi::default()
                .with_search("Matrix", 1, Ok(page_of(10, 15)))
                .with_search("Matrix", 2, Ok(page_of(5, 15))),
        );
        let controller = controller_with(api.clone());

        type_text(&controller, "Matrix").await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(1).await;
        settle(&controller).await;

        controller.handle_key_event(press(KeyCode::Char(']'))).await.unwrap();
        api.wait_for_calls(2).await;
        settle(&controller).await;

        let content = controller.model.get_content_state().await;
        assert_eq!(content.pagination.page, 2);
        assert_eq!(content.results.len(), 5);
    }

    #[tokio::test]
    async fn favorite_and_details_keys_on_results() {
        let api = Arc::new(
            FakeApi::default()
                .with_search("Matrix", 1, Ok(page_of(2, 2)))
                .with_details("tt0000001", Ok(detail("tt0000001", "Movie 1"))),
        );
        let controller = controller_with(api.clone());

        type_text(&controller, "Matrix").await;
        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(1).await;
        settle(&controller).await;

        controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('f'))).await.unwrap();
        assert!(controller.model.is_favorite("tt0000001").await);

        controller.handle_key_event(press(KeyCode::Enter)).await.unwrap();
        api.wait_for_calls(2).await;
        settle(&controller).await;
        let content = controller.model.get_content_state().await;
        assert_eq!(content.detail.map(|d| d.title), Some("Movie 1".to_string()));

        controller.handle_key_event(press(KeyCode::Char('c'))).await.unwrap();
        assert!(controller.model.get_content_state().await.detail.is_none());
    }

    #[tokio::test]
    async fn help_popup_blocks_other_keys() {
        let controller = controller_with(Arc::new(FakeApi::default()));
        controller.model.set_active_section(ActiveSection::Results).await;

        controller.handle_key_event(press(KeyCode::Char('h'))).await.unwrap();
        assert!(controller.model.is_help_popup_open().await);

        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!controller.model.should_quit().await);

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(controller.model.should_quit().await);
    }
}
