//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! Rendering is a pure function of the state snapshots taken by the draw loop.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared styling and formatting helpers
//! - `layout`: Top bar and footer
//! - `content`: Results grid and pager
//! - `panels`: Detail panel and favorites panel
//! - `overlays`: Help popup

mod utils;
mod layout;
mod content;
mod panels;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, SearchResultItem, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        content_state: &ContentState,
        favorites: &[SearchResultItem],
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + status
                Constraint::Min(0),    // Results + side panels
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, content_state, favorites);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Results grid
                Constraint::Percentage(40), // Details + favorites
            ])
            .split(chunks[1]);

        content::render_results_area(frame, main_chunks[0], ui_state, content_state, favorites);

        match &content_state.detail {
            Some(detail) => {
                let side_chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Percentage(65), // Details
                        Constraint::Min(0),         // Favorites
                    ])
                    .split(main_chunks[1]);
                panels::render_detail_panel(frame, side_chunks[0], detail);
                panels::render_favorites_panel(frame, side_chunks[1], ui_state, favorites);
            }
            None => {
                panels::render_favorites_panel(frame, main_chunks[1], ui_state, favorites);
            }
        }

        layout::render_footer(frame, chunks[2], ui_state);

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
