//! Layout rendering (top bar, footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, ContentState, SearchResultItem, UiState};
use super::utils::border_style;

pub fn render_top_bar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    favorites: &[SearchResultItem],
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(22), // Status
        ])
        .split(area);

    let is_focused = ui_state.active_section == ActiveSection::Search;

    let (search_text, search_style) = if ui_state.search_query.is_empty() {
        ("Type a movie title...".to_string(), Style::default().fg(Color::DarkGray))
    } else if is_focused {
        (format!("{}▏", ui_state.search_query), Style::default().fg(Color::Green))
    } else {
        (ui_state.search_query.clone(), Style::default().fg(Color::White))
    };

    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(search, chunks[0]);

    let status = if content_state.is_loading {
        Paragraph::new("⏳ Loading...").style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new(format!("★ {} favorites", favorites.len()))
            .style(Style::default().fg(Color::Cyan))
    };
    let status = status.block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(status, chunks[1]);
}

pub fn render_footer(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hints: &[(&str, &str)] = match ui_state.active_section {
        ActiveSection::Search => &[("Enter", "search"), ("Esc", "clear"), ("Tab", "results"), ("Ctrl+Q", "quit")],
        ActiveSection::Results => &[
            ("↑↓", "move"),
            ("Enter", "details"),
            ("F", "favorite"),
            ("←→", "page"),
            ("S", "favorite details"),
            ("C", "close details"),
            ("H", "help"),
        ],
        ActiveSection::Favorites => &[
            ("↑↓", "move"),
            ("Enter", "details"),
            ("Del", "remove"),
            ("C", "close details"),
            ("H", "help"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(format!(" {} ", key), Style::default().fg(Color::Green)),
                Span::styled(format!("{}  ", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
