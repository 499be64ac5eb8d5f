//! Results grid and pager rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, ContentState, Pagination, SearchResultItem, UiState};
use super::utils::{border_style, row_style, truncate_string};

pub fn render_results_area(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    favorites: &[SearchResultItem],
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;

    // Without results an error takes the whole area, otherwise it sits above the grid
    if let (Some(error_msg), true) = (&content_state.error_message, content_state.results.is_empty()) {
        let error = Paragraph::new(error_msg.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .padding(Padding::horizontal(1))
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(error, area);
        return;
    }

    if content_state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .padding(Padding::horizontal(1))
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(loading, area);
        return;
    }

    if content_state.results.is_empty() {
        let empty = Paragraph::new("Type a title in the search bar and press Enter\n\nUse Tab to move between sections\nPress H for all keys")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Results ")
                    .padding(Padding::horizontal(1))
                    .border_style(border_style(is_focused)),
            );
        frame.render_widget(empty, area);
        return;
    }

    let error_height = if content_state.error_message.is_some() { 1 } else { 0 };

    // The pager only exists while there are results
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(error_height), // Error line
            Constraint::Min(0),               // Grid
            Constraint::Length(1),            // Pager
        ])
        .split(area);

    if let Some(ref error_msg) = content_state.error_message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" ✖ {}", error_msg),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))),
            chunks[0],
        );
    }

    render_grid(frame, chunks[1], content_state, favorites, is_focused);
    frame.render_widget(
        Paragraph::new(pager_line(&content_state.pagination)).centered(),
        chunks[2],
    );
}

fn render_grid(
    frame: &mut Frame,
    area: Rect,
    content_state: &ContentState,
    favorites: &[SearchResultItem],
    is_focused: bool,
) {
    let title_width = area.width.saturating_sub(2 + 3 + 12 + 9 + 10 + 4) as usize;

    let rows: Vec<Row> = content_state
        .results
        .iter()
        .enumerate()
        .map(|(i, movie)| {
            let is_favorite = favorites.iter().any(|fav| fav.imdb_id == movie.imdb_id);
            let marker = if is_favorite { "★" } else { "☆" };
            let poster = if movie.poster.is_some() { "poster" } else { "no image" };
            Row::new(vec![
                Cell::from(Span::styled(marker, Style::default().fg(Color::Yellow))),
                Cell::from(truncate_string(&movie.title, title_width.max(8))),
                Cell::from(movie.year.clone()),
                Cell::from(movie.kind.clone().unwrap_or_default()),
                Cell::from(Span::styled(poster, Style::default().fg(Color::DarkGray))),
            ])
            .style(row_style(i == content_state.selected_index, is_focused))
        })
        .collect();

    let header = Row::new(vec!["", "Title", "Year", "Type", "Poster"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let pagination = &content_state.pagination;
    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Results ({} found) ", pagination.total_results))
            .border_style(border_style(is_focused)),
    )
    .row_highlight_style(Style::default()); // Highlight handled by row styles

    let mut table_state = TableState::default();
    table_state.select(Some(content_state.selected_index));

    frame.render_stateful_widget(table, area, &mut table_state);
}

/// `◀ Prev  Page N of M  Next ▶` with unavailable directions dimmed
pub fn pager_line(pagination: &Pagination) -> Line<'static> {
    let control_style = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    Line::from(vec![
        Span::styled("◀ Prev", control_style(pagination.has_prev())),
        Span::raw(format!(
            "   Page {} of {}   ",
            pagination.page,
            pagination.total_pages()
        )),
        Span::styled("Next ▶", control_style(pagination.has_next())),
    ])
}
