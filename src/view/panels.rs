//! Side panels: selected detail and favorites list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, DetailRecord, SearchResultItem, UiState};
use super::utils::{border_style, row_style};

pub fn render_detail_panel(frame: &mut Frame, area: Rect, detail: &DetailRecord) {
    let field = |label: &'static str, value: Option<&str>| {
        Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(value.unwrap_or("N/A").to_string()),
        ])
    };

    let rating = detail.rating_label();
    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Year", Some(detail.year.as_str())),
        field("Genre", detail.genre.as_deref()),
        field("Director", detail.director.as_deref()),
        field("Cast", detail.actors.as_deref()),
        field("Rating", Some(rating.as_str())),
    ];
    if detail.runtime.is_some() {
        lines.push(field("Runtime", detail.runtime.as_deref()));
    }
    if detail.released.is_some() {
        lines.push(field("Released", detail.released.as_deref()));
    }
    lines.push(Line::from(""));
    lines.push(field("Plot", detail.plot.as_deref()));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .title_bottom(Line::from(" S favorite  C close ").right_aligned())
                .padding(Padding::horizontal(1))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(panel, area);
}

pub fn render_favorites_panel(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    favorites: &[SearchResultItem],
) {
    let is_focused = ui_state.active_section == ActiveSection::Favorites;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" ★ My Favorites ({}) ", favorites.len()))
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    if favorites.is_empty() {
        let empty = Paragraph::new("Press F on a result to add it here")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = favorites
        .iter()
        .enumerate()
        .map(|(i, fav)| {
            ListItem::new(format!("{} ({})", fav.title, fav.year))
                .style(row_style(i == ui_state.favorites_selected, is_focused))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.favorites_selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}
