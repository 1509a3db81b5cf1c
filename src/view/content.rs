//! Artist page rendering (profile, related artists, albums, track list)

use std::collections::HashSet;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, ArtistProfile, PageState, UiState, POPULAR_HEADER};
use crate::playback::{Entry, EntryState};
use super::utils::{border_style, calculate_num_width, render_scrollable_list, truncate_string};

pub fn render_artist_page(frame: &mut Frame, area: Rect, ui_state: &UiState, page: &PageState, entries: &[Entry]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Profile + related artists
            Constraint::Percentage(30), // Albums
            Constraint::Percentage(40), // Tracks
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Profile
            Constraint::Min(0),    // Related artists
        ])
        .split(columns[0]);

    if let Some(profile) = &page.profile {
        render_profile(frame, left[0], profile, &page.background);
    }
    render_related_artists(frame, left[1], ui_state, page);
    render_albums(frame, columns[1], ui_state, page);
    render_tracks(frame, columns[2], ui_state, &page.track_list_title, entries);
}

// The cover-art backdrop line stays empty until the albums arrive
fn render_profile(frame: &mut Frame, area: Rect, profile: &ArtistProfile, background: &str) {
    let width = area.width.saturating_sub(4) as usize;
    let image = if profile.image_url.is_empty() {
        "no image".to_string()
    } else {
        profile.image_url.clone()
    };

    let text = vec![
        Line::from(Span::styled(
            format!("🎤 {}", profile.name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_string(&image, width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            truncate_string(background, width),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let header = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Artist ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, area);
}

fn render_related_artists(frame: &mut Frame, area: Rect, ui_state: &UiState, page: &PageState) {
    let is_focused = ui_state.active_section == ActiveSection::Related;
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = page
        .related_artists
        .iter()
        .enumerate()
        .map(|(i, artist)| {
            let style = if i == ui_state.related_selected && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let icon = if artist.image_url.is_some() { "👤" } else { "  " };
            ListItem::new(format!("{} {}", icon, truncate_string(&artist.name, width.saturating_sub(3)))).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Related Artists ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    render_scrollable_list(frame, area, items, ui_state.related_selected, block);
}

fn render_albums(frame: &mut Frame, area: Rect, ui_state: &UiState, page: &PageState) {
    let is_focused = ui_state.active_section == ActiveSection::Albums;
    let width = area.width.saturating_sub(4) as usize;

    let names = std::iter::once(POPULAR_HEADER.to_string()).chain(page.album_tiles.iter().map(|tile| tile.display_name()));
    let items: Vec<ListItem> = if page.album_row_count() == 0 {
        Vec::new()
    } else {
        names
            .enumerate()
            .map(|(i, name)| {
                let is_active = i == page.active_album;
                let style = if i == ui_state.album_selected && is_focused {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else if is_active {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if is_active { "💿" } else { "  " };
                ListItem::new(format!("{} {}", marker, truncate_string(&name, width.saturating_sub(3)))).style(style)
            })
            .collect()
    };

    let distinct_covers = page.cover_art.iter().flatten().collect::<HashSet<_>>().len();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Albums ")
        .title_bottom(Line::from(format!(" {} covers ", distinct_covers)).right_aligned())
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    render_scrollable_list(frame, area, items, ui_state.album_selected, block);
}

fn render_tracks(frame: &mut Frame, area: Rect, ui_state: &UiState, title: &str, entries: &[Entry]) {
    let is_focused = ui_state.active_section == ActiveSection::Tracks;
    let num_width = calculate_num_width(entries.len());
    let title_width = (area.width.saturating_sub(4) as usize).saturating_sub(num_width + 4);

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let (indicator, state_style) = entry_marker(entry.state);
            let style = if i == ui_state.track_selected && is_focused {
                state_style.fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                state_style
            };
            ListItem::new(format!(
                "{}{:<num_width$} {}",
                indicator,
                i + 1,
                truncate_string(&entry.name, title_width),
                num_width = num_width
            ))
            .style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    render_scrollable_list(frame, area, items, ui_state.track_selected, block);
}

fn entry_marker(state: EntryState) -> (&'static str, Style) {
    match state {
        EntryState::Idle => (" ", Style::default()),
        EntryState::Playing => ("▶", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        EntryState::Paused => ("⏸", Style::default().fg(Color::Yellow)),
        EntryState::Invalid => ("✗", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)),
    }
}
