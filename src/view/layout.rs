//! Layout rendering (search bar, landing placeholder)

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, UiState, Validation};

pub fn render_search_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let is_focused = ui_state.active_section == ActiveSection::Search;

    // Validation of the last lookup wins over focus
    let (border_style, marker) = match ui_state.validation {
        Some(Validation::Success) => (Style::default().fg(Color::Green), Span::styled(" ✓", Style::default().fg(Color::Green))),
        Some(Validation::Failure) => (Style::default().fg(Color::Red), Span::styled(" ✗ no such artist", Style::default().fg(Color::Red))),
        None if is_focused => (Style::default().fg(Color::Green), Span::raw("")),
        None => (Style::default(), Span::raw("")),
    };

    let text_style = if is_focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let query = if ui_state.search_query.is_empty() && is_focused {
        Span::styled("Type an artist name and press Enter...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(ui_state.search_query.clone(), text_style)
    };

    let search = Paragraph::new(Line::from(vec![query, marker])).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Artist ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(search, area);
}

/// Shown until the first artist has been loaded
pub fn render_landing(frame: &mut Frame, area: Rect) {
    let text = "Search for an artist to see their top tracks, albums and related artists\n\nPress H for help";
    let landing = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).padding(Padding::vertical(1)));
    frame.render_widget(landing, area);
}
