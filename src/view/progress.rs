//! Transport bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::playback::{PlaybackSnapshot, TransportIcon};

pub fn render_transport_bar(frame: &mut Frame, area: Rect, playback: &PlaybackSnapshot) {
    // The icon shows what the control will do
    let icon = match playback.icon {
        TransportIcon::Play => Span::styled("▶", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        TransportIcon::Pause => Span::styled("⏸", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    };

    let status = match (&playback.now_playing, playback.is_playing) {
        (Some(track), true) => Span::raw(format!("  {}", track)),
        (Some(track), false) => Span::styled(format!("  {} (paused)", track), Style::default().fg(Color::DarkGray)),
        (None, _) => Span::styled("  Nothing playing", Style::default().fg(Color::DarkGray)),
    };

    let controls_info = " Space: Play/Pause | N: Next | P: Previous ";

    let bar = Paragraph::new(Line::from(vec![icon, status])).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Preview ")
            .title_bottom(Line::from(controls_info).right_aligned())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(bar, area);
}
