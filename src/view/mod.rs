//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists)
//! - `layout`: Search bar and landing placeholder
//! - `content`: Artist page (profile, related artists, albums, tracks)
//! - `progress`: Transport bar
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PageState, UiState};
use crate::playback::PlaybackSnapshot;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackSnapshot, ui_state: &UiState, page: &PageState) {
        let revealed = page.is_revealed();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                             // Search bar
                Constraint::Min(0),                                // Artist page
                Constraint::Length(if revealed { 3 } else { 0 }), // Transport bar
            ])
            .split(frame.area());

        layout::render_search_bar(frame, chunks[0], ui_state);

        // Nothing but the search bar until a profile has been rendered
        if revealed {
            content::render_artist_page(frame, chunks[1], ui_state, page, &playback.entries);
            progress::render_transport_bar(frame, chunks[2], playback);
        } else {
            layout::render_landing(frame, chunks[1]);
        }

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
