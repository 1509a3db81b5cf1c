//! Core type definitions for the application

use std::time::Instant;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Related,
    Albums,
    Tracks,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Related,
            ActiveSection::Related => ActiveSection::Albums,
            ActiveSection::Albums => ActiveSection::Tracks,
            ActiveSection::Tracks => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Tracks,
            ActiveSection::Related => ActiveSection::Search,
            ActiveSection::Albums => ActiveSection::Related,
            ActiveSection::Tracks => ActiveSection::Albums,
        }
    }
}

/// Outcome of the last artist lookup, shown on the search bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Success,
    Failure,
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub validation: Option<Validation>,
    pub related_selected: usize,
    pub album_selected: usize,
    pub track_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            validation: None,
            related_selected: 0,
            album_selected: 0,
            track_selected: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
