//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::content::{AlbumTile, ArtistProfile, PageState, RelatedArtist};
use super::types::{ActiveSection, UiState, Validation};

const ERROR_DISPLAY_TIME: Duration = Duration::from_secs(5);

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub page: Arc<Mutex<PageState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            page: Arc::new(Mutex::new(PageState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.active_section = ui_state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.active_section = ui_state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    /// Move the cursor of the active list, clamped to `len` rows
    pub async fn move_selection(&self, delta: isize, len: usize) {
        let mut guard = self.ui_state.lock().await;
        let ui_state = &mut *guard;
        let cursor = match ui_state.active_section {
            ActiveSection::Related => &mut ui_state.related_selected,
            ActiveSection::Albums => &mut ui_state.album_selected,
            ActiveSection::Tracks => &mut ui_state.track_selected,
            ActiveSection::Search => return,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub async fn append_to_search(&self, c: char) {
        self.ui_state.lock().await.search_query.push(c);
    }

    pub async fn set_search_query(&self, query: String) {
        self.ui_state.lock().await.search_query = query;
    }

    pub async fn backspace_search(&self) {
        self.ui_state.lock().await.search_query.pop();
    }

    pub async fn set_validation(&self, validation: Validation) {
        self.ui_state.lock().await.validation = Some(validation);
    }

    pub async fn set_error(&self, message: String) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.error_message = Some(message);
        ui_state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut ui_state = self.ui_state.lock().await;
        ui_state.error_message = None;
        ui_state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut ui_state = self.ui_state.lock().await;
        if let Some(timestamp) = ui_state.error_timestamp {
            if timestamp.elapsed() >= ERROR_DISPLAY_TIME {
                ui_state.error_message = None;
                ui_state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Rendered page
    // ========================================================================

    pub async fn get_page_state(&self) -> PageState {
        self.page.lock().await.clone()
    }

    pub async fn set_profile(&self, profile: ArtistProfile) {
        self.page.lock().await.profile = Some(profile);
    }

    pub async fn set_related_artists(&self, artists: Vec<RelatedArtist>) {
        self.page.lock().await.related_artists = artists;
        self.ui_state.lock().await.related_selected = 0;
    }

    /// Replace the album list; the "Popular" placeholder becomes active
    pub async fn set_album_list(&self, artist_id: String, tiles: Vec<AlbumTile>, cover_art: Vec<Option<String>>, background: String) {
        let mut page = self.page.lock().await;
        page.album_artist_id = artist_id;
        page.album_tiles = tiles;
        page.active_album = 0;
        page.cover_art = cover_art;
        page.background = background;
        drop(page);
        self.ui_state.lock().await.album_selected = 0;
    }

    pub async fn set_active_album(&self, index: usize) {
        self.page.lock().await.active_album = index;
    }

    pub async fn set_track_list_title(&self, title: String) {
        self.page.lock().await.track_list_title = title;
        self.ui_state.lock().await.track_selected = 0;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
