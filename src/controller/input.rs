//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Transport};
use crate::playback::AudioOutput;
use super::AppController;

impl<T, O> AppController<T, O>
where
    T: Transport,
    O: AudioOutput + Send + 'static,
    O::Handle: Send,
{
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            KeyCode::Tab => {
                model.cycle_section_forward().await;
                return Ok(());
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            _ => {}
        }

        let ui_state = model.get_ui_state().await;

        // The search box takes every printable key
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Enter => {
                    drop(model);
                    // Sub-fetches finish in the background
                    let _ = self.submit_search().await;
                }
                KeyCode::Esc => {
                    model.set_search_query(String::new()).await;
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                }
                KeyCode::Char(c) => {
                    model.append_to_search(c).await;
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.section_len(&model, ui_state.active_section).await;
                model.move_selection(-1, len).await;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.section_len(&model, ui_state.active_section).await;
                model.move_selection(1, len).await;
            }
            KeyCode::Enter => {
                drop(model);
                match ui_state.active_section {
                    ActiveSection::Related => {
                        let _ = self.open_related_artist(ui_state.related_selected).await;
                    }
                    ActiveSection::Albums => {
                        let controller = self.clone();
                        let index = ui_state.album_selected;
                        tokio::spawn(async move {
                            controller.select_album(index).await;
                        });
                    }
                    ActiveSection::Tracks => {
                        self.play_track(ui_state.track_selected).await;
                    }
                    ActiveSection::Search => {}
                }
            }
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.next_track().await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                self.previous_track().await;
            }
            KeyCode::Char('/') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    async fn section_len(&self, model: &crate::model::AppModel, section: ActiveSection) -> usize {
        match section {
            ActiveSection::Related => model.get_page_state().await.related_artists.len(),
            ActiveSection::Albums => model.get_page_state().await.album_row_count(),
            ActiveSection::Tracks => self.playback.lock().await.entries().len(),
            ActiveSection::Search => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::test_helpers::{backend, controller, loaded};
    use crate::model::{ActiveSection, Validation};
    use crate::playback::EntryState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn typing_and_enter_submits_the_query() {
        let controller = controller(backend());
        for c in "Kanye West".chars() {
            controller.handle_key_event(key(KeyCode::Char(c))).await.unwrap();
        }
        controller.handle_key_event(key(KeyCode::Enter)).await.unwrap();

        let ui_state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(ui_state.search_query, "Kanye West");
        assert_eq!(ui_state.validation, Some(Validation::Success));
        assert!(controller.model.lock().await.get_page_state().await.is_revealed());
    }

    #[tokio::test]
    async fn q_is_text_inside_the_search_box() {
        let controller = controller(backend());
        controller.handle_key_event(key(KeyCode::Char('q'))).await.unwrap();
        assert!(!controller.model.lock().await.should_quit().await);
        assert_eq!(controller.model.lock().await.get_ui_state().await.search_query, "q");

        controller.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        controller.handle_key_event(key(KeyCode::Char('q'))).await.unwrap();
        assert!(controller.model.lock().await.should_quit().await);
    }

    #[tokio::test]
    async fn ctrl_c_quits_from_anywhere() {
        let controller = controller(backend());
        controller
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(controller.model.lock().await.should_quit().await);
    }

    #[tokio::test]
    async fn sections_cycle_both_ways() {
        let controller = controller(backend());
        controller.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        controller.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(
            controller.model.lock().await.get_ui_state().await.active_section,
            ActiveSection::Albums
        );
        controller.handle_key_event(key(KeyCode::BackTab)).await.unwrap();
        controller.handle_key_event(key(KeyCode::BackTab)).await.unwrap();
        controller.handle_key_event(key(KeyCode::BackTab)).await.unwrap();
        assert_eq!(
            controller.model.lock().await.get_ui_state().await.active_section,
            ActiveSection::Tracks
        );
    }

    #[tokio::test]
    async fn enter_on_track_list_plays_selected_entry() {
        let controller = loaded("Kanye West").await;
        controller.model.lock().await.set_active_section(ActiveSection::Tracks).await;
        controller.handle_key_event(key(KeyCode::Down)).await.unwrap();
        controller.handle_key_event(key(KeyCode::Enter)).await.unwrap();

        let snapshot = controller.playback_snapshot().await;
        assert_eq!(snapshot.entries[1].state, EntryState::Playing);

        controller.handle_key_event(key(KeyCode::Char(' '))).await.unwrap();
        let snapshot = controller.playback_snapshot().await;
        assert_eq!(snapshot.entries[1].state, EntryState::Paused);
    }

    #[tokio::test]
    async fn error_notice_swallows_keys_until_dismissed() {
        let controller = controller(backend());
        controller.model.lock().await.set_error("offline".into()).await;
        controller.handle_key_event(key(KeyCode::Char('x'))).await.unwrap();
        assert_eq!(controller.model.lock().await.get_ui_state().await.search_query, "");

        controller.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        assert!(!controller.model.lock().await.has_error().await);
    }

    #[tokio::test]
    async fn help_popup_opens_and_closes() {
        let controller = controller(backend());
        controller.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        controller.handle_key_event(key(KeyCode::Char('h'))).await.unwrap();
        assert!(controller.model.lock().await.is_help_popup_open().await);
        controller.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        assert!(!controller.model.lock().await.is_help_popup_open().await);
    }
}
