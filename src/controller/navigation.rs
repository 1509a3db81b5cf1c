//! Artist search and page navigation

use crate::error::PipelineError;
use crate::model::{ActiveSection, Transport};
use crate::pipeline::{FanOut, LoadOutcome};
use crate::playback::AudioOutput;
use super::AppController;

impl<T, O> AppController<T, O>
where
    T: Transport,
    O: AudioOutput + Send + 'static,
    O::Handle: Send,
{
    /// Submit the search box contents exactly as typed
    pub async fn submit_search(&self) -> Option<FanOut> {
        let query = self.model.lock().await.get_ui_state().await.search_query;
        self.load_artist(&query).await
    }

    /// Load an artist and report the result on the search bar.
    ///
    /// The returned sub-fetches keep running when dropped.
    pub async fn load_artist(&self, query: &str) -> Option<FanOut> {
        let outcome = self.pipeline.load_artist(query).await;

        let model = self.model.lock().await;
        if let Some(validation) = outcome.validation() {
            model.set_validation(validation).await;
        }

        match outcome {
            LoadOutcome::Resolved { profile, fetches } => {
                tracing::info!(artist = %profile.name, "Artist page loading");
                Some(fetches)
            }
            LoadOutcome::Failed(PipelineError::NotFound { .. }) => None,
            LoadOutcome::Failed(PipelineError::Fetch(e)) => {
                model.set_error(Self::format_error(&e)).await;
                None
            }
            LoadOutcome::Superseded => None,
        }
    }

    /// Click on a related artist: load it as if it had been searched for
    pub async fn open_related_artist(&self, index: usize) -> Option<FanOut> {
        let name = {
            let model = self.model.lock().await;
            let page = model.get_page_state().await;
            let name = page.related_artists.get(index)?.name.clone();
            model.set_search_query(name.clone()).await;
            model.set_active_section(ActiveSection::Search).await;
            name
        };
        self.load_artist(&name).await
    }

    /// Click on an album row, where row 0 is the "Popular" placeholder
    pub async fn select_album(&self, index: usize) {
        let selection = {
            let model = self.model.lock().await;
            let Some(selection) = model.get_page_state().await.album_selection(index) else {
                tracing::debug!(index, "No album at row");
                return;
            };
            model.set_active_album(index).await;
            selection
        };

        tracing::debug!(album_id = %selection.album_id, "Album selected");
        // Failures are rendered by the pipeline
        let _ = self.pipeline.select_album(&selection).await;
    }
}

#[cfg(test)]
mod tests {
    use crate::controller::test_helpers::{artist, backend, controller, loaded};
    use std::time::Duration;

    use crate::model::{Endpoint, Validation};
    use crate::pipeline::testing::{FakeTransport, Reply};

    #[tokio::test]
    async fn successful_load_fills_the_page() {
        let controller = loaded("Kanye West").await;

        let model = controller.model.lock().await;
        assert_eq!(model.get_ui_state().await.validation, Some(Validation::Success));
        let page = model.get_page_state().await;
        assert!(page.is_revealed());
        assert_eq!(page.track_list_title, "Popular");
        assert_eq!(page.album_row_count(), 2);
        assert_eq!(page.related_artists.len(), 1);
        drop(model);

        assert_eq!(controller.playback.lock().await.entries().len(), 3);
    }

    #[tokio::test]
    async fn empty_search_is_a_failure_without_notice() {
        let controller = controller(FakeTransport::default().with(artist(""), r#"{"artists":{"items":[]}}"#));
        assert!(controller.submit_search().await.is_none());

        let ui_state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(ui_state.validation, Some(Validation::Failure));
        assert!(ui_state.error_message.is_none());
        assert!(!controller.model.lock().await.get_page_state().await.is_revealed());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_failure_with_notice() {
        let controller = controller(FakeTransport::default().reply(artist("Kanye West"), Reply::Status(503)));
        assert!(controller.load_artist("Kanye West").await.is_none());

        let ui_state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(ui_state.validation, Some(Validation::Failure));
        assert!(ui_state.error_message.is_some_and(|m| m.contains("503")));
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_page() {
        let controller = loaded("Kanye West").await;
        assert!(controller.load_artist("nobody at all").await.is_none());

        let model = controller.model.lock().await;
        assert_eq!(model.get_ui_state().await.validation, Some(Validation::Failure));
        let page = model.get_page_state().await;
        assert_eq!(page.profile.map(|p| p.name), Some("Kanye West".to_string()));
    }

    #[tokio::test]
    async fn superseded_lookup_leaves_newer_result_on_search_bar() {
        let transport = backend().reply(
            artist("nobody at all"),
            Reply::Delayed(Duration::from_millis(50), r#"{"artists":{"items":[]}}"#.to_string()),
        );
        let controller = controller(transport);

        let (stale, fresh) = tokio::join!(controller.load_artist("nobody at all"), controller.load_artist("Jay-Z"));
        assert!(stale.is_none());
        fresh.expect("Jay-Z resolves").join().await;

        let model = controller.model.lock().await;
        assert_eq!(model.get_ui_state().await.validation, Some(Validation::Success));
        assert_eq!(model.get_page_state().await.profile.map(|p| p.id), Some("jz".to_string()));
    }

    #[tokio::test]
    async fn related_artist_click_loads_that_artist() {
        let controller = loaded("Kanye West").await;
        let fetches = controller.open_related_artist(0).await.expect("Jay-Z resolves");
        fetches.join().await;

        let model = controller.model.lock().await;
        let ui_state = model.get_ui_state().await;
        assert_eq!(ui_state.search_query, "Jay-Z");
        assert_eq!(ui_state.validation, Some(Validation::Success));
        let page = model.get_page_state().await;
        assert_eq!(page.profile.map(|p| p.id), Some("jz".to_string()));
        assert!(page.related_artists.is_empty());
    }

    #[tokio::test]
    async fn album_row_loads_its_tracks() {
        let controller = loaded("Kanye West").await;
        controller.select_album(1).await;

        let page = controller.model.lock().await.get_page_state().await;
        assert_eq!(page.active_album, 1);
        assert_eq!(page.track_list_title, "The College Dropout");
        let names: Vec<_> = controller
            .playback
            .lock()
            .await
            .entries()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["Intro", "We Don't Care"]);
    }

    #[tokio::test]
    async fn placeholder_row_reloads_popular_tracks() {
        let controller = loaded("Kanye West").await;
        controller.select_album(1).await;
        controller.select_album(0).await;

        let page = controller.model.lock().await.get_page_state().await;
        assert_eq!(page.active_album, 0);
        assert_eq!(page.track_list_title, "Popular");
        let tracks_requests = controller
            .pipeline_requests()
            .into_iter()
            .filter(|e| matches!(e, Endpoint::Tracks { .. }))
            .count();
        assert_eq!(tracks_requests, 2);
    }

    #[tokio::test]
    async fn album_row_out_of_range_is_ignored() {
        let controller = loaded("Kanye West").await;
        controller.select_album(9).await;
        let page = controller.model.lock().await.get_page_state().await;
        assert_eq!(page.active_album, 0);
        assert_eq!(page.track_list_title, "Popular");
    }

    #[tokio::test]
    async fn nothing_to_select_before_any_load() {
        let controller = controller(backend());
        controller.select_album(0).await;
        assert!(controller.open_related_artist(0).await.is_none());
        assert!(controller.pipeline_requests().is_empty());
    }
}
