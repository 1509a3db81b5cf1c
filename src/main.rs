mod audio;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod pipeline;
mod playback;
mod render;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use audio::RodioOutput;
use config::Args;
use controller::AppController;
use model::{AppModel, BackendClient};
use playback::PlaybackSession;

type Controller = AppController<BackendClient, RodioOutput>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(&args.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(server = %args.server, "=== artist-explorer starting ===");

    // Opening the output device blocks until the audio thread is up
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    let output = tokio::task::spawn_blocking(move || RodioOutput::spawn(event_tx)).await??;

    let client = BackendClient::new(&args.server, args.request_timeout())?;

    let model = Arc::new(Mutex::new(AppModel::new()));
    let playback = Arc::new(Mutex::new(PlaybackSession::new(output)));
    let controller = AppController::new(model.clone(), playback.clone(), client);

    controller.start_audio_event_listener(event_rx);

    if let Some(artist) = args.artist.clone() {
        model.lock().await.set_search_query(artist.clone()).await;
        let controller = controller.clone();
        tokio::spawn(async move {
            let _ = controller.load_artist(&artist).await;
        });
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("artist-explorer shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: Controller,
) -> io::Result<()> {
    loop {
        let (ui_state, page, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_page_state().await,
                model_guard.should_quit().await,
            )
        };
        let playback = controller.playback_snapshot().await;

        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state, &page);
        })?;

        if should_quit {
            break;
        }

        // Short poll keeps renders from background fetches responsive
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
