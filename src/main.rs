mod app;
mod config;
mod error;
mod events;
mod loader;
mod log;
mod selector;
mod services;
mod tui;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use app::App;
use config::Config;
use error::FetchError;
use events::{Action, handle_key_event};
use loader::{FetchEvent, PageFetcher, PageRequest};
use services::{DirectoryClient, DirectoryRecord};

#[tokio::main]
async fn main() -> Result<()> {
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
    }

    let config = Config::load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let client = Arc::new(DirectoryClient::new(config.latency_ms));

    let result = run_app(&mut terminal, &mut app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: Arc<DirectoryClient>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Channel for completed page fetches, tagged with the scope and page
    // they were issued for so stale results die in the loader's guard
    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchEvent<DirectoryRecord>>(32);

    // Event stream for keyboard
    let mut event_stream = EventStream::new();

    loop {
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        tokio::select! {
            // Terminal events
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    if key.kind == KeyEventKind::Press {
                        let action = handle_key_event(app, key);
                        apply_action(app, action, &client, &fetch_tx);
                    }
                }
            }

            // Completed page fetches
            Some(event) = fetch_rx.recv() => {
                app.apply_fetch(event);
                // A short page can land with the new sentinel already on
                // screen; give the trigger a chance right away
                if let Some(request) = app.poll_more() {
                    dispatch_fetch(&client, &fetch_tx, request);
                }
            }

            // Timeout to keep the loading spinner moving
            _ = tokio::time::sleep(Duration::from_millis(120)) => {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn apply_action(
    app: &mut App,
    action: Action,
    client: &Arc<DirectoryClient>,
    fetch_tx: &mpsc::Sender<FetchEvent<DirectoryRecord>>,
) {
    match action {
        Action::Quit => app.should_quit = true,

        Action::NextField => app.next_field(),
        Action::PrevField => app.prev_field(),
        Action::ClearField => app.clear_active_field(),

        Action::OpenDropdown => {
            if let Some(request) = app.open_dropdown() {
                dispatch_fetch(client, fetch_tx, request);
            }
        }
        Action::CloseDropdown => app.close_dropdown(),

        Action::DropdownNext => {
            if let Some(dropdown) = &mut app.dropdown {
                dropdown.select_next();
            }
            if let Some(request) = app.poll_more() {
                dispatch_fetch(client, fetch_tx, request);
            }
        }
        Action::DropdownPrev => {
            if let Some(dropdown) = &mut app.dropdown {
                dropdown.select_prev();
            }
        }

        Action::ChooseHighlighted => app.choose_highlighted(),

        Action::RefreshDropdown => {
            if let Some(dropdown) = &mut app.dropdown {
                if let Some(request) = dropdown.refresh() {
                    dispatch_fetch(client, fetch_tx, request);
                }
            }
        }

        Action::InjectFailure => {
            client.fail_next_fetch(FetchError::Network("injected failure".to_string()));
        }

        Action::None => {}
    }
}

/// Dispatch a page fetch on a background task.
///
/// The completion is sent back tagged with the request's scope and page; if
/// the dropdown has closed or moved on by then, the result is dropped or
/// discarded as stale.
fn dispatch_fetch(
    client: &Arc<DirectoryClient>,
    fetch_tx: &mpsc::Sender<FetchEvent<DirectoryRecord>>,
    request: PageRequest,
) {
    let future = client.fetch_page(request.clone());
    let fetch_tx = fetch_tx.clone();
    tokio::spawn(async move {
        let outcome = future.await;
        let _ = fetch_tx
            .send(FetchEvent {
                scope: request.scope,
                page: request.page,
                outcome,
            })
            .await;
    });
}
