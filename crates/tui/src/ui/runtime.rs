//! Runtime: event loop and input routing for the shell.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single `select!` loop over terminal input, a ticker, and the
//!   API calls in flight.
//! - Route keys through `MainView` and hand the returned `Effect`s to
//!   `cmd::spawn`.
//! - Render after every change; the ticker only forces a frame while a call
//!   is in flight.
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, future::BoxFuture, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tokio::{
    signal,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};
use werkstatt_api::WerkstattApi;
use werkstatt_types::{Effect, ExecOutcome, Msg};
use werkstatt_util::default_download_dir;

use crate::app::App;
use crate::cmd;
use crate::ui::main_component::MainView;

type ShellTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<ShellTerminal> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut ShellTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut ShellTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, app))?;
    Ok(())
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Resize(width, height) => app.update(Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// Entry point for the shell runtime: sets up the terminal, runs the event
/// loop, and restores the terminal on exit, also when the loop failed.
pub async fn run_app(api: Arc<dyn WerkstattApi>) -> Result<()> {
    let download_dir = default_download_dir();
    info!(backend = %api.kind(), download_dir = %download_dir.display(), "starting shell");

    let mut app = App::new(api.kind());
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app, &mut main_view, api, download_dir).await;
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut ShellTerminal,
    app: &mut App,
    main_view: &mut MainView,
    api: Arc<dyn WerkstattApi>,
    download_dir: PathBuf,
) -> Result<()> {
    let mut input_events = EventStream::new();
    let mut pending_execs: FuturesUnordered<BoxFuture<'static, ExecOutcome>> = FuturesUnordered::new();
    // Plugins load once the loop runs so the first frame is not delayed.
    let mut effects = app.initial_effects();

    let mut ticker = time::interval(Duration::from_millis(100));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;

    loop {
        for effect in effects.drain(..) {
            pending_execs.push(cmd::spawn(Arc::clone(&api), download_dir.clone(), effect));
        }

        let needs_render = tokio::select! {
            maybe_event = input_events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if let Event::Key(key_event) = event
                            && key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(KeyModifiers::CONTROL)
                        {
                            break;
                        }
                        effects.extend(handle_input_event(app, main_view, event));
                        true
                    }
                    Some(Err(error)) => {
                        warn!(%error, "failed to read terminal event");
                        break;
                    }
                    // Input stream closed; shut down cleanly.
                    None => break,
                }
            }

            _ = ticker.tick() => {
                let busy = app.is_busy();
                effects.extend(app.update(Msg::Tick));
                busy
            }

            Some(outcome) = pending_execs.next(), if !pending_execs.is_empty() => {
                effects.extend(app.update(Msg::ExecCompleted(Box::new(outcome))));
                true
            }

            _ = signal::ctrl_c() => { break; }
        };

        if app.should_quit {
            break;
        }
        if needs_render {
            render(terminal, app, main_view)?;
        }
    }

    Ok(())
}
