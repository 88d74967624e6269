//! # Werkstatt TUI Library
//!
//! Terminal shell for the Werkstatt backend. It lists the registered plugins,
//! builds an argument form for the selected command, runs it and shows the
//! result, and keeps a session list of uploaded files that can be fetched
//! again.
//!
//! ## Architecture
//!
//! The shell follows a functional-core layout. [`Msg`](werkstatt_types::Msg)
//! values update the `App` state, state updates return
//! [`Effect`](werkstatt_types::Effect)s, and the runtime executes those
//! against a [`WerkstattApi`] in background tasks. Rendering is a pure view of
//! the state and happens through a small set of components, one per panel.

mod app;
mod cmd;
pub mod log_persistence;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use werkstatt_api::WerkstattApi;

/// Runs the shell until the user quits.
///
/// The terminal is put into raw mode on the alternate screen for the
/// duration of the call and restored afterwards.
///
/// # Errors
///
/// Returns an error when the terminal cannot be set up, read from or drawn
/// to. API failures never end the shell; they are shown in the UI.
pub async fn run(api: Arc<dyn WerkstattApi>) -> Result<()> {
    ui::runtime::run_app(api).await
}
