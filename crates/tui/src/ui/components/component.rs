//! Component system for the Werkstatt shell.
//!
//! Components are self-contained panels. They translate key input into
//! [`Msg`](werkstatt_types::Msg)s or direct view-state changes on the
//! [`App`], and report any resulting side effects back as [`Effect`]s.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use werkstatt_types::Effect;

use crate::app::App;

/// A trait representing a UI component with its own behavior.
///
/// Components handle localized events and render themselves into a provided
/// `Rect`. Shared state lives on the `App` so that the update function stays
/// the single place where domain state changes.
pub(crate) trait Component {
    /// Handle key events when this component has focus.
    ///
    /// # Returns
    ///
    /// Vector of effects that the application should process
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing
    /// and cursor placement.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
