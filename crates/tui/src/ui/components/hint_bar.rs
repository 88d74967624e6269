//! Hint bar component for keyboard shortcuts.
//!
//! Renders the single-line strip at the bottom of the screen. The hints
//! depend on the focused panel and on whether a text input is active.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::component::Component;
use crate::app::{App, Focus};

#[derive(Debug, Default)]
pub struct HintBarComponent;

impl HintBarComponent {
    /// Key/description pairs for the current focus.
    pub fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
        if app.editor.is_some() {
            return vec![("Enter", " übernehmen  "), ("Esc", " fertig  "), ("↑/↓", " Feld wechseln")];
        }
        let mut hints = vec![("Tab", " Panel  ")];
        match app.focus {
            Focus::Plugins => hints.extend([("↑/↓", " wählen  "), ("Enter", " öffnen  ")]),
            Focus::Commands => hints.extend([("↑/↓", " wählen  "), ("Enter", " Befehl  ")]),
            Focus::Form => hints.extend([("↑/↓", " Feld  "), ("Enter", " bearbeiten  ")]),
            Focus::Upload => hints.extend([("Enter", " hochladen  "), ("Esc", " verlassen  ")]),
            Focus::Files => hints.extend([("↑/↓", " wählen  "), ("Enter", " herunterladen  ")]),
        }
        hints.push(("Ctrl-R", " ausführen  "));
        if app.focus != Focus::Upload {
            hints.push(("q", " beenden"));
        }
        hints
    }
}

impl Component for HintBarComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let mut spans = vec![Span::styled("Hinweise: ", theme.hint())];
        for (key, description) in Self::hints(app) {
            spans.push(Span::styled(key, theme.heading()));
            spans.push(Span::styled(description, theme.hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rect);
    }
}
