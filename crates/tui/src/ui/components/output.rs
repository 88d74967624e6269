use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Text},
    widgets::{Paragraph, Wrap},
};

use super::component::Component;
use crate::app::App;
use crate::ui::theme::theme_helpers as th;

/// Output panel: the last error in the error colour, the last command output
/// in the success colour.
#[derive(Debug, Default)]
pub struct OutputComponent;

impl Component for OutputComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.theme;
        let block = th::block(theme, Some(" Ausgabe "), false);

        let mut text = Text::default();
        if let Some(error) = app.error.as_deref() {
            for line in error.lines() {
                text.push_line(Line::styled(line.to_string(), theme.fail()));
            }
        }
        if let Some(output) = app.output.as_deref() {
            if output.is_empty() {
                text.push_line(Line::default());
            }
            for line in output.lines() {
                text.push_line(Line::styled(line.to_string(), theme.ok()));
            }
        }
        if text.lines.is_empty() {
            let placeholder = if app.running {
                format!("{} Läuft…", app.spinner())
            } else {
                "Noch keine Ausgabe.".to_string()
            };
            text.push_line(Line::styled(placeholder, theme.hint()));
        }

        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }).block(block), rect);
    }
}
