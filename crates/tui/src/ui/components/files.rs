//! Upload path input and the list of uploaded files.
//!
//! The upload field takes a local path (`~` is expanded); `Enter` uploads it.
//! Activating an entry in the list downloads the file into the download
//! directory.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use werkstatt_types::{Effect, Msg};

use super::component::Component;
use crate::app::{App, Focus};
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::step_cursor;

pub const NO_FILES_TEXT: &str = "Noch keine Dateien hochgeladen.";

#[derive(Debug, Default)]
pub struct UploadComponent;

impl Component for UploadComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter => {
                let path = app.upload_input.take();
                app.update(Msg::Upload(path))
            }
            KeyCode::Esc => {
                app.focus = Focus::Files;
                Vec::new()
            }
            _ => {
                app.upload_input.handle_key(&key);
                Vec::new()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.focus == Focus::Upload;
        let theme = &*app.theme;
        let block = th::block(theme, Some(" Datei hochladen "), focused);
        let inner = block.inner(rect);

        let input = app.upload_input.input();
        let paragraph = if input.is_empty() && !focused {
            Paragraph::new("Pfad eingeben, Enter lädt hoch").style(theme.hint())
        } else {
            Paragraph::new(input).style(th::input_style(theme, focused))
        };
        frame.render_widget(paragraph.block(block), rect);

        if focused && inner.height > 0 {
            let x = inner.x.saturating_add(app.upload_input.cursor_columns()).min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}

#[derive(Debug, Default)]
pub struct FilesComponent;

impl Component for FilesComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up => app.file_cursor = step_cursor(app.file_cursor, app.files.len(), -1),
            KeyCode::Down => app.file_cursor = step_cursor(app.file_cursor, app.files.len(), 1),
            KeyCode::Enter | KeyCode::Char('d') => {
                if app.file_cursor < app.files.len() {
                    return app.update(Msg::Download(app.file_cursor));
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.focus == Focus::Files;
        let theme = &*app.theme;
        let block = th::block(theme, Some(" Dateien "), focused);

        if app.files.is_empty() {
            frame.render_widget(Paragraph::new(NO_FILES_TEXT).style(theme.hint()).block(block), rect);
            return;
        }

        let items: Vec<ListItem> = app
            .files
            .iter()
            .map(|entry| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(entry.filename.as_str(), theme.text()),
                        Span::styled(format!("  {}", entry.uploaded_at.format("%H:%M:%S")), theme.hint()),
                    ]),
                    Line::from(Span::styled(format!("  {}", entry.url), theme.accent())),
                ])
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(th::cursor_style(theme, focused));
        let mut state = ListState::default().with_selected(Some(app.file_cursor));
        frame.render_stateful_widget(list, rect, &mut state);
    }
}
