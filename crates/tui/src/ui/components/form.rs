//! Argument form of the selected command and its run button.
//!
//! Each parameter is one row: its label (` *` for required ones), then the
//! displayed value or, when that is empty, the description as placeholder.
//! `Enter` on a row opens an inline editor seeded with the displayed value;
//! every keystroke is applied as an argument edit. The last row is the run
//! button.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;
use werkstatt_types::{Effect, Msg};

use super::component::Component;
use crate::app::{App, Focus};
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::step_cursor;

pub const RUN_LABEL: &str = "Ausführen";
pub const RUNNING_LABEL: &str = "Läuft…";

#[derive(Debug, Default)]
pub struct FormComponent;

impl FormComponent {
    fn handle_editor_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(editor) = app.editor.as_mut() else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.editor = None;
            }
            KeyCode::Up | KeyCode::Down => {
                app.editor = None;
                return Self::handle_navigation_key(app, key);
            }
            _ => {
                if editor.input.handle_key(&key) {
                    let msg = Msg::EditArg {
                        name: editor.name.clone(),
                        value: editor.input.input().to_string(),
                    };
                    return app.update(msg);
                }
            }
        }
        Vec::new()
    }

    fn handle_navigation_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let rows = app.params().len() + 1;
        match key.code {
            KeyCode::Up => app.field_cursor = step_cursor(app.field_cursor, rows, -1),
            KeyCode::Down => app.field_cursor = step_cursor(app.field_cursor, rows, 1),
            KeyCode::Enter if app.field_cursor >= app.params().len() => return app.update(Msg::Run),
            KeyCode::Enter => {
                app.begin_edit();
            }
            _ => {}
        }
        Vec::new()
    }
}

impl Component for FormComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.selected_command().is_none() {
            return Vec::new();
        }
        if app.editor.is_some() {
            Self::handle_editor_key(app, key)
        } else {
            Self::handle_navigation_key(app, key)
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.focus == Focus::Form;
        let theme = &*app.theme;
        let block = th::block(theme, Some(" Argumente "), focused);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let Some(command) = app.selected_command() else {
            frame.render_widget(Paragraph::new("Kein Befehl ausgewählt.").style(theme.hint()), inner);
            return;
        };

        let params = &command.params;
        let [description_area, fields_area, button_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let description = command.summary().unwrap_or(command.name.as_str());
        frame.render_widget(Paragraph::new(description).style(theme.label()), description_area);

        let label_width = params.iter().map(|param| param.label().width()).max().unwrap_or(0);
        let mut cursor_position = None;
        let lines: Vec<Line> = params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let label = format!("{:<label_width$} : ", param.label());
                let row_focused = focused && index == app.field_cursor;
                let label_style = if row_focused {
                    th::cursor_style(theme, true)
                } else if param.required {
                    theme.text()
                } else {
                    theme.label()
                };

                let editing = app.editor.as_ref().filter(|editor| editor.name == param.name);
                let value_span = match editing {
                    Some(editor) => {
                        let x = (label.width() as u16).saturating_add(editor.input.cursor_columns());
                        cursor_position = Some((x, index as u16));
                        Span::styled(editor.input.input().to_string(), th::input_style(theme, true))
                    }
                    None => {
                        let value = app.displayed_value(param);
                        if value.is_empty() {
                            Span::styled(param.placeholder().unwrap_or_default().to_string(), theme.hint())
                        } else if app.is_edited(&param.name) {
                            Span::styled(value, theme.text())
                        } else {
                            Span::styled(value, theme.accent())
                        }
                    }
                };
                Line::from(vec![Span::styled(label, label_style), value_span])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), fields_area);

        if let Some((x, y)) = cursor_position
            && y < fields_area.height
        {
            let x = fields_area.x.saturating_add(x).min(fields_area.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, fields_area.y + y));
        }

        let label = if app.running {
            format!("{} {RUNNING_LABEL}", app.spinner())
        } else {
            RUN_LABEL.to_string()
        };
        let button_selected = focused && app.field_cursor >= params.len();
        th::render_button(frame, button_area, &label, app.can_run(), button_selected, theme);
    }
}
