use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use werkstatt_types::{Effect, Msg};

use super::component::Component;
use crate::app::{App, Focus};
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::step_cursor;

/// Command selector of the selected plugin.
#[derive(Debug, Default)]
pub struct CommandListComponent;

impl Component for CommandListComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let count = app.selected_plugin().map(|plugin| plugin.commands.len()).unwrap_or(0);
        match key.code {
            KeyCode::Up => app.command_cursor = step_cursor(app.command_cursor, count, -1),
            KeyCode::Down => app.command_cursor = step_cursor(app.command_cursor, count, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(name) = app
                    .selected_plugin()
                    .and_then(|plugin| plugin.commands.get(app.command_cursor))
                    .map(|command| command.name.clone())
                else {
                    return Vec::new();
                };
                let effects = app.update(Msg::SelectCommand(name));
                app.focus = Focus::Form;
                return effects;
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.focus == Focus::Commands;
        let theme = &*app.theme;
        let block = th::block(theme, Some(" Befehle "), focused);

        let Some(plugin) = app.selected_plugin() else {
            frame.render_widget(
                Paragraph::new("Kein Plugin ausgewählt.").style(theme.hint()).block(block),
                rect,
            );
            return;
        };
        if plugin.commands.is_empty() {
            frame.render_widget(
                Paragraph::new("Dieses Plugin hat keine Befehle.").style(theme.hint()).block(block),
                rect,
            );
            return;
        }

        let selected = app.selected_command().map(|command| command.name.as_str());
        let items: Vec<ListItem> = plugin
            .commands
            .iter()
            .map(|command| {
                let is_selected = selected == Some(command.name.as_str());
                let mut spans = vec![
                    Span::styled(if is_selected { "● " } else { "  " }, theme.marker()),
                    Span::styled(
                        command.name.as_str(),
                        if is_selected {
                            theme.heading()
                        } else {
                            theme.text()
                        },
                    ),
                ];
                if let Some(summary) = command.summary() {
                    spans.push(Span::styled(format!("  {summary}"), theme.hint()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(th::cursor_style(theme, focused));
        let mut state = ListState::default().with_selected(Some(app.command_cursor));
        frame.render_stateful_widget(list, rect, &mut state);
    }
}
