//! Plugin list panel.
//!
//! Lists every plugin the backend reports. Disabled plugins stay visible but
//! are marked `deaktiviert` and cannot be selected.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use werkstatt_types::{Effect, Msg};

use super::component::Component;
use crate::app::{App, Focus};
use crate::ui::theme::theme_helpers as th;
use crate::ui::utils::step_cursor;

#[derive(Debug, Default)]
pub struct PluginListComponent;

impl Component for PluginListComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up => app.plugin_cursor = step_cursor(app.plugin_cursor, app.plugins.len(), -1),
            KeyCode::Down => app.plugin_cursor = step_cursor(app.plugin_cursor, app.plugins.len(), 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(name) = app.plugins.get(app.plugin_cursor).map(|plugin| plugin.name.clone()) else {
                    return Vec::new();
                };
                let effects = app.update(Msg::SelectPlugin(name));
                if app.selected_command().is_some() {
                    app.focus = Focus::Form;
                } else if app.selected_plugin().is_some() {
                    app.focus = Focus::Commands;
                }
                return effects;
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let focused = app.focus == Focus::Plugins;
        let theme = &*app.theme;
        let block = th::block(theme, Some(" Plugins "), focused);

        if app.plugins.is_empty() {
            let text = if app.loading_plugins {
                format!("{} Lade Plugins…", app.spinner())
            } else {
                "Keine Plugins gefunden.".to_string()
            };
            frame.render_widget(Paragraph::new(text).style(theme.hint()).block(block), rect);
            return;
        }

        let selected = app.selected_plugin().map(|plugin| plugin.name.clone());
        let items: Vec<ListItem> = app
            .plugins
            .iter()
            .map(|plugin| {
                let is_selected = selected.as_deref() == Some(plugin.name.as_str());
                let marker = if is_selected { "● " } else { "  " };
                let mut title = vec![
                    Span::styled(marker, theme.marker()),
                    Span::styled(
                        plugin.title(),
                        if !plugin.enabled {
                            theme.hint()
                        } else if is_selected {
                            theme.heading()
                        } else {
                            theme.text()
                        },
                    ),
                ];
                if !plugin.enabled {
                    title.push(Span::styled(" (deaktiviert)", theme.warn()));
                }
                let mut lines = vec![Line::from(title)];
                if let Some(summary) = plugin.summary() {
                    lines.push(Line::from(Span::styled(format!("  {summary}"), theme.hint())));
                }
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(th::cursor_style(theme, focused).add_modifier(Modifier::BOLD));
        let mut state = ListState::default().with_selected(Some(app.plugin_cursor));
        frame.render_stateful_widget(list, rect, &mut state);
    }
}
