//! Layout system for the Werkstatt shell.
//!
//! Wide terminals get two columns (plugins and files on the left, the command
//! panel and output on the right); narrow ones stack every panel.
use ratatui::prelude::*;

use crate::app::App;

/// Width from which the two-column layout is used.
const TWO_COLUMN_MIN_WIDTH: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ShellAreas {
    pub title: Rect,
    pub plugins: Rect,
    pub commands: Rect,
    pub form: Rect,
    pub output: Rect,
    pub upload: Rect,
    pub files: Rect,
    pub hints: Rect,
}

pub(super) struct MainLayout;

impl MainLayout {
    pub fn responsive_layout(size: Rect, app: &App) -> ShellAreas {
        let [title, body, hints] = Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(size);

        let command_rows = app.selected_plugin().map(|plugin| plugin.commands.len()).unwrap_or(0).clamp(1, 6) as u16;
        let commands_height = command_rows + 2;
        // description + one row per parameter + run button + borders
        let form_height = app.params().len() as u16 + 4;

        if size.width >= TWO_COLUMN_MIN_WIDTH {
            let [left, right] = Layout::horizontal([Constraint::Percentage(35), Constraint::Min(40)]).areas(body);
            let [plugins, upload, files] =
                Layout::vertical([Constraint::Percentage(55), Constraint::Length(3), Constraint::Min(3)]).areas(left);
            let [commands, form, output] = Layout::vertical([
                Constraint::Length(commands_height),
                Constraint::Length(form_height),
                Constraint::Min(3),
            ])
            .areas(right);
            return ShellAreas {
                title,
                plugins,
                commands,
                form,
                output,
                upload,
                files,
                hints,
            };
        }

        let plugins_height = (app.plugins.len() as u16).clamp(1, 6) + 2;
        let [plugins, commands, form, output, upload, files] = Layout::vertical([
            Constraint::Length(plugins_height),
            Constraint::Length(commands_height),
            Constraint::Length(form_height),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(6),
        ])
        .areas(body);
        ShellAreas {
            title,
            plugins,
            commands,
            form,
            output,
            upload,
            files,
            hints,
        }
    }
}
