use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use werkstatt_types::{Effect, Msg};

use super::components::{
    CommandListComponent, Component, FilesComponent, FormComponent, HintBarComponent, OutputComponent, PluginListComponent,
    UploadComponent,
};
use super::layout::MainLayout;
use crate::app::{App, Focus};

/// Root view: owns the panels, routes keys to the focused one and draws the
/// title bar.
#[derive(Debug, Default)]
pub struct MainView {
    plugins: PluginListComponent,
    commands: CommandListComponent,
    form: FormComponent,
    output: OutputComponent,
    upload: UploadComponent,
    files: FilesComponent,
    hints: HintBarComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global bindings first, then the focused panel.
    pub fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('r') if control => return app.update(Msg::Run),
            KeyCode::Tab => {
                app.editor = None;
                app.focus = app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.editor = None;
                app.focus = app.focus.prev();
                return Vec::new();
            }
            KeyCode::Char('q') if !control && !app.is_text_input_active() => {
                app.should_quit = true;
                return Vec::new();
            }
            _ => {}
        }

        match app.focus {
            Focus::Plugins => self.plugins.handle_key_events(app, key),
            Focus::Commands => self.commands.handle_key_events(app, key),
            Focus::Form => self.form.handle_key_events(app, key),
            Focus::Upload => self.upload.handle_key_events(app, key),
            Focus::Files => self.files.handle_key_events(app, key),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, app: &mut App) {
        let areas = MainLayout::responsive_layout(frame.area(), app);
        Self::render_title(frame, areas.title, app);
        self.plugins.render(frame, areas.plugins, app);
        self.commands.render(frame, areas.commands, app);
        self.form.render(frame, areas.form, app);
        self.output.render(frame, areas.output, app);
        self.upload.render(frame, areas.upload, app);
        self.files.render(frame, areas.files, app);
        self.hints.render(frame, areas.hints, app);
    }

    fn render_title(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let mut spans = vec![
            Span::styled("Werkstatt", theme.heading()),
            Span::styled(format!(" · {}", app.backend), theme.hint()),
        ];
        if app.is_busy() {
            spans.push(Span::styled(format!(" {}", app.spinner()), theme.accent()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if let Some(status) = app.status.as_deref() {
            let style = if status.contains("failed") {
                theme.fail()
            } else {
                theme.label()
            };
            frame.render_widget(Paragraph::new(status).style(style).alignment(Alignment::Right), area);
        }
    }
}
