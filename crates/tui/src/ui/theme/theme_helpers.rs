//! Widget builders shared by the panels.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::palette::Theme;

/// Bordered panel with an optional bold title; the border lights up while
/// the panel has focus.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let border_type = if focused { BorderType::Thick } else { BorderType::Rounded };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(theme.frame_border(focused))
        .style(Style::default().bg(theme.palette().background).fg(theme.palette().text));
    if let Some(title) = title {
        block = block.title(Span::styled(title, theme.label().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Row under the cursor. Only highlighted while its panel has focus.
pub fn cursor_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    if focused {
        theme.cursor_row().add_modifier(Modifier::BOLD)
    } else {
        theme.text()
    }
}

/// Text being typed into a field.
pub fn input_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let style = theme.text().add_modifier(Modifier::UNDERLINED);
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

/// Single-line button. Disabled buttons are drawn on the frame color.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, enabled: bool, selected: bool, theme: &T) {
    let palette = theme.palette();
    let mut style = if enabled {
        Style::default().bg(palette.marker).fg(palette.background).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(palette.frame).fg(palette.hint)
    };
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    frame.render_widget(Paragraph::new(format!(" {label} ")).style(style), area);
}
