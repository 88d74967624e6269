use ratatui::style::Color;

use super::palette::{Palette, Theme};

// https://draculatheme.com/contribute
const BACKGROUND: Color = Color::Rgb(0x28, 0x2A, 0x36);
const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A);
const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2);
const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4);
const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD);
const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B);
const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C);
const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6);
const PURPLE: Color = Color::Rgb(0xBD, 0x93, 0xF9);
const RED: Color = Color::Rgb(0xFF, 0x55, 0x55);

pub const DRACULA: Palette = Palette {
    background: BACKGROUND,
    frame: CURRENT_LINE,
    frame_focused: CYAN,
    text: FOREGROUND,
    label: PURPLE,
    hint: COMMENT,
    marker: PINK,
    accent: CYAN,
    ok: GREEN,
    warn: ORANGE,
    fail: RED,
    cursor_bg: CURRENT_LINE,
    cursor_fg: FOREGROUND,
};

/// Palette for truecolor terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraculaTheme;

impl Theme for DraculaTheme {
    fn name(&self) -> &'static str {
        "dracula"
    }

    fn palette(&self) -> &Palette {
        &DRACULA
    }
}
