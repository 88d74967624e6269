//! Indexed-color stand-in for [`DRACULA`](super::dracula::DRACULA), used when
//! the terminal does not advertise truecolor (macOS Terminal, tmux without
//! `Tc`, plain `xterm-256color`).

use ratatui::style::Color;

use super::palette::{Palette, Theme};

pub const ANSI256: Palette = Palette {
    background: Color::Indexed(236),
    frame: Color::Indexed(239),
    frame_focused: Color::Indexed(117),
    text: Color::Indexed(255),
    label: Color::Indexed(141),
    hint: Color::Indexed(247),
    marker: Color::Indexed(212),
    accent: Color::Indexed(117),
    ok: Color::Indexed(84),
    warn: Color::Indexed(215),
    fail: Color::Indexed(203),
    cursor_bg: Color::Indexed(239),
    cursor_fg: Color::Indexed(255),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Ansi256Theme;

impl Theme for Ansi256Theme {
    fn name(&self) -> &'static str {
        "ansi256"
    }

    fn palette(&self) -> &Palette {
        &ANSI256
    }
}
