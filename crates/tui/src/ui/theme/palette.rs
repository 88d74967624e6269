use std::fmt::Debug;

use ratatui::style::{Color, Modifier, Style};

/// Colors of one shell palette, named after what they paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub frame: Color,
    /// Border of the panel that has focus
    pub frame_focused: Color,
    pub text: Color,
    /// Panel titles, form labels of optional parameters
    pub label: Color,
    /// Placeholders, empty states, hints
    pub hint: Color,
    /// Selection markers and the run button
    pub marker: Color,
    /// Declared defaults, the busy indicator, URLs
    pub accent: Color,
    pub ok: Color,
    pub warn: Color,
    pub fail: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
}

/// A palette plus the styles the panels draw with.
pub trait Theme: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn palette(&self) -> &Palette;

    fn text(&self) -> Style {
        Style::default().fg(self.palette().text)
    }
    fn label(&self) -> Style {
        Style::default().fg(self.palette().label)
    }
    fn hint(&self) -> Style {
        Style::default().fg(self.palette().hint)
    }
    fn marker(&self) -> Style {
        Style::default().fg(self.palette().marker)
    }
    fn heading(&self) -> Style {
        self.marker().add_modifier(Modifier::BOLD)
    }
    fn accent(&self) -> Style {
        Style::default().fg(self.palette().accent)
    }

    fn ok(&self) -> Style {
        Style::default().fg(self.palette().ok)
    }
    fn warn(&self) -> Style {
        Style::default().fg(self.palette().warn)
    }
    fn fail(&self) -> Style {
        Style::default().fg(self.palette().fail)
    }

    fn frame_border(&self, focused: bool) -> Style {
        let palette = self.palette();
        Style::default().fg(if focused { palette.frame_focused } else { palette.frame })
    }

    fn cursor_row(&self) -> Style {
        let palette = self.palette();
        Style::default().fg(palette.cursor_fg).bg(palette.cursor_bg)
    }
}
