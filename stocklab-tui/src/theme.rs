//! Parrot/neon theme tokens for the chart viewer.
//!
//! - **Accent**: electric cyan (current value line, focus)
//! - **Positive**: neon green (gains)
//! - **Negative**: hot pink (losses)
//! - **Neutral**: cool purple (investment line)
//! - **Muted**: steel blue (axes, hints)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Bar color for a holding; break-even counts as a gain.
    pub fn pnl_color(&self, gain: bool) -> Color {
        if gain {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}
