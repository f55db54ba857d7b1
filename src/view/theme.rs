//! Colors for token kinds
//!
//! The core only knows [`TokenKind`] tags. This is where the hosting
//! renderer turns them into ratatui styles.

use std::str::FromStr;

use ratatui::style::{Color, Style};

use crate::config::ThemeConfig;
use crate::primitives::shell_highlighter::TokenKind;

/// Resolved color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub plain: Color,
    pub keyword: Color,
    pub string: Color,
    pub comment: Color,
    pub number: Color,
    pub variable: Color,
    pub symbol: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    /// Build a theme from configured color names.
    ///
    /// Unknown names fall back to the terminal default color with a warning.
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            plain: parse_color("plain", &config.plain),
            keyword: parse_color("keyword", &config.keyword),
            string: parse_color("string", &config.string),
            comment: parse_color("comment", &config.comment),
            number: parse_color("number", &config.number),
            variable: parse_color("variable", &config.variable),
            symbol: parse_color("symbol", &config.symbol),
        }
    }

    /// Foreground color for a token kind
    pub fn color(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Plain => self.plain,
            TokenKind::Keyword => self.keyword,
            TokenKind::String => self.string,
            TokenKind::Comment => self.comment,
            TokenKind::Number => self.number,
            TokenKind::Variable => self.variable,
            TokenKind::Symbol => self.symbol,
        }
    }

    pub fn style(&self, kind: TokenKind) -> Style {
        Style::default().fg(self.color(kind))
    }
}

fn parse_color(slot: &str, name: &str) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        tracing::warn!("Unknown color {:?} for theme.{}, using default", name, slot);
        Color::Reset
    })
}
