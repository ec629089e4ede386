//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette. Light
//! terminals are detected from `COLORFGBG`.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;
use crate::markdown::{InlineStyle, LineKind};

/// Terminal background brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Dark,
    Light,
}

impl Background {
    /// Read the background from the environment.
    pub fn detect() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// Parse a `COLORFGBG` value such as `15;0`. The last field is the
    /// background palette index; 7 and above are light.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Dark;
        };
        let bg = value.rsplit(';').next().unwrap_or(value);
        match bg.trim().parse::<u8>() {
            Ok(index) if index >= 7 => Self::Light,
            _ => Self::Dark,
        }
    }
}

/// Theme configuration for the entire application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Heading level 1 style
    pub h1: Style,
    /// Heading level 2 style
    pub h2: Style,
    /// Heading level 3 style
    pub h3: Style,
    /// Heading level 4+ style
    pub h4: Style,
    /// Code block style
    pub code: Style,
    /// Inline code style
    pub inline_code: Style,
    /// Block quote style
    pub quote: Style,
    /// Link style
    pub link: Style,
    /// Table border style
    pub table_border: Style,
    /// Image placeholder style
    pub image: Style,
    /// Horizontal rule and HTML hint style
    pub hr: Style,
    /// Placeholder and gutter style
    pub muted: Style,
    /// Editor cursor cell
    pub cursor: Style,
    /// Border of the focused widget
    pub focused_border: Style,
    /// Selected tab label
    pub active_tab: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(245)),
            inline_code: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            table_border: Style::default().fg(Color::Indexed(240)),
            image: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            hr: Style::default()
                .fg(Color::Indexed(240))
                .add_modifier(Modifier::DIM),
            muted: Style::default().fg(Color::DarkGray),
            cursor: Style::default().bg(Color::White).fg(Color::Black),
            focused_border: Style::default().fg(Color::Cyan),
            active_tab: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Indexed(236), // Dark gray that works on both
            status_fg: Color::Indexed(252), // Light gray
        }
    }
}

impl Theme {
    pub fn for_background(background: Background) -> Self {
        match background {
            Background::Dark => Self::dark(),
            Background::Light => Self::light(),
        }
    }

    /// Create a theme optimized for dark terminals.
    pub fn dark() -> Self {
        Self::default()
    }

    /// Create a theme optimized for light terminals.
    pub fn light() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Indexed(24))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Indexed(22))
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Indexed(58))
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(238)),
            inline_code: Style::default()
                .fg(Color::Indexed(88))
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Indexed(24))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            table_border: Style::default().fg(Color::Indexed(245)),
            image: Style::default()
                .fg(Color::Indexed(90))
                .add_modifier(Modifier::ITALIC),
            hr: Style::default().fg(Color::Indexed(241)),
            muted: Style::default().fg(Color::Indexed(244)),
            cursor: Style::default().bg(Color::Black).fg(Color::White),
            focused_border: Style::default().fg(Color::Indexed(24)),
            active_tab: Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(24))
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(235),
        }
    }

    /// Style for a whole preview line.
    pub fn line_style(&self, kind: LineKind) -> Style {
        match kind {
            LineKind::Heading(1) => self.h1,
            LineKind::Heading(2) => self.h2,
            LineKind::Heading(3) => self.h3,
            LineKind::Heading(_) => self.h4,
            LineKind::CodeBlock => self.code,
            LineKind::BlockQuote => self.quote,
            LineKind::Table => self.table_border,
            LineKind::Rule | LineKind::Html => self.hr,
            LineKind::Image => self.image,
            LineKind::Placeholder => self.muted.add_modifier(Modifier::ITALIC),
            LineKind::ListItem(_) | LineKind::Paragraph | LineKind::Empty | LineKind::Raw => {
                Style::default()
            }
        }
    }

    /// Merge inline flags into the line's base style.
    pub fn inline_style(&self, base: Style, inline: InlineStyle) -> Style {
        let mut style = base;
        if inline.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if inline.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if inline.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if inline.link {
            style = style.patch(self.link);
        }
        if inline.code {
            style = style.patch(self.inline_code).remove_modifier(Modifier::DIM);
        }
        style
    }

    /// Toast bar style and label.
    pub fn toast(&self, level: ToastLevel) -> (&'static str, Style) {
        match level {
            ToastLevel::Info => (
                "[info]",
                Style::default().bg(self.status_bg).fg(self.status_fg),
            ),
            ToastLevel::Success => ("[ok]", Style::default().bg(Color::Green).fg(Color::Black)),
            ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
            ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
        }
    }
}
