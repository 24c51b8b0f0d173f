//! Theme and color palette definitions for the terminal UI.

use std::str::FromStr;

use cardform::config::StyleLayer;
use ratatui::style::{Color, Modifier, Style, palette::tailwind};
use strum::{Display, EnumString};

/// Color palette derived from the current theme.
#[derive(Clone, Debug)]
pub struct Colors {
    pub buffer_bg: Color,
    pub card_bg: Color,
    pub card_text: Color,
    pub error: Color,
    pub header_text: Color,
    pub text: Color,
    pub border_color: Color,
    pub light_gray: Color,
    pub gray: Color,
    pub input_editing: Color,
}

impl Default for Colors {
    fn default() -> Self {
        Self::new(Theme::default().to_palette(false), false)
    }
}

impl Colors {
    /// Creates a color palette from the given tailwind palette, falling back
    /// to basic colors if true color is not supported.
    pub fn new(color: &tailwind::Palette, true_color_enabled: bool) -> Self {
        let basic_colors = Self {
            buffer_bg: Color::Black,
            card_bg: color.c900,
            card_text: Color::White,
            error: Color::Red,
            header_text: color.c400,
            text: Color::White,
            border_color: color.c400,
            light_gray: Color::Gray,
            gray: Color::DarkGray,
            input_editing: Color::LightYellow,
        };

        let tw_colors = Self {
            buffer_bg: tailwind::SLATE.c950,
            card_bg: color.c900,
            card_text: tailwind::SLATE.c100,
            error: tailwind::RED.c600,
            header_text: color.c600,
            text: tailwind::SLATE.c200,
            border_color: color.c400,
            light_gray: tailwind::SLATE.c500,
            gray: tailwind::SLATE.c800,
            input_editing: tailwind::AMBER.c600,
        };

        if true_color_enabled {
            tw_colors
        } else {
            basic_colors
        }
    }
}

/// Available color themes for the application.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone, Display, EnumString)]
pub enum Theme {
    #[default]
    Blue,
    Emerald,
    Indigo,
    Red,
}

// Fallback palettes for terminals without true color support.
const BASIC_BLUE_PALLETE: tailwind::Palette = tailwind::Palette {
    c50: Color::LightCyan,
    c100: Color::LightCyan,
    c200: Color::LightCyan,
    c300: Color::LightCyan,
    c400: Color::LightCyan,
    c500: Color::Cyan,
    c600: Color::Cyan,
    c700: Color::Cyan,
    c800: Color::Cyan,
    c900: Color::Blue,
    c950: Color::Blue,
};

const BASIC_RED_PALLETE: tailwind::Palette = tailwind::Palette {
    c50: Color::LightRed,
    c100: Color::LightRed,
    c200: Color::LightRed,
    c300: Color::LightRed,
    c400: Color::LightRed,
    c500: Color::Red,
    c600: Color::Red,
    c700: Color::Red,
    c800: Color::Red,
    c900: Color::Red,
    c950: Color::Red,
};

const BASIC_GREEN_PALLETE: tailwind::Palette = tailwind::Palette {
    c50: Color::LightGreen,
    c100: Color::LightGreen,
    c200: Color::LightGreen,
    c300: Color::LightGreen,
    c400: Color::LightGreen,
    c500: Color::Green,
    c600: Color::Green,
    c700: Color::Green,
    c800: Color::Green,
    c900: Color::Green,
    c950: Color::Green,
};

const BASIC_MAGENTA_PALLETE: tailwind::Palette = tailwind::Palette {
    c50: Color::LightMagenta,
    c100: Color::LightMagenta,
    c200: Color::LightMagenta,
    c300: Color::LightMagenta,
    c400: Color::LightMagenta,
    c500: Color::Magenta,
    c600: Color::Magenta,
    c700: Color::Magenta,
    c800: Color::Magenta,
    c900: Color::Magenta,
    c950: Color::Magenta,
};

impl Theme {
    /// Parses a theme from its string name, defaulting to Blue.
    pub fn from_string(value: &str) -> Theme {
        Theme::from_str(value).unwrap_or_default()
    }

    /// The theme following this one, wrapping around.
    pub fn next(self) -> Theme {
        match self {
            Theme::Blue => Theme::Emerald,
            Theme::Emerald => Theme::Indigo,
            Theme::Indigo => Theme::Red,
            Theme::Red => Theme::Blue,
        }
    }

    /// Returns the tailwind palette for this theme, using basic colors if
    /// true color is not supported.
    pub fn to_palette(self, true_color_enabled: bool) -> &'static tailwind::Palette {
        if true_color_enabled {
            match self {
                Theme::Blue => &tailwind::BLUE,
                Theme::Emerald => &tailwind::EMERALD,
                Theme::Indigo => &tailwind::INDIGO,
                Theme::Red => &tailwind::RED,
            }
        } else {
            match self {
                Theme::Blue => &BASIC_BLUE_PALLETE,
                Theme::Red => &BASIC_RED_PALLETE,
                Theme::Indigo => &BASIC_MAGENTA_PALLETE,
                Theme::Emerald => &BASIC_GREEN_PALLETE,
            }
        }
    }
}

/// Parses a configured color name (`red`, `lightblue`, `#00ff00`, `42`).
/// Unknown names are logged and ignored.
pub fn parse_color(value: &str) -> Option<Color> {
    if value.is_empty() {
        return None;
    }

    match Color::from_str(value) {
        Ok(color) => Some(color),
        Err(_) => {
            log::warn!("ignoring unknown color: {value}");
            None
        }
    }
}

/// Converts a text style stack into a ratatui style, later layers winning
pub fn text_style(layers: &[StyleLayer]) -> Style {
    let layer = StyleLayer::flatten(layers);
    let mut style = Style::default();

    if let Some(fg) = layer.color.as_deref().and_then(parse_color) {
        style = style.fg(fg);
    }

    if let Some(bg) = layer.background.as_deref().and_then(parse_color) {
        style = style.bg(bg);
    }

    if layer.bold == Some(true) {
        style = style.add_modifier(Modifier::BOLD);
    }

    if layer.underline == Some(true) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    style
}

/// Border color of a container style stack
pub fn border_color(layers: &[StyleLayer]) -> Option<Color> {
    StyleLayer::flatten(layers)
        .border_color
        .as_deref()
        .and_then(parse_color)
}

#[cfg(test)]
#[path = "./colors_tests.rs"]
mod tests;
