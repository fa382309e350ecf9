use ratatui::style::Color;
use whereto_core::{models::Genre, view::Section};

/// Palette for one section of the UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary_bg: Color,
    pub primary_fg: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub warning: Color,
    pub on_accent: Color,
}

impl Theme {
    /// Light rose palette used by the day section.
    pub fn day() -> Self {
        let accent = hex("#e11d48");
        let selection_bg = hex("#ffe4e6");
        Self {
            primary_bg: Color::Reset,
            primary_fg: Color::Reset,
            accent,
            accent_alt: hex("#f97316"),
            muted: Color::DarkGray,
            selection_bg,
            selection_fg: contrast_color(&selection_bg, Color::Black),
            warning: hex("#facc15"),
            on_accent: contrast_color(&accent, Color::White),
        }
    }

    /// Dark gold palette used by the night section.
    pub fn night() -> Self {
        let accent = hex("#facc15");
        let selection_bg = hex("#374151");
        Self {
            primary_bg: hex("#111827"),
            primary_fg: Color::White,
            accent,
            accent_alt: hex("#3b82f6"),
            muted: Color::Gray,
            selection_bg,
            selection_fg: contrast_color(&selection_bg, Color::White),
            warning: accent,
            on_accent: contrast_color(&accent, Color::Black),
        }
    }

    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Day => Self::day(),
            Section::Night => Self::night(),
        }
    }
}

/// Badge colour for a genre; unknown genres get a neutral grey.
pub fn genre_color(genre: Genre) -> Color {
    match genre {
        Genre::Electronic => hex("#a855f7"),
        Genre::HipHop => hex("#f97316"),
        Genre::Rock => hex("#ef4444"),
        Genre::Jazz => hex("#3b82f6"),
        Genre::Latin => hex("#22c55e"),
        Genre::Pop => hex("#ec4899"),
        Genre::Other => hex("#6b7280"),
    }
}

fn hex(input: &str) -> Color {
    parse_hex_color(input).unwrap_or(Color::Reset)
}

fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn contrast_color(color: &Color, fallback: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let luminance =
                0.299 * f64::from(*r) + 0.587 * f64::from(*g) + 0.114 * f64::from(*b);
            if luminance > 186.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => fallback,
    }
}
