//! Foreground/background color pairs.

use prompter_types::color::Color;

/// A named text/background palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Amber,
    Mint,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Amber, Theme::Mint];

    /// Look up a theme by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Resolve a configured name, falling back to the default palette.
    pub fn from_config(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown theme '{name}' -- falling back to dark");
            Self::default()
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Amber => "Amber",
            Theme::Mint => "Mint",
        }
    }

    /// The next theme in cycling order.
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Amber,
            Theme::Amber => Theme::Mint,
            Theme::Mint => Theme::Light,
        }
    }

    /// `(foreground, background)`.
    pub const fn palette(self) -> (Color, Color) {
        match self {
            Theme::Light => (Color::BLACK, Color::WHITE),
            Theme::Dark => (Color::WHITE, Color::BLACK),
            Theme::Amber => (Color::rgb(0xFF, 0xEE, 0xAA), Color::rgb(0x22, 0x22, 0x22)),
            Theme::Mint => (Color::rgb(0xDF, 0xF6, 0xE5), Color::rgb(0x10, 0x22, 0x1B)),
        }
    }

    pub fn foreground(self) -> Color {
        self.palette().0
    }

    pub fn background(self) -> Color {
        self.palette().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Theme::from_name("amber"), Some(Theme::Amber));
        assert_eq!(Theme::from_name(" MINT "), Some(Theme::Mint));
        assert_eq!(Theme::from_name("solarized"), None);
    }

    #[test]
    fn unknown_config_name_falls_back() {
        assert_eq!(Theme::from_config("neon"), Theme::Dark);
    }

    #[test]
    fn cycle_visits_every_theme() {
        let mut t = Theme::Light;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(t);
            t = t.next();
        }
        assert_eq!(t, Theme::Light);
        assert_eq!(seen, Theme::ALL.to_vec());
    }

    #[test]
    fn palettes_match_named_colors() {
        assert_eq!(Theme::Dark.foreground(), Color::WHITE);
        assert_eq!(Theme::Dark.background(), Color::BLACK);
        assert_eq!(Theme::Amber.foreground(), Color::rgb(0xFF, 0xEE, 0xAA));
        assert_eq!(Theme::Mint.background(), Color::rgb(0x10, 0x22, 0x1B));
        assert_eq!(Theme::Light.palette(), (Color::BLACK, Color::WHITE));
    }

    #[test]
    fn every_palette_has_contrast() {
        for theme in Theme::ALL {
            let (fg, bg) = theme.palette();
            assert_ne!(fg, bg, "{}", theme.name());
        }
    }
}
