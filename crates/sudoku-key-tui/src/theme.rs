use crate::config::ThemeName;
use crossterm::style::Color;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Board colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    /// Message text
    pub text: Color,
    /// Hints, labels and the `·` blank marker
    pub muted: Color,
    /// Key names and the title
    pub accent: Color,
    /// Lines between cells
    pub rule: Color,
    /// Lines between 3x3 boxes
    pub box_rule: Color,
    pub given: Color,
    /// Digits the player typed
    pub entry: Color,
    /// Background under the cursor
    pub cursor: Color,
    /// Background of the cursor's row, column and box
    pub peers: Color,
    pub good: Color,
    pub bad: Color,
}

const DARK: Theme = Theme {
    bg: rgb(16, 16, 20),
    text: rgb(236, 236, 236),
    muted: rgb(120, 120, 132),
    accent: rgb(255, 200, 80),
    rule: rgb(60, 60, 72),
    box_rule: rgb(150, 150, 165),
    given: rgb(200, 200, 200),
    // Entries in orange
    entry: rgb(255, 165, 0),
    cursor: rgb(80, 80, 110),
    peers: rgb(32, 32, 42),
    good: rgb(110, 220, 110),
    bad: rgb(240, 80, 80),
};

const LIGHT: Theme = Theme {
    bg: Color::White,
    text: Color::Black,
    muted: Color::DarkGrey,
    accent: Color::DarkYellow,
    rule: Color::Grey,
    box_rule: Color::Black,
    given: Color::Black,
    entry: Color::DarkBlue,
    cursor: rgb(190, 210, 250),
    peers: rgb(236, 238, 246),
    good: Color::DarkGreen,
    bad: Color::DarkRed,
};

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => DARK,
            ThemeName::Light => LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_pick_palettes() {
        assert_eq!(Theme::from(ThemeName::Dark), DARK);
        assert_eq!(Theme::from(ThemeName::Light), LIGHT);
        assert_eq!(Theme::from(ThemeName::default()), DARK);
    }

    #[test]
    fn entries_stand_out_from_givens() {
        for theme in [DARK, LIGHT] {
            assert_ne!(theme.entry, theme.given);
            assert_ne!(theme.cursor, theme.bg);
        }
    }
}
