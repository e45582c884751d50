//! Theme and palette.
//!
//! The face only ever uses five colors. Everything that draws asks for a
//! `ColorRole`, and the `Theme` resolves it against the inversion flag and
//! the kind of panel (monochrome panels get grays where color panels get
//! the red accent).

use embedded_graphics::{pixelcolor::Rgb565, prelude::RgbColor};

/// Storage key of the persisted "inverted" flag.
pub const THEME_KEY: u32 = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaletteColor {
    Black,
    White,
    LightGray,
    DarkGray,
    Red,
}

impl From<PaletteColor> for Rgb565 {
    fn from(c: PaletteColor) -> Self {
        match c {
            PaletteColor::Black => Rgb565::BLACK,
            PaletteColor::White => Rgb565::WHITE,
            // 0xAAAAAA / 0x555555 in 5-6-5
            PaletteColor::LightGray => Rgb565::new(21, 42, 21),
            PaletteColor::DarkGray => Rgb565::new(10, 21, 10),
            PaletteColor::Red => Rgb565::RED,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayKind {
    Monochrome,
    Color,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorRole {
    Background,
    Foreground,
    MinorTick,
    Hand,
    BatteryText,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    inverted: bool,
    kind: DisplayKind,
}

impl Theme {
    pub const fn new(kind: DisplayKind, inverted: bool) -> Self {
        Self { inverted, kind }
    }

    // Monochrome panels start dark, color panels start light.
    pub const fn default_for(kind: DisplayKind) -> Self {
        let inverted = matches!(kind, DisplayKind::Monochrome);
        Self::new(kind, inverted)
    }

    #[inline]
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    #[inline]
    pub fn kind(&self) -> DisplayKind {
        self.kind
    }

    pub fn toggle(&mut self) -> bool {
        self.inverted = !self.inverted;
        self.inverted
    }

    pub fn color(&self, role: ColorRole) -> PaletteColor {
        use PaletteColor::*;
        match (role, self.inverted) {
            (ColorRole::Background, true) => Black,
            (ColorRole::Background, false) => White,
            (ColorRole::Foreground, true) => White,
            (ColorRole::Foreground, false) => Black,
            (ColorRole::MinorTick, true) => LightGray,
            (ColorRole::MinorTick, false) => DarkGray,
            (ColorRole::Hand, inverted) => match self.kind {
                DisplayKind::Monochrome if inverted => DarkGray,
                DisplayKind::Monochrome => LightGray,
                DisplayKind::Color => Red,
            },
            (ColorRole::BatteryText, _) => DarkGray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_display_kind() {
        assert!(Theme::default_for(DisplayKind::Monochrome).inverted());
        assert!(!Theme::default_for(DisplayKind::Color).inverted());
    }

    #[test]
    fn inverted_roles() {
        let t = Theme::new(DisplayKind::Monochrome, true);
        assert_eq!(t.color(ColorRole::Background), PaletteColor::Black);
        assert_eq!(t.color(ColorRole::Foreground), PaletteColor::White);
        assert_eq!(t.color(ColorRole::MinorTick), PaletteColor::LightGray);
        assert_eq!(t.color(ColorRole::Hand), PaletteColor::DarkGray);
    }

    #[test]
    fn normal_roles() {
        let t = Theme::new(DisplayKind::Monochrome, false);
        assert_eq!(t.color(ColorRole::Background), PaletteColor::White);
        assert_eq!(t.color(ColorRole::Foreground), PaletteColor::Black);
        assert_eq!(t.color(ColorRole::MinorTick), PaletteColor::DarkGray);
        assert_eq!(t.color(ColorRole::Hand), PaletteColor::LightGray);
    }

    #[test]
    fn color_panels_use_red_hand_in_both_themes() {
        let mut t = Theme::new(DisplayKind::Color, false);
        assert_eq!(t.color(ColorRole::Hand), PaletteColor::Red);
        assert_eq!(t.color(ColorRole::Background), PaletteColor::White);
        assert!(t.toggle());
        assert_eq!(t.color(ColorRole::Hand), PaletteColor::Red);
        assert_eq!(t.color(ColorRole::Background), PaletteColor::Black);
    }

    #[test]
    fn toggle_twice_restores() {
        let mut t = Theme::new(DisplayKind::Monochrome, true);
        let before = t;
        t.toggle();
        assert_ne!(t, before);
        t.toggle();
        assert_eq!(t, before);
    }

    #[test]
    fn palette_maps_to_distinct_rgb565() {
        let all = [
            PaletteColor::Black,
            PaletteColor::White,
            PaletteColor::LightGray,
            PaletteColor::DarkGray,
            PaletteColor::Red,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(Rgb565::from(*a), Rgb565::from(*b));
            }
        }
    }
}
