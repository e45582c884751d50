//! Face options. Defaults come from Cargo features so a board profile can
//! pick them at build time; tests build the struct directly.

use crate::clock::TickUnit;
use crate::hand::DEFAULT_HALF_THICKNESS;
use crate::theme::DisplayKind;

/// Radius of the background disc painted under the dial numerals.
pub const FACE_RADIUS: u32 = 90;

/// Battery label row for round and rectangular panels.
pub const BATTERY_TOP_ROUND: i32 = 58;
pub const BATTERY_TOP_RECT: i32 = 52;
pub const BATTERY_HEIGHT: u32 = 50;

cfg_if::cfg_if! {
    if #[cfg(feature = "monochrome")] {
        pub const DEFAULT_DISPLAY_KIND: DisplayKind = DisplayKind::Monochrome;
    } else {
        pub const DEFAULT_DISPLAY_KIND: DisplayKind = DisplayKind::Color;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayShape {
    Round,
    Rect,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WatchConfig {
    /// Sweep the hand once every 30 seconds instead of showing the time.
    pub debug: bool,
    pub display_kind: DisplayKind,
    pub display_shape: DisplayShape,
    pub hand_half_thickness: u8,
    pub show_battery: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debug: cfg!(feature = "debug-sweep"),
            display_kind: DEFAULT_DISPLAY_KIND,
            display_shape: DisplayShape::Round,
            hand_half_thickness: DEFAULT_HALF_THICKNESS,
            show_battery: false,
        }
    }
}

impl WatchConfig {
    /// Tick granularity the host should deliver.
    pub fn tick_unit(&self) -> TickUnit {
        if self.debug {
            TickUnit::Seconds
        } else {
            TickUnit::Minutes
        }
    }

    pub fn battery_top(&self) -> i32 {
        match self.display_shape {
            DisplayShape::Round => BATTERY_TOP_ROUND,
            DisplayShape::Rect => BATTERY_TOP_RECT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_unit_follows_debug() {
        let mut c = WatchConfig::default();
        c.debug = false;
        assert_eq!(c.tick_unit(), TickUnit::Minutes);
        c.debug = true;
        assert_eq!(c.tick_unit(), TickUnit::Seconds);
    }

    #[test]
    fn defaults() {
        let c = WatchConfig::default();
        assert_eq!(c.hand_half_thickness, 3);
        assert!(!c.show_battery);
        assert_eq!(c.battery_top(), 58);
        let rect = WatchConfig { display_shape: DisplayShape::Rect, ..c };
        assert_eq!(rect.battery_top(), 52);
    }
}
