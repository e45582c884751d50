//! Battery charge label.

use core::fmt::Write;

use heapless::String;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BatteryState {
    /// 0..=100
    pub charge_percent: u8,
    pub is_charging: bool,
}

/// Text shown by the battery label: the bare percentage.
pub fn battery_label(state: &BatteryState) -> String<4> {
    let mut s = String::new();
    // "100" is the longest value
    let _ = write!(s, "{}", state.charge_percent.min(100));
    s
}
