//! Wall clock types and the angle the face shows for a given time.

/// Calendar time as read from the RTC.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,  // full year, e.g., 2024
    pub month: u8,  // 1-12
    pub day: u8,    // 1-31
    pub hour: u8,   // 0-23
    pub minute: u8, // 0-59
    pub second: u8, // 0-59
}

/// How often the face wants to be woken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickUnit {
    Seconds,
    Minutes,
}

impl TickUnit {
    pub fn period_secs(self) -> u32 {
        match self {
            TickUnit::Seconds => 1,
            TickUnit::Minutes => 60,
        }
    }

    /// True when moving from `prev` to `now` crosses a boundary of this unit.
    pub fn crossed(self, prev: u32, now: u32) -> bool {
        let p = self.period_secs();
        prev / p != now / p
    }
}

/// Source of local wall-clock time. `None` means the time is not known.
pub trait WallClock {
    fn now(&mut self) -> Option<DateTime>;
}

/// Hour hand angle: 30 degrees per hour plus the minute fraction.
pub fn hour_angle(hour: u8, minute: u8) -> f32 {
    30.0 * ((hour % 12) as f32 + minute as f32 / 60.0)
}

/// Debug sweep: one full turn per 30 seconds.
pub fn debug_angle(second: u8) -> f32 {
    ((12 * second as u32) % 360) as f32
}

// Days since 1970-01-01 (civil calendar).
fn days_since_unix(year: u16, month: u8, day: u8) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let d = day as i64;
    let (y1, m1) = if m <= 2 { (y - 1, m + 12) } else { (y, m) };
    let era = y1.div_euclid(400);
    let yoe = y1 - era * 400;
    let doy = 153 * (m1 + 1) / 5 + d - 123; // days since March 1
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468 // 719468 = days from 0000-03-01 to 1970-01-01
}

/// Seconds since 1970-01-01, saturating at the ends of `u32`.
pub fn datetime_to_unix(dt: &DateTime) -> u32 {
    let secs = days_since_unix(dt.year, dt.month, dt.day) * 86_400
        + dt.hour as i64 * 3600
        + dt.minute as i64 * 60
        + dt.second as i64;
    secs.clamp(0, u32::MAX as i64) as u32
}

pub fn unix_to_datetime(mut ts: u32) -> DateTime {
    let days = ts / 86_400;
    ts %= 86_400;
    let hour = (ts / 3600) as u8;
    ts %= 3600;
    let minute = (ts / 60) as u8;
    let second = (ts % 60) as u8;

    let z = days as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };

    DateTime {
        year: year as u16,
        month: month as u8,
        day: day as u8,
        hour,
        minute,
        second,
    }
}

/// Basic sanity check on a decoded RTC time.
pub fn datetime_is_valid(dt: &DateTime) -> bool {
    (2020..=2099).contains(&dt.year)
        && (1..=12).contains(&dt.month)
        && (1..=31).contains(&dt.day)
        && dt.hour < 24
        && dt.minute < 60
        && dt.second < 60
}

/// Clock that returns a fixed, settable time. Useful before the RTC is up
/// and in tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct FixedClock {
    pub time: Option<DateTime>,
}

impl WallClock for FixedClock {
    fn now(&mut self) -> Option<DateTime> {
        self.time
    }
}
