//! Dial layout: numerals and radial tick marks.
//!
//! Everything here is computed on the fly from the dial bounds, so the
//! paint path can iterate it without any buffers.

use core::fmt::Write;

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};
use heapless::String;

use crate::polar::{crop, inset_edges, point_on_oval};
use crate::theme::ColorRole;
use crate::trig::deg_to_trigangle;

pub const HOURS: u8 = 12;
/// Minor slots between two hour marks (2.5 degrees apart).
pub const MINOR_STEPS: u8 = 11;
pub const HOUR_STEP_DEG: f32 = 30.0;
pub const MINOR_STEP_DEG: f32 = 2.5;

/// Distance from the dial edge to the numeral anchors.
pub const NUMERAL_INSET: u32 = 50;
pub const NUMERAL_BOX: u32 = 48;
pub const NUMERAL_DESCENDER: i32 = 8;

pub const HOUR_TICK_LENGTH: u32 = 30;
pub const HALF_HOUR_TICK_LENGTH: u32 = 20;
pub const QUARTER_TICK_LENGTH: u32 = 10;
pub const FIVE_MINUTE_TICK_LENGTH: u32 = 3;
pub const TICK_STROKE: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickClass {
    Hour,
    HalfHour,
    Quarter,
    FiveMinute,
}

impl TickClass {
    /// Class of the `step`-th minor slot after an hour mark (1..=11).
    pub fn for_step(step: u8) -> Self {
        if step % 6 == 0 {
            TickClass::HalfHour
        } else if step % 3 == 0 {
            TickClass::Quarter
        } else {
            TickClass::FiveMinute
        }
    }

    pub fn length(self) -> u32 {
        match self {
            TickClass::Hour => HOUR_TICK_LENGTH,
            TickClass::HalfHour => HALF_HOUR_TICK_LENGTH,
            TickClass::Quarter => QUARTER_TICK_LENGTH,
            TickClass::FiveMinute => FIVE_MINUTE_TICK_LENGTH,
        }
    }

    pub fn color_role(self) -> ColorRole {
        match self {
            TickClass::Hour => ColorRole::Foreground,
            _ => ColorRole::MinorTick,
        }
    }
}

/// One radial tick segment, inner end first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DialTick {
    pub inner: Point,
    pub outer: Point,
    pub class: TickClass,
    /// Trig angle of the tick.
    pub angle: i32,
    pub stroke_width: u8,
}

impl DialTick {
    #[inline]
    pub fn color_role(&self) -> ColorRole {
        self.class.color_role()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Numeral {
    /// 1..=12
    pub hour: u8,
    /// Two digit, zero padded ("12", "01", ...).
    pub text: String<2>,
    pub anchor: Point,
    /// Right-aligned text box.
    pub frame: Rectangle,
}

/// Layout of a dial inside `bounds` (normally a square).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DialGeometry {
    bounds: Rectangle,
}

impl DialGeometry {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn numeral(&self, index: u8) -> Numeral {
        let hour = if index % HOURS == 0 { HOURS } else { index % HOURS };
        let angle = deg_to_trigangle(index as f32 * HOUR_STEP_DEG);
        let anchor = point_on_oval(&crop(&self.bounds, NUMERAL_INSET), angle);

        let mut text = String::new();
        // two digits always fit
        let _ = write!(text, "{:02}", hour);

        let half = (NUMERAL_BOX / 2) as i32;
        let boxed = Rectangle::new(
            Point::new(anchor.x - half, anchor.y - half),
            Size::new(NUMERAL_BOX, NUMERAL_BOX),
        );
        // trim the descender off the bottom, then give the same room back on top
        let trimmed = inset_edges(&boxed, 0, 0, NUMERAL_DESCENDER, 0);
        let frame = inset_edges(&trimmed, -NUMERAL_DESCENDER, 0, 0, 0);

        Numeral { hour, text, anchor, frame }
    }

    pub fn numerals(&self) -> impl Iterator<Item = Numeral> + '_ {
        (0..HOURS).map(move |i| self.numeral(i))
    }

    fn tick(&self, degrees: f32, class: TickClass) -> DialTick {
        let angle = deg_to_trigangle(degrees);
        DialTick {
            inner: point_on_oval(&crop(&self.bounds, class.length()), angle),
            outer: point_on_oval(&self.bounds, angle),
            class,
            angle,
            stroke_width: TICK_STROKE,
        }
    }

    pub fn hour_ticks(&self) -> impl Iterator<Item = DialTick> + '_ {
        (0..HOURS).map(move |i| self.tick(i as f32 * HOUR_STEP_DEG, TickClass::Hour))
    }

    /// The 132 non-hour ticks. Slot `j` after hour `i` sits at
    /// `i * 30 + j * 2.5` degrees; the last gap belongs to hour 11.
    pub fn minor_ticks(&self) -> impl Iterator<Item = DialTick> + '_ {
        (0..HOURS).flat_map(move |i| {
            (1..=MINOR_STEPS).map(move |j| {
                let degrees = i as f32 * HOUR_STEP_DEG + j as f32 * MINOR_STEP_DEG;
                self.tick(degrees, TickClass::for_step(j))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::rect_center;

    fn dial() -> DialGeometry {
        DialGeometry::new(Rectangle::new(Point::zero(), Size::new(540, 540)))
    }

    #[test]
    fn emits_expected_counts() {
        let d = dial();
        assert_eq!(d.numerals().count(), 12);
        assert_eq!(d.hour_ticks().count(), 12);
        assert_eq!(d.minor_ticks().count(), 132);
    }

    #[test]
    fn minor_ticks_never_land_on_hours() {
        let d = dial();
        let hours: Vec<i32> = d.hour_ticks().map(|t| t.angle).collect();
        let mut minors: Vec<i32> = d.minor_ticks().map(|t| t.angle).collect();
        for m in &minors {
            assert!(!hours.contains(m), "minor tick on hour angle {m}");
        }
        minors.sort_unstable();
        minors.dedup();
        assert_eq!(minors.len(), 132, "minor ticks must be distinct");
    }

    #[test]
    fn length_classes_by_step() {
        assert_eq!(TickClass::for_step(6), TickClass::HalfHour);
        assert_eq!(TickClass::for_step(3), TickClass::Quarter);
        assert_eq!(TickClass::for_step(9), TickClass::Quarter);
        assert_eq!(TickClass::for_step(1), TickClass::FiveMinute);
        assert_eq!(TickClass::for_step(11), TickClass::FiveMinute);

        let d = dial();
        let classes: Vec<TickClass> = d.minor_ticks().map(|t| t.class).collect();
        let half = classes.iter().filter(|c| **c == TickClass::HalfHour).count();
        let quarter = classes.iter().filter(|c| **c == TickClass::Quarter).count();
        let five = classes.iter().filter(|c| **c == TickClass::FiveMinute).count();
        assert_eq!((half, quarter, five), (12, 24, 96));
    }

    #[test]
    fn hour_ticks_run_from_inner_ring_to_edge() {
        let d = dial();
        let top = d.hour_ticks().next().unwrap();
        assert_eq!(top.inner, Point::new(270, 30));
        assert_eq!(top.outer, Point::new(270, 0));
        assert_eq!(top.stroke_width, TICK_STROKE);
        assert_eq!(top.color_role(), ColorRole::Foreground);

        let three = d.hour_ticks().nth(3).unwrap();
        assert_eq!(three.inner, Point::new(510, 270));
        assert_eq!(three.outer, Point::new(540, 270));
    }

    #[test]
    fn ticks_are_radial() {
        let d = dial();
        let c = rect_center(&d.bounds());
        for t in d.hour_ticks().chain(d.minor_ticks()) {
            let a = t.inner - c;
            let b = t.outer - c;
            // cross product of the two radius vectors, normalised by length
            let cross = (a.x * b.y - a.y * b.x) as f32;
            let len = ((b.x * b.x + b.y * b.y) as f32).sqrt();
            assert!(cross.abs() / len <= 2.0, "tick {t:?} is not radial");
            if t.class != TickClass::Hour {
                assert_eq!(t.color_role(), ColorRole::MinorTick);
            }
        }
    }

    #[test]
    fn numeral_text_and_frames() {
        let d = dial();
        let texts: Vec<&str> = vec![
            "12", "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11"
        ];
        for (n, expect) in d.numerals().zip(texts) {
            assert_eq!(n.text.as_str(), expect);
            assert_eq!(n.frame.size, Size::new(48, 48));
            assert_eq!(n.frame.top_left, Point::new(n.anchor.x - 24, n.anchor.y - 32));
        }
        let twelve = d.numeral(0);
        assert_eq!(twelve.hour, 12);
        assert_eq!(twelve.anchor, Point::new(270, 50));
        let six = d.numeral(6);
        assert_eq!(six.anchor, Point::new(270, 490));
    }
}
