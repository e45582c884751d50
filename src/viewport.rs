//! Places the oversized dial behind the display window.
//!
//! The dial is three display-heights across, so only about a third of it is
//! visible. `recenter` slides it so the part of the dial under "now" ends up
//! in the middle of the window, which makes the dial orbit the screen as
//! the hours go by.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::dial::HOUR_TICK_LENGTH;
use crate::polar::{crop, inset, point_on_oval, rect_center};
use crate::trig::deg_to_trigangle;

pub const DIAL_SCALE: u32 = 3;
/// How far outside the window the dial center orbits.
pub const ORBIT_MARGIN: i32 = 150;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewportTransform {
    dial_rect: Rectangle,
    viewport_rect: Rectangle,
}

impl ViewportTransform {
    pub fn new(viewport_rect: Rectangle) -> Self {
        let side = viewport_rect.size.height * DIAL_SCALE;
        Self {
            dial_rect: Rectangle::new(Point::zero(), Size::new(side, side)),
            viewport_rect,
        }
    }

    #[inline]
    pub fn dial_rect(&self) -> Rectangle {
        self.dial_rect
    }

    #[inline]
    pub fn viewport_rect(&self) -> Rectangle {
        self.viewport_rect
    }

    /// Center of the dial in viewport coordinates; the hand pivots here.
    #[inline]
    pub fn dial_center(&self) -> Point {
        rect_center(&self.dial_rect)
    }

    /// Moves the dial so the hour at `angle_deg` sits under the window
    /// center.
    pub fn recenter(&mut self, angle_deg: f32) {
        let orbit = inset(&self.viewport_rect, -ORBIT_MARGIN);
        let origin = point_on_oval(&orbit, deg_to_trigangle(angle_deg + 180.0));
        self.dial_rect.top_left = Point::new(
            origin.x - (self.dial_rect.size.width / 2) as i32,
            origin.y - (self.dial_rect.size.height / 2) as i32,
        );
        log::trace!("dial origin {:?} for {} deg", self.dial_rect.top_left, angle_deg);
    }

    /// Where the hand meets the dial's outer edge.
    pub fn hand_tip(&self, angle_deg: f32) -> Point {
        point_on_oval(&self.dial_rect, deg_to_trigangle(angle_deg))
    }

    /// The point on the hour-tick inner ring at `angle_deg`. After
    /// `recenter(angle_deg)` this is the dial point shown at the window
    /// center.
    pub fn focus_point(&self, angle_deg: f32) -> Point {
        point_on_oval(&crop(&self.dial_rect, HOUR_TICK_LENGTH), deg_to_trigangle(angle_deg))
    }

    /// Dial bounds in the dial's own coordinates.
    pub fn dial_bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.dial_rect.size)
    }
}
