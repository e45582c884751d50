//! Hour hand polygon.

use embedded_graphics::prelude::Point;

use crate::trig::{atan2_lookup, cos_lookup, scale_by_ratio, sin_lookup};

pub const DEFAULT_HALF_THICKNESS: u8 = 3;

/// Four vertices of the filled hand: center side first, then the tip side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HandQuad(pub [Point; 4]);

impl HandQuad {
    /// Builds the hand between `center` and `tip`.
    ///
    /// The thickness offset is `(cos a, sin a)` where `a` is the hand angle
    /// (clockwise from 12 o'clock). The hand itself runs along
    /// `(sin a, -cos a)` on screen, so the offset is its perpendicular.
    pub fn new(center: Point, tip: Point, half_thickness: u8) -> Self {
        let angle = direction(center, tip);
        let h = half_thickness.max(1) as i32;
        let offset = Point::new(
            scale_by_ratio(h, cos_lookup(angle)),
            scale_by_ratio(h, sin_lookup(angle)),
        );
        HandQuad([center - offset, center + offset, tip + offset, tip - offset])
    }

    #[inline]
    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// Twice the signed area (shoelace).
    pub fn doubled_area(&self) -> i64 {
        let p = &self.0;
        (0..4)
            .map(|i| {
                let (a, b) = (p[i], p[(i + 1) % 4]);
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum()
    }
}

/// Trig angle of `to` seen from `from`, 0 = up, clockwise. Coincident points
/// give 0.
pub fn direction(from: Point, to: Point) -> i32 {
    let d = to - from;
    // clockwise from up: sine follows x, cosine follows -y
    atan2_lookup(d.x, -d.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::point_on_oval;
    use crate::trig::TRIG_MAX_ANGLE;
    use embedded_graphics::{prelude::Size, primitives::Rectangle};

    #[test]
    fn vertical_hand_is_offset_sideways() {
        let q = HandQuad::new(Point::new(270, 270), Point::new(270, 0), 3);
        assert_eq!(
            q.points(),
            &[
                Point::new(267, 270),
                Point::new(273, 270),
                Point::new(273, 0),
                Point::new(267, 0),
            ]
        );
    }

    #[test]
    fn horizontal_hand_is_offset_vertically() {
        let q = HandQuad::new(Point::new(0, 0), Point::new(100, 0), 3);
        assert_eq!(
            q.points(),
            &[
                Point::new(0, -3),
                Point::new(0, 3),
                Point::new(100, 3),
                Point::new(100, -3),
            ]
        );
    }

    #[test]
    fn directions() {
        let c = Point::new(10, 10);
        assert_eq!(direction(c, Point::new(10, 0)), 0);
        assert_eq!(direction(c, Point::new(20, 10)), TRIG_MAX_ANGLE / 4);
        assert_eq!(direction(c, Point::new(10, 20)), TRIG_MAX_ANGLE / 2);
        assert_eq!(direction(c, Point::new(0, 10)), 3 * TRIG_MAX_ANGLE / 4);
        assert_eq!(direction(c, c), 0);
    }

    #[test]
    fn nonzero_area_whenever_center_differs_from_tip() {
        let center = Point::new(3, -7);
        for dx in -12..=12 {
            for dy in -12..=12 {
                let tip = center + Point::new(dx, dy);
                if tip == center {
                    continue;
                }
                let q = HandQuad::new(center, tip, DEFAULT_HALF_THICKNESS);
                assert_ne!(q.doubled_area(), 0, "tip={tip:?}");
            }
        }
    }

    #[test]
    fn offset_stays_perpendicular_around_the_dial() {
        let dial = Rectangle::new(Point::new(-180, -420), Size::new(540, 540));
        let center = Point::new(90, -150);
        for a in (0..TRIG_MAX_ANGLE).step_by(TRIG_MAX_ANGLE as usize / 360) {
            let tip = point_on_oval(&dial, a);
            let q = HandQuad::new(center, tip, DEFAULT_HALF_THICKNESS);
            let p = q.points();
            let off = p[1] - center;
            let along = tip - center;
            let dot = (off.x * along.x + off.y * along.y) as f32;
            let len = ((along.x * along.x + along.y * along.y) as f32).sqrt();
            // rounding the 3 px offset can tilt it by at most ~half a pixel
            assert!(dot.abs() / len < 1.0, "a={a} off={off:?}");
            // at least 4 px wide everywhere
            assert!(q.doubled_area().abs() as f32 >= 4.0 * len, "a={a}");
        }
    }

    #[test]
    fn thickness_is_at_least_one_pixel() {
        let q = HandQuad::new(Point::new(0, 0), Point::new(0, -50), 0);
        assert_eq!(q.points()[0], Point::new(-1, 0));
        assert_eq!(q.points()[1], Point::new(1, 0));
    }
}
