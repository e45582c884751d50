//! Polar placement on rectangles.
//!
//! `point_on_oval` casts a ray from the center of a rectangle and returns
//! where it meets the inscribed oval. Angle 0 points up (12 o'clock) and
//! angles grow clockwise, matching a watch dial in screen coordinates
//! (y grows downwards).

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::trig::{cos_lookup, scale_by_ratio, sin_lookup};

/// Center of a rect as `origin + size / 2`.
///
/// This is not `Rectangle::center`, which rounds towards the top-left pixel;
/// the dial math needs the half-size point so opposite edges are symmetric.
#[inline]
pub fn rect_center(rect: &Rectangle) -> Point {
    Point::new(
        rect.top_left.x + (rect.size.width / 2) as i32,
        rect.top_left.y + (rect.size.height / 2) as i32,
    )
}

/// Insets each edge independently. Negative values grow the rect.
///
/// An edge pair that would cross collapses to an empty span in the middle.
pub fn inset_edges(rect: &Rectangle, top: i32, right: i32, bottom: i32, left: i32) -> Rectangle {
    let (x, w) = inset_span(rect.top_left.x, rect.size.width, left, right);
    let (y, h) = inset_span(rect.top_left.y, rect.size.height, top, bottom);
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

fn inset_span(start: i32, len: u32, near: i32, far: i32) -> (i32, u32) {
    let new_len = len as i64 - near as i64 - far as i64;
    if new_len >= 0 {
        (start + near, new_len as u32)
    } else {
        // centered empty span
        (start + (len / 2) as i32, 0)
    }
}

/// Shrinks (positive `n`) or grows (negative `n`) the rect on all sides.
#[inline]
pub fn inset(rect: &Rectangle, n: i32) -> Rectangle {
    inset_edges(rect, n, n, n, n)
}

/// Shrinks the rect by `n` pixels on all sides.
#[inline]
pub fn crop(rect: &Rectangle, n: u32) -> Rectangle {
    inset(rect, n as i32)
}

/// The parts of `outer` not covered by `inner`: top, bottom, left and right
/// strips. `inner` is expected to lie inside `outer`; strips that would have
/// a negative extent come back empty.
pub fn frame_margins(outer: &Rectangle, inner: &Rectangle) -> [Rectangle; 4] {
    let (ox0, oy0) = (outer.top_left.x, outer.top_left.y);
    let ox1 = ox0 + outer.size.width as i32;
    let oy1 = oy0 + outer.size.height as i32;
    let (ix0, iy0) = (inner.top_left.x, inner.top_left.y);
    let ix1 = ix0 + inner.size.width as i32;
    let iy1 = iy0 + inner.size.height as i32;

    let span = |a: i32, b: i32| (b - a).max(0) as u32;
    [
        Rectangle::new(outer.top_left, Size::new(outer.size.width, span(oy0, iy0))),
        Rectangle::new(Point::new(ox0, iy1), Size::new(outer.size.width, span(iy1, oy1))),
        Rectangle::new(Point::new(ox0, iy0), Size::new(span(ox0, ix0), inner.size.height)),
        Rectangle::new(Point::new(ix1, iy0), Size::new(span(ix1, ox1), inner.size.height)),
    ]
}

// Rounded a / b with b > 0, half away from zero.
#[inline]
fn div_round(a: i64, b: i64) -> i64 {
    if a >= 0 {
        (a + b / 2) / b
    } else {
        (a - b / 2) / b
    }
}

// floor(sqrt(v))
fn isqrt(v: u64) -> u64 {
    if v < 2 {
        return v;
    }
    let mut x = v;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + v / x) / 2;
    }
    x
}

/// Point where the ray at `angle` (trig angle) meets the oval inscribed in
/// `rect`.
///
/// For a square this is the inscribed circle. The result always lies within
/// the rect's closure `[origin, origin + size]`.
pub fn point_on_oval(rect: &Rectangle, angle: i32) -> Point {
    let center = rect_center(rect);
    let rx = (rect.size.width / 2) as i64;
    let ry = (rect.size.height / 2) as i64;

    let s = sin_lookup(angle);
    let c = cos_lookup(angle);

    if rx == ry {
        let r = rx as i32;
        return Point::new(
            center.x + scale_by_ratio(r, s),
            center.y - scale_by_ratio(r, c),
        );
    }

    // Ray/ellipse intersection: t = rx*ry / sqrt((ry*s)^2 + (rx*c)^2), the
    // ray direction being (s, -c) in TRIG_UNIT scale.
    let (s, c) = (s as i64, c as i64);
    let den = isqrt(((ry * s) * (ry * s) + (rx * c) * (rx * c)) as u64) as i64;
    if den == 0 {
        return center;
    }
    let k = rx * ry;
    Point::new(
        center.x + div_round(k * s, den) as i32,
        center.y - div_round(k * c, den) as i32,
    )
}
