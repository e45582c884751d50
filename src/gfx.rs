//! Drawing surface used by the renderer.
//!
//! `GraphicsContext` is the small, stateful drawing API the watchface needs
//! (colors and stroke width are set first, then shapes are drawn, like a
//! watch SDK graphics context). `Canvas` implements it on top of any
//! embedded-graphics `DrawTarget<Color = Rgb565>`.

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    mono_font::{
        ascii::{FONT_10X20, FONT_9X18_BOLD},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::{Point, Primitive, Size},
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};

use crate::theme::PaletteColor;

/// Fonts the face can ask for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FontKey {
    /// Dial numerals.
    Gothic24Bold,
    /// Battery label.
    Gothic28Bold,
}

impl FontKey {
    pub fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontKey::Gothic24Bold => &FONT_9X18_BOLD,
            FontKey::Gothic28Bold => &FONT_10X20,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextOverflow {
    /// Break at spaces onto further lines, clipped to the box.
    WordWrap,
    /// One line, clipped to the box.
    Fill,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

pub trait GraphicsContext {
    fn set_fill_color(&mut self, color: PaletteColor);
    fn set_stroke_color(&mut self, color: PaletteColor);
    fn set_stroke_width(&mut self, width: u8);
    fn set_text_color(&mut self, color: PaletteColor);

    /// Offset added to every coordinate of the following calls (layer
    /// frame origin).
    fn set_origin(&mut self, origin: Point);

    fn fill_rect(&mut self, rect: Rectangle);
    fn draw_circle(&mut self, center: Point, radius: u32);
    fn fill_circle(&mut self, center: Point, radius: u32);
    fn draw_line(&mut self, p0: Point, p1: Point);
    fn fill_polygon(&mut self, points: &[Point]);
    fn draw_text(
        &mut self,
        text: &str,
        font: FontKey,
        rect: Rectangle,
        overflow: TextOverflow,
        alignment: TextAlignment,
    );
}

/// `GraphicsContext` over an embedded-graphics draw target. Anything that
/// falls outside the target is clipped by the target.
pub struct Canvas<'a, D> {
    target: &'a mut D,
    origin: Point,
    fill: Rgb565,
    stroke: Rgb565,
    stroke_width: u32,
    text: Rgb565,
}

impl<'a, D> Canvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            origin: Point::zero(),
            fill: PaletteColor::Black.into(),
            stroke: PaletteColor::Black.into(),
            stroke_width: 1,
            text: PaletteColor::Black.into(),
        }
    }

    fn draw_text_line(&mut self, line: &str, pos: Point, font: FontKey, rect: Rectangle, align: Alignment) {
        let char_style = MonoTextStyle::new(font.font(), self.text);
        let text_style = TextStyleBuilder::new()
            .alignment(align)
            .baseline(Baseline::Top)
            .build();
        let mut clipped = self.target.clipped(&rect);
        Text::with_text_style(line, pos, char_style, text_style)
            .draw(&mut clipped)
            .ok();
    }
}

// Greedy wrap of `text` at spaces into lines of at most `max_chars`
// characters; words longer than a line are split.
fn wrap_lines(text: &str, max_chars: usize) -> impl Iterator<Item = &str> {
    let max_chars = max_chars.max(1);
    let mut rest = text.trim();
    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some((limit, _)) = rest.char_indices().nth(max_chars) else {
            let line = rest;
            rest = "";
            return Some(line);
        };
        let cut = if rest[limit..].starts_with(' ') {
            limit
        } else {
            rest[..limit].rfind(' ').filter(|&i| i > 0).unwrap_or(limit)
        };
        let (line, tail) = rest.split_at(cut);
        rest = tail.trim_start();
        Some(line.trim_end())
    })
}

impl<'a, D> GraphicsContext for Canvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn set_fill_color(&mut self, color: PaletteColor) {
        self.fill = color.into();
    }

    fn set_stroke_color(&mut self, color: PaletteColor) {
        self.stroke = color.into();
    }

    fn set_stroke_width(&mut self, width: u8) {
        self.stroke_width = width as u32;
    }

    fn set_text_color(&mut self, color: PaletteColor) {
        self.text = color.into();
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn fill_rect(&mut self, rect: Rectangle) {
        let rect = Rectangle::new(rect.top_left + self.origin, rect.size);
        self.target.fill_solid(&rect, self.fill).ok();
    }

    fn draw_circle(&mut self, center: Point, radius: u32) {
        Circle::with_center(center + self.origin, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_stroke(self.stroke, self.stroke_width))
            .draw(&mut *self.target)
            .ok();
    }

    fn fill_circle(&mut self, center: Point, radius: u32) {
        Circle::with_center(center + self.origin, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(self.fill))
            .draw(&mut *self.target)
            .ok();
    }

    fn draw_line(&mut self, p0: Point, p1: Point) {
        Line::new(p0 + self.origin, p1 + self.origin)
            .into_styled(PrimitiveStyle::with_stroke(self.stroke, self.stroke_width))
            .draw(&mut *self.target)
            .ok();
    }

    // Triangle fan from the first vertex; fine for the convex shapes the
    // face draws.
    fn fill_polygon(&mut self, points: &[Point]) {
        if points.len() < 3 {
            return;
        }
        let style = PrimitiveStyle::with_fill(self.fill);
        let first = points[0] + self.origin;
        for pair in points[1..].windows(2) {
            Triangle::new(first, pair[0] + self.origin, pair[1] + self.origin)
                .into_styled(style)
                .draw(&mut *self.target)
                .ok();
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: FontKey,
        rect: Rectangle,
        overflow: TextOverflow,
        alignment: TextAlignment,
    ) {
        let rect = Rectangle::new(rect.top_left + self.origin, rect.size);
        let (align, x) = match alignment {
            TextAlignment::Left => (Alignment::Left, rect.top_left.x),
            TextAlignment::Center => (
                Alignment::Center,
                rect.top_left.x + (rect.size.width / 2) as i32,
            ),
            TextAlignment::Right => (
                Alignment::Right,
                rect.top_left.x + rect.size.width as i32 - 1,
            ),
        };

        let glyph: Size = font.font().character_size;
        let advance = (glyph.width + font.font().character_spacing).max(1);
        match overflow {
            TextOverflow::Fill => self.draw_text_line(text, Point::new(x, rect.top_left.y), font, rect, align),
            TextOverflow::WordWrap => {
                let max_chars = (rect.size.width / advance).max(1) as usize;
                let mut y = rect.top_left.y;
                for line in wrap_lines(text, max_chars) {
                    self.draw_text_line(line, Point::new(x, y), font, rect, align);
                    y += glyph.height as i32;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuf::FrameBuffer;

    fn with_canvas(f: impl FnOnce(&mut Canvas<'_, FrameBuffer<'_>>)) -> Vec<u16> {
        let mut buf = vec![0u16; 32 * 32];
        let mut fb = FrameBuffer::new(&mut buf, 32, 32).unwrap();
        {
            let mut canvas = Canvas::new(&mut fb);
            f(&mut canvas);
        }
        buf
    }

    fn at(buf: &[u16], x: usize, y: usize) -> u16 {
        buf[y * 32 + x]
    }

    fn raw(c: PaletteColor) -> u16 {
        use embedded_graphics::prelude::IntoStorage;
        Rgb565::from(c).into_storage()
    }

    #[test]
    fn fill_rect_honours_origin() {
        let buf = with_canvas(|c| {
            c.set_fill_color(PaletteColor::White);
            c.set_origin(Point::new(10, 5));
            c.fill_rect(Rectangle::new(Point::zero(), Size::new(2, 2)));
        });
        assert_eq!(at(&buf, 10, 5), raw(PaletteColor::White));
        assert_eq!(at(&buf, 11, 6), raw(PaletteColor::White));
        assert_eq!(at(&buf, 0, 0), 0);
        assert_eq!(at(&buf, 12, 5), 0);
    }

    #[test]
    fn polygon_fan_fills_quad() {
        let buf = with_canvas(|c| {
            c.set_fill_color(PaletteColor::Red);
            c.fill_polygon(&[
                Point::new(4, 4),
                Point::new(20, 4),
                Point::new(20, 20),
                Point::new(4, 20),
            ]);
        });
        assert_eq!(at(&buf, 12, 12), raw(PaletteColor::Red));
        assert_eq!(at(&buf, 5, 18), raw(PaletteColor::Red));
        assert_eq!(at(&buf, 18, 5), raw(PaletteColor::Red));
        assert_eq!(at(&buf, 25, 25), 0);
    }

    #[test]
    fn offscreen_drawing_is_clipped() {
        let buf = with_canvas(|c| {
            c.set_stroke_color(PaletteColor::White);
            c.set_stroke_width(2);
            c.set_origin(Point::new(-500, -500));
            c.draw_line(Point::new(0, 0), Point::new(900, 520));
            c.set_fill_color(PaletteColor::White);
            c.fill_circle(Point::new(0, 0), 90);
        });
        assert_eq!(buf.len(), 32 * 32);
    }

    #[test]
    fn line_uses_stroke_color() {
        let buf = with_canvas(|c| {
            c.set_stroke_color(PaletteColor::DarkGray);
            c.set_stroke_width(1);
            c.draw_line(Point::new(0, 3), Point::new(31, 3));
        });
        assert_eq!(at(&buf, 16, 3), raw(PaletteColor::DarkGray));
        assert_eq!(at(&buf, 16, 4), 0);
    }

    #[test]
    fn stroked_circle_leaves_center_empty() {
        let buf = with_canvas(|c| {
            c.set_stroke_color(PaletteColor::White);
            c.set_stroke_width(1);
            c.draw_circle(Point::new(16, 16), 5);
        });
        assert_eq!(at(&buf, 16, 16), 0);
        assert!((9..=13).any(|y| at(&buf, 16, y) == raw(PaletteColor::White)));
        assert_eq!(at(&buf, 16, 2), 0);
    }

    #[test]
    fn text_stays_inside_its_box() {
        let buf = with_canvas(|c| {
            c.set_text_color(PaletteColor::White);
            c.draw_text(
                "88",
                FontKey::Gothic24Bold,
                Rectangle::new(Point::new(8, 8), Size::new(12, 10)),
                TextOverflow::WordWrap,
                TextAlignment::Right,
            );
        });
        let mut lit = 0;
        for y in 0..32 {
            for x in 0..32 {
                if at(&buf, x, y) != 0 {
                    lit += 1;
                    assert!((8..20).contains(&x) && (8..18).contains(&y), "pixel at {x},{y}");
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn wraps_at_spaces() {
        let lines: Vec<&str> = wrap_lines("ab cd efgh", 5).collect();
        assert_eq!(lines, vec!["ab cd", "efgh"]);
        let lines: Vec<&str> = wrap_lines("abcdefgh", 3).collect();
        assert_eq!(lines, vec!["abc", "def", "gh"]);
        assert_eq!(wrap_lines("   ", 4).count(), 0);
    }
}
