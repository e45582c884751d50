//! RGB565 frame buffer that the face is painted into before it is pushed to
//! the panel in one go.
//!
//! Pixels are stored as native `u16` RGB565 values, row major. Every write
//! is clipped to the buffer and grows a dirty rectangle, so the flush can
//! send only the area that changed.

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::{IntoStorage, OriginDimensions, Point, Size},
    primitives::Rectangle,
    Pixel,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameBufferError {
    /// Backing slice is shorter than `width * height`.
    TooSmall { needed: usize, got: usize },
}

pub struct FrameBuffer<'fb> {
    buf: &'fb mut [u16],
    w: u16,
    h: u16,
    dirty: Option<(u16, u16, u16, u16)>,
}

impl<'fb> FrameBuffer<'fb> {
    pub fn new(buf: &'fb mut [u16], w: u16, h: u16) -> Result<Self, FrameBufferError> {
        let needed = w as usize * h as usize;
        if buf.len() < needed {
            return Err(FrameBufferError::TooSmall { needed, got: buf.len() });
        }
        Ok(Self { buf, w, h, dirty: None })
    }

    pub fn width(&self) -> u16 {
        self.w
    }

    pub fn height(&self) -> u16 {
        self.h
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return None;
        }
        let raw = self.buf[y as usize * self.w as usize + x as usize];
        Some(Rgb565::from(RawU16::new(raw)))
    }

    /// Whole buffer, row major.
    pub fn as_raw(&self) -> &[u16] {
        &self.buf[..self.w as usize * self.h as usize]
    }

    /// Row `y` of the buffer.
    pub fn row(&self, y: u16) -> &[u16] {
        let start = y.min(self.h.saturating_sub(1)) as usize * self.w as usize;
        &self.buf[start..start + self.w as usize]
    }

    /// Returns the area written since the last call and resets it.
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        self.dirty.take().map(|(x0, y0, x1, y1)| {
            Rectangle::new(
                Point::new(x0 as i32, y0 as i32),
                Size::new((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32),
            )
        })
    }

    fn mark(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        self.dirty = Some(match self.dirty {
            None => (x0, y0, x1, y1),
            Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
        });
    }

    fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size())
    }
}

impl OriginDimensions for FrameBuffer<'_> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for FrameBuffer<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        let mut any = false;
        let (mut minx, mut miny, mut maxx, mut maxy) = (self.w, self.h, 0u16, 0u16);

        for Pixel(p, c) in pixels {
            if p.x < 0 || p.y < 0 {
                continue;
            }
            let (x, y) = (p.x as u16, p.y as u16);
            if p.x >= self.w as i32 || p.y >= self.h as i32 {
                continue;
            }
            self.buf[y as usize * self.w as usize + x as usize] = c.into_storage();
            any = true;
            minx = minx.min(x);
            miny = miny.min(y);
            maxx = maxx.max(x);
            maxy = maxy.max(y);
        }

        if any {
            self.mark(minx, miny, maxx, maxy);
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        let inter = area.intersection(&self.bounds());
        if inter.size.width == 0 || inter.size.height == 0 {
            return Ok(());
        }

        let area_w = area.size.width as usize;
        let take = inter.size.width as usize;
        let left_skip = (inter.top_left.x - area.top_left.x) as usize;
        let right_skip = area_w - left_skip - take;
        let top_skip = (inter.top_left.y - area.top_left.y) as usize;

        let fbw = self.w as usize;
        let x0 = inter.top_left.x as usize;
        let y0 = inter.top_left.y as usize;
        let mut it = colors.into_iter();

        // rows above the visible part
        for _ in 0..top_skip * area_w {
            if it.next().is_none() {
                return Ok(());
            }
        }

        'rows: for ry in 0..inter.size.height as usize {
            for _ in 0..left_skip {
                it.next();
            }
            let dst = (y0 + ry) * fbw + x0;
            for px in &mut self.buf[dst..dst + take] {
                match it.next() {
                    Some(c) => *px = c.into_storage(),
                    None => break 'rows,
                }
            }
            for _ in 0..right_skip {
                it.next();
            }
        }

        let x1 = x0 + take - 1;
        let y1 = y0 + inter.size.height as usize - 1;
        self.mark(x0 as u16, y0 as u16, x1 as u16, y1 as u16);
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        let inter = area.intersection(&self.bounds());
        if inter.size.width == 0 || inter.size.height == 0 {
            return Ok(());
        }
        let raw = color.into_storage();
        let fbw = self.w as usize;
        let x0 = inter.top_left.x as usize;
        let y0 = inter.top_left.y as usize;
        let take = inter.size.width as usize;
        for y in y0..y0 + inter.size.height as usize {
            self.buf[y * fbw + x0..y * fbw + x0 + take].fill(raw);
        }
        self.mark(
            x0 as u16,
            y0 as u16,
            (x0 + take - 1) as u16,
            (y0 + inter.size.height as usize - 1) as u16,
        );
        Ok(())
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let n = self.w as usize * self.h as usize;
        self.buf[..n].fill(color.into_storage());
        if n > 0 {
            self.mark(0, 0, self.w - 1, self.h - 1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::RgbColor;

    #[test]
    fn rejects_short_buffer() {
        let mut buf = [0u16; 10];
        assert_eq!(
            FrameBuffer::new(&mut buf, 4, 4).err(),
            Some(FrameBufferError::TooSmall { needed: 16, got: 10 })
        );
    }

    #[test]
    fn draw_iter_clips_and_tracks_dirty() {
        let mut buf = [0u16; 16];
        let mut fb = FrameBuffer::new(&mut buf, 4, 4).unwrap();
        fb.draw_iter([
            Pixel(Point::new(1, 1), Rgb565::WHITE),
            Pixel(Point::new(2, 3), Rgb565::RED),
            Pixel(Point::new(-1, 0), Rgb565::RED),
            Pixel(Point::new(4, 0), Rgb565::RED),
        ])
        .unwrap();
        assert_eq!(fb.pixel(1, 1), Some(Rgb565::WHITE));
        assert_eq!(fb.pixel(2, 3), Some(Rgb565::RED));
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(
            fb.take_dirty(),
            Some(Rectangle::new(Point::new(1, 1), Size::new(2, 3)))
        );
        assert_eq!(fb.take_dirty(), None);
    }

    #[test]
    fn fill_contiguous_skips_offscreen_part() {
        let mut buf = [0u16; 16];
        let mut fb = FrameBuffer::new(&mut buf, 4, 4).unwrap();
        // 3x3 area hanging off the top left corner; only its bottom-right 2x2 lands
        let area = Rectangle::new(Point::new(-1, -1), Size::new(3, 3));
        let colors = (0..9u16).map(|i| Rgb565::from(RawU16::new(i + 1)));
        fb.fill_contiguous(&area, colors).unwrap();
        assert_eq!(fb.row(0), &[5, 6, 0, 0]);
        assert_eq!(fb.row(1), &[8, 9, 0, 0]);
        assert_eq!(fb.row(2), &[0, 0, 0, 0]);
    }

    #[test]
    fn fill_solid_and_clear() {
        let mut buf = [0u16; 16];
        let mut fb = FrameBuffer::new(&mut buf, 4, 4).unwrap();
        fb.fill_solid(&Rectangle::new(Point::new(2, 2), Size::new(10, 10)), Rgb565::WHITE)
            .unwrap();
        let white = Rgb565::WHITE.into_storage();
        assert_eq!(fb.row(3), &[0, 0, white, white]);
        assert_eq!(
            fb.take_dirty(),
            Some(Rectangle::new(Point::new(2, 2), Size::new(2, 2)))
        );

        fb.clear(Rgb565::BLACK).unwrap();
        assert!(fb.as_raw().iter().all(|p| *p == 0));
        assert_eq!(
            fb.take_dirty(),
            Some(Rectangle::new(Point::zero(), Size::new(4, 4)))
        );
    }
}
