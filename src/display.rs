//! GC9A01 (240x240 round) panel setup and frame upload.
//
// The face is painted into a `FrameBuffer` first and then pushed to the
// panel with one `fill_contiguous` call per dirty area.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Dimensions,
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::Point,
    primitives::Rectangle,
};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    gpio::Output,
    spi::master::{Config as SpiConfig, ConfigError, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::GC9A01,
    options::{ColorInversion, ColorOrder, Orientation, Rotation},
    Builder as DisplayBuilder,
};

use crate::framebuf::FrameBuffer;
use crate::polar::frame_margins;
use crate::wiring::DisplayPins;

pub const PANEL_SIZE: u16 = 240;

pub type DisplayType<'a> = mipidsi::Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    GC9A01,
    Output<'a>,
>;

#[derive(Debug)]
pub enum DisplayError {
    Spi(ConfigError),
    Init,
}

// A tiny busy-wait delay that satisfies embedded-hal 1.0 DelayNs.
struct SpinDelay;

impl embedded_hal::delay::DelayNs for SpinDelay {
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        let mut n = ns / 50 + 1;
        while n != 0 {
            core::hint::spin_loop();
            n -= 1;
        }
    }
}

pub fn setup_display<'a>(
    display_pins: DisplayPins<'a>,
    display_buf: &'a mut [u8],
) -> Result<DisplayType<'a>, DisplayError> {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        mut lcd_rst,
        mut lcd_bl,
    } = display_pins;

    // hardware reset, backlight on
    lcd_rst.set_low();
    for _ in 0..10000 {
        core::hint::spin_loop();
    }
    lcd_rst.set_high();
    lcd_bl.set_high();

    // SPI @ 40 MHz, Mode 0
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_hz(40_000_000))
        .with_mode(Mode::_0);
    let spi = Spi::new(spi2, spi_cfg)
        .map_err(DisplayError::Spi)?
        .with_sck(spi_sck)
        .with_mosi(spi_mosi);

    let spi_dev = match ExclusiveDevice::new(spi, lcd_cs, NoDelay) {
        Ok(dev) => dev,
        Err(never) => match never {},
    };
    let di = SpiInterface::new(spi_dev, lcd_dc, display_buf);

    DisplayBuilder::new(GC9A01, di)
        .display_size(PANEL_SIZE, PANEL_SIZE)
        .display_offset(0, 0)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut SpinDelay)
        .map_err(|_| DisplayError::Init)
}

/// Copies `area` of `fb` to the panel with the frame buffer's origin at
/// `offset`.
pub fn flush_area<D>(display: &mut D, fb: &FrameBuffer<'_>, area: Rectangle, offset: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let x0 = area.top_left.x.max(0) as u16;
    let y0 = area.top_left.y.max(0) as u16;
    let w = area.size.width as usize;
    let rows = y0..y0.saturating_add(area.size.height as u16).min(fb.height());
    let colors = rows.flat_map(move |y| {
        fb.row(y)[x0 as usize..x0 as usize + w]
            .iter()
            .map(|p| Rgb565::from(RawU16::new(*p)))
    });
    let target = Rectangle::new(area.top_left + offset, area.size);
    display.fill_contiguous(&target, colors)
}

/// Fills the panel outside `face_area` with `color`. The frame buffer only
/// covers the face, so this has to run at boot and on every theme change.
pub fn paint_margin<D>(display: &mut D, face_area: Rectangle, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    for strip in frame_margins(&display.bounding_box(), &face_area) {
        if !strip.is_zero_sized() {
            display.fill_solid(&strip, color)?;
        }
    }
    Ok(())
}
