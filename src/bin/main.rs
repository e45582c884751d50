//! Chronology watchface firmware
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! cargo run --release --features devkit-esp32s3-disp128
//! ========================================
//!
//! Shows the hour on an oversized dial that orbits the round panel.
//! SELECT toggles the inverted theme, which is kept in the RTC's RAM byte.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

esp_bootloader_esp_idf::esp_app_desc!();

use chronology::{
    clock::{datetime_to_unix, WallClock},
    config::WatchConfig,
    display::{flush_area, paint_margin, setup_display, PANEL_SIZE},
    framebuf::FrameBuffer,
    gfx::Canvas,
    input::{handle_button_generic, Button, ButtonState},
    logging,
    renderer::{ClickSink, PaintSink, Renderer, TickSink},
    rtc_pcf85063::Pcf85063,
    theme::ColorRole,
    wiring::{init_board_pins, BoardPins},
};

use core::cell::RefCell;
use core::ptr::addr_of_mut;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{Point, Size},
    primitives::Rectangle,
};
use embedded_hal_bus::i2c::RefCellDevice;
use esp_backtrace as _;
use esp_hal::{
    delay::Delay,
    handler,
    i2c::master::{Config as I2cConfig, I2c},
    main, ram,
    time::Rate,
    timer::systimer::{SystemTimer, Unit},
    Config,
};

/// Side of the square the face is painted in, centered on the panel.
const FACE: u16 = 180;

// Current debounce time (milliseconds)
const DEBOUNCE_MS: u64 = 240;
const LOOP_MS: u32 = 20;

#[ram]
static mut DISPLAY_BUF: [u8; 1024] = [0; 1024];
static mut FRAME: [u16; FACE as usize * FACE as usize] = [0; FACE as usize * FACE as usize];

static SELECT_PRESSED: AtomicBool = AtomicBool::new(false);
static BACK_PRESSED: AtomicBool = AtomicBool::new(false);

static BUTTON_SELECT: ButtonState<'static> = ButtonState::new(Button::Select);
static BUTTON_BACK: ButtonState<'static> = ButtonState::new(Button::Back);

fn uptime_ms() -> u64 {
    let t = SystemTimer::unit_value(Unit::Unit0);
    t.saturating_mul(1000) / SystemTimer::ticks_per_second()
}

fn flag_press(button: Button) {
    match button {
        Button::Select => SELECT_PRESSED.store(true, Ordering::Release),
        Button::Back => BACK_PRESSED.store(true, Ordering::Release),
    }
}

// Interrupt handler: only records presses, the main loop acts on them
#[handler]
#[ram]
fn handler() {
    let now_ms = uptime_ms();
    handle_button_generic(&BUTTON_SELECT, now_ms, DEBOUNCE_MS, flag_press);
    handle_button_generic(&BUTTON_BACK, now_ms, DEBOUNCE_MS, flag_press);
}

#[main]
fn main() -> ! {
    let peripherals = esp_hal::init(Config::default());
    logging::init();

    let (mut io, pins) = init_board_pins(peripherals);
    let BoardPins {
        btn_select,
        btn_back,
        display_pins,
        rtc_pins,
    } = pins;

    critical_section::with(|cs| {
        BUTTON_SELECT.input.borrow_ref_mut(cs).replace(btn_select);
        BUTTON_BACK.input.borrow_ref_mut(cs).replace(btn_back);
    });
    io.set_interrupt_handler(handler);

    // Safe because DISPLAY_BUF is only used here
    let display_buf = unsafe { &mut *addr_of_mut!(DISPLAY_BUF) };
    let mut display = setup_display(display_pins, display_buf).expect("display init failed");

    // RTC on I2C0: one handle reads the time, the other keeps the theme
    let i2c = I2c::new(rtc_pins.i2c0, I2cConfig::default().with_frequency(Rate::from_khz(400)))
        .expect("i2c init failed")
        .with_sda(rtc_pins.sda)
        .with_scl(rtc_pins.scl);
    let bus = RefCell::new(i2c);
    let mut clock = Pcf85063::new(RefCellDevice::new(&bus));
    let store = Pcf85063::new(RefCellDevice::new(&bus));

    let config = WatchConfig::default();
    let unit = config.tick_unit();
    let face_rect = Rectangle::new(Point::zero(), Size::new(FACE as u32, FACE as u32));
    let mut face = Renderer::load(face_rect, config, store);

    // Safe because FRAME is only used here
    let frame = unsafe { &mut *addr_of_mut!(FRAME) };
    let mut fb = FrameBuffer::new(frame, FACE, FACE).expect("frame buffer too small");
    let offset = Point::new(((PANEL_SIZE - FACE) / 2) as i32, ((PANEL_SIZE - FACE) / 2) as i32);
    let panel_face = Rectangle::new(offset, face_rect.size);

    log::info!("chronology up, tick every {}s", unit.period_secs());

    let delay = Delay::new();
    let mut last_poll: Option<u64> = None;
    let mut last_stamp: Option<u32> = None;
    // background the panel margin was last painted with
    let mut margin_bg: Option<Rgb565> = None;

    loop {
        // poll the RTC once per second of uptime, tick on unit boundaries
        let up_s = uptime_ms() / 1000;
        if last_poll != Some(up_s) {
            last_poll = Some(up_s);
            let now = clock.now();
            let stamp = now.as_ref().map(datetime_to_unix).unwrap_or(up_s as u32);
            if last_stamp.map_or(true, |prev| unit.crossed(prev, stamp)) {
                last_stamp = Some(stamp);
                face.on_tick(now);
            }
        }

        if SELECT_PRESSED.swap(false, Ordering::AcqRel) {
            face.on_click(Button::Select);
        }
        if BACK_PRESSED.swap(false, Ordering::AcqRel) {
            face.on_click(Button::Back);
        }

        if face.needs_paint() {
            let bg: Rgb565 = face.theme().color(ColorRole::Background).into();
            if margin_bg != Some(bg) {
                paint_margin(&mut display, panel_face, bg).ok();
                margin_bg = Some(bg);
            }
            {
                let mut canvas = Canvas::new(&mut fb);
                face.paint(&mut canvas);
            }
            if let Some(area) = fb.take_dirty() {
                flush_area(&mut display, &fb, area, offset).ok();
            }
        }

        delay.delay_millis(LOOP_MS);
    }
}
