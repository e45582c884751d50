// Board pin mapping for the ESP32-S3 devkit with the 1.28" GC9A01 round panel.
//! The following wiring is assumed:
//! - SELECT button => GPIO15 (toggles the theme)
//! - BACK button   => GPIO21
//! - LCD SCK/MOSI  => GPIO10 / GPIO11 (SPI2)
//! - LCD CS/DC     => GPIO9 / GPIO8
//! - LCD RST/BL    => GPIO14 / GPIO2
//! - RTC (PCF85063) SDA/SCL => GPIO4 / GPIO5 (I2C0)
//! - GND => GND
//! - 3.3V => 3.3V
//! Buttons connect to GND when pressed (internal pull-ups are enabled).

use esp_hal::gpio::{Event, Input, InputConfig, Io, Level, Output, OutputConfig, Pull};
use esp_hal::peripherals::{Peripherals, GPIO10, GPIO11, GPIO4, GPIO5, I2C0, SPI2};

pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,
    pub lcd_dc: Output<'a>,
    pub lcd_rst: Output<'a>,
    pub lcd_bl: Output<'a>,
}

pub struct RtcPins<'a> {
    pub i2c0: I2C0<'a>,
    pub sda: GPIO4<'a>,
    pub scl: GPIO5<'a>,
}

pub struct BoardPins<'a> {
    pub btn_select: Input<'a>,
    pub btn_back: Input<'a>,
    pub display_pins: DisplayPins<'a>,
    pub rtc_pins: RtcPins<'a>,
}

pub fn init_board_pins<'a>(p: Peripherals) -> (Io<'a>, BoardPins<'a>) {
    let io = Io::new(p.IO_MUX);

    let mut btn_select = Input::new(p.GPIO15, InputConfig::default().with_pull(Pull::Up));
    let mut btn_back = Input::new(p.GPIO21, InputConfig::default().with_pull(Pull::Up));
    btn_select.listen(Event::AnyEdge);
    btn_back.listen(Event::AnyEdge);

    // LCD control pins; GPIO10/11 stay raw for the SPI driver
    let lcd_cs = Output::new(p.GPIO9, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(p.GPIO8, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(p.GPIO14, Level::High, OutputConfig::default());
    let lcd_bl = Output::new(p.GPIO2, Level::High, OutputConfig::default());

    (
        io,
        BoardPins {
            btn_select,
            btn_back,
            display_pins: DisplayPins {
                spi2: p.SPI2,
                spi_sck: p.GPIO10,
                spi_mosi: p.GPIO11,
                lcd_cs,
                lcd_dc,
                lcd_rst,
                lcd_bl,
            },
            rtc_pins: RtcPins {
                i2c0: p.I2C0,
                sda: p.GPIO4,
                scl: p.GPIO5,
            },
        },
    )
}
