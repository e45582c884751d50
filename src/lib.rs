#![cfg_attr(not(test), no_std)]

pub mod battery;
pub mod clock;
pub mod config;
pub mod dial;
pub mod framebuf;
pub mod gfx;
pub mod hand;
pub mod input;
pub mod polar;
pub mod renderer;
pub mod rtc_pcf85063;
pub mod storage;
pub mod theme;
pub mod trig;
pub mod viewport;

#[cfg(feature = "esp32s3")]
pub mod logging;
#[cfg(feature = "esp32s3")]
pub mod wiring;

#[cfg(feature = "devkit-esp32s3-disp128")]
pub mod display;
