// RTC driver for PCF85063A/PCF85063TP real-time clock chips.
// Datasheet: https://files.waveshare.com/wiki/common/Pcf85063atl1118-NdPQpTGE-loeW7GbZ7.pdf
//
// Besides the clock, the chip's single RAM byte (0x03) keeps the face
// settings across MCU resets for as long as the RTC stays powered.

use embedded_hal::i2c::I2c;

use crate::clock::{datetime_is_valid, DateTime, WallClock};
use crate::storage::PersistStore;
use crate::theme::THEME_KEY;

pub const PCF85063_ADDR: u8 = 0x51;

const REG_RAM_BYTE: u8 = 0x03;
const REG_SECONDS: u8 = 0x04;

// Clock integrity flag in the seconds register: set after a power loss.
const VL_BIT: u8 = 0x80;
// RAM byte layout: bit 7 marks the byte as written, bit 0 holds the flag.
const RAM_WRITTEN: u8 = 0x80;
const RAM_VALUE: u8 = 0x01;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RtcError<E> {
    Bus(E),
    /// Oscillator stopped at some point; the time cannot be trusted.
    Unreliable,
    /// Only one setting fits in the RAM byte.
    UnknownKey(u32),
}

pub struct Pcf85063<I2C> {
    i2c: I2C,
}

impl<I2C, E> Pcf85063<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    // Returns (dt, vl_flag); vl_flag == true means the time is unreliable.
    pub fn read_raw(&mut self) -> Result<(DateTime, bool), E> {
        let mut buf = [0u8; 7];
        // sec, min, hour, day, weekday, month, year
        self.i2c.write_read(PCF85063_ADDR, &[REG_SECONDS], &mut buf)?;
        let vl = (buf[0] & VL_BIT) != 0;
        let month_raw = buf[5];
        let year = if (month_raw & 0x80) != 0 {
            1900u16 + bcd_decode(buf[6]) as u16
        } else {
            2000u16 + bcd_decode(buf[6]) as u16
        };
        Ok((
            DateTime {
                year,
                month: bcd_decode(month_raw & 0x1F),
                day: bcd_decode(buf[3] & 0x3F),
                hour: bcd_decode(buf[2] & 0x3F),
                minute: bcd_decode(buf[1] & 0x7F),
                second: bcd_decode(buf[0] & 0x7F),
            },
            vl,
        ))
    }

    pub fn read_datetime(&mut self) -> Result<DateTime, RtcError<E>> {
        let (dt, vl) = self.read_raw().map_err(RtcError::Bus)?;
        if vl {
            return Err(RtcError::Unreliable);
        }
        Ok(dt)
    }

    /// Sets the time. Writing the seconds register also clears the VL flag.
    pub fn set_datetime(&mut self, dt: &DateTime) -> Result<(), E> {
        let data = [
            REG_SECONDS,
            bcd_encode(dt.second),
            bcd_encode(dt.minute),
            bcd_encode(dt.hour),
            bcd_encode(dt.day),
            0, // weekday not used
            bcd_encode(dt.month),
            bcd_encode((dt.year % 100) as u8),
        ];
        self.i2c.write(PCF85063_ADDR, &data)
    }

    fn read_ram(&mut self) -> Result<u8, E> {
        let mut b = [0u8];
        self.i2c.write_read(PCF85063_ADDR, &[REG_RAM_BYTE], &mut b)?;
        Ok(b[0])
    }

    fn write_ram(&mut self, v: u8) -> Result<(), E> {
        self.i2c.write(PCF85063_ADDR, &[REG_RAM_BYTE, v])
    }
}

impl<I2C, E> WallClock for Pcf85063<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    fn now(&mut self) -> Option<DateTime> {
        match self.read_datetime() {
            Ok(dt) if datetime_is_valid(&dt) => Some(dt),
            Ok(dt) => {
                log::warn!("rtc returned out of range time {:?}", dt);
                None
            }
            Err(e) => {
                log::warn!("rtc read failed: {:?}", e);
                None
            }
        }
    }
}

impl<I2C, E> PersistStore for Pcf85063<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    type Error = RtcError<E>;

    fn read_bool(&mut self, key: u32) -> Result<Option<bool>, Self::Error> {
        if key != THEME_KEY {
            return Err(RtcError::UnknownKey(key));
        }
        let v = self.read_ram().map_err(RtcError::Bus)?;
        Ok((v & RAM_WRITTEN != 0).then_some(v & RAM_VALUE != 0))
    }

    fn write_bool(&mut self, key: u32, value: bool) -> Result<(), Self::Error> {
        if key != THEME_KEY {
            return Err(RtcError::UnknownKey(key));
        }
        let v = RAM_WRITTEN | if value { RAM_VALUE } else { 0 };
        self.write_ram(v).map_err(RtcError::Bus)
    }
}

fn bcd_decode(v: u8) -> u8 {
    (v & 0x0F) + ((v >> 4) * 10)
}

fn bcd_encode(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}
