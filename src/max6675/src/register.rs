//! The conversion register
//!
//! The chip has exactly one readable register, a 16-bit frame clocked out
//! MSB first:
//!
//! | Bit    | Contents                                  |
//! | ------ | ----------------------------------------- |
//! | 15     | Dummy sign bit (always `0`)               |
//! | 14..=3 | 12-bit temperature code, 0.25 °C per LSB  |
//! | 2      | Thermocouple input open (`1` = open)      |
//! | 1      | Device ID (always `0`)                    |
//! | 0      | Three-state                               |
use core::fmt;

/// The temperature represented by one LSB of the temperature code, measured
/// in degrees Celsius.
pub const TEMPERATURE_LSB_CELSIUS: f32 = 0.25;

/// The largest temperature code.
pub const TEMPERATURE_RAW_MAX: u16 = 0x0fff;

/// The maximum conversion time, measured in milliseconds. A new conversion
/// starts when CS is released, and reading the register before it completes
/// yields the previous result.
pub const CONVERSION_TIME_MS: u32 = 220;

const TEMPERATURE_SHIFT: u32 = 3;
const BIT_DUMMY_SIGN: u16 = 1 << 15;
const BIT_OPEN: u16 = 1 << 2;
const BIT_DEVICE_ID: u16 = 1 << 1;

/// A raw conversion frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Register(u16);

impl Register {
    /// Construct a `Register` from a raw 16-bit frame.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Construct a `Register` from the two bytes received on the bus.
    #[inline]
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }

    /// Get the raw 16-bit frame.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Get the 12-bit temperature code.
    #[inline]
    pub const fn temperature_raw(self) -> u16 {
        (self.0 >> TEMPERATURE_SHIFT) & TEMPERATURE_RAW_MAX
    }

    /// Get whether the thermocouple input is open.
    #[inline]
    pub const fn is_thermocouple_open(self) -> bool {
        self.0 & BIT_OPEN != 0
    }

    /// Get the dummy sign bit. Always `false` on a working device.
    #[inline]
    pub const fn dummy_sign_bit(self) -> bool {
        self.0 & BIT_DUMMY_SIGN != 0
    }

    /// Get the device ID bit. Always `false` on a working device.
    #[inline]
    pub const fn device_id(self) -> bool {
        self.0 & BIT_DEVICE_ID != 0
    }

    /// Decode the frame into a [`Reading`]. Returns `None` if the
    /// thermocouple input is open.
    #[inline]
    pub fn reading(self) -> Option<Reading> {
        if self.is_thermocouple_open() {
            None
        } else {
            Some(Reading::from_raw(self.temperature_raw()))
        }
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Register")
            .field("bits", &format_args!("{:#06x}", self.0))
            .field("temperature_raw", &self.temperature_raw())
            .field("open", &self.is_thermocouple_open())
            .finish()
    }
}

impl From<u16> for Register {
    #[inline]
    fn from(x: u16) -> Self {
        Self(x)
    }
}

impl From<Register> for u16 {
    #[inline]
    fn from(x: Register) -> Self {
        x.0
    }
}

/// A decoded temperature measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// The 12-bit temperature code.
    pub raw: u16,
    /// The temperature, measured in degrees Celsius.
    pub temperature: f32,
}

impl Reading {
    /// Construct a `Reading` from a 12-bit temperature code.
    #[inline]
    pub fn from_raw(raw: u16) -> Self {
        Self {
            raw,
            temperature: raw_to_celsius(raw),
        }
    }
}

/// Convert a temperature code to degrees Celsius.
#[inline]
pub fn raw_to_celsius(raw: u16) -> f32 {
    raw as f32 * TEMPERATURE_LSB_CELSIUS
}
