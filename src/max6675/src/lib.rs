//! Driver for the [MAX6675] cold-junction-compensated K-type
//! thermocouple-to-digital converter.
//!
//! The chip is read-only: pulling CS low freezes the latest conversion
//! result into a 16-bit shift register, which is then clocked out on SO.
//! Releasing CS starts the next conversion, which takes up to
//! [`CONVERSION_TIME_MS`].
//!
//! # Usage
//!
//! Wrap an SPI bus, a chip-select pin, and a delay provider implementing the
//! [`embedded_hal`] 0.2 blocking traits in a [`SpiInterface`], or implement
//! [`Interface`] directly for anything else that can clock in two bytes.
//!
//! ```ignore
//! let iface = max6675::SpiInterface::new(spi, cs, delay);
//! let mut dev = max6675::Max6675::new(iface);
//! dev.init()?;
//! let reading = dev.read()?;
//! log::info!("{:.2}C", reading.temperature);
//! dev.deinit()?;
//! ```
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade with the target `max6675`.
//!
//! [MAX6675]: https://www.analog.com/en/products/max6675.html
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)] // Link `std` only when building a test (`cfg(test)`)

#[cfg(doc)]
#[doc = include_str!("../CHANGELOG.md")]
pub mod _changelog_ {}

pub mod basic;
mod driver;
mod error;
pub mod info;
pub mod interface;
pub mod register;

pub use self::{
    basic::Basic,
    driver::Max6675,
    error::{DeinitError, GetRegError, InitError, ReadError, ResultCode},
    info::{info, Info},
    interface::{Interface, SpiInterface, SpiInterfaceError},
    register::{Reading, Register, CONVERSION_TIME_MS},
};
