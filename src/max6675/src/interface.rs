//! Bus interface
use core::fmt;
use embedded_hal::{
    blocking::{delay::DelayMs, spi::Transfer},
    digital::v2::OutputPin,
};

/// The bus operations a [`Max6675`] handle needs.
///
/// The chip only ever talks in one direction, so the whole protocol boils
/// down to "select, clock in N bytes, deselect".
///
/// [`Max6675`]: crate::Max6675
pub trait Interface {
    /// The error type of the bus operations.
    type Error: fmt::Debug;

    /// Bring up the bus.
    fn spi_init(&mut self) -> Result<(), Self::Error>;

    /// Shut down the bus.
    fn spi_deinit(&mut self) -> Result<(), Self::Error>;

    /// Select the chip and fill `buf` with the bytes it clocks out.
    fn spi_read_cmd(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    #[inline]
    fn spi_init(&mut self) -> Result<(), Self::Error> {
        (**self).spi_init()
    }

    #[inline]
    fn spi_deinit(&mut self) -> Result<(), Self::Error> {
        (**self).spi_deinit()
    }

    #[inline]
    fn spi_read_cmd(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).spi_read_cmd(buf)
    }

    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Error type of [`SpiInterface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiInterfaceError<S, P> {
    /// The SPI transfer failed.
    Spi(S),
    /// Driving the chip-select pin failed.
    Pin(P),
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Display for SpiInterfaceError<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI transfer failed: {:?}", e),
            Self::Pin(e) => write!(f, "chip-select pin error: {:?}", e),
        }
    }
}

/// The adapter that implements [`Interface`] on top of the
/// [`embedded_hal`] blocking SPI, output pin, and delay traits.
///
/// The SPI bus must be configured for mode 0 (CPOL = 0, CPHA = 0) and a
/// clock of at most 4.3 MHz. Chip select is driven by this adapter,
/// not by the SPI peripheral.
pub struct SpiInterface<SPI, CS, D> {
    spi: SPI,
    cs: CS,
    delay: D,
}

impl<SPI, CS, D> SpiInterface<SPI, CS, D> {
    /// Construct a `SpiInterface`.
    pub fn new(spi: SPI, cs: CS, delay: D) -> Self {
        Self { spi, cs, delay }
    }

    /// Destroy `self` and get the parts back.
    pub fn release(self) -> (SPI, CS, D) {
        (self.spi, self.cs, self.delay)
    }
}

impl<SPI, CS, D> Interface for SpiInterface<SPI, CS, D>
where
    SPI: Transfer<u8>,
    SPI::Error: fmt::Debug,
    CS: OutputPin,
    CS::Error: fmt::Debug,
    D: DelayMs<u32>,
{
    type Error = SpiInterfaceError<SPI::Error, CS::Error>;

    fn spi_init(&mut self) -> Result<(), Self::Error> {
        // Deselecting the chip starts a conversion
        self.cs.set_high().map_err(SpiInterfaceError::Pin)
    }

    fn spi_deinit(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(SpiInterfaceError::Pin)
    }

    fn spi_read_cmd(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        buf.fill(0);
        self.cs.set_low().map_err(SpiInterfaceError::Pin)?;
        let result = self.spi.transfer(buf).map(|_| ());
        // CS must be released even if the transfer failed
        let release = self.cs.set_high();
        result.map_err(SpiInterfaceError::Spi)?;
        release.map_err(SpiInterfaceError::Pin)
    }

    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms)
    }
}
