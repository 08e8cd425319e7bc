//! The device handle
use crate::{
    error::{DeinitError, GetRegError, InitError, ReadError},
    interface::Interface,
    register::{Reading, Register},
};

#[cfg(test)]
mod tests;

/// A MAX6675 device attached through an [`Interface`].
///
/// A freshly constructed handle is not initialized; every operation other
/// than [`Self::init`] fails with `NotInitialized` until it is.
#[derive(Debug)]
pub struct Max6675<I> {
    interface: I,
    inited: bool,
}

impl<I: Interface> Max6675<I> {
    /// Construct a `Max6675` handle. This doesn't touch the bus.
    pub const fn new(interface: I) -> Self {
        Self {
            interface,
            inited: false,
        }
    }

    /// Get whether the handle has been initialized.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.inited
    }

    /// Initialize the bus and check that the chip answers.
    ///
    /// One frame is read and discarded. Calling this method on an already
    /// initialized handle runs the sequence again.
    pub fn init(&mut self) -> Result<(), InitError> {
        if let Err(e) = self.interface.spi_init() {
            log::error!(target: "max6675", "spi init failed: {:?}", e);
            return Err(InitError::BusFailure);
        }

        if let Err(e) = self.read_frame() {
            log::error!(target: "max6675", "read data failed: {:?}", e);
            return Err(InitError::BusFailure);
        }

        self.inited = true;
        log::debug!(target: "max6675", "initialized");
        Ok(())
    }

    /// Shut down the bus.
    ///
    /// If the interface fails to shut down, the handle remains initialized.
    pub fn deinit(&mut self) -> Result<(), DeinitError> {
        if !self.inited {
            return Err(DeinitError::NotInitialized);
        }

        if let Err(e) = self.interface.spi_deinit() {
            log::error!(target: "max6675", "spi deinit failed: {:?}", e);
            return Err(DeinitError::BusFailure);
        }

        self.inited = false;
        log::debug!(target: "max6675", "deinitialized");
        Ok(())
    }

    /// Read the temperature.
    pub fn read(&mut self) -> Result<Reading, ReadError> {
        let reg = self.get_reg().map_err(ReadError::from)?;

        reg.reading().ok_or_else(|| {
            log::error!(target: "max6675", "thermocouple input is open");
            ReadError::OpenThermocouple
        })
    }

    /// Read the conversion register without decoding it.
    pub fn get_reg(&mut self) -> Result<Register, GetRegError> {
        if !self.inited {
            return Err(GetRegError::NotInitialized);
        }

        self.read_frame().map_err(|e| {
            log::error!(target: "max6675", "read data failed: {:?}", e);
            GetRegError::BusFailure
        })
    }

    /// Block for `ms` milliseconds using the interface's delay.
    #[inline]
    pub fn delay_ms(&mut self, ms: u32) {
        self.interface.delay_ms(ms)
    }

    /// Get a reference to the interface.
    #[inline]
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Get a mutable reference to the interface.
    #[inline]
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Destroy `self` and get the interface back, regardless of whether the
    /// handle is initialized.
    #[inline]
    pub fn release(self) -> I {
        self.interface
    }

    fn read_frame(&mut self) -> Result<Register, I::Error> {
        let mut buf = [0u8; 2];
        self.interface.spi_read_cmd(&mut buf)?;
        let reg = Register::from_be_bytes(buf);
        log::trace!(target: "max6675", "frame = {:?}", reg);
        Ok(reg)
    }
}
