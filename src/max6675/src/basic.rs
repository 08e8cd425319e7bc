//! A minimal "initialize, read, close" layer for applications that only
//! want temperatures.
use crate::{
    driver::Max6675,
    error::{DeinitError, InitError, ReadError},
    interface::Interface,
    register::Reading,
};

/// An initialized [`Max6675`] handle.
///
/// Unlike [`Max6675`], a `Basic` can only exist in the initialized state, so
/// its methods never report `NotInitialized` in practice.
#[derive(Debug)]
pub struct Basic<I> {
    inner: Max6675<I>,
}

impl<I: Interface> Basic<I> {
    /// Construct a handle and initialize it.
    pub fn init(interface: I) -> Result<Self, InitError> {
        let mut inner = Max6675::new(interface);
        if let Err(e) = inner.init() {
            log::error!(target: "max6675", "init failed");
            return Err(e);
        }
        Ok(Self { inner })
    }

    /// Read the temperature.
    #[inline]
    pub fn read(&mut self) -> Result<Reading, ReadError> {
        self.inner.read()
    }

    /// Block for `ms` milliseconds.
    #[inline]
    pub fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms)
    }

    /// Close the handle and get the interface back.
    ///
    /// On failure, `self` is returned alongside the error so the caller can
    /// retry.
    pub fn deinit(mut self) -> Result<I, (Self, DeinitError)> {
        match self.inner.deinit() {
            Ok(()) => Ok(self.inner.release()),
            Err(e) => Err((self, e)),
        }
    }

    /// Get a reference to the underlying handle.
    #[inline]
    pub fn handle(&self) -> &Max6675<I> {
        &self.inner
    }
}
