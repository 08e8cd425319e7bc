//! [`embedded_hal`] implementations backed by a shared [`SimChip`]
use embedded_hal::{
    blocking::{delay::DelayMs, spi::Transfer},
    digital::v2::OutputPin,
};
use spin::Mutex as SpinMutex;
use std::{sync::Arc, time::Duration};

use crate::chip::SimChip;

/// The state shared by all bus objects of one simulated device.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) chip: SimChip,
    pub(crate) transfer_faults: u32,
    pub(crate) cs_faults: u32,
    pub(crate) realtime: bool,
}

pub(crate) type SharedRef = Arc<SpinMutex<Shared>>;

/// Error type of [`SimSpi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimBusError {
    #[error("The transfer was attempted while CS was high.")]
    NotSelected,
    #[error("Injected transfer fault.")]
    Injected,
}

/// Error type of [`SimCs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimPinError {
    #[error("Injected chip-select fault.")]
    Injected,
}

/// The simulated SPI bus. Only the MISO direction carries data.
#[derive(Debug)]
pub struct SimSpi(pub(crate) SharedRef);

impl Transfer<u8> for SimSpi {
    type Error = SimBusError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        let mut shared = self.0.lock();
        if shared.transfer_faults > 0 {
            shared.transfer_faults -= 1;
            log::debug!("Injecting a transfer fault");
            return Err(SimBusError::Injected);
        }

        for word in words.iter_mut() {
            *word = shared
                .chip
                .clock_out_byte()
                .ok_or(SimBusError::NotSelected)?;
        }

        Ok(words)
    }
}

/// The simulated chip-select pin.
#[derive(Debug)]
pub struct SimCs(pub(crate) SharedRef);

impl SimCs {
    fn take_fault(shared: &mut Shared) -> Result<(), SimPinError> {
        if shared.cs_faults > 0 {
            shared.cs_faults -= 1;
            log::debug!("Injecting a chip-select fault");
            Err(SimPinError::Injected)
        } else {
            Ok(())
        }
    }
}

impl OutputPin for SimCs {
    type Error = SimPinError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut shared = self.0.lock();
        Self::take_fault(&mut shared)?;
        shared.chip.select();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut shared = self.0.lock();
        Self::take_fault(&mut shared)?;
        shared.chip.deselect();
        Ok(())
    }
}

/// The delay provider. Advances the simulated chip's virtual clock, and
/// sleeps only if the device was created with [`SimConfig::realtime`].
///
/// [`SimConfig::realtime`]: crate::SimConfig::realtime
#[derive(Debug)]
pub struct SimDelay(pub(crate) SharedRef);

impl DelayMs<u32> for SimDelay {
    fn delay_ms(&mut self, ms: u32) {
        let realtime = {
            let mut shared = self.0.lock();
            shared.chip.advance(u64::from(ms));
            shared.realtime
        };
        if realtime {
            std::thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }
}
