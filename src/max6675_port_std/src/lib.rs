//! Simulation environment for running the [`max6675`] driver on a hosted
//! environment.
//!
//! [`sim_interface`] creates a software MAX6675 and returns a
//! [`SpiInterface`] wired to it, plus a [`SimHandle`] for steering the
//! simulated thermocouple and injecting bus faults.
//!
//! Time is virtual. [`SimDelay`] advances the chip's clock rather than
//! sleeping, unless [`SimConfig::realtime`] is set.
#![deny(unsafe_op_in_unsafe_fn)]
use max6675::SpiInterface;
use spin::Mutex as SpinMutex;
use std::sync::Arc;

mod bus;
pub mod chip;

pub use self::{
    bus::{SimBusError, SimCs, SimDelay, SimPinError, SimSpi},
    chip::SimChip,
};

/// The [`SpiInterface`] type returned by [`sim_interface`].
pub type SimInterface = SpiInterface<SimSpi, SimCs, SimDelay>;

/// The initial state of a simulated device.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// The temperature at the thermocouple junction, measured in degrees
    /// Celsius.
    pub temperature: f32,
    /// Start with the thermocouple disconnected.
    pub open: bool,
    /// Make the first N SPI transfers fail.
    pub transfer_faults: u32,
    /// Start as if just powered up, with no conversion result available.
    pub cold_start: bool,
    /// Make [`SimDelay`] actually sleep in addition to advancing the virtual
    /// clock.
    pub realtime: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            open: false,
            transfer_faults: 0,
            cold_start: false,
            realtime: false,
        }
    }
}

/// Create a simulated device.
pub fn sim_interface(config: &SimConfig) -> (SimHandle, SimInterface) {
    let mut chip = SimChip::cold(config.temperature);
    chip.set_open(config.open);
    if !config.cold_start {
        chip.complete_conversion();
    }

    log::debug!("Creating a simulated MAX6675: {:?}", config);

    let shared = Arc::new(SpinMutex::new(bus::Shared {
        chip,
        transfer_faults: config.transfer_faults,
        cs_faults: 0,
        realtime: config.realtime,
    }));

    let iface = SpiInterface::new(
        SimSpi(Arc::clone(&shared)),
        SimCs(Arc::clone(&shared)),
        SimDelay(Arc::clone(&shared)),
    );

    (SimHandle(shared), iface)
}

/// Controls a device created by [`sim_interface`].
#[derive(Debug, Clone)]
pub struct SimHandle(Arc<SpinMutex<bus::Shared>>);

impl SimHandle {
    /// Set the temperature at the thermocouple junction.
    pub fn set_temperature(&self, celsius: f32) {
        self.0.lock().chip.set_probe_temperature(celsius);
    }

    /// Disconnect (`true`) or reconnect (`false`) the thermocouple.
    pub fn set_open(&self, open: bool) {
        self.0.lock().chip.set_open(open);
    }

    /// Make the next `count` SPI transfers fail.
    pub fn inject_transfer_faults(&self, count: u32) {
        self.0.lock().transfer_faults = count;
    }

    /// Make the next `count` chip-select writes fail.
    pub fn inject_cs_faults(&self, count: u32) {
        self.0.lock().cs_faults = count;
    }

    /// Get the current virtual time, measured in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.0.lock().chip.now_ms()
    }

    /// Get whether CS is currently held low.
    pub fn is_selected(&self) -> bool {
        self.0.lock().chip.is_selected()
    }

    /// Get a snapshot of the chip's state.
    pub fn chip(&self) -> SimChip {
        self.0.lock().chip.clone()
    }
}
