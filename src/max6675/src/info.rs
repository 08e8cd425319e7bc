//! Chip and driver information
use core::fmt;

/// Static characteristics of the chip and this driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Info {
    /// The chip name.
    pub chip_name: &'static str,
    /// The manufacturer name.
    pub manufacturer_name: &'static str,
    /// The name of the chip's interface.
    pub interface: &'static str,
    /// The minimum supply voltage, measured in volts.
    pub supply_voltage_min_v: f32,
    /// The maximum supply voltage, measured in volts.
    pub supply_voltage_max_v: f32,
    /// The maximum supply current, measured in milliamperes.
    pub max_current_ma: f32,
    /// The minimum operating temperature, measured in degrees Celsius.
    pub temperature_min: f32,
    /// The maximum operating temperature, measured in degrees Celsius.
    pub temperature_max: f32,
    /// The driver version, encoded as `major * 1000 + minor * 100`.
    pub driver_version: u32,
}

/// The information returned by [`info`].
pub const INFO: Info = Info {
    chip_name: "Maxim Integrated MAX6675",
    manufacturer_name: "Maxim Integrated",
    interface: "SPI",
    supply_voltage_min_v: 3.0,
    supply_voltage_max_v: 5.5,
    max_current_ma: 1.5,
    temperature_min: -20.0,
    temperature_max: 85.0,
    driver_version: 1000,
};

/// Get the chip's information.
#[inline]
pub const fn info() -> Info {
    INFO
}

impl Info {
    /// The major part of [`Self::driver_version`].
    #[inline]
    pub const fn driver_version_major(&self) -> u32 {
        self.driver_version / 1000
    }

    /// The minor part of [`Self::driver_version`].
    #[inline]
    pub const fn driver_version_minor(&self) -> u32 {
        (self.driver_version % 1000) / 100
    }

    /// Get a [`fmt::Display`]-able object that renders the driver version as
    /// `major.minor`.
    pub fn driver_version_display(&self) -> impl fmt::Display {
        DriverVersion(self.driver_version_major(), self.driver_version_minor())
    }
}

struct DriverVersion(u32, u32);

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}
