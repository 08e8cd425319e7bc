//! The simulated chip
use max6675::register::{CONVERSION_TIME_MS, TEMPERATURE_LSB_CELSIUS, TEMPERATURE_RAW_MAX};

const FRAME_BITS: u32 = 16;
const BIT_OPEN: u16 = 1 << 2;

/// A software model of a MAX6675 and the thermocouple attached to it.
///
/// Time is virtual: it only advances through [`Self::advance`].
#[derive(Debug, Clone)]
pub struct SimChip {
    probe_celsius: f32,
    open: bool,
    now_ms: u64,
    /// `true` while CS is held low.
    selected: bool,
    /// The time the current conversion started. `None` while selected.
    conversion_started_ms: Option<u64>,
    /// The most recent completed conversion.
    latest: Option<u16>,
    /// The frame being clocked out and the number of bits already sent.
    shift: u16,
    shift_pos: u32,
    num_conversions: u64,
}

impl SimChip {
    /// Construct a chip that has been running long enough to have a
    /// conversion result for `probe_celsius` ready.
    pub fn new(probe_celsius: f32) -> Self {
        let mut this = Self::cold(probe_celsius);
        this.complete_conversion();
        this
    }

    /// Construct a chip that has just been powered up. Until the first
    /// conversion completes, the latched frame reads as zero.
    pub fn cold(probe_celsius: f32) -> Self {
        Self {
            probe_celsius,
            open: false,
            now_ms: 0,
            selected: false,
            conversion_started_ms: Some(0),
            latest: None,
            shift: 0,
            shift_pos: FRAME_BITS,
            num_conversions: 0,
        }
    }

    /// Set the temperature at the thermocouple junction. It shows up in the
    /// output after the next completed conversion.
    pub fn set_probe_temperature(&mut self, celsius: f32) {
        self.probe_celsius = celsius;
    }

    /// Get the temperature at the thermocouple junction.
    pub fn probe_temperature(&self) -> f32 {
        self.probe_celsius
    }

    /// Disconnect (`true`) or reconnect (`false`) the thermocouple.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Get the current virtual time, measured in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Get whether CS is currently held low.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Get the number of completed conversions.
    pub fn num_conversions(&self) -> u64 {
        self.num_conversions
    }

    /// Complete a conversion immediately, as if the chip had been left
    /// converting long enough.
    pub fn complete_conversion(&mut self) {
        self.latest = Some(self.convert());
        self.num_conversions += 1;
    }

    /// Advance the virtual clock.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
        self.settle();
    }

    /// Handle a CS falling edge: stop converting and latch the latest result.
    pub fn select(&mut self) {
        if self.selected {
            return;
        }
        self.settle();
        self.selected = true;
        self.conversion_started_ms = None;
        self.shift = self.latest.unwrap_or(0);
        self.shift_pos = 0;
        log::trace!("CS low at {}ms, latched {:#06x}", self.now_ms, self.shift);
    }

    /// Handle a CS rising edge: start a new conversion.
    pub fn deselect(&mut self) {
        if !self.selected {
            return;
        }
        self.selected = false;
        self.conversion_started_ms = Some(self.now_ms);
        log::trace!("CS high at {}ms, conversion started", self.now_ms);
    }

    /// Clock out one byte on SO. Returns `None` if the chip isn't selected.
    /// Bits past the end of the frame read as zero.
    pub fn clock_out_byte(&mut self) -> Option<u8> {
        if !self.selected {
            return None;
        }
        let byte = if self.shift_pos < FRAME_BITS {
            (self.shift << self.shift_pos >> 8) as u8
        } else {
            0
        };
        self.shift_pos = (self.shift_pos + 8).min(FRAME_BITS);
        Some(byte)
    }

    /// Complete the in-progress conversion if enough time has elapsed. The
    /// chip converts continuously while deselected.
    fn settle(&mut self) {
        let Some(started) = self.conversion_started_ms else {
            return;
        };
        let elapsed = self.now_ms - started;
        let period = u64::from(CONVERSION_TIME_MS);
        if elapsed >= period {
            self.latest = Some(self.convert());
            self.num_conversions += elapsed / period;
            self.conversion_started_ms = Some(self.now_ms - elapsed % period);
        }
    }

    /// Produce the frame the chip would output for the current probe state.
    fn convert(&self) -> u16 {
        if self.open {
            return BIT_OPEN;
        }
        encode_temperature(self.probe_celsius) << 3
    }
}

/// Quantize a temperature to a 12-bit code, truncating toward zero and
/// clamping to the measurable range.
pub fn encode_temperature(celsius: f32) -> u16 {
    let code = (celsius / TEMPERATURE_LSB_CELSIUS).floor();
    if code.is_nan() || code <= 0.0 {
        0
    } else if code >= TEMPERATURE_RAW_MAX as f32 {
        TEMPERATURE_RAW_MAX
    } else {
        code as u16
    }
}
