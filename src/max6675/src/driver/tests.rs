//! Test cases for `crate::driver`
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use std::{collections::VecDeque, vec::Vec};

use super::*;
use crate::register::TEMPERATURE_RAW_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Init,
    Deinit,
    Read,
    Delay(u32),
}

/// An [`Interface`] that replays a script of frames.
#[derive(Default)]
struct ScriptedBus {
    frames: VecDeque<Result<u16, ()>>,
    fail_init: bool,
    fail_deinit: bool,
    calls: Vec<Call>,
}

impl ScriptedBus {
    fn with_frames(frames: impl IntoIterator<Item = u16>) -> Self {
        Self {
            frames: frames.into_iter().map(Ok).collect(),
            ..Self::default()
        }
    }
}

impl Interface for ScriptedBus {
    type Error = ();

    fn spi_init(&mut self) -> Result<(), ()> {
        self.calls.push(Call::Init);
        if self.fail_init {
            Err(())
        } else {
            Ok(())
        }
    }

    fn spi_deinit(&mut self) -> Result<(), ()> {
        self.calls.push(Call::Deinit);
        if self.fail_deinit {
            Err(())
        } else {
            Ok(())
        }
    }

    fn spi_read_cmd(&mut self, buf: &mut [u8]) -> Result<(), ()> {
        self.calls.push(Call::Read);
        assert_eq!(buf.len(), 2);
        let frame = self.frames.pop_front().expect("ran out of frames")?;
        buf.copy_from_slice(&frame.to_be_bytes());
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(Call::Delay(ms));
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn init_primes_one_frame() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus::with_frames([0x0000]));
    assert!(!dev.is_initialized());
    dev.init().unwrap();
    assert!(dev.is_initialized());
    assert_eq!(dev.interface().calls, [Call::Init, Call::Read]);
}

#[test]
fn init_bus_failure() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus {
        fail_init: true,
        ..ScriptedBus::default()
    });
    assert_eq!(dev.init(), Err(InitError::BusFailure));
    assert!(!dev.is_initialized());
    // No read is attempted once `spi_init` has failed
    assert_eq!(dev.interface().calls, [Call::Init]);
}

#[test]
fn init_priming_read_failure() {
    init_logger();
    let mut bus = ScriptedBus::default();
    bus.frames.push_back(Err(()));
    let mut dev = Max6675::new(bus);
    assert_eq!(dev.init(), Err(InitError::BusFailure));
    assert!(!dev.is_initialized());
}

#[test]
fn init_twice() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus::with_frames([0, 0]));
    dev.init().unwrap();
    dev.init().unwrap();
    assert_eq!(
        dev.interface().calls,
        [Call::Init, Call::Read, Call::Init, Call::Read]
    );
}

#[test]
fn operations_require_init() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus::default());
    assert_eq!(dev.read(), Err(ReadError::NotInitialized));
    assert_eq!(dev.get_reg(), Err(GetRegError::NotInitialized));
    assert_eq!(dev.deinit(), Err(DeinitError::NotInitialized));
    assert!(dev.interface().calls.is_empty());
}

#[test]
fn read_temperature() {
    init_logger();
    // 25.00 °C, then 100.25 °C
    let mut dev = Max6675::new(ScriptedBus::with_frames([0, 100 << 3, 401 << 3]));
    dev.init().unwrap();

    let reading = dev.read().unwrap();
    assert_eq!(reading.raw, 100);
    assert_eq!(reading.temperature, 25.0);

    let reading = dev.read().unwrap();
    assert_eq!(reading.raw, 401);
    assert_eq!(reading.temperature, 100.25);
}

#[test]
fn read_open_thermocouple() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus::with_frames([0, 0x0004, 100 << 3]));
    dev.init().unwrap();
    assert_eq!(dev.read(), Err(ReadError::OpenThermocouple));
    // The handle stays usable
    assert_eq!(dev.read().unwrap().raw, 100);
}

#[test]
fn read_bus_failure() {
    init_logger();
    let mut bus = ScriptedBus::with_frames([0]);
    bus.frames.push_back(Err(()));
    let mut dev = Max6675::new(bus);
    dev.init().unwrap();
    assert_eq!(dev.read(), Err(ReadError::BusFailure));
    assert!(dev.is_initialized());
}

#[test]
fn get_reg_returns_raw_frame() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus::with_frames([0, 0x0324]));
    dev.init().unwrap();
    let reg = dev.get_reg().unwrap();
    // `get_reg` doesn't interpret the open bit
    assert_eq!(reg.bits(), 0x0324);
    assert!(reg.is_thermocouple_open());
}

#[test]
fn deinit_then_read() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus::with_frames([0]));
    dev.init().unwrap();
    dev.deinit().unwrap();
    assert!(!dev.is_initialized());
    assert_eq!(dev.read(), Err(ReadError::NotInitialized));
    assert_eq!(dev.deinit(), Err(DeinitError::NotInitialized));
    assert_eq!(
        dev.release().calls,
        [Call::Init, Call::Read, Call::Deinit]
    );
}

#[test]
fn deinit_failure_keeps_handle_open() {
    init_logger();
    let mut dev = Max6675::new(ScriptedBus::with_frames([0, 100 << 3]));
    dev.init().unwrap();
    dev.interface_mut().fail_deinit = true;
    assert_eq!(dev.deinit(), Err(DeinitError::BusFailure));
    assert!(dev.is_initialized());
    assert_eq!(dev.read().unwrap().temperature, 25.0);

    dev.interface_mut().fail_deinit = false;
    dev.deinit().unwrap();
}

#[test]
fn delay_is_forwarded() {
    let mut dev = Max6675::new(ScriptedBus::default());
    dev.delay_ms(1000);
    assert_eq!(dev.interface().calls, [Call::Delay(1000)]);
}

#[test]
fn borrowed_interface() {
    init_logger();
    let mut bus = ScriptedBus::with_frames([0, 8 << 3]);
    {
        let mut dev = Max6675::new(&mut bus);
        dev.init().unwrap();
        assert_eq!(dev.read().unwrap().temperature, 2.0);
    }
    assert_eq!(bus.calls.len(), 3);
}

#[quickcheck]
fn qc_read_decodes_any_frame(frame: u16) -> TestResult {
    let mut dev = Max6675::new(ScriptedBus::with_frames([0, frame]));
    dev.init().unwrap();

    match dev.read() {
        Ok(reading) if frame & 0b100 == 0 => TestResult::from_bool(
            reading.raw <= TEMPERATURE_RAW_MAX
                && reading.raw == (frame >> 3) & 0x0fff
                && reading.temperature == reading.raw as f32 * 0.25,
        ),
        Err(ReadError::OpenThermocouple) if frame & 0b100 != 0 => TestResult::passed(),
        other => TestResult::error(std::format!("{:?} for frame {:#06x}", other, frame)),
    }
}
