use clap::{CommandFactory, Parser};
use std::{io::Write, path::PathBuf};
use thiserror::Error;

mod config;

fn main() {
    let opt = Opt::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(opt.log_level.filter_spec()),
    )
    .init();

    if let Err(e) = main_inner(opt) {
        log::error!("run failed.\n{:?}", e);
        std::process::exit(1);
    }
}

#[derive(Error, Debug)]
enum MainError {
    #[error("Could not load the board configuration.")]
    Config(#[source] config::ConfigError),
    #[error("The read test failed.")]
    ReadTest(#[source] read_test::RoutineError),
    #[error("The read example failed.")]
    ReadExample(#[source] read_test::RoutineError),
}

/// Command-line front end for the MAX6675 thermocouple driver
///
/// The chip is simulated; its behavior can be adjusted in the `[sim]`
/// section of the board configuration file.
#[derive(Parser)]
#[command(name = "max6675", version)]
#[command(group(
    clap::ArgGroup::new("action").args(["information", "port", "test", "example"])
))]
struct Opt {
    /// Show the chip information
    #[arg(short = 'i', long = "information")]
    information: bool,
    /// Display the pin connections of the current board
    #[arg(short = 'p', long = "port")]
    port: bool,
    /// Run the driver test
    #[arg(short = 't', long = "test", value_enum, value_name = "ROUTINE")]
    test: Option<Routine>,
    /// Run the driver example
    #[arg(short = 'e', long = "example", value_enum, value_name = "ROUTINE")]
    example: Option<Routine>,
    /// Set the running times
    #[arg(long = "times", value_name = "NUM", default_value_t = 3)]
    times: u32,
    /// Board configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log level
    #[arg(short = 'l', long = "log-level", value_enum, ignore_case = true,
        default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Routine {
    Read,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The default `env_logger` filter for this level. `RUST_LOG` takes
    /// precedence.
    fn filter_spec(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

fn main_inner(opt: Opt) -> anyhow::Result<()> {
    let config = config::Config::load(opt.config.as_deref()).map_err(MainError::Config)?;

    if opt.information {
        print_info();
    } else if opt.port {
        print_port(&config.board, &mut std::io::stdout().lock())?;
    } else if let Some(Routine::Read) = opt.test {
        let (_sim, iface) = max6675_port_std::sim_interface(&config.sim);
        read_test::read_test(iface, opt.times, config.timing.read_interval_ms)
            .map_err(MainError::ReadTest)?;
    } else if let Some(Routine::Read) = opt.example {
        let (_sim, iface) = max6675_port_std::sim_interface(&config.sim);
        let times = opt.times;
        read_test::read_example(iface, times, config.timing.read_interval_ms, |i, temp| {
            println!("{}/{} {:.2}C.", i, times, temp)
        })
        .map_err(MainError::ReadExample)?;
    } else {
        Opt::command().print_help()?;
    }

    Ok(())
}

fn print_port(board: &config::Board, out: &mut impl Write) -> std::io::Result<()> {
    let pins = &board.pins;
    writeln!(out, "max6675: board is {}.", board.name)?;
    writeln!(out, "max6675: SCK connected to {}.", pins.sck)?;
    writeln!(out, "max6675: MISO connected to {}.", pins.miso)?;
    writeln!(out, "max6675: CS connected to {}.", pins.cs)
}

fn print_info() {
    let info = max6675::info();
    println!("max6675: chip is {}.", info.chip_name);
    println!("max6675: manufacturer is {}.", info.manufacturer_name);
    println!("max6675: interface is {}.", info.interface);
    println!("max6675: driver version is {}.", info.driver_version_display());
    println!("max6675: min supply voltage is {:.1}V.", info.supply_voltage_min_v);
    println!("max6675: max supply voltage is {:.1}V.", info.supply_voltage_max_v);
    println!("max6675: max current is {:.2}mA.", info.max_current_ma);
    println!("max6675: max temperature is {:.1}C.", info.temperature_max);
    println!("max6675: min temperature is {:.1}C.", info.temperature_min);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command() {
        Opt::command().debug_assert();
    }

    #[test]
    fn parse_test_read() {
        let opt = Opt::try_parse_from(["max6675", "-t", "read", "--times", "5"]).unwrap();
        assert!(matches!(opt.test, Some(Routine::Read)));
        assert_eq!(opt.times, 5);
        assert!(!opt.information);
    }

    #[test]
    fn parse_long_forms() {
        let opt = Opt::try_parse_from(["max6675", "--example=read", "-l", "DEBUG"]).unwrap();
        assert!(matches!(opt.example, Some(Routine::Read)));
        assert_eq!(opt.times, 3);
        assert!(matches!(opt.log_level, LogLevel::Debug));
    }

    #[test]
    fn reject_unknown_routine() {
        assert!(Opt::try_parse_from(["max6675", "-t", "write"]).is_err());
    }

    #[test]
    fn reject_multiple_actions() {
        assert!(Opt::try_parse_from(["max6675", "-i", "-p"]).is_err());
    }

    #[test]
    fn run_each_action() {
        for args in [
            &["max6675", "-i"][..],
            &["max6675", "-p"],
            &["max6675", "-t", "read", "--times", "2"],
            &["max6675", "-e", "read", "--times", "2"],
        ] {
            let opt = Opt::try_parse_from(args.iter().copied()).unwrap();
            main_inner(opt).unwrap();
        }
    }

    #[test]
    fn port_lists_board_and_pins() {
        let config = config::Config::parse("[board]\nname = \"bench\"\n").unwrap();
        let mut out = Vec::new();
        print_port(&config.board, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "max6675: board is bench.\n\
             max6675: SCK connected to GPIO11(BCM).\n\
             max6675: MISO connected to GPIO9(BCM).\n\
             max6675: CS connected to GPIO8(BCM).\n"
        );
    }

    #[test]
    fn run_with_missing_config() {
        let opt = Opt::try_parse_from(["max6675", "-i", "-c", "/nonexistent/Max6675.toml"])
            .unwrap();
        let e = main_inner(opt).unwrap_err();
        assert!(matches!(
            e.downcast_ref::<MainError>(),
            Some(MainError::Config(_))
        ));
    }
}
