mod blink;
mod count;
mod press_count;
mod rows;
mod setup;
mod toggle;
mod wait_release;

use clap::Parser;
use dotenv::dotenv;
use eyre::WrapErr;
use log::{debug, info};
use segpad_gpio::board::BoardPins;
use segpad_gpio::delay::ThreadDelay;
use segpad_gpio::gpiod::GpiodDriver;
use sysinfo::System;

/// Peripheral demos for the keypad and seven-segment board.
///
/// Pin assignments come from the `SEGPAD_*` environment variables (or `.env`).
#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Which demo to run.
    #[arg(value_enum)]
    demo: Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Demo {
    /// Count through the digits on the display.
    Count,
    /// Log the keypad row of each press.
    Rows,
    /// Show the pressed digit and blink the LED that many times.
    Blink,
    /// Show a key until it is released.
    WaitRelease,
    /// Flip the LED on every button press.
    Toggle,
    /// Blink the LED once per button press so far.
    PressCount,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!(
        "Hello, {}!",
        System::name().as_deref().unwrap_or(UNKNOWN_STR)
    );
    info!(
        "System ver {} kernel ver {}",
        System::long_os_version().as_deref().unwrap_or(UNKNOWN_STR),
        System::kernel_version().as_deref().unwrap_or(UNKNOWN_STR),
    );
    info!("Architecture {}", System::cpu_arch());

    let pins = BoardPins::from_env()?;
    debug!("{:?}", pins);

    let gpio = GpiodDriver::open(&pins.chip)
        .wrap_err_with(|| format!("Failed to open {}", pins.chip))?;
    debug!("{:?} initialized.", gpio);

    let delay = ThreadDelay;

    info!("Running {:?} demo...", cli.demo);
    match cli.demo {
        Demo::Count => count::run(&gpio, &pins, &delay),
        Demo::Rows => rows::run(&gpio, &pins, &delay),
        Demo::Blink => blink::run(&gpio, &pins, &delay),
        Demo::WaitRelease => wait_release::run(&gpio, &pins, &delay),
        Demo::Toggle => toggle::run(&gpio, &pins, &delay, &delay),
        Demo::PressCount => press_count::run(&gpio, &pins, &delay, &delay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Demo, clap::Error> {
        Cli::try_parse_from(std::iter::once("segpad_demos").chain(args.iter().copied()))
            .map(|cli| cli.demo)
    }

    #[test]
    fn demo_names_parse() {
        assert_eq!(parse(&["count"]).unwrap(), Demo::Count);
        assert_eq!(parse(&["rows"]).unwrap(), Demo::Rows);
        assert_eq!(parse(&["blink"]).unwrap(), Demo::Blink);
        assert_eq!(parse(&["wait-release"]).unwrap(), Demo::WaitRelease);
        assert_eq!(parse(&["toggle"]).unwrap(), Demo::Toggle);
        assert_eq!(parse(&["press-count"]).unwrap(), Demo::PressCount);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse(&["dance"]).is_err());
        assert!(parse(&[]).is_err());
        assert_eq!(
            parse(&["--help"]).unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
