mod app;
mod config;

use std::thread;
use dotenv::dotenv;
use eyre::WrapErr;
use log::{debug, info};
use segpad_gpio::GpioActiveLevel::Low;
use segpad_gpio::GpioBias::PullUp;
use segpad_gpio::GpioDriver;
use segpad_gpio::board::BoardPins;
use segpad_gpio::delay::ThreadDelay;
use segpad_gpio::gpiod::GpiodDriver;
use segpad_gpio::keypad::{GpioKeypad, KeyMatrixLayout};
use segpad_gpio::segment::{GpioSevenSegmentDriver, SevenSegmentDriver};
use crate::app::App;
use crate::config::Config;

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("segpad starting...");

    let pins = BoardPins::from_env()?;
    info!("Keypad @ Rows: {:?}, Cols: {:?}", pins.keypad_rows, pins.keypad_cols);
    info!("Display @ Segments: {:?}", pins.segments);

    debug!("Trying to load config...");
    let config_path = Config::path();
    let config = Config::load_or_init(&config_path)
        .wrap_err_with(|| format!("Failed to load {}", config_path.display()))?;
    debug!("{:?}", config);

    debug!("Initializing GPIO driver...");
    let gpio = GpiodDriver::open(&pins.chip)
        .wrap_err_with(|| format!("Failed to open {}", pins.chip))?;
    debug!("{:?} initialized.", gpio);

    debug!("Initializing keypad driver...");
    let mut keypad_row_bus = gpio
        .get_pin_bus(pins.keypad_rows)
        .wrap_err("Failed to claim keypad rows")?;
    let mut keypad_col_bus = gpio
        .get_pin_bus(pins.keypad_cols)
        .wrap_err("Failed to claim keypad columns")?;
    keypad_row_bus.set_active_level(Low)?;
    keypad_col_bus.set_bias(PullUp)?;
    keypad_col_bus.set_active_level(Low)?;
    let keypad_row_out = keypad_row_bus
        .as_output()
        .wrap_err("Failed to configure keypad rows")?;
    let keypad_col_in = keypad_col_bus
        .as_input()
        .wrap_err("Failed to configure keypad columns")?;

    let delay = ThreadDelay;
    let keypad = GpioKeypad::new(
        &*keypad_row_out,
        &*keypad_col_in,
        KeyMatrixLayout::BOARD_4X3,
        &delay,
    )
    .with_settle_time(config.settle_time());
    debug!("{:?} initialized.", keypad);

    debug!("Initializing display driver...");
    let mut segment_bus = gpio
        .get_pin_bus(pins.segments)
        .wrap_err("Failed to claim segment pins")?;
    let segment_out = segment_bus
        .as_output()
        .wrap_err("Failed to configure segment pins")?;
    let mut display = GpioSevenSegmentDriver::new(&*segment_out, config.segment_polarity());
    display.clear()?;
    debug!("{:?} initialized.", display);

    info!("Starting main loop...");

    let mut app = App::new(&keypad, &mut display);
    loop {
        app.update()?;
        thread::sleep(config.poll_interval());
    }
}
