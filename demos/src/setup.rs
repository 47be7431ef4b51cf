//! Pin setup shared by the demos.
//!
//! The claimed buses borrow the driver and the drivers borrow the buses, so instead
//! of returning them, the helpers hand the ready driver to a closure.

use eyre::WrapErr;
use log::debug;
use segpad_gpio::GpioActiveLevel::Low;
use segpad_gpio::GpioBias::PullUp;
use segpad_gpio::GpioDriver;
use segpad_gpio::board::BoardPins;
use segpad_gpio::debounce::TimedDebounce;
use segpad_gpio::delay::{Clock, Delay};
use segpad_gpio::gpiod::GpiodDriver;
use segpad_gpio::keypad::{GpioKeypad, KeyMatrixLayout};
use segpad_gpio::led::Blinker;
use segpad_gpio::segment::{GpioSevenSegmentDriver, SevenSegmentDriver};

pub type Keypad4x3<'a> = GpioKeypad<'a, 4, 3>;

pub fn with_keypad<T>(
    gpio: &GpiodDriver,
    pins: &BoardPins,
    delay: &dyn Delay,
    f: impl FnOnce(&Keypad4x3<'_>) -> eyre::Result<T>,
) -> eyre::Result<T> {
    let mut row_bus = gpio
        .get_pin_bus(pins.keypad_rows)
        .wrap_err("Failed to claim keypad rows")?;
    let mut col_bus = gpio
        .get_pin_bus(pins.keypad_cols)
        .wrap_err("Failed to claim keypad columns")?;
    row_bus.set_active_level(Low)?;
    col_bus.set_bias(PullUp)?;
    col_bus.set_active_level(Low)?;
    let row_out = row_bus.as_output()?;
    let col_in = col_bus.as_input()?;

    let keypad = GpioKeypad::new(&*row_out, &*col_in, KeyMatrixLayout::BOARD_4X3, delay);
    debug!("{:?} initialized.", keypad);
    f(&keypad)
}

/// Sets up the display (common-anode) and blanks it before handing it over.
pub fn with_display<T>(
    gpio: &GpiodDriver,
    pins: &BoardPins,
    f: impl FnOnce(&mut GpioSevenSegmentDriver<'_>) -> eyre::Result<T>,
) -> eyre::Result<T> {
    let mut segment_bus = gpio
        .get_pin_bus(pins.segments)
        .wrap_err("Failed to claim segment pins")?;
    let segment_out = segment_bus.as_output()?;

    let mut display = GpioSevenSegmentDriver::new(&*segment_out, Low);
    display.clear()?;
    debug!("{:?} initialized.", display);
    f(&mut display)
}

pub fn with_led<T>(
    gpio: &GpiodDriver,
    pins: &BoardPins,
    delay: &dyn Delay,
    f: impl FnOnce(&Blinker<'_>) -> eyre::Result<T>,
) -> eyre::Result<T> {
    let mut led_pin = gpio.get_pin(pins.led).wrap_err("Failed to claim LED pin")?;
    let led_out = led_pin.as_output()?;

    let blinker = Blinker::new(&*led_out, delay);
    blinker.set(false)?;
    debug!("{:?} initialized.", blinker);
    f(&blinker)
}

/// Sets up the push button (pulled up, pressed = low), debounced.
pub fn with_switch<T>(
    gpio: &GpiodDriver,
    pins: &BoardPins,
    clock: &dyn Clock,
    f: impl FnOnce(&TimedDebounce<'_>) -> eyre::Result<T>,
) -> eyre::Result<T> {
    let mut switch_pin = gpio
        .get_pin(pins.switch)
        .wrap_err("Failed to claim switch pin")?;
    switch_pin.set_bias(PullUp)?;
    switch_pin.set_active_level(Low)?;
    let switch_in = switch_pin.as_input()?;

    let switch = TimedDebounce::new(&*switch_in, clock);
    debug!("{:?} initialized.", switch);
    f(&switch)
}
