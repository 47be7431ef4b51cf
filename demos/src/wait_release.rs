//! Press-and-wait loop: shows a key's digit, then blocks until the key is released.

use std::time::Duration;
use log::info;
use segpad_gpio::board::BoardPins;
use segpad_gpio::delay::Delay;
use segpad_gpio::gpiod::GpiodDriver;
use segpad_gpio::keypad::Keypad;
use segpad_gpio::segment::SevenSegmentDriver;
use crate::setup::{with_display, with_keypad};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const RELEASE_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run(gpio: &GpiodDriver, pins: &BoardPins, delay: &dyn Delay) -> eyre::Result<()> {
    with_keypad(gpio, pins, delay, |keypad| {
        with_display(gpio, pins, |display| loop {
            if let Some(key) = keypad.scan() {
                info!("Key pressed: {}", key.to_char());
                match key.to_digit() {
                    Some(digit) => display.render(digit)?,
                    None => display.clear()?,
                }

                while keypad.scan().is_some() {
                    delay.delay(RELEASE_POLL_INTERVAL);
                }
                info!("Key released");
                display.clear()?;
            }
            delay.delay(POLL_INTERVAL);
        })
    })
}
