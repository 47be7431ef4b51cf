//! Shows the pressed digit and blinks the LED that many times.

use std::time::Duration;
use log::{debug, info};
use segpad_gpio::board::BoardPins;
use segpad_gpio::delay::Delay;
use segpad_gpio::gpiod::GpiodDriver;
use segpad_gpio::keypad::{KeyEvent, Keypad, ScanState};
use segpad_gpio::segment::SevenSegmentDriver;
use crate::setup::{with_display, with_keypad, with_led};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(gpio: &GpiodDriver, pins: &BoardPins, delay: &dyn Delay) -> eyre::Result<()> {
    with_keypad(gpio, pins, delay, |keypad| {
        with_display(gpio, pins, |display| {
            with_led(gpio, pins, delay, |led| {
                let mut scan_state = ScanState::new();
                loop {
                    match scan_state.update(keypad.scan()) {
                        Some(KeyEvent::Pressed(key)) => match key.to_digit() {
                            Some(digit) => {
                                info!("Key pressed: {}", digit);
                                display.render(digit)?;
                                led.blink(digit.into())?;
                            }
                            None => {
                                debug!("Ignoring {}", key.to_char());
                                display.clear()?;
                            }
                        },
                        Some(KeyEvent::Released(_)) => {
                            led.set(false)?;
                            display.clear()?;
                        }
                        None => {}
                    }
                    delay.delay(POLL_INTERVAL);
                }
            })
        })
    })
}
