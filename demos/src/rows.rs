//! Logs which keypad row each new key press comes from.

use std::time::Duration;
use log::info;
use segpad_gpio::board::BoardPins;
use segpad_gpio::delay::Delay;
use segpad_gpio::gpiod::GpiodDriver;
use segpad_gpio::keypad::{KeyEvent, Keypad, ScanState};
use crate::setup::with_keypad;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(gpio: &GpiodDriver, pins: &BoardPins, delay: &dyn Delay) -> eyre::Result<()> {
    with_keypad(gpio, pins, delay, |keypad| {
        let mut scan_state = ScanState::new();
        loop {
            if let Some(KeyEvent::Pressed(key)) = scan_state.update(keypad.scan()) {
                if let Some((row, col)) = keypad.layout().position_of(key) {
                    info!("Key {} pressed in row {} (column {})", key.to_char(), row + 1, col + 1);
                }
            }
            delay.delay(POLL_INTERVAL);
        }
    })
}
