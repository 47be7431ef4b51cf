//! Each press of the push button flips the LED.

use std::time::Duration;
use log::info;
use segpad_gpio::GpioInput;
use segpad_gpio::board::BoardPins;
use segpad_gpio::delay::{Clock, Delay};
use segpad_gpio::gpiod::GpiodDriver;
use segpad_gpio::keypad::{KeyEvent, ScanState};
use crate::setup::{with_led, with_switch};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub fn run(
    gpio: &GpiodDriver,
    pins: &BoardPins,
    delay: &dyn Delay,
    clock: &dyn Clock,
) -> eyre::Result<()> {
    with_switch(gpio, pins, clock, |switch| {
        with_led(gpio, pins, delay, |led| {
            let mut edges = ScanState::new();
            let mut lit = false;
            loop {
                if let Some(KeyEvent::Pressed(())) = edges.update(switch.read()?.then_some(())) {
                    lit = !lit;
                    led.set(lit)?;
                    info!("Button pressed, LED is now {}", if lit { "ON" } else { "OFF" });
                }
                delay.delay(POLL_INTERVAL);
            }
        })
    })
}
