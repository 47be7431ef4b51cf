//! Counts push button presses and blinks the LED once per press so far.

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
            let mut presses: u32 = 0;
            loop {
                if let Some(KeyEvent::Pressed(())) = edges.update(switch.read()?.then_some(())) {
                    presses = presses.saturating_add(1);
                    info!("Switch pressed {} time(s)", presses);
                    led.blink(presses)?;
                }
                delay.delay(POLL_INTERVAL);
            }
        })
    })
}
