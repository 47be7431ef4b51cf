//! Counts through every digit on the display, one per second, then blanks it.

use std::time::Duration;
use log::info;
use segpad_gpio::board::BoardPins;
use segpad_gpio::delay::Delay;
use segpad_gpio::gpiod::GpiodDriver;
use segpad_gpio::segment::SevenSegmentDriver;
use crate::setup::with_display;

const STEP: Duration = Duration::from_secs(1);

pub fn run(gpio: &GpiodDriver, pins: &BoardPins, delay: &dyn Delay) -> eyre::Result<()> {
    with_display(gpio, pins, |display| {
        for digit in 0..=9 {
            info!("Displaying digit: {}", digit);
            display.render(digit)?;
            delay.delay(STEP);
        }
        display.clear()?;
        info!("Done.");
        Ok(())
    })
}
