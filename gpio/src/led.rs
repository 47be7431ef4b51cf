use crate::delay::Delay;
use crate::{GpioOutput, GpioResult};
use std::fmt::Debug;
use std::time::Duration;

/// Blinks an LED on a single output pin.
#[derive(Debug)]
pub struct Blinker<'a> {
    led: &'a dyn GpioOutput,
    delay: &'a dyn Delay,
    pub on_time: Duration,
    pub off_time: Duration,
}

impl<'a> Blinker<'a> {
    pub fn new(led: &'a dyn GpioOutput, delay: &'a dyn Delay) -> Self {
        Self {
            led,
            delay,
            on_time: Duration::from_millis(500),
            off_time: Duration::from_millis(500),
        }
    }

    pub fn with_timing(mut self, on_time: Duration, off_time: Duration) -> Self {
        self.on_time = on_time;
        self.off_time = off_time;
        self
    }

    pub fn set(&self, on: bool) -> GpioResult<()> {
        self.led.write(on)
    }

    /// Turns the LED on and off `times` times, blocking until done. Leaves it off.
    pub fn blink(&self, times: u32) -> GpioResult<()> {
        for _ in 0..times {
            self.led.write(true)?;
            self.delay.delay(self.on_time);
            self.led.write(false)?;
            self.delay.delay(self.off_time);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingPin, SimDelay};

    #[test]
    fn blinks_the_requested_number_of_times() {
        let led = RecordingPin::default();
        let delay = SimDelay::default();
        let blinker = Blinker::new(&led, &delay);
        blinker.blink(3).unwrap();
        assert_eq!(*led.writes.borrow(), vec![true, false, true, false, true, false]);
        assert_eq!(delay.now.get(), Duration::from_secs(3));
    }

    #[test]
    fn zero_blinks_touch_nothing() {
        let led = RecordingPin::default();
        let delay = SimDelay::default();
        Blinker::new(&led, &delay).blink(0).unwrap();
        assert!(led.writes.borrow().is_empty());
        assert!(delay.calls.borrow().is_empty());
    }

    #[test]
    fn custom_timing_is_used() {
        let led = RecordingPin::default();
        let delay = SimDelay::default();
        let blinker = Blinker::new(&led, &delay)
            .with_timing(Duration::from_millis(100), Duration::from_millis(300));
        blinker.blink(1).unwrap();
        assert_eq!(
            *delay.calls.borrow(),
            vec![Duration::from_millis(100), Duration::from_millis(300)]
        );
    }
}
