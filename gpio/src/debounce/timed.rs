use crate::delay::Clock;
use crate::{GpioInput, GpioResult};
use log::trace;
use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::time::{Duration, Instant};

/// A debounced GPIO input that uses a timer to filter out noise.
///
/// Reads report the last stable state. A new level only gets reported once the raw
/// input has kept it for [debounce_time](Self::debounce_time); flipping back earlier
/// drops the change. The stable state starts as `false` (released).
pub struct TimedDebounce<'a> {
    input: &'a dyn GpioInput,
    clock: &'a dyn Clock,
    state: Cell<bool>,
    changed_since: Cell<Option<Instant>>,
    pub debounce_time: Duration,
}

impl<'a> TimedDebounce<'a> {
    pub fn new(input: &'a dyn GpioInput, clock: &'a dyn Clock) -> Self {
        Self {
            input,
            clock,
            state: Cell::new(false),
            changed_since: Cell::new(None),
            debounce_time: Duration::from_millis(50),
        }
    }

    pub fn with_debounce_time(mut self, debounce_time: Duration) -> Self {
        self.debounce_time = debounce_time;
        self
    }
}

impl Debug for TimedDebounce<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}(debounced)", self.input)
    }
}

impl GpioInput for TimedDebounce<'_> {
    fn read(&self) -> GpioResult<bool> {
        let stable = self.state.get();
        let raw = self.input.read()?;

        if raw == stable {
            self.changed_since.set(None);
            return Ok(stable);
        }

        let now = self.clock.now();
        let since = match self.changed_since.get() {
            Some(since) => since,
            None => {
                self.changed_since.set(Some(now));
                now
            }
        };

        if now.duration_since(since) < self.debounce_time {
            return Ok(stable);
        }

        trace!("{:?} settled at {}", self.input, raw);
        self.changed_since.set(None);
        self.state.set(raw);
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::Delay;
    use crate::testing::{SimDelay, SimInput};

    const STEP: Duration = Duration::from_millis(10);

    #[test]
    fn steady_press_is_reported_after_debounce_time() {
        let input = SimInput::default();
        let clock = SimDelay::default();
        let button = TimedDebounce::new(&input, &clock);

        assert!(!button.read().unwrap());
        input.value.set(true);
        for _ in 0..5 {
            assert!(!button.read().unwrap());
            clock.delay(STEP);
        }
        assert!(button.read().unwrap());
        assert!(button.read().unwrap());
    }

    #[test]
    fn chatter_shorter_than_debounce_time_is_ignored() {
        let input = SimInput::default();
        let clock = SimDelay::default();
        let button = TimedDebounce::new(&input, &clock);

        for _ in 0..20 {
            input.value.set(!input.value.get());
            assert!(!button.read().unwrap());
            clock.delay(STEP * 3);
        }
    }

    #[test]
    fn bounce_restarts_the_timer() {
        let input = SimInput::default();
        let clock = SimDelay::default();
        let button = TimedDebounce::new(&input, &clock);

        input.value.set(true);
        button.read().unwrap();
        clock.delay(Duration::from_millis(40));
        input.value.set(false);
        assert!(!button.read().unwrap());
        input.value.set(true);
        assert!(!button.read().unwrap());
        clock.delay(Duration::from_millis(40));
        assert!(!button.read().unwrap());
        clock.delay(STEP);
        assert!(button.read().unwrap());
    }

    #[test]
    fn release_is_debounced_too() {
        let input = SimInput::default();
        let clock = SimDelay::default();
        let button = TimedDebounce::new(&input, &clock).with_debounce_time(Duration::ZERO);

        input.value.set(true);
        assert!(button.read().unwrap());

        let button = button.with_debounce_time(Duration::from_millis(20));
        input.value.set(false);
        assert!(button.read().unwrap());
        clock.delay(Duration::from_millis(20));
        assert!(!button.read().unwrap());
    }

    #[test]
    fn read_errors_are_passed_on() {
        let input = SimInput::default();
        let clock = SimDelay::default();
        let button = TimedDebounce::new(&input, &clock);

        input.fail.set(true);
        assert!(button.read().is_err());
    }
}
