//! Blocking delays and the time source.
//!
//! Drivers that need to wait (keypad settle time, LED blinking) take a `&dyn Delay`
//! instead of calling [std::thread::sleep] directly, and drivers that measure time
//! (button debouncing) take a `&dyn Clock`, so both can be simulated.

use std::fmt::Debug;
use std::thread::sleep;
use std::time::{Duration, Instant};

pub trait Delay: Debug {
    /// Blocks for (at least) the given duration.
    fn delay(&self, duration: Duration);
}

pub trait Clock: Debug {
    fn now(&self) -> Instant;
}

/// [Delay] backed by [std::thread::sleep], [Clock] backed by [Instant::now].
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&self, duration: Duration) {
        sleep(duration);
    }
}

impl Clock for ThreadDelay {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
