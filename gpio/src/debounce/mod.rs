//! Debouncing of single inputs, e.g. push buttons.
//!
//! Keypad matrices debounce inside [GpioKeypad](crate::keypad::GpioKeypad) instead.
mod timed;

pub use timed::TimedDebounce;
