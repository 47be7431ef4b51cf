//! Single-digit seven-segment displays.
//!
//! Segments are always ordered `a, b, c, d, e, f, g`:
//!
//! ```text
//!  aaa
//! f   b
//!  ggg
//! e   c
//!  ddd
//! ```
mod gpio;

use crate::GpioResult;
pub use gpio::*;
use std::fmt::Debug;

/// On/off state of the segments `a` through `g`, `true` meaning lit.
pub type SegmentPattern = [bool; 7];

pub trait SevenSegmentDriver: Debug {
    /// Shows a decimal digit.
    ///
    /// # Errors
    /// - `GpioError::InvalidArgument` if `digit` is not within `0..=9`. Nothing is written then.
    fn render(&mut self, digit: u8) -> GpioResult<()>;

    /// Turns every segment off.
    fn clear(&mut self) -> GpioResult<()>;

    /// The digit currently shown, `None` when blank.
    fn current(&self) -> Option<u8>;
}
