use crate::segment::{SegmentPattern, SevenSegmentDriver};
use crate::{GpioActiveLevel, GpioBusOutput, GpioError, GpioResult};
use log::trace;
use std::fmt::{Debug, Formatter};

/// A seven-segment display wired directly to 7 GPIO outputs.
///
/// The bus itself should stay active-high; the display's polarity is applied here,
/// so that blanking and digits go through the exact same conversion.
pub struct GpioSevenSegmentDriver<'a> {
    segments: &'a dyn GpioBusOutput<7>,
    polarity: GpioActiveLevel,
    current: Option<u8>,
}

impl Debug for GpioSevenSegmentDriver<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GpioSevenSegmentDriver({:?}, {:?})", self.segments, self.polarity)
    }
}

impl<'a> GpioSevenSegmentDriver<'a> {
    #[rustfmt::skip]
    const DIGITS: [SegmentPattern; 10] = [
        //  a      b      c      d      e      f      g
        [ true,  true,  true,  true,  true,  true, false], // 0
        [false,  true,  true, false, false, false, false], // 1
        [ true,  true, false,  true,  true, false,  true], // 2
        [ true,  true,  true,  true, false, false,  true], // 3
        [false,  true,  true, false, false,  true,  true], // 4
        [ true, false,  true,  true, false,  true,  true], // 5
        [ true, false,  true,  true,  true,  true,  true], // 6
        [ true,  true,  true, false, false, false, false], // 7
        [ true,  true,  true,  true,  true,  true,  true], // 8
        [ true,  true,  true,  true, false,  true,  true], // 9
    ];

    const BLANK: SegmentPattern = [false; 7];

    /// Creates a driver for a display with the given polarity:
    /// [GpioActiveLevel::Low] for common-anode displays, [GpioActiveLevel::High] for
    /// common-cathode ones.
    pub fn new(segments: &'a dyn GpioBusOutput<7>, polarity: GpioActiveLevel) -> Self {
        GpioSevenSegmentDriver {
            segments,
            polarity,
            current: None,
        }
    }

    /// Gets the segment pattern of a digit, `None` if out of range.
    pub fn pattern(digit: u8) -> Option<SegmentPattern> {
        Self::DIGITS.get(digit as usize).copied()
    }

    fn write_pattern(&self, pattern: SegmentPattern) -> GpioResult<()> {
        let levels = pattern.map(|lit| self.polarity.get_state(lit));
        trace!("Writing segments {:?}", levels);
        self.segments.write(&levels)
    }
}

impl SevenSegmentDriver for GpioSevenSegmentDriver<'_> {
    fn render(&mut self, digit: u8) -> GpioResult<()> {
        let pattern = Self::pattern(digit).ok_or(GpioError::InvalidArgument)?;
        self.write_pattern(pattern)?;
        self.current = Some(digit);
        Ok(())
    }

    fn clear(&mut self) -> GpioResult<()> {
        self.write_pattern(Self::BLANK)?;
        self.current = None;
        Ok(())
    }

    fn current(&self) -> Option<u8> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingBus;

    fn levels(bits: [u8; 7]) -> [bool; 7] {
        bits.map(|bit| bit == 1)
    }

    #[test]
    fn active_low_levels_match_reference_table() {
        let expected = [
            [0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 1, 1, 1, 1],
            [0, 0, 1, 0, 0, 1, 0],
            [0, 0, 0, 0, 1, 1, 0],
            [1, 0, 0, 1, 1, 0, 0],
            [0, 1, 0, 0, 1, 0, 0],
            [0, 1, 0, 0, 0, 0, 0],
            [0, 0, 0, 1, 1, 1, 1],
            [0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 0, 0],
        ];

        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::Low);
        for (digit, bits) in expected.into_iter().enumerate() {
            display.render(digit as u8).unwrap();
            assert_eq!(bus.last(), Some(levels(bits)), "digit {}", digit);
            assert_eq!(display.current(), Some(digit as u8));
        }
    }

    #[test]
    fn render_does_not_depend_on_previous_digit() {
        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::High);
        for previous in 0..10 {
            for digit in 0..10 {
                display.render(previous).unwrap();
                display.render(digit).unwrap();
                assert_eq!(
                    bus.last(),
                    GpioSevenSegmentDriver::pattern(digit),
                    "{} after {}",
                    digit,
                    previous
                );
            }
        }
    }

    #[test]
    fn every_render_writes_all_segments_at_once() {
        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::Low);
        display.render(8).unwrap();
        display.render(1).unwrap();
        assert_eq!(bus.write_count(), 2);
    }

    #[test]
    fn clear_turns_everything_off_for_both_polarities() {
        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::Low);
        display.render(8).unwrap();
        display.clear().unwrap();
        assert_eq!(bus.last(), Some([true; 7]));
        assert_eq!(display.current(), None);

        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::High);
        display.render(8).unwrap();
        display.clear().unwrap();
        assert_eq!(bus.last(), Some([false; 7]));
    }

    #[test]
    fn clear_is_idempotent() {
        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::Low);
        display.clear().unwrap();
        let first = bus.last();
        display.clear().unwrap();
        assert_eq!(bus.last(), first);
        assert_eq!(display.current(), None);
    }

    #[test]
    fn out_of_range_digit_writes_nothing() {
        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::Low);
        display.render(4).unwrap();
        assert_eq!(display.render(10), Err(GpioError::InvalidArgument));
        assert_eq!(display.render(255), Err(GpioError::InvalidArgument));
        assert_eq!(bus.write_count(), 1);
        assert_eq!(display.current(), Some(4));
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let bus = RecordingBus::new();
        let mut display = GpioSevenSegmentDriver::new(&bus, GpioActiveLevel::Low);
        display.render(2).unwrap();
        bus.fail.set(true);
        assert!(display.render(3).is_err());
        assert_eq!(display.current(), Some(2));
    }
}
