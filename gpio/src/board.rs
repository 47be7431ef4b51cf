//! Pin assignments of the keypad/display board.
//!
//! Defaults match the reference wiring; each group can be overridden with an
//! environment variable holding pin numbers separated by commas, spaces or semicolons.
use std::env::{var, VarError};
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum BoardConfigError {
    #[error("{var}: invalid pin number {value:?}")]
    InvalidPin { var: &'static str, value: String },
    #[error("{var}: expected {expected} pins, got {actual}")]
    WrongPinCount {
        var: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),
}

pub const ENV_GPIO_CHIP: &str = "SEGPAD_GPIO_CHIP";
pub const ENV_KEYPAD_ROWS: &str = "SEGPAD_KEYPAD_PINS_ROWS";
pub const ENV_KEYPAD_COLS: &str = "SEGPAD_KEYPAD_PINS_COLS";
pub const ENV_SEGMENTS: &str = "SEGPAD_SEGMENT_PINS";
pub const ENV_LED: &str = "SEGPAD_LED_PIN";
pub const ENV_SWITCH: &str = "SEGPAD_SWITCH_PIN";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardPins {
    /// GPIO character device the pins belong to.
    pub chip: String,
    pub keypad_rows: [usize; 4],
    pub keypad_cols: [usize; 3],
    /// Segments `a` through `g`.
    pub segments: [usize; 7],
    pub led: usize,
    /// Push button, closes to ground.
    pub switch: usize,
}

impl Default for BoardPins {
    fn default() -> Self {
        BoardPins {
            chip: "/dev/gpiochip0".to_string(),
            keypad_rows: [12, 13, 36, 37],
            keypad_cols: [40, 39, 43],
            segments: [53, 52, 51, 48, 47, 46, 45],
            led: 61,
            switch: 35,
        }
    }
}

impl BoardPins {
    /// Reads the pin assignments from the environment, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self, BoardConfigError> {
        Self::from_lookup(|name| match var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(BoardConfigError::NotUnicode(name)),
        })
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<Option<String>, BoardConfigError>,
    ) -> Result<Self, BoardConfigError> {
        let mut pins = BoardPins::default();

        if let Some(chip) = lookup(ENV_GPIO_CHIP)? {
            pins.chip = chip;
        }
        if let Some(rows) = lookup(ENV_KEYPAD_ROWS)? {
            pins.keypad_rows = parse_pin_bus(ENV_KEYPAD_ROWS, &rows)?;
        }
        if let Some(cols) = lookup(ENV_KEYPAD_COLS)? {
            pins.keypad_cols = parse_pin_bus(ENV_KEYPAD_COLS, &cols)?;
        }
        if let Some(segments) = lookup(ENV_SEGMENTS)? {
            pins.segments = parse_pin_bus(ENV_SEGMENTS, &segments)?;
        }
        if let Some(led) = lookup(ENV_LED)? {
            let [led] = parse_pin_bus(ENV_LED, &led)?;
            pins.led = led;
        }
        if let Some(switch) = lookup(ENV_SWITCH)? {
            let [switch] = parse_pin_bus(ENV_SWITCH, &switch)?;
            pins.switch = switch;
        }

        Ok(pins)
    }
}

/// Parses exactly `N` pin numbers out of a separated list.
pub fn parse_pin_bus<const N: usize>(
    var: &'static str,
    pin_str: &str,
) -> Result<[usize; N], BoardConfigError> {
    let pins = pin_str
        .split([',', ' ', ';'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| BoardConfigError::InvalidPin {
                var,
                value: s.to_string(),
            })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    let actual = pins.len();
    pins.try_into().map_err(|_| BoardConfigError::WrongPinCount {
        var,
        expected: N,
        actual,
    })
}
