//! The module for the main app state and logic.

use log::{debug, info};
use segpad_gpio::GpioResult;
use segpad_gpio::keypad::{KeyEvent, Keypad, KeypadKey, ScanState};
use segpad_gpio::segment::SevenSegmentDriver;

/// What the display is doing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum AppState {
    /// No digit latched, display blank.
    #[default]
    Idle,
    /// `digit` is shown while `key` is held.
    Showing { key: KeypadKey, digit: u8 },
}

/// The main app state struct.
///
/// Each [App::update] scans the keypad once and reacts to the edge it produced:
/// a numeric key is shown until released, `*` and `#` blank the display.
pub struct App<'a> {
    keypad: &'a dyn Keypad<Key = KeypadKey>,
    display: &'a mut dyn SevenSegmentDriver,
    scan_state: ScanState<KeypadKey>,
    state: AppState,
}

impl<'a> App<'a> {
    /// Creates a new instance of the App.
    pub fn new(
        keypad: &'a dyn Keypad<Key = KeypadKey>,
        display: &'a mut dyn SevenSegmentDriver,
    ) -> App<'a> {
        App {
            keypad,
            display,
            scan_state: ScanState::new(),
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Runs one poll cycle.
    pub fn update(&mut self) -> GpioResult<()> {
        let scanned = self.keypad.scan();
        let Some(event) = self.scan_state.update(scanned) else {
            return Ok(());
        };

        match event {
            KeyEvent::Pressed(key) => match key.to_digit() {
                Some(digit) => {
                    info!("Key pressed: {}", key.to_char());
                    self.display.render(digit)?;
                    self.state = AppState::Showing { key, digit };
                }
                None => {
                    info!("Key pressed: {}, blanking display", key.to_char());
                    self.display.clear()?;
                    self.state = AppState::Idle;
                }
            },
            KeyEvent::Released(key) => {
                debug!("Key released: {}", key.to_char());
                if let AppState::Showing { .. } = self.state {
                    self.display.clear()?;
                    self.state = AppState::Idle;
                }
            }
        }

        Ok(())
    }
}
