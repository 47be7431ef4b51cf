mod gpio;
mod layout;

use std::fmt::Debug;
pub use gpio::*;
pub use layout::*;

/// The `Keypad` trait defines the interface for keypad input devices.
pub trait Keypad: Debug {
    type Key;

    /// Scans the keypad once and returns the first confirmed pressed key, if any.
    ///
    /// Never fails: a line that can't be read counts as not pressed.
    fn scan(&self) -> Option<Self::Key>;
}

/// A change in the scanned key between two consecutive polls.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyEvent<K> {
    /// A key appeared, or replaced a different one that was held before.
    Pressed(K),
    /// The previously held key is no longer reported.
    Released(K),
}

/// Edge detection over consecutive [Keypad::scan] results.
///
/// A held key produces a single [KeyEvent::Pressed], and a single [KeyEvent::Released]
/// once the scan comes back empty. With `K = ()` it tracks a single push button.
#[derive(Debug)]
pub struct ScanState<K> {
    last: Option<K>,
}

impl<K> Default for ScanState<K> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K: Copy + PartialEq> ScanState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The key seen on the previous poll.
    pub fn last(&self) -> Option<K> {
        self.last
    }

    /// Feeds the latest scan result and returns the edge it represents, if any.
    pub fn update(&mut self, scanned: Option<K>) -> Option<KeyEvent<K>> {
        let previous = std::mem::replace(&mut self.last, scanned);
        match (previous, scanned) {
            (Some(old), Some(new)) if old == new => None,
            (_, Some(new)) => Some(KeyEvent::Pressed(new)),
            (Some(old), None) => Some(KeyEvent::Released(old)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_is_pressed_once() {
        let mut state = ScanState::new();
        assert_eq!(state.update(Some(KeypadKey::Key5)), Some(KeyEvent::Pressed(KeypadKey::Key5)));
        assert_eq!(state.update(Some(KeypadKey::Key5)), None);
        assert_eq!(state.update(Some(KeypadKey::Key5)), None);
        assert_eq!(state.last(), Some(KeypadKey::Key5));
    }

    #[test]
    fn release_is_reported_once() {
        let mut state = ScanState::new();
        state.update(Some(KeypadKey::KeyHash));
        assert_eq!(state.update(None), Some(KeyEvent::Released(KeypadKey::KeyHash)));
        assert_eq!(state.update(None), None);
        assert_eq!(state.last(), None);
    }

    #[test]
    fn switching_keys_presses_the_new_one() {
        let mut state = ScanState::new();
        state.update(Some(KeypadKey::Key1));
        assert_eq!(state.update(Some(KeypadKey::Key2)), Some(KeyEvent::Pressed(KeypadKey::Key2)));
    }

    #[test]
    fn idle_produces_nothing() {
        let mut state: ScanState<KeypadKey> = ScanState::new();
        for _ in 0..5 {
            assert_eq!(state.update(None), None);
        }
    }

    #[test]
    fn single_button_edges() {
        let mut state = ScanState::new();
        let levels = [false, true, true, false, true];
        let events: Vec<_> = levels
            .iter()
            .filter_map(|&pressed| state.update(pressed.then_some(())))
            .collect();
        assert_eq!(
            events,
            vec![KeyEvent::Pressed(()), KeyEvent::Released(()), KeyEvent::Pressed(())]
        );
    }
}
