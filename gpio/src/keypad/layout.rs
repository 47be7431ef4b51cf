/// Represents the keys on a 4x3 numeric keypad.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeypadKey {
    /// The `0` key.
    Key0,
    /// The `1` key.
    Key1,
    /// The `2` key.
    Key2,
    /// The `3` key.
    Key3,
    /// The `4` key.
    Key4,
    /// The `5` key.
    Key5,
    /// The `6` key.
    Key6,
    /// The `7` key.
    Key7,
    /// The `8` key.
    Key8,
    /// The `9` key.
    Key9,
    /// The `*` key.
    KeyAsterisk,
    /// The `#` key.
    KeyHash,
}

impl KeypadKey {
    /// Gets the decimal digit of a numeric key. `*` and `#` have none.
    pub fn to_digit(self) -> Option<u8> {
        use KeypadKey::*;

        match self {
            Key0 => Some(0),
            Key1 => Some(1),
            Key2 => Some(2),
            Key3 => Some(3),
            Key4 => Some(4),
            Key5 => Some(5),
            Key6 => Some(6),
            Key7 => Some(7),
            Key8 => Some(8),
            Key9 => Some(9),
            KeyAsterisk | KeyHash => None,
        }
    }

    /// Converts the [KeypadKey] to its corresponding character.
    pub fn to_char(self) -> char {
        match self {
            KeypadKey::KeyAsterisk => '*',
            KeypadKey::KeyHash => '#',
            key => key
                .to_digit()
                .and_then(|digit| char::from_digit(digit.into(), 10))
                .unwrap_or('?'),
        }
    }
}

/// Which key sits at each (row, column) crossing of an `R`x`C` switch matrix.
///
/// Rows are the driven lines, columns the read ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyMatrixLayout<const R: usize, const C: usize> {
    keys: [[KeypadKey; C]; R],
}

impl KeyMatrixLayout<4, 3> {
    /// The reference board's 4x3 keypad. Unlike a telephone pad, `0` sits in the
    /// first column of the bottom row:
    ///
    /// ```text
    /// 1 2 3
    /// 4 5 6
    /// 7 8 9
    /// 0 * #
    /// ```
    pub const BOARD_4X3: Self = {
        use KeypadKey::*;

        Self::new([
            [Key1, Key2, Key3],
            [Key4, Key5, Key6],
            [Key7, Key8, Key9],
            [Key0, KeyAsterisk, KeyHash],
        ])
    };
}

impl<const R: usize, const C: usize> KeyMatrixLayout<R, C> {
    pub const fn new(keys: [[KeypadKey; C]; R]) -> Self {
        Self { keys }
    }

    pub const fn rows(&self) -> usize {
        R
    }

    pub const fn cols(&self) -> usize {
        C
    }

    /// Gets the key at the given position, or `None` if it's outside the matrix.
    pub fn key_at(&self, row: usize, col: usize) -> Option<KeypadKey> {
        self.keys.get(row)?.get(col).copied()
    }

    /// Finds the (row, column) of a key.
    pub fn position_of(&self, key: KeypadKey) -> Option<(usize, usize)> {
        self.keys.iter().enumerate().find_map(|(row, keys)| {
            keys.iter().position(|&k| k == key).map(|col| (row, col))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_layout_positions() {
        let layout = KeyMatrixLayout::BOARD_4X3;
        assert_eq!(layout.key_at(0, 0), Some(KeypadKey::Key1));
        assert_eq!(layout.key_at(2, 2), Some(KeypadKey::Key9));
        assert_eq!(layout.key_at(3, 0), Some(KeypadKey::Key0));
        assert_eq!(layout.key_at(3, 1), Some(KeypadKey::KeyAsterisk));
        assert_eq!(layout.key_at(3, 2), Some(KeypadKey::KeyHash));
        assert_eq!(layout.key_at(4, 0), None);
        assert_eq!(layout.key_at(0, 3), None);
        assert_eq!(layout.position_of(KeypadKey::Key6), Some((1, 2)));
    }

    #[test]
    fn asterisk_and_hash_are_distinct_and_not_digits() {
        assert_ne!(KeypadKey::KeyAsterisk, KeypadKey::KeyHash);
        assert_eq!(KeypadKey::KeyAsterisk.to_digit(), None);
        assert_eq!(KeypadKey::KeyHash.to_digit(), None);
        assert_eq!(KeypadKey::KeyAsterisk.to_char(), '*');
        assert_eq!(KeypadKey::KeyHash.to_char(), '#');
    }

    #[test]
    fn every_numeric_key_has_matching_char() {
        let layout = KeyMatrixLayout::BOARD_4X3;
        let mut digits = Vec::new();
        for row in 0..layout.rows() {
            for col in 0..layout.cols() {
                let key = layout.key_at(row, col).unwrap();
                if let Some(digit) = key.to_digit() {
                    assert_eq!(key.to_char(), char::from_digit(digit.into(), 10).unwrap());
                    digits.push(digit);
                }
            }
        }
        digits.sort();
        assert_eq!(digits, (0..=9).collect::<Vec<_>>());
    }
}
