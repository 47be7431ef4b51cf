use crate::delay::Delay;
use crate::keypad::{KeyMatrixLayout, Keypad, KeypadKey};
use crate::{GpioBusInput, GpioBusOutput, GpioResult};
use log::{trace, warn};
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// A GPIO-based switch matrix keypad with `R` driven rows and `C` read columns.
///
/// Both buses should be configured with the matrix's active level, so that writing
/// `true` to a row pulls it to the active level and reading `true` from a column means a
/// closed contact. For the usual wiring (rows pulled low one at a time, columns with
/// pull-ups) that means [`GpioActiveLevel::Low`](crate::GpioActiveLevel::Low) on both.
pub struct GpioKeypad<'a, const R: usize, const C: usize> {
    rows: &'a dyn GpioBusOutput<R>,
    cols: &'a dyn GpioBusInput<C>,
    layout: KeyMatrixLayout<R, C>,
    delay: &'a dyn Delay,
    /// How long a column has to stay active before the key counts as pressed.
    pub settle_time: Duration,
}

impl<const R: usize, const C: usize> Debug for GpioKeypad<'_, R, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GpioKeypad<{}x{}>({:?}, {:?})", R, C, self.rows, self.cols)
    }
}

impl<'a, const R: usize, const C: usize> GpioKeypad<'a, R, C> {
    pub const DEFAULT_SETTLE_TIME: Duration = Duration::from_millis(50);

    /// Creates a new `GpioKeypad` instance with the specified GPIO bus outputs for rows
    /// and inputs for columns.
    ///
    /// The rows are used to write the active state, and the columns are used to read
    /// the pressed keys in the active row.
    pub fn new(
        rows: &'a dyn GpioBusOutput<R>,
        cols: &'a dyn GpioBusInput<C>,
        layout: KeyMatrixLayout<R, C>,
        delay: &'a dyn Delay,
    ) -> Self {
        GpioKeypad {
            rows,
            cols,
            layout,
            delay,
            settle_time: Self::DEFAULT_SETTLE_TIME,
        }
    }

    pub fn with_settle_time(mut self, settle_time: Duration) -> Self {
        self.settle_time = settle_time;
        self
    }

    pub fn layout(&self) -> &KeyMatrixLayout<R, C> {
        &self.layout
    }

    /// Drives `row` active and every other row inactive. `None` releases all rows.
    fn drive_row(&self, row: Option<usize>) -> GpioResult<()> {
        let mut values = [false; R];
        if let Some(row) = row {
            values[row] = true;
        }
        self.rows.write(&values)
    }

    fn column_active(&self, col: usize) -> bool {
        match self.cols.read() {
            Ok(values) => values[col],
            Err(e) => {
                warn!("Failed to read keypad columns, treating as released: {}", e);
                false
            }
        }
    }

    /// Looks for a confirmed press in the currently driven row.
    fn scan_row(&self, row: usize) -> Option<KeypadKey> {
        for col in 0..C {
            if !self.column_active(col) {
                continue;
            }

            trace!("Candidate at row {} col {}, settling", row, col);
            self.delay.delay(self.settle_time);

            if self.column_active(col) {
                return self.layout.key_at(row, col);
            }
            trace!("Bounce rejected at row {} col {}", row, col);
        }
        None
    }
}

impl<const R: usize, const C: usize> Keypad for GpioKeypad<'_, R, C> {
    type Key = KeypadKey;

    fn scan(&self) -> Option<Self::Key> {
        for row in 0..R {
            if let Err(e) = self.drive_row(Some(row)) {
                warn!("Failed to drive keypad row {}, skipping: {}", row, e);
                continue;
            }

            let key = self.scan_row(row);

            if let Err(e) = self.drive_row(None) {
                warn!("Failed to release keypad row {}: {}", row, e);
            }

            if key.is_some() {
                return key;
            }
        }

        None
    }
}
