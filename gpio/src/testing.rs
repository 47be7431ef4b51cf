//! In-memory pin doubles shared by the unit tests.

use crate::delay::{Clock, Delay};
use crate::{GpioBusInput, GpioBusOutput, GpioError, GpioInput, GpioOutput, GpioResult};
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

/// Output bus that remembers every value written to it.
#[derive(Debug)]
pub struct RecordingBus<const N: usize> {
    pub writes: RefCell<Vec<[bool; N]>>,
    pub fail: Cell<bool>,
}

impl<const N: usize> RecordingBus<N> {
    pub fn new() -> Self {
        Self {
            writes: RefCell::new(Vec::new()),
            fail: Cell::new(false),
        }
    }

    pub fn last(&self) -> Option<[bool; N]> {
        self.writes.borrow().last().copied()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl<const N: usize> GpioBusOutput<N> for RecordingBus<N> {
    fn write(&self, values: &[bool; N]) -> GpioResult<()> {
        if self.fail.get() {
            return Err(GpioError::Io(std::io::ErrorKind::BrokenPipe));
        }
        self.writes.borrow_mut().push(*values);
        Ok(())
    }
}

/// Single output pin that remembers every value written to it.
#[derive(Debug, Default)]
pub struct RecordingPin {
    pub writes: RefCell<Vec<bool>>,
}

impl GpioOutput for RecordingPin {
    fn write(&self, value: bool) -> GpioResult<()> {
        self.writes.borrow_mut().push(value);
        Ok(())
    }
}

/// Single input pin whose level is set by the test.
#[derive(Debug, Default)]
pub struct SimInput {
    pub value: Cell<bool>,
    pub fail: Cell<bool>,
}

impl GpioInput for SimInput {
    fn read(&self) -> GpioResult<bool> {
        if self.fail.get() {
            return Err(GpioError::Io(std::io::ErrorKind::TimedOut));
        }
        Ok(self.value.get())
    }
}

/// Simulated clock. Delays advance it instead of sleeping.
#[derive(Debug)]
pub struct SimDelay {
    start: Instant,
    pub now: Cell<Duration>,
    pub calls: RefCell<Vec<Duration>>,
}

impl Default for SimDelay {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            now: Cell::new(Duration::ZERO),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Delay for SimDelay {
    fn delay(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
        self.calls.borrow_mut().push(duration);
    }
}

impl Clock for SimDelay {
    fn now(&self) -> Instant {
        self.start + self.now.get()
    }
}

#[derive(Copy, Clone, Debug)]
struct Press {
    row: usize,
    col: usize,
    from: Duration,
    until: Option<Duration>,
}

/// A switch matrix with its own clock.
///
/// Acts as the row output bus, the column input bus and the delay at once, so a
/// contact can be closed for a given window of simulated time. Values are logical
/// (`true` = active row / closed contact seen on the column).
#[derive(Debug)]
pub struct MatrixSim<const R: usize, const C: usize> {
    now: Cell<Duration>,
    driven: RefCell<[bool; R]>,
    presses: RefCell<Vec<Press>>,
    pub fail_reads: Cell<bool>,
    pub fail_row_writes: Cell<bool>,
    pub reads: Cell<usize>,
}

impl<const R: usize, const C: usize> MatrixSim<R, C> {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            driven: RefCell::new([false; R]),
            presses: RefCell::new(Vec::new()),
            fail_reads: Cell::new(false),
            fail_row_writes: Cell::new(false),
            reads: Cell::new(0),
        }
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Closes the contact at (row, col) from now on.
    pub fn hold(&self, row: usize, col: usize) {
        self.presses.borrow_mut().push(Press {
            row,
            col,
            from: self.now(),
            until: None,
        });
    }

    /// Closes the contact at (row, col) for `length` starting now.
    pub fn pulse(&self, row: usize, col: usize, length: Duration) {
        self.presses.borrow_mut().push(Press {
            row,
            col,
            from: self.now(),
            until: Some(self.now() + length),
        });
    }

    pub fn release_all(&self) {
        self.presses.borrow_mut().clear();
    }

    pub fn active_rows(&self) -> usize {
        self.driven.borrow().iter().filter(|&&v| v).count()
    }

    fn closed(&self, row: usize, col: usize) -> bool {
        let now = self.now();
        self.presses.borrow().iter().any(|p| {
            p.row == row && p.col == col && p.from <= now && p.until.is_none_or(|until| now < until)
        })
    }
}

impl<const R: usize, const C: usize> GpioBusOutput<R> for MatrixSim<R, C> {
    fn write(&self, values: &[bool; R]) -> GpioResult<()> {
        if self.fail_row_writes.get() {
            return Err(GpioError::Io(std::io::ErrorKind::BrokenPipe));
        }
        assert!(
            values.iter().filter(|&&v| v).count() <= 1,
            "more than one row driven at once: {:?}",
            values
        );
        *self.driven.borrow_mut() = *values;
        Ok(())
    }
}

impl<const R: usize, const C: usize> GpioBusInput<C> for MatrixSim<R, C> {
    fn read(&self) -> GpioResult<[bool; C]> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_reads.get() {
            return Err(GpioError::Io(std::io::ErrorKind::TimedOut));
        }
        let driven = *self.driven.borrow();
        let mut values = [false; C];
        for (col, value) in values.iter_mut().enumerate() {
            *value = (0..R).any(|row| driven[row] && self.closed(row, col));
        }
        Ok(values)
    }
}

impl<const R: usize, const C: usize> Delay for MatrixSim<R, C> {
    fn delay(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}
