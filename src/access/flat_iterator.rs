use super::AccessPattern;
use crate::error::{DenseError, Result};
use std::convert::TryFrom;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Single-pass cursor yielding the buffer offset of each logical element of
/// an `AccessPattern`, in row-major order.
///
/// `next_offset` returns `Ok(Some(offset))` while elements remain,
/// `Ok(None)` once the pattern is exhausted and `Err` on a fault (malformed
/// pattern, offset overflow or, when bounded, an offset past the buffer).
/// Exhaustion and faults are terminal: afterwards the cursor only returns
/// `Ok(None)`. A new cursor must be built for every traversal.
#[derive(Debug)]
pub struct FlatIterator {
    shape: Vec<usize>,
    strides: Vec<isize>,
    base: usize,
    counter: Vec<usize>,
    current: isize,
    bound: Option<usize>,
    state: State,
}

impl FlatIterator {
    pub fn new(pattern: &AccessPattern) -> Self {
        FlatIterator {
            shape: pattern.shape.clone(),
            strides: pattern.strides.clone(),
            base: pattern.offset,
            counter: vec![0; pattern.shape.len()],
            current: 0,
            bound: None,
            state: State::Fresh,
        }
    }

    /// Turns any offset `>= len` into a fault.
    pub fn bounded(mut self, len: usize) -> Self {
        self.bound = Some(len);
        self
    }

    pub fn next_offset(&mut self) -> Result<Option<usize>> {
        match self.state {
            State::Done => return Ok(None),
            State::Fresh => {
                if self.shape.len() != self.strides.len() {
                    return self.fault(DenseError::StrideLengthMismatch {
                        shape: self.shape.len(),
                        strides: self.strides.len(),
                    });
                }
                if self.shape.iter().any(|&dim| dim == 0) {
                    self.state = State::Done;
                    return Ok(None);
                }
                match isize::try_from(self.base) {
                    Ok(base) => self.current = base,
                    Err(_) => return self.fault(DenseError::OffsetOverflow),
                }
                self.state = State::Running;
            }
            State::Running => match self.advance() {
                Some(true) => {}
                Some(false) => {
                    self.state = State::Done;
                    return Ok(None);
                }
                None => return self.fault(DenseError::OffsetOverflow),
            },
        }

        self.emit()
    }

    // Odometer step over the counter, last dimension fastest. `None` on
    // overflow, `Some(false)` once every digit wrapped around.
    fn advance(&mut self) -> Option<bool> {
        for ((digit, dim), stride) in self
            .counter
            .iter_mut()
            .zip(self.shape.iter())
            .zip(self.strides.iter())
            .rev()
        {
            if *digit + 1 < *dim {
                *digit += 1;
                self.current = self.current.checked_add(*stride)?;
                return Some(true);
            }
            let rewind = isize::try_from(*digit).ok()?.checked_mul(*stride)?;
            self.current = self.current.checked_sub(rewind)?;
            *digit = 0;
        }

        Some(false)
    }

    fn emit(&mut self) -> Result<Option<usize>> {
        let offset = match usize::try_from(self.current) {
            Ok(offset) => offset,
            Err(_) => return self.fault(DenseError::OffsetOverflow),
        };
        if let Some(len) = self.bound {
            if offset >= len {
                return self.fault(DenseError::OutOfBounds { offset, len });
            }
        }

        Ok(Some(offset))
    }

    fn fault(&mut self, err: DenseError) -> Result<Option<usize>> {
        self.state = State::Done;
        Err(err)
    }
}

impl Iterator for FlatIterator {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_offset().transpose()
    }
}
