//! An inclusive integer range that plugs into the view engine.
//!
//! Alongside the classic half-open `(start, stop, step)` form, the
//! constructors cover the inclusive spellings `(first, ..., last)`,
//! `(first, ..., last, step)`, and `(first, second, ..., last)` with the
//! step inferred from the gap. The range is a [`Sequence`], so it chains
//! and slices like any other source.

use core::fmt;

use crate::error::Error;
use crate::sequence::Sequence;
use crate::slice::step_count;

/// Validation failures for range construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("range step cannot be zero")]
    ZeroStep,

    /// An inclusive range runs downward but the step is positive.
    #[error("expected negative step for {first}, ..., {last}")]
    StepMustBeNegative { first: i64, last: i64 },

    /// An inclusive range runs upward but the step is negative.
    #[error("expected positive step for {first}, ..., {last}")]
    StepMustBePositive { first: i64, last: i64 },
}

/// An arithmetic progression of `i64`, stored as a normalized half-open
/// `(start, stop, step)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    start: i64,
    stop: i64,
    step: i64,
}

impl IntRange {
    /// Classic half-open form.
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self, RangeError> {
        if step == 0 {
            return Err(RangeError::ZeroStep);
        }
        Ok(IntRange { start, stop, step })
    }

    /// `(first, ..., last)`: inclusive of both ends, step 1.
    pub fn to(first: i64, last: i64) -> Result<Self, RangeError> {
        Self::to_by(first, last, 1)
    }

    /// `(first, ..., last, step)`: inclusive of `first` and, when the step
    /// lands on it, of `last`. The step's sign must agree with the
    /// ordering of the two ends.
    pub fn to_by(first: i64, last: i64, step: i64) -> Result<Self, RangeError> {
        if step == 0 {
            return Err(RangeError::ZeroStep);
        }
        let stop = if step > 0 {
            let stop = last + 1;
            if stop < first {
                return Err(RangeError::StepMustBeNegative { first, last });
            }
            stop
        } else {
            let stop = last - 1;
            if stop > first {
                return Err(RangeError::StepMustBePositive { first, last });
            }
            stop
        };
        Ok(IntRange {
            start: first,
            stop,
            step,
        })
    }

    /// `(first, second, ..., last)`: step inferred as `second - first`.
    pub fn spaced(first: i64, second: i64, last: i64) -> Result<Self, RangeError> {
        Self::to_by(first, last, second - first)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn len(&self) -> usize {
        step_count(self.start, self.stop, self.step)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> IntRangeIter {
        IntRangeIter {
            next: self.start,
            remaining: self.len(),
            step: self.step,
        }
    }

    fn last(&self) -> Option<i64> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        Some(self.start + (len as i64 - 1) * self.step)
    }
}

impl Sequence<i64> for IntRange {
    fn len(&self) -> usize {
        IntRange::len(self)
    }

    fn get(&self, index: usize) -> Result<i64, Error> {
        if index >= IntRange::len(self) {
            return Err(Error::OutOfRange {
                index: index as i64,
                len: IntRange::len(self),
            });
        }
        Ok(self.start + index as i64 * self.step)
    }
}

/// Renders the inclusive form, `range(first, ..., last[, step=k])`,
/// falling back to the half-open triple when the range is empty.
impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last() {
            Some(last) if self.step == 1 => write!(f, "range({}, ..., {})", self.start, last),
            Some(last) => write!(f, "range({}, ..., {}, step={})", self.start, last, self.step),
            None if self.step == 1 => write!(f, "range({}, {})", self.start, self.stop),
            None => write!(f, "range({}, {}, {})", self.start, self.stop, self.step),
        }
    }
}

pub struct IntRangeIter {
    next: i64,
    remaining: usize,
    step: i64,
}

impl Iterator for IntRangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.next;
        self.next += self.step;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IntRangeIter {}

impl IntoIterator for IntRange {
    type Item = i64;
    type IntoIter = IntRangeIter;

    fn into_iter(self) -> IntRangeIter {
        self.iter()
    }
}

impl IntoIterator for &IntRange {
    type Item = i64;
    type IntoIter = IntRangeIter;

    fn into_iter(self) -> IntRangeIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn inclusive_of_both_ends() {
        let r = IntRange::to(2, 8).unwrap();
        assert_eq!(r.len(), 7);
        assert_eq!(r.iter().collect::<Vec<_>>(), [2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn inferred_step() {
        let r = IntRange::spaced(0, 3, 9).unwrap();
        assert_eq!(r.iter().collect::<Vec<_>>(), [0, 3, 6, 9]);
        // last is kept only when the step lands on it
        let r = IntRange::spaced(0, 4, 9).unwrap();
        assert_eq!(r.iter().collect::<Vec<_>>(), [0, 4, 8]);
    }

    #[test]
    fn downward() {
        let r = IntRange::to_by(9, 1, -2).unwrap();
        assert_eq!(r.iter().collect::<Vec<_>>(), [9, 7, 5, 3, 1]);
    }

    #[test]
    fn direction_validation() {
        assert_eq!(
            IntRange::to(5, 3),
            Err(RangeError::StepMustBeNegative { first: 5, last: 3 })
        );
        assert_eq!(
            IntRange::to_by(1, 5, -1),
            Err(RangeError::StepMustBePositive { first: 1, last: 5 })
        );
        assert_eq!(IntRange::spaced(1, 1, 5), Err(RangeError::ZeroStep));
        // one-off shrink to an empty range is fine, not a direction error
        assert_eq!(IntRange::to(5, 4).unwrap().len(), 0);
    }

    #[test]
    fn sequence_access() {
        let r = IntRange::to_by(2, 8, 2).unwrap();
        assert_eq!(Sequence::len(&r), 4);
        assert_eq!(r.get(3).unwrap(), 8);
        assert_eq!(r.at(-1).unwrap(), 8);
        assert_eq!(
            r.get(4),
            Err(Error::OutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(IntRange::to(2, 8).unwrap().to_string(), "range(2, ..., 8)");
        assert_eq!(
            IntRange::to_by(2, 8, 2).unwrap().to_string(),
            "range(2, ..., 8, step=2)"
        );
        assert_eq!(IntRange::to(5, 4).unwrap().to_string(), "range(5, 5)");
    }
}
