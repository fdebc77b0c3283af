//! Concatenation views over an ordered list of sequences.

use alloc::rc::Rc;
use smallvec::SmallVec;

use crate::error::Error;
use crate::sequence::{Elements, Sequence};
use crate::slice::SliceView;

/// A read-only concatenation of an ordered list of sequences.
///
/// Parts may be raw containers or other views, in any mix. The total
/// length is the sum of the part lengths at construction time; lookups
/// recompute that sum and fail with [`Error::LengthChanged`] when any
/// part has been mutated since.
pub struct ChainView<T> {
    parts: SmallVec<[Rc<dyn Sequence<T>>; 4]>,
    len: usize,
}

impl<T> ChainView<T> {
    pub fn new<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Rc<dyn Sequence<T>>>,
    {
        let parts: SmallVec<[Rc<dyn Sequence<T>>; 4]> = parts.into_iter().collect();
        let len = parts.iter().map(|p| p.len()).sum();
        tracing::trace!(parts = parts.len(), len, "chain view constructed");
        ChainView { parts, len }
    }

    /// The sequences this view concatenates, in order.
    pub fn parts(&self) -> &[Rc<dyn Sequence<T>>] {
        &self.parts
    }

    /// Locate the part containing global `index`.
    ///
    /// Returns the `(part, local_index)` pair, or `None` when `index` is
    /// not in `[0, len)`. The scan always walks every part: the running
    /// total doubles as the staleness check, so one lookup costs one
    /// length recomputation regardless of where the hit lands. Zero-length
    /// parts never match because their interval is empty.
    pub fn find_position(&self, index: usize) -> Result<Option<(usize, usize)>, Error> {
        if index >= self.len {
            return Ok(None);
        }
        let mut hit = None;
        let mut offset = 0usize;
        for (i, part) in self.parts.iter().enumerate() {
            let end = offset + part.len();
            if offset <= index && index < end {
                hit = Some((i, index - offset));
            }
            offset = end;
        }
        if offset != self.len {
            tracing::debug!(
                snapshot = self.len,
                current = offset,
                "part length changed under chain view"
            );
            return Err(Error::LengthChanged);
        }
        Ok(hit)
    }

    /// Slice this chain.
    ///
    /// A chain's elements are not uniformly strided, so the result is
    /// always a [`SliceView`] wrapping the chain; the slice is never
    /// folded into the part list.
    pub fn slice(
        &self,
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    ) -> Result<SliceView<T>, Error>
    where
        T: 'static,
    {
        SliceView::new(Rc::new(self.clone()), start, stop, step)
    }

    /// Iterate the concatenated elements.
    pub fn iter(&self) -> Elements<'_, T> {
        Elements::new(self)
    }
}

impl<T> Clone for ChainView<T> {
    fn clone(&self) -> Self {
        ChainView {
            parts: self.parts.clone(),
            len: self.len,
        }
    }
}

impl<T> Sequence<T> for ChainView<T> {
    /// Stored at construction; never revalidates.
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Result<T, Error> {
        match self.find_position(index)? {
            Some((part, local)) => self.parts[part].get(local),
            None => Err(Error::OutOfRange {
                index: index as i64,
                len: self.len,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn chain(parts: Vec<Vec<i32>>) -> ChainView<i32> {
        ChainView::new(
            parts
                .into_iter()
                .map(|p| Rc::new(p) as Rc<dyn Sequence<i32>>),
        )
    }

    #[test]
    fn positions_span_parts() {
        let c = chain(vec![vec![1, 2], vec![3], vec![4, 5]]);
        assert_eq!(c.len(), 5);
        assert_eq!(c.find_position(0).unwrap(), Some((0, 0)));
        assert_eq!(c.find_position(1).unwrap(), Some((0, 1)));
        assert_eq!(c.find_position(2).unwrap(), Some((1, 0)));
        assert_eq!(c.find_position(4).unwrap(), Some((2, 1)));
        assert_eq!(c.find_position(5).unwrap(), None);
    }

    #[test]
    fn zero_length_parts_are_skipped() {
        let c = chain(vec![vec![], vec![7], vec![], vec![8]]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.find_position(0).unwrap(), Some((1, 0)));
        assert_eq!(c.find_position(1).unwrap(), Some((3, 0)));
    }

    #[test]
    fn empty_chain() {
        let c = chain(vec![]);
        assert_eq!(c.len(), 0);
        assert!(c.is_empty());
        assert_eq!(c.find_position(0).unwrap(), None);
    }
}
