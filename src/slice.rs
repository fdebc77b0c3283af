//! Strided sub-range views over a single sequence.

use alloc::rc::Rc;

use crate::error::Error;
use crate::sequence::{Elements, Sequence, normalize_index};

/// A normalized `(start, stop, step)` triple.
///
/// `start` and `stop` are absolute positions in the source; with a negative
/// step, `stop` may be `-1`, meaning "past the front". The triple alone
/// determines how many elements the slice yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SliceSpec {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl SliceSpec {
    /// Resolve requested bounds against a length.
    ///
    /// Matches CPython's `slice.indices`: omitted bounds default to the
    /// relevant end for the step direction, negative bounds count from the
    /// end, and out-of-range bounds clamp rather than fail. Only a zero
    /// step is an error.
    pub(crate) fn resolve(
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
        len: usize,
    ) -> Result<Self, Error> {
        let len = len as i64;
        let step = step.unwrap_or(1);
        if step == 0 {
            return Err(Error::ZeroStep);
        }
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let resolve_bound = |bound: Option<i64>, default: i64| match bound {
            None => default,
            Some(b) if b < 0 => (b + len).max(lower),
            Some(b) => b.min(upper),
        };
        let start = resolve_bound(start, if step > 0 { lower } else { upper });
        let stop = resolve_bound(stop, if step > 0 { upper } else { lower });
        Ok(SliceSpec { start, stop, step })
    }

    /// Number of indices visited stepping from `start` toward `stop`.
    pub(crate) fn count(&self) -> usize {
        step_count(self.start, self.stop, self.step)
    }
}

/// Closed-form count of `start, start + step, ...` strictly before `stop`
/// (after `stop`, for negative steps).
pub(crate) fn step_count(start: i64, stop: i64, step: i64) -> usize {
    debug_assert_ne!(step, 0);
    if step > 0 {
        if stop > start {
            ((stop - start - 1) / step + 1) as usize
        } else {
            0
        }
    } else if start > stop {
        ((start - stop - 1) / -step + 1) as usize
    } else {
        0
    }
}

/// A read-only strided sub-range of one underlying sequence.
///
/// The view holds a shared reference to its source and a snapshot of the
/// source's length. Bounds are normalized once, at construction; accesses
/// revalidate the snapshot lazily and fail with [`Error::LengthChanged`]
/// if the source has grown or shrunk since.
pub struct SliceView<T> {
    source: Rc<dyn Sequence<T>>,
    spec: SliceSpec,
    len: usize,
    source_len: usize,
}

impl<T> SliceView<T> {
    /// Build a view of `source` bounded by `start..stop` with `step`.
    ///
    /// Bounds follow slice-normalization semantics: `None` means open,
    /// negative values count from the end, and out-of-range values clamp.
    /// A `step` of `None` defaults to 1; zero is [`Error::ZeroStep`].
    pub fn new(
        source: Rc<dyn Sequence<T>>,
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    ) -> Result<Self, Error> {
        let source_len = source.len();
        let spec = SliceSpec::resolve(start, stop, step, source_len)?;
        Ok(Self::from_spec(source, spec, source_len))
    }

    /// `spec` must already be resolved against `source_len`, with every
    /// visited index inside `[0, source_len)`.
    fn from_spec(source: Rc<dyn Sequence<T>>, spec: SliceSpec, source_len: usize) -> Self {
        let len = spec.count();
        tracing::trace!(
            start = spec.start,
            stop = spec.stop,
            step = spec.step,
            len,
            "slice view constructed"
        );
        SliceView {
            source,
            spec,
            len,
            source_len,
        }
    }

    /// The underlying sequence this view projects.
    pub fn source(&self) -> &Rc<dyn Sequence<T>> {
        &self.source
    }

    /// Re-slice this view, folding both slices into a single view over the
    /// original source.
    ///
    /// The requested bounds are resolved against this view's length, then
    /// composed arithmetically with the view's own bounds. The result is
    /// always one level deep relative to the true source, never a view of
    /// a view. The folded triple is taken as-is rather than re-clamped:
    /// clamping would misread a composed `stop` that legitimately runs past
    /// the front of the source (negative step reaching index 0).
    pub fn slice(
        &self,
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    ) -> Result<SliceView<T>, Error> {
        self.check_source()?;
        let local = SliceSpec::resolve(start, stop, step, self.len)?;
        let folded = SliceSpec {
            start: self.spec.start + local.start * self.spec.step,
            stop: self.spec.start + local.stop * self.spec.step,
            step: self.spec.step * local.step,
        };
        Ok(Self::from_spec(
            self.source.clone(),
            folded,
            self.source_len,
        ))
    }

    /// Iterate the elements this view projects.
    pub fn iter(&self) -> Elements<'_, T> {
        Elements::new(self)
    }

    fn check_source(&self) -> Result<(), Error> {
        let current = self.source.len();
        if current != self.source_len {
            tracing::debug!(
                snapshot = self.source_len,
                current,
                "source length changed under slice view"
            );
            return Err(Error::LengthChanged);
        }
        Ok(())
    }
}

impl<T> Clone for SliceView<T> {
    fn clone(&self) -> Self {
        SliceView {
            source: self.source.clone(),
            spec: self.spec,
            len: self.len,
            source_len: self.source_len,
        }
    }
}

impl<T> Sequence<T> for SliceView<T> {
    /// Stored at construction; never revalidates.
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Result<T, Error> {
        self.check_source()?;
        if index >= self.len {
            return Err(Error::OutOfRange {
                index: index as i64,
                len: self.len,
            });
        }
        let actual = self.spec.start + index as i64 * self.spec.step;
        self.source.get(actual as usize)
    }

    // Staleness is reported ahead of index problems.
    fn at(&self, index: i64) -> Result<T, Error> {
        self.check_source()?;
        self.get(normalize_index(index, self.len)?)
    }
}
