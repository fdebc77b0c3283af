//! Building chained sequences from mixed argument lists.
//!
//! An argument list is an ordered mix of literal elements and chain
//! markers, where a marker splices an entire source in place:
//!
//! ```
//! use seqview::{build_view, Item, Marker, Sequence};
//!
//! let view = build_view(vec![
//!     Item::Chain(Marker::sequence(vec![0, 1, 2])),
//!     Item::Value(3),
//!     Item::Value(4),
//! ])
//! .unwrap();
//! assert_eq!(view.len(), 5);
//! assert_eq!(view.get(4).unwrap(), 4);
//! ```
//!
//! A single forward pass partitions the list into alternating groups:
//! runs of consecutive literals collapse into one materialized group, and
//! each marker becomes its own group. [`build_view`] turns the groups
//! into a [`ChainView`]; [`build_iter`] concatenates them into a one-shot
//! iterator and also accepts forward-only (non-indexable) sources.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

use crate::chain::ChainView;
use crate::error::Error;
use crate::sequence::Sequence;

/// One argument in a comprehension-style list.
pub enum Item<T> {
    /// A single literal element.
    Value(T),
    /// Splice a whole source in place.
    Chain(Marker<T>),
}

/// A chain marker: the payload to splice, plus the marker's slice bounds.
///
/// Only the fully open form is valid; [`bounded`](Marker::with_bounds)
/// markers exist so callers translating a sliced marker syntax can let
/// the builders reject it uniformly.
pub struct Marker<T> {
    start: Option<i64>,
    stop: Option<i64>,
    payload: Payload<T>,
    type_name: &'static str,
}

pub(crate) enum Payload<T> {
    Seq(Rc<dyn Sequence<T>>),
    Iter(Box<dyn Iterator<Item = T>>),
    Value(T),
}

impl<T: 'static> Marker<T> {
    /// Splice an indexable source. Usable by both builders.
    pub fn sequence<S>(source: S) -> Self
    where
        S: Sequence<T> + 'static,
    {
        Self::open(Payload::Seq(Rc::new(source)), any::type_name::<S>())
    }

    /// Splice an already-shared indexable source.
    pub fn shared(source: Rc<dyn Sequence<T>>) -> Self {
        Self::open(Payload::Seq(source), any::type_name::<Rc<dyn Sequence<T>>>())
    }

    /// Splice a forward-only source. Only [`build_iter`] accepts these.
    pub fn iterator<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let type_name = any::type_name::<I>();
        Self::open(Payload::Iter(Box::new(source.into_iter())), type_name)
    }

    /// A bare value in the chain slot. Neither builder accepts it; the
    /// variant exists so a dynamic caller's mistake is reported with the
    /// offending type instead of being unrepresentable.
    pub fn value(value: T) -> Self {
        Self::open(Payload::Value(value), any::type_name::<T>())
    }

    /// Attach explicit bounds to the marker. Both builders reject any
    /// marker whose bounds are not fully open.
    pub fn with_bounds(mut self, start: Option<i64>, stop: Option<i64>) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }

    fn open(payload: Payload<T>, type_name: &'static str) -> Self {
        Marker {
            start: None,
            stop: None,
            payload,
            type_name,
        }
    }

    fn is_open(&self) -> bool {
        self.start.is_none() && self.stop.is_none()
    }
}

enum Group<T> {
    Literal(Vec<T>),
    Chained {
        payload: Payload<T>,
        type_name: &'static str,
    },
}

/// Single forward pass: literals accumulate, each marker flushes the run
/// and stands alone.
fn partition<T: 'static>(items: Vec<Item<T>>) -> Result<Vec<Group<T>>, Error> {
    let mut groups = Vec::new();
    let mut literals = Vec::new();
    for item in items {
        match item {
            Item::Value(value) => literals.push(value),
            Item::Chain(marker) => {
                if !marker.is_open() {
                    return Err(Error::InvalidChainSyntax);
                }
                if !literals.is_empty() {
                    groups.push(Group::Literal(mem::take(&mut literals)));
                }
                groups.push(Group::Chained {
                    payload: marker.payload,
                    type_name: marker.type_name,
                });
            }
        }
    }
    if !literals.is_empty() {
        groups.push(Group::Literal(literals));
    }
    Ok(groups)
}

/// Build a [`ChainView`] from an argument list.
///
/// Every group must be indexable: literal runs materialize as owned
/// parts, and markers must carry a sequence payload. Iterator and bare
/// value payloads fail with [`Error::NotASequence`] naming the type.
pub fn build_view<T>(items: Vec<Item<T>>) -> Result<ChainView<T>, Error>
where
    T: Clone + 'static,
{
    let mut parts: Vec<Rc<dyn Sequence<T>>> = Vec::new();
    for group in partition(items)? {
        match group {
            Group::Literal(values) => parts.push(Rc::new(values)),
            Group::Chained {
                payload: Payload::Seq(seq),
                ..
            } => parts.push(seq),
            Group::Chained { type_name, .. } => return Err(Error::NotASequence { type_name }),
        }
    }
    Ok(ChainView::new(parts))
}

/// Concatenate an argument list into a one-shot iterator.
///
/// Markers may carry indexable or forward-only payloads; a bare value
/// payload fails with [`Error::NotIterable`] naming the type. Validation
/// happens here, eagerly; iteration itself only fails if a spliced view
/// goes stale between pulls, and the first such error fuses the iterator.
pub fn build_iter<T: 'static>(items: Vec<Item<T>>) -> Result<ChainIter<T>, Error> {
    let mut cursors = VecDeque::new();
    for group in partition(items)? {
        cursors.push_back(match group {
            Group::Literal(values) => Cursor::Literal(values.into_iter()),
            Group::Chained {
                payload: Payload::Seq(seq),
                ..
            } => Cursor::Indexed { seq, next: 0 },
            Group::Chained {
                payload: Payload::Iter(iter),
                ..
            } => Cursor::Stream(iter),
            Group::Chained {
                payload: Payload::Value(_),
                type_name,
            } => return Err(Error::NotIterable { type_name }),
        });
    }
    Ok(ChainIter {
        cursors,
        failed: false,
    })
}

enum Cursor<T> {
    Literal(alloc::vec::IntoIter<T>),
    Stream(Box<dyn Iterator<Item = T>>),
    Indexed { seq: Rc<dyn Sequence<T>>, next: usize },
}

/// Iterator returned by [`build_iter`]: groups drain in order, exhausted
/// once. Rebuild it to restart.
pub struct ChainIter<T> {
    cursors: VecDeque<Cursor<T>>,
    failed: bool,
}

impl<T> Iterator for ChainIter<T> {
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let cursor = self.cursors.front_mut()?;
            match cursor {
                Cursor::Literal(iter) => match iter.next() {
                    Some(value) => return Some(Ok(value)),
                    None => {
                        self.cursors.pop_front();
                    }
                },
                Cursor::Stream(iter) => match iter.next() {
                    Some(value) => return Some(Ok(value)),
                    None => {
                        self.cursors.pop_front();
                    }
                },
                Cursor::Indexed { seq, next } => {
                    if *next >= seq.len() {
                        self.cursors.pop_front();
                        continue;
                    }
                    let item = seq.get(*next);
                    *next += 1;
                    if item.is_err() {
                        self.failed = true;
                    }
                    return Some(item);
                }
            }
        }
    }
}

impl<T> FusedIterator for ChainIter<T> {}

impl<T> fmt::Debug for ChainIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainIter")
            .field("groups", &self.cursors.len())
            .field("failed", &self.failed)
            .finish()
    }
}
