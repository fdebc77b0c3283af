//! Runtime subscript dispatch.
//!
//! The static API splits element access and slicing into distinct
//! operations (`get`/`at` versus `slice`), selected by the caller's call
//! shape. Embedders forwarding an interpreter-style subscript at runtime
//! don't have a static shape, so the views also accept a [`Subscript`]
//! value and dispatch on it. Multi-dimensional subscripts are rejected
//! outright.

use alloc::vec::Vec;

use crate::chain::ChainView;
use crate::error::Error;
use crate::sequence::Sequence;
use crate::slice::SliceView;

/// A runtime subscript argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscript {
    /// A single, possibly-negative index.
    At(i64),
    /// A slice expression; `None` bounds are open.
    Slice {
        start: Option<i64>,
        stop: Option<i64>,
        step: Option<i64>,
    },
    /// A tuple-style subscript. Always rejected with [`Error::MultiIndex`].
    Multi(Vec<Subscript>),
}

/// What a subscript produced: one element or a derived view.
pub enum Projected<T> {
    Element(T),
    View(SliceView<T>),
}

impl<T> Projected<T> {
    pub fn element(self) -> Option<T> {
        match self {
            Projected::Element(value) => Some(value),
            Projected::View(_) => None,
        }
    }

    pub fn view(self) -> Option<SliceView<T>> {
        match self {
            Projected::Element(_) => None,
            Projected::View(view) => Some(view),
        }
    }
}

impl<T> SliceView<T> {
    pub fn subscript(&self, subscript: Subscript) -> Result<Projected<T>, Error> {
        match subscript {
            Subscript::Multi(_) => Err(Error::MultiIndex),
            Subscript::At(index) => self.at(index).map(Projected::Element),
            Subscript::Slice { start, stop, step } => {
                self.slice(start, stop, step).map(Projected::View)
            }
        }
    }
}

impl<T: 'static> ChainView<T> {
    pub fn subscript(&self, subscript: Subscript) -> Result<Projected<T>, Error> {
        match subscript {
            Subscript::Multi(_) => Err(Error::MultiIndex),
            Subscript::At(index) => self.at(index).map(Projected::Element),
            Subscript::Slice { start, stop, step } => {
                self.slice(start, stop, step).map(Projected::View)
            }
        }
    }
}
