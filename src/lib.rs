#![no_std]
#![deny(unsafe_code)]

//! Seqview - lazy, composable views over indexable sequences
//!
//! # Overview
//!
//! Seqview provides read-only projections over anything that can report a
//! length and hand out elements by index: strided sub-range views,
//! concatenations of heterogeneous sources, and a comprehension-style
//! builder for mixing literal elements with spliced-in sequences. Views
//! never copy the underlying data, and they notice when a source has been
//! mutated under them: every access rechecks the source's length against
//! a snapshot taken at construction and fails rather than returning
//! possibly-inconsistent data.
//!
//! Views are themselves sequences, so they compose. Re-slicing a slice
//! folds the bounds arithmetically into a single view over the original
//! source; slicing a chain wraps the chain. The whole engine is
//! single-threaded and synchronous, with sources shared through `Rc`.
//!
//! # Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use seqview::{Sequence, SliceView, ChainView};
//!
//! // A strided window: every second element of 2..9.
//! let data = Rc::new(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! let view = SliceView::new(data.clone(), Some(2), Some(9), Some(2)).unwrap();
//! assert_eq!(view.len(), 4);
//! assert_eq!(view.get(1).unwrap(), 4);
//! assert_eq!(view.at(-1).unwrap(), 8);
//!
//! // Chain two sources, then slice the concatenation.
//! let more = Rc::new(vec![100, 101]);
//! let chain = ChainView::new([
//!     data as Rc<dyn Sequence<i32>>,
//!     more as Rc<dyn Sequence<i32>>,
//! ]);
//! assert_eq!(chain.len(), 12);
//! assert_eq!(chain.get(10).unwrap(), 100);
//! let tail = chain.slice(Some(-3), None, None).unwrap();
//! assert_eq!(tail.iter().collect::<Result<Vec<_>, _>>().unwrap(), [9, 100, 101]);
//! ```
//!
//! # Staleness
//!
//! Sources that keep being mutated are shared as `Rc<RefCell<...>>`. A
//! view constructed over such a source keeps working while the length is
//! unchanged and fails with [`Error::LengthChanged`] on the first access
//! after it grows or shrinks:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use seqview::{Error, Sequence, SliceView};
//!
//! let source = Rc::new(RefCell::new(vec![1, 2, 3]));
//! let view = SliceView::new(source.clone(), None, None, None).unwrap();
//! assert_eq!(view.get(0).unwrap(), 1);
//!
//! source.borrow_mut().push(4);
//! assert_eq!(view.get(0), Err(Error::LengthChanged));
//! ```

extern crate alloc;

mod chain;
mod comprehension;
mod display;
mod error;
mod range;
mod sequence;
mod slice;
mod subscript;

pub use chain::ChainView;
pub use comprehension::{ChainIter, Item, Marker, build_iter, build_view};
pub use error::Error;
pub use range::{IntRange, IntRangeIter, RangeError};
pub use sequence::{Elements, Sequence};
pub use slice::SliceView;
pub use subscript::{Projected, Subscript};
