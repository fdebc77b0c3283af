//! Bounded textual previews for views.
//!
//! Purely diagnostic output. The rendered form is not stable and must not
//! be used for equality or hashing.

use alloc::vec::Vec;
use core::fmt;

use crate::chain::ChainView;
use crate::error::Error;
use crate::sequence::Sequence;
use crate::slice::SliceView;

const PREVIEW_ITEMS: usize = 10;
const PREVIEW_HEAD: usize = 5;
const PREVIEW_TAIL: usize = 4;

/// Render `<sequence view N: [..] >`, showing every element up to
/// [`PREVIEW_ITEMS`] and a head/ellipsis/tail split beyond that. A stale
/// source renders a marker instead of failing the formatter.
fn write_preview<T: fmt::Debug>(f: &mut fmt::Formatter<'_>, seq: &dyn Sequence<T>) -> fmt::Result {
    let len = seq.len();
    match preview_items(seq, len) {
        Ok((head, tail)) => {
            write!(f, "<sequence view {len}: [")?;
            write_joined(f, &head, false)?;
            if let Some(tail) = tail {
                write!(f, ", ...")?;
                write_joined(f, &tail, true)?;
            }
            write!(f, "] >")
        }
        Err(_) => write!(f, "<sequence view {len}: <stale> >"),
    }
}

fn write_joined<T: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    leading_sep: bool,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if leading_sep || i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item:?}")?;
    }
    Ok(())
}

fn preview_items<T>(seq: &dyn Sequence<T>, len: usize) -> Result<(Vec<T>, Option<Vec<T>>), Error> {
    let fetch = |range: core::ops::Range<usize>| -> Result<Vec<T>, Error> {
        range.map(|i| seq.get(i)).collect()
    };
    if len <= PREVIEW_ITEMS {
        Ok((fetch(0..len)?, None))
    } else {
        Ok((fetch(0..PREVIEW_HEAD)?, Some(fetch(len - PREVIEW_TAIL..len)?)))
    }
}

impl<T: fmt::Debug> fmt::Display for SliceView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, self)
    }
}

impl<T: fmt::Debug> fmt::Debug for SliceView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, self)
    }
}

impl<T: fmt::Debug> fmt::Display for ChainView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, self)
    }
}

impl<T: fmt::Debug> fmt::Debug for ChainView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_preview(f, self)
    }
}
