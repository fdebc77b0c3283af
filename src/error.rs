//! Error types for the view engine.
//!
//! Every failure is terminal for the operation that raised it: no retries,
//! no partial results. Staleness (`LengthChanged`) is a correctness signal,
//! not a transient fault, so it always surfaces to the caller.

/// Failure kinds raised by views, builders, and subscript dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The value carried by a chain marker cannot be indexed.
    #[error("'{type_name}' is not a sequence and cannot be chained")]
    NotASequence { type_name: &'static str },

    /// The value carried by a chain marker cannot be iterated.
    #[error("'{type_name}' is not iterable and cannot be chained")]
    NotIterable { type_name: &'static str },

    /// A tuple-style subscript was supplied.
    #[error("multi-indices are not supported")]
    MultiIndex,

    /// A chain marker carried explicit bounds instead of the fully open form.
    #[error("chain markers must leave their bounds open")]
    InvalidChainSyntax,

    /// A source's length at access time differs from the snapshot taken when
    /// the view was constructed.
    #[error("length of underlying sequence has changed")]
    LengthChanged,

    /// A normalized index fell outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: i64, len: usize },

    /// A slice step of zero was requested.
    #[error("slice step cannot be zero")]
    ZeroStep,
}
