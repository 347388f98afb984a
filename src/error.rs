//! The crate-wide error taxonomy.
//!
//! Every fallible operation in this crate returns [`Result`] with one of the
//! variants below. The computation is pure and deterministic, so none of these
//! are worth retrying: a failed analysis for one `(length, feedback)` pair is
//! simply reported and aborted, leaving other analyses unaffected.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A state of the wrong bit-width was presented to the transition model
    /// or to a feedback function.
    #[error("invalid state length: expected {expected} bits, got {actual}")]
    InvalidStateLength { expected: usize, actual: usize },

    /// The supplied feedback function failed to produce a valid single bit.
    #[error("feedback function error: {reason}")]
    FeedbackFunction { reason: String },

    /// The requested register length exceeds the engine's tractability
    /// ceiling (exhaustive 2^n enumeration would be infeasible).
    #[error("register length {len} is not supported (must be in 1..={max})")]
    UnsupportedRegisterLength { len: usize, max: usize },

    /// A textual feedback expression is malformed.
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// A textual feedback expression references a bit outside the register.
    #[error("bit index {index} out of range for register length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A post-decomposition invariant check failed. This indicates a bug in
    /// the engine, never a bad input.
    #[error("internal consistency check failed: {detail}")]
    InternalConsistency { detail: String },
}

impl Error {
    pub(crate) fn feedback(reason: impl Into<String>) -> Self {
        Error::FeedbackFunction {
            reason: reason.into(),
        }
    }
}
