//! Recoverable failures of the IR layer.
//!
//! Only allocation can fail recoverably. Broken invariants (kind mismatch,
//! missing required child) panic instead.

use thiserror::Error;

/// Allocation failure, reported to the nearest pass boundary.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AllocError {
    #[error("node limit of {limit} reached")]
    NodeLimit { limit: usize },
    #[error("out of memory while growing {what}")]
    OutOfMemory { what: &'static str },
    #[error("{what} index {index} does not fit in 32 bits")]
    IndexOverflow { what: &'static str, index: usize },
    #[error("child list of {len} nodes exceeds maximum of {max}")]
    ListTooLong { len: usize, max: usize },
}
