//! Error types for the conditions that cannot be expressed as an
//! [`Edge`](crate::edge::Edge).
//!
//! `Error`/`Overflow` edges cover `ManagerMismatch`, `Overflow`, and
//! `Underflow`/`IllegalArgument` for every edge-producing operator —
//! they are first-class values, not exceptions. What remains are the
//! two conditions that are distinct from that:
//! dump/restore stream failures, and fatal contract violations that
//! leave the manager unusable.

use thiserror::Error;

/// Failure reading a dump stream back into a manager (
/// "restore returns a count of 0" on malformed input; this type is the
/// richer diagnostic a caller can match on before falling back to that
/// zero-count contract).
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("I/O error while reading dump stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dump stream: {0}")]
    Malformed(&'static str),
    #[error("edge token referenced internal node {index} before it was read")]
    DanglingReference { index: u32 },
}

/// Failure writing a dump stream.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error while writing dump stream: {0}")]
    Io(#[from] std::io::Error),
}
