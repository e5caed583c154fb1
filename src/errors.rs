//! Unified error types and result handling for the ledger core.
//!
//! Validation failures (`InvalidAmount`, `EmptyParticipants`, `ShareMismatch`)
//! are deterministic and carry the offending value so callers can correct the
//! request. `AtomicWriteFailure` is the only retryable condition: it means the
//! storage layer refused a batch write and guarantees nothing was committed.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A monetary amount was zero or negative.
    #[error("invalid amount {amount}: monetary values must be positive")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// An expense split was requested with no participants.
    #[error("an expense split requires at least one participant")]
    EmptyParticipants,

    /// Explicit shares were supplied but do not reconcile to the expense total.
    #[error("explicit shares sum to {share_sum} but the expense total is {total}")]
    ShareMismatch {
        /// The expense total the shares were checked against
        total: Decimal,
        /// What the supplied shares actually sum to
        share_sum: Decimal,
    },

    /// The storage layer failed to commit a mirrored-pair batch. The
    /// transaction was rolled back, so no entries were written and the whole
    /// operation may be retried.
    #[error("ledger write was not committed (no entries persisted): {0}")]
    AtomicWriteFailure(#[source] sea_orm::DbErr),

    /// Database error on a read path.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

// Convenience `Result` type
/// Crate-wide result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
