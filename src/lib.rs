//! `SplitLedger` - the balance/ledger core of a shared-expense tracker
//!
//! This crate implements the bookkeeping heart of a "who owes whom" system:
//! splitting an expense total into exact per-participant shares, recording the
//! resulting debts as mirrored pairs of signed ledger entries, deriving net
//! per-counterparty balances on read, and settling outstanding balances with
//! offsetting entries. Authentication, friend/group management, and transport
//! concerns live in the consuming application, which calls into this crate.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions, // Common pattern in Rust
    clippy::missing_errors_doc,      // Will add gradually
    clippy::missing_panics_doc,      // Will add gradually
)]

/// Configuration management for database settings
pub mod config;
/// Core business logic - split allocation, ledger operations, and reporting
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Notification channel abstraction for expense push messages
pub mod notify;

#[cfg(test)]
pub mod test_utils;
