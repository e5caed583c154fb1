//! Core business logic - framework-agnostic ledger operations.
//!
//! The split allocator ([`allocate`]) turns an expense total into exact
//! per-participant shares; the balance ledger ([`ledger`]) persists expenses
//! and their mirrored entry pairs and exposes balance reads and settlement;
//! [`balance`] holds the derivation fold and the pairwise state view;
//! [`expense`] and [`report`] provide the query and summary layer.

pub mod allocate;
pub mod balance;
pub mod expense;
pub mod ledger;
pub mod report;
