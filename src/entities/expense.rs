//! Expense entity - Represents a single real-world outlay.
//!
//! An expense is created atomically with its participant shares and derived
//! ledger entries, and is immutable afterwards. The invariant "participant
//! shares sum exactly to `amount`" is guaranteed by the split allocator
//! before anything is persisted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Spending category for an expense.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Category {
    /// Groceries, restaurants, takeout
    #[sea_orm(string_value = "Food")]
    Food,
    /// Transport, trips, accommodation
    #[sea_orm(string_value = "Travel")]
    Travel,
    /// Rent, utilities, subscriptions
    #[sea_orm(string_value = "Bills")]
    Bills,
    /// General purchases
    #[sea_orm(string_value = "Shopping")]
    Shopping,
    /// Events, streaming, going out
    #[sea_orm(string_value = "Entertainment")]
    Entertainment,
    /// Anything that doesn't fit the above
    #[default]
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable description of the outlay
    pub description: String,
    /// Total amount paid, always positive
    pub amount: Decimal,
    /// Spending category
    pub category: Category,
    /// User who fronted the money
    pub payer_id: String,
    /// Group this expense was logged under, if any
    pub group_id: Option<String>,
    /// When the expense was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense owns one share row per participant
    #[sea_orm(has_many = "super::participant_share::Entity")]
    ParticipantShare,
    /// Ledger entries derived from this expense (traceability only)
    #[sea_orm(has_many = "super::ledger_entry::Entity")]
    LedgerEntry,
}

impl Related<super::participant_share::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParticipantShare.def()
    }
}

impl Related<super::ledger_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
