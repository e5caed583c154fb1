//! Ledger entry entity - One signed directional monetary fact.
//!
//! An entry states "`user_id`'s balance with `counterparty_id` changed by
//! `amount`": positive means the counterparty owes the owner, negative means
//! the owner owes the counterparty. Entries are always written as mirrored
//! pairs inside one database transaction - for every `(A, B, +x)` there is
//! exactly one `(B, A, -x)` - and are never mutated or deleted. Net balances
//! are a fold over history, never a stored running total.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Distinguishes expense-driven debt from bookkeeping settlement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EntryKind {
    /// Derived from a recorded expense share
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Offsetting pair appended when a debt is paid
    #[sea_orm(string_value = "settlement")]
    Settlement,
}

/// Ledger entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User whose balance this entry belongs to
    pub user_id: String,
    /// The other side of the pairwise balance
    pub counterparty_id: String,
    /// Signed amount; positive = counterparty owes the owner
    pub amount: Decimal,
    /// Originating expense, if this entry was expense-derived
    pub expense_id: Option<i64>,
    /// Expense-derived debt or settlement bookkeeping
    pub kind: EntryKind,
    /// When the entry was appended
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `LedgerEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Weak reference to the originating expense
    #[sea_orm(
        belongs_to = "super::expense::Entity",
        from = "Column::ExpenseId",
        to = "super::expense::Column::Id"
    )]
    Expense,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
