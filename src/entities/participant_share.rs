//! Participant share entity - One participant's portion of an expense.
//!
//! The `is_settled` flag is informational display state; the authoritative
//! settlement state is always derived from the ledger entries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Participant share database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participant_shares")]
pub struct Model {
    /// Unique identifier for the share row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Expense this share belongs to
    pub expense_id: i64,
    /// Participant user id
    pub user_id: String,
    /// Amount this participant owes for the expense, zero or more
    pub share: Decimal,
    /// Display-only settled marker, never consulted by balance derivation
    pub is_settled: bool,
}

/// Defines relationships between `ParticipantShare` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each share row belongs to one expense
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
