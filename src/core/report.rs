//! Spending summaries.
//!
//! Aggregations over a user's own shares, backing dashboard-style category
//! and month-by-month charts. A user's spend on an expense is their allocated
//! share, not the expense total, so summaries add up across participants.

use std::collections::{BTreeMap, HashMap};

use sea_orm::prelude::*;

use crate::{
    entities::{Category, ParticipantShare, participant_share},
    errors::Result,
};

/// Total of the user's shares per spending category.
pub async fn category_totals(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<HashMap<Category, Decimal>> {
    let mut totals: HashMap<Category, Decimal> = HashMap::new();
    for (share, expense) in shares_with_expenses(db, user_id).await? {
        totals
            .entry(expense.category)
            .and_modify(|total| *total += share.share)
            .or_insert(share.share);
    }
    Ok(totals)
}

/// Total of the user's shares per calendar month (`YYYY-MM`), oldest first.
pub async fn monthly_totals(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<BTreeMap<String, Decimal>> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for (share, expense) in shares_with_expenses(db, user_id).await? {
        let month = expense.created_at.format("%Y-%m").to_string();
        totals
            .entry(month)
            .and_modify(|total| *total += share.share)
            .or_insert(share.share);
    }
    Ok(totals)
}

/// The user's share rows joined with their expenses.
async fn shares_with_expenses(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<(participant_share::Model, crate::entities::ExpenseModel)>> {
    let rows = ParticipantShare::find()
        .filter(participant_share::Column::UserId.eq(user_id))
        .find_also_related(crate::entities::Expense)
        .all(db)
        .await?;

    // The foreign key is enforced at write time, so the expense side of the
    // join is always present.
    Ok(rows
        .into_iter()
        .filter_map(|(share, expense)| expense.map(|expense| (share, expense)))
        .collect())
}
