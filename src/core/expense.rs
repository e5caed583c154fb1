//! Expense query helpers.
//!
//! Read-only lookups over recorded expenses and their ledger history. These
//! back the listing screens of a consuming application; none of them affect
//! balances.

use sea_orm::{Condition, QueryOrder, prelude::*};

use crate::{
    entities::{Expense, LedgerEntry, ParticipantShare, expense, ledger_entry, participant_share},
    errors::Result,
};

/// Fetches an expense together with its participant shares.
///
/// Returns `None` if the expense doesn't exist.
pub async fn get_expense_with_shares(
    db: &DatabaseConnection,
    expense_id: i64,
) -> Result<Option<(expense::Model, Vec<participant_share::Model>)>> {
    let Some(expense) = Expense::find_by_id(expense_id).one(db).await? else {
        return Ok(None);
    };

    let shares = ParticipantShare::find()
        .filter(participant_share::Column::ExpenseId.eq(expense_id))
        .order_by_asc(participant_share::Column::Id)
        .all(db)
        .await?;

    Ok(Some((expense, shares)))
}

/// Lists every expense a user is involved in - as payer or as participant -
/// newest first.
pub async fn get_expenses_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<expense::Model>> {
    let share_rows = ParticipantShare::find()
        .filter(participant_share::Column::UserId.eq(user_id))
        .all(db)
        .await?;
    let expense_ids: Vec<i64> = share_rows.iter().map(|share| share.expense_id).collect();

    Expense::find()
        .filter(
            Condition::any()
                .add(expense::Column::PayerId.eq(user_id))
                .add(expense::Column::Id.is_in(expense_ids)),
        )
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists a group's expenses, newest first.
pub async fn get_expenses_for_group(
    db: &DatabaseConnection,
    group_id: &str,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::GroupId.eq(group_id))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Raw entry history between two users from `user_id`'s side, newest first.
///
/// Settlements are distinguishable from expense-derived debt by entry kind.
pub async fn get_entries_between(
    db: &DatabaseConnection,
    user_id: &str,
    counterparty_id: &str,
) -> Result<Vec<ledger_entry::Model>> {
    LedgerEntry::find()
        .filter(ledger_entry::Column::UserId.eq(user_id))
        .filter(ledger_entry::Column::CounterpartyId.eq(counterparty_id))
        .order_by_desc(ledger_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::EntryKind;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_get_expense_with_shares() -> Result<()> {
        let (db, ledger) = setup_test_db_and_ledger().await?;

        let recorded = ledger
            .record_expense(test_expense("brunch", dec!(45.00), "a", &["a", "b", "c"]))
            .await?;

        let (expense, shares) = get_expense_with_shares(&db, recorded.expense.id)
            .await?
            .unwrap();
        assert_eq!(expense, recorded.expense);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares, recorded.shares);

        assert!(get_expense_with_shares(&db, 999).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_expenses_for_user_covers_both_roles() -> Result<()> {
        let (db, ledger) = setup_test_db_and_ledger().await?;

        // b participates without paying, pays one, and is absent from one
        ledger
            .record_expense(test_expense("first", dec!(20.00), "a", &["a", "b"]))
            .await?;
        ledger
            .record_expense(test_expense("second", dec!(30.00), "b", &["a", "c"]))
            .await?;
        ledger
            .record_expense(test_expense("third", dec!(40.00), "a", &["a", "c"]))
            .await?;

        let expenses = get_expenses_for_user(&db, "b").await?;
        let descriptions: Vec<&str> = expenses
            .iter()
            .map(|expense| expense.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["second", "first"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_expenses_for_group() -> Result<()> {
        let (db, ledger) = setup_test_db_and_ledger().await?;

        let mut in_group = test_expense("shared flat", dec!(90.00), "a", &["a", "b"]);
        in_group.group_id = Some("flat".to_string());
        ledger.record_expense(in_group).await?;
        ledger
            .record_expense(test_expense("private", dec!(10.00), "a", &["a", "b"]))
            .await?;

        let expenses = get_expenses_for_group(&db, "flat").await?;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "shared flat");

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_between_shows_kinds_newest_first() -> Result<()> {
        let (db, ledger) = setup_test_db_and_ledger().await?;

        ledger
            .record_expense(test_expense("dinner", dec!(50.00), "a", &["a", "b"]))
            .await?;
        ledger.settle("b", "a", dec!(25.00)).await?;

        let history = get_entries_between(&db, "b", "a").await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, EntryKind::Settlement);
        assert_eq!(history[0].amount, dec!(25.00));
        assert_eq!(history[1].kind, EntryKind::Expense);
        assert_eq!(history[1].amount, dec!(-25.00));

        // Nothing recorded between b and c
        assert!(get_entries_between(&db, "b", "c").await?.is_empty());

        Ok(())
    }
}
