//! Balance ledger - append-only store of mirrored signed entries.
//!
//! Recording an expense appends, for every participant other than the payer,
//! the pair `(payer, participant, +share)` / `(participant, payer, -share)`.
//! Settling a debt appends the same shape of pair tagged as a settlement.
//! Both writes happen inside a single database transaction, so a reader can
//! never observe one side of a pair without the other; a failed commit leaves
//! the ledger untouched. Balances are derived on read by summation, which
//! makes concurrent writes commutative - no cross-request locking is needed.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, Set, TransactionTrait, prelude::*};
use tracing::{info, warn};

use crate::{
    core::{
        allocate::{AllocatedShare, allocate},
        balance,
    },
    entities::{
        LedgerEntry, expense,
        expense::Category,
        ledger_entry::{self, EntryKind},
        participant_share,
    },
    errors::{Error, Result},
    notify::NotificationChannel,
};

/// Request to record a new expense against the ledger.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Human-readable description of the outlay
    pub description: String,
    /// Total amount paid, must be positive
    pub amount: Decimal,
    /// Spending category
    pub category: Category,
    /// User who fronted the money
    pub payer_id: String,
    /// Group to log the expense under, if any
    pub group_id: Option<String>,
    /// Participants in split order; the first absorbs any rounding remainder
    pub participant_ids: Vec<String>,
    /// Custom per-participant amounts; equal split when absent
    pub explicit_shares: Option<HashMap<String, Decimal>>,
}

/// Everything persisted for one recorded expense.
#[derive(Debug, Clone)]
pub struct RecordedExpense {
    /// The expense row
    pub expense: expense::Model,
    /// One share row per participant, in split order
    pub shares: Vec<participant_share::Model>,
    /// The mirrored ledger entry pairs derived from the shares
    pub entries: Vec<ledger_entry::Model>,
}

/// The ledger service: owns a database handle and a notification capability.
///
/// Cheap to share behind the caller's own `Arc`; all methods take `&self`.
pub struct BalanceLedger {
    db: DatabaseConnection,
    notifier: Arc<dyn NotificationChannel>,
}

impl BalanceLedger {
    /// Builds a ledger over `db`, delivering expense notifications through
    /// `notifier`.
    #[must_use]
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn NotificationChannel>) -> Self {
        Self { db, notifier }
    }

    /// Records an expense: allocates shares, then atomically persists the
    /// expense row, its participant shares, and one mirrored entry pair per
    /// participant other than the payer.
    ///
    /// A participant equal to the payer contributes no entries - self-debt is
    /// a no-op, not a zero-amount entry. After the commit, each non-payer
    /// participant is notified on a detached task; notification failures are
    /// logged and swallowed, never surfaced to the caller.
    pub async fn record_expense(&self, new_expense: NewExpense) -> Result<RecordedExpense> {
        let allocated = allocate(
            new_expense.amount,
            &new_expense.participant_ids,
            new_expense.explicit_shares.as_ref(),
        )?;

        let now = chrono::Utc::now();
        let txn = self.db.begin().await.map_err(Error::AtomicWriteFailure)?;

        let expense = expense::ActiveModel {
            description: Set(new_expense.description),
            amount: Set(new_expense.amount),
            category: Set(new_expense.category),
            payer_id: Set(new_expense.payer_id),
            group_id: Set(new_expense.group_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(Error::AtomicWriteFailure)?;

        let mut shares = Vec::with_capacity(allocated.len());
        let mut entries = Vec::with_capacity(allocated.len() * 2);
        for allocated_share in &allocated {
            let share = participant_share::ActiveModel {
                expense_id: Set(expense.id),
                user_id: Set(allocated_share.user_id.clone()),
                share: Set(allocated_share.share),
                is_settled: Set(false),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(Error::AtomicWriteFailure)?;
            shares.push(share);

            // Self-debt is a no-op, not a zero-amount entry.
            if allocated_share.user_id == expense.payer_id {
                continue;
            }

            let pair = append_mirrored_pair(
                &txn,
                &expense.payer_id,
                &allocated_share.user_id,
                allocated_share.share,
                Some(expense.id),
                EntryKind::Expense,
                now,
            )
            .await?;
            entries.extend(pair);
        }

        txn.commit().await.map_err(Error::AtomicWriteFailure)?;

        info!(
            expense_id = expense.id,
            payer_id = %expense.payer_id,
            amount = %expense.amount,
            participants = shares.len(),
            "recorded expense"
        );

        self.dispatch_notifications(&expense, &allocated);

        Ok(RecordedExpense {
            expense,
            shares,
            entries,
        })
    }

    /// Derives the user's net balance against every counterparty by summing
    /// their ledger entries.
    ///
    /// Positive means the counterparty owes `user_id`; negative means
    /// `user_id` owes the counterparty. Pairs whose aggregate magnitude is
    /// below one cent are omitted as settled. Point-in-time snapshot read: it
    /// reflects everything committed before the call and takes no locks.
    pub async fn net_balance(&self, user_id: &str) -> Result<HashMap<String, Decimal>> {
        let entries = LedgerEntry::find()
            .filter(ledger_entry::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        Ok(balance::net_from_entries(&entries))
    }

    /// Settles (part of) the balance between `user_id` and `counterparty_id`
    /// by appending a mirrored settlement pair: `user_id` pays `amount`
    /// toward what they owe.
    ///
    /// The amount is not capped at the outstanding balance - paying more than
    /// owed simply flips the sign of the pair's balance. Settlement uses the
    /// same invariant-preserving mirrored append as expense recording; only
    /// the entry kind differs.
    pub async fn settle(
        &self,
        user_id: &str,
        counterparty_id: &str,
        amount: Decimal,
    ) -> Result<Vec<ledger_entry::Model>> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }

        let txn = self.db.begin().await.map_err(Error::AtomicWriteFailure)?;
        let pair = append_mirrored_pair(
            &txn,
            user_id,
            counterparty_id,
            amount,
            None,
            EntryKind::Settlement,
            chrono::Utc::now(),
        )
        .await?;
        txn.commit().await.map_err(Error::AtomicWriteFailure)?;

        info!(%user_id, %counterparty_id, %amount, "recorded settlement");

        Ok(pair.into())
    }

    /// Fans the "new expense" message out to every non-payer participant on a
    /// detached task. Never blocks the caller and never fails the write.
    fn dispatch_notifications(&self, expense: &expense::Model, allocated: &[AllocatedShare]) {
        let recipients: Vec<String> = allocated
            .iter()
            .map(|share| share.user_id.clone())
            .filter(|user_id| *user_id != expense.payer_id)
            .collect();
        if recipients.is_empty() {
            return;
        }

        let notifier = Arc::clone(&self.notifier);
        let message = format!("New expense: {} ({})", expense.description, expense.amount);
        tokio::spawn(async move {
            for user_id in recipients {
                if let Err(error) = notifier.notify(&user_id, &message).await {
                    warn!(%user_id, %error, "expense notification failed");
                }
            }
        });
    }
}

/// Appends the two opposite-signed entries that jointly represent one
/// bilateral monetary fact, inside the caller's transaction.
async fn append_mirrored_pair<C>(
    txn: &C,
    owner_id: &str,
    counterparty_id: &str,
    amount: Decimal,
    expense_id: Option<i64>,
    kind: EntryKind,
    at: DateTimeUtc,
) -> Result<[ledger_entry::Model; 2]>
where
    C: ConnectionTrait,
{
    let owner_side = ledger_entry::ActiveModel {
        user_id: Set(owner_id.to_string()),
        counterparty_id: Set(counterparty_id.to_string()),
        amount: Set(amount),
        expense_id: Set(expense_id),
        kind: Set(kind),
        created_at: Set(at),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(Error::AtomicWriteFailure)?;

    let counterparty_side = ledger_entry::ActiveModel {
        user_id: Set(counterparty_id.to_string()),
        counterparty_id: Set(owner_id.to_string()),
        amount: Set(-amount),
        expense_id: Set(expense_id),
        kind: Set(kind),
        created_at: Set(at),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(Error::AtomicWriteFailure)?;

    Ok([owner_side, counterparty_side])
}
