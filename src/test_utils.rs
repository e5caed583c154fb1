//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases, building ledger
//! instances, and stubbing the notification channel.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::{
    core::ledger::{BalanceLedger, NewExpense},
    entities::Category,
    errors::Result,
    notify::{NotificationChannel, NotifyError, NullChannel},
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a ledger over a fresh in-memory database, dropping notifications.
pub async fn setup_test_ledger() -> Result<BalanceLedger> {
    let db = setup_test_db().await?;
    Ok(BalanceLedger::new(db, Arc::new(NullChannel)))
}

/// Like [`setup_test_ledger`], but also hands back the connection for direct
/// queries against the tables.
pub async fn setup_test_db_and_ledger() -> Result<(DatabaseConnection, BalanceLedger)> {
    let db = setup_test_db().await?;
    let ledger = BalanceLedger::new(db.clone(), Arc::new(NullChannel));
    Ok((db, ledger))
}

/// Builds a [`NewExpense`] with sensible defaults: category `Other`, no
/// group, equal split across `participant_ids` in the given order.
pub fn test_expense(
    description: &str,
    amount: Decimal,
    payer_id: &str,
    participant_ids: &[&str],
) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount,
        category: Category::Other,
        payer_id: payer_id.to_string(),
        group_id: None,
        participant_ids: participant_ids.iter().map(ToString::to_string).collect(),
        explicit_shares: None,
    }
}

/// Yields the current task until detached notification tasks have had a
/// chance to run.
pub async fn drain_notification_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Notification stub that records every delivered message.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingChannel {
    /// Everything delivered so far, in delivery order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn notify(&self, user_id: &str, message: &str) -> std::result::Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((user_id.to_string(), message.to_string()));
        Ok(())
    }
}

/// Notification stub that always fails delivery.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingChannel;

#[async_trait]
impl NotificationChannel for FailingChannel {
    async fn notify(&self, _user_id: &str, _message: &str) -> std::result::Result<(), NotifyError> {
        Err(NotifyError("channel offline".to_string()))
    }
}

/// Initializes test logging once; respects `RUST_LOG` when set.
fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}
