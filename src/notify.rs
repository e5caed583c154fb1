//! Notification channel abstraction.
//!
//! When an expense is recorded, every affected participant gets a push
//! message. Delivery is a capability injected into the ledger at construction
//! time, so the core carries no process-wide socket handle and tests can
//! substitute a recording stub. Dispatch is best-effort: the ledger logs and
//! swallows channel errors, they never fail a write.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Failure reported by a [`NotificationChannel`] implementation.
///
/// Carried for logging only; the ledger never propagates it to callers.
#[derive(Debug, Error)]
#[error("notification channel error: {0}")]
pub struct NotifyError(pub String);

/// Capability for delivering push messages to users.
///
/// Implementations are expected to be non-blocking (enqueue and return); the
/// ledger invokes them from a detached task after the write has committed.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Delivers `message` to `user_id`, best-effort.
    async fn notify(&self, user_id: &str, message: &str) -> Result<(), NotifyError>;
}

/// A channel that drops every message.
///
/// Useful for batch tooling and tests that don't care about notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullChannel;

#[async_trait]
impl NotificationChannel for NullChannel {
    async fn notify(&self, user_id: &str, message: &str) -> Result<(), NotifyError> {
        debug!(user_id, message, "notification dropped (null channel)");
        Ok(())
    }
}
