//! Net balance derivation and pairwise balance state.
//!
//! A balance is never stored: it is always the sum of one user's ledger
//! entries against a counterparty, folded on read. Aggregates smaller than
//! [`EPSILON`] in magnitude are treated as settled - that filters cosmetic
//! rounding residue, not genuine small debts, since every persisted amount is
//! a whole number of cents.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::entities::ledger_entry;

/// Smallest balance magnitude still considered outstanding: one cent.
pub const EPSILON: Decimal = dec!(0.01);

/// State of one pairwise balance, as seen from the owning user's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    /// |balance| < [`EPSILON`]: nothing outstanding either way
    Settled,
    /// balance < 0: the user owes the counterparty
    Owes,
    /// balance > 0: the counterparty owes the user
    Owed,
}

/// Classifies a signed pairwise balance.
#[must_use]
pub fn classify(balance: Decimal) -> PairState {
    if balance.abs() < EPSILON {
        PairState::Settled
    } else if balance < Decimal::ZERO {
        PairState::Owes
    } else {
        PairState::Owed
    }
}

/// Folds one user's entries into per-counterparty net balances.
///
/// Settled pairs (|sum| < [`EPSILON`]) are omitted from the result.
#[must_use]
pub fn net_from_entries(entries: &[ledger_entry::Model]) -> HashMap<String, Decimal> {
    let mut balances: HashMap<String, Decimal> = HashMap::new();
    for entry in entries {
        balances
            .entry(entry.counterparty_id.clone())
            .and_modify(|balance| *balance += entry.amount)
            .or_insert(entry.amount);
    }
    balances.retain(|_, balance| balance.abs() >= EPSILON);
    balances
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::ledger_entry::EntryKind;
    use rust_decimal_macros::dec;

    fn entry(counterparty: &str, amount: Decimal) -> ledger_entry::Model {
        ledger_entry::Model {
            id: 0,
            user_id: "me".to_string(),
            counterparty_id: counterparty.to_string(),
            amount,
            expense_id: None,
            kind: EntryKind::Expense,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_fold_sums_per_counterparty() {
        let entries = vec![
            entry("a", dec!(10.00)),
            entry("a", dec!(-4.00)),
            entry("b", dec!(-3.50)),
        ];
        let balances = net_from_entries(&entries);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances["a"], dec!(6.00));
        assert_eq!(balances["b"], dec!(-3.50));
    }

    #[test]
    fn test_settled_pairs_are_omitted() {
        let entries = vec![entry("a", dec!(25.00)), entry("a", dec!(-25.00))];
        let balances = net_from_entries(&entries);

        assert!(balances.is_empty());
    }

    #[test]
    fn test_one_cent_debt_is_not_filtered() {
        // Epsilon is strictly-below: an exact one-cent debt stays visible
        let balances = net_from_entries(&[entry("a", dec!(0.01))]);

        assert_eq!(balances["a"], dec!(0.01));
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(Decimal::ZERO), PairState::Settled);
        assert_eq!(classify(dec!(0.009)), PairState::Settled);
        assert_eq!(classify(dec!(-0.009)), PairState::Settled);
        assert_eq!(classify(dec!(0.01)), PairState::Owed);
        assert_eq!(classify(dec!(-0.01)), PairState::Owes);
        assert_eq!(classify(dec!(500.00)), PairState::Owed);
    }

    #[test]
    fn test_empty_history_has_no_balances() {
        assert!(net_from_entries(&[]).is_empty());
    }
}
