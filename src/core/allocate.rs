//! Expense split allocation.
//!
//! Divides an expense total across participants so that the shares sum
//! exactly to the total. An equal split rounds each share to two decimal
//! places and adds the full rounding remainder to the FIRST participant in
//! input order - an explicit, deterministic tie-break. Callers may instead
//! supply explicit per-participant shares for unequal splits, which are used
//! verbatim after reconciliation against the total.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::balance::EPSILON;
use crate::errors::{Error, Result};

/// One participant's computed portion of an expense total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedShare {
    /// Participant user id
    pub user_id: String,
    /// Amount this participant owes for the expense
    pub share: Decimal,
}

/// Splits `total` across `participant_ids`, returning one share per
/// participant in input order.
///
/// Pure and deterministic: the same ordered input always produces the same
/// allocation. Duplicate participant ids collapse to their first occurrence.
///
/// With `explicit_shares`, each participant's share is looked up in the map
/// (missing participants count as zero) and the shares are used verbatim once
/// they reconcile to `total` within one cent. Without it, the split is equal:
/// `total / n` rounded to two decimal places, with the rounding remainder
/// absorbed by the first participant so the shares still sum exactly to
/// `total`.
///
/// # Errors
/// * [`Error::InvalidAmount`] - `total` is zero or negative, or an explicit
///   share is negative
/// * [`Error::EmptyParticipants`] - no participants were given
/// * [`Error::ShareMismatch`] - explicit shares don't sum to `total`
pub fn allocate(
    total: Decimal,
    participant_ids: &[String],
    explicit_shares: Option<&HashMap<String, Decimal>>,
) -> Result<Vec<AllocatedShare>> {
    if total <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount: total });
    }

    // Order is load-bearing: the first participant absorbs the remainder.
    let mut participants: Vec<&str> = Vec::with_capacity(participant_ids.len());
    for id in participant_ids {
        if !participants.contains(&id.as_str()) {
            participants.push(id);
        }
    }

    if participants.is_empty() {
        return Err(Error::EmptyParticipants);
    }

    if let Some(shares) = explicit_shares {
        return allocate_explicit(total, &participants, shares);
    }

    let count = Decimal::from(participants.len());
    let even_share =
        (total / count).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let remainder = total - even_share * count;

    Ok(participants
        .iter()
        .enumerate()
        .map(|(index, id)| AllocatedShare {
            user_id: (*id).to_string(),
            share: if index == 0 {
                even_share + remainder
            } else {
                even_share
            },
        })
        .collect())
}

/// Custom split: shares come from the caller and are used verbatim.
fn allocate_explicit(
    total: Decimal,
    participants: &[&str],
    shares: &HashMap<String, Decimal>,
) -> Result<Vec<AllocatedShare>> {
    let mut allocated = Vec::with_capacity(participants.len());
    let mut share_sum = Decimal::ZERO;

    for id in participants {
        let share = shares.get(*id).copied().unwrap_or(Decimal::ZERO);
        if share < Decimal::ZERO {
            return Err(Error::InvalidAmount { amount: share });
        }
        share_sum += share;
        allocated.push(AllocatedShare {
            user_id: (*id).to_string(),
            share,
        });
    }

    if (share_sum - total).abs() > EPSILON {
        return Err(Error::ShareMismatch { total, share_sum });
    }

    Ok(allocated)
}
