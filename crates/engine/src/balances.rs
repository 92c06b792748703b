//! Per-member balance derivation.
//!
//! For every member the engine tracks how much they paid out of pocket and
//! how much their headcount-weighted shares add up to. The net position is
//! derived, never stored: positive means the member is owed money, negative
//! means they owe.
//!
//! All arithmetic stays in IEEE f64; rounding happens once, at the
//! presentation boundary, so per-expense shares never compound rounding
//! error.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Expense, Member, members::roster_index};

/// Amounts accumulated for one member across every expense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub paid: f64,
    pub owed: f64,
    pub head_count: u32,
}

impl Balance {
    /// Paid minus owed. Positive is a credit, negative a debt.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.paid - self.owed
    }
}

/// Derives every member's balance from the expense list.
///
/// Participants no longer on the roster are skipped from the headcount and
/// owe nothing; an expense whose live headcount is zero, or whose payer has
/// left the roster, contributes nothing at all. Both guards keep the
/// conservation invariant: the nets of any output sum to zero.
pub fn balances(members: &[Member], expenses: &[Expense]) -> HashMap<String, Balance> {
    let roster = roster_index(members);
    let mut balances: HashMap<String, Balance> = members
        .iter()
        .map(|member| {
            (
                member.name.clone(),
                Balance {
                    paid: 0.0,
                    owed: 0.0,
                    head_count: member.head_count(),
                },
            )
        })
        .collect();

    for expense in expenses {
        let total = expense.live_head_count(&roster);
        if total == 0 {
            tracing::debug!(
                expense = %expense.description,
                "skipping expense with no live participants"
            );
            continue;
        }
        if !roster.contains_key(expense.payer.as_str()) {
            tracing::debug!(
                expense = %expense.description,
                payer = %expense.payer,
                "skipping expense with departed payer"
            );
            continue;
        }

        let per_head = expense.amount / f64::from(total);
        if let Some(balance) = balances.get_mut(expense.payer.as_str()) {
            balance.paid += expense.amount;
        }
        for name in &expense.participants {
            if let Some(member) = roster.get(name.as_str())
                && let Some(balance) = balances.get_mut(name.as_str())
            {
                balance.owed += per_head * f64::from(member.head_count());
            }
        }
    }

    balances
}
