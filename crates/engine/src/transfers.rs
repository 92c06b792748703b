//! Raw expense-level transfers, the unmerged participant→payer debts.
use serde::{Deserialize, Serialize};

use super::{Expense, MIN_TRANSFER, Member, members::roster_index};

/// A single-expense debt from one participant straight to the payer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTransfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
    /// Expense description carried along for the audit trail.
    pub source: String,
}

/// Expands expenses into the naive everyone-pays-the-payer decomposition.
///
/// Shares under [`MIN_TRANSFER`] are never emitted. Emission order is
/// expense order, then participant order within each expense; the merge step
/// relies on it for reproducible detail lists.
pub fn expand(members: &[Member], expenses: &[Expense]) -> Vec<RawTransfer> {
    let roster = roster_index(members);
    let mut raw = Vec::new();

    for expense in expenses {
        let total = expense.live_head_count(&roster);
        if total == 0 || !roster.contains_key(expense.payer.as_str()) {
            continue;
        }
        let per_head = expense.amount / f64::from(total);

        for name in &expense.participants {
            if *name == expense.payer {
                continue;
            }
            let Some(member) = roster.get(name.as_str()) else {
                continue;
            };
            let amount = per_head * f64::from(member.head_count());
            if amount < MIN_TRANSFER {
                continue;
            }
            raw.push(RawTransfer {
                from: name.clone(),
                to: expense.payer.clone(),
                amount,
                source: expense.description.clone(),
            });
        }
    }

    raw
}
