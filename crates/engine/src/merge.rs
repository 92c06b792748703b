//! Pairwise netting of raw transfers.
//!
//! Raw transfers are grouped per ordered (debtor, creditor) pair, then the
//! two directions of each pair are cancelled against each other so at most
//! one transfer survives per pair of members. The cancelled portion is not
//! discarded from the record: it shows up sign-flipped in the detail list,
//! so the audit trail still accounts for every contributing expense.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{MIN_TRANSFER, RawTransfer};

/// Ordered (debtor, creditor) grouping key.
///
/// A composite key rather than a concatenated string: member names may
/// contain any separator a string key could use.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub from: String,
    pub to: String,
}

impl PairKey {
    /// The same pair seen from the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> PairKey {
        PairKey {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

/// One audited contribution inside a merged transfer.
///
/// Negative amounts are the cancelled-out portion coming from the losing
/// direction of the pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferDetail {
    pub description: String,
    pub amount: f64,
}

/// Final, netted transfer between two members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedTransfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub details: Vec<TransferDetail>,
}

#[derive(Default)]
struct Bucket {
    amount: f64,
    details: Vec<TransferDetail>,
}

/// Nets opposing directions down to at most one transfer per member pair.
///
/// Pairs whose directions cancel within [`MIN_TRANSFER`] vanish entirely:
/// the residue is rounding dust, treated as settled rather than paid. The
/// output keeps the first-encountered order of each pair, so identical
/// input yields identical output.
pub fn merge(raw: &[RawTransfer]) -> Vec<MergedTransfer> {
    let mut buckets: HashMap<PairKey, Bucket> = HashMap::new();
    let mut order: Vec<PairKey> = Vec::new();

    for transfer in raw {
        let key = PairKey {
            from: transfer.from.clone(),
            to: transfer.to.clone(),
        };
        let bucket = buckets.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Bucket::default()
        });
        bucket.amount += transfer.amount;
        bucket.details.push(TransferDetail {
            description: transfer.source.clone(),
            amount: transfer.amount,
        });
    }

    let mut merged = Vec::new();
    for key in order {
        // Taking buckets out of the map doubles as the resolved-pair set:
        // when the loop reaches the reverse key later, its bucket is gone.
        let Some(forward) = buckets.remove(&key) else {
            continue;
        };
        let reverse_key = key.reversed();
        match buckets.remove(&reverse_key) {
            None => merged.push(MergedTransfer {
                from: key.from,
                to: key.to,
                amount: forward.amount,
                details: forward.details,
            }),
            Some(reverse) => {
                let net = forward.amount - reverse.amount;
                if net.abs() < MIN_TRANSFER {
                    continue;
                }
                let (winner_key, winner, loser) = if net > 0.0 {
                    (key, forward, reverse)
                } else {
                    (reverse_key, reverse, forward)
                };
                let mut details = winner.details;
                details.extend(loser.details.into_iter().map(|detail| TransferDetail {
                    description: detail.description,
                    amount: -detail.amount,
                }));
                merged.push(MergedTransfer {
                    from: winner_key.from,
                    to: winner_key.to,
                    amount: net.abs(),
                    details,
                });
            }
        }
    }

    merged
}
