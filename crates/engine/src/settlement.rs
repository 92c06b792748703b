//! Settlement assembly: the one entry point collaborators call.
use serde::{Deserialize, Serialize};

use super::{
    EngineError, Expense, Member, MergedTransfer, ResultEngine, balances::balances, merge::merge,
    transfers::expand,
};

/// Per-member roll-up, in roster order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub name: String,
    pub head_count: u32,
    pub paid: f64,
    pub owed: f64,
    pub net: f64,
}

/// Everything a presentation layer needs to render one settlement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub summaries: Vec<MemberSummary>,
    pub transfers: Vec<MergedTransfer>,
}

/// Computes a full settlement for the given snapshot.
///
/// An empty roster or expense list is a reported precondition violation
/// ([`EngineError::NothingToSettle`]), not a crash; past that gate the
/// pipeline never fails. The function is pure: identical input yields
/// bit-identical output, detail ordering included.
pub fn settle(members: &[Member], expenses: &[Expense]) -> ResultEngine<SettlementResult> {
    if members.is_empty() {
        return Err(EngineError::NothingToSettle(
            "the roster is empty".to_string(),
        ));
    }
    if expenses.is_empty() {
        return Err(EngineError::NothingToSettle(
            "no expenses recorded".to_string(),
        ));
    }

    let balances = balances(members, expenses);
    let transfers = merge(&expand(members, expenses));
    tracing::debug!(
        members = members.len(),
        expenses = expenses.len(),
        transfers = transfers.len(),
        "settlement computed"
    );

    let summaries = members
        .iter()
        .map(|member| {
            let balance = balances
                .get(member.name.as_str())
                .copied()
                .unwrap_or_default();
            MemberSummary {
                name: member.name.clone(),
                head_count: member.head_count(),
                paid: balance.paid,
                owed: balance.owed,
                net: balance.net(),
            }
        })
        .collect();

    Ok(SettlementResult {
        summaries,
        transfers,
    })
}
