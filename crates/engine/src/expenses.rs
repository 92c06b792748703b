//! The module contains the `Expense` type, one shared purchase.
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Member, ResultEngine, error::EngineError};

/// A shared expense: who paid, how much, and who benefited.
///
/// `payer` and `participants` carry roster names. The payer does not have to
/// be in the participant list; a payer outside it fronts the money without
/// owing a share of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub payer: String,
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Builds a validated expense stamped with a fresh id and timestamp.
    ///
    /// Rejects non-finite or non-positive amounts, blank descriptions and
    /// payers, and empty participant lists. Duplicate participants collapse
    /// to one entry, first occurrence wins.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        payer: impl Into<String>,
        participants: Vec<String>,
    ) -> ResultEngine<Self> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(EngineError::InvalidExpense(
                "empty description".to_string(),
            ));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidAmount(format!(
                "expense amount must be positive, got {amount}"
            )));
        }
        let payer = payer.into().trim().to_string();
        if payer.is_empty() {
            return Err(EngineError::InvalidMember("empty payer name".to_string()));
        }

        let mut seen = HashSet::new();
        let participants: Vec<String> = participants
            .into_iter()
            .filter(|participant| seen.insert(participant.clone()))
            .collect();
        if participants.is_empty() {
            return Err(EngineError::InvalidExpense(
                "no participants".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            description,
            amount,
            payer,
            participants,
            created_at: Utc::now(),
        })
    }

    /// Total splitting weight of the participants still on the roster.
    ///
    /// Participants that left the roster are skipped, not errors; the
    /// remaining ones absorb the whole amount between them.
    pub(crate) fn live_head_count(&self, roster: &HashMap<&str, &Member>) -> u32 {
        self.participants
            .iter()
            .filter_map(|name| roster.get(name.as_str()))
            .map(|member| member.head_count())
            .sum()
    }
}
