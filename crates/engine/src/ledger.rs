//! In-memory roster and expense book, the stateful facade.
//!
//! A `Ledger` owns the two mutable collections and guards the referential
//! integrity between them; the settlement math itself stays in the pure
//! pipeline functions, invoked over a snapshot on every request.
use uuid::Uuid;

use super::{
    Expense, Member, ResultEngine, SettlementResult, error::EngineError, members::normalize_key,
    settlement::settle,
};

/// Owns the member roster and the expense book.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    members: Vec<Member>,
    expenses: Vec<Expense>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Running total over every recorded expense.
    #[must_use]
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Adds a member to the roster.
    ///
    /// Duplicates are matched on the normalized name, so "José" and
    /// "jose " collide.
    pub fn add_member(&mut self, name: &str, dependents: u32) -> ResultEngine<&Member> {
        let member = Member::new(name, dependents)?;
        let key = normalize_key(&member.name);
        if self
            .members
            .iter()
            .any(|existing| normalize_key(&existing.name) == key)
        {
            return Err(EngineError::ExistingKey(member.name));
        }
        self.members.push(member);
        Ok(&self.members[self.members.len() - 1])
    }

    /// Removes a member and every expense they paid or shared in.
    ///
    /// The cascade keeps the book free of orphaned references; the
    /// pipeline's orphan skips only matter for snapshots assembled
    /// outside a ledger.
    pub fn remove_member(&mut self, name: &str) -> ResultEngine<Member> {
        let key = normalize_key(name);
        let Some(index) = self
            .members
            .iter()
            .position(|member| normalize_key(&member.name) == key)
        else {
            return Err(EngineError::KeyNotFound(name.to_string()));
        };
        let member = self.members.remove(index);
        self.expenses.retain(|expense| {
            expense.payer != member.name && !expense.participants.contains(&member.name)
        });
        tracing::debug!(member = %member.name, "removed member and their expenses");
        Ok(member)
    }

    /// Records an expense after resolving the payer and every participant
    /// against the roster; stored names are the canonical roster spellings.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: f64,
        payer: &str,
        participants: &[&str],
    ) -> ResultEngine<&Expense> {
        let payer = self.resolve(payer)?.name.clone();
        let mut resolved = Vec::with_capacity(participants.len());
        for participant in participants {
            resolved.push(self.resolve(participant)?.name.clone());
        }
        let expense = Expense::new(description, amount, payer, resolved)?;
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn remove_expense(&mut self, id: Uuid) -> ResultEngine<Expense> {
        match self.expenses.iter().position(|expense| expense.id == id) {
            Some(index) => Ok(self.expenses.remove(index)),
            None => Err(EngineError::KeyNotFound(id.to_string())),
        }
    }

    /// Drops every member and expense.
    pub fn clear(&mut self) {
        self.members.clear();
        self.expenses.clear();
    }

    /// Settles the current book.
    ///
    /// The collections are not touched; the result is recomputed from
    /// scratch on every call.
    pub fn settle(&self) -> ResultEngine<SettlementResult> {
        settle(&self.members, &self.expenses)
    }

    fn resolve(&self, name: &str) -> ResultEngine<&Member> {
        let key = normalize_key(name);
        self.members
            .iter()
            .find(|member| normalize_key(&member.name) == key)
            .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))
    }
}
