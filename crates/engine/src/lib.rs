//! Group-expense settlement engine.
//!
//! The engine settles shared expenses split by headcount: a member counts
//! for themselves plus their dependents, balances are derived per member,
//! and opposing debts between the same two people are netted into a single
//! transfer with an auditable breakdown.
//!
//! The computation is a pure pipeline over an immutable snapshot of the
//! roster and the expense book:
//!
//! 1. [`balances()`] derives paid/owed/headcount per member;
//! 2. [`expand()`] decomposes each expense into raw participant→payer debts;
//! 3. [`merge()`] nets the two directions of every member pair;
//! 4. [`settle()`] runs the three and assembles the final report.
//!
//! Each stage is a pure function of its inputs: no I/O, no shared state, no
//! locking. Callers that mutate collections concurrently must snapshot them
//! before invoking the pipeline. The [`Ledger`] facade owns the mutable
//! collections for callers that want the engine to hold them.
pub use balances::{Balance, balances};
pub use error::EngineError;
pub use expenses::Expense;
pub use ledger::Ledger;
pub use members::Member;
pub use merge::{MergedTransfer, PairKey, TransferDetail, merge};
pub use settlement::{MemberSummary, SettlementResult, settle};
pub use transfers::{RawTransfer, expand};

mod balances;
mod error;
mod expenses;
mod ledger;
mod members;
mod merge;
mod settlement;
mod transfers;

/// Smallest transfer worth emitting, in currency units.
///
/// Residues under one cent are rounding dust: the pair is treated as
/// settled and no transfer is produced.
pub const MIN_TRANSFER: f64 = 0.01;

type ResultEngine<T> = Result<T, EngineError>;
