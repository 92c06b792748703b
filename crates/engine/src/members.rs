//! The module contains the `Member` type, one roster entry.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use super::{ResultEngine, error::EngineError};

/// A roster member.
///
/// `dependents` counts the extra people who share this member's portion
/// without appearing in the roster themselves, so the splitting weight of a
/// member is always [`head_count`], never 1.
///
/// [`head_count`]: Member::head_count
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub dependents: u32,
}

impl Member {
    /// Creates a member with a trimmed, non-empty display name.
    pub fn new(name: impl Into<String>, dependents: u32) -> ResultEngine<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(EngineError::InvalidMember("empty member name".to_string()));
        }
        Ok(Self { name, dependents })
    }

    /// Splitting weight of this member: themselves plus their dependents.
    #[must_use]
    pub const fn head_count(&self) -> u32 {
        1 + self.dependents
    }
}

/// Name-to-member lookup built once per pipeline pass.
pub(crate) fn roster_index(members: &[Member]) -> HashMap<&str, &Member> {
    members
        .iter()
        .map(|member| (member.name.as_str(), member))
        .collect()
}

/// Normalize a display name into a roster lookup key.
///
/// NFKD with combining marks stripped, casefolded, punctuation and runs of
/// whitespace collapsed to single spaces. "José " and "jose" collide on
/// purpose.
pub(crate) fn normalize_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}
