//! Transitions and the deterministic transition table.
//!
//! The table maps (state, read-symbols) keys to exactly one transition.
//! Duplicate keys are a hard construction error: non-determinism is
//! rejected outright rather than resolved by ordering.

use crate::types::{Direction, MachineError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single transition rule.
///
/// The read/write symbol lists have equal length, enforced at construction.
/// A single-tape machine uses lists of length 1; the list shape leaves room
/// for multi-track variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this transition fires from.
    pub from_state: String,
    /// Symbols that must be under the head(s) for this transition to apply.
    pub read: Vec<char>,
    /// Symbols written in place of the symbols read.
    pub write: Vec<char>,
    /// Head movement applied after writing.
    pub direction: Direction,
    /// The state the machine enters after this transition.
    pub to_state: String,
}

impl Transition {
    /// Builds a transition, rejecting mismatched read/write lengths.
    pub fn new(
        from_state: impl Into<String>,
        read: Vec<char>,
        write: Vec<char>,
        direction: Direction,
        to_state: impl Into<String>,
    ) -> Result<Self, MachineError> {
        if read.len() != write.len() {
            return Err(MachineError::ValidationError(format!(
                "read and write symbol lists must have the same length ({} != {})",
                read.len(),
                write.len()
            )));
        }

        Ok(Self {
            from_state: from_state.into(),
            read,
            write,
            direction,
            to_state: to_state.into(),
        })
    }

    /// Returns the lookup key identifying this transition.
    pub fn key(&self) -> (String, Vec<char>) {
        (self.from_state.clone(), self.read.clone())
    }
}

impl fmt::Display for Transition {
    /// Renders the rule in delta notation, e.g. `δ(q0, [a]) = (q1, [X], R)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let read: String = self
            .read
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let write: String = self
            .write
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "δ({}, [{}]) = ({}, [{}], {})",
            self.from_state, read, self.to_state, write, self.direction
        )
    }
}

/// A deterministic mapping from (state, read-symbols) to a transition.
///
/// Built once from an ordered transition list; read-only afterwards.
/// Iteration preserves the original declaration order.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
    index: HashMap<(String, Vec<char>), usize>,
}

impl TransitionTable {
    /// Builds the table, failing on the first duplicated key.
    pub fn new(transitions: Vec<Transition>) -> Result<Self, MachineError> {
        let mut index = HashMap::with_capacity(transitions.len());

        for (position, transition) in transitions.iter().enumerate() {
            let key = transition.key();
            if index.contains_key(&key) {
                return Err(MachineError::DuplicateTransition {
                    state: key.0,
                    read: key.1,
                });
            }
            index.insert(key, position);
        }

        Ok(Self { transitions, index })
    }

    /// Looks up the transition for `state` reading `symbols`, exact match
    /// only. `None` means no applicable transition.
    pub fn lookup(&self, state: &str, symbols: &[char]) -> Option<&Transition> {
        let key = (state.to_string(), symbols.to_vec());
        self.index.get(&key).map(|&position| &self.transitions[position])
    }

    /// Returns the number of transitions in the table.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterates over the transitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }
}
