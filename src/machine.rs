//! The static machine definition: state set, alphabets, initial and accept
//! states, blank symbol, and the transition table.
//!
//! A definition is built once, validated up front, and read-only for the
//! lifetime of every simulation that uses it, so multiple concurrent runs
//! may share one definition without synchronization.

use crate::tape::Tape;
use crate::transition::{Transition, TransitionTable};
use crate::types::{MachineError, State};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A validated, immutable Turing machine definition.
#[derive(Debug, Clone)]
pub struct MachineDefinition {
    states: HashMap<String, State>,
    input_alphabet: HashSet<char>,
    tape_alphabet: HashSet<char>,
    initial_state: String,
    accept_states: HashSet<String>,
    blank: char,
    table: TransitionTable,
}

impl MachineDefinition {
    /// Builds a definition, validating state references and alphabet
    /// containment, and indexing the transitions.
    ///
    /// The external loader guarantees most of these properties already;
    /// they are re-checked here so a definition assembled in code is held
    /// to the same rules as one loaded from a file.
    pub fn new(
        states: Vec<String>,
        input_alphabet: Vec<char>,
        tape_alphabet: Vec<char>,
        initial_state: impl Into<String>,
        accept_states: Vec<String>,
        transitions: Vec<Transition>,
        blank: char,
    ) -> Result<Self, MachineError> {
        let initial_state = initial_state.into();
        let accept_states: HashSet<String> = accept_states.into_iter().collect();
        let states: HashMap<String, State> = states
            .into_iter()
            .map(|name| {
                let is_accept = accept_states.contains(&name);
                (name.clone(), State::new(name, is_accept))
            })
            .collect();

        if !states.contains_key(&initial_state) {
            return Err(MachineError::InvalidState(format!(
                "initial state '{}' is not in the state set",
                initial_state
            )));
        }
        for accept_state in &accept_states {
            if !states.contains_key(accept_state) {
                return Err(MachineError::InvalidState(format!(
                    "accept state '{}' is not in the state set",
                    accept_state
                )));
            }
        }

        let input_alphabet: HashSet<char> = input_alphabet.into_iter().collect();
        let mut tape_alphabet: HashSet<char> = tape_alphabet.into_iter().collect();
        // The blank is a distinguished member of the tape alphabet.
        tape_alphabet.insert(blank);

        for symbol in &input_alphabet {
            if !tape_alphabet.contains(symbol) {
                return Err(MachineError::ValidationError(format!(
                    "input symbol '{}' is not in the tape alphabet",
                    symbol
                )));
            }
        }

        for transition in &transitions {
            for endpoint in [&transition.from_state, &transition.to_state] {
                if !states.contains_key(endpoint) {
                    return Err(MachineError::InvalidState(format!(
                        "transition references undeclared state '{}'",
                        endpoint
                    )));
                }
            }
            for symbol in transition.read.iter().chain(transition.write.iter()) {
                if !tape_alphabet.contains(symbol) {
                    return Err(MachineError::ValidationError(format!(
                        "transition symbol '{}' is not in the tape alphabet",
                        symbol
                    )));
                }
            }
        }

        let table = TransitionTable::new(transitions)?;

        Ok(Self {
            states,
            input_alphabet,
            tape_alphabet,
            initial_state,
            accept_states,
            blank,
            table,
        })
    }

    /// Returns `true` iff `state` is an accept state.
    pub fn is_accept(&self, state: &str) -> bool {
        self.accept_states.contains(state)
    }

    /// Returns `true` iff every character of `input` is in the input
    /// alphabet. The empty string is trivially valid.
    pub fn validate_input(&self, input: &str) -> bool {
        input.chars().all(|c| self.input_alphabet.contains(&c))
    }

    /// Returns the characters of `input` outside the input alphabet, in
    /// order of appearance.
    pub fn invalid_symbols(&self, input: &str) -> Vec<char> {
        input
            .chars()
            .filter(|c| !self.input_alphabet.contains(c))
            .collect()
    }

    /// Creates a fresh tape holding `input`, using this definition's blank.
    pub fn new_tape(&self, input: &str) -> Tape {
        Tape::new(input, self.blank)
    }

    /// Looks up the transition for `state` reading `symbols`.
    pub fn lookup(&self, state: &str, symbols: &[char]) -> Option<&Transition> {
        self.table.lookup(state, symbols)
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn input_alphabet(&self) -> &HashSet<char> {
        &self.input_alphabet
    }

    pub fn tape_alphabet(&self) -> &HashSet<char> {
        &self.tape_alphabet
    }

    /// Returns a numbered listing of every transition in declaration order.
    pub fn transition_summary(&self) -> String {
        let mut summary = String::from("Transitions:\n");
        for (i, transition) in self.table.iter().enumerate() {
            summary.push_str(&format!("  {}. {}\n", i + 1, transition));
        }
        summary
    }
}

impl fmt::Display for MachineDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state_names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        state_names.sort_unstable();
        let mut input: Vec<char> = self.input_alphabet.iter().copied().collect();
        input.sort_unstable();
        let mut tape: Vec<char> = self.tape_alphabet.iter().copied().collect();
        tape.sort_unstable();
        let mut accept: Vec<&str> = self.accept_states.iter().map(String::as_str).collect();
        accept.sort_unstable();

        writeln!(f, "MachineDefinition(")?;
        writeln!(f, "  States: {:?}", state_names)?;
        writeln!(f, "  Input Alphabet: {:?}", input)?;
        writeln!(f, "  Tape Alphabet: {:?}", tape)?;
        writeln!(f, "  Initial State: {}", self.initial_state)?;
        writeln!(f, "  Accept States: {:?}", accept)?;
        writeln!(f, "  Blank Symbol: '{}'", self.blank)?;
        writeln!(f, "  Transitions: {}", self.table.len())?;
        write!(f, ")")
    }
}
