//! Loading machine definitions from JSON files or strings, and test inputs
//! from line-oriented text files.
//!
//! The loader owns the structural validation contract: by the time a
//! [`MachineDefinition`] is handed to the core, every field is present,
//! every symbol is a single character, state references resolve, the input
//! alphabet is contained in the tape alphabet, and every transition is
//! well-formed. Violations surface as [`MachineError`] values, clearly
//! distinguishable from simulation outcomes.

use crate::machine::MachineDefinition;
use crate::transition::Transition;
use crate::types::{Direction, MachineError, BLANK_CANDIDATES, DEFAULT_BLANK_SYMBOL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The raw structural record of a machine definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSpec {
    pub states: Vec<String>,
    pub input_alphabet: Vec<String>,
    pub tape_alphabet: Vec<String>,
    pub initial_state: String,
    pub accept_states: Vec<String>,
    pub transitions: Vec<TransitionSpec>,
}

/// One raw transition entry of a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub state: String,
    pub read: Vec<String>,
    pub write: Vec<String>,
    #[serde(rename = "move")]
    pub move_code: String,
    pub next: String,
}

/// `DefinitionLoader` turns definition files and strings into validated
/// [`MachineDefinition`] values, and reads test-input files.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Loads a machine definition from the JSON file at `path`.
    pub fn load_file(path: &Path) -> Result<MachineDefinition, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::load_str(&content)
    }

    /// Loads a machine definition from JSON text.
    pub fn load_str(content: &str) -> Result<MachineDefinition, MachineError> {
        let spec: DefinitionSpec =
            serde_json::from_str(content).map_err(|e| MachineError::ParseError(e.to_string()))?;

        Self::build(spec)
    }

    /// Validates a raw spec and builds the machine definition from it.
    pub fn build(spec: DefinitionSpec) -> Result<MachineDefinition, MachineError> {
        validate_spec(&spec)?;

        let blank = detect_blank(&spec.tape_alphabet)?;
        let input_alphabet = parse_alphabet(&spec.input_alphabet)?;
        let tape_alphabet = parse_alphabet(&spec.tape_alphabet)?;

        let mut transitions = Vec::with_capacity(spec.transitions.len());
        for entry in &spec.transitions {
            transitions.push(Transition::new(
                entry.state.clone(),
                parse_alphabet(&entry.read)?,
                parse_alphabet(&entry.write)?,
                Direction::parse(&entry.move_code)?,
                entry.next.clone(),
            )?);
        }

        MachineDefinition::new(
            spec.states,
            input_alphabet,
            tape_alphabet,
            spec.initial_state,
            spec.accept_states,
            transitions,
            blank,
        )
    }

    /// Loads test inputs from a plain-text file: one input per line, blank
    /// lines and `#` comments skipped, `""` (or `''`) denoting the empty
    /// input.
    pub fn load_inputs(path: &Path) -> Result<Vec<String>, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(parse_inputs(&content))
    }
}

/// Parses a test-input file's content (see [`DefinitionLoader::load_inputs`]).
pub fn parse_inputs(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            if line == "\"\"" || line == "''" {
                String::new()
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Scans the raw tape alphabet for the blank symbol, in candidate priority
/// order; first match wins. Falls back to the default blank when no
/// candidate appears.
fn detect_blank(tape_alphabet: &[String]) -> Result<char, MachineError> {
    for candidate in BLANK_CANDIDATES {
        if tape_alphabet.iter().any(|entry| entry == candidate) {
            // Symbols are single characters, so a multi-character candidate
            // such as "blank" cannot be represented on the tape.
            return parse_symbol(candidate);
        }
    }

    Ok(DEFAULT_BLANK_SYMBOL)
}

fn parse_symbol(raw: &str) -> Result<char, MachineError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(MachineError::ValidationError(format!(
            "symbol '{}' must be exactly one character",
            raw
        ))),
    }
}

fn parse_alphabet(raw: &[String]) -> Result<Vec<char>, MachineError> {
    raw.iter().map(|entry| parse_symbol(entry)).collect()
}

fn validate_spec(spec: &DefinitionSpec) -> Result<(), MachineError> {
    if spec.states.is_empty() {
        return Err(MachineError::ValidationError(
            "no states defined".to_string(),
        ));
    }

    if !spec.states.contains(&spec.initial_state) {
        return Err(MachineError::InvalidState(format!(
            "initial state '{}' is not in the state list",
            spec.initial_state
        )));
    }
    for accept_state in &spec.accept_states {
        if !spec.states.contains(accept_state) {
            return Err(MachineError::InvalidState(format!(
                "accept state '{}' is not in the state list",
                accept_state
            )));
        }
    }

    for symbol in &spec.input_alphabet {
        if !spec.tape_alphabet.contains(symbol) {
            return Err(MachineError::ValidationError(format!(
                "input symbol '{}' is not in the tape alphabet",
                symbol
            )));
        }
    }

    for (index, transition) in spec.transitions.iter().enumerate() {
        for endpoint in [&transition.state, &transition.next] {
            if !spec.states.contains(endpoint) {
                return Err(MachineError::InvalidState(format!(
                    "transition {} references undeclared state '{}'",
                    index, endpoint
                )));
            }
        }

        if transition.read.len() != transition.write.len() {
            return Err(MachineError::ValidationError(format!(
                "transition {}: read and write lists must have the same length",
                index
            )));
        }

        for symbol in transition.read.iter().chain(transition.write.iter()) {
            if !spec.tape_alphabet.contains(symbol) {
                return Err(MachineError::ValidationError(format!(
                    "transition {}: symbol '{}' is not in the tape alphabet",
                    index, symbol
                )));
            }
        }

        Direction::parse(&transition.move_code)?;
    }

    Ok(())
}
