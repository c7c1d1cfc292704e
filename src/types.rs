//! This module defines the shared data types used throughout the simulator:
//! head directions, machine states, terminal verdicts, and the error type
//! raised while constructing or loading a machine definition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// The fallback blank symbol when the tape alphabet declares no candidate.
pub const DEFAULT_BLANK_SYMBOL: char = 'B';
/// Candidate blank symbols, checked against the tape alphabet in priority
/// order. The first candidate present in the alphabet wins.
pub const BLANK_CANDIDATES: [&str; 5] = ["B", "_", " ", "blank", "BLANK"];
/// The default ceiling on the number of transitions applied per run.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Represents the possible directions a tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Parses the one-letter move code used by definition files.
    pub fn parse(code: &str) -> Result<Self, MachineError> {
        match code {
            "L" => Ok(Direction::Left),
            "R" => Ok(Direction::Right),
            "S" => Ok(Direction::Stay),
            other => Err(MachineError::ValidationError(format!(
                "invalid move '{}': expected 'L', 'R' or 'S'",
                other
            ))),
        }
    }

    /// Returns the one-letter move code for this direction.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Stay => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A machine state: an identifier plus an accept flag.
///
/// Equality and hashing consider the identifier only, so a state set cannot
/// hold two states that differ solely in their accept flag.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct State {
    /// The state identifier.
    pub name: String,
    /// Whether reaching this state halts the machine with acceptance.
    pub is_accept: bool,
}

impl State {
    pub fn new(name: impl Into<String>, is_accept: bool) -> Self {
        Self {
            name: name.into(),
            is_accept,
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The state machine of a single simulation run.
///
/// `Running` is the only non-terminal variant; every other variant ends the
/// run and carries the data that distinguishes the outcome. Rejections and
/// step exhaustion are ordinary verdicts, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The run has not reached a terminal verdict yet.
    Running,
    /// The machine reached an accept state after `steps` transitions.
    Accepted { steps: usize },
    /// The input contained symbols outside the input alphabet; no tape was
    /// ever built and the trace is empty.
    RejectedInvalidInput { symbols: Vec<char> },
    /// No transition matched (state, symbol) at the given step.
    RejectedNoTransition {
        state: String,
        symbol: char,
        step: usize,
    },
    /// The configured step ceiling was reached before the machine halted.
    StepLimitExceeded { limit: usize },
    /// Applying a transition failed; the trace up to `step` is preserved.
    RuntimeFault { step: usize },
}

impl Verdict {
    /// Returns `true` for every variant except `Running`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Running)
    }

    /// Returns `true` iff the run ended in acceptance.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Represents the errors that can occur while constructing a machine
/// definition or loading one from a file.
///
/// Everything here is a construction-time failure. Outcomes of a running
/// simulation are reported through [`Verdict`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A state reference (initial, accept, or transition endpoint) names a
    /// state outside the declared state set.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Two transitions share the same (state, read-symbols) key.
    #[error("Duplicate transition for state '{state}' reading {read:?}")]
    DuplicateTransition { state: String, read: Vec<char> },
    /// A structural rule of the definition format was violated.
    #[error("Definition validation error: {0}")]
    ValidationError(String),
    /// The definition text was not valid JSON for the expected schema.
    #[error("Definition parsing error: {0}")]
    ParseError(String),
    /// A definition or input file could not be read.
    #[error("File error: {0}")]
    FileError(String),
}
