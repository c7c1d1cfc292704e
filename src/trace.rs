//! Instantaneous descriptions: immutable per-step snapshots of a run.
//!
//! Each simulation step produces one [`Configuration`] capturing the state,
//! the rendered tape content, and the head position at that moment. The
//! snapshot copies the rendered content so the trace keeps reflecting the
//! tape *as read*, no matter how the live tape mutates afterwards.

use crate::tape::Tape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One instantaneous description of a Turing machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// The state the machine was in.
    pub state: String,
    /// The rendered tape content at snapshot time (head region plus all
    /// non-blank cells; see [`Tape::render`]).
    pub tape: String,
    /// The head position, as an index into `tape`.
    pub head: usize,
    /// The zero-based step number. Step 0 is the initial configuration.
    pub step: usize,
    /// Textual description of the transition that produced this
    /// configuration; `None` only for step 0.
    pub transition: Option<String>,
}

impl Configuration {
    /// Captures a snapshot of `state` and `tape` at `step`.
    pub fn capture(state: &str, tape: &Tape, step: usize, transition: Option<String>) -> Self {
        let (content, head) = tape.render();
        Self {
            state: state.to_string(),
            tape: content,
            head,
            step,
            transition,
        }
    }

    /// Returns a one-line listing entry: step number, ID form, and the
    /// transition applied, when present.
    pub fn compact(&self) -> String {
        match &self.transition {
            Some(transition) => format!("Step {}: {} [{}]", self.step, self, transition),
            None => format!("Step {}: {}", self.step, self),
        }
    }
}

impl fmt::Display for Configuration {
    /// Renders the classic instantaneous-description form with the state
    /// identifier spliced in immediately left of the head's cell, e.g.
    /// `(Xq1abb)` for head position 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left: String = self.tape.chars().take(self.head).collect();
        let right: String = self.tape.chars().skip(self.head).collect();
        write!(f, "({}{}{})", left, self.state, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_display_splices_state_at_head() {
        let mut tape = Tape::new("abb", 'B');
        tape.step(Direction::Right);

        let config = Configuration::capture("q1", &tape, 1, None);
        assert_eq!(config.to_string(), "(aq1bb)");
    }

    #[test]
    fn test_display_with_head_at_origin() {
        let tape = Tape::new("ab", 'B');
        let config = Configuration::capture("q0", &tape, 0, None);
        assert_eq!(config.to_string(), "(q0ab)");
    }

    #[test]
    fn test_snapshot_survives_later_tape_mutation() {
        let mut tape = Tape::new("ab", 'B');
        let config = Configuration::capture("q0", &tape, 0, None);

        tape.write('X');
        tape.step(Direction::Right);

        assert_eq!(config.tape, "ab");
        assert_eq!(config.head, 0);
    }

    #[test]
    fn test_compact_includes_transition_when_present() {
        let tape = Tape::new("a", 'B');
        let initial = Configuration::capture("q0", &tape, 0, None);
        assert_eq!(initial.compact(), "Step 0: (q0a)");

        let stepped = Configuration::capture("q1", &tape, 1, Some("δ(q0, [a]) = (q1, [X], R)".into()));
        assert!(stepped.compact().starts_with("Step 1: "));
        assert!(stepped.compact().contains("[δ(q0, [a]) = (q1, [X], R)]"));
    }
}
