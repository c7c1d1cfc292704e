//! The simulation engine: drives the step loop over a machine definition,
//! producing a verdict, a human-readable message, and the ordered trace of
//! instantaneous descriptions.
//!
//! Two execution modes share one algorithm: [`Simulator::simulate`] drains a
//! [`StepwiseRun`] to completion, and [`Simulator::stepwise`] hands the
//! cursor to the caller so interactive front ends can pace the run
//! themselves. Both produce identical traces and verdicts for the same
//! input.

use crate::machine::MachineDefinition;
use crate::tape::Tape;
use crate::trace::Configuration;
use crate::transition::Transition;
use crate::types::{MachineError, Verdict, DEFAULT_MAX_STEPS};

/// The result of a completed simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The terminal verdict.
    pub verdict: Verdict,
    /// Every configuration produced, in strictly increasing step order.
    /// Empty only for input rejected before the tape was built.
    pub trace: Vec<Configuration>,
    /// Human-readable description of the result.
    pub message: String,
}

impl Outcome {
    /// Returns `true` iff the run ended in acceptance.
    pub fn accepted(&self) -> bool {
        self.verdict.is_accepted()
    }

    /// Returns the number of transitions applied.
    pub fn steps(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }
}

/// Runs simulations against a shared, read-only machine definition.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'m> {
    machine: &'m MachineDefinition,
    max_steps: usize,
}

impl<'m> Simulator<'m> {
    /// Creates a simulator with the default step ceiling.
    pub fn new(machine: &'m MachineDefinition) -> Self {
        Self {
            machine,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Creates a simulator with a caller-chosen step ceiling.
    pub fn with_max_steps(machine: &'m MachineDefinition, max_steps: usize) -> Self {
        Self { machine, max_steps }
    }

    /// Runs the machine on `input` to completion.
    pub fn simulate(&self, input: &str) -> Outcome {
        self.stepwise(input).run_to_completion()
    }

    /// Creates a single-step cursor over the run for `input`.
    pub fn stepwise(&self, input: &str) -> StepwiseRun<'m> {
        StepwiseRun::new(self.machine, input, self.max_steps)
    }

    /// Runs every input in order, pairing each with its outcome.
    pub fn simulate_all(&self, inputs: &[String]) -> Vec<(String, Outcome)> {
        inputs
            .iter()
            .map(|input| (input.clone(), self.simulate(input)))
            .collect()
    }
}

/// An explicit cursor over one simulation run.
///
/// `next_step` advances the machine by one transition at a time and returns
/// the configuration it produced, or `None` once a terminal verdict has
/// been recorded. The trace accumulates internally and is surrendered by
/// [`StepwiseRun::run_to_completion`].
#[derive(Debug, Clone)]
pub struct StepwiseRun<'m> {
    machine: &'m MachineDefinition,
    max_steps: usize,
    state: String,
    tape: Tape,
    step: usize,
    trace: Vec<Configuration>,
    verdict: Verdict,
    message: String,
}

impl<'m> StepwiseRun<'m> {
    fn new(machine: &'m MachineDefinition, input: &str, max_steps: usize) -> Self {
        let state = machine.initial_state().to_string();

        // Invalid input short-circuits before any tape is built: the trace
        // stays empty and the verdict is terminal from the start.
        if !machine.validate_input(input) {
            let symbols = machine.invalid_symbols(input);
            let message = format!(
                "Input rejected: contains symbols outside the input alphabet: {:?}",
                symbols
            );
            return Self {
                machine,
                max_steps,
                state,
                tape: Tape::new("", machine.blank()),
                step: 0,
                trace: Vec::new(),
                verdict: Verdict::RejectedInvalidInput { symbols },
                message,
            };
        }

        let tape = machine.new_tape(input);
        let trace = vec![Configuration::capture(&state, &tape, 0, None)];

        Self {
            machine,
            max_steps,
            state,
            tape,
            step: 0,
            trace,
            verdict: Verdict::Running,
            message: String::new(),
        }
    }

    /// Advances the run by one transition.
    ///
    /// Returns the configuration the transition produced, or `None` once the
    /// run is terminal; the verdict and message are recorded as side state.
    /// The acceptance check precedes transition application, so a machine
    /// that reaches an accept state halts without consuming a further
    /// transition even if one would apply.
    pub fn next_step(&mut self) -> Option<Configuration> {
        if self.verdict.is_terminal() {
            return None;
        }

        // The ceiling gates the whole iteration, acceptance included, so a
        // machine accepting exactly at the ceiling still reports exhaustion.
        if self.step >= self.max_steps {
            self.verdict = Verdict::StepLimitExceeded {
                limit: self.max_steps,
            };
            self.message = format!(
                "Simulation stopped: step limit of {} reached",
                self.max_steps
            );
            return None;
        }

        if self.machine.is_accept(&self.state) {
            self.verdict = Verdict::Accepted { steps: self.step };
            self.message = format!("Input accepted in {} steps", self.step);
            return None;
        }

        let symbol = self.tape.read();
        let transition = match self.machine.lookup(&self.state, &[symbol]) {
            Some(transition) => transition.clone(),
            None => {
                self.verdict = Verdict::RejectedNoTransition {
                    state: self.state.clone(),
                    symbol,
                    step: self.step,
                };
                self.message = format!(
                    "Input rejected: no transition from state '{}' reading '{}' at step {}",
                    self.state, symbol, self.step
                );
                return None;
            }
        };

        match self.apply(&transition) {
            Ok(()) => {
                let config = Configuration::capture(
                    &self.state,
                    &self.tape,
                    self.step,
                    Some(transition.to_string()),
                );
                self.trace.push(config.clone());
                Some(config)
            }
            Err(fault) => {
                self.verdict = Verdict::RuntimeFault { step: self.step };
                self.message = format!("Runtime fault at step {}: {}", self.step, fault);
                None
            }
        }
    }

    fn apply(&mut self, transition: &Transition) -> Result<(), MachineError> {
        // Tape operations are total; the only representable fault is a
        // transition whose write list is empty, which validation normally
        // rules out.
        let symbol = transition.write.first().copied().ok_or_else(|| {
            MachineError::ValidationError(format!("transition '{}' writes no symbol", transition))
        })?;

        self.tape.write(symbol);
        self.tape.step(transition.direction);
        self.state = transition.to_state.clone();
        self.step += 1;
        Ok(())
    }

    /// Drains the remaining steps and returns the final outcome.
    pub fn run_to_completion(mut self) -> Outcome {
        while !self.verdict.is_terminal() {
            self.next_step();
        }

        Outcome {
            verdict: self.verdict,
            trace: self.trace,
            message: self.message,
        }
    }

    /// Returns the most recent configuration, if any was produced.
    pub fn current(&self) -> Option<&Configuration> {
        self.trace.last()
    }

    /// Returns the configurations produced so far.
    pub fn trace(&self) -> &[Configuration] {
        &self.trace
    }

    /// Returns the verdict recorded so far (`Running` until terminal).
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Returns the result message (empty until terminal).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` once a terminal verdict has been recorded.
    pub fn is_finished(&self) -> bool {
        self.verdict.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::Transition;
    use crate::types::Direction;

    fn t(from: &str, read: char, write: char, direction: Direction, to: &str) -> Transition {
        Transition::new(from, vec![read], vec![write], direction, to).unwrap()
    }

    /// The mark-and-scan recognizer for a^n b^n (this variant also accepts
    /// the empty string via its q0-on-blank rule).
    fn anbn() -> MachineDefinition {
        MachineDefinition::new(
            ["q0", "q1", "q2", "qf"].map(String::from).to_vec(),
            vec!['a', 'b'],
            vec!['a', 'b', 'B', 'X', 'Y'],
            "q0",
            vec!["qf".to_string()],
            vec![
                t("q0", 'a', 'X', Direction::Right, "q1"),
                t("q0", 'Y', 'Y', Direction::Right, "q0"),
                t("q0", 'B', 'B', Direction::Stay, "qf"),
                t("q1", 'a', 'a', Direction::Right, "q1"),
                t("q1", 'Y', 'Y', Direction::Right, "q1"),
                t("q1", 'b', 'Y', Direction::Left, "q2"),
                t("q2", 'Y', 'Y', Direction::Left, "q2"),
                t("q2", 'a', 'a', Direction::Left, "q2"),
                t("q2", 'X', 'X', Direction::Right, "q0"),
            ],
            'B',
        )
        .unwrap()
    }

    /// A machine that loops forever on its single state.
    fn self_loop() -> MachineDefinition {
        MachineDefinition::new(
            vec!["q0".to_string()],
            vec!['a'],
            vec!['a', 'B'],
            "q0",
            vec![],
            vec![
                t("q0", 'a', 'a', Direction::Stay, "q0"),
                t("q0", 'B', 'B', Direction::Stay, "q0"),
            ],
            'B',
        )
        .unwrap()
    }

    #[test]
    fn test_balanced_input_accepted() {
        let machine = anbn();
        let outcome = Simulator::new(&machine).simulate("aabb");

        assert_eq!(outcome.verdict, Verdict::Accepted { steps: 13 });
        assert!(outcome.accepted());
        assert_eq!(outcome.steps(), 13);
        assert_eq!(outcome.message, "Input accepted in 13 steps");

        // The final configuration's state is an accept state.
        let last = outcome.trace.last().unwrap();
        assert!(machine.is_accept(&last.state));
    }

    #[test]
    fn test_unbalanced_input_rejected_without_transition() {
        let machine = anbn();
        let outcome = Simulator::new(&machine).simulate("aab");

        assert_eq!(
            outcome.verdict,
            Verdict::RejectedNoTransition {
                state: "q1".to_string(),
                symbol: 'B',
                step: 7,
            }
        );
        assert!(!outcome.trace.is_empty());
        assert!(outcome.message.contains("no transition"));
    }

    #[test]
    fn test_wrong_order_rejected_at_step_zero() {
        let machine = anbn();
        let outcome = Simulator::new(&machine).simulate("ba");

        assert_eq!(
            outcome.verdict,
            Verdict::RejectedNoTransition {
                state: "q0".to_string(),
                symbol: 'b',
                step: 0,
            }
        );
        // Only the initial configuration was produced.
        assert_eq!(outcome.trace.len(), 1);
    }

    #[test]
    fn test_empty_input_pinned_to_machine_transitions() {
        // Empty input trivially passes validation; the machine reads the
        // blank at step 0 and this variant's q0-on-blank rule accepts.
        let machine = anbn();
        let outcome = Simulator::new(&machine).simulate("");

        assert_eq!(outcome.verdict, Verdict::Accepted { steps: 1 });
        assert_eq!(outcome.trace[0].tape, "B");
    }

    #[test]
    fn test_invalid_input_rejected_with_empty_trace() {
        let machine = anbn();
        let outcome = Simulator::new(&machine).simulate("aXc");

        assert_eq!(
            outcome.verdict,
            Verdict::RejectedInvalidInput {
                symbols: vec!['X', 'c'],
            }
        );
        assert!(outcome.trace.is_empty());
        assert!(outcome.message.contains("['X', 'c']"));
    }

    #[test]
    fn test_trace_steps_are_contiguous_from_zero() {
        let machine = anbn();
        let outcome = Simulator::new(&machine).simulate("aabb");

        for (i, config) in outcome.trace.iter().enumerate() {
            assert_eq!(config.step, i);
        }
        assert!(outcome.trace[0].transition.is_none());
        assert!(outcome.trace[1..].iter().all(|c| c.transition.is_some()));
    }

    #[test]
    fn test_reruns_are_deterministic() {
        let machine = anbn();
        let simulator = Simulator::new(&machine);

        let first = simulator.simulate("aaabbb");
        let second = simulator.simulate("aaabbb");

        assert_eq!(first, second);
    }

    #[test]
    fn test_step_limit_yields_exact_trace_length() {
        let machine = self_loop();
        let outcome = Simulator::with_max_steps(&machine, 100).simulate("a");

        assert_eq!(outcome.verdict, Verdict::StepLimitExceeded { limit: 100 });
        assert_eq!(outcome.trace.len(), 101);
        assert_eq!(outcome.trace.last().unwrap().step, 100);
        assert!(outcome.message.contains("100"));
    }

    #[test]
    fn test_acceptance_exactly_at_ceiling_reports_exhaustion() {
        // The ceiling gates the whole iteration, so a machine whose accept
        // state is reached by the final permitted transition still reports
        // step exhaustion, matching the batch loop's semantics.
        let machine = MachineDefinition::new(
            ["q0", "qf"].map(String::from).to_vec(),
            vec!['a'],
            vec!['a', 'B'],
            "q0",
            vec!["qf".to_string()],
            vec![t("q0", 'a', 'a', Direction::Right, "qf")],
            'B',
        )
        .unwrap();

        let outcome = Simulator::with_max_steps(&machine, 1).simulate("a");
        assert_eq!(outcome.verdict, Verdict::StepLimitExceeded { limit: 1 });

        let relaxed = Simulator::with_max_steps(&machine, 2).simulate("a");
        assert_eq!(relaxed.verdict, Verdict::Accepted { steps: 1 });
    }

    #[test]
    fn test_stepwise_matches_batch_mode() {
        let machine = anbn();
        let simulator = Simulator::new(&machine);

        for input in ["aabb", "aab", "ba", "", "abab"] {
            let batch = simulator.simulate(input);

            let mut run = simulator.stepwise(input);
            while run.next_step().is_some() {}
            let stepwise = run.run_to_completion();

            assert_eq!(batch, stepwise, "modes diverged for input {:?}", input);
        }
    }

    #[test]
    fn test_stepwise_cursor_reports_progress() {
        let machine = anbn();
        let mut run = Simulator::new(&machine).stepwise("aabb");

        assert_eq!(run.verdict(), &Verdict::Running);
        assert!(!run.is_finished());
        assert_eq!(run.current().unwrap().step, 0);

        let first = run.next_step().unwrap();
        assert_eq!(first.step, 1);
        assert_eq!(run.current(), Some(&first));
        assert_eq!(run.trace().len(), 2);

        while run.next_step().is_some() {}
        assert!(run.is_finished());
        assert!(run.verdict().is_accepted());
        assert_eq!(run.message(), "Input accepted in 13 steps");
    }

    #[test]
    fn test_stepwise_invalid_input_is_terminal_from_the_start() {
        let machine = anbn();
        let mut run = Simulator::new(&machine).stepwise("zz");

        assert!(run.is_finished());
        assert!(run.current().is_none());
        assert_eq!(run.next_step(), None);

        let outcome = run.run_to_completion();
        assert!(matches!(
            outcome.verdict,
            Verdict::RejectedInvalidInput { .. }
        ));
    }

    #[test]
    fn test_simulate_all_preserves_input_order() {
        let machine = anbn();
        let inputs = vec!["ab".to_string(), "ba".to_string()];
        let results = Simulator::new(&machine).simulate_all(&inputs);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "ab");
        assert!(results[0].1.accepted());
        assert_eq!(results[1].0, "ba");
        assert!(!results[1].1.accepted());
    }

    #[test]
    fn test_trace_snapshots_reflect_tape_as_read() {
        let machine = anbn();
        let outcome = Simulator::new(&machine).simulate("ab");

        // Step 0 must show the untouched input even though the tape was
        // overwritten during later steps.
        assert_eq!(outcome.trace[0].tape, "ab");
        assert_eq!(outcome.trace[1].tape, "Xb");
    }

    #[test]
    fn test_shared_definition_across_simulators() {
        let machine = anbn();
        let one = Simulator::new(&machine);
        let two = Simulator::with_max_steps(&machine, 50);

        assert!(one.simulate("ab").accepted());
        assert!(two.simulate("ab").accepted());
    }
}
