//! This crate provides the core logic for a deterministic single-tape
//! Turing machine simulator. It includes the unbounded tape, the
//! deterministic transition table, validated machine definitions, and a
//! simulation engine that reports a verdict together with the full trace of
//! instantaneous descriptions. A JSON loader and an embedded sample catalog
//! round out the library for front ends.

pub mod catalog;
pub mod loader;
pub mod machine;
pub mod simulator;
pub mod tape;
pub mod trace;
pub mod transition;
pub mod types;

/// Re-exports the embedded sample registry from the catalog module.
pub use catalog::{Catalog, CATALOG};
/// Re-exports the definition/input loading entry points.
pub use loader::{DefinitionLoader, DefinitionSpec, TransitionSpec};
/// Re-exports the `MachineDefinition` struct from the machine module.
pub use machine::MachineDefinition;
/// Re-exports the simulation engine from the simulator module.
pub use simulator::{Outcome, Simulator, StepwiseRun};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the `Configuration` snapshot from the trace module.
pub use trace::Configuration;
/// Re-exports the transition table types from the transition module.
pub use transition::{Transition, TransitionTable};
/// Re-exports shared types and constants from the types module.
pub use types::{
    Direction, MachineError, State, Verdict, DEFAULT_BLANK_SYMBOL, DEFAULT_MAX_STEPS,
};
