//! Simulation core for abstract single- and multi-tape computing machines.
//!
//! The crate executes explicit transition tables and records what happened:
//! deterministic runs ([`machine`]), breadth-first nondeterministic
//! exploration ([`nondeterministic`]), synchronized k-tape execution
//! ([`multitape`]), and a self-hosted universal interpreter over
//! unary-encoded tables ([`encoder`], [`universal`]). Definitions arrive as
//! JSON wire data ([`types`], [`loader`]) and are validated eagerly
//! ([`validator`]) so no engine re-checks invariants mid-run.

pub mod encoder;
pub mod loader;
pub mod machine;
pub mod multitape;
pub mod nondeterministic;
pub mod tape;
pub mod types;
pub mod universal;
pub mod validator;

/// Re-exports the universal codec entry points.
pub use encoder::{decode, decode_word, encode, encode_word};
/// Re-exports the `DefinitionLoader` struct from the loader module.
pub use loader::DefinitionLoader;
/// Re-exports the deterministic engine and its outcome types.
pub use machine::{DeterministicMachine, HaltReason, RunOutcome};
/// Re-exports the multi-tape engine and its outcome types.
pub use multitape::{MultiRunOutcome, MultiSnapshot, MultiTapeMachine};
/// Re-exports the nondeterministic engine and its exploration result.
pub use nondeterministic::{Exploration, NondeterministicMachine};
/// Re-exports the tape model.
pub use tape::Tape;
/// Re-exports the shared data model and error type.
pub use types::{
    Direction, MachineDefinition, MachineError, Rule, Snapshot, DEFAULT_BLANK_SYMBOL,
    DEFAULT_MAX_STEPS, DEFAULT_PATH_BUDGET,
};
/// Re-exports the universal interpreter.
pub use universal::{UniversalMachine, UniversalOutcome};
/// Re-exports the eager definition validator.
pub use validator::validate;
