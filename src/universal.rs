//! The universal machine: a deterministic interpreter for machines that
//! exist only as unary-encoded data.
//!
//! This is deliberately a thin specialization of
//! [`DeterministicMachine`](crate::machine::DeterministicMachine): the table
//! comes from [`crate::encoder::decode`] and the step and halt logic is the
//! shared deterministic routine, so the encode-decode-simulate round trip
//! agrees with direct execution by construction, not just by testing.

use std::collections::HashSet;

use crate::encoder;
use crate::machine::DeterministicMachine;
use crate::types::{MachineError, DEFAULT_BLANK_SYMBOL};

/// The result of one universal run, with the tape re-encoded into the unary
/// alphabet the caller supplied it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversalOutcome {
    /// Whether a caller-supplied accepting state was reached.
    pub accepted: bool,
    /// The unary code of the state the machine stopped in.
    pub final_state: String,
    /// The final tape contents, re-encoded as a word bitstring.
    pub final_tape: String,
    /// The head position at the end of the run.
    pub head: usize,
    /// The number of transitions applied.
    pub steps: usize,
}

/// A deterministic machine whose transition table was decoded from a unary
/// bitstring. States are unary codes; execution starts in `"1"`.
pub struct UniversalMachine {
    machine: DeterministicMachine,
}

impl UniversalMachine {
    /// Decodes `encoded_table` and builds the interpreter around it.
    /// `accept_states` are unary state codes (e.g. `"111"` for state index 2).
    pub fn new(encoded_table: &str, accept_states: &[&str]) -> Result<Self, MachineError> {
        let table = encoder::decode(encoded_table)?;
        let accept_states: HashSet<String> =
            accept_states.iter().map(|state| state.to_string()).collect();

        Ok(Self {
            machine: DeterministicMachine::from_parts(
                table,
                encoder::INITIAL_STATE_CODE.to_string(),
                accept_states,
                DEFAULT_BLANK_SYMBOL,
            ),
        })
    }

    /// Decodes `encoded_word`, runs the shared deterministic engine on it,
    /// and re-encodes the final tape.
    pub fn run(
        &self,
        encoded_word: &str,
        max_steps: usize,
    ) -> Result<UniversalOutcome, MachineError> {
        let word = encoder::decode_word(encoded_word)?;
        let outcome = self.machine.simulate(&word, max_steps)?;

        Ok(UniversalOutcome {
            accepted: outcome.accepted,
            final_state: outcome.final_state,
            final_tape: encoder::encode_word(&outcome.final_tape)?,
            head: outcome.final_head,
            steps: outcome.steps,
        })
    }
}
