//! The deterministic single-tape engine.
//!
//! One configuration at a time, one applicable transition per step. The
//! universal machine reuses this engine on a decoded table, so the step and
//! halt logic here is the single source of truth for deterministic execution.

use std::collections::{HashMap, HashSet};

use crate::tape::Tape;
use crate::types::{Action, MachineDefinition, MachineError, Snapshot};
use crate::validator;

/// Why a run stopped without accepting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaltReason {
    /// No table entry for the current state and symbol(s). A local, expected
    /// outcome, reported as a rejection.
    UndefinedTransition {
        /// The state the machine was in.
        state: String,
        /// The symbol(s) under the head(s).
        symbols: Vec<char>,
    },
    /// The step budget elapsed before the machine halted.
    StepBudgetExceeded,
}

/// The result of one deterministic run: a pure function of the machine, the
/// input word, and the step budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Whether an accepting state was reached.
    pub accepted: bool,
    /// The state the machine stopped in.
    pub final_state: String,
    /// The materialized tape contents at the end of the run.
    pub final_tape: String,
    /// The head position at the end of the run.
    pub final_head: usize,
    /// The number of transitions applied.
    pub steps: usize,
    /// One snapshot per step, recorded before each transition.
    pub trace: Vec<Snapshot>,
    /// Why the run stopped, when it did not accept.
    pub reason: Option<HaltReason>,
}

/// A deterministic single-tape Turing machine with a validated transition
/// table keyed on `(state, symbol)`.
pub struct DeterministicMachine {
    table: HashMap<(String, char), Action>,
    initial_state: String,
    accept_states: HashSet<String>,
    input_alphabet: HashSet<char>,
    blank: char,
}

impl DeterministicMachine {
    /// Builds a machine from a wire definition, validating it eagerly.
    ///
    /// The definition must have arity 1 and at most one rule per
    /// `(state, symbol)` pair; anything else is an `InvalidDefinition`.
    pub fn from_definition(def: &MachineDefinition) -> Result<Self, MachineError> {
        validator::validate(def)?;

        if def.arity() != 1 {
            return Err(MachineError::InvalidDefinition(format!(
                "deterministic machines are single-tape, definition has arity {}",
                def.arity()
            )));
        }

        let mut table = HashMap::new();
        for rule in &def.rules {
            let key = (rule.state.clone(), rule.read[0]);
            let action = Action {
                write: rule.write[0],
                direction: rule.directions[0],
                next_state: rule.next_state.clone(),
            };
            if table.insert(key.clone(), action).is_some() {
                return Err(MachineError::InvalidDefinition(format!(
                    "duplicate transition for state `{}` and symbol `{}`",
                    key.0, key.1
                )));
            }
        }

        Ok(Self {
            table,
            initial_state: def.initial_state.clone(),
            accept_states: def.accept_states.iter().cloned().collect(),
            input_alphabet: def.input_alphabet.iter().copied().collect(),
            blank: def.blank,
        })
    }

    /// Builds a machine directly from an already validated table. Used by the
    /// universal machine, whose table comes from the unary decoder rather
    /// than a wire definition. The input alphabet is derived from the table
    /// so decoded words are never rejected as foreign.
    pub(crate) fn from_parts(
        table: HashMap<(String, char), Action>,
        initial_state: String,
        accept_states: HashSet<String>,
        blank: char,
    ) -> Self {
        let mut input_alphabet: HashSet<char> = table
            .iter()
            .flat_map(|((_, read), action)| [*read, action.write])
            .collect();
        input_alphabet.insert(blank);

        Self {
            table,
            initial_state,
            accept_states,
            input_alphabet,
            blank,
        }
    }

    /// Runs the machine on `word` for at most `max_steps` transitions.
    ///
    /// Each step records a snapshot of the current configuration before
    /// transitioning. The run stops on the first accepting state, on a
    /// missing table entry (rejection), or when the budget elapses (timeout,
    /// also a rejection).
    pub fn simulate(&self, word: &str, max_steps: usize) -> Result<RunOutcome, MachineError> {
        self.check_word(word)?;

        let mut tape = Tape::new(word, self.blank);
        let mut state = self.initial_state.clone();
        let mut trace: Vec<Snapshot> = Vec::new();

        for step in 0..max_steps {
            trace.push(Snapshot {
                step,
                state: state.clone(),
                symbol: tape.read(),
                head: tape.head(),
                tape: tape.render(),
            });

            if self.accept_states.contains(&state) {
                return Ok(RunOutcome {
                    accepted: true,
                    final_state: state,
                    final_tape: tape.render(),
                    final_head: tape.head(),
                    steps: step,
                    trace,
                    reason: None,
                });
            }

            let symbol = tape.read();
            let Some(action) = self.table.get(&(state.clone(), symbol)) else {
                let reason = HaltReason::UndefinedTransition {
                    state: state.clone(),
                    symbols: vec![symbol],
                };
                return Ok(RunOutcome {
                    accepted: false,
                    final_state: state,
                    final_tape: tape.render(),
                    final_head: tape.head(),
                    steps: step,
                    trace,
                    reason: Some(reason),
                });
            };

            tape.write(action.write);
            tape.shift(action.direction);
            state = action.next_state.clone();
        }

        Ok(RunOutcome {
            accepted: false,
            final_state: state,
            final_tape: tape.render(),
            final_head: tape.head(),
            steps: max_steps,
            trace,
            reason: Some(HaltReason::StepBudgetExceeded),
        })
    }

    /// Returns the initial state of the machine.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    /// Returns the blank symbol of the machine.
    pub fn blank(&self) -> char {
        self.blank
    }

    fn check_word(&self, word: &str) -> Result<(), MachineError> {
        let mut offending: Vec<char> = word
            .chars()
            .filter(|c| !self.input_alphabet.contains(c))
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            offending.sort_unstable();
            offending.dedup();
            Err(MachineError::InvalidWord(offending))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Rule};

    fn rule(state: &str, read: char, write: char, dir: Direction, next: &str) -> Rule {
        Rule {
            state: state.to_string(),
            read: vec![read],
            write: vec![write],
            directions: vec![dir],
            next_state: next.to_string(),
        }
    }

    /// Erase matching symbols from both ends until the word is exhausted.
    fn palindrome_definition() -> MachineDefinition {
        use Direction::{Left, Right, Stay};

        MachineDefinition {
            name: "palindrome".to_string(),
            states: ["q0", "qa", "qae", "qb", "qbe", "qr", "q_acc"]
                .map(String::from)
                .to_vec(),
            input_alphabet: vec!['a', 'b'],
            work_alphabet: vec!['a', 'b', '_'],
            blank: '_',
            initial_state: "q0".to_string(),
            accept_states: vec!["q_acc".to_string()],
            rules: vec![
                rule("q0", 'a', '_', Right, "qa"),
                rule("q0", 'b', '_', Right, "qb"),
                rule("q0", '_', '_', Stay, "q_acc"),
                rule("qa", 'a', 'a', Right, "qa"),
                rule("qa", 'b', 'b', Right, "qa"),
                rule("qa", '_', '_', Left, "qae"),
                rule("qae", 'a', '_', Left, "qr"),
                rule("qae", '_', '_', Stay, "q_acc"),
                rule("qb", 'a', 'a', Right, "qb"),
                rule("qb", 'b', 'b', Right, "qb"),
                rule("qb", '_', '_', Left, "qbe"),
                rule("qbe", 'b', '_', Left, "qr"),
                rule("qbe", '_', '_', Stay, "q_acc"),
                rule("qr", 'a', 'a', Left, "qr"),
                rule("qr", 'b', 'b', Left, "qr"),
                rule("qr", '_', '_', Right, "q0"),
            ],
        }
    }

    /// Mark one `a` as X, the matching `b` as Y, repeat.
    fn anbn_definition() -> MachineDefinition {
        use Direction::{Left, Right, Stay};

        MachineDefinition {
            name: "a^n b^n".to_string(),
            states: ["q0", "q1", "q2", "q3", "q_acc"].map(String::from).to_vec(),
            input_alphabet: vec!['a', 'b'],
            work_alphabet: vec!['a', 'b', 'X', 'Y', '_'],
            blank: '_',
            initial_state: "q0".to_string(),
            accept_states: vec!["q_acc".to_string()],
            rules: vec![
                rule("q0", 'a', 'X', Right, "q1"),
                rule("q0", 'Y', 'Y', Right, "q3"),
                rule("q0", '_', '_', Stay, "q_acc"),
                rule("q1", 'a', 'a', Right, "q1"),
                rule("q1", 'Y', 'Y', Right, "q1"),
                rule("q1", 'b', 'Y', Left, "q2"),
                rule("q2", 'a', 'a', Left, "q2"),
                rule("q2", 'Y', 'Y', Left, "q2"),
                rule("q2", 'X', 'X', Right, "q0"),
                rule("q3", 'Y', 'Y', Right, "q3"),
                rule("q3", '_', '_', Stay, "q_acc"),
            ],
        }
    }

    #[test]
    fn test_palindrome_machine() {
        let machine = DeterministicMachine::from_definition(&palindrome_definition()).unwrap();

        for word in ["", "a", "aba", "abba"] {
            let outcome = machine.simulate(word, 1000).unwrap();
            assert!(outcome.accepted, "expected `{}` to be accepted", word);
            assert_eq!(outcome.final_state, "q_acc");
            assert!(outcome.reason.is_none());
        }

        for word in ["ab", "aab"] {
            let outcome = machine.simulate(word, 1000).unwrap();
            assert!(!outcome.accepted, "expected `{}` to be rejected", word);
            assert!(matches!(
                outcome.reason,
                Some(HaltReason::UndefinedTransition { .. })
            ));
        }
    }

    #[test]
    fn test_anbn_machine() {
        let machine = DeterministicMachine::from_definition(&anbn_definition()).unwrap();

        for word in ["", "ab", "aabb", "aaabbb"] {
            let outcome = machine.simulate(word, 1000).unwrap();
            assert!(outcome.accepted, "expected `{}` to be accepted", word);
        }

        for word in ["a", "aab", "abb"] {
            let outcome = machine.simulate(word, 1000).unwrap();
            assert!(!outcome.accepted, "expected `{}` to be rejected", word);
        }
    }

    #[test]
    fn test_trace_records_configuration_before_transition() {
        let machine = DeterministicMachine::from_definition(&palindrome_definition()).unwrap();
        let outcome = machine.simulate("aba", 1000).unwrap();

        let first = &outcome.trace[0];
        assert_eq!(first.step, 0);
        assert_eq!(first.state, "q0");
        assert_eq!(first.symbol, 'a');
        assert_eq!(first.head, 0);
        assert_eq!(first.tape, "aba_");

        // The final snapshot is the accepting configuration itself.
        let last = outcome.trace.last().unwrap();
        assert_eq!(last.state, "q_acc");
        assert_eq!(outcome.trace.len(), outcome.steps + 1);
    }

    #[test]
    fn test_undefined_transition_reports_state_and_symbol() {
        let machine = DeterministicMachine::from_definition(&anbn_definition()).unwrap();
        let outcome = machine.simulate("abb", 1000).unwrap();

        match outcome.reason {
            Some(HaltReason::UndefinedTransition { state, symbols }) => {
                assert_eq!(state, "q3");
                assert_eq!(symbols, vec!['b']);
            }
            other => panic!("expected UndefinedTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_step_budget_exceeded() {
        // A single-state machine that shuttles right forever over blanks.
        let def = MachineDefinition {
            name: "spinner".to_string(),
            states: vec!["q0".to_string()],
            input_alphabet: vec![],
            work_alphabet: vec!['_'],
            blank: '_',
            initial_state: "q0".to_string(),
            accept_states: vec![],
            rules: vec![rule("q0", '_', '_', Direction::Right, "q0")],
        };
        let machine = DeterministicMachine::from_definition(&def).unwrap();

        let outcome = machine.simulate("", 25).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.steps, 25);
        assert_eq!(outcome.trace.len(), 25);
        assert_eq!(outcome.reason, Some(HaltReason::StepBudgetExceeded));
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let machine = DeterministicMachine::from_definition(&palindrome_definition()).unwrap();

        let first = machine.simulate("abba", 1000).unwrap();
        let second = machine.simulate("abba", 1000).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_word_outside_input_alphabet() {
        let machine = DeterministicMachine::from_definition(&palindrome_definition()).unwrap();

        let result = machine.simulate("abc", 1000);
        assert_eq!(result, Err(MachineError::InvalidWord(vec!['c'])));
    }

    #[test]
    fn test_duplicate_rule_is_rejected() {
        let mut def = palindrome_definition();
        def.rules.push(rule("q0", 'a', 'a', Direction::Right, "q0"));

        let result = DeterministicMachine::from_definition(&def);
        assert!(matches!(result, Err(MachineError::InvalidDefinition(_))));
    }

    #[test]
    fn test_multi_tape_definition_is_rejected() {
        let mut def = palindrome_definition();
        for r in &mut def.rules {
            r.read.push('_');
            r.write.push('_');
            r.directions.push(Direction::Stay);
        }

        let result = DeterministicMachine::from_definition(&def);
        assert!(matches!(result, Err(MachineError::InvalidDefinition(_))));
    }
}
