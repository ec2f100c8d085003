//! The nondeterministic single-tape engine.
//!
//! Exploration is an explicit breadth-first worklist of owned configurations
//! rather than recursion: branch lifetime and tape ownership stay explicit,
//! and the exploration budget is a plain counter check. Sibling alternatives
//! are expanded in definition order, which fixes the reported path order.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::tape::Tape;
use crate::types::{Action, MachineDefinition, MachineError, Snapshot};
use crate::validator;

/// One in-flight branch of the exploration: a machine state, an owned tape
/// copy, and the snapshots of every configuration that led here.
#[derive(Debug, Clone)]
struct Configuration {
    state: String,
    tape: Tape,
    path: Vec<Snapshot>,
}

/// The result of one breadth-first exploration.
///
/// The engine never claims "rejected" outright: an empty `accepted_paths`
/// with `timeout == false` is the only sound basis for rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploration {
    /// Every accepting run found, in breadth-first discovery order, so the
    /// shortest accepting run comes first.
    pub accepted_paths: Vec<Vec<Snapshot>>,
    /// The number of configurations dequeued, including discarded branches.
    pub paths_explored: usize,
    /// True when the budget ran out with configurations still unexplored.
    pub timeout: bool,
}

/// A nondeterministic single-tape Turing machine. The table maps
/// `(state, symbol)` to an ordered, non-empty list of alternatives.
pub struct NondeterministicMachine {
    table: HashMap<(String, char), Vec<Action>>,
    initial_state: String,
    accept_states: HashSet<String>,
    input_alphabet: HashSet<char>,
    blank: char,
}

impl NondeterministicMachine {
    /// Builds a machine from a wire definition, validating it eagerly.
    /// Several rules may share a `(state, read)` pair; they become that key's
    /// alternatives in definition order.
    pub fn from_definition(def: &MachineDefinition) -> Result<Self, MachineError> {
        validator::validate(def)?;

        if def.arity() != 1 {
            return Err(MachineError::InvalidDefinition(format!(
                "nondeterministic machines are single-tape, definition has arity {}",
                def.arity()
            )));
        }

        let mut table: HashMap<(String, char), Vec<Action>> = HashMap::new();
        for rule in &def.rules {
            table
                .entry((rule.state.clone(), rule.read[0]))
                .or_default()
                .push(Action {
                    write: rule.write[0],
                    direction: rule.directions[0],
                    next_state: rule.next_state.clone(),
                });
        }

        Ok(Self {
            table,
            initial_state: def.initial_state.clone(),
            accept_states: def.accept_states.iter().cloned().collect(),
            input_alphabet: def.input_alphabet.iter().copied().collect(),
            blank: def.blank,
        })
    }

    /// Explores the configuration tree reachable from `word` breadth-first,
    /// dequeuing at most `path_budget` configurations.
    ///
    /// An accepting configuration terminates its branch and contributes its
    /// full path; a configuration with no applicable transition is silently
    /// discarded. Both count toward `paths_explored`.
    pub fn simulate(&self, word: &str, path_budget: usize) -> Result<Exploration, MachineError> {
        self.check_word(word)?;

        let mut worklist: VecDeque<Configuration> = VecDeque::new();
        worklist.push_back(Configuration {
            state: self.initial_state.clone(),
            tape: Tape::new(word, self.blank),
            path: Vec::new(),
        });

        let mut accepted_paths: Vec<Vec<Snapshot>> = Vec::new();
        let mut paths_explored = 0;

        while paths_explored < path_budget {
            let Some(mut config) = worklist.pop_front() else {
                break;
            };
            paths_explored += 1;

            let snapshot = Snapshot {
                step: config.path.len(),
                state: config.state.clone(),
                symbol: config.tape.read(),
                head: config.tape.head(),
                tape: config.tape.render(),
            };

            if self.accept_states.contains(&config.state) {
                config.path.push(snapshot);
                accepted_paths.push(config.path);
                continue;
            }

            let symbol = config.tape.read();
            let Some(alternatives) = self.table.get(&(config.state.clone(), symbol)) else {
                // No applicable transition: the branch dies here.
                continue;
            };

            for action in alternatives {
                let mut tape = config.tape.clone();
                tape.write(action.write);
                tape.shift(action.direction);

                let mut path = config.path.clone();
                path.push(snapshot.clone());

                worklist.push_back(Configuration {
                    state: action.next_state.clone(),
                    tape,
                    path,
                });
            }
        }

        Ok(Exploration {
            accepted_paths,
            paths_explored,
            timeout: !worklist.is_empty(),
        })
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
