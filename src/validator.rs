//! Eager validation of machine definitions.
//!
//! Every engine constructor runs [`validate`] before building its lookup
//! table, so a running machine never has to re-check membership or arity
//! invariants mid-step.

use std::collections::HashSet;

use crate::types::{MachineDefinition, MachineError};

/// Represents the individual invariant violations a definition can exhibit.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DefinitionError {
    /// The initial state is not a member of the declared state set.
    UnknownInitialState(String),
    /// Accepting states that are not members of the declared state set.
    UnknownAcceptStates(Vec<String>),
    /// Input-alphabet symbols missing from the working alphabet.
    InputOutsideWorkAlphabet(Vec<char>),
    /// The blank symbol is not a member of the working alphabet.
    BlankOutsideWorkAlphabet(char),
    /// The blank symbol was declared as part of the input alphabet.
    BlankInInputAlphabet(char),
    /// A rule references a state outside the declared state set.
    UnknownRuleState(String),
    /// A rule reads or writes a symbol outside the working alphabet.
    SymbolOutsideWorkAlphabet(char),
    /// Rules disagree on tape arity, or read/write/directions lengths differ.
    InconsistentArity(String),
}

impl From<DefinitionError> for MachineError {
    fn from(error: DefinitionError) -> Self {
        let message = match error {
            DefinitionError::UnknownInitialState(state) => {
                format!("initial state `{}` is not in the state set", state)
            }
            DefinitionError::UnknownAcceptStates(states) => {
                format!("accepting states not in the state set: {:?}", states)
            }
            DefinitionError::InputOutsideWorkAlphabet(symbols) => format!(
                "input alphabet symbols missing from the work alphabet: {:?}",
                symbols
            ),
            DefinitionError::BlankOutsideWorkAlphabet(blank) => {
                format!("blank symbol `{}` is not in the work alphabet", blank)
            }
            DefinitionError::BlankInInputAlphabet(blank) => {
                format!("blank symbol `{}` must not be in the input alphabet", blank)
            }
            DefinitionError::UnknownRuleState(state) => {
                format!("rule references unknown state `{}`", state)
            }
            DefinitionError::SymbolOutsideWorkAlphabet(symbol) => {
                format!("rule references symbol `{}` outside the work alphabet", symbol)
            }
            DefinitionError::InconsistentArity(detail) => detail,
        };
        MachineError::InvalidDefinition(message)
    }
}

/// Validates a machine definition against the construction-time invariants.
///
/// Returns the first violation found, converted into
/// [`MachineError::InvalidDefinition`].
pub fn validate(def: &MachineDefinition) -> Result<(), MachineError> {
    let checks = [check_states, check_alphabets, check_arity, check_rules];

    for check in checks {
        check(def)?;
    }

    Ok(())
}

/// Checks that the initial state and all accepting states belong to the
/// declared state set.
fn check_states(def: &MachineDefinition) -> Result<(), DefinitionError> {
    let states: HashSet<&String> = def.states.iter().collect();

    if !states.contains(&def.initial_state) {
        return Err(DefinitionError::UnknownInitialState(
            def.initial_state.clone(),
        ));
    }

    let mut unknown: Vec<String> = def
        .accept_states
        .iter()
        .filter(|state| !states.contains(state))
        .cloned()
        .collect();

    if !unknown.is_empty() {
        unknown.sort();
        return Err(DefinitionError::UnknownAcceptStates(unknown));
    }

    Ok(())
}

/// Checks the alphabet containment invariants: input alphabet inside the work
/// alphabet, blank inside the work alphabet but outside the input alphabet.
fn check_alphabets(def: &MachineDefinition) -> Result<(), DefinitionError> {
    let work: HashSet<char> = def.work_alphabet.iter().copied().collect();

    let mut missing: Vec<char> = def
        .input_alphabet
        .iter()
        .filter(|c| !work.contains(c))
        .copied()
        .collect();

    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(DefinitionError::InputOutsideWorkAlphabet(missing));
    }

    if !work.contains(&def.blank) {
        return Err(DefinitionError::BlankOutsideWorkAlphabet(def.blank));
    }

    if def.input_alphabet.contains(&def.blank) {
        return Err(DefinitionError::BlankInInputAlphabet(def.blank));
    }

    Ok(())
}

/// Checks that every rule has the same tape arity and that read, write, and
/// direction vectors agree in length.
fn check_arity(def: &MachineDefinition) -> Result<(), DefinitionError> {
    let arity = def.arity();

    if arity == 0 {
        return Err(DefinitionError::InconsistentArity(
            "rules must cover at least one tape".to_string(),
        ));
    }

    for rule in &def.rules {
        if rule.read.len() != arity
            || rule.write.len() != arity
            || rule.directions.len() != arity
        {
            return Err(DefinitionError::InconsistentArity(format!(
                "rule in state `{}` does not have arity {}",
                rule.state, arity
            )));
        }
    }

    Ok(())
}

/// Checks that every rule only references declared states and work-alphabet
/// symbols.
fn check_rules(def: &MachineDefinition) -> Result<(), DefinitionError> {
    let states: HashSet<&String> = def.states.iter().collect();
    let work: HashSet<char> = def.work_alphabet.iter().copied().collect();

    for rule in &def.rules {
        if !states.contains(&rule.state) {
            return Err(DefinitionError::UnknownRuleState(rule.state.clone()));
        }
        if !states.contains(&rule.next_state) {
            return Err(DefinitionError::UnknownRuleState(rule.next_state.clone()));
        }
        for symbol in rule.read.iter().chain(rule.write.iter()) {
            if !work.contains(symbol) {
                return Err(DefinitionError::SymbolOutsideWorkAlphabet(*symbol));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Rule};

    fn base_definition() -> MachineDefinition {
        MachineDefinition {
            name: "validator test".to_string(),
            states: vec!["q0".to_string(), "q_acc".to_string()],
            input_alphabet: vec!['a'],
            work_alphabet: vec!['a', 'X', '_'],
            blank: '_',
            initial_state: "q0".to_string(),
            accept_states: vec!["q_acc".to_string()],
            rules: vec![Rule {
                state: "q0".to_string(),
                read: vec!['a'],
                write: vec!['X'],
                directions: vec![Direction::Right],
                next_state: "q_acc".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_definition() {
        assert!(validate(&base_definition()).is_ok());
    }

    #[test]
    fn test_unknown_initial_state() {
        let mut def = base_definition();
        def.initial_state = "q9".to_string();

        let result = check_states(&def);
        assert_eq!(
            result,
            Err(DefinitionError::UnknownInitialState("q9".to_string()))
        );
    }

    #[test]
    fn test_accept_states_must_be_declared() {
        let mut def = base_definition();
        def.accept_states.push("ghost".to_string());

        let result = check_states(&def);
        assert_eq!(
            result,
            Err(DefinitionError::UnknownAcceptStates(vec![
                "ghost".to_string()
            ]))
        );
    }

    #[test]
    fn test_input_alphabet_must_be_in_work_alphabet() {
        let mut def = base_definition();
        def.input_alphabet.push('z');

        let result = check_alphabets(&def);
        assert_eq!(
            result,
            Err(DefinitionError::InputOutsideWorkAlphabet(vec!['z']))
        );
    }

    #[test]
    fn test_blank_must_not_be_input_symbol() {
        let mut def = base_definition();
        def.input_alphabet.push('_');

        let result = check_alphabets(&def);
        assert_eq!(result, Err(DefinitionError::BlankInInputAlphabet('_')));
    }

    #[test]
    fn test_rule_with_unknown_next_state() {
        let mut def = base_definition();
        def.rules[0].next_state = "nowhere".to_string();

        let result = check_rules(&def);
        assert_eq!(
            result,
            Err(DefinitionError::UnknownRuleState("nowhere".to_string()))
        );
    }

    #[test]
    fn test_rule_with_foreign_symbol() {
        let mut def = base_definition();
        def.rules[0].write = vec!['?'];

        let result = check_rules(&def);
        assert_eq!(result, Err(DefinitionError::SymbolOutsideWorkAlphabet('?')));
    }

    #[test]
    fn test_inconsistent_arity() {
        let mut def = base_definition();
        def.rules.push(Rule {
            state: "q0".to_string(),
            read: vec!['a', 'a'],
            write: vec!['a', 'a'],
            directions: vec![Direction::Right, Direction::Right],
            next_state: "q0".to_string(),
        });

        let result = check_arity(&def);
        assert!(matches!(result, Err(DefinitionError::InconsistentArity(_))));
    }

    #[test]
    fn test_validate_converts_to_machine_error() {
        let mut def = base_definition();
        def.initial_state = "q9".to_string();

        match validate(&def) {
            Err(MachineError::InvalidDefinition(message)) => {
                assert!(message.contains("initial state"));
                assert!(message.contains("q9"));
            }
            other => panic!("expected InvalidDefinition, got {:?}", other),
        }
    }
}
