//! This module provides functions for analyzing persisted automaton
//! documents to detect common errors before they reach an engine. This
//! includes checks for a unique initial state, defined transition endpoints,
//! symbols within the declared alphabet, and reachable states.
//!
//! The engines themselves never validate any of this: a transition over an
//! undeclared symbol simply never fires. The analyzer is the editor-facing
//! layer that turns such mistakes into actionable messages instead.

use crate::document::AutomatonDocument;
use crate::types::AutomatonError;
use std::collections::HashSet;

/// Represents the errors that can be found during document analysis.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The document declares no states at all.
    NoStates,
    /// The declared alphabet is empty.
    EmptyAlphabet,
    /// Two states share the same label.
    DuplicateState(String),
    /// No state is marked initial.
    MissingInitialState,
    /// More than one state is marked initial.
    MultipleInitialStates(Vec<String>),
    /// A transition references a state the document does not define.
    UndefinedEndpoint(String),
    /// A transition is labeled with a symbol outside the declared alphabet.
    SymbolOutsideAlphabet(char),
    /// States defined in the document that cannot be reached from the
    /// initial state.
    UnreachableStates(Vec<String>),
}

impl From<AnalysisError> for AutomatonError {
    /// Converts an `AnalysisError` into an `AutomatonError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NoStates => {
                AutomatonError::ValidationError("No states defined".to_string())
            }
            AnalysisError::EmptyAlphabet => {
                AutomatonError::ValidationError("Empty alphabet".to_string())
            }
            AnalysisError::DuplicateState(name) => {
                AutomatonError::ValidationError(format!("Duplicate state name: {}", name))
            }
            AnalysisError::MissingInitialState => {
                AutomatonError::ValidationError("No initial state marked".to_string())
            }
            AnalysisError::MultipleInitialStates(names) => AutomatonError::ValidationError(
                format!("Multiple initial states marked: {:?}", names),
            ),
            AnalysisError::UndefinedEndpoint(endpoint) => AutomatonError::ValidationError(
                format!("Transition references undefined state: {}", endpoint),
            ),
            AnalysisError::SymbolOutsideAlphabet(symbol) => AutomatonError::ValidationError(
                format!("Transition symbol outside the alphabet: {}", symbol),
            ),
            AnalysisError::UnreachableStates(states) => AutomatonError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
        }
    }
}

/// Analyzes a persisted [`AutomatonDocument`] for structural and logical
/// errors.
///
/// Runs every check and reports the first failure, in a fixed order from the
/// cheapest structural check to the reachability analysis.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(AutomatonError::ValidationError)` for the first violated check.
pub fn analyze(document: &AutomatonDocument) -> Result<(), AutomatonError> {
    let errors = [
        check_structure,
        check_initial_state,
        check_endpoints,
        check_symbols,
        check_unreachable_states,
    ]
    .iter()
    .filter_map(|f| f(document).err())
    .collect::<Vec<_>>();

    if let Some(first_error) = errors.first() {
        return Err(first_error.clone().into());
    }

    Ok(())
}

/// Checks basic structural requirements: at least one state, a nonempty
/// alphabet, and unique state labels.
fn check_structure(document: &AutomatonDocument) -> Result<(), AnalysisError> {
    if document.states.is_empty() {
        return Err(AnalysisError::NoStates);
    }

    if document.alphabet.is_empty() {
        return Err(AnalysisError::EmptyAlphabet);
    }

    let mut seen = HashSet::new();
    for state in &document.states {
        if !seen.insert(state.name.as_str()) {
            return Err(AnalysisError::DuplicateState(state.name.clone()));
        }
    }

    Ok(())
}

/// Checks that exactly one state is marked initial.
fn check_initial_state(document: &AutomatonDocument) -> Result<(), AnalysisError> {
    let initial: Vec<String> = document
        .states
        .iter()
        .filter(|s| s.is_initial)
        .map(|s| s.name.clone())
        .collect();

    match initial.len() {
        0 => Err(AnalysisError::MissingInitialState),
        1 => Ok(()),
        _ => Err(AnalysisError::MultipleInitialStates(initial)),
    }
}

/// Checks that every transition endpoint names a defined state.
fn check_endpoints(document: &AutomatonDocument) -> Result<(), AnalysisError> {
    let defined: HashSet<&str> = document.state_names().into_iter().collect();

    for t in &document.transitions {
        if !defined.contains(t.from_state.as_str()) {
            return Err(AnalysisError::UndefinedEndpoint(t.from_state.clone()));
        }
        if !defined.contains(t.to_state.as_str()) {
            return Err(AnalysisError::UndefinedEndpoint(t.to_state.clone()));
        }
    }

    Ok(())
}

/// Checks that every transition symbol belongs to the declared alphabet.
fn check_symbols(document: &AutomatonDocument) -> Result<(), AnalysisError> {
    let alphabet: HashSet<char> = document.alphabet.iter().copied().collect();

    for t in &document.transitions {
        for &symbol in &t.symbols {
            if !alphabet.contains(&symbol) {
                return Err(AnalysisError::SymbolOutsideAlphabet(symbol));
            }
        }
    }

    Ok(())
}

/// Checks for unreachable states by traversing the transition entries from
/// the initial state.
fn check_unreachable_states(document: &AutomatonDocument) -> Result<(), AnalysisError> {
    let initial = match document.initial_state() {
        Some(initial) => initial.to_string(),
        // Reported by check_initial_state; nothing to traverse from.
        None => return Ok(()),
    };

    let mut visited = HashSet::new();
    let mut queue = vec![initial];

    while let Some(state) = queue.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }

        for t in &document.transitions {
            if t.from_state == state && !visited.contains(&t.to_state) {
                queue.push(t.to_state.clone());
            }
        }
    }

    let all_states: HashSet<String> =
        document.states.iter().map(|s| s.name.clone()).collect();
    let mut unreachable: Vec<String> = all_states.difference(&visited).cloned().collect();

    if !unreachable.is_empty() {
        unreachable.sort(); // Sort for deterministic output
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}
