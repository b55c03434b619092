//! This module models the persisted ZFlap automaton document: the diagram
//! states with their canvas placement, the declared alphabet, and the
//! transition entries, plus the conversions that turn a document into the
//! engine inputs (initial state, final-state set, transition relation).

use crate::relation::TransitionRelation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A diagram state as persisted: its label, canvas position, and whether it
/// is the initial and/or a final state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    /// The state label, unique within a document.
    pub name: String,
    /// Canvas x position.
    pub x: f64,
    /// Canvas y position.
    pub y: f64,
    /// Whether this is the initial state.
    pub is_initial: bool,
    /// Whether this is an accepting state.
    pub is_final: bool,
}

/// A persisted transition entry: one arrow of the diagram, carrying every
/// symbol it is labeled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    /// Source state label.
    pub from_state: String,
    /// Destination state label.
    pub to_state: String,
    /// The symbols labeling the arrow.
    pub symbols: Vec<char>,
}

/// A complete persisted automaton document.
///
/// The document is the editor's unit of persistence; the engines never see
/// it directly. [`AutomatonDocument::relation`], [`AutomatonDocument::initial_state`]
/// and [`AutomatonDocument::final_states`] produce the values the finite
/// engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    /// The automaton's display name.
    pub name: String,
    /// The declared alphabet, in declaration order.
    pub alphabet: Vec<char>,
    /// The diagram states, in file order.
    pub states: Vec<StateEntry>,
    /// The diagram transitions, in file order.
    pub transitions: Vec<TransitionEntry>,
}

impl AutomatonDocument {
    /// Returns the state marked initial, if any. Documents with zero or
    /// several initial states are rejected by [`crate::analyzer::analyze`].
    pub fn initial_state(&self) -> Option<&str> {
        self.states
            .iter()
            .find(|s| s.is_initial)
            .map(|s| s.name.as_str())
    }

    /// Collects the labels of all final states.
    pub fn final_states(&self) -> HashSet<String> {
        self.states
            .iter()
            .filter(|s| s.is_final)
            .map(|s| s.name.clone())
            .collect()
    }

    /// Builds the transition relation for the finite engine, expanding each
    /// multi-symbol arrow into one relation entry per symbol, in file order.
    pub fn relation(&self) -> TransitionRelation {
        let mut relation = TransitionRelation::new();
        for t in &self.transitions {
            for &symbol in &t.symbols {
                relation.add_transition(t.from_state.clone(), symbol, t.to_state.clone());
            }
        }
        relation
    }

    /// Returns the labels of all states, in file order.
    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name.as_str()).collect()
    }
}

impl fmt::Display for AutomatonDocument {
    /// Renders the document in the persisted line format; the output parses
    /// back to an equal document.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# ZFlap automaton")?;
        writeln!(f, "name: {}", self.name)?;

        let alphabet: Vec<String> = self.alphabet.iter().map(|c| c.to_string()).collect();
        writeln!(f, "alphabet: ({})", alphabet.join(","))?;

        writeln!(f, "[States]")?;
        for s in &self.states {
            writeln!(
                f,
                "{},{},{},{},{}",
                s.name,
                s.x,
                s.y,
                u8::from(s.is_initial),
                u8::from(s.is_final)
            )?;
        }

        writeln!(f, "[Transitions]")?;
        for t in &self.transitions {
            let symbols: Vec<String> = t.symbols.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{},{},{}", t.from_state, t.to_state, symbols.join("|"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> AutomatonDocument {
        AutomatonDocument {
            name: "Even binary".to_string(),
            alphabet: vec!['0', '1'],
            states: vec![
                StateEntry {
                    name: "S".to_string(),
                    x: 120.0,
                    y: 80.0,
                    is_initial: true,
                    is_final: false,
                },
                StateEntry {
                    name: "A".to_string(),
                    x: 260.0,
                    y: 80.0,
                    is_initial: false,
                    is_final: true,
                },
            ],
            transitions: vec![
                TransitionEntry {
                    from_state: "S".to_string(),
                    to_state: "S".to_string(),
                    symbols: vec!['0'],
                },
                TransitionEntry {
                    from_state: "S".to_string(),
                    to_state: "A".to_string(),
                    symbols: vec!['1'],
                },
                TransitionEntry {
                    from_state: "A".to_string(),
                    to_state: "A".to_string(),
                    symbols: vec!['0', '1'],
                },
            ],
        }
    }

    #[test]
    fn test_initial_and_final_states() {
        let document = sample_document();
        assert_eq!(document.initial_state(), Some("S"));
        assert_eq!(
            document.final_states(),
            ["A".to_string()].into_iter().collect()
        );
    }

    #[test]
    fn test_relation_expands_symbol_lists() {
        let document = sample_document();
        let relation = document.relation();

        assert_eq!(relation.next_states("S", '0'), ["S"]);
        assert_eq!(relation.next_states("S", '1'), ["A"]);
        assert_eq!(relation.next_states("A", '0'), ["A"]);
        assert_eq!(relation.next_states("A", '1'), ["A"]);
    }

    #[test]
    fn test_render_format() {
        let document = sample_document();
        let text = document.to_string();

        assert!(text.starts_with("# ZFlap automaton\n"));
        assert!(text.contains("name: Even binary\n"));
        assert!(text.contains("alphabet: (0,1)\n"));
        assert!(text.contains("[States]\nS,120,80,1,0\nA,260,80,0,1\n"));
        assert!(text.contains("[Transitions]\nS,S,0\nS,A,1\nA,A,0|1\n"));
    }

    #[test]
    fn test_document_drives_finite_engine() {
        // End to end: the sample recognizes strings containing a 1.
        let document = sample_document();
        let relation = document.relation();
        let initial = document.initial_state().unwrap();
        let finals = document.final_states();

        assert!(crate::finite::is_accepted(&relation, initial, &finals, "01"));
        assert!(crate::finite::is_accepted(&relation, initial, &finals, "100"));
        assert!(!crate::finite::is_accepted(&relation, initial, &finals, "000"));
        assert!(!crate::finite::is_accepted(&relation, initial, &finals, ""));
    }

    #[test]
    fn test_document_serde_round_trip() {
        let document = sample_document();
        let json = serde_json::to_string(&document).unwrap();
        let back: AutomatonDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(document, back);
    }
}
