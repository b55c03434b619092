//! This module defines the `TransitionRelation`, the multi-valued transition
//! mapping `(state, symbol) -> [states]` that backs the finite-automaton
//! engine. Multiple destinations per key model non-determinism.

use std::collections::HashMap;

/// A non-deterministic finite-automaton transition relation.
///
/// The relation is a pure data structure with no search logic: the editor
/// builds it incrementally from the diagram and hands it by reference to the
/// query functions in [`crate::finite`]. Insertion order of the destinations
/// for one key is preserved, which fixes the enumeration order of
/// `generate_accepted` but never affects accept/reject outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionRelation {
    delta: HashMap<(String, char), Vec<String>>,
}

impl TransitionRelation {
    /// Creates an empty relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `to` to the destination list for `(from, symbol)`, creating
    /// the key if absent.
    ///
    /// No deduplication is performed: adding the same transition twice
    /// yields two identical entries, and `generate_accepted` will then emit
    /// the corresponding strings twice. Callers that need set semantics must
    /// deduplicate themselves.
    pub fn add_transition(
        &mut self,
        from: impl Into<String>,
        symbol: char,
        to: impl Into<String>,
    ) {
        self.delta
            .entry((from.into(), symbol))
            .or_default()
            .push(to.into());
    }

    /// Returns the destination states for `(from, symbol)`, in insertion
    /// order. A lookup for an absent key returns an empty slice, never an
    /// error.
    pub fn next_states(&self, from: &str, symbol: char) -> &[String] {
        self.delta
            .get(&(from.to_string(), symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Empties the relation. Used when the editor rebuilds it from the
    /// diagram.
    pub fn clear(&mut self) {
        self.delta.clear();
    }

    /// Returns `true` if the relation holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_is_empty_not_error() {
        let relation = TransitionRelation::new();
        assert!(relation.next_states("q0", 'a').is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q1");
        relation.add_transition("q0", 'a', "q2");
        relation.add_transition("q0", 'b', "q0");

        assert_eq!(relation.next_states("q0", 'a'), ["q1", "q2"]);
        assert_eq!(relation.next_states("q0", 'b'), ["q0"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q1");
        relation.add_transition("q0", 'a', "q1");

        assert_eq!(relation.next_states("q0", 'a'), ["q1", "q1"]);
    }

    #[test]
    fn test_clear() {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q1");
        assert!(!relation.is_empty());

        relation.clear();
        assert!(relation.is_empty());
        assert!(relation.next_states("q0", 'a').is_empty());
    }
}
