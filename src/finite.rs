//! This module implements the finite-automaton engine: breadth-first
//! exploration of a [`TransitionRelation`] to decide acceptance of a string
//! and to enumerate accepted strings up to a length bound.
//!
//! All functions are pure in their arguments. The relation is caller-owned
//! and only read; nothing is retained across calls.

use crate::relation::TransitionRelation;
use std::collections::{HashMap, HashSet, VecDeque};

/// Computes the set of states reachable from `initial` after consuming the
/// whole of `input`.
///
/// Layered breadth-first search over `(state, position)` pairs with a
/// visited set, so cyclic relations terminate: each pair is expanded at most
/// once. The result is empty iff no path consumes the full input;
/// `reachable_states(r, q, "")` is exactly `{q}` for any relation.
pub fn reachable_states(
    relation: &TransitionRelation,
    initial: &str,
    input: &str,
) -> HashSet<String> {
    let input: Vec<char> = input.chars().collect();
    let mut reached = HashSet::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    queue.push_back((initial.to_string(), 0));
    visited.insert((initial.to_string(), 0));

    while let Some((state, position)) = queue.pop_front() {
        if position == input.len() {
            reached.insert(state);
            continue;
        }

        for next in relation.next_states(&state, input[position]) {
            let entry = (next.clone(), position + 1);
            if visited.insert(entry.clone()) {
                queue.push_back(entry);
            }
        }
    }

    reached
}

/// Returns `true` iff some state reachable after consuming `input` is final.
pub fn is_accepted(
    relation: &TransitionRelation,
    initial: &str,
    finals: &HashSet<String>,
    input: &str,
) -> bool {
    reachable_states(relation, initial, input)
        .iter()
        .any(|state| finals.contains(state))
}

/// Enumerates the strings of length at most `max_length` over `alphabet`
/// that the automaton accepts, in breadth-first discovery order.
///
/// The empty string is emitted first when `initial` is itself final. With
/// `cycle_limit: Some(n)`, each exploration branch tracks how often it has
/// visited every state along its own path and prunes a move into a state
/// already visited `n` times on that path; this keeps generation tractable
/// on cyclic automata. With `None` the result is the literal list of all
/// accepted strings up to the bound.
///
/// Alphabet symbols absent from the relation simply contribute no
/// transitions. Duplicate destination entries in the relation cause the
/// corresponding strings to be emitted once per entry.
pub fn generate_accepted(
    relation: &TransitionRelation,
    initial: &str,
    finals: &HashSet<String>,
    alphabet: &[char],
    max_length: usize,
    cycle_limit: Option<usize>,
) -> Vec<String> {
    match cycle_limit {
        None => generate_unbounded(relation, initial, finals, alphabet, max_length),
        Some(limit) => generate_with_limit(relation, initial, finals, alphabet, max_length, limit),
    }
}

fn generate_unbounded(
    relation: &TransitionRelation,
    initial: &str,
    finals: &HashSet<String>,
    alphabet: &[char],
    max_length: usize,
) -> Vec<String> {
    let mut accepted = Vec::new();
    // (state, string, length in symbols). The length is carried explicitly
    // because `String::len` counts bytes, and multi-byte alphabet symbols
    // must still count as one toward the bound.
    let mut queue: VecDeque<(String, String, usize)> = VecDeque::new();

    if finals.contains(initial) {
        accepted.push(String::new());
    }

    queue.push_back((initial.to_string(), String::new(), 0));

    while let Some((state, string, length)) = queue.pop_front() {
        if length >= max_length {
            continue;
        }

        for &symbol in alphabet {
            for next in relation.next_states(&state, symbol) {
                let mut extended = string.clone();
                extended.push(symbol);

                if finals.contains(next) {
                    accepted.push(extended.clone());
                }

                if length + 1 < max_length {
                    queue.push_back((next.clone(), extended, length + 1));
                }
            }
        }
    }

    accepted
}

/// One branch of the cycle-limited generation search. The visit counts are
/// per-branch: sibling branches never observe each other's counts. The
/// length is in symbols, not bytes.
struct Branch {
    state: String,
    string: String,
    length: usize,
    visits: HashMap<String, usize>,
}

fn generate_with_limit(
    relation: &TransitionRelation,
    initial: &str,
    finals: &HashSet<String>,
    alphabet: &[char],
    max_length: usize,
    cycle_limit: usize,
) -> Vec<String> {
    let mut accepted = Vec::new();
    let mut queue: VecDeque<Branch> = VecDeque::new();

    if finals.contains(initial) {
        accepted.push(String::new());
    }

    let mut visits = HashMap::new();
    visits.insert(initial.to_string(), 1);
    queue.push_back(Branch {
        state: initial.to_string(),
        string: String::new(),
        length: 0,
        visits,
    });

    while let Some(branch) = queue.pop_front() {
        if branch.length >= max_length {
            continue;
        }

        for &symbol in alphabet {
            for next in relation.next_states(&branch.state, symbol) {
                let mut visits = branch.visits.clone();
                let count = visits.entry(next.clone()).or_insert(0);
                *count += 1;
                if *count > cycle_limit {
                    continue;
                }

                let mut extended = branch.string.clone();
                extended.push(symbol);

                if finals.contains(next) {
                    accepted.push(extended.clone());
                }

                if branch.length + 1 < max_length {
                    queue.push_back(Branch {
                        state: next.clone(),
                        string: extended,
                        length: branch.length + 1,
                        visits,
                    });
                }
            }
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finals(states: &[&str]) -> HashSet<String> {
        states.iter().map(|s| s.to_string()).collect()
    }

    /// q0 --a--> q0, q0 --a--> q1, q1 --b--> q2
    fn branching_nfa() -> TransitionRelation {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q0");
        relation.add_transition("q0", 'a', "q1");
        relation.add_transition("q1", 'b', "q2");
        relation
    }

    #[test]
    fn test_empty_input_reaches_exactly_initial() {
        let relation = branching_nfa();
        let reached = reachable_states(&relation, "q0", "");
        assert_eq!(reached, finals(&["q0"]));
    }

    #[test]
    fn test_nfa_reachable_states() {
        let relation = branching_nfa();
        assert_eq!(reachable_states(&relation, "q0", "a"), finals(&["q0", "q1"]));
        assert_eq!(reachable_states(&relation, "q0", "aab"), finals(&["q2"]));
    }

    #[test]
    fn test_nfa_acceptance() {
        let relation = branching_nfa();
        let accepting = finals(&["q2"]);

        assert!(is_accepted(&relation, "q0", &accepting, "aab"));
        assert!(!is_accepted(&relation, "q0", &accepting, "a"));
        assert!(!is_accepted(&relation, "q0", &accepting, ""));
    }

    #[test]
    fn test_no_path_consumes_input() {
        let relation = branching_nfa();
        assert!(reachable_states(&relation, "q0", "ba").is_empty());
    }

    #[test]
    fn test_generate_linear_dfa() {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q1");
        relation.add_transition("q1", 'b', "q2");

        let accepted = generate_accepted(
            &relation,
            "q0",
            &finals(&["q2"]),
            &['a', 'b'],
            3,
            None,
        );
        assert_eq!(accepted, ["ab"]);
    }

    #[test]
    fn test_generate_emits_empty_string_for_final_initial() {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q0");

        let accepted = generate_accepted(
            &relation,
            "q0",
            &finals(&["q0"]),
            &['a'],
            2,
            None,
        );
        assert_eq!(accepted, ["", "a", "aa"]);
    }

    /// S --0--> S, S --1--> A, A --0--> S, A --1--> A: strings ending in 1.
    fn cyclic_automaton() -> TransitionRelation {
        let mut relation = TransitionRelation::new();
        relation.add_transition("S", '0', "S");
        relation.add_transition("S", '1', "A");
        relation.add_transition("A", '0', "S");
        relation.add_transition("A", '1', "A");
        relation
    }

    #[test]
    fn test_generate_cyclic_without_limit() {
        let relation = cyclic_automaton();
        let accepted = generate_accepted(
            &relation,
            "S",
            &finals(&["A"]),
            &['0', '1'],
            3,
            None,
        );
        assert_eq!(accepted, ["1", "01", "11", "001", "011", "101", "111"]);
    }

    #[test]
    fn test_generate_cyclic_with_limit_one() {
        let relation = cyclic_automaton();
        let accepted = generate_accepted(
            &relation,
            "S",
            &finals(&["A"]),
            &['0', '1'],
            3,
            Some(1),
        );
        assert_eq!(accepted, ["1"]);
    }

    #[test]
    fn test_alphabet_symbols_absent_from_relation() {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q1");

        let accepted = generate_accepted(
            &relation,
            "q0",
            &finals(&["q1"]),
            &['a', 'z'],
            2,
            None,
        );
        assert_eq!(accepted, ["a"]);
    }

    #[test]
    fn test_generate_bounds_by_symbol_count_not_bytes() {
        // 'é' is two bytes in UTF-8 but one symbol; the length bound must
        // admit "éé" at max_length 2.
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'é', "q1");
        relation.add_transition("q1", 'é', "q2");

        let accepted = generate_accepted(
            &relation,
            "q0",
            &finals(&["q2"]),
            &['é'],
            2,
            None,
        );
        assert_eq!(accepted, ["éé"]);

        let limited = generate_accepted(
            &relation,
            "q0",
            &finals(&["q2"]),
            &['é'],
            2,
            Some(1),
        );
        assert_eq!(limited, ["éé"]);
    }

    #[test]
    fn test_duplicate_entries_duplicate_emissions() {
        let mut relation = TransitionRelation::new();
        relation.add_transition("q0", 'a', "q1");
        relation.add_transition("q0", 'a', "q1");

        let accepted = generate_accepted(
            &relation,
            "q0",
            &finals(&["q1"]),
            &['a'],
            1,
            None,
        );
        assert_eq!(accepted, ["a", "a"]);
    }
}
