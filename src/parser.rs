//! This module provides the parser for persisted ZFlap automaton documents,
//! utilizing the `pest` crate. It defines the grammar for the line-oriented
//! `.zflap` format and functions to parse the input into an
//! [`AutomatonDocument`].

use crate::{
    analyzer::analyze,
    document::{AutomatonDocument, StateEntry, TransitionEntry},
    types::AutomatonError,
};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the document grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DocumentParser;

/// Parses the given input string into an [`AutomatonDocument`].
///
/// This is the main entry point for reading persisted automata. The parsed
/// document is automatically validated before being returned, so a document
/// that parses but is structurally broken (no initial state, transitions to
/// undefined states, symbols outside the alphabet) is rejected here rather
/// than producing surprising engine behavior later.
///
/// # Returns
///
/// * `Ok(AutomatonDocument)` if the input parses and validates.
/// * `Err(AutomatonError::ParseError)` on syntax errors.
/// * `Err(AutomatonError::ValidationError)` if validation fails.
pub fn parse(input: &str) -> Result<AutomatonDocument, AutomatonError> {
    let root = DocumentParser::parse(Rule::document, input.trim())
        .map_err(|e| AutomatonError::ParseError(Box::new(e)))?
        .next()
        .unwrap();

    let document = parse_document(root);

    analyze(&document)?;

    Ok(document)
}

/// Walks the top-level parse tree and assembles the document sections.
fn parse_document(pair: Pair<Rule>) -> AutomatonDocument {
    let mut name = String::new();
    let mut alphabet = Vec::new();
    let mut states = Vec::new();
    let mut transitions = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::name => name = parse_name(p),
            Rule::alphabet => alphabet = parse_alphabet(p),
            Rule::states => {
                states = p.into_inner().map(parse_state_line).collect();
            }
            Rule::transitions => {
                transitions = p.into_inner().map(parse_transition_line).collect();
            }
            _ => {} // Skip EOI
        }
    }

    AutomatonDocument {
        name,
        alphabet,
        states,
        transitions,
    }
}

/// Extracts the free-text document name from a `Pair<Rule::name>`.
fn parse_name(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|text| text.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the alphabet symbols from a `Pair<Rule::alphabet>`.
fn parse_alphabet(pair: Pair<Rule>) -> Vec<char> {
    pair.into_inner().map(|s| parse_symbol(s.as_str())).collect()
}

/// Parses one `name,x,y,isInitial,isFinal` line from a
/// `Pair<Rule::state_line>`.
fn parse_state_line(pair: Pair<Rule>) -> StateEntry {
    let mut pairs = pair.into_inner();
    let name = pairs.next().unwrap().as_str().to_string();
    let x = parse_coord(pairs.next().unwrap().as_str());
    let y = parse_coord(pairs.next().unwrap().as_str());
    let is_initial = pairs.next().unwrap().as_str() == "1";
    let is_final = pairs.next().unwrap().as_str() == "1";

    StateEntry {
        name,
        x,
        y,
        is_initial,
        is_final,
    }
}

/// Parses one `from,to,symbol|symbol|...` line from a
/// `Pair<Rule::transition_line>`.
fn parse_transition_line(pair: Pair<Rule>) -> TransitionEntry {
    let mut pairs = pair.into_inner();
    let from_state = pairs.next().unwrap().as_str().to_string();
    let to_state = pairs.next().unwrap().as_str().to_string();
    let symbols = pairs.map(|s| parse_symbol(s.as_str())).collect();

    TransitionEntry {
        from_state,
        to_state,
        symbols,
    }
}

/// Interprets a matched `symbol` token; the grammar guarantees exactly one
/// character.
fn parse_symbol(s: &str) -> char {
    s.chars().next().unwrap()
}

/// Interprets a matched `coord` token; the grammar guarantees a valid float.
fn parse_coord(s: &str) -> f64 {
    s.parse().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# ZFlap automaton
name: Even binary
alphabet: (0,1)
[States]
S,120,80,1,0
A,260,80,0,1
[Transitions]
S,S,0
S,A,1
A,A,0|1
";

    #[test]
    fn test_parse_sample_document() {
        let document = parse(SAMPLE).unwrap();

        assert_eq!(document.name, "Even binary");
        assert_eq!(document.alphabet, ['0', '1']);
        assert_eq!(document.states.len(), 2);
        assert_eq!(document.transitions.len(), 3);

        assert_eq!(document.states[0].name, "S");
        assert_eq!(document.states[0].x, 120.0);
        assert!(document.states[0].is_initial);
        assert!(!document.states[0].is_final);
        assert!(document.states[1].is_final);

        assert_eq!(document.transitions[2].symbols, ['0', '1']);
    }

    #[test]
    fn test_parse_without_transitions_section_fails_validation() {
        // Syntactically valid, but A is then unreachable from S, so the
        // analyzer rejects it.
        let input = "\
name: Fragment
alphabet: (a)
[States]
S,0,0,1,0
A,10,0,0,1
";
        let result = parse(input);
        assert!(matches!(result, Err(AutomatonError::ValidationError(_))));
    }

    #[test]
    fn test_parse_minimal_document() {
        let input = "\
name: Single
alphabet: (a)
[States]
q0,0,0,1,1
";
        let document = parse(input).unwrap();
        assert_eq!(document.states.len(), 1);
        assert!(document.transitions.is_empty());
        assert_eq!(document.initial_state(), Some("q0"));
    }

    #[test]
    fn test_parse_syntax_error() {
        let result = parse("this is not a document");
        assert!(matches!(result, Err(AutomatonError::ParseError(_))));
    }

    #[test]
    fn test_parse_rejects_missing_initial_state() {
        let input = "\
name: No initial
alphabet: (a)
[States]
q0,0,0,0,1
";
        let result = parse(input);
        assert!(matches!(result, Err(AutomatonError::ValidationError(_))));
    }

    #[test]
    fn test_render_parse_round_trip() {
        let document = parse(SAMPLE).unwrap();
        let rendered = document.to_string();
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(document, reparsed);
    }

    #[test]
    fn test_fractional_coordinates() {
        let input = "\
name: Placed
alphabet: (a)
[States]
q0,12.5,-42.25,1,1
[Transitions]
q0,q0,a
";
        let document = parse(input).unwrap();
        assert_eq!(document.states[0].x, 12.5);
        assert_eq!(document.states[0].y, -42.25);
    }
}
