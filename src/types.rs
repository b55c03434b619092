//! This module defines the data types shared by the three automaton engines:
//! symbol and direction sum types, run verdicts, step-path results, and the
//! crate-level error type used by the document layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The default step budget for PDA and TM searches. A decrementing counter
/// bounded by this value is the only guard against non-terminating cyclic
/// search spaces (epsilon cycles, blank-preserving TM loops).
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

/// The input component of a PDA transition: either a concrete symbol that
/// must match (and consume) the next input character, or epsilon, which
/// always matches and consumes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// Match and consume this exact input character.
    Symbol(char),
    /// Match unconditionally without consuming input.
    Epsilon,
}

/// A symbol in a Turing Machine transition. `Blank` stands for the machine's
/// configured blank character, so "no symbol" is never conflated with a
/// literal tape character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapeSymbol {
    /// A concrete tape character.
    Symbol(char),
    /// The machine's blank character.
    Blank,
}

/// How a PDA or TM run ended. `Accepted` is the only accepting verdict; the
/// three rejection verdicts let a caller present distinct human-readable
/// reasons without the engine itself raising errors for search outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// A final state was reached (with input fully consumed, for PDAs).
    Accepted,
    /// Some branch consumed the whole input but ended in a non-final state.
    ExhaustedInput,
    /// The step budget ran out before the search space was drained.
    ExhaustedSteps,
    /// The search space was drained without any applicable transition
    /// leading to acceptance.
    NoTransition,
}

/// The result of a PDA or TM run: a [`Verdict`] plus, on acceptance, the
/// step-by-step path from the initial configuration to the accepting one.
///
/// The path, when present, is a valid sequence of legal transitions and is
/// the first accepting path in transition-registration order, not a shortest
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct Acceptance<S> {
    /// How the run ended.
    pub verdict: Verdict,
    /// The accepting path, present iff `verdict` is [`Verdict::Accepted`].
    pub path: Option<Vec<S>>,
}

impl<S> Acceptance<S> {
    /// Returns `true` iff the run accepted the input.
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// Represents the errors that can occur in the document layer (parsing,
/// validation, file handling). Engine searches never produce errors:
/// rejection and budget exhaustion are ordinary [`Verdict`] values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// Indicates an error while parsing a persisted automaton document.
    #[error("Document parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates that a document failed structural or logical validation.
    #[error("Document validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}
