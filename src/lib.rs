//! This crate provides the simulation and search engine behind the ZFlap
//! automaton editor. It includes engines for non-deterministic finite
//! automata, pushdown automata, and Turing machines, together with the
//! persisted diagram format and its validation.
//!
//! The engines are pure and synchronous: they read caller-owned transition
//! data, never retain it, and report rejection (including step-budget
//! exhaustion) as ordinary values rather than errors.

pub mod analyzer;
pub mod document;
pub mod finite;
pub mod loader;
pub mod parser;
pub mod pushdown;
pub mod relation;
pub mod turing;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the document model from the document module.
pub use document::{AutomatonDocument, StateEntry, TransitionEntry};
/// Re-exports the finite-automaton query functions from the finite module.
pub use finite::{generate_accepted, is_accepted, reachable_states};
/// Re-exports the `DocumentLoader` struct from the loader module.
pub use loader::DocumentLoader;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the pushdown-automaton engine from the pushdown module.
pub use pushdown::{Pda, PdaStep, PdaTransition};
/// Re-exports the `TransitionRelation` struct from the relation module.
pub use relation::TransitionRelation;
/// Re-exports the Turing machine engine from the turing module.
pub use turing::{Tm, TmStep, TmTransition};
/// Re-exports the shared engine types from the types module.
pub use types::{
    Acceptance, AutomatonError, Input, MoveDirection, TapeSymbol, Verdict, DEFAULT_MAX_STEPS,
};
