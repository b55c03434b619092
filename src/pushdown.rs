//! This module implements the pushdown-automaton engine: exhaustive
//! depth-first backtracking search over configurations
//! `(state, input position, stack)`, bounded by a step budget and able to
//! reconstruct one accepting path for step-by-step playback.

use crate::types::{Acceptance, Input, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single PDA transition
/// `(from, input-or-epsilon, pop-or-none) -> (to, push string)`.
///
/// The push string is applied so that its first character ends up deepest
/// and its last character becomes the new stack top. An empty push string
/// pushes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdaTransition {
    /// Source state.
    pub from_state: String,
    /// Input condition: a concrete symbol to consume, or epsilon.
    pub input: Input,
    /// Stack condition: `Some(c)` requires (and removes) `c` on top of the
    /// stack; `None` pops nothing.
    pub pop: Option<char>,
    /// Destination state.
    pub to_state: String,
    /// Characters pushed after the pop, last character on top.
    pub push: String,
}

/// One step of an accepting PDA run, for visual playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdaStep {
    /// State the step left.
    pub from_state: String,
    /// State the step entered.
    pub to_state: String,
    /// Input symbol consumed, `None` for an epsilon move.
    pub consumed: Option<char>,
    /// Stack symbol popped, `None` if the transition pops nothing.
    pub popped: Option<char>,
    /// The string pushed (may be empty).
    pub pushed: String,
    /// The stack after the step, rendered top-to-bottom.
    pub stack_snapshot: String,
    /// Input position after the step.
    pub input_index: usize,
}

/// A pushdown-automaton configuration. The stack is owned by value: every
/// attempted transition clones it, so two sibling search branches can never
/// observe each other's mutations.
#[derive(Debug, Clone)]
struct Config {
    state: String,
    input_index: usize,
    /// Stack symbols, bottom first; the top is the last element.
    stack: Vec<char>,
}

/// One frame of the explicit search stack: a configuration, the index of the
/// next transition to try from it, and the step that produced it (`None`
/// only for the root frame).
struct Frame {
    config: Config,
    next_transition: usize,
    step: Option<PdaStep>,
}

/// A non-deterministic pushdown automaton with final-state acceptance.
///
/// Transitions are kept in the order they were added; the search tries them
/// in that order, so the first-discovered accepting path (not a shortest
/// one) is the path returned. The automaton holds only its transition data:
/// `accepts` is a pure function of its arguments and retains nothing across
/// calls.
#[derive(Debug, Clone)]
pub struct Pda {
    initial_state: String,
    initial_stack_symbol: char,
    transitions: Vec<PdaTransition>,
    final_states: HashSet<String>,
}

impl Pda {
    /// Creates a PDA with the given initial state and initial stack symbol.
    pub fn new(initial_state: impl Into<String>, initial_stack_symbol: char) -> Self {
        Self {
            initial_state: initial_state.into(),
            initial_stack_symbol,
            transitions: Vec::new(),
            final_states: HashSet::new(),
        }
    }

    /// Appends a transition. Registration order is the search order.
    pub fn add_transition(&mut self, transition: PdaTransition) {
        self.transitions.push(transition);
    }

    /// Marks a state as accepting.
    pub fn add_final_state(&mut self, state: impl Into<String>) {
        self.final_states.insert(state.into());
    }

    /// Removes all transitions and final states, keeping the initial
    /// configuration. Used when the editor rebuilds the automaton.
    pub fn clear(&mut self) {
        self.transitions.clear();
        self.final_states.clear();
    }

    /// Renders a stack top-to-bottom as text, the form used in step
    /// snapshots. The slice is bottom-first, as stored.
    pub fn stack_to_string(stack: &[char]) -> String {
        stack.iter().rev().collect()
    }

    /// Decides whether the PDA accepts `input`, searching depth-first with
    /// backtracking and at most `max_steps` configuration visits.
    ///
    /// Acceptance requires the input to be fully consumed in a final state.
    /// On acceptance the returned path is the accepting step sequence; on
    /// rejection the verdict records whether the budget ran out, some branch
    /// ended at end-of-input in a non-final state, or no transitions applied
    /// at all. Reaching the budget is the normal outcome for epsilon-cycles
    /// with no reachable final state, never an error or a hang.
    pub fn accepts(&self, input: &str, max_steps: usize) -> Acceptance<PdaStep> {
        let input: Vec<char> = input.chars().collect();

        let mut frames = vec![Frame {
            config: Config {
                state: self.initial_state.clone(),
                input_index: 0,
                stack: vec![self.initial_stack_symbol],
            },
            next_transition: 0,
            step: None,
        }];
        let mut steps_remaining = max_steps;
        let mut budget_exhausted = false;
        let mut input_exhausted = false;

        while !frames.is_empty() {
            let top = frames.len() - 1;

            // First visit of this configuration: charge the budget, then
            // test for acceptance. The budget is charged first, matching the
            // recursive formulation where a branch entered with an empty
            // budget fails even if it would accept.
            if frames[top].next_transition == 0 {
                if steps_remaining == 0 {
                    budget_exhausted = true;
                    frames.pop();
                    continue;
                }
                steps_remaining -= 1;

                let config = &frames[top].config;
                if config.input_index == input.len() {
                    if self.final_states.contains(&config.state) {
                        let path = frames.iter().filter_map(|f| f.step.clone()).collect();
                        return Acceptance {
                            verdict: Verdict::Accepted,
                            path: Some(path),
                        };
                    }
                    input_exhausted = true;
                }
            }

            let attempt = {
                let frame = &frames[top];
                self.apply_from(&frame.config, &input, frame.next_transition)
            };

            match attempt {
                Some((index, config, step)) => {
                    frames[top].next_transition = index + 1;
                    frames.push(Frame {
                        config,
                        next_transition: 0,
                        step: Some(step),
                    });
                }
                // No further transition applies: backtrack.
                None => {
                    frames.pop();
                }
            }
        }

        let verdict = if budget_exhausted {
            Verdict::ExhaustedSteps
        } else if input_exhausted {
            Verdict::ExhaustedInput
        } else {
            Verdict::NoTransition
        };
        Acceptance {
            verdict,
            path: None,
        }
    }

    /// Finds the first applicable transition at index `start` or later and
    /// returns its index, the successor configuration, and the step record.
    ///
    /// A transition applies when its source state matches, its input symbol
    /// matches the next input character (epsilon always matches, consuming
    /// nothing), and its pop condition is satisfiable. Popping from an empty
    /// stack or against a mismatched top simply makes the transition
    /// inapplicable.
    fn apply_from(
        &self,
        config: &Config,
        input: &[char],
        start: usize,
    ) -> Option<(usize, Config, PdaStep)> {
        for (index, t) in self.transitions.iter().enumerate().skip(start) {
            if t.from_state != config.state {
                continue;
            }

            let consumed = match t.input {
                Input::Epsilon => None,
                Input::Symbol(c) => {
                    if config.input_index < input.len() && input[config.input_index] == c {
                        Some(c)
                    } else {
                        continue;
                    }
                }
            };

            // Value-copy of the stack: a failed branch must leave the prior
            // stack untouched for its siblings.
            let mut stack = config.stack.clone();
            let mut popped = None;
            if let Some(pop) = t.pop {
                match stack.last() {
                    Some(&stack_top) if stack_top == pop => {
                        stack.pop();
                        popped = Some(pop);
                    }
                    _ => continue,
                }
            }

            // Push so the push string's last character becomes the new top.
            stack.extend(t.push.chars());

            let input_index = config.input_index + usize::from(consumed.is_some());
            let step = PdaStep {
                from_state: config.state.clone(),
                to_state: t.to_state.clone(),
                consumed,
                popped,
                pushed: t.push.clone(),
                stack_snapshot: Self::stack_to_string(&stack),
                input_index,
            };
            let next = Config {
                state: t.to_state.clone(),
                input_index,
                stack,
            };
            return Some((index, next, step));
        }

        None
    }
}
