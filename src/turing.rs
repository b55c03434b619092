//! This module implements the Turing machine engine: depth-first
//! backtracking simulation over configurations `(state, tape, head)` with a
//! dynamically extended tape, bounded by a step budget and able to
//! reconstruct one accepting path for step-by-step playback.

use crate::types::{Acceptance, MoveDirection, TapeSymbol, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single TM transition `(from, read) -> (to, write, move)`.
///
/// A [`TapeSymbol::Blank`] read matches a cell holding the machine's blank
/// character; a `Blank` write writes that character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmTransition {
    /// Source state.
    pub from_state: String,
    /// Symbol that must be under the head.
    pub read: TapeSymbol,
    /// Destination state.
    pub to_state: String,
    /// Symbol written before the head moves.
    pub write: TapeSymbol,
    /// Head movement after writing.
    pub direction: MoveDirection,
}

/// One step of an accepting TM run, for visual playback. Snapshot and head
/// position describe the tape after the write and the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmStep {
    /// State the step left.
    pub from_state: String,
    /// State the step entered.
    pub to_state: String,
    /// Character that was under the head (blank rendered literally).
    pub read: char,
    /// Character written in its place.
    pub write: char,
    /// Direction the head moved.
    pub direction: MoveDirection,
    /// The tape after the step, with the head cell bracketed.
    pub tape_snapshot: String,
    /// Head index into the tape after the step.
    pub head_position: usize,
}

/// A Turing machine configuration. The tape is only ever grown, never
/// truncated, and the head is a valid index into it immediately after any
/// move.
///
/// No origin offset is tracked for left-hand tape growth: nothing consumes
/// it, since step snapshots and head positions index into the grown tape
/// directly.
#[derive(Debug, Clone)]
struct Config {
    state: String,
    tape: Vec<char>,
    head: usize,
}

/// One frame of the explicit search stack; see [`crate::pushdown`] for the
/// same shape over PDA configurations.
struct Frame {
    config: Config,
    next_transition: usize,
    step: Option<TmStep>,
}

/// A Turing machine with state-based acceptance.
///
/// Acceptance is decided purely by reaching a final state: there is no
/// requirement to consume the tape or to halt on a blank, and a machine with
/// no reachable final state runs until the step budget is exhausted and is
/// reported rejected. Multiple transitions may match one `(state, symbol)`
/// pair; they are tried in registration order with backtracking, so a
/// deterministic machine (at most one match per pair) behaves like a plain
/// simulator.
#[derive(Debug, Clone)]
pub struct Tm {
    initial_state: String,
    blank: char,
    transitions: Vec<TmTransition>,
    final_states: HashSet<String>,
}

impl Tm {
    /// Creates a TM with the given initial state and blank character.
    pub fn new(initial_state: impl Into<String>, blank: char) -> Self {
        Self {
            initial_state: initial_state.into(),
            blank,
            transitions: Vec::new(),
            final_states: HashSet::new(),
        }
    }

    /// Appends a transition. Registration order is the search order.
    pub fn add_transition(&mut self, transition: TmTransition) {
        self.transitions.push(transition);
    }

    /// Marks a state as accepting.
    pub fn add_final_state(&mut self, state: impl Into<String>) {
        self.final_states.insert(state.into());
    }

    /// Removes all transitions and final states, keeping the initial
    /// configuration. Used when the editor rebuilds the machine.
    pub fn clear(&mut self) {
        self.transitions.clear();
        self.final_states.clear();
    }

    /// Returns the blank character of this machine.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Renders a tape as text with the head cell bracketed, the form used in
    /// step snapshots.
    pub fn tape_to_string(tape: &[char], head: usize) -> String {
        let mut out = String::with_capacity(tape.len() + 2);
        for (i, &c) in tape.iter().enumerate() {
            if i == head {
                out.push('[');
                out.push(c);
                out.push(']');
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Decides whether the TM accepts `input`, simulating depth-first with
    /// backtracking and at most `max_steps` configuration visits.
    ///
    /// The tape is initialized from the input characters (a single blank
    /// cell for empty input) with the head at position 0. On acceptance the
    /// returned path is the accepting step sequence; on rejection the
    /// verdict records whether the budget ran out or every branch died with
    /// no matching transition.
    pub fn accepts(&self, input: &str, max_steps: usize) -> Acceptance<TmStep> {
        let mut tape: Vec<char> = input.chars().collect();
        if tape.is_empty() {
            tape.push(self.blank);
        }

        let mut frames = vec![Frame {
            config: Config {
                state: self.initial_state.clone(),
                tape,
                head: 0,
            },
            next_transition: 0,
            step: None,
        }];
        let mut steps_remaining = max_steps;
        let mut budget_exhausted = false;

        while !frames.is_empty() {
            let top = frames.len() - 1;

            // First visit of this configuration: charge the budget, then
            // test for acceptance. Acceptance is state-based only.
            if frames[top].next_transition == 0 {
                if steps_remaining == 0 {
                    budget_exhausted = true;
                    frames.pop();
                    continue;
                }
                steps_remaining -= 1;

                if self.final_states.contains(&frames[top].config.state) {
                    let path = frames.iter().filter_map(|f| f.step.clone()).collect();
                    return Acceptance {
                        verdict: Verdict::Accepted,
                        path: Some(path),
                    };
                }
            }

            let attempt = {
                let frame = &frames[top];
                self.apply_from(&frame.config, frame.next_transition)
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
                // No further transition matches: backtrack.
                None => {
                    frames.pop();
                }
            }
        }

        let verdict = if budget_exhausted {
            Verdict::ExhaustedSteps
        } else {
            Verdict::NoTransition
        };
        Acceptance {
            verdict,
            path: None,
        }
    }

    /// Finds the first transition at index `start` or later matching the
    /// current state and the symbol under the head, and returns its index,
    /// the successor configuration, and the step record.
    ///
    /// The successor tape is written, the head moved, and the tape grown so
    /// the head lands on a valid cell: moving left of index 0 prepends one
    /// blank (shifting the logical origin), moving right past the last index
    /// appends one blank.
    fn apply_from(&self, config: &Config, start: usize) -> Option<(usize, Config, TmStep)> {
        let current = config
            .tape
            .get(config.head)
            .copied()
            .unwrap_or(self.blank);

        for (index, t) in self.transitions.iter().enumerate().skip(start) {
            if t.from_state != config.state || self.resolve(t.read) != current {
                continue;
            }

            let mut next = config.clone();
            let written = self.resolve(t.write);
            next.tape[next.head] = written;

            match t.direction {
                MoveDirection::Left => {
                    if next.head == 0 {
                        next.tape.insert(0, self.blank);
                    } else {
                        next.head -= 1;
                    }
                }
                MoveDirection::Right => {
                    next.head += 1;
                    if next.head >= next.tape.len() {
                        next.tape.push(self.blank);
                    }
                }
                MoveDirection::Stay => {}
            }

            next.state = t.to_state.clone();
            let step = TmStep {
                from_state: config.state.clone(),
                to_state: t.to_state.clone(),
                read: current,
                write: written,
                direction: t.direction,
                tape_snapshot: Self::tape_to_string(&next.tape, next.head),
                head_position: next.head,
            };
            return Some((index, next, step));
        }

        None
    }

    /// Resolves a transition symbol to the concrete tape character.
    fn resolve(&self, symbol: TapeSymbol) -> char {
        match symbol {
            TapeSymbol::Symbol(c) => c,
            TapeSymbol::Blank => self.blank,
        }
    }
}
