//! This module defines the core data structures used throughout the crate:
//! the definition models for pushdown automata and Turing machines, the
//! moves and acceptance modes they reference, and the error taxonomy.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::Rule;

/// The reserved blank symbol of every tape alphabet.
pub const BLANK_SYMBOL: char = '_';
/// The symbol standing for "no symbol" in definition files: an epsilon input
/// or stack condition in a `.pda` transition, and the blank in a `.tm` one.
pub const EPSILON_SYMBOL: char = '_';
/// The wildcard symbol of `.tm` transitions: matches any non-blank symbol in
/// a read position, leaves the cell unchanged in a write position.
pub const WILDCARD_SYMBOL: char = '*';
/// The maximum number of configurations a single run may explore.
///
/// Visited-configuration pruning is what guarantees termination on automata
/// whose reachable configuration space is finite; this bound backstops
/// machines that keep producing genuinely new configurations (for example a
/// PDA with an epsilon cycle that grows the stack on every pass).
pub const MAX_EXPLORED_CONFIGS: usize = 1_000_000;

/// A pushdown automaton definition.
///
/// Pure data: loaded once by the [`crate::loader::DefinitionLoader`],
/// validated by [`crate::analyzer::analyze_pda`], then shared read-only by
/// every configuration the engine explores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pda {
    /// The declared state set.
    pub states: HashSet<String>,
    /// Symbols the input string may consist of.
    pub input_alphabet: HashSet<char>,
    /// Symbols the stack may hold.
    pub stack_alphabet: HashSet<char>,
    /// The start state.
    pub start_state: String,
    /// The symbol the stack holds before the first step.
    pub start_symbol: char,
    /// States in which the automaton may accept.
    pub accept_states: HashSet<String>,
    /// The declared acceptance condition.
    pub acceptance: Acceptance,
    /// Transition rules, keyed by source state. Several rules with the same
    /// condition encode nondeterminism.
    pub rules: HashMap<String, Vec<PdaRule>>,
}

/// One pushdown transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdaRule {
    /// The input symbol consumed, or `None` for an epsilon move.
    pub input: Option<char>,
    /// The stack symbol popped, or `None` to pop nothing.
    pub top: Option<char>,
    /// The state transitioned to.
    pub next_state: String,
    /// Symbols pushed after the pop, bottom to top.
    pub push: Vec<char>,
}

/// When a pushdown automaton accepts an input whose symbols have all been
/// consumed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acceptance {
    /// The current state is an accept state.
    #[default]
    FinalState,
    /// The stack is empty.
    EmptyStack,
    /// The current state is an accept state or the stack is empty.
    Either,
}

/// A Turing machine definition, single or multi-tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tm {
    /// The declared state set.
    pub states: HashSet<String>,
    /// Symbols the input string may consist of. Never contains the blank.
    pub input_alphabet: HashSet<char>,
    /// Symbols a tape cell may hold, including the blank.
    pub tape_alphabet: HashSet<char>,
    /// The start state.
    pub start_state: String,
    /// The blank symbol.
    pub blank: char,
    /// Declared accept states. Carried for completeness of the definition;
    /// the engine never interprets them - acceptance is a convention of the
    /// machine author, expressed through the final output-tape content.
    pub accept_states: HashSet<String>,
    /// The number of tapes.
    pub tapes: usize,
    /// Transition rules, keyed by source state.
    pub rules: HashMap<String, Vec<TmRule>>,
}

/// One Turing machine transition rule over all tapes at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmRule {
    /// Per-tape symbols to match under the heads. `*` matches any non-blank.
    pub read: Vec<char>,
    /// Per-tape symbols to write. `*` leaves the cell unchanged.
    pub write: Vec<char>,
    /// Per-tape head moves.
    pub moves: Vec<Move>,
    /// The state transitioned to.
    pub next_state: String,
}

impl TmRule {
    /// Whether this rule applies to the given per-tape read symbols.
    pub fn matches(&self, symbols: &[char], blank: char) -> bool {
        self.read.len() == symbols.len()
            && self
                .read
                .iter()
                .zip(symbols)
                .all(|(&want, &got)| match want {
                    WILDCARD_SYMBOL => got != blank,
                    _ => want == got,
                })
    }
}

/// A head move of one tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
    /// Keep the head where it is.
    Stay,
}

/// Errors surfaced by loading or running an automaton.
///
/// The split between [`FlaError::Syntax`]/[`FlaError::Malformed`] (faults in
/// the definition file) and [`FlaError::IllegalInput`] (a fault in the input
/// string, raised before any simulation step) is part of the observable
/// contract: a machine that merely rejects, or halts with a reject-shaped
/// output tape, does not error at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlaError {
    /// The definition file does not match the grammar.
    #[error("syntax error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    /// The definition file is grammatical but structurally invalid.
    #[error("malformed definition: {0}")]
    Malformed(String),
    /// The input string contains a symbol outside the input alphabet.
    #[error("illegal input: {symbol:?} at position {position} was not declared in the set of input symbols")]
    IllegalInput { symbol: char, position: usize },
    /// The run exceeded the exploration bound without halting.
    #[error("machine did not halt within {0} explored configurations")]
    Diverged(usize),
    /// The definition file could not be read.
    #[error("file error: {0}")]
    File(String),
}

/// Checks an input string against a declared input alphabet.
///
/// Both engines call this before their first simulation step.
pub(crate) fn check_input(alphabet: &HashSet<char>, input: &str) -> Result<(), FlaError> {
    for (position, symbol) in input.chars().enumerate() {
        if !alphabet.contains(&symbol) {
            return Err(FlaError::IllegalInput { symbol, position });
        }
    }
    Ok(())
}

/// Whether `c` may be declared in an alphabet. The excluded characters are
/// reserved by the definition format.
pub(crate) fn is_valid_symbol(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, ' ' | ',' | ';' | '{' | '}' | '*' | '_')
}

/// Whether `name` is a well-formed state name.
pub(crate) fn is_valid_state_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
