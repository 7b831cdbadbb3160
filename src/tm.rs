//! The Turing machine engine. A configuration is the current state plus one
//! [`Tape`] per declared tape; exploration reuses the bounded search of
//! [`crate::search`], so a machine whose rules happen to be nondeterministic
//! branches exactly like a PDA while a deterministic one degenerates to a
//! straight-line walk.
//!
//! The engine halts a branch when no rule matches and returns that branch's
//! output-tape content verbatim. It never interprets the content: `true`,
//! `false` and `illegal_input` are conventions of the machine author, and a
//! run ending in any of them is a successful run.

use crate::search::{explore, Expansion, Outcome};
use crate::types::{check_input, FlaError, Move, Tm, TmRule, MAX_EXPLORED_CONFIGS, WILDCARD_SYMBOL};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

/// One bidirectionally extendable tape with its head position.
///
/// Cells outside `cells` are blank. The tape is kept shrunken: edge blanks
/// not under the head are dropped after every shift, so equal tape contents
/// relative to the head compare equal no matter how far the head has
/// wandered. `origin` records where cell 0 of the initial content now sits
/// and is deliberately excluded from equality and hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
    origin: isize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `content` with the head on its first cell.
    /// An empty `content` yields a single blank cell.
    pub fn new(content: &str, blank: char) -> Self {
        let mut cells: VecDeque<char> = content.chars().collect();
        if cells.is_empty() {
            cells.push_back(blank);
        }
        Self {
            cells,
            head: 0,
            origin: 0,
            blank,
        }
    }

    /// Creates an all-blank tape.
    pub fn blank(blank: char) -> Self {
        Self::new("", blank)
    }

    /// The symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Writes `symbol` under the head and shifts the head.
    pub fn step(&mut self, symbol: char, direction: Move) {
        if symbol != WILDCARD_SYMBOL {
            self.cells[self.head] = symbol;
        }

        match direction {
            Move::Left => {
                if self.head == 0 {
                    self.cells.push_front(self.blank);
                    self.origin += 1;
                } else {
                    self.head -= 1;
                }
            }
            Move::Right => {
                self.head += 1;
                if self.head == self.cells.len() {
                    self.cells.push_back(self.blank);
                }
            }
            Move::Stay => {}
        }

        self.shrink();
    }

    /// Drops edge blanks the head is not on, keeping the representation
    /// canonical for revisit detection.
    fn shrink(&mut self) {
        while self.head > 0 && self.cells.front() == Some(&self.blank) {
            self.cells.pop_front();
            self.head -= 1;
            self.origin -= 1;
        }
        while self.head + 1 < self.cells.len() && self.cells.back() == Some(&self.blank) {
            self.cells.pop_back();
        }
    }

    /// The tape content with leading and trailing blanks trimmed. Interior
    /// blanks are preserved.
    pub fn trimmed(&self) -> String {
        let content: String = self.cells.iter().collect();
        content.trim_matches(self.blank).to_string()
    }

    /// Where cell 0 of the initial content currently sits in `cells`.
    pub fn origin(&self) -> isize {
        self.origin
    }
}

// Equality is over content relative to the head; `origin` is display-only.
// A machine walking over blanks forever revisits the same configuration.
impl PartialEq for Tape {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.head == other.head && self.blank == other.blank
    }
}

impl Eq for Tape {}

impl Hash for Tape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
        self.head.hash(state);
        self.blank.hash(state);
    }
}

/// One snapshot of a Turing machine run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Configuration {
    state: String,
    tapes: Vec<Tape>,
}

impl Configuration {
    fn symbols(&self) -> Vec<char> {
        self.tapes.iter().map(Tape::read).collect()
    }

    fn apply(&self, rule: &TmRule) -> Configuration {
        let mut next = self.clone();
        for (tape, (&symbol, &direction)) in
            next.tapes.iter_mut().zip(rule.write.iter().zip(&rule.moves))
        {
            tape.step(symbol, direction);
        }
        next.state = rule.next_state.clone();
        next
    }
}

impl Tm {
    /// Runs the machine against `input` and returns the final content of the
    /// output tape (tape 0), trimmed of leading and trailing blanks.
    ///
    /// Tape 0 starts out holding `input`, all other tapes blank, every head
    /// at position 0. A branch halts when no rule matches its current state
    /// and read symbols.
    ///
    /// # Returns
    ///
    /// * `Ok(content)` from the first halting branch.
    /// * `Err(FlaError::IllegalInput)` if `input` contains a symbol outside
    ///   the input alphabet; raised before any simulation step.
    /// * `Err(FlaError::Diverged)` if no branch ever halts.
    pub fn run(&self, input: &str) -> Result<String, FlaError> {
        check_input(&self.input_alphabet, input)?;

        let mut tapes = vec![Tape::new(input, self.blank)];
        tapes.extend((1..self.tapes).map(|_| Tape::blank(self.blank)));
        let start = Configuration {
            state: self.start_state.clone(),
            tapes,
        };

        let outcome = explore(start, MAX_EXPLORED_CONFIGS, |config| {
            let symbols = config.symbols();
            let matching: Vec<&TmRule> = self
                .rules
                .get(&config.state)
                .into_iter()
                .flatten()
                .filter(|rule| rule.matches(&symbols, self.blank))
                .collect();

            if matching.is_empty() {
                // Implicit halt: no rule covers this configuration
                return Expansion::Halt(config.tapes[0].trimmed());
            }

            Expansion::Continue(matching.iter().map(|rule| config.apply(rule)).collect())
        });

        match outcome {
            Outcome::Halted(content) => Ok(content),
            Outcome::Exhausted | Outcome::OutOfBounds => {
                Err(FlaError::Diverged(MAX_EXPLORED_CONFIGS))
            }
        }
    }
}
