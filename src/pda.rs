//! The pushdown automaton engine: breadth-first exploration of
//! `(state, input position, stack)` configurations with visited-configuration
//! pruning. The verdict is independent of the order nondeterministic branches
//! are explored in: the search halts on the first accepting configuration and
//! only rejects once the pruned space is exhausted.

use crate::search::{explore, Expansion, Outcome};
use crate::types::{check_input, Acceptance, FlaError, Pda, MAX_EXPLORED_CONFIGS};

/// One snapshot of a pushdown run. Configurations are independently owned
/// value data; branches never alias each other's stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Configuration {
    state: String,
    position: usize,
    stack: Vec<char>,
}

impl Pda {
    /// Runs the automaton against `input`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if some branch consumes the whole input and satisfies
    ///   the declared acceptance condition.
    /// * `Ok(false)` if the reachable configuration space is exhausted
    ///   without acceptance.
    /// * `Err(FlaError::IllegalInput)` if `input` contains a symbol outside
    ///   the input alphabet; raised before any simulation step.
    /// * `Err(FlaError::Diverged)` if the exploration budget runs out.
    pub fn run(&self, input: &str) -> Result<bool, FlaError> {
        check_input(&self.input_alphabet, input)?;

        let symbols: Vec<char> = input.chars().collect();
        let start = Configuration {
            state: self.start_state.clone(),
            position: 0,
            stack: vec![self.start_symbol],
        };

        let outcome = explore(start, MAX_EXPLORED_CONFIGS, |config| {
            if config.position == symbols.len() && self.accepts(config) {
                return Expansion::Halt(());
            }
            Expansion::Continue(self.successors(config, &symbols))
        });

        match outcome {
            Outcome::Halted(()) => Ok(true),
            Outcome::Exhausted => Ok(false),
            Outcome::OutOfBounds => Err(FlaError::Diverged(MAX_EXPLORED_CONFIGS)),
        }
    }

    /// Whether a fully-consumed configuration satisfies the declared
    /// acceptance condition.
    fn accepts(&self, config: &Configuration) -> bool {
        let by_state = || self.accept_states.contains(&config.state);
        let by_stack = || config.stack.is_empty();

        match self.acceptance {
            Acceptance::FinalState => by_state(),
            Acceptance::EmptyStack => by_stack(),
            Acceptance::Either => by_state() || by_stack(),
        }
    }

    /// All configurations reachable from `config` in one step: epsilon moves
    /// and, if input remains, moves consuming the next symbol.
    fn successors(&self, config: &Configuration, symbols: &[char]) -> Vec<Configuration> {
        let Some(rules) = self.rules.get(&config.state) else {
            return Vec::new();
        };

        let next_symbol = symbols.get(config.position).copied();
        let mut successors = Vec::new();

        for rule in rules {
            let position = match rule.input {
                None => config.position,
                Some(c) if Some(c) == next_symbol => config.position + 1,
                Some(_) => continue,
            };

            // A concrete stack condition pops its symbol; `None` leaves the
            // stack untouched, even when it is empty.
            let mut stack = match rule.top {
                None => config.stack.clone(),
                Some(top) => {
                    if config.stack.last() != Some(&top) {
                        continue;
                    }
                    let mut stack = config.stack.clone();
                    stack.pop();
                    stack
                }
            };
            stack.extend_from_slice(&rule.push);

            successors.push(Configuration {
                state: rule.next_state.clone(),
                position,
                stack,
            });
        }

        successors
    }
}
