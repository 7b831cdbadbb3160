//! This crate provides the core logic of the `fla` interpreter for formal
//! language automata. It includes modules for parsing `.pda` and `.tm`
//! definition files, validating them, simulating pushdown automata and
//! (multi-tape) Turing machines, and a library of embedded example machines.

pub mod analyzer;
pub mod loader;
pub mod machines;
pub mod parser;
pub mod pda;
pub mod search;
pub mod tm;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the analyzer entry points.
pub use analyzer::{analyze_pda, analyze_tm, AnalysisError};
/// Re-exports the loader surface: kind dispatch and the `Automaton` enum.
pub use loader::{Automaton, DefinitionLoader, FileKind};
/// Re-exports the embedded machine registry.
pub use machines::{MachineInfo, MachineLibrary, MACHINES};
/// Re-exports the parsing functions for the two definition kinds.
pub use parser::{parse_pda, parse_tm};
/// Re-exports the tape value type of the Turing machine engine.
pub use tm::Tape;
/// Re-exports the definition models and shared types.
pub use types::{
    Acceptance, FlaError, Move, Pda, PdaRule, Tm, TmRule, BLANK_SYMBOL, MAX_EXPLORED_CONFIGS,
};
