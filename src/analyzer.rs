//! This module validates parsed definitions before they are handed to an
//! engine: every state and symbol a transition references must be declared,
//! tape arities must match the declared tape count, and the reserved blank
//! symbol must stay out of the input alphabet.

use crate::types::{Acceptance, FlaError, Pda, Tm, WILDCARD_SYMBOL};

/// Structural problems found in a parsed definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// A transition references a state missing from the declared state set.
    UndeclaredState(String),
    /// The start state is missing from the declared state set.
    UndeclaredStartState(String),
    /// An accept state is missing from the declared state set.
    UndeclaredAcceptState(String),
    /// A transition references a symbol missing from the stated alphabet for
    /// its position.
    UndeclaredSymbol(char),
    /// The blank symbol was declared as an input symbol.
    BlankInInputAlphabet,
    /// A declared input symbol is missing from the tape alphabet.
    InputSymbolNotOnTape(char),
    /// A transition tuple does not match the declared tape count.
    TapeArityMismatch { state: String, expected: usize },
    /// A `*` write requires a `*` read at the same tape position.
    WildcardWrite { state: String },
    /// The automaton has no accept states but its acceptance mode needs them.
    NoAcceptStates,
}

impl From<AnalysisError> for FlaError {
    fn from(error: AnalysisError) -> Self {
        let msg = match error {
            AnalysisError::UndeclaredState(state) => {
                format!("transition references undeclared state: {state}")
            }
            AnalysisError::UndeclaredStartState(state) => {
                format!("start state not declared: {state}")
            }
            AnalysisError::UndeclaredAcceptState(state) => {
                format!("accept state not declared: {state}")
            }
            AnalysisError::UndeclaredSymbol(symbol) => {
                format!("transition references undeclared symbol: {symbol}")
            }
            AnalysisError::BlankInInputAlphabet => {
                "the blank symbol cannot be an input symbol".to_string()
            }
            AnalysisError::InputSymbolNotOnTape(symbol) => {
                format!("input symbol missing from the tape alphabet: {symbol}")
            }
            AnalysisError::TapeArityMismatch { state, expected } => {
                format!("transition in state '{state}' does not span {expected} tape(s)")
            }
            AnalysisError::WildcardWrite { state } => {
                format!("transition in state '{state}' writes '*' over a non-'*' read")
            }
            AnalysisError::NoAcceptStates => "no accept states defined".to_string(),
        };
        FlaError::Malformed(msg)
    }
}

/// Analyzes a parsed [`Pda`] for structural and reference errors.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(FlaError::Malformed)` describing the first violation otherwise.
pub fn analyze_pda(pda: &Pda) -> Result<(), FlaError> {
    check_pda_states(pda)?;
    check_pda_symbols(pda)?;
    Ok(())
}

/// Analyzes a parsed [`Tm`] the same way.
pub fn analyze_tm(tm: &Tm) -> Result<(), FlaError> {
    check_tm_states(tm)?;
    check_tm_alphabets(tm)?;
    check_tm_rules(tm)?;
    Ok(())
}

fn check_pda_states(pda: &Pda) -> Result<(), AnalysisError> {
    if !pda.states.contains(&pda.start_state) {
        return Err(AnalysisError::UndeclaredStartState(pda.start_state.clone()));
    }

    if let Some(state) = pda
        .accept_states
        .iter()
        .find(|s| !pda.states.contains(*s))
    {
        return Err(AnalysisError::UndeclaredAcceptState(state.clone()));
    }

    if pda.accept_states.is_empty() && pda.acceptance != Acceptance::EmptyStack {
        return Err(AnalysisError::NoAcceptStates);
    }

    for (state, rules) in &pda.rules {
        if !pda.states.contains(state) {
            return Err(AnalysisError::UndeclaredState(state.clone()));
        }
        for rule in rules {
            if !pda.states.contains(&rule.next_state) {
                return Err(AnalysisError::UndeclaredState(rule.next_state.clone()));
            }
        }
    }

    Ok(())
}

fn check_pda_symbols(pda: &Pda) -> Result<(), AnalysisError> {
    if !pda.stack_alphabet.contains(&pda.start_symbol) {
        return Err(AnalysisError::UndeclaredSymbol(pda.start_symbol));
    }

    for rules in pda.rules.values() {
        for rule in rules {
            if let Some(symbol) = rule.input {
                if !pda.input_alphabet.contains(&symbol) {
                    return Err(AnalysisError::UndeclaredSymbol(symbol));
                }
            }
            if let Some(symbol) = rule.top {
                if !pda.stack_alphabet.contains(&symbol) {
                    return Err(AnalysisError::UndeclaredSymbol(symbol));
                }
            }
            if let Some(&symbol) = rule
                .push
                .iter()
                .find(|c| !pda.stack_alphabet.contains(*c))
            {
                return Err(AnalysisError::UndeclaredSymbol(symbol));
            }
        }
    }

    Ok(())
}

fn check_tm_states(tm: &Tm) -> Result<(), AnalysisError> {
    if !tm.states.contains(&tm.start_state) {
        return Err(AnalysisError::UndeclaredStartState(tm.start_state.clone()));
    }

    if let Some(state) = tm.accept_states.iter().find(|s| !tm.states.contains(*s)) {
        return Err(AnalysisError::UndeclaredAcceptState(state.clone()));
    }

    for (state, rules) in &tm.rules {
        if !tm.states.contains(state) {
            return Err(AnalysisError::UndeclaredState(state.clone()));
        }
        for rule in rules {
            if !tm.states.contains(&rule.next_state) {
                return Err(AnalysisError::UndeclaredState(rule.next_state.clone()));
            }
        }
    }

    Ok(())
}

fn check_tm_alphabets(tm: &Tm) -> Result<(), AnalysisError> {
    if tm.input_alphabet.contains(&tm.blank) {
        return Err(AnalysisError::BlankInInputAlphabet);
    }

    if !tm.tape_alphabet.contains(&tm.blank) {
        return Err(AnalysisError::UndeclaredSymbol(tm.blank));
    }

    // Tape 0 starts out holding the input, so every input symbol must be a
    // tape symbol as well.
    if let Some(&symbol) = tm
        .input_alphabet
        .iter()
        .find(|c| !tm.tape_alphabet.contains(*c))
    {
        return Err(AnalysisError::InputSymbolNotOnTape(symbol));
    }

    Ok(())
}

fn check_tm_rules(tm: &Tm) -> Result<(), AnalysisError> {
    for (state, rules) in &tm.rules {
        for rule in rules {
            if rule.read.len() != tm.tapes
                || rule.write.len() != tm.tapes
                || rule.moves.len() != tm.tapes
            {
                return Err(AnalysisError::TapeArityMismatch {
                    state: state.clone(),
                    expected: tm.tapes,
                });
            }

            for (&read, &write) in rule.read.iter().zip(&rule.write) {
                for symbol in [read, write] {
                    if symbol != WILDCARD_SYMBOL && !tm.tape_alphabet.contains(&symbol) {
                        return Err(AnalysisError::UndeclaredSymbol(symbol));
                    }
                }
                if write == WILDCARD_SYMBOL && read != WILDCARD_SYMBOL {
                    return Err(AnalysisError::WildcardWrite {
                        state: state.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Move, PdaRule, TmRule, BLANK_SYMBOL};
    use std::collections::HashMap;

    fn test_pda() -> Pda {
        let mut rules = HashMap::new();
        rules.insert(
            "q0".to_string(),
            vec![PdaRule {
                input: Some('a'),
                top: Some('z'),
                next_state: "q1".to_string(),
                push: vec!['z', 'a'],
            }],
        );

        Pda {
            states: ["q0", "q1"].iter().map(|s| s.to_string()).collect(),
            input_alphabet: ['a'].into_iter().collect(),
            stack_alphabet: ['z', 'a'].into_iter().collect(),
            start_state: "q0".to_string(),
            start_symbol: 'z',
            accept_states: ["q1".to_string()].into_iter().collect(),
            acceptance: Acceptance::FinalState,
            rules,
        }
    }

    fn test_tm() -> Tm {
        let mut rules = HashMap::new();
        rules.insert(
            "q0".to_string(),
            vec![TmRule {
                read: vec!['a', BLANK_SYMBOL],
                write: vec![BLANK_SYMBOL, 'a'],
                moves: vec![Move::Right, Move::Right],
                next_state: "halt".to_string(),
            }],
        );

        Tm {
            states: ["q0", "halt"].iter().map(|s| s.to_string()).collect(),
            input_alphabet: ['a'].into_iter().collect(),
            tape_alphabet: ['a', BLANK_SYMBOL].into_iter().collect(),
            start_state: "q0".to_string(),
            blank: BLANK_SYMBOL,
            accept_states: ["halt".to_string()].into_iter().collect(),
            tapes: 2,
            rules,
        }
    }

    #[test]
    fn test_valid_pda() {
        assert!(analyze_pda(&test_pda()).is_ok());
    }

    #[test]
    fn test_undeclared_next_state() {
        let mut pda = test_pda();
        pda.rules.get_mut("q0").unwrap()[0].next_state = "nowhere".to_string();

        let error = analyze_pda(&pda).unwrap_err();
        assert!(error
            .to_string()
            .contains("transition references undeclared state: nowhere"));
    }

    #[test]
    fn test_undeclared_start_state() {
        let mut pda = test_pda();
        pda.start_state = "missing".to_string();

        let error = analyze_pda(&pda).unwrap_err();
        assert!(error.to_string().contains("start state not declared"));
    }

    #[test]
    fn test_undeclared_push_symbol() {
        let mut pda = test_pda();
        pda.rules.get_mut("q0").unwrap()[0].push = vec!['x'];

        let error = analyze_pda(&pda).unwrap_err();
        assert!(error.to_string().contains("undeclared symbol: x"));
    }

    #[test]
    fn test_undeclared_input_symbol() {
        let mut pda = test_pda();
        pda.rules.get_mut("q0").unwrap()[0].input = Some('b');

        let error = analyze_pda(&pda).unwrap_err();
        assert!(error.to_string().contains("undeclared symbol: b"));
    }

    #[test]
    fn test_no_accept_states() {
        let mut pda = test_pda();
        pda.accept_states.clear();

        let error = analyze_pda(&pda).unwrap_err();
        assert!(error.to_string().contains("no accept states defined"));

        pda.acceptance = Acceptance::EmptyStack;
        assert!(analyze_pda(&pda).is_ok());
    }

    #[test]
    fn test_valid_tm() {
        assert!(analyze_tm(&test_tm()).is_ok());
    }

    #[test]
    fn test_blank_in_input_alphabet() {
        let mut tm = test_tm();
        tm.input_alphabet.insert(BLANK_SYMBOL);

        let error = analyze_tm(&tm).unwrap_err();
        assert!(error
            .to_string()
            .contains("the blank symbol cannot be an input symbol"));
    }

    #[test]
    fn test_input_symbol_missing_from_tape_alphabet() {
        let mut tm = test_tm();
        tm.input_alphabet.insert('b');

        let error = analyze_tm(&tm).unwrap_err();
        assert!(error
            .to_string()
            .contains("input symbol missing from the tape alphabet: b"));
    }

    #[test]
    fn test_tape_arity_mismatch() {
        let mut tm = test_tm();
        tm.tapes = 3;

        let error = analyze_tm(&tm).unwrap_err();
        assert!(error.to_string().contains("does not span 3 tape(s)"));
    }

    #[test]
    fn test_wildcard_write_over_concrete_read() {
        let mut tm = test_tm();
        let rule = &mut tm.rules.get_mut("q0").unwrap()[0];
        rule.read = vec!['a', BLANK_SYMBOL];
        rule.write = vec![WILDCARD_SYMBOL, 'a'];

        let error = analyze_tm(&tm).unwrap_err();
        assert!(error.to_string().contains("writes '*' over a non-'*' read"));
    }

    #[test]
    fn test_undeclared_tape_symbol() {
        let mut tm = test_tm();
        tm.rules.get_mut("q0").unwrap()[0].write = vec!['x', 'a'];

        let error = analyze_tm(&tm).unwrap_err();
        assert!(error.to_string().contains("undeclared symbol: x"));
    }
}
