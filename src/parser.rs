//! This module provides the parser for `.pda` and `.tm` definition files,
//! utilizing the `pest` crate. Both kinds share one line-oriented grammar of
//! directives and five-token transition lines; the functions here assemble a
//! [`Pda`] or [`Tm`] from the parse tree and hand it to the analyzer.

use crate::{
    analyzer::{analyze_pda, analyze_tm},
    types::{
        Acceptance, FlaError, Move, Pda, PdaRule, Tm, TmRule, BLANK_SYMBOL, EPSILON_SYMBOL,
        WILDCARD_SYMBOL,
    },
};
use pest::{
    error::{Error, ErrorVariant},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::{HashMap, HashSet};

/// Derives a `PestParser` for the definition grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DefinitionParser;

/// Directive keys a `.pda` file may contain.
const PDA_KEYS: &[&str] = &["Q", "S", "G", "q0", "z0", "F", "A"];
/// Directive keys a `.tm` file may contain.
const TM_KEYS: &[&str] = &["Q", "S", "G", "q0", "B", "F", "N"];

/// Parses the given source text into a validated [`Pda`].
///
/// # Returns
///
/// * `Ok(Pda)` if the text is grammatical and passes validation.
/// * `Err(FlaError::Syntax)` on grammar or token-shape errors.
/// * `Err(FlaError::Malformed)` on missing sections or failed validation.
pub fn parse_pda(input: &str) -> Result<Pda, FlaError> {
    let (sections, rows) = collect(input)?;
    check_known_keys(&sections, PDA_KEYS)?;

    let states = state_set(required(&sections, "Q")?)?;
    let input_alphabet = symbol_set(required(&sections, "S")?, false)?;
    let stack_alphabet = symbol_set(required(&sections, "G")?, false)?;
    let start_state = state_value(required(&sections, "q0")?)?;
    let start_symbol = symbol_value(required(&sections, "z0")?)?;

    let acceptance = match sections.get("A") {
        Some(section) => acceptance_mode(section)?,
        None => Acceptance::default(),
    };
    let accept_states = match sections.get("F") {
        Some(section) => state_set(section)?,
        None if acceptance == Acceptance::EmptyStack => HashSet::new(),
        None => return Err(missing_section(&["F"])),
    };

    let mut rules: HashMap<String, Vec<PdaRule>> = HashMap::new();
    for row in &rows {
        let [from, input_sym, top, to, push] = &row.tokens[..] else {
            continue;
        };

        let rule = PdaRule {
            input: epsilon_or_symbol(input_sym)?,
            top: epsilon_or_symbol(top)?,
            next_state: to.0.to_string(),
            push: push_sequence(push)?,
        };

        let entry = rules.entry(from.0.to_string()).or_default();
        if entry.contains(&rule) {
            return Err(parse_error("duplicate transition", row.span));
        }
        entry.push(rule);
    }
    if rules.is_empty() {
        return Err(FlaError::Malformed("no transitions defined".to_string()));
    }

    let pda = Pda {
        states,
        input_alphabet,
        stack_alphabet,
        start_state,
        start_symbol,
        accept_states,
        acceptance,
        rules,
    };

    analyze_pda(&pda)?;

    Ok(pda)
}

/// Parses the given source text into a validated [`Tm`].
pub fn parse_tm(input: &str) -> Result<Tm, FlaError> {
    let (sections, rows) = collect(input)?;
    check_known_keys(&sections, TM_KEYS)?;

    let states = state_set(required(&sections, "Q")?)?;
    let input_alphabet = symbol_set(required(&sections, "S")?, false)?;
    let tape_alphabet = symbol_set(required(&sections, "G")?, true)?;
    let start_state = state_value(required(&sections, "q0")?)?;
    let accept_states = state_set(required(&sections, "F")?)?;
    let blank = blank_symbol(required(&sections, "B")?)?;
    let tapes = tape_count(required(&sections, "N")?)?;

    let mut rules: HashMap<String, Vec<TmRule>> = HashMap::new();
    for row in &rows {
        let [from, read, write, moves, to] = &row.tokens[..] else {
            continue;
        };

        let rule = TmRule {
            read: read.0.chars().collect(),
            write: write.0.chars().collect(),
            moves: moves
                .0
                .chars()
                .map(|c| parse_move(c, moves.1))
                .collect::<Result<_, _>>()?,
            next_state: to.0.to_string(),
        };

        let entry = rules.entry(from.0.to_string()).or_default();
        if entry.contains(&rule) {
            return Err(parse_error("duplicate transition", row.span));
        }
        entry.push(rule);
    }
    if rules.is_empty() {
        return Err(FlaError::Malformed("no transitions defined".to_string()));
    }

    let tm = Tm {
        states,
        input_alphabet,
        tape_alphabet,
        start_state,
        blank,
        accept_states,
        tapes,
        rules,
    };

    analyze_tm(&tm)?;

    Ok(tm)
}

/// One directive section, normalized: `#q0 = q0` carries a single value,
/// `#Q = {q0,q1}` a set of them.
struct Section<'a> {
    values: Vec<(&'a str, Span<'a>)>,
    is_set: bool,
    span: Span<'a>,
}

/// One transition line, as five raw tokens.
struct Row<'a> {
    tokens: Vec<(&'a str, Span<'a>)>,
    span: Span<'a>,
}

/// Runs the grammar and splits the parse tree into directive sections and
/// transition rows. Directive keys must be unique.
fn collect(input: &str) -> Result<(HashMap<&str, Section<'_>>, Vec<Row<'_>>), FlaError> {
    let root = DefinitionParser::parse(Rule::file, input.trim())
        .map_err(|e| FlaError::Syntax(Box::new(e)))? //
        .next()
        .unwrap();

    let mut sections: HashMap<&str, Section<'_>> = HashMap::new();
    let mut rows = Vec::new();

    for line in root.into_inner() {
        let span = line.as_span();
        match line.as_rule() {
            Rule::directive => {
                let mut inner = line.into_inner();
                let key = inner.next().unwrap();
                let rhs = inner.next().unwrap();

                let section = match rhs.as_rule() {
                    Rule::set => Section {
                        values: rhs.into_inner().map(|v| (v.as_str(), v.as_span())).collect(),
                        is_set: true,
                        span,
                    },
                    _ => Section {
                        values: vec![(rhs.as_str(), rhs.as_span())],
                        is_set: false,
                        span,
                    },
                };

                if sections.insert(key.as_str(), section).is_some() {
                    return Err(parse_error(
                        &format!("duplicate '#{}' directive", key.as_str()),
                        span,
                    ));
                }
            }
            Rule::transition => {
                rows.push(Row {
                    tokens: line.into_inner().map(|t| (t.as_str(), t.as_span())).collect(),
                    span,
                });
            }
            _ => {} // Skip EOI
        }
    }

    Ok((sections, rows))
}

/// Rejects directive keys the given kind does not define.
fn check_known_keys(
    sections: &HashMap<&str, Section<'_>>,
    known: &[&str],
) -> Result<(), FlaError> {
    for (key, section) in sections {
        if !known.contains(key) {
            return Err(parse_error(
                &format!("unknown directive '#{key}'"),
                section.span,
            ));
        }
    }
    Ok(())
}

fn required<'a, 'b>(
    sections: &'b HashMap<&str, Section<'a>>,
    key: &str,
) -> Result<&'b Section<'a>, FlaError> {
    sections.get(key).ok_or_else(|| missing_section(&[key]))
}

fn missing_section(keys: &[&str]) -> FlaError {
    let names = keys
        .iter()
        .map(|k| format!("'#{k}'"))
        .collect::<Vec<_>>()
        .join(" or ");
    FlaError::Malformed(format!("missing {names} section"))
}

/// Reads a `{...}` section of state names.
fn state_set(section: &Section<'_>) -> Result<HashSet<String>, FlaError> {
    expect_set(section)?;
    let mut states = HashSet::new();
    for (value, span) in &section.values {
        if !crate::types::is_valid_state_name(value) {
            return Err(parse_error(&format!("invalid state name: {value}"), *span));
        }
        if !states.insert(value.to_string()) {
            return Err(parse_error(&format!("state redeclared: {value}"), *span));
        }
    }
    Ok(states)
}

/// Reads a `{...}` section of single-character symbols. The blank is only
/// admissible in a tape alphabet.
fn symbol_set(section: &Section<'_>, allow_blank: bool) -> Result<HashSet<char>, FlaError> {
    expect_set(section)?;
    let mut symbols = HashSet::new();
    for (value, span) in &section.values {
        let c = single_char(value, *span)?;
        if !(crate::types::is_valid_symbol(c) || (allow_blank && c == BLANK_SYMBOL)) {
            return Err(parse_error(&format!("invalid alphabet symbol: {value}"), *span));
        }
        if !symbols.insert(c) {
            return Err(parse_error(&format!("symbol redeclared: {value}"), *span));
        }
    }
    Ok(symbols)
}

fn state_value(section: &Section<'_>) -> Result<String, FlaError> {
    let (value, span) = expect_value(section)?;
    if !crate::types::is_valid_state_name(value) {
        return Err(parse_error(&format!("invalid state name: {value}"), span));
    }
    Ok(value.to_string())
}

fn symbol_value(section: &Section<'_>) -> Result<char, FlaError> {
    let (value, span) = expect_value(section)?;
    let c = single_char(value, span)?;
    if !crate::types::is_valid_symbol(c) {
        return Err(parse_error(&format!("invalid symbol: {value}"), span));
    }
    Ok(c)
}

/// Reads the `#A` acceptance mode of a `.pda` file.
fn acceptance_mode(section: &Section<'_>) -> Result<Acceptance, FlaError> {
    let (value, span) = expect_value(section)?;
    match value {
        "final_state" => Ok(Acceptance::FinalState),
        "empty_stack" => Ok(Acceptance::EmptyStack),
        "either" => Ok(Acceptance::Either),
        _ => Err(parse_error(
            &format!("unknown acceptance mode: {value}, expected 'final_state' | 'empty_stack' | 'either'"),
            span,
        )),
    }
}

/// Reads the `#B` blank symbol of a `.tm` file. The format reserves `_`.
fn blank_symbol(section: &Section<'_>) -> Result<char, FlaError> {
    let (value, span) = expect_value(section)?;
    if value != BLANK_SYMBOL.to_string() {
        return Err(parse_error(
            &format!("invalid blank symbol: {value}, expected '{BLANK_SYMBOL}'"),
            span,
        ));
    }
    Ok(BLANK_SYMBOL)
}

/// Reads the `#N` tape count of a `.tm` file.
fn tape_count(section: &Section<'_>) -> Result<usize, FlaError> {
    let (value, span) = expect_value(section)?;
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        Ok(_) => Err(parse_error("tape count must be at least 1", span)),
        Err(_) => Err(parse_error(&format!("invalid tape count: {value}"), span)),
    }
}

fn expect_set(section: &Section<'_>) -> Result<(), FlaError> {
    if !section.is_set {
        return Err(parse_error("expected a {...} set", section.span));
    }
    Ok(())
}

fn expect_value<'a>(section: &Section<'a>) -> Result<(&'a str, Span<'a>), FlaError> {
    if section.is_set {
        return Err(parse_error("expected a single value", section.span));
    }
    Ok(section.values[0])
}

fn single_char(value: &str, span: Span<'_>) -> Result<char, FlaError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(parse_error(
            &format!("expected a single symbol, got: {value}"),
            span,
        )),
    }
}

/// Reads a `.pda` transition condition token: a symbol, or `_` for none.
fn epsilon_or_symbol((value, span): &(&str, Span<'_>)) -> Result<Option<char>, FlaError> {
    if *value == EPSILON_SYMBOL.to_string() {
        return Ok(None);
    }
    single_char(value, *span).map(Some)
}

/// Reads a `.pda` push token. The file lists pushed symbols topmost-first;
/// the stored sequence is bottom-to-top so the engine can extend the stack
/// in place.
fn push_sequence((value, span): &(&str, Span<'_>)) -> Result<Vec<char>, FlaError> {
    if *value == EPSILON_SYMBOL.to_string() {
        return Ok(Vec::new());
    }
    if value.contains(EPSILON_SYMBOL) || value.contains(WILDCARD_SYMBOL) {
        return Err(parse_error(
            &format!("invalid push sequence: {value}"),
            *span,
        ));
    }
    Ok(value.chars().rev().collect())
}

/// Parses a single head-move character. Supports 'l' for Left, 'r' for
/// Right, and '*' for Stay.
fn parse_move(c: char, span: Span<'_>) -> Result<Move, FlaError> {
    match c {
        'l' => Ok(Move::Left),
        'r' => Ok(Move::Right),
        WILDCARD_SYMBOL => Ok(Move::Stay),
        _ => Err(parse_error(&format!("unsupported direction: {c}"), span)),
    }
}

/// Creates an `FlaError::Syntax` from a message and a `Span`.
fn parse_error(msg: &str, span: Span<'_>) -> FlaError {
    FlaError::Syntax(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
