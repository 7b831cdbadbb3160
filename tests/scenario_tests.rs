//! End-to-end scenarios against the embedded machines: each case drives a
//! definition through the loader surface exactly like the CLI does.

use fla::types::FlaError;
use fla::{Automaton, MachineLibrary};

fn run(machine: &Automaton, input: &str) -> String {
    machine.run(input).unwrap()
}

fn illegal(machine: &Automaton, input: &str) -> FlaError {
    machine.run(input).unwrap_err()
}

#[test]
fn anbn_scenarios() {
    let machine = MachineLibrary::get("anbn").unwrap();

    for accepted in ["ab", "aaabbb", "aaaaabbbbb"] {
        assert_eq!(run(&machine, accepted), "true", "input {accepted:?}");
    }
    for rejected in ["aabbb", "aab", "aaa", "b", ""] {
        assert_eq!(run(&machine, rejected), "false", "input {rejected:?}");
    }
    assert!(matches!(
        illegal(&machine, "c"),
        FlaError::IllegalInput { symbol: 'c', .. }
    ));
}

#[test]
fn brackets_scenarios() {
    let machine = MachineLibrary::get("brackets").unwrap();

    for accepted in ["()", "()()()", "(()(())())"] {
        assert_eq!(run(&machine, accepted), "true", "input {accepted:?}");
    }
    for rejected in ["((()", "(()))", "()()(()()", ")("] {
        assert_eq!(run(&machine, rejected), "false", "input {rejected:?}");
    }
    assert!(matches!(
        illegal(&machine, "{}[]"),
        FlaError::IllegalInput { symbol: '{', .. }
    ));
}

#[test]
fn palindrome_scenarios() {
    let machine = MachineLibrary::get("palindrome").unwrap();

    for palindrome in ["1001001", "11111", "1010101", "0", ""] {
        assert_eq!(run(&machine, palindrome), "true", "input {palindrome:?}");
    }
    for other in ["110", "11101", "0000011111", "10"] {
        assert_eq!(run(&machine, other), "false", "input {other:?}");
    }
    assert!(matches!(
        illegal(&machine, "22222"),
        FlaError::IllegalInput { symbol: '2', .. }
    ));
}

#[test]
fn multiply_scenarios() {
    let machine = MachineLibrary::get("multiply").unwrap();

    assert_eq!(run(&machine, "ab"), "c");
    assert_eq!(run(&machine, "aaabbb"), "c".repeat(9));
    assert_eq!(run(&machine, "aabbbb"), "c".repeat(8));

    // A halt with the reject marker is a successful run, not a fault
    for malformed in ["aaaa", "bbb", "aaabbbaaabbb", ""] {
        assert_eq!(run(&machine, malformed), "illegal_input", "input {malformed:?}");
    }
    assert!(matches!(
        illegal(&machine, "aaaccc"),
        FlaError::IllegalInput { symbol: 'c', .. }
    ));
}

#[test]
fn runs_are_idempotent() {
    let machine = MachineLibrary::get("anbn").unwrap();

    let outputs: Vec<_> = (0..3).map(|_| machine.run("aaabbb")).collect();
    assert!(outputs.iter().all(|o| *o == Ok("true".to_string())));
}
