use crate::loader::{Automaton, DefinitionLoader, FileKind};
use crate::types::FlaError;

use std::sync::RwLock;

// Default embedded definitions
const MACHINE_TEXTS: [(&str, FileKind, &str); 4] = [
    ("anbn", FileKind::Pda, include_str!("../machines/anbn.pda")),
    ("brackets", FileKind::Pda, include_str!("../machines/brackets.pda")),
    ("palindrome", FileKind::Tm, include_str!("../machines/palindrome.tm")),
    ("multiply", FileKind::Tm, include_str!("../machines/multiply.tm")),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<(String, Automaton)>> = RwLock::new(Vec::new());
}

/// Summary of one embedded machine.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineInfo {
    pub name: String,
    pub kind: FileKind,
    pub states: usize,
    pub rules: usize,
}

pub struct MachineLibrary;

impl MachineLibrary {
    /// Parse the embedded definitions into the registry
    pub fn load() -> Result<(), FlaError> {
        let mut machines = Vec::new();

        for (name, kind, text) in MACHINE_TEXTS {
            let automaton = DefinitionLoader::load_from_string(text, kind)?;
            machines.push((name.to_string(), automaton));
        }

        let mut write_guard = MACHINES
            .write()
            .map_err(|_| FlaError::File("failed to acquire write lock".to_string()))?;
        *write_guard = machines;

        Ok(())
    }

    /// Get an embedded machine by its name
    pub fn get(name: &str) -> Result<Automaton, FlaError> {
        Self::load()?;

        MACHINES
            .read()
            .map_err(|_| FlaError::File("failed to acquire read lock".to_string()))?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, automaton)| automaton.clone())
            .ok_or_else(|| FlaError::Malformed(format!("machine '{name}' not found")))
    }

    /// List the names of all embedded machines
    pub fn names() -> Vec<String> {
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| machines.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// Get summary information about an embedded machine
    pub fn info(name: &str) -> Result<MachineInfo, FlaError> {
        let automaton = Self::get(name)?;

        let (kind, states, rules) = match &automaton {
            Automaton::Pda(pda) => (
                FileKind::Pda,
                pda.states.len(),
                pda.rules.values().map(Vec::len).sum(),
            ),
            Automaton::Tm(tm) => (
                FileKind::Tm,
                tm.states.len(),
                tm.rules.values().map(Vec::len).sum(),
            ),
        };

        Ok(MachineInfo {
            name: name.to_string(),
            kind,
            states,
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_embedded_machines_parse() {
        assert!(MachineLibrary::load().is_ok());
        assert_eq!(
            MachineLibrary::names(),
            vec!["anbn", "brackets", "palindrome", "multiply"]
        );
    }

    #[test]
    fn test_get_machine() {
        let anbn = MachineLibrary::get("anbn").unwrap();
        assert!(matches!(anbn, Automaton::Pda(_)));

        let palindrome = MachineLibrary::get("palindrome").unwrap();
        assert!(matches!(palindrome, Automaton::Tm(_)));

        assert!(MachineLibrary::get("missing").is_err());
    }

    #[test]
    fn test_machine_info() {
        let info = MachineLibrary::info("anbn").unwrap();

        assert_eq!(info.kind, FileKind::Pda);
        assert_eq!(info.states, 3);
        assert_eq!(info.rules, 5);
    }
}
