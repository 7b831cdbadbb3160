//! This module loads automaton definitions from the file system: it reads a
//! `.pda` or `.tm` file, picks the right parser for the extension, and hands
//! back a validated [`Automaton`].

use crate::parser::{parse_pda, parse_tm};
use crate::types::{FlaError, Pda, Tm};
use std::fs;
use std::path::Path;

/// The two definition kinds, told apart by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `.pda` pushdown automaton definition.
    Pda,
    /// A `.tm` Turing machine definition.
    Tm,
}

impl FileKind {
    /// Determines the definition kind from a path's extension, or `None`
    /// for anything other than `.pda` and `.tm`.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        match path.extension()?.to_str()? {
            "pda" => Some(FileKind::Pda),
            "tm" => Some(FileKind::Tm),
            _ => None,
        }
    }
}

/// A loaded definition of either kind.
///
/// The definition is immutable once loaded; a run borrows it read-only.
#[derive(Debug, Clone, PartialEq)]
pub enum Automaton {
    Pda(Pda),
    Tm(Tm),
}

impl Automaton {
    /// Runs the automaton against `input` and renders the outcome the way
    /// the CLI prints it: `"true"`/`"false"` for a PDA verdict, the final
    /// output-tape content for a TM.
    pub fn run(&self, input: &str) -> Result<String, FlaError> {
        match self {
            Automaton::Pda(pda) => pda.run(input).map(|accepted| accepted.to_string()),
            Automaton::Tm(tm) => tm.run(input),
        }
    }
}

/// `DefinitionLoader` is a utility struct for loading automaton definitions
/// from files or in-memory strings.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Loads a definition from the given path, dispatching on its extension.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` if the file is read, parsed and validated.
    /// * `Err(FlaError::Malformed)` if the extension is neither `.pda` nor
    ///   `.tm`.
    /// * `Err(FlaError::File)` if the file cannot be read.
    /// * `Err(FlaError::Syntax)` / `Err(FlaError::Malformed)` from parsing.
    pub fn load(path: &Path) -> Result<Automaton, FlaError> {
        let kind = FileKind::from_path(path).ok_or_else(|| {
            FlaError::Malformed(format!("unknown file type: {}", path.display()))
        })?;
        Self::load_as(path, kind)
    }

    /// Loads a definition from the given path as an explicit kind,
    /// ignoring the extension.
    pub fn load_as(path: &Path, kind: FileKind) -> Result<Automaton, FlaError> {
        let content = fs::read_to_string(path).map_err(|e| {
            FlaError::File(format!("failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_from_string(&content, kind)
    }

    /// Parses a definition from in-memory source text.
    pub fn load_from_string(content: &str, kind: FileKind) -> Result<Automaton, FlaError> {
        match kind {
            FileKind::Pda => parse_pda(content).map(Automaton::Pda),
            FileKind::Tm => parse_tm(content).map(Automaton::Tm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const PDA: &str = "#Q = {q0,q1}\n#S = {a}\n#G = {z}\n#q0 = q0\n#z0 = z\n#F = {q1}\nq0 a z q1 z\n";
    const TM: &str = "#Q = {q0,q1}\n#S = {a}\n#G = {a,b,_}\n#q0 = q0\n#B = _\n#F = {q1}\n#N = 1\nq0 a b r q1\n";

    #[test]
    fn test_file_kind_from_path() {
        assert_eq!(FileKind::from_path(Path::new("anbn.pda")), Some(FileKind::Pda));
        assert_eq!(FileKind::from_path(Path::new("dir/case1.tm")), Some(FileKind::Tm));
        assert_eq!(FileKind::from_path(Path::new("file.txt")), None);
        assert_eq!(FileKind::from_path(Path::new("file")), None);
    }

    #[test]
    fn test_load_valid_pda() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.pda");
        File::create(&path)
            .unwrap()
            .write_all(PDA.as_bytes())
            .unwrap();

        let automaton = DefinitionLoader::load(&path).unwrap();
        assert!(matches!(automaton, Automaton::Pda(_)));
        assert_eq!(automaton.run("a"), Ok("true".to_string()));
        assert_eq!(automaton.run(""), Ok("false".to_string()));
    }

    #[test]
    fn test_load_valid_tm() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.tm");
        File::create(&path)
            .unwrap()
            .write_all(TM.as_bytes())
            .unwrap();

        let automaton = DefinitionLoader::load(&path).unwrap();
        assert!(matches!(automaton, Automaton::Tm(_)));
        assert_eq!(automaton.run("a"), Ok("b".to_string()));
    }

    #[test]
    fn test_load_unknown_extension() {
        let error = DefinitionLoader::load(Path::new("machine.txt")).unwrap_err();
        assert!(matches!(error, FlaError::Malformed(_)));
        assert!(error.to_string().contains("unknown file type"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.pda");

        let error = DefinitionLoader::load(&path).unwrap_err();
        assert!(matches!(error, FlaError::File(_)));
    }

    #[test]
    fn test_load_invalid_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pda");
        File::create(&path)
            .unwrap()
            .write_all(b"this is not a definition")
            .unwrap();

        assert!(DefinitionLoader::load(&path).is_err());
    }

    #[test]
    fn test_load_as_overrides_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("machine.txt");
        File::create(&path)
            .unwrap()
            .write_all(PDA.as_bytes())
            .unwrap();

        let automaton = DefinitionLoader::load_as(&path, FileKind::Pda).unwrap();
        assert!(matches!(automaton, Automaton::Pda(_)));
    }
}
