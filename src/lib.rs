#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod feedback;
pub use feedback::{GuessedWord, LetterFeedback, Outcome};

pub mod constraints;
pub use constraints::{compile, ConstraintSpec};

pub mod trie;
pub use trie::{NodeId, Trie};

pub mod search;

pub mod exclusion;

pub mod forest;
pub use forest::{CorpusKey, Forest, Language};

pub mod solver;
pub use solver::{Solver, UserContext, WordSource};

pub mod words;

#[cfg(test)]
mod mock;

/// The result type used throughout `wordly_solver`.
pub type Result<T, E = WordlyError> = std::result::Result<T, E>;

/// The errors that `wordly_solver` can produce.
///
/// Note that a search that finds no admissible word is not an error: it
/// returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum WordlyError {
    #[error("guess history is inconsistent")]
    History {
        #[from]
        kind: HistoryError,
    },

    #[error("constraints are invalid")]
    Constraint {
        #[from]
        kind: ConstraintError,
    },

    #[error("corpus is not usable")]
    Corpus {
        #[from]
        kind: CorpusError,
    },

    #[error("could not parse input")]
    Parse {
        #[from]
        kind: ParseError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("trouble serializing or deserializing constraints")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// A guess in the history does not have the session's word length.
    #[error("guess {index} has {found} letters but the session uses {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    /// A position-keyed constraint points outside of the target word.
    #[error("position {position} is outside of a {length} letter word")]
    PositionOutOfRange { position: usize, length: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorpusError {
    /// No tree was built for this language and length. This means the corpus
    /// was never loaded, not that the puzzle is unsatisfiable.
    #[error("no corpus was loaded for {language} words of length {length}")]
    UnknownCorpus { language: Language, length: usize },

    /// A word was inserted into a tree built for another length.
    #[error("the word \"{word}\" has {found} letters but the tree holds {expected} letter words")]
    WordLength {
        word: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{0}' is not a feedback outcome")]
    UnknownOutcome(char),

    #[error("the pattern \"{pattern}\" does not match the length of \"{word}\"")]
    PatternLength { word: String, pattern: String },

    #[error("\"{0}\" is not a supported language")]
    UnknownLanguage(String),

    #[error("expected WORD=PATTERN, got \"{0}\"")]
    MalformedGuess(String),
}
