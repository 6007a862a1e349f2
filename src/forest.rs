//! The set of prefix trees built from a whole corpus, one per language and
//! word length.

use std::{
    collections::{BTreeSet, HashMap},
    fmt::Display,
    str::FromStr,
};

use itertools::Itertools;
use log::{debug, warn};
use rand::{seq::IteratorRandom, Rng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constraints::ConstraintSpec, exclusion, search, trie::Trie, words, CorpusError, ParseError,
    Result,
};

/// A language with its own dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Russian];

    /// The short code used on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "ru" | "rus" | "russian" => Ok(Language::Russian),
            _ => Err(ParseError::UnknownLanguage(s.to_string())),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Identifies one corpus: the words of a language with a given length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CorpusKey {
    pub language: Language,
    pub length: usize,
}

impl CorpusKey {
    pub fn new(language: Language, length: usize) -> Self {
        CorpusKey { language, length }
    }
}

/// Every corpus, each in its own [`Trie`].
///
/// A forest is built once from the whole dictionary and then only read, so
/// it can be shared between threads and searched concurrently.
///
/// # Examples
///
/// ```rust
/// use wordly_solver::{ConstraintSpec, Forest, Language};
///
/// let forest = Forest::build([
///     (Language::English, "muted"),
///     (Language::English, "cat"),
///     (Language::Russian, "кошка"),
/// ]);
///
/// let spec = ConstraintSpec::new(5).exact(0, 'm');
/// assert_eq!(forest.search(&spec, Language::English)?.as_deref(), Some("muted"));
///
/// // There are no four letter English words at all, which is a setup error
/// // rather than an unsatisfiable puzzle.
/// assert!(forest.search(&ConstraintSpec::new(4), Language::English).is_err());
/// #
/// # Ok::<_, wordly_solver::WordlyError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Forest {
    trees: HashMap<CorpusKey, Trie>,
}

impl Forest {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one tree for every language and length found in `words`.
    ///
    /// Words are normalized with [`words::normalize()`]; entries that do not
    /// survive normalization are skipped.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = (Language, S)>,
        S: AsRef<str>,
    {
        let groups = words
            .into_iter()
            .filter_map(|(language, word)| {
                let normalized = words::normalize(word.as_ref());
                if normalized.is_none() {
                    warn!("skipping \"{}\", it is not a word", word.as_ref());
                }
                normalized.map(|w| (CorpusKey::new(language, w.chars().count()), w))
            })
            .into_group_map();

        #[cfg(feature = "parallel")]
        let iter = groups.into_par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = groups.into_iter();

        let trees = iter
            .filter_map(|(key, words)| match Trie::from_words(key.length, &words) {
                Ok(trie) => {
                    debug!(
                        "built {} tree of {} letter words: {} words, {} nodes",
                        key.language,
                        key.length,
                        trie.word_count(),
                        trie.node_count()
                    );
                    Some((key, trie))
                }
                Err(e) => {
                    warn!(
                        "skipping the {} tree of {} letter words: {}",
                        key.language, key.length, e
                    );
                    None
                }
            })
            .collect();

        Forest { trees }
    }

    /// Adds a single word, creating its tree if needed.
    ///
    /// Returns `false` if the word is not a word or was already present.
    pub fn insert(&mut self, language: Language, word: &str) -> bool {
        match words::normalize(word) {
            Some(word) => {
                let length = word.chars().count();
                self.trees
                    .entry(CorpusKey::new(language, length))
                    .or_insert_with(|| Trie::new(length))
                    .insert(&word)
                    .unwrap_or(false)
            }
            None => false,
        }
    }

    /// Every corpus that has a tree, in order.
    pub fn keys(&self) -> impl Iterator<Item = CorpusKey> + '_ {
        self.trees.keys().copied().sorted()
    }

    /// Looks up the tree for a language and length.
    ///
    /// A missing tree is an error, since it means that the corpus was never
    /// loaded.
    pub fn tree(&self, language: Language, length: usize) -> Result<&Trie> {
        self.trees
            .get(&CorpusKey::new(language, length))
            .ok_or_else(|| CorpusError::UnknownCorpus { language, length }.into())
    }

    /// Finds a random word of `language` satisfying `spec`.
    ///
    /// `Ok(None)` means that no word is admissible. Errors mean that `spec`
    /// is invalid or that no corpus exists for the spec's length.
    pub fn search(&self, spec: &ConstraintSpec, language: Language) -> Result<Option<String>> {
        self.search_with_rng(spec, language, &mut rand::thread_rng())
    }

    pub fn search_with_rng<R: Rng + ?Sized>(
        &self,
        spec: &ConstraintSpec,
        language: Language,
        rng: &mut R,
    ) -> Result<Option<String>> {
        spec.validate()?;
        let tree = self.tree(language, spec.length())?;
        Ok(search::search_with_rng(tree, spec, rng))
    }

    /// Finds a word that avoids as many `forbidden` letters as possible; see
    /// [`exclusion::exclusion_word()`].
    pub fn exclusion_word(
        &self,
        forbidden: &BTreeSet<char>,
        language: Language,
        length: usize,
    ) -> Result<Option<String>> {
        let tree = self.tree(language, length)?;
        Ok(exclusion::exclusion_word(tree, forbidden))
    }

    /// Picks a word uniformly at random.
    pub fn random_word<R: Rng + ?Sized>(
        &self,
        language: Language,
        length: usize,
        rng: &mut R,
    ) -> Result<Option<String>> {
        let tree = self.tree(language, length)?;
        Ok(tree.leaves().choose(rng).map(|leaf| tree.reconstruct(leaf)))
    }
}
