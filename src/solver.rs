//! Suggesting the next guess of a game, round after round.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::{
    constraints::compile,
    feedback::GuessedWord,
    forest::{Forest, Language},
    CorpusError, Result,
};

/// The number of guesses in a standard game.
pub const MAX_ROUNDS: usize = 6;

/// Supplies the opening guess, before any feedback is known.
pub trait WordSource {
    fn first_word(&self, language: Language) -> Result<String>;
}

/// Tells the solver which language the current player uses.
pub trait UserContext {
    fn current_language(&self) -> Language;
}

/// Opens with a random corpus word of a fixed length.
#[derive(Debug, Clone, Copy)]
pub struct RandomFirstWord<'f> {
    forest: &'f Forest,
    length: usize,
}

impl<'f> RandomFirstWord<'f> {
    pub fn new(forest: &'f Forest, length: usize) -> Self {
        RandomFirstWord { forest, length }
    }
}

impl WordSource for RandomFirstWord<'_> {
    fn first_word(&self, language: Language) -> Result<String> {
        self.forest
            .random_word(language, self.length, &mut rand::thread_rng())?
            .ok_or_else(|| {
                CorpusError::UnknownCorpus {
                    language,
                    length: self.length,
                }
                .into()
            })
    }
}

/// A player that always uses the same language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLanguage(pub Language);

impl UserContext for FixedLanguage {
    fn current_language(&self) -> Language {
        self.0
    }
}

/// Picks guesses from a [`Forest`] based on the history of a game.
///
/// # Examples
///
/// ```rust
/// use wordly_solver::{
///     solver::{FixedLanguage, RandomFirstWord},
///     Forest, GuessedWord, Language, Solver,
/// };
///
/// let forest = Forest::build(
///     ["muted", "cutey", "fumes", "gauge", "lutes"]
///         .map(|w| (Language::English, w)),
/// );
/// let solver = Solver::new(
///     &forest,
///     RandomFirstWord::new(&forest, 5),
///     FixedLanguage(Language::English),
/// );
///
/// let history = [GuessedWord::grade("lutes", "muted")];
/// assert_eq!(solver.suggest(&history, 5)?.as_deref(), Some("muted"));
/// #
/// # Ok::<_, wordly_solver::WordlyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver<'f, W, U> {
    forest: &'f Forest,
    words: W,
    user: U,
    max_rounds: usize,
}

impl<'f, W: WordSource, U: UserContext> Solver<'f, W, U> {
    /// Creates a solver that plays at most [`MAX_ROUNDS`] rounds.
    pub fn new(forest: &'f Forest, words: W, user: U) -> Self {
        Solver {
            forest,
            words,
            user,
            max_rounds: MAX_ROUNDS,
        }
    }

    /// Sets the number of rounds [`play()`](Solver::play()) may use.
    pub fn max_rounds(self, max_rounds: usize) -> Self {
        Solver { max_rounds, ..self }
    }

    /// Suggests the next guess.
    ///
    /// With no history the [`WordSource`] picks the opening word, which must
    /// be `length` letters long. Otherwise the whole history is compiled and
    /// searched. `Ok(None)` means that no word in the corpus fits the
    /// feedback.
    pub fn suggest(&self, history: &[GuessedWord], length: usize) -> Result<Option<String>> {
        let language = self.user.current_language();

        if history.is_empty() {
            let word = self.words.first_word(language)?;
            let found = word.chars().count();
            if found != length {
                return Err(CorpusError::WordLength {
                    word,
                    expected: length,
                    found,
                }
                .into());
            }
            return Ok(Some(word));
        }

        let spec = compile(history, length)?;
        let found = self.forest.search(&spec, language)?;
        debug!(
            "round {}: suggesting {:?} for {} words of length {}",
            history.len() + 1,
            found,
            language,
            length
        );
        Ok(found)
    }

    /// Suggests a word that avoids every letter already guessed, to learn as
    /// much as possible from the next round.
    pub fn exclusion_word(&self, history: &[GuessedWord], length: usize) -> Result<Option<String>> {
        // only for the length check
        compile(history, length)?;

        let forbidden: BTreeSet<char> = history
            .iter()
            .flat_map(|guess| guess.letters().iter().map(|l| l.letter))
            .collect();
        self.forest
            .exclusion_word(&forbidden, self.user.current_language(), length)
    }

    /// Plays a whole game against a known answer.
    ///
    /// Stops when a guess is fully correct, when no word fits the feedback,
    /// or when the round limit is reached, and returns every graded guess.
    pub fn play(&self, answer: &str) -> Result<Vec<GuessedWord>> {
        let length = answer.chars().count();
        let mut history = Vec::new();

        while history.len() < self.max_rounds {
            let guess = match self.suggest(&history, length)? {
                Some(guess) => guess,
                None => break,
            };

            let graded = GuessedWord::grade(&guess, answer);
            let solved = graded.solved();
            history.push(graded);
            if solved {
                break;
            }
        }

        info!(
            "played {} rounds for \"{}\", solved: {}",
            history.len(),
            answer,
            history.last().map_or(false, GuessedWord::solved)
        );
        Ok(history)
    }
}
