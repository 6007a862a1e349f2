//! Compiling guess history into constraints on the hidden word.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    feedback::{GuessedWord, Outcome},
    ConstraintError, HistoryError, Result,
};

/// Everything known about the hidden word.
///
/// A [`ConstraintSpec`] is normally produced by [`compile()`] from the whole
/// guess history, but it can also be assembled by hand with the builder
/// methods. Hand-built specs should be checked with
/// [`validate()`](ConstraintSpec::validate()).
///
/// # Examples
///
/// ```rust
/// use wordly_solver::ConstraintSpec;
///
/// let spec = ConstraintSpec::new(5)
///     .exclude("abrols")
///     .exact(2, 't')
///     .exact(4, 'd');
///
/// assert!(spec.is_admissible("muted"));
/// assert!(!spec.is_admissible("lutes"));
/// assert!(!spec.clone().cap('m', 0).is_admissible("muted"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ConstraintSpec {
    exact: BTreeMap<usize, char>,
    excluded_at: BTreeMap<usize, BTreeSet<char>>,
    excluded: BTreeSet<char>,
    caps: BTreeMap<char, usize>,
    length: usize,
}

impl ConstraintSpec {
    /// Creates a spec with no constraints for words of `length` letters.
    pub fn new(length: usize) -> Self {
        ConstraintSpec {
            length,
            ..Self::default()
        }
    }

    /// Fixes the letter at `position`.
    pub fn exact(self, position: usize, letter: char) -> Self {
        let mut exact = self.exact;
        exact.insert(position, letter);
        ConstraintSpec { exact, ..self }
    }

    /// Marks every letter of `letters` as present in the word but not at
    /// `position`.
    pub fn exclude_at(self, position: usize, letters: &str) -> Self {
        let mut excluded_at = self.excluded_at;
        excluded_at.entry(position).or_default().extend(letters.chars());
        ConstraintSpec {
            excluded_at,
            ..self
        }
    }

    /// Marks every letter of `letters` as absent from the word.
    pub fn exclude(self, letters: &str) -> Self {
        let mut excluded = self.excluded;
        excluded.extend(letters.chars());
        ConstraintSpec { excluded, ..self }
    }

    /// Allows `letter` to appear at most `max` times.
    pub fn cap(self, letter: char, max: usize) -> Self {
        let mut caps = self.caps;
        caps.insert(letter, max);
        ConstraintSpec { caps, ..self }
    }

    /// Checks that every position-keyed constraint lies inside the word.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        self.exact
            .keys()
            .chain(self.excluded_at.keys())
            .find(|&&position| position >= self.length)
            .map_or(Ok(()), |&position| {
                Err(ConstraintError::PositionOutOfRange {
                    position,
                    length: self.length,
                })
            })
    }

    /// The length of the hidden word.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Letters known to be at a given position.
    pub fn exact_positions(&self) -> &BTreeMap<usize, char> {
        &self.exact
    }

    /// Letters known to be in the word, keyed by a position they are not at.
    pub fn excluded_positions(&self) -> &BTreeMap<usize, BTreeSet<char>> {
        &self.excluded_at
    }

    /// Letters known to not be in the word at all.
    pub fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }

    /// Explicit occurrence caps.
    pub fn caps(&self) -> &BTreeMap<char, usize> {
        &self.caps
    }

    pub fn exact_at(&self, position: usize) -> Option<char> {
        self.exact.get(&position).copied()
    }

    pub fn is_excluded_at(&self, position: usize, letter: char) -> bool {
        self.excluded_at
            .get(&position)
            .map_or(false, |letters| letters.contains(&letter))
    }

    pub fn is_excluded(&self, letter: char) -> bool {
        self.excluded.contains(&letter)
    }

    /// The maximum number of times `letter` may appear. Letters without an
    /// explicit cap may fill the whole word.
    pub fn cap_for(&self, letter: char) -> usize {
        self.caps.get(&letter).copied().unwrap_or(self.length)
    }

    /// Letters that must appear somewhere in the word: every exact letter and
    /// every letter excluded from some position.
    pub fn required_letters(&self) -> BTreeSet<char> {
        self.exact
            .values()
            .copied()
            .chain(self.excluded_at.values().flatten().copied())
            .collect()
    }

    /// Checks the letter tallies of a complete word: all required letters are
    /// present and no letter exceeds its cap.
    pub fn satisfies_tallies(&self, letters: &[char]) -> bool {
        let counts = letters.iter().copied().counts();
        self.required_letters()
            .iter()
            .all(|letter| counts.contains_key(letter))
            && counts
                .iter()
                .all(|(&letter, &count)| count <= self.cap_for(letter))
    }

    /// Checks a whole word against every constraint.
    ///
    /// An exact position takes precedence over the exclusions, so the letter
    /// fixed there is accepted even if it is excluded elsewhere. This is the
    /// predicate that [`search`](crate::search) answers.
    pub fn is_admissible(&self, word: &str) -> bool {
        let letters: Vec<char> = word.chars().collect();
        if letters.len() != self.length {
            return false;
        }

        let positions_hold = letters
            .iter()
            .enumerate()
            .all(|(position, &letter)| match self.exact_at(position) {
                Some(fixed) => fixed == letter,
                None => !self.is_excluded(letter) && !self.is_excluded_at(position, letter),
            });

        positions_hold && self.satisfies_tallies(&letters)
    }

    /// Number of times `letter` is known to be in the word, counting each
    /// exact position and each position it was found misplaced at.
    fn known_tally(&self, letter: char) -> usize {
        let in_exact = self.exact.values().filter(|&&c| c == letter).count();
        let in_excluded = self
            .excluded_at
            .values()
            .filter(|letters| letters.contains(&letter))
            .count();
        in_exact + in_excluded
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads a spec from JSON and validates it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: ConstraintSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }
}

/// Compiles the whole guess history into a [`ConstraintSpec`].
///
/// The spec is rebuilt from scratch on every call. Correct letters fix their
/// position and misplaced letters are excluded from theirs. Absent letters
/// are excluded from the whole word unless another guess showed them to be
/// present, in which case they cap the letter at the number of copies known
/// so far.
///
/// Returns an error if any guess is not `length` letters long.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use wordly_solver::{compile, GuessedWord};
///
/// let history = [GuessedWord::from_pattern("CAT", "cai")?];
/// let spec = compile(&history, 3)?;
///
/// assert_eq!(spec.exact_at(0), Some('C'));
/// assert!(spec.is_excluded_at(1, 'A'));
/// assert_eq!(spec.excluded(), &BTreeSet::from(['T']));
/// assert!(spec.caps().is_empty());
/// #
/// # Ok::<_, wordly_solver::WordlyError>(())
/// ```
pub fn compile(history: &[GuessedWord], length: usize) -> Result<ConstraintSpec> {
    if let Some((index, guess)) = history.iter().enumerate().find(|(_, g)| g.len() != length) {
        return Err(HistoryError::LengthMismatch {
            index,
            expected: length,
            found: guess.len(),
        }
        .into());
    }

    let mut spec = ConstraintSpec::new(length);

    for (position, feedback) in history.iter().flat_map(|guess| guess.iter()) {
        match feedback.outcome {
            Outcome::Correct => {
                spec.exact.insert(position, feedback.letter);
            }
            Outcome::Misplaced => {
                spec.excluded_at
                    .entry(position)
                    .or_default()
                    .insert(feedback.letter);
            }
            Outcome::Absent => {}
        }
    }

    // Tallies only depend on the pass above, so every absent sighting of a
    // letter implies the same cap. Keep the smallest to stay order-free.
    for (_, feedback) in history
        .iter()
        .flat_map(|guess| guess.iter())
        .filter(|(_, f)| f.outcome == Outcome::Absent)
    {
        let letter = feedback.letter;
        match spec.known_tally(letter) {
            0 => {
                spec.excluded.insert(letter);
            }
            tally => {
                spec.caps
                    .entry(letter)
                    .and_modify(|cap| *cap = (*cap).min(tally))
                    .or_insert(tally);
            }
        }
    }

    trace!(
        "compiled {} guesses into {} exact, {} misplaced, {} excluded, {} capped",
        history.len(),
        spec.exact.len(),
        spec.excluded_at.len(),
        spec.excluded.len(),
        spec.caps.len()
    );

    Ok(spec)
}
