//! Feedback for guesses that have already been played.

use std::{fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// How close a guessed letter is to the hidden word.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Outcome {
    /// The letter is in the hidden word at this position.
    Correct,

    /// The letter is in the hidden word, but not at this position.
    Misplaced,

    /// The letter is not in the hidden word (or every copy of it is already
    /// accounted for by other letters of the guess).
    Absent,
}

impl Outcome {
    /// Parses a single feedback character.
    ///
    /// Accepts `c`, `g` or `2` for [`Outcome::Correct`], `a`, `m`, `y` or `1`
    /// for [`Outcome::Misplaced`], and `i`, `b`, `x`, `0`, `-` or `.` for
    /// [`Outcome::Absent`], ignoring case.
    pub fn from_char(c: char) -> Result<Self, ParseError> {
        match c.to_ascii_lowercase() {
            'c' | 'g' | '2' => Ok(Outcome::Correct),
            'a' | 'm' | 'y' | '1' => Ok(Outcome::Misplaced),
            'i' | 'b' | 'x' | '0' | '-' | '.' => Ok(Outcome::Absent),
            _ => Err(ParseError::UnknownOutcome(c)),
        }
    }

    /// The canonical character for this outcome.
    pub fn to_char(self) -> char {
        match self {
            Outcome::Correct => 'c',
            Outcome::Misplaced => 'a',
            Outcome::Absent => 'i',
        }
    }
}

/// A single guessed letter together with its outcome.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct LetterFeedback {
    pub letter: char,
    pub outcome: Outcome,
}

impl LetterFeedback {
    pub fn new(letter: char, outcome: Outcome) -> Self {
        LetterFeedback { letter, outcome }
    }
}

/// A guess that has been played, with feedback for every position.
///
/// Positions are 0-based and dense: the letter at index `i` of
/// [`letters()`](GuessedWord::letters()) is the letter at position `i`.
///
/// # Examples
///
/// ```rust
/// use wordly_solver::{GuessedWord, Outcome};
///
/// let guess = GuessedWord::from_pattern("cat", "cai")?;
/// assert_eq!(guess.len(), 3);
/// assert_eq!(guess.word(), "cat");
/// assert_eq!(guess.letters()[1].outcome, Outcome::Misplaced);
/// #
/// # Ok::<_, wordly_solver::ParseError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct GuessedWord {
    letters: Vec<LetterFeedback>,
}

impl GuessedWord {
    /// Creates a guess from its letters, in position order.
    pub fn new(letters: Vec<LetterFeedback>) -> Self {
        GuessedWord { letters }
    }

    /// Creates a guess from a word and a pattern with one outcome character
    /// per letter (see [`Outcome::from_char()`]).
    pub fn from_pattern(word: &str, pattern: &str) -> Result<Self, ParseError> {
        if word.chars().count() != pattern.chars().count() {
            return Err(ParseError::PatternLength {
                word: word.to_string(),
                pattern: pattern.to_string(),
            });
        }

        let letters = word
            .chars()
            .zip(pattern.chars())
            .map(|(letter, c)| {
                Outcome::from_char(c).map(|outcome| LetterFeedback::new(letter, outcome))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GuessedWord { letters })
    }

    /// Grades `guess` against a known `answer`.
    ///
    /// Letters in the correct position are graded first. A letter elsewhere
    /// in the guess is [`Outcome::Misplaced`] only while the answer still has
    /// copies of it that no earlier letter has claimed, so guessing `spool`
    /// against `sober` marks the first `o` misplaced and the second absent.
    pub fn grade(guess: &str, answer: &str) -> Self {
        let guess: Vec<char> = guess.chars().collect();
        let answer: Vec<char> = answer.chars().collect();

        let mut outcomes = vec![Outcome::Absent; guess.len()];
        let mut unclaimed: Vec<Option<char>> = answer.iter().copied().map(Some).collect();

        for (i, (g, a)) in guess.iter().zip(answer.iter()).enumerate() {
            if g == a {
                outcomes[i] = Outcome::Correct;
                unclaimed[i] = None;
            }
        }

        for (i, g) in guess.iter().enumerate() {
            if outcomes[i] == Outcome::Correct {
                continue;
            }
            if let Some(slot) = unclaimed.iter_mut().find(|slot| **slot == Some(*g)) {
                *slot = None;
                outcomes[i] = Outcome::Misplaced;
            }
        }

        GuessedWord {
            letters: guess
                .into_iter()
                .zip(outcomes)
                .map(|(letter, outcome)| LetterFeedback::new(letter, outcome))
                .collect(),
        }
    }

    /// The number of letters in the guess.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns a slice of the letters, in position order.
    pub fn letters(&self) -> &[LetterFeedback] {
        self.letters.as_slice()
    }

    /// Iterates over `(position, feedback)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LetterFeedback)> {
        self.letters.iter().enumerate()
    }

    /// The guessed word itself.
    pub fn word(&self) -> String {
        self.letters.iter().map(|l| l.letter).collect()
    }

    /// The feedback pattern, one canonical character per letter.
    pub fn pattern(&self) -> String {
        self.letters.iter().map(|l| l.outcome.to_char()).collect()
    }

    /// True if every letter was graded [`Outcome::Correct`].
    pub fn solved(&self) -> bool {
        !self.is_empty() && self.letters.iter().all(|l| l.outcome == Outcome::Correct)
    }

    /// Renders the guess with a background colour per outcome, when the
    /// terminal supports it.
    #[cfg(feature = "fancy")]
    pub fn colored(&self) -> String {
        use itertools::Itertools;
        use owo_colors::{AnsiColors, OwoColorize, Stream};

        self.letters
            .iter()
            .map(|l| {
                let color = match l.outcome {
                    Outcome::Correct => AnsiColors::Green,
                    Outcome::Misplaced => AnsiColors::Yellow,
                    Outcome::Absent => AnsiColors::BrightBlack,
                };
                format!(" {} ", l.letter.to_uppercase())
                    .if_supports_color(Stream::Stdout, |text| {
                        text.on_color(color).black().to_string()
                    })
                    .to_string()
            })
            .join("")
    }
}

impl FromStr for GuessedWord {
    type Err = ParseError;

    /// Parses `WORD=PATTERN`, as accepted on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (word, pattern) = s
            .split_once('=')
            .ok_or_else(|| ParseError::MalformedGuess(s.to_string()))?;
        GuessedWord::from_pattern(word.trim(), pattern.trim())
    }
}

impl Display for GuessedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.word(), self.pattern())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn str_to_outcomes(input: &str) -> Vec<Outcome> {
        input
            .chars()
            .map(|c| match c {
                'c' => Outcome::Correct,
                'a' => Outcome::Misplaced,
                _ => Outcome::Absent,
            })
            .collect()
    }

    macro_rules! grade_test {
        ($fn_name:ident[$answer:expr => $( [$guess:expr, $res:expr] );*]) => {
            #[test]
            fn $fn_name() {
                $(
                    let graded = GuessedWord::grade($guess, $answer);
                    let outcomes: Vec<Outcome> =
                        graded.letters().iter().map(|l| l.outcome).collect();
                    assert_eq!(outcomes, str_to_outcomes($res), "{} against {}", $guess, $answer);
                    assert_eq!(graded.word(), $guess);
                )*
            }
        };
    }

    grade_test! { repeat_letter_guesses ["sober" =>
        ["spool", "ciaii"];
        ["soaks", "cciii"]]
    }

    grade_test! { repeat_letter_guesses_before ["tills" =>
        ["pines", "iciic"];
        ["sills", "icccc"]]
    }

    grade_test! { repeat_letter_answer ["spoon" =>
        ["odors", "aicia"]]
    }

    grade_test! { crimp_props_primp ["crimp" =>
        ["props", "aciii"];
        ["primp", "icccc"];
        ["crimp", "ccccc"]]
    }

    grade_test! { cyrillic_letters ["кошка" =>
        ["океан", "aaiai"];
        ["кошка", "ccccc"]]
    }

    #[test]
    fn parses_every_outcome_alphabet() {
        let expected = str_to_outcomes("caiii");
        for pattern in ["cai-.", "GYBBX", "21000", "cmibx"] {
            let guess = GuessedWord::from_pattern("crane", pattern).unwrap();
            let outcomes: Vec<Outcome> = guess.letters().iter().map(|l| l.outcome).collect();
            assert_eq!(outcomes, expected, "pattern {}", pattern);
        }
    }

    #[test]
    fn rejects_bad_patterns() {
        assert_eq!(
            GuessedWord::from_pattern("crane", "cai"),
            Err(ParseError::PatternLength {
                word: "crane".to_string(),
                pattern: "cai".to_string()
            })
        );
        assert_eq!(
            GuessedWord::from_pattern("cat", "cqi"),
            Err(ParseError::UnknownOutcome('q'))
        );
        assert_eq!(
            "crane".parse::<GuessedWord>(),
            Err(ParseError::MalformedGuess("crane".to_string()))
        );
    }

    #[test]
    fn parses_command_line_form() {
        let guess: GuessedWord = "crane=ciiia".parse().unwrap();
        assert_eq!(guess.word(), "crane");
        assert_eq!(guess.pattern(), "ciiia");
        assert_eq!(guess.to_string(), "crane ciiia");
        assert!(!guess.solved());
        assert!(GuessedWord::grade("crane", "crane").solved());
    }
}
