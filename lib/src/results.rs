use crate::WORD_LENGTH;
use std::fmt;
use std::io;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The hint given for a single letter of a guess.
///
/// The declaration order is the order used when enumerating patterns.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hint {
    /// The letter is not in the word, or the word has no more occurrences of it.
    Wrong,
    /// The letter is in the word at this location.
    Correct,
    /// The letter is in the word, but somewhere else.
    Transposed,
}

impl Hint {
    /// Every hint, in pattern enumeration order.
    pub const ALL: [Hint; 3] = [Hint::Wrong, Hint::Correct, Hint::Transposed];

    /// How much a hint reveals about its letter. Used to pick the best known hint per letter.
    pub fn strength(self) -> u8 {
        match self {
            Hint::Wrong => 0,
            Hint::Transposed => 1,
            Hint::Correct => 2,
        }
    }

    /// The character used to enter or display this hint: `g`, `y` or `.`.
    pub fn as_char(self) -> char {
        match self {
            Hint::Wrong => '.',
            Hint::Correct => 'g',
            Hint::Transposed => 'y',
        }
    }
}

impl TryFrom<char> for Hint {
    type Error = WordleError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(Hint::Wrong),
            'g' => Ok(Hint::Correct),
            'y' => Ok(Hint::Transposed),
            other => Err(WordleError::InvalidHint(other)),
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The hints for each letter of one guess, in the same order as the guess.
pub type Pattern = [Hint; WORD_LENGTH];

/// Parses hints entered as `g` (correct), `y` (transposed) and `.` (wrong), e.g. `"g.gy."`.
pub fn parse_hints(input: &str) -> Result<Vec<Hint>, WordleError> {
    input.trim().chars().map(Hint::try_from).collect()
}

/// Formats a pattern as its hint characters.
pub fn format_pattern(pattern: &[Hint]) -> String {
    pattern.iter().map(|hint| hint.as_char()).collect()
}

/// Indicates that an error occurred while validating words or applying hints.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum WordleError {
    /// A word or hint sequence did not have exactly [`WORD_LENGTH`] entries.
    #[error("expected 5 letters or hints, got {0}")]
    InvalidWordLength(usize),
    /// A word contained something other than lowercase ASCII letters.
    #[error("{0:?} may only contain the letters a-z")]
    InvalidCharacters(String),
    /// The guess is not in the solution or guess vocabulary.
    #[error("{0:?} is not in the word list")]
    UnknownWord(String),
    /// Hints were given after the maximum number of rounds was played.
    #[error("no rounds remaining after {0} guesses")]
    RoundsExhausted(usize),
    /// Hints were given after the word was already found.
    #[error("the puzzle is already solved")]
    AlreadySolved,
    /// Earlier hints were inconsistent with every solution word.
    #[error("no solution words are consistent with the given hints")]
    NoSolutions,
    /// A hint character other than `g`, `y` or `.`.
    #[error("unknown hint {0:?}, use 'g', 'y' or '.'")]
    InvalidHint(char),
    /// Reading a word list failed.
    #[error("i/o error: {0}")]
    Io(String),
    /// The configured ranking thread pool could not be created.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

impl From<io::Error> for WordleError {
    fn from(err: io::Error) -> Self {
        WordleError::Io(err.to_string())
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Box<str>>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Box<str>>),
    /// Indicates that the given word was not in the list of solutions.
    UnknownWord,
}

/// Determines the hints for the given `guess` when the answer is `objective`.
///
/// Correct letters are matched first. Each remaining letter of the guess is then marked
/// transposed, left to right, while the objective still has an unmatched copy of it.
///
/// ```
/// use rs_wordle_entropy::{get_result_for_guess, Hint};
///
/// let pattern = get_result_for_guess("crane", "slate").unwrap();
/// assert_eq!(pattern[2], Hint::Correct);
/// assert_eq!(pattern[0], Hint::Wrong);
/// ```
pub fn get_result_for_guess(objective: &str, guess: &str) -> Result<Pattern, WordleError> {
    if objective.len() != WORD_LENGTH {
        return Err(WordleError::InvalidWordLength(objective.len()));
    }
    if guess.len() != WORD_LENGTH {
        return Err(WordleError::InvalidWordLength(guess.len()));
    }
    let guess = guess.as_bytes();
    let mut unmatched: [Option<u8>; WORD_LENGTH] = [None; WORD_LENGTH];
    let mut pattern = [Hint::Wrong; WORD_LENGTH];

    for (index, letter) in objective.bytes().enumerate() {
        if guess[index] == letter {
            pattern[index] = Hint::Correct;
        } else {
            unmatched[index] = Some(letter);
        }
    }
    for (index, letter) in guess.iter().enumerate() {
        if pattern[index] == Hint::Correct {
            continue;
        }
        if let Some(slot) = unmatched.iter_mut().find(|slot| **slot == Some(*letter)) {
            *slot = None;
            pattern[index] = Hint::Transposed;
        }
    }
    Ok(pattern)
}
