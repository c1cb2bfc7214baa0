//! Solves Wordle-style puzzles by treating hints as constraints on the remaining words.
//!
//! Feedback from each guess becomes a [`Constraint`]: a set of allowed letters per location plus
//! minimum letter counts. Solutions and guesses are stored in a [`WordTrie`], which can count the
//! words matching a constraint without visiting every word. For each guess, the [`ConstraintMap`]
//! holds the constraints its feedback could produce, and the [`Solver`] ranks guesses by the
//! entropy of the split they induce over the remaining solutions.
//!
//! ```
//! use rs_wordle_entropy::*;
//!
//! let solutions = WordBank::from_iterator(["crane", "crate", "trace", "slate"]).unwrap();
//! let mut solver = Solver::new(&solutions[..], &solutions[..]).unwrap();
//!
//! let best = solver.rank_guesses(1);
//! assert_eq!(best.len(), 1);
//!
//! let hints = get_result_for_guess("trace", &best[0].word).unwrap();
//! solver.add_guess(&best[0].word, &hints).unwrap();
//! assert!(solver.remaining_solutions() < solutions.len() || solver.is_done());
//! ```

mod constraint;
mod constraint_map;
mod data;
mod engine;
mod history;
mod patterns;
mod results;
mod trie;

/// The number of letters in every word.
pub const WORD_LENGTH: usize = 5;
/// The number of distinct letters, `a` to `z`.
pub const ALPHABET_SIZE: usize = 26;

pub use constraint::{Constraint, LetterConstraint, Letters, MinCountConstraint};
pub use constraint_map::ConstraintMap;
pub use data::{validate_word, WordBank};
pub use engine::*;
pub use history::GuessHistory;
pub use patterns::{all_patterns, constraint_from_pattern, is_valid_pattern, NUM_PATTERNS};
pub use results::*;
pub use trie::WordTrie;
