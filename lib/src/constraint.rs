use crate::{ALPHABET_SIZE, WORD_LENGTH};
use std::fmt;
use std::ops::BitAnd;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The set of letters that are still possible at one location in the word.
///
/// Bit `i` is set iff the letter `b'a' + i` is allowed.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetterConstraint(u32);

impl LetterConstraint {
    /// Allows every letter.
    pub const ANY: LetterConstraint = LetterConstraint((1 << ALPHABET_SIZE) - 1);
    /// Allows no letters.
    pub const NONE: LetterConstraint = LetterConstraint(0);

    /// Allows only the given lowercase ASCII letter.
    pub fn only(letter: u8) -> LetterConstraint {
        LetterConstraint(1 << letter_index(letter))
    }

    /// Returns a copy that also allows `letter`.
    pub fn include(self, letter: u8) -> LetterConstraint {
        LetterConstraint(self.0 | LetterConstraint::only(letter).0)
    }

    /// Returns a copy that no longer allows `letter`.
    pub fn exclude(self, letter: u8) -> LetterConstraint {
        LetterConstraint(self.0 & !LetterConstraint::only(letter).0)
    }

    /// Returns `true` iff `letter` is allowed.
    pub fn contains(self, letter: u8) -> bool {
        self.0 & LetterConstraint::only(letter).0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The number of allowed letters.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Iterates over the allowed letters in alphabetical order.
    pub fn letters(self) -> Letters {
        Letters { remaining: self.0 }
    }
}

impl BitAnd for LetterConstraint {
    type Output = LetterConstraint;

    fn bitand(self, rhs: LetterConstraint) -> LetterConstraint {
        LetterConstraint(self.0 & rhs.0)
    }
}

impl fmt::Display for LetterConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == LetterConstraint::ANY {
            return write!(f, "*");
        }
        for letter in self.letters() {
            write!(f, "{}", letter as char)?;
        }
        Ok(())
    }
}

/// Iterator over the set bits of a [`LetterConstraint`], as lowercase ASCII letters.
#[derive(Debug, Clone)]
pub struct Letters {
    remaining: u32,
}

impl Iterator for Letters {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.remaining.trailing_zeros();
        self.remaining &= self.remaining - 1;
        Some(b'a' + index as u8)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Letters {}

/// The minimum number of times a letter must appear in the word.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinCountConstraint {
    pub letter: u8,
    pub count: u8,
}

impl MinCountConstraint {
    pub fn new(letter: u8, count: u8) -> MinCountConstraint {
        MinCountConstraint { letter, count }
    }
}

/// The restrictions a word must satisfy to still be a possible answer.
///
/// A word matches iff each of its letters is allowed at its location, and it contains every
/// required letter at least as many times as required.
///
/// A word has [`WORD_LENGTH`] letters, so no more than [`WORD_LENGTH`] distinct letters can ever be
/// required at once. The count slots are sized for exactly that.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constraint {
    letters: [LetterConstraint; WORD_LENGTH],
    counts: [Option<MinCountConstraint>; WORD_LENGTH],
}

impl Default for Constraint {
    fn default() -> Self {
        Constraint::identity()
    }
}

impl Constraint {
    /// A constraint that every word matches.
    pub fn identity() -> Constraint {
        Constraint {
            letters: [LetterConstraint::ANY; WORD_LENGTH],
            counts: [None; WORD_LENGTH],
        }
    }

    /// A constraint that no word matches.
    pub fn unsatisfiable() -> Constraint {
        Constraint {
            letters: [LetterConstraint::NONE; WORD_LENGTH],
            counts: [None; WORD_LENGTH],
        }
    }

    /// The allowed letters at the given location.
    pub fn letters_at(&self, location: usize) -> LetterConstraint {
        self.letters[location]
    }

    /// Returns a copy whose allowed letters at `location` are also restricted to `allowed`.
    pub fn restrict(mut self, location: usize, allowed: LetterConstraint) -> Constraint {
        self.letters[location] = self.letters[location] & allowed;
        self
    }

    /// Returns a copy that requires `letter` to appear at least `count` times.
    pub fn require(self, letter: u8, count: u8) -> Constraint {
        let mut required = Constraint::identity();
        required.counts[0] = Some(MinCountConstraint::new(letter, count));
        self.and(&required)
    }

    /// Iterates over the minimum count requirements.
    pub fn min_counts(&self) -> impl Iterator<Item = MinCountConstraint> + '_ {
        self.counts.iter().map_while(|count| *count)
    }

    /// The minimum number of times `letter` must appear in the word.
    pub fn min_count(&self, letter: u8) -> u8 {
        self.min_counts()
            .find(|count| count.letter == letter)
            .map_or(0, |count| count.count)
    }

    /// The sum of all remaining count requirements.
    pub fn total_required(&self) -> usize {
        self.min_counts().map(|count| count.count as usize).sum()
    }

    /// Returns `true` iff no letters are still required.
    pub fn counts_fulfilled(&self) -> bool {
        self.min_counts().all(|count| count.count == 0)
    }

    /// Combines both constraints, such that a word matches the result iff it matches both.
    ///
    /// Locations are intersected, and count requirements keep the larger count per letter. If the
    /// two together require more distinct letters than a word can hold, the result is
    /// [`Constraint::unsatisfiable`].
    pub fn and(&self, other: &Constraint) -> Constraint {
        let mut combined = *self;
        for (location, allowed) in other.letters.iter().enumerate() {
            combined.letters[location] = combined.letters[location] & *allowed;
        }
        for count in other.min_counts() {
            if !combined.merge_count(count) {
                return Constraint::unsatisfiable();
            }
        }
        combined
    }

    /// Returns a copy where `letter` is required one fewer time, as though one occurrence has
    /// been consumed. Counts never drop below zero.
    pub fn decrement(&self, letter: u8) -> Constraint {
        let mut result = *self;
        for count in result.counts.iter_mut().flatten() {
            if count.letter == letter {
                count.count = count.count.saturating_sub(1);
                break;
            }
        }
        result
    }

    /// Returns `true` iff the word satisfies this constraint.
    ///
    /// This checks the word directly. Use a [`WordTrie`](crate::WordTrie) to test many words.
    pub fn matches(&self, word: &str) -> bool {
        let word = word.as_bytes();
        if word.len() != WORD_LENGTH {
            return false;
        }
        if !word
            .iter()
            .zip(self.letters.iter())
            .all(|(letter, allowed)| letter.is_ascii_lowercase() && allowed.contains(*letter))
        {
            return false;
        }
        self.min_counts().all(|required| {
            word.iter()
                .filter(|letter| **letter == required.letter)
                .count()
                >= required.count as usize
        })
    }

    /// Merges in a count, returning `false` if there is no room for another letter.
    fn merge_count(&mut self, count: MinCountConstraint) -> bool {
        for slot in self.counts.iter_mut() {
            match slot {
                Some(existing) if existing.letter == count.letter => {
                    existing.count = existing.count.max(count.count);
                    return true;
                }
                Some(_) => {}
                None => {
                    *slot = Some(count);
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (location, allowed) in self.letters.iter().enumerate() {
            if location > 0 {
                write!(f, " ")?;
            }
            write!(f, "[{}]", allowed)?;
        }
        for count in self.min_counts() {
            write!(f, " {}>={}", count.letter as char, count.count)?;
        }
        Ok(())
    }
}

/// The zero-based alphabet index of a lowercase ASCII letter.
pub(crate) fn letter_index(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_lowercase());
    (letter - b'a') as usize
}
