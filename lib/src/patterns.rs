use crate::constraint::Constraint;
use crate::constraint::LetterConstraint;
use crate::results::Hint;
use crate::results::Pattern;
use crate::WORD_LENGTH;
use std::sync::OnceLock;

/// The number of distinct patterns: 3 hints at each of [`WORD_LENGTH`] locations.
pub const NUM_PATTERNS: usize = 243;

/// Every possible pattern, in base-3 counting order with the first location as the lowest digit.
///
/// ```
/// use rs_wordle_entropy::{all_patterns, Hint, NUM_PATTERNS};
///
/// assert_eq!(all_patterns().len(), NUM_PATTERNS);
/// assert_eq!(all_patterns()[0], [Hint::Wrong; 5]);
/// assert_eq!(all_patterns()[1][0], Hint::Correct);
/// ```
pub fn all_patterns() -> &'static [Pattern] {
    static PATTERNS: OnceLock<Vec<Pattern>> = OnceLock::new();
    PATTERNS.get_or_init(generate_all_patterns)
}

fn generate_all_patterns() -> Vec<Pattern> {
    let mut patterns = Vec::with_capacity(NUM_PATTERNS);
    let mut digits = [0usize; WORD_LENGTH];
    for _ in 0..NUM_PATTERNS {
        patterns.push(digits.map(|digit| Hint::ALL[digit]));
        // Increment, carrying into the next location.
        for digit in digits.iter_mut() {
            *digit += 1;
            if *digit < Hint::ALL.len() {
                break;
            }
            *digit = 0;
        }
    }
    patterns
}

/// Returns `false` if no feedback could ever assign this pattern to this word.
///
/// When a guess repeats a letter, hints for it are handed out left to right, so a later copy
/// cannot be [`Hint::Transposed`] once an earlier copy was [`Hint::Wrong`].
pub fn is_valid_pattern(word: &[u8], pattern: &Pattern) -> bool {
    for (index, hint) in pattern.iter().enumerate() {
        if *hint != Hint::Wrong {
            continue;
        }
        if word
            .iter()
            .zip(pattern.iter())
            .skip(index + 1)
            .any(|(letter, later_hint)| *letter == word[index] && *later_hint == Hint::Transposed)
        {
            return false;
        }
    }
    true
}

/// Computes the constraint implied by receiving `pattern` for the guess `word`.
///
/// * [`Hint::Correct`]: the location must be this letter, and the letter is required once more.
/// * [`Hint::Transposed`]: the location must not be this letter, and the letter is required once
///   more.
/// * [`Hint::Wrong`]: the location must not be this letter. Unless an earlier copy of the letter
///   was transposed, the letter is also removed from every location that is not a correct copy of
///   it, i.e. the word has no copies beyond the ones already found.
///
/// ```
/// use rs_wordle_entropy::{constraint_from_pattern, Hint};
///
/// let constraint = constraint_from_pattern(
///     b"slate",
///     &[Hint::Wrong, Hint::Wrong, Hint::Correct, Hint::Wrong, Hint::Correct],
/// );
///
/// assert!(constraint.matches("crane"));
/// assert!(!constraint.matches("shade"));
/// ```
pub fn constraint_from_pattern(word: &[u8], pattern: &Pattern) -> Constraint {
    let mut letters = [LetterConstraint::ANY; WORD_LENGTH];
    // Letters in order of first appearance, with the number of correct or transposed copies.
    let mut counts: Vec<(u8, u8)> = Vec::with_capacity(WORD_LENGTH);

    for (index, (letter, hint)) in word.iter().zip(pattern.iter()).enumerate() {
        match hint {
            Hint::Correct => {
                letters[index] = LetterConstraint::only(*letter);
                bump_count(&mut counts, *letter);
            }
            Hint::Transposed => {
                letters[index] = letters[index].exclude(*letter);
                bump_count(&mut counts, *letter);
            }
            Hint::Wrong => {
                letters[index] = letters[index].exclude(*letter);
                let earlier_transposed = word[..index]
                    .iter()
                    .zip(pattern.iter())
                    .any(|(other, other_hint)| other == letter && *other_hint == Hint::Transposed);
                if earlier_transposed {
                    continue;
                }
                for (other_index, (other, other_hint)) in
                    word.iter().zip(pattern.iter()).enumerate()
                {
                    if other != letter || *other_hint != Hint::Correct {
                        letters[other_index] = letters[other_index].exclude(*letter);
                    }
                }
            }
        }
    }

    let mut constraint = Constraint::identity();
    for (index, allowed) in letters.into_iter().enumerate() {
        constraint = constraint.restrict(index, allowed);
    }
    for (letter, count) in counts {
        constraint = constraint.require(letter, count);
    }
    constraint
}

fn bump_count(counts: &mut Vec<(u8, u8)>, letter: u8) {
    match counts.iter_mut().find(|(other, _)| *other == letter) {
        Some((_, count)) => *count += 1,
        None => counts.push((letter, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Hint::*;

    #[test]
    fn patterns_count_in_base_three() {
        let patterns = all_patterns();

        assert_eq!(patterns[0], [Wrong, Wrong, Wrong, Wrong, Wrong]);
        assert_eq!(patterns[1], [Correct, Wrong, Wrong, Wrong, Wrong]);
        assert_eq!(patterns[2], [Transposed, Wrong, Wrong, Wrong, Wrong]);
        assert_eq!(patterns[3], [Wrong, Correct, Wrong, Wrong, Wrong]);
        assert_eq!(patterns[NUM_PATTERNS - 1], [Transposed; WORD_LENGTH]);
    }

    #[test]
    fn wrong_before_transposed_copy_is_invalid() {
        assert!(!is_valid_pattern(b"geese", &[Wrong, Wrong, Transposed, Wrong, Wrong]));
        assert!(is_valid_pattern(b"geese", &[Wrong, Transposed, Wrong, Wrong, Wrong]));
        // Correct copies may come after wrong ones.
        assert!(is_valid_pattern(b"geese", &[Wrong, Wrong, Correct, Wrong, Wrong]));
        // Different letters don't interact.
        assert!(is_valid_pattern(b"slate", &[Wrong, Wrong, Wrong, Wrong, Transposed]));
    }

    #[test]
    fn wrong_after_correct_copy_caps_count() {
        let constraint = constraint_from_pattern(b"speed", &[Wrong, Wrong, Wrong, Correct, Wrong]);

        assert!(constraint.matches("chief"));
        assert!(!constraint.matches("cheer"));
        assert!(!constraint.matches("eerie"));
        assert_eq!(constraint.letters_at(3), LetterConstraint::only(b'e'));
        assert_eq!(constraint.min_count(b'e'), 1);
    }

    #[test]
    fn wrong_after_transposed_copy_keeps_letter() {
        let constraint =
            constraint_from_pattern(b"eerie", &[Transposed, Wrong, Wrong, Wrong, Wrong]);

        assert!(!constraint.letters_at(0).contains(b'e'));
        assert!(!constraint.letters_at(1).contains(b'e'));
        assert!(constraint.letters_at(2).contains(b'e'));
        assert!(!constraint.letters_at(4).contains(b'e'));
        assert_eq!(constraint.min_count(b'e'), 1);
    }
}
