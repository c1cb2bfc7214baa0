#[macro_use]
extern crate assert_matches;

use rs_wordle_entropy::*;

use Hint::*;

#[test]
fn get_result_for_guess_correct() {
    assert_eq!(get_result_for_guess("abcbd", "abcbd"), Ok([Correct; 5]));
}

#[test]
fn get_result_for_guess_partial() {
    assert_eq!(
        get_result_for_guess("mesas", "sassy"),
        Ok([Transposed, Transposed, Correct, Wrong, Wrong])
    );
    assert_eq!(
        get_result_for_guess("abbax", "babbx"),
        Ok([Transposed, Transposed, Correct, Wrong, Correct])
    );
    assert_eq!(
        get_result_for_guess("abcbx", "bccex"),
        Ok([Transposed, Wrong, Correct, Wrong, Correct])
    );
}

#[test]
fn get_result_for_guess_slate_against_crane() {
    assert_eq!(
        get_result_for_guess("crane", "slate"),
        Ok([Wrong, Wrong, Correct, Wrong, Correct])
    );
}

#[test]
fn get_result_for_guess_repeated_letter_yellows_go_left_to_right() {
    // Only one 'e' is unmatched, so only the first extra copy is transposed.
    assert_eq!(
        get_result_for_guess("after", "geese"),
        Ok([Wrong, Transposed, Wrong, Wrong, Wrong])
    );
}

#[test]
fn get_result_for_guess_none_match() {
    assert_eq!(get_result_for_guess("abcbd", "efghi"), Ok([Wrong; 5]));
}

#[test]
fn get_result_for_guess_invalid_guess() {
    assert_matches!(
        get_result_for_guess("goals", "guess!"),
        Err(WordleError::InvalidWordLength(6))
    );
    assert_matches!(
        get_result_for_guess("goal", "guess"),
        Err(WordleError::InvalidWordLength(4))
    );
}

#[test]
fn every_real_result_is_a_valid_pattern() {
    let words = ["geese", "eerie", "speed", "abbey", "crane", "error", "mamma"];
    for objective in words {
        for guess in words {
            let pattern = get_result_for_guess(objective, guess).unwrap();
            assert!(
                is_valid_pattern(guess.as_bytes(), &pattern),
                "{} against {} gave {}",
                guess,
                objective,
                format_pattern(&pattern)
            );
        }
    }
}

#[test]
fn real_result_constraint_admits_objective() {
    let words = ["geese", "eerie", "speed", "abbey", "crane", "error", "mamma", "slate"];
    for objective in words {
        for guess in words {
            let pattern = get_result_for_guess(objective, guess).unwrap();
            let constraint = constraint_from_pattern(guess.as_bytes(), &pattern);
            assert!(
                constraint.matches(objective),
                "{} against {} gave {} ({})",
                guess,
                objective,
                format_pattern(&pattern),
                constraint
            );
        }
    }
}
