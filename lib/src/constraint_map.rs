use crate::constraint::Constraint;
use crate::patterns::all_patterns;
use crate::patterns::constraint_from_pattern;
use crate::patterns::is_valid_pattern;
use crate::trie::WordTrie;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// For each guess word, the constraints that guessing it could produce given the remaining
/// solutions.
///
/// There is one constraint per pattern that is both valid for the guess and matched by at least
/// one word in the solution trie it was built against.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintMap {
    constraints_per_word: HashMap<Arc<str>, Vec<Constraint>>,
}

impl ConstraintMap {
    /// Computes the reachable constraints for every word in `guess_words`.
    ///
    /// This checks every pattern for every word against the trie, so it is the most expensive
    /// step of each round.
    pub fn new(guess_words: &[Arc<str>], solution_trie: &WordTrie) -> ConstraintMap {
        let constraints_per_word = guess_words
            .iter()
            .map(|word| {
                let constraints = reachable_constraints(word.as_bytes(), solution_trie);
                trace!("{} can produce {} constraints", word, constraints.len());
                (Arc::clone(word), constraints)
            })
            .collect();
        ConstraintMap {
            constraints_per_word,
        }
    }

    /// The constraints reachable by guessing `word`, or `None` if the word was not in the guess
    /// list this map was built from.
    pub fn get(&self, word: &str) -> Option<&[Constraint]> {
        self.constraints_per_word
            .get(word)
            .map(|constraints| constraints.as_slice())
    }

    /// The number of guess words in the map.
    pub fn len(&self) -> usize {
        self.constraints_per_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints_per_word.is_empty()
    }
}

fn reachable_constraints(word: &[u8], solution_trie: &WordTrie) -> Vec<Constraint> {
    all_patterns()
        .iter()
        .filter(|pattern| is_valid_pattern(word, pattern))
        .map(|pattern| constraint_from_pattern(word, pattern))
        .filter(|constraint| solution_trie.has_matches(constraint))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc_words(words: &[&str]) -> Vec<Arc<str>> {
        words.iter().map(|word| Arc::from(*word)).collect()
    }

    #[test]
    fn only_reachable_constraints_are_kept() {
        let solutions = WordTrie::new(&arc_words(&["abcde", "fghij"]), &Constraint::identity());

        let map = ConstraintMap::new(&arc_words(&["abcde", "fghij", "abxyz"]), &solutions);

        assert_eq!(map.len(), 3);
        // Either everything is correct, or nothing is in the word.
        assert_eq!(map.get("abcde").map(|constraints| constraints.len()), Some(2));
        assert_eq!(map.get("fghij").map(|constraints| constraints.len()), Some(2));
        // 'a' and 'b' are either both correct or both absent, while 'x', 'y', 'z' are always wrong.
        assert_eq!(map.get("abxyz").map(|constraints| constraints.len()), Some(2));
        assert_eq!(map.get("other"), None);
    }

    #[test]
    fn empty_solutions_reach_nothing() {
        let solutions = WordTrie::new(&[], &Constraint::identity());

        let map = ConstraintMap::new(&arc_words(&["abcde"]), &solutions);

        assert_eq!(map.get("abcde"), Some(&[][..]));
    }
}
