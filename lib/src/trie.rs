use crate::constraint::letter_index;
use crate::constraint::Constraint;
use crate::constraint::LetterConstraint;
use crate::{ALPHABET_SIZE, WORD_LENGTH};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marks an absent child. The root is never anyone's child, so index 0 is free to use.
const NO_CHILD: u32 = 0;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Node {
    /// Which letters lead out of this node.
    options: LetterConstraint,
    /// Index of the child node for each letter. Nodes at the last location have no children, as
    /// `options` alone says which words end there.
    children: [u32; ALPHABET_SIZE],
}

/// A prefix tree over fixed-length words, for counting the words that match a [`Constraint`]
/// without checking each word.
///
/// Nodes are stored in a single vector, with the root at index 0. The words themselves are also
/// kept, in insertion order, as they are the current candidate list for the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordTrie {
    nodes: Vec<Node>,
    words: Vec<Arc<str>>,
}

impl Default for WordTrie {
    fn default() -> Self {
        WordTrie {
            nodes: vec![Node::default()],
            words: Vec::new(),
        }
    }
}

impl WordTrie {
    /// Builds a trie from every word in `words` that matches `constraint`, keeping their order.
    ///
    /// Words must be [`WORD_LENGTH`] lowercase ASCII letters. A repeated word is kept only at its
    /// first position, so duplicates in `words` change neither [`WordTrie::words`] nor any count.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rs_wordle_entropy::{Constraint, LetterConstraint, WordTrie};
    ///
    /// let words: Vec<Arc<str>> = vec![Arc::from("crane"), Arc::from("slate")];
    /// let trie = WordTrie::new(&words, &Constraint::identity());
    /// let starts_with_s = Constraint::identity().restrict(0, LetterConstraint::only(b's'));
    ///
    /// assert_eq!(trie.count_matches(&starts_with_s), 1);
    /// ```
    pub fn new(words: &[Arc<str>], constraint: &Constraint) -> WordTrie {
        let mut trie = WordTrie::default();
        for word in words {
            if constraint.matches(word) {
                trie.insert(word);
            }
        }
        trie
    }

    fn insert(&mut self, word: &Arc<str>) {
        let mut node = 0;
        let mut is_new = false;
        for (depth, letter) in word.bytes().enumerate() {
            let index = letter_index(letter);
            if !self.nodes[node].options.contains(letter) {
                self.nodes[node].options = self.nodes[node].options.include(letter);
                is_new = true;
            }
            if depth + 1 == WORD_LENGTH {
                break;
            }
            let mut child = self.nodes[node].children[index];
            if child == NO_CHILD {
                child = self.nodes.len() as u32;
                self.nodes.push(Node::default());
                self.nodes[node].children[index] = child;
            }
            node = child as usize;
        }
        if is_new {
            self.words.push(Arc::clone(word));
        }
    }

    /// The words in this trie, in the order they were inserted.
    pub fn words(&self) -> &[Arc<str>] {
        &self.words
    }

    /// The number of words in this trie.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` iff at least one word in the trie matches the constraint.
    pub fn has_matches(&self, constraint: &Constraint) -> bool {
        self.has_matches_from(0, constraint, 0)
    }

    /// Counts the words in the trie that match the constraint.
    pub fn count_matches(&self, constraint: &Constraint) -> usize {
        self.count_matches_from(0, constraint, 0)
    }

    fn has_matches_from(&self, node: usize, constraint: &Constraint, depth: usize) -> bool {
        if constraint.total_required() > WORD_LENGTH - depth {
            return false;
        }
        let node = &self.nodes[node];
        let options = node.options & constraint.letters_at(depth);
        if depth + 1 == WORD_LENGTH {
            return options
                .letters()
                .any(|letter| constraint.decrement(letter).counts_fulfilled());
        }
        options.letters().any(|letter| {
            self.has_matches_from(
                node.children[letter_index(letter)] as usize,
                &constraint.decrement(letter),
                depth + 1,
            )
        })
    }

    fn count_matches_from(&self, node: usize, constraint: &Constraint, depth: usize) -> usize {
        if constraint.total_required() > WORD_LENGTH - depth {
            return 0;
        }
        let node = &self.nodes[node];
        let options = node.options & constraint.letters_at(depth);
        if depth + 1 == WORD_LENGTH {
            return options
                .letters()
                .filter(|letter| constraint.decrement(*letter).counts_fulfilled())
                .count();
        }
        options
            .letters()
            .map(|letter| {
                self.count_matches_from(
                    node.children[letter_index(letter)] as usize,
                    &constraint.decrement(letter),
                    depth + 1,
                )
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc_words(words: &[&str]) -> Vec<Arc<str>> {
        words.iter().map(|word| Arc::from(*word)).collect()
    }

    #[test]
    fn empty_trie() {
        let trie = WordTrie::new(&[], &Constraint::identity());

        assert!(trie.is_empty());
        assert!(!trie.has_matches(&Constraint::identity()));
        assert_eq!(trie.count_matches(&Constraint::identity()), 0);
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let trie = WordTrie::new(&arc_words(&["abcde", "abcdf", "abxyz"]), &Constraint::identity());

        // root, a, ab, abc, abcd, abx, abxy
        assert_eq!(trie.nodes.len(), 7);
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn repeated_words_inserted_once() {
        let trie = WordTrie::new(&arc_words(&["abcde", "abcde"]), &Constraint::identity());

        assert_eq!(trie.words(), &arc_words(&["abcde"])[..]);
        assert_eq!(trie.count_matches(&Constraint::identity()), 1);
    }

    #[test]
    fn prefix_of_existing_path_is_new() {
        let trie = WordTrie::new(&arc_words(&["abcde", "abcda"]), &Constraint::identity());

        assert_eq!(trie.len(), 2);
        assert_eq!(trie.count_matches(&Constraint::identity()), 2);
    }

    #[test]
    fn count_requirements_are_scoped_to_each_path() {
        let trie = WordTrie::new(
            &arc_words(&["eerie", "event", "knelt", "abbey"]),
            &Constraint::identity(),
        );

        assert_eq!(trie.count_matches(&Constraint::identity().require(b'e', 3)), 1);
        assert_eq!(trie.count_matches(&Constraint::identity().require(b'e', 2)), 2);
        assert_eq!(trie.count_matches(&Constraint::identity().require(b'e', 1)), 4);
        assert!(!trie.has_matches(&Constraint::identity().require(b'e', 4)));
    }
}
