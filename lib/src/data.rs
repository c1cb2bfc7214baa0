use crate::results::WordleError;
use crate::WORD_LENGTH;
use std::collections::HashSet;
use std::io::BufRead;
use std::ops::Deref;
use std::sync::Arc;

/// Checks that `word` has [`WORD_LENGTH`] letters, all lowercase ASCII.
pub fn validate_word(word: &str) -> Result<(), WordleError> {
    if word.len() != WORD_LENGTH {
        // Report the number of characters rather than bytes.
        let num_chars = word.chars().count();
        if num_chars != WORD_LENGTH {
            return Err(WordleError::InvalidWordLength(num_chars));
        }
        return Err(WordleError::InvalidCharacters(word.to_string()));
    }
    if !word.bytes().all(|letter| letter.is_ascii_lowercase()) {
        return Err(WordleError::InvalidCharacters(word.to_string()));
    }
    Ok(())
}

/// Contains a list of valid words, e.g. all possible solutions.
///
/// Words are trimmed and lowercased, empty lines are skipped, and repeated words are kept only
/// once, at their first position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let lines = word_reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        WordBank::from_iterator(lines)
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// ```
    /// use rs_wordle_entropy::WordBank;
    ///
    /// let bank = WordBank::from_iterator(["Crane", "", "slate", "crane"]).unwrap();
    ///
    /// assert_eq!(bank.len(), 2);
    /// assert_eq!(&*bank[0], "crane");
    /// ```
    pub fn from_iterator<S, I>(words: I) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut all_words = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            let word = word.to_lowercase();
            validate_word(&word)?;
            let word: Arc<str> = Arc::from(word.as_str());
            if seen.insert(Arc::clone(&word)) {
                all_words.push(word);
            }
        }
        Ok(WordBank { all_words })
    }

    /// Returns the number of words in the bank.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_word_length() {
        assert_eq!(validate_word("abcd"), Err(WordleError::InvalidWordLength(4)));
        assert_eq!(validate_word("abcdef"), Err(WordleError::InvalidWordLength(6)));
        assert_eq!(validate_word("abcde"), Ok(()));
    }

    #[test]
    fn validate_word_characters() {
        assert_eq!(
            validate_word("Abcde"),
            Err(WordleError::InvalidCharacters("Abcde".to_string()))
        );
        assert_eq!(
            validate_word("ab1de"),
            Err(WordleError::InvalidCharacters("ab1de".to_string()))
        );
        // Five characters, but more than five bytes.
        assert_eq!(
            validate_word("abcdé"),
            Err(WordleError::InvalidCharacters("abcdé".to_string()))
        );
    }
}
