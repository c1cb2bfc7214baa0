use crate::results::Hint;
use crate::results::Pattern;
use crate::ALPHABET_SIZE;
use std::fmt;
use std::sync::Arc;

const QWERTY_LAYOUT: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// The guesses made so far, and the best hint seen for each letter.
///
/// This is only used for display. Solving relies on [`Constraint`](crate::Constraint) alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GuessHistory {
    guesses: Vec<(Arc<str>, Pattern)>,
    best_hints: [Option<Hint>; ALPHABET_SIZE],
}

impl GuessHistory {
    pub fn new() -> GuessHistory {
        GuessHistory::default()
    }

    /// Records a guess, keeping the strongest hint per letter.
    pub fn push(&mut self, word: Arc<str>, pattern: Pattern) {
        for (letter, hint) in word.bytes().zip(pattern.iter()) {
            let best = &mut self.best_hints[(letter - b'a') as usize];
            if best.map_or(true, |best| hint.strength() > best.strength()) {
                *best = Some(*hint);
            }
        }
        self.guesses.push((word, pattern));
    }

    pub fn guesses(&self) -> &[(Arc<str>, Pattern)] {
        &self.guesses
    }

    pub fn len(&self) -> usize {
        self.guesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guesses.is_empty()
    }

    /// The strongest hint received for `letter`, if it has been guessed.
    pub fn best_hint(&self, letter: u8) -> Option<Hint> {
        if !letter.is_ascii_lowercase() {
            return None;
        }
        self.best_hints[(letter - b'a') as usize]
    }
}

impl fmt::Display for GuessHistory {
    /// Writes each guess with its hints, followed by the keyboard. Unguessed letters are shown in
    /// lowercase, wrong letters as `.`, and others in uppercase followed by their hint.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (word, pattern) in &self.guesses {
            write!(f, "{} ", word.to_uppercase())?;
            for hint in pattern {
                write!(f, "{}", hint)?;
            }
            writeln!(f)?;
        }
        for (row, keys) in QWERTY_LAYOUT.iter().enumerate() {
            write!(f, "{}", " ".repeat(row))?;
            for letter in keys.bytes() {
                match self.best_hint(letter) {
                    None => write!(f, " {} ", letter as char)?,
                    Some(Hint::Wrong) => write!(f, " . ")?,
                    Some(hint) => write!(f, " {}{}", letter.to_ascii_uppercase() as char, hint)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Hint::*;

    #[test]
    fn keeps_strongest_hint_per_letter() {
        let mut history = GuessHistory::new();

        history.push(Arc::from("speed"), [Wrong, Wrong, Transposed, Wrong, Wrong]);
        history.push(Arc::from("eerie"), [Wrong, Correct, Wrong, Wrong, Wrong]);

        assert_eq!(history.len(), 2);
        assert_eq!(history.best_hint(b'e'), Some(Correct));
        assert_eq!(history.best_hint(b's'), Some(Wrong));
        assert_eq!(history.best_hint(b'z'), None);
    }

    #[test]
    fn display_lists_guesses_then_keyboard() {
        let mut history = GuessHistory::new();
        history.push(Arc::from("crane"), [Wrong, Transposed, Correct, Wrong, Wrong]);

        let rendered = history.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "CRANE .yg..");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains(" Ry"));
        assert!(lines[2].contains(" Ag"));
        assert!(lines[3].contains(" . "));
    }
}
