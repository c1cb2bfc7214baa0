use crate::constraint::Constraint;
use crate::constraint_map::ConstraintMap;
use crate::data::validate_word;
use crate::history::GuessHistory;
use crate::patterns::constraint_from_pattern;
use crate::results::*;
use crate::trie::WordTrie;
use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default number of rounds, as in Wordle.
pub const DEFAULT_MAX_ROUNDS: usize = 6;

/// Settings for a [`Solver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Rounds of feedback accepted before the solver gives up.
    pub max_rounds: usize,
    /// If set, guesses are ranked on a dedicated pool with this many threads. Otherwise the global
    /// rayon pool is used.
    pub worker_threads: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_rounds: DEFAULT_MAX_ROUNDS,
            worker_threads: None,
        }
    }
}

/// A guess along with its expected information, in bits.
#[derive(Debug, Clone, PartialEq)]
pub struct WordUtility {
    pub word: Arc<str>,
    pub utility: f64,
}

/// The tries and constraint map for a full, unconstrained vocabulary.
///
/// Computing the constraint map for every guess word is expensive, so this can be computed once
/// (or loaded, with the `serde` feature) and shared by many solvers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Precomputed {
    pub solution_trie: Arc<WordTrie>,
    pub guess_trie: Arc<WordTrie>,
    pub constraint_map: Arc<ConstraintMap>,
}

impl Precomputed {
    /// Builds the structures for the given solutions and guesses. Any solution missing from
    /// `guess_words` is added to the end of the guess list.
    ///
    /// Words must already be valid; see [`WordBank`](crate::WordBank).
    pub fn compute(solution_words: &[Arc<str>], guess_words: &[Arc<str>]) -> Precomputed {
        let start_time = Instant::now();
        let mut all_guesses = guess_words.to_vec();
        let known: HashSet<&Arc<str>> = guess_words.iter().collect();
        let missing: Vec<Arc<str>> = solution_words
            .iter()
            .filter(|word| !known.contains(word))
            .map(Arc::clone)
            .collect();
        if !missing.is_empty() {
            debug!("Adding {} solutions missing from the guess list", missing.len());
            all_guesses.extend(missing);
        }

        let identity = Constraint::identity();
        let solution_trie = WordTrie::new(solution_words, &identity);
        let guess_trie = WordTrie::new(&all_guesses, &identity);
        let constraint_map = ConstraintMap::new(guess_trie.words(), &solution_trie);
        info!(
            "Precomputed {} solutions and {} guesses in {:.3}s",
            solution_trie.len(),
            guess_trie.len(),
            start_time.elapsed().as_secs_f64()
        );
        Precomputed {
            solution_trie: Arc::new(solution_trie),
            guess_trie: Arc::new(guess_trie),
            constraint_map: Arc::new(constraint_map),
        }
    }

    /// All solution words, in order.
    pub fn solution_words(&self) -> &[Arc<str>] {
        self.solution_trie.words()
    }
}

/// Where the solver is in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Accepting feedback. `round` is the number of non-winning guesses applied so far.
    Active { round: usize },
    /// The last guess was entirely correct.
    Solved,
    /// The feedback so far is inconsistent with every solution.
    Failed,
    /// The maximum number of rounds was played without solving the puzzle.
    ExceededMaxGuesses,
}

/// Narrows down the possible solutions from feedback, and suggests guesses that are expected to
/// give the most information.
///
/// Every round rebuilds the tries and constraint map from the previous round's word lists, so
/// nothing is shared between rounds except the immutable round-zero structures.
///
/// ```
/// use std::sync::Arc;
/// use rs_wordle_entropy::{parse_hints, Solver};
///
/// let words: Vec<Arc<str>> = ["crane", "slate", "crate", "trace"]
///     .iter()
///     .map(|word| Arc::from(*word))
///     .collect();
/// let mut solver = Solver::new(&words, &words).unwrap();
///
/// let done = solver.add_guess("slate", &parse_hints("..ggg").unwrap()).unwrap();
///
/// assert!(!done);
/// assert_eq!(solver.remaining_solutions(), 1);
/// assert_eq!(&*solver.rank_guesses(3)[0].word, "crate");
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
    pool: Option<Arc<ThreadPool>>,
    vocabulary: Arc<HashSet<Arc<str>>>,
    constraint: Constraint,
    solution_trie: Arc<WordTrie>,
    guess_trie: Arc<WordTrie>,
    constraint_map: Arc<ConstraintMap>,
    history: GuessHistory,
    round: usize,
    state: SolverState,
}

impl Solver {
    /// Constructs a solver with the default configuration, precomputing the constraint map for
    /// every guess word. **This is expensive for large vocabularies.** Prefer
    /// [`Solver::from_precomputed`] when playing many games.
    pub fn new<S: AsRef<str>>(
        solution_words: &[S],
        guess_words: &[S],
    ) -> Result<Solver, WordleError> {
        let solution_words = to_validated_words(solution_words)?;
        let guess_words = to_validated_words(guess_words)?;
        let precomputed = Precomputed::compute(&solution_words, &guess_words);
        Solver::from_precomputed(&precomputed, SolverConfig::default())
    }

    /// Constructs a solver that starts from shared precomputed structures.
    pub fn from_precomputed(
        precomputed: &Precomputed,
        config: SolverConfig,
    ) -> Result<Solver, WordleError> {
        let pool = match config.worker_threads {
            Some(num_threads) => Some(Arc::new(
                ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|err| WordleError::WorkerPool(err.to_string()))?,
            )),
            None => None,
        };
        let vocabulary: HashSet<Arc<str>> = precomputed
            .guess_trie
            .words()
            .iter()
            .chain(precomputed.solution_trie.words().iter())
            .map(Arc::clone)
            .collect();
        Ok(Solver {
            config,
            pool,
            vocabulary: Arc::new(vocabulary),
            constraint: Constraint::identity(),
            solution_trie: Arc::clone(&precomputed.solution_trie),
            guess_trie: Arc::clone(&precomputed.guess_trie),
            constraint_map: Arc::clone(&precomputed.constraint_map),
            history: GuessHistory::new(),
            round: 0,
            state: SolverState::Active { round: 0 },
        })
    }

    /// Applies the hints received for `word`. Returns whether the game is over.
    ///
    /// Invalid input is rejected before anything changes, so the same round can be retried.
    pub fn add_guess(&mut self, word: &str, hints: &[Hint]) -> Result<bool, WordleError> {
        match self.state {
            SolverState::Active { .. } => {}
            SolverState::Solved => return Err(WordleError::AlreadySolved),
            SolverState::Failed => return Err(WordleError::NoSolutions),
            SolverState::ExceededMaxGuesses => {
                return Err(WordleError::RoundsExhausted(self.config.max_rounds))
            }
        }
        validate_word(word)?;
        let pattern: Pattern = hints
            .try_into()
            .map_err(|_| WordleError::InvalidWordLength(hints.len()))?;
        let word = self
            .vocabulary
            .get(word)
            .map(Arc::clone)
            .ok_or_else(|| WordleError::UnknownWord(word.to_string()))?;

        self.history.push(Arc::clone(&word), pattern);
        if pattern.iter().all(|hint| *hint == Hint::Correct) {
            debug!("Solved with {} after {} rounds", word, self.round);
            self.state = SolverState::Solved;
            return Ok(true);
        }

        let constraint = self
            .constraint
            .and(&constraint_from_pattern(word.as_bytes(), &pattern));
        let solution_trie = WordTrie::new(self.solution_trie.words(), &constraint);
        let guess_trie = WordTrie::new(self.guess_trie.words(), &constraint);
        let constraint_map = ConstraintMap::new(guess_trie.words(), &solution_trie);
        debug!(
            "{} {}: {} -> {} solutions, {} -> {} guesses",
            word,
            format_pattern(&pattern),
            self.solution_trie.len(),
            solution_trie.len(),
            self.guess_trie.len(),
            guess_trie.len()
        );

        self.constraint = constraint;
        self.solution_trie = Arc::new(solution_trie);
        self.guess_trie = Arc::new(guess_trie);
        self.constraint_map = Arc::new(constraint_map);
        self.round += 1;

        if self.solution_trie.is_empty() {
            warn!("No solutions remain after {}", self.constraint);
            self.state = SolverState::Failed;
            return Ok(true);
        }
        if self.round >= self.config.max_rounds {
            self.state = SolverState::ExceededMaxGuesses;
            return Ok(true);
        }
        self.state = SolverState::Active { round: self.round };
        Ok(false)
    }

    /// Returns up to `n` guesses with the highest expected information, best first. Ties keep
    /// guess-list order.
    ///
    /// If only one solution remains, that word is returned alone with a utility of zero.
    pub fn rank_guesses(&self, n: usize) -> Vec<WordUtility> {
        if self.solution_trie.len() == 1 {
            return vec![WordUtility {
                word: Arc::clone(&self.solution_trie.words()[0]),
                utility: 0.0,
            }];
        }
        if self.solution_trie.is_empty() {
            return Vec::new();
        }

        let words = self.guess_trie.words();
        let utilities: Vec<f64> = match &self.pool {
            Some(pool) => pool.install(|| self.compute_utilities(words)),
            None => self.compute_utilities(words),
        };
        let mut ranked: Vec<WordUtility> = words
            .iter()
            .zip(utilities)
            .map(|(word, utility)| WordUtility {
                word: Arc::clone(word),
                utility,
            })
            .collect();
        // Stable, so equal utilities stay in guess-list order.
        ranked.sort_by(|a, b| b.utility.total_cmp(&a.utility));
        ranked.truncate(n);
        ranked
    }

    fn compute_utilities(&self, words: &[Arc<str>]) -> Vec<f64> {
        words
            .par_iter()
            .map(|word| {
                let constraints = self.constraint_map.get(word).unwrap_or_else(|| {
                    panic!("constraint map was not built for guess word {:?}", word)
                });
                expected_information(&self.solution_trie, constraints)
            })
            .collect()
    }

    /// The number of solution words still consistent with the feedback.
    pub fn remaining_solutions(&self) -> usize {
        self.solution_trie.len()
    }

    /// The solution words still consistent with the feedback.
    pub fn solution_words(&self) -> &[Arc<str>] {
        self.solution_trie.words()
    }

    /// The words still being considered as guesses.
    pub fn guess_words(&self) -> &[Arc<str>] {
        self.guess_trie.words()
    }

    /// The number of rounds of feedback applied, not counting a winning guess.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Returns `true` once no more feedback will be accepted.
    pub fn is_done(&self) -> bool {
        !matches!(self.state, SolverState::Active { .. })
    }

    /// The combination of all feedback so far.
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn history(&self) -> &GuessHistory {
        &self.history
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The remaining uncertainty about the answer, in bits.
    pub fn uncertainty_bits(&self) -> f64 {
        if self.solution_trie.is_empty() {
            return 0.0;
        }
        (self.solution_trie.len() as f64).log2()
    }
}

/// The Shannon entropy, in bits, of splitting the trie's words by the given constraints.
pub fn expected_information(solution_trie: &WordTrie, constraints: &[Constraint]) -> f64 {
    let total = solution_trie.len() as f64;
    constraints
        .iter()
        .map(|constraint| solution_trie.count_matches(constraint))
        .filter(|num_matches| *num_matches > 0)
        .map(|num_matches| {
            let p = num_matches as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Plays a game against `objective`, always guessing the top-ranked word.
pub fn play_game(objective: &str, mut solver: Solver) -> GameResult {
    if !solver
        .solution_words()
        .iter()
        .any(|word| word.as_ref() == objective)
    {
        return GameResult::UnknownWord;
    }
    let mut guesses: Vec<Box<str>> = Vec::new();
    while !solver.is_done() {
        let Some(guess) = solver.rank_guesses(1).into_iter().next() else {
            break;
        };
        guesses.push(Box::from(guess.word.as_ref()));
        let pattern = match get_result_for_guess(objective, &guess.word) {
            Ok(pattern) => pattern,
            Err(_) => return GameResult::UnknownWord,
        };
        if solver.add_guess(&guess.word, &pattern).is_err() {
            break;
        }
    }
    if solver.state() == SolverState::Solved {
        GameResult::Success(guesses)
    } else {
        GameResult::Failure(guesses)
    }
}

/// Validates each word, keeping only the first copy of any repeated word.
fn to_validated_words<S: AsRef<str>>(words: &[S]) -> Result<Vec<Arc<str>>, WordleError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut validated = Vec::with_capacity(words.len());
    for word in words {
        let word = word.as_ref();
        validate_word(word)?;
        if seen.insert(word) {
            validated.push(Arc::from(word));
        }
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WORD_LENGTH;

    fn solver_for(words: &[&str]) -> Solver {
        Solver::new(words, words).unwrap()
    }

    #[test]
    fn expected_information_of_even_split_is_one_bit() {
        let words: Vec<Arc<str>> = vec![Arc::from("abcde"), Arc::from("fghij")];
        let trie = WordTrie::new(&words, &Constraint::identity());
        let map = ConstraintMap::new(&words, &trie);

        assert_eq!(expected_information(&trie, map.get("abcde").unwrap()), 1.0);
    }

    #[test]
    fn failed_add_guess_changes_nothing() {
        let mut solver = solver_for(&["abcde", "fghij"]);

        assert_eq!(
            solver.add_guess("zzzzz", &[Hint::Wrong; WORD_LENGTH]),
            Err(WordleError::UnknownWord("zzzzz".to_string()))
        );
        assert_eq!(
            solver.add_guess("abcde", &[Hint::Wrong; 4]),
            Err(WordleError::InvalidWordLength(4))
        );
        assert_eq!(solver.round(), 0);
        assert!(solver.history().is_empty());
        assert_eq!(solver.constraint(), &Constraint::identity());
        assert_eq!(solver.remaining_solutions(), 2);
    }

    #[test]
    fn dedicated_pool_ranks_like_global_pool() {
        let words: Vec<Arc<str>> = ["abcde", "fghij", "abxyz", "fgxyz"]
            .iter()
            .map(|word| Arc::from(*word))
            .collect();
        let precomputed = Precomputed::compute(&words, &words);
        let global = Solver::from_precomputed(&precomputed, SolverConfig::default()).unwrap();
        let pooled = Solver::from_precomputed(
            &precomputed,
            SolverConfig {
                worker_threads: Some(2),
                ..SolverConfig::default()
            },
        )
        .unwrap();

        assert_eq!(global.rank_guesses(4), pooled.rank_guesses(4));
    }
}
