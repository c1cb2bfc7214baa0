use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rs_wordle_entropy::*;

use std::sync::Arc;

const COMMON_LETTERS: &[u8] = b"aeiorstlnc";

/// Builds a deterministic vocabulary from common letters, so words share prefixes and letters the
/// way real word lists do.
fn synthetic_words(count: usize) -> Vec<Arc<str>> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut words: Vec<Arc<str>> = Vec::with_capacity(count);
    while words.len() < count {
        let word: String = (0..WORD_LENGTH)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                COMMON_LETTERS[(state % COMMON_LETTERS.len() as u64) as usize] as char
            })
            .collect();
        if !words.iter().any(|existing| **existing == *word) {
            words.push(Arc::from(word.as_str()));
        }
    }
    words
}

fn bench_precompute(c: &mut Criterion) {
    let words = synthetic_words(300);

    c.bench_function("precompute 300 words", |b| {
        b.iter(|| Precomputed::compute(black_box(&words), black_box(&words)))
    });
}

fn bench_rank_guesses(c: &mut Criterion) {
    let words = synthetic_words(500);
    let precomputed = Precomputed::compute(&words, &words);
    let solver = Solver::from_precomputed(&precomputed, SolverConfig::default())
        .expect("default config is valid");

    c.bench_function("rank guesses 500 words", |b| {
        b.iter(|| solver.rank_guesses(black_box(10)))
    });
}

fn bench_count_matches(c: &mut Criterion) {
    let words = synthetic_words(1000);
    let trie = WordTrie::new(&words, &Constraint::identity());
    let constraints: Vec<Constraint> = all_patterns()
        .iter()
        .filter(|pattern| is_valid_pattern(b"slate", pattern))
        .map(|pattern| constraint_from_pattern(b"slate", pattern))
        .collect();

    c.bench_function("count matches for every slate pattern", |b| {
        b.iter(|| {
            constraints
                .iter()
                .map(|constraint| trie.count_matches(black_box(constraint)))
                .sum::<usize>()
        })
    });
}

fn bench_play_game(c: &mut Criterion) {
    let words = synthetic_words(300);
    let precomputed = Precomputed::compute(&words, &words);
    let mut objectives = words.iter().cycle();

    c.bench_function("play game 300 words", |b| {
        b.iter_batched(
            || {
                let solver = Solver::from_precomputed(&precomputed, SolverConfig::default())
                    .expect("default config is valid");
                (objectives.next().map(Arc::clone), solver)
            },
            |(objective, solver)| {
                objective.map(|objective| play_game(&objective, solver))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_precompute,
    bench_rank_guesses,
    bench_count_matches,
    bench_play_game
);
criterion_main!(benches);
