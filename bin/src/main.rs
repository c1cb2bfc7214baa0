use clap::{Parser, Subcommand};
use log::info;
use rand::seq::SliceRandom;
use rs_wordle_entropy::*;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io;
use std::io::Write;
use std::time::Instant;

/// Plays Wordle in reverse: the computer guesses the word, choosing guesses that are expected to
/// reveal the most information.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file with the possible solutions, one word per line.
    #[clap(short = 's', long)]
    solutions_file: Option<String>,

    /// Path to a file with additional allowed guesses, one word per line. Defaults to the
    /// solutions.
    #[clap(short = 'g', long)]
    guesses_file: Option<String>,

    /// Path to a file written by the `precompute` command. Used instead of the word files.
    #[clap(short = 'p', long)]
    precomputed: Option<String>,

    /// The number of guesses allowed per game.
    #[clap(short = 'r', long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,

    /// The number of threads used to rank guesses. Defaults to one per CPU.
    #[clap(short = 't', long)]
    threads: Option<usize>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an interactive game, where you give the hints for each guess.
    Solve,
    /// Run a single game against the given word, or a random solution.
    Single { word: Option<String> },
    /// Play against every solution and summarize how many guesses were needed.
    Benchmark {
        /// Only play against the first this many solutions.
        #[clap(short = 'l', long)]
        limit: Option<usize>,
    },
    /// Compute the constraint map for the word files and save it for later runs.
    Precompute {
        #[clap(short = 'o', long)]
        output: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();

    let precomputed = load_precomputed(&args)?;
    println!(
        "There are {} possible solutions and {} allowed guesses.",
        precomputed.solution_trie.len(),
        precomputed.guess_trie.len()
    );
    let config = SolverConfig {
        max_rounds: args.max_rounds,
        worker_threads: args.threads,
    };

    match args.command {
        Command::Solve => play_interactive_game(&precomputed, config)?,
        Command::Single { word } => play_single_game(word, &precomputed, config)?,
        Command::Benchmark { limit } => run_benchmark(limit, &precomputed, config)?,
        Command::Precompute { output } => {
            let writer = io::BufWriter::new(File::create(&output)?);
            ron::ser::to_writer(writer, &precomputed)?;
            println!("Saved to {}.", output);
        }
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn load_precomputed(args: &Args) -> Result<Precomputed, Box<dyn Error>> {
    if let Some(path) = &args.precomputed {
        info!("Loading precomputed data from {}", path);
        let reader = io::BufReader::new(File::open(path)?);
        return Ok(ron::de::from_reader(reader)?);
    }
    let solutions_file = args
        .solutions_file
        .as_ref()
        .ok_or("either --solutions-file or --precomputed is required")?;
    let solutions = read_word_bank(solutions_file)?;
    let guesses = match &args.guesses_file {
        Some(path) => read_word_bank(path)?,
        None => solutions.clone(),
    };
    Ok(Precomputed::compute(&solutions, &guesses))
}

fn read_word_bank(path: &str) -> Result<WordBank, WordleError> {
    info!("Reading words from {}", path);
    let reader = io::BufReader::new(File::open(path)?);
    WordBank::from_reader(reader)
}

fn play_single_game(
    word: Option<String>,
    precomputed: &Precomputed,
    config: SolverConfig,
) -> Result<(), Box<dyn Error>> {
    let word = match word {
        Some(word) => word.to_lowercase(),
        None => precomputed
            .solution_words()
            .choose(&mut rand::thread_rng())
            .map(|word| word.to_string())
            .ok_or("there are no solutions to choose from")?,
    };
    println!("Playing against {}.", word);

    let solver = Solver::from_precomputed(precomputed, config)?;
    match play_game(&word, solver) {
        GameResult::Success(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            print_guesses(&word, &guesses)?;
        }
        GameResult::Failure(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            print_guesses(&word, &guesses)?;
        }
        GameResult::UnknownWord => {
            return Err(WordleError::UnknownWord(word).into());
        }
    }
    Ok(())
}

fn print_guesses(objective: &str, guesses: &[Box<str>]) -> Result<(), WordleError> {
    for guess in guesses {
        let pattern = get_result_for_guess(objective, guess)?;
        println!("\t{} {}", guess, format_pattern(&pattern));
    }
    Ok(())
}

fn run_benchmark(
    limit: Option<usize>,
    precomputed: &Precomputed,
    config: SolverConfig,
) -> Result<(), Box<dyn Error>> {
    let objectives = precomputed.solution_words();
    let objectives = &objectives[..limit.unwrap_or(objectives.len()).min(objectives.len())];

    let mut num_games_per_round: BTreeMap<usize, usize> = BTreeMap::new();
    let mut failures: Vec<&str> = Vec::new();
    for objective in objectives {
        let solver = Solver::from_precomputed(precomputed, config.clone())?;
        match play_game(objective, solver) {
            GameResult::Success(guesses) => {
                *num_games_per_round.entry(guesses.len()).or_insert(0) += 1;
            }
            GameResult::Failure(_) | GameResult::UnknownWord => failures.push(&**objective),
        }
    }
    println!("Played {} games. Results:", objectives.len());

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    for (num_guesses, num_games) in num_games_per_round.iter() {
        println!("|{}|{}|", num_guesses, num_games);
    }
    println!("|failed|{}|", failures.len());
    if !failures.is_empty() {
        println!("\nFailed to solve: {}", failures.join(", "));
    }

    let num_solved: usize = num_games_per_round.values().sum();
    if num_solved > 0 {
        let average = num_games_per_round
            .iter()
            .map(|(num_guesses, num_games)| num_guesses * num_games)
            .sum::<usize>() as f64
            / num_solved as f64;
        let std_dev = (num_games_per_round
            .iter()
            .map(|(num_guesses, num_games)| {
                (*num_guesses as f64 - average).powi(2) * *num_games as f64
            })
            .sum::<f64>()
            / num_solved as f64)
            .sqrt();
        println!(
            "\n**Average number of guesses:** {:.2} +/- {:.2}",
            average, std_dev
        );
    }
    Ok(())
}

fn play_interactive_game(
    precomputed: &Precomputed,
    config: SolverConfig,
) -> Result<(), Box<dyn Error>> {
    let mut solver = Solver::from_precomputed(precomputed, config)?;
    println!(
        "Choose a word from the solution list. I will suggest guesses for it.\n\n\
         After each guess, enter the guess you played (or nothing to use my first suggestion),\n\
         then the correctness of each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"g.gy.\""
    );

    while !solver.is_done() {
        let suggestions = solver.rank_guesses(5);
        let Some(best) = suggestions.first() else {
            break;
        };
        println!(
            "\n{} solutions left ({:.2} bits). My suggestions:",
            solver.remaining_solutions(),
            solver.uncertainty_bits()
        );
        for suggestion in suggestions.iter() {
            println!("\t{} {:.3}", suggestion.word, suggestion.utility);
        }

        let guess = prompt("Your guess: ")?;
        let guess = if guess.is_empty() {
            best.word.to_string()
        } else {
            guess.to_lowercase()
        };
        if let Err(err) = validate_word(&guess) {
            println!("{}. Try another guess.", err);
            continue;
        }

        loop {
            let input = prompt(&format!("Hints for {}: ", guess))?;
            let result = parse_hints(&input).and_then(|hints| solver.add_guess(&guess, &hints));
            match result {
                Ok(_) => break,
                Err(err @ WordleError::UnknownWord(_))
                | Err(err @ WordleError::InvalidCharacters(_)) => {
                    println!("{}. Try another guess.", err);
                    break;
                }
                Err(err) => println!("{}. Try again.", err),
            }
        }
        print!("\n{}", solver.history());
    }

    match solver.state() {
        SolverState::Solved => println!("I did it! It took {} guesses.", solver.history().len()),
        SolverState::ExceededMaxGuesses => println!("I couldn't guess it :("),
        SolverState::Failed | SolverState::Active { .. } => {
            println!("No solutions match those hints. Was one of them entered incorrectly?")
        }
    }
    Ok(())
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}
