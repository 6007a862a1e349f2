use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Parser;
use log::info;
use wordly_solver::{
    compile,
    solver::{FixedLanguage, RandomFirstWord},
    words::read_words,
    Forest, GuessedWord, Language, Solver, WordlyError,
};

#[derive(Parser)]
#[command(name = "wordly", about = "Suggests the next guess in a Wordle-style game")]
struct Cli {
    /// Word list, one word per line
    #[arg(short, long)]
    dictionary: PathBuf,

    /// Language of the word list: "en" or "ru"
    #[arg(short, long, default_value = "en")]
    language: Language,

    /// Number of letters in the hidden word
    #[arg(short = 'n', long, default_value = "5")]
    length: usize,

    /// A previous guess with its feedback as WORD=PATTERN, where the pattern
    /// uses c for correct, a for misplaced and i for absent letters
    #[arg(short, long = "guess")]
    guesses: Vec<String>,

    /// Print the constraints compiled from the guesses as JSON
    #[arg(long)]
    explain: bool,

    /// Print every word that fits instead of a random one
    #[arg(long)]
    list: bool,

    /// Suggest a word that avoids every letter guessed so far
    #[arg(long)]
    exclusion: bool,

    /// Play a whole game against this answer
    #[arg(long)]
    answer: Option<String>,
}

fn main() -> Result<(), WordlyError> {
    env_logger::init();
    let cli = Cli::parse();

    let words = read_words(BufReader::new(File::open(&cli.dictionary)?))?;
    info!("read {} words from {}", words.len(), cli.dictionary.display());
    let forest = Forest::build(words.into_iter().map(|word| (cli.language, word)));

    let solver = Solver::new(
        &forest,
        RandomFirstWord::new(&forest, cli.length),
        FixedLanguage(cli.language),
    );

    if let Some(answer) = &cli.answer {
        let game = solver.play(&answer.to_lowercase())?;
        for guess in &game {
            println!("{}", guess.colored());
        }
        match game.last() {
            Some(last) if last.solved() => println!("solved in {} rounds", game.len()),
            _ => println!("not solved after {} rounds", game.len()),
        }
        return Ok(());
    }

    let history = cli
        .guesses
        .iter()
        .map(|guess| guess.to_lowercase().parse::<GuessedWord>())
        .collect::<Result<Vec<_>, _>>()?;
    for guess in &history {
        println!("{}", guess.colored());
    }

    let spec = compile(&history, cli.length)?;
    if cli.explain {
        println!("{}", spec.to_json()?);
    }

    if cli.list {
        let tree = forest.tree(cli.language, cli.length)?;
        for word in tree.words().filter(|word| spec.is_admissible(word)) {
            println!("{}", word);
        }
        return Ok(());
    }

    let found = if cli.exclusion {
        solver.exclusion_word(&history, cli.length)?
    } else {
        solver.suggest(&history, cli.length)?
    };
    match found {
        Some(word) => println!("{}", word),
        None => println!("no word fits these guesses"),
    }

    Ok(())
}
