use clap::Parser;
use phrase_gen::utils::normalize_start_symbol;
use phrase_gen::{GrammarTable, SentenceExpander, DEFAULT_MAX_DEPTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Random phrase generator for context-free grammar files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the grammar file
    #[arg(help = "Path to the grammar file")]
    grammar_file: PathBuf,

    /// Number of phrases to generate
    #[arg(help = "Number of phrases to generate", default_value = "1")]
    count: usize,

    /// Starting non-terminal symbol
    #[arg(short, long, default_value = "<start>")]
    start: String,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum expansion depth before a grammar is treated as
    /// self-referential
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let start = normalize_start_symbol(&cli.start)?;
    let table = GrammarTable::from_file(&cli.grammar_file)?;

    match cli.seed {
        Some(seed) => {
            let rng = StdRng::seed_from_u64(seed);
            let mut expander =
                SentenceExpander::with_rng(&table, rng).with_max_depth(cli.max_depth);
            generate(&mut expander, &start, cli.count)
        }
        None => {
            let mut expander =
                SentenceExpander::new(&table).with_max_depth(cli.max_depth);
            generate(&mut expander, &start, cli.count)
        }
    }
}

/// Print `count` independently expanded phrases, one per line.
fn generate<R: Rng>(
    expander: &mut SentenceExpander<'_, R>,
    start: &str,
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..count {
        println!("{}", expander.expand(start)?);
    }
    Ok(())
}
