//! Goban-Record: record, inspect and generate SGF game records.
//!
//! ## Usage
//!
//! - `goban-record` - Print a random demo game as SGF
//! - `goban-record demo --size 9 --moves 60 --seed 1` - Same, with options
//! - `goban-record check game.sgf` - Parse a record and summarize it
//! - `goban-record show game.sgf --move 20` - Print the board after a move
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` for more.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use goban_record::constants::{MAX_SIZE, PROG_NAME, VERSION};
use goban_record::game::GameRecord;
use goban_record::playout::random_game;
use goban_record::sgf;

/// Goban-Record: a Go game recorder with SGF import and export
#[derive(Parser)]
#[command(name = "goban-record")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a random legal game and print it as SGF
    Demo {
        /// Board size
        #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(1..=MAX_SIZE as i64))]
        size: u8,
        /// Maximum number of moves
        #[arg(long, default_value_t = 60)]
        moves: usize,
        /// Random seed, for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Parse an SGF file and print a summary
    Check {
        /// Path to a .sgf file
        file: PathBuf,
    },
    /// Print the board after a main-line move of an SGF file
    Show {
        /// Path to a .sgf file
        file: PathBuf,
        /// Move number (default: end of the main line)
        #[arg(long = "move")]
        move_number: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Demo { size, moves, seed }) => run_demo(size as usize, moves, seed),
        Some(Commands::Check { file }) => run_check(&file),
        Some(Commands::Show { file, move_number }) => run_show(&file, move_number),
        None => run_demo(9, 60, None),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_demo(size: usize, moves: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let mut record = GameRecord::new(size);
    {
        let info = record.info_mut();
        info.game_name = "Random demo".to_string();
        info.black_name = format!("{PROG_NAME} {VERSION}");
        info.white_name = format!("{PROG_NAME} {VERSION}");
    }
    let played = random_game(&mut record, moves, &mut rng);
    info!(size, played, "demo game generated");
    print!("{}", sgf::serialize(&record));
    Ok(())
}

fn load(file: &Path) -> Result<GameRecord> {
    if !sgf::is_sgf_path(file) {
        bail!("{} is not an .sgf file", file.display());
    }
    let text =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let record =
        sgf::parse(&text).with_context(|| format!("failed to parse {}", file.display()))?;
    info!(file = %file.display(), nodes = record.len(), "record loaded");
    Ok(record)
}

fn run_check(file: &Path) -> Result<()> {
    let record = load(file)?;
    let info = record.info();
    let name = |name: &str, rank: &str| match (name.is_empty(), rank.is_empty()) {
        (true, _) => "?".to_string(),
        (false, true) => name.to_string(),
        (false, false) => format!("{name} [{rank}]"),
    };

    println!("Black:      {}", name(&info.black_name, &info.black_rank));
    println!("White:      {}", name(&info.white_name, &info.white_rank));
    println!("Size:       {}", record.board_size());
    println!("Komi:       {}", info.komi);
    println!("Handicap:   {}", info.handicap);
    if !info.result.is_empty() {
        println!("Result:     {}", info.result);
    }
    println!("Main line:  {} moves", record.main_line().count());
    println!("Nodes:      {}", record.len() - 1);
    println!("Variations: {}", record.tree().variation_count());
    Ok(())
}

fn run_show(file: &Path, move_number: Option<usize>) -> Result<()> {
    let record = load(file)?;
    let line: Vec<_> = record.main_line().collect();
    let node = match move_number {
        Some(0) => record.moves_root(),
        Some(k) => match line.get(k - 1) {
            Some(&id) => id,
            None => bail!("main line has only {} moves", line.len()),
        },
        None => line.last().copied().unwrap_or(record.moves_root()),
    };

    let n = record.node(node);
    match (n.color(), n.vertex()) {
        (Some(color), Some(vertex)) => {
            println!("Move {}: {color} {vertex}", record.move_number(node));
        }
        _ => println!("Start position"),
    }
    if let Some(comment) = n.comment() {
        println!("{comment}");
    }
    println!();
    print!("{}", n.position());
    Ok(())
}
