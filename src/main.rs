use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use gridoku::{board::Board, puzzle::{Difficulty, Generator}, solver, store};
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gridoku", version, about = "Sudoku engine: generate, solve, and count solutions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new puzzle
    Generate {
        /// Target difficulty
        #[arg(short, long, value_enum, default_value_t = Level::Easy)]
        difficulty: Level,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the puzzle and its solution to a JSON file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Solve a puzzle (81 chars with 0 or . for blanks). Reads stdin if no file is given.
    Solve {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print every solution instead of just the first
        #[arg(long)]
        all: bool,
    },

    /// Count the solutions of a puzzle
    Count {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Level { Easy, Medium, Hard }

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

fn read_puzzle(input: &Option<PathBuf>) -> Result<Board> {
    let s = match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            use std::io::{self, Read};
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Board::parse(&s).context("parse puzzle")
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { difficulty, seed, out } => {
            let mut generator = Generator::new(seed);
            let puzzle = generator.generate(difficulty.into());
            let clues = Board::all_coords()
                .filter(|p| puzzle.board.cells[p.r][p.c].value != 0)
                .count();

            println!("{}", puzzle.board);
            println!("{} {}", "Difficulty:".bold(), puzzle.difficulty);
            println!("{} {}", "Clues:".bold(), clues);
            println!("{} {}", "Solutions:".bold(), puzzle.solution_count);

            if let Some(path) = out {
                let saved = store::SavedPuzzle::new(puzzle);
                store::save(&path, &saved)?;
                println!("{} {}", "Saved to".green(), path.display());
            }
        }
        Command::Solve { input, all } => {
            let board = read_puzzle(&input)?;
            let found = solver::solutions(&board);
            if found.is_empty() {
                bail!("no solution");
            }
            if all {
                for (i, solution) in found.iter().enumerate() {
                    println!("{} {}", "Solution".bold(), i + 1);
                    println!("{}", solution);
                }
            } else {
                println!("{}", found[0]);
            }
            println!("{} {}", "Solutions:".bold(), found.len());
        }
        Command::Count { input } => {
            let board = read_puzzle(&input)?;
            println!("{}", solver::count_solutions(&board));
        }
    }

    Ok(())
}
