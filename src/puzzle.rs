use log::debug;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use crate::board::Board;
use crate::solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

/// How many filled cells to clear and how many solutions the result may keep.
#[derive(Debug, Clone, Copy)]
pub struct Cutoffs {
    /// Inclusive lower bound on the clear target.
    pub clear_min: usize,
    /// Exclusive upper bound on the clear target.
    pub clear_max: usize,
    /// Maximum number of solutions the generated puzzle may admit.
    pub max_solutions: usize,
}

static CUTOFFS: Lazy<HashMap<Difficulty, Cutoffs>> = Lazy::new(|| {
    HashMap::from([
        (Difficulty::Easy, Cutoffs { clear_min: 40, clear_max: 55, max_solutions: 1 }),
        (Difficulty::Medium, Cutoffs { clear_min: 55, clear_max: 65, max_solutions: 2 }),
        (Difficulty::Hard, Cutoffs { clear_min: 65, clear_max: 75, max_solutions: 4 }),
    ])
});

impl Difficulty {
    pub fn cutoffs(self) -> Cutoffs {
        CUTOFFS[&self]
    }
}

/// A generated game: the playable board with its givens locked, the solved
/// grid it was carved from, and the exact number of solutions it admits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub difficulty: Difficulty,
    pub board: Board,
    pub solution: Board,
    pub solution_count: usize,
}

pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(rand::thread_rng()).unwrap(),
        };
        Self { rng }
    }

    /// A fully solved grid via randomized backtracking from an empty board.
    /// The search from an empty board is complete, so a single attempt
    /// succeeds; the retry loop covers the `None` contract anyway.
    pub fn solved_grid(&mut self) -> Board {
        loop {
            let mut board = Board::empty();
            if let Some(solved) = solver::fill_random(&mut board, &mut self.rng) {
                return solved;
            }
            debug!("randomized fill came back empty, retrying");
        }
    }

    /// Carves a puzzle out of a fresh solved grid: clears random cells while
    /// the solution count stays within the difficulty's cap.
    pub fn generate(&mut self, difficulty: Difficulty) -> Puzzle {
        let cutoffs = difficulty.cutoffs();
        let solution = self.solved_grid();
        let mut board = solution.clone();

        let target = self.rng.gen_range(cutoffs.clear_min..cutoffs.clear_max) as i64;
        let mut cleared: i64 = 0;

        // A draw landing on an already-empty cell is a no-op that passes the
        // cap check and still advances the counter; once no single clear can
        // stay under the cap, those draws are what finish the loop.
        while cleared < target {
            let r = self.rng.gen_range(0..9);
            let c = self.rng.gen_range(0..9);
            let previous = board.cells[r][c].value;
            board.cells[r][c].value = 0;

            if solver::count_solutions(&board) > cutoffs.max_solutions {
                // revert; the unconditional increment below nets this
                // attempt to zero
                cleared -= 1;
                board.cells[r][c].value = previous;
            }

            cleared += 1;
        }

        let solution_count = solver::count_solutions(&board);
        board.lock_filled();
        debug!("generated {} puzzle with {} solution(s)", difficulty, solution_count);

        Puzzle { difficulty, board, solution, solution_count }
    }
}
