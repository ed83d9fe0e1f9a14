use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Value};

/// What a backtracking run is for. One search routine serves three callers
/// with different result shapes, so the terminal action, the accumulator,
/// and the candidate ordering are injected through this trait.
trait Purpose {
    type Outcome;

    /// Accumulator for a frame that finds nothing.
    fn dead_end(&mut self) -> Self::Outcome;

    /// Terminal result once the board is fully solved.
    fn solved(&mut self, board: &Board) -> Self::Outcome;

    /// Folds a child result into the accumulator; returning true
    /// short-circuits the rest of the search.
    fn absorb(&mut self, acc: &mut Self::Outcome, child: Self::Outcome) -> bool;

    /// Candidate ordering hook; the default keeps the natural 1..=9 order.
    fn order(&mut self, _candidates: &mut Vec<Value>) {}
}

struct CountSolutions;

impl Purpose for CountSolutions {
    type Outcome = usize;
    fn dead_end(&mut self) -> usize {
        0
    }
    fn solved(&mut self, _board: &Board) -> usize {
        1
    }
    fn absorb(&mut self, acc: &mut usize, child: usize) -> bool {
        *acc += child;
        false
    }
}

struct EnumerateSolutions;

impl Purpose for EnumerateSolutions {
    type Outcome = Vec<Board>;
    fn dead_end(&mut self) -> Vec<Board> {
        Vec::new()
    }
    fn solved(&mut self, board: &Board) -> Vec<Board> {
        vec![board.clone()]
    }
    fn absorb(&mut self, acc: &mut Vec<Board>, child: Vec<Board>) -> bool {
        acc.extend(child);
        false
    }
}

struct FillRandom<'a, R: Rng> {
    rng: &'a mut R,
}

impl<R: Rng> Purpose for FillRandom<'_, R> {
    type Outcome = Option<Board>;
    fn dead_end(&mut self) -> Option<Board> {
        None
    }
    fn solved(&mut self, board: &Board) -> Option<Board> {
        Some(board.clone())
    }
    fn absorb(&mut self, acc: &mut Option<Board>, child: Option<Board>) -> bool {
        if child.is_some() {
            *acc = child;
            return true;
        }
        false
    }
    fn order(&mut self, candidates: &mut Vec<Value>) {
        candidates.shuffle(self.rng);
    }
}

/// Depth-first search with first-empty-cell ordering and chronological
/// backtracking. Each frame claims exactly the first empty cell in row-major
/// order, tries its candidates, and resets it before returning; recursion
/// depth is bounded by 81.
fn backtrack<P: Purpose>(board: &mut Board, purpose: &mut P) -> P::Outcome {
    if board.is_solved() {
        return purpose.solved(board);
    }

    let mut result = purpose.dead_end();
    for pos in Board::all_coords() {
        if board.cells[pos.r][pos.c].value != 0 {
            continue;
        }

        let mut choices = board.candidates(pos.r, pos.c);
        purpose.order(&mut choices);

        for choice in choices {
            board.cells[pos.r][pos.c].value = choice;
            let child = backtrack(board, purpose);
            if purpose.absorb(&mut result, child) {
                // short-circuit: leave the board solved in place
                return result;
            }
        }

        board.cells[pos.r][pos.c].value = 0;
        break;
    }
    result
}

/// Exact number of completions of the board. Exhaustive; the caller's board
/// is never mutated.
pub fn count_solutions(board: &Board) -> usize {
    let mut work = board.clone();
    backtrack(&mut work, &mut CountSolutions)
}

/// Every completion of the board, as deep copies. The caller's board is
/// never mutated.
pub fn solutions(board: &Board) -> Vec<Board> {
    let mut work = board.clone();
    backtrack(&mut work, &mut EnumerateSolutions)
}

/// Completes the board in place with randomly ordered candidates, returning
/// the first full solution found. `None` means no valid solution is reachable
/// from the current partial assignment.
pub(crate) fn fill_random<R: Rng>(board: &mut Board, rng: &mut R) -> Option<Board> {
    backtrack(board, &mut FillRandom { rng })
}
