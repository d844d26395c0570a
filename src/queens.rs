//! Exhaustive N-Queens search.
//!
//! Classic depth-first backtracking: place a queen per row, try columns in
//! ascending order, undo on dead ends. Solutions come out in the
//! lexicographic order induced by that column order, and callers rely on
//! that ordering when comparing runs across execution contexts.

use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::SolveError;

/// A queen placement as `(row, column)`.
pub type Placement = (usize, usize);

/// One complete non-attacking assignment, one queen per row, sorted by row.
pub type Solution = Vec<Placement>;

/// Result of a full search: every solution plus the wall-clock time taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueensRun {
    pub solutions: Vec<Solution>,
    pub elapsed_ms: f64,
}

impl QueensRun {
    pub fn count(&self) -> usize {
        self.solutions.len()
    }
}

/// Per-mode timing statistics for a multi-round benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl TimingStats {
    fn from_samples(samples: &[f64]) -> Self {
        let sum: f64 = samples.iter().sum();
        Self {
            average: sum / samples.len() as f64,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(0.0, f64::max),
        }
    }
}

/// One benchmark round: the same search timed in both execution contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTiming {
    pub round: usize,
    pub sequential_ms: f64,
    pub threaded_ms: f64,
}

/// Report of a sequential-vs-threaded timing comparison over several rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchReport {
    pub solutions_count: usize,
    pub rounds: Vec<RoundTiming>,
    pub sequential: TimingStats,
    pub threaded: TimingStats,
    /// Average sequential time divided by average threaded time.
    pub speedup: f64,
}

/// Validate a raw board size from an untrusted source (CLI flag, JSON).
///
/// Zero is a legal board: it has exactly one (empty) solution.
pub fn board_size(raw: i64) -> Result<usize, SolveError> {
    if raw < 0 {
        return Err(SolveError::InvalidInput(format!(
            "board size must be non-negative, got {raw}"
        )));
    }
    Ok(raw as usize)
}

/// Column assignments for the rows searched so far.
///
/// Index = row, value = column. Eight queens is the common case, so the
/// stack stays inline for the boards this crate is actually asked to solve.
type Board = SmallVec<[usize; 8]>;

/// A column is safe if no placed queen shares it or either diagonal.
fn is_safe(board: &Board, row: usize, col: usize) -> bool {
    board.iter().enumerate().all(|(placed_row, &placed_col)| {
        placed_col != col && placed_row.abs_diff(row) != placed_col.abs_diff(col)
    })
}

fn search(size: usize, board: &mut Board, solutions: &mut Vec<Solution>) {
    let row = board.len();
    if row == size {
        solutions.push(board.iter().cloned().enumerate().collect());
        return;
    }
    for col in 0..size {
        if is_safe(board, row, col) {
            board.push(col);
            search(size, board, solutions);
            board.pop();
        }
    }
}

/// Find every placement of `size` non-attacking queens on a `size`x`size`
/// board.
///
/// Pure apart from the timing side-channel. Sizes with no solution (2, 3)
/// return an empty list; size 0 returns the single empty solution.
pub fn solve(size: usize) -> QueensRun {
    let start = Instant::now();
    let mut board = Board::new();
    let mut solutions = Vec::new();
    search(size, &mut board, &mut solutions);
    QueensRun {
        solutions,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

/// Run the identical search on a fresh worker thread.
///
/// The worker owns its own board state; nothing is shared with the calling
/// thread. Solutions and their order are guaranteed to match [`solve`] --
/// only the measured wall-clock time may differ, which is the entire point
/// of offering this variant.
pub fn solve_threaded(size: usize) -> QueensRun {
    let handle = thread::spawn(move || solve(size));
    match handle.join() {
        Ok(run) => run,
        // A panic in the worker would be a bug in the search itself; the
        // search is panic-free for any size, so re-running inline is safe.
        Err(_) => solve(size),
    }
}

/// Time the sequential and threaded searches over `rounds` rounds.
///
/// Mirrors the repeated head-to-head measurement the game UI charts: each
/// round runs both contexts on the same board size and records both times.
pub fn bench(size: usize, rounds: usize) -> BenchReport {
    let rounds = rounds.max(1);
    let mut sequential_times = Vec::with_capacity(rounds);
    let mut threaded_times = Vec::with_capacity(rounds);
    let mut round_timings = Vec::with_capacity(rounds);
    let mut solutions_count = 0;

    for round in 1..=rounds {
        let sequential = solve(size);
        let threaded = solve_threaded(size);
        solutions_count = sequential.count();
        sequential_times.push(sequential.elapsed_ms);
        threaded_times.push(threaded.elapsed_ms);
        round_timings.push(RoundTiming {
            round,
            sequential_ms: sequential.elapsed_ms,
            threaded_ms: threaded.elapsed_ms,
        });
    }

    let sequential = TimingStats::from_samples(&sequential_times);
    let threaded = TimingStats::from_samples(&threaded_times);
    let speedup = if threaded.average > 0.0 {
        sequential.average / threaded.average
    } else {
        1.0
    };

    BenchReport {
        solutions_count,
        rounds: round_timings,
        sequential,
        threaded,
        speedup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid_solution(size: usize, solution: &Solution) {
        assert_eq!(solution.len(), size);
        for (i, &(r1, c1)) in solution.iter().enumerate() {
            assert_eq!(r1, i, "solutions are sorted by row");
            for &(r2, c2) in &solution[i + 1..] {
                assert_ne!(c1, c2, "columns must be distinct");
                assert_ne!(
                    r1.abs_diff(r2),
                    c1.abs_diff(c2),
                    "queens must not share a diagonal"
                );
            }
        }
    }

    #[test]
    fn known_solution_counts() {
        for (size, expected) in [(1, 1), (4, 2), (5, 10), (6, 4), (7, 40), (8, 92)] {
            assert_eq!(solve(size).count(), expected, "size {size}");
        }
    }

    #[test]
    fn unsolvable_sizes_return_empty() {
        assert!(solve(2).solutions.is_empty());
        assert!(solve(3).solutions.is_empty());
    }

    #[test]
    fn zero_board_has_one_empty_solution() {
        let run = solve(0);
        assert_eq!(run.solutions, vec![Vec::new()]);
    }

    #[test]
    fn all_solutions_are_valid_and_distinct() {
        let run = solve(8);
        for solution in &run.solutions {
            assert_valid_solution(8, solution);
        }
        for (i, a) in run.solutions.iter().enumerate() {
            for b in &run.solutions[i + 1..] {
                assert_ne!(a, b, "no duplicate solutions");
            }
        }
    }

    #[test]
    fn solutions_are_in_lexicographic_order() {
        let run = solve(6);
        let columns: Vec<Vec<usize>> = run
            .solutions
            .iter()
            .map(|s| s.iter().map(|&(_, c)| c).collect())
            .collect();
        let mut sorted = columns.clone();
        sorted.sort();
        assert_eq!(columns, sorted);
    }

    #[test]
    fn first_four_queens_solution_matches_textbook_order() {
        let run = solve(4);
        assert_eq!(run.solutions[0], vec![(0, 1), (1, 3), (2, 0), (3, 2)]);
        assert_eq!(run.solutions[1], vec![(0, 2), (1, 0), (2, 3), (3, 1)]);
    }

    #[test]
    fn threaded_run_matches_sequential() {
        let sequential = solve(8);
        let threaded = solve_threaded(8);
        assert_eq!(sequential.solutions, threaded.solutions);
    }

    #[test]
    fn board_size_rejects_negative() {
        assert!(matches!(board_size(-1), Err(SolveError::InvalidInput(_))));
        assert_eq!(board_size(0).unwrap(), 0);
        assert_eq!(board_size(8).unwrap(), 8);
    }

    #[test]
    fn bench_reports_every_round() {
        let report = bench(6, 3);
        assert_eq!(report.rounds.len(), 3);
        assert_eq!(report.solutions_count, 4);
        assert!(report.sequential.min <= report.sequential.average);
        assert!(report.sequential.average <= report.sequential.max);
        assert_eq!(report.rounds[0].round, 1);
    }
}
