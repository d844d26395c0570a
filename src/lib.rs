//! Algorithmic cores for a set of small combinatorial puzzle games.
//!
//! Two independent engines, both pure functions of small inputs:
//!
//! - [`queens`]: exhaustive backtracking search for all N-Queens placements,
//!   optionally re-run on a worker thread for an independent wall-clock
//!   measurement.
//! - [`evaluate`]: grading of a player's travelling-salesman route against a
//!   brute-force optimum, alongside nearest-neighbor, MST, and random-search
//!   baselines.
//!
//! Persistence, HTTP, and UI concerns live in the surrounding game layers;
//! this crate only takes plain data in and hands plain data back.

pub mod error;
pub mod evaluate;
pub mod matrix;
pub mod queens;
pub mod route;

// Re-export main types
pub use error::SolveError;
pub use evaluate::{evaluate, AlgorithmTable, Comparison, EvaluateRequest, NamedRun};
pub use matrix::DistanceMatrix;
pub use queens::{bench, board_size, solve, solve_threaded, BenchReport, QueensRun, Solution};
pub use route::{
    brute_force, mst_prim, nearest_neighbor, random_search, AlgorithmRun, AlgorithmRuns,
};
