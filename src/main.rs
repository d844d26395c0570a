//! CLI entry point for the game solver cores.
//!
//! Usage:
//!   game-solvers queens [--size <n>] [--threaded]
//!   game-solvers bench [--size <n>] [--rounds <r>]
//!   game-solvers evaluate <request.json> [--seed <s>]
//!   game-solvers evaluate --stdin [--seed <s>]
//!
//! Every command prints a JSON document to stdout. Validation failures and
//! I/O errors go to stderr with exit code 1.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use game_solvers::queens::{self, QueensRun};
use game_solvers::{evaluate, EvaluateRequest, SolveError};

#[derive(Parser)]
#[command(name = "game-solvers")]
#[command(about = "Exhaustive-search and route-evaluation engines for small puzzle games")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find all N-Queens solutions
    Queens {
        /// Board dimension
        #[arg(long, default_value = "8")]
        size: i64,

        /// Also run the identical search on a worker thread and compare
        /// wall-clock times
        #[arg(long)]
        threaded: bool,
    },

    /// Time the sequential and threaded searches over several rounds
    Bench {
        /// Board dimension
        #[arg(long, default_value = "8")]
        size: i64,

        /// Number of rounds
        #[arg(long, default_value = "15")]
        rounds: usize,
    },

    /// Grade a submitted route against the four reference algorithms
    Evaluate {
        /// Path to a request JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the request from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Override the random-search seed from the request
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Per-context timing summary in the comparison output.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContextTiming {
    elapsed_ms: f64,
    count: usize,
}

/// Output of `queens --threaded`: one solution listing plus both timings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueensComparisonOutput {
    solutions_count: usize,
    /// Both contexts must produce the same solutions in the same order.
    identical: bool,
    sequential: ContextTiming,
    threaded: ContextTiming,
    solutions: Vec<game_solvers::Solution>,
}

fn run_queens(size: i64, threaded: bool) -> Result<String, SolveError> {
    let size = queens::board_size(size)?;
    let output = if threaded {
        let sequential = queens::solve(size);
        let threaded_run = queens::solve_threaded(size);
        let output = QueensComparisonOutput {
            solutions_count: sequential.count(),
            identical: sequential.solutions == threaded_run.solutions,
            sequential: ContextTiming {
                elapsed_ms: sequential.elapsed_ms,
                count: sequential.count(),
            },
            threaded: ContextTiming {
                elapsed_ms: threaded_run.elapsed_ms,
                count: threaded_run.count(),
            },
            solutions: sequential.solutions,
        };
        serde_json::to_string_pretty(&output)
    } else {
        let run: QueensRun = queens::solve(size);
        serde_json::to_string_pretty(&run)
    };
    // serialization of plain data cannot fail
    Ok(output.unwrap())
}

fn run_bench(size: i64, rounds: usize) -> Result<String, SolveError> {
    let size = queens::board_size(size)?;
    let report = queens::bench(size, rounds);
    Ok(serde_json::to_string_pretty(&report).unwrap())
}

fn run_evaluate(
    file: Option<PathBuf>,
    stdin: bool,
    seed: Option<u64>,
) -> Result<String, SolveError> {
    let json_content = if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| SolveError::InvalidInput(format!("failed to read stdin: {e}")))?;
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(&path)
            .map_err(|e| SolveError::InvalidInput(format!("failed to read {path:?}: {e}")))?
    } else {
        return Err(SolveError::InvalidInput(
            "must provide either a file path or --stdin".to_string(),
        ));
    };

    let mut request: EvaluateRequest = serde_json::from_str(&json_content)
        .map_err(|e| SolveError::InvalidInput(format!("failed to parse request JSON: {e}")))?;
    if seed.is_some() {
        request.seed = seed;
    }

    let comparison = evaluate(&request)?;
    Ok(serde_json::to_string_pretty(&comparison).unwrap())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Queens { size, threaded } => run_queens(size, threaded),
        Commands::Bench { size, rounds } => run_bench(size, rounds),
        Commands::Evaluate { file, stdin, seed } => run_evaluate(file, stdin, seed),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
