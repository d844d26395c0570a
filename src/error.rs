//! Typed validation failures shared by both solver cores.
//!
//! Every error here is raised during input validation, before any search
//! starts. The cores never retry and never partially compute; a caller that
//! gets an `Err` can assume nothing was done.

use thiserror::Error;

/// Validation failure raised at the entry of a solver call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Bad scalar input, e.g. a negative board size.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed distance matrix: non-square, asymmetric, negative entries,
    /// or a size that does not match the city list.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),

    /// Malformed submitted route: unknown or duplicate cities, the home city
    /// appearing mid-route, or an empty selection.
    #[error("invalid route: {0}")]
    InvalidRoute(String),
}
