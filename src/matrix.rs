//! Symmetric distance matrix over a set of cities.
//!
//! Validated once at construction; every algorithm downstream treats it as
//! immutable trusted input.

use rand::{rngs::SmallRng, Rng};

use crate::error::SolveError;

/// A validated symmetric matrix of non-negative integer distances with a
/// zero diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    cells: Vec<Vec<i64>>,
}

impl DistanceMatrix {
    /// Validate raw cells into a matrix.
    ///
    /// Rejects empty, non-square, asymmetric input, negative entries, and a
    /// non-zero diagonal. All-or-nothing: no partially validated matrix is
    /// ever observable.
    pub fn new(cells: Vec<Vec<i64>>) -> Result<Self, SolveError> {
        let n = cells.len();
        if n == 0 {
            return Err(SolveError::InvalidMatrix("matrix is empty".to_string()));
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != n {
                return Err(SolveError::InvalidMatrix(format!(
                    "matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
        }
        for i in 0..n {
            if cells[i][i] != 0 {
                return Err(SolveError::InvalidMatrix(format!(
                    "diagonal entry ({i},{i}) must be 0, got {}",
                    cells[i][i]
                )));
            }
            for j in 0..n {
                if cells[i][j] < 0 {
                    return Err(SolveError::InvalidMatrix(format!(
                        "entry ({i},{j}) is negative: {}",
                        cells[i][j]
                    )));
                }
                if cells[i][j] != cells[j][i] {
                    return Err(SolveError::InvalidMatrix(format!(
                        "matrix is asymmetric at ({i},{j}): {} != {}",
                        cells[i][j], cells[j][i]
                    )));
                }
            }
        }
        Ok(Self { cells })
    }

    /// Generate a random symmetric matrix with distances in `low..=high`.
    ///
    /// One fresh matrix per game round; the seeded RNG makes rounds
    /// reproducible in tests.
    pub fn random(n: usize, low: i64, high: i64, rng: &mut SmallRng) -> Self {
        let mut cells = vec![vec![0i64; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = rng.gen_range(low..=high);
                cells[i][j] = d;
                cells[j][i] = d;
            }
        }
        Self { cells }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Distance between two cities. Panics on out-of-range indices, which
    /// validation upstream has already ruled out.
    pub fn distance(&self, from: usize, to: usize) -> i64 {
        self.cells[from][to]
    }

    /// Total distance along a route, summing consecutive legs. The route is
    /// taken as given: a closed tour must already include the final leg home.
    pub fn route_distance(&self, route: &[usize]) -> i64 {
        route.windows(2).map(|leg| self.distance(leg[0], leg[1])).sum()
    }
}
