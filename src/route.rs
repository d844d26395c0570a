//! Tour construction over a distance matrix.
//!
//! Four algorithms with very different cost/quality trade-offs, run side by
//! side so a round can be graded against the true optimum and the player can
//! see how each approach fared. All four return a closed tour
//! `home .. home` over the same selected cities, with the wall-clock time
//! measured around just that algorithm's search.

use std::time::Instant;

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::matrix::DistanceMatrix;

/// Selections above this size fall back from exhaustive enumeration to
/// random sampling in [`random_search`].
pub const RANDOM_SEARCH_EXHAUSTIVE_LIMIT: usize = 7;

/// Number of random permutations drawn when sampling.
pub const RANDOM_SEARCH_ITERATIONS: usize = 2000;

/// One algorithm's answer: the tour it built, the tour's total distance,
/// and how long the construction took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmRun {
    pub route: Vec<usize>,
    pub distance: i64,
    pub elapsed_ms: f64,
}

/// Results of all four algorithms for one round, keyed the way callers
/// display them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRuns {
    pub bruteforce: AlgorithmRun,
    pub nearest_neighbor: AlgorithmRun,
    pub mst_prim: AlgorithmRun,
    pub random_search: AlgorithmRun,
}

fn closed_tour(home: usize, between: &[usize]) -> Vec<usize> {
    let mut route = Vec::with_capacity(between.len() + 2);
    route.push(home);
    route.extend_from_slice(between);
    route.push(home);
    route
}

fn finish(start: Instant, route: Vec<usize>, matrix: &DistanceMatrix) -> AlgorithmRun {
    let distance = matrix.route_distance(&route);
    AlgorithmRun {
        route,
        distance,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

/// Exact search: try every permutation of the selected cities.
///
/// Globally optimal; the first permutation reaching the minimum wins, so the
/// result is stable for a given input order. Exponential in the selection
/// size, which the evaluator caps.
pub fn brute_force(home: usize, selected: &[usize], matrix: &DistanceMatrix) -> AlgorithmRun {
    let start = Instant::now();
    let mut best_route = closed_tour(home, selected);
    let mut best_distance = matrix.route_distance(&best_route);
    for perm in selected.iter().copied().permutations(selected.len()) {
        let route = closed_tour(home, &perm);
        let distance = matrix.route_distance(&route);
        if distance < best_distance {
            best_distance = distance;
            best_route = route;
        }
    }
    finish(start, best_route, matrix)
}

/// Greedy heuristic: always travel to the closest unvisited city.
///
/// Ties go to the lowest city index. Fast, no optimality guarantee.
pub fn nearest_neighbor(home: usize, selected: &[usize], matrix: &DistanceMatrix) -> AlgorithmRun {
    let start = Instant::now();
    let mut unvisited: Vec<usize> = selected.to_vec();
    unvisited.sort_unstable();
    let mut between = Vec::with_capacity(selected.len());
    let mut current = home;
    while !unvisited.is_empty() {
        let mut best = 0;
        for (i, &city) in unvisited.iter().enumerate() {
            if matrix.distance(current, city) < matrix.distance(current, unvisited[best]) {
                best = i;
            }
        }
        current = unvisited.remove(best);
        between.push(current);
    }
    finish(start, closed_tour(home, &between), matrix)
}

/// MST heuristic: build a minimum spanning tree with Prim's algorithm, then
/// read the tour off a preorder walk of the tree.
///
/// Prim starts from home; the candidate scan visits tree vertices in
/// insertion order and outside vertices in ascending index with a strict
/// comparison, so equal-weight edges resolve to the earliest tree vertex and
/// lowest outside index. The walk visits children in the order their edges
/// entered the tree, then closes back to home. Feasible but not necessarily
/// optimal.
pub fn mst_prim(home: usize, selected: &[usize], matrix: &DistanceMatrix) -> AlgorithmRun {
    let start = Instant::now();

    let mut outside: Vec<usize> = selected.to_vec();
    outside.sort_unstable();
    let mut tree: Vec<usize> = vec![home];
    // children[i] lists the vertices attached under tree[i], in edge order
    let mut children: Vec<Vec<usize>> = vec![Vec::new()];

    while !outside.is_empty() {
        let mut best: Option<(usize, usize, i64)> = None;
        for (tree_pos, &u) in tree.iter().enumerate() {
            for (out_pos, &v) in outside.iter().enumerate() {
                let w = matrix.distance(u, v);
                if best.map_or(true, |(_, _, bw)| w < bw) {
                    best = Some((tree_pos, out_pos, w));
                }
            }
        }
        // outside is non-empty, so a cheapest edge always exists
        let (tree_pos, out_pos, _) = best.unwrap();
        let v = outside.remove(out_pos);
        children[tree_pos].push(v);
        tree.push(v);
        children.push(Vec::new());
    }

    let mut between = Vec::with_capacity(selected.len());
    preorder(0, &tree, &children, &mut between);
    // drop the home vertex the walk starts with
    between.remove(0);
    finish(start, closed_tour(home, &between), matrix)
}

fn preorder(pos: usize, tree: &[usize], children: &[Vec<usize>], out: &mut Vec<usize>) {
    out.push(tree[pos]);
    for &child in &children[pos] {
        let child_pos = tree.iter().position(|&v| v == child).unwrap();
        preorder(child_pos, tree, children, out);
    }
}

/// Monte Carlo search: evaluate random permutations and keep the best.
///
/// Small selections are enumerated exhaustively instead, which also makes
/// the result exact there; above [`RANDOM_SEARCH_EXHAUSTIVE_LIMIT`] cities,
/// [`RANDOM_SEARCH_ITERATIONS`] shuffles are drawn from the caller's RNG,
/// so a fixed seed reproduces the run.
pub fn random_search(
    home: usize,
    selected: &[usize],
    matrix: &DistanceMatrix,
    rng: &mut SmallRng,
) -> AlgorithmRun {
    let start = Instant::now();
    let mut best_route = closed_tour(home, selected);
    let mut best_distance = matrix.route_distance(&best_route);

    let mut consider = |between: &[usize], matrix: &DistanceMatrix| {
        let route = closed_tour(home, between);
        let distance = matrix.route_distance(&route);
        if distance < best_distance {
            best_distance = distance;
            best_route = route;
        }
    };

    if selected.len() <= RANDOM_SEARCH_EXHAUSTIVE_LIMIT {
        for perm in selected.iter().copied().permutations(selected.len()) {
            consider(&perm, matrix);
        }
    } else {
        let mut perm: Vec<usize> = selected.to_vec();
        for _ in 0..RANDOM_SEARCH_ITERATIONS {
            perm.shuffle(rng);
            consider(&perm, matrix);
        }
    }

    finish(start, best_route, matrix)
}

/// Run all four algorithms over the same selection.
pub fn run_all(
    home: usize,
    selected: &[usize],
    matrix: &DistanceMatrix,
    rng: &mut SmallRng,
) -> AlgorithmRuns {
    AlgorithmRuns {
        bruteforce: brute_force(home, selected, matrix),
        nearest_neighbor: nearest_neighbor(home, selected, matrix),
        mst_prim: mst_prim(home, selected, matrix),
        random_search: random_search(home, selected, matrix, rng),
    }
}
