//! Route grading: compare a player's submitted tour against the four
//! reference algorithms.
//!
//! All request validation happens up front; the algorithms only ever see a
//! checked matrix and a checked selection. The verdict is distance-based:
//! a submitted tour is correct iff its total distance equals the brute-force
//! optimum, so any optimal tour passes, not just the one the brute force
//! happened to enumerate first.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::matrix::DistanceMatrix;
use crate::route::{self, AlgorithmRun};

/// Largest selection the evaluator accepts, keeping brute force tractable.
pub const MAX_SELECTED_CITIES: usize = 8;

/// A grading request as submitted by the surrounding game layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub cities: Vec<String>,
    pub home_city: String,
    pub distance_matrix: Vec<Vec<i64>>,
    /// Cities to visit between leaving and returning home, in order.
    pub submitted_route: Vec<String>,
    /// Seed for the random-search RNG; omitted means seed from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// One algorithm's result with city indices resolved back to names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRun {
    pub route: Vec<String>,
    pub distance: i64,
    pub elapsed_ms: f64,
}

/// All four algorithm results, keyed by algorithm name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmTable {
    pub bruteforce: NamedRun,
    pub nearest_neighbor: NamedRun,
    pub mst_prim: NamedRun,
    pub random_search: NamedRun,
}

/// Full comparison: verdict, the player's tour, the optimum, and every
/// algorithm's result, so a caller can render the whole table without
/// recomputing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub correct: bool,
    pub your_route: Vec<String>,
    pub your_distance: i64,
    pub optimal_route: Vec<String>,
    pub optimal_distance: i64,
    pub algorithms: AlgorithmTable,
}

fn city_index(cities: &[String], name: &str) -> Result<usize, SolveError> {
    cities
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| SolveError::InvalidRoute(format!("unknown city {name:?}")))
}

fn name_route(cities: &[String], route: &[usize]) -> Vec<String> {
    route.iter().map(|&i| cities[i].clone()).collect()
}

fn name_run(cities: &[String], run: AlgorithmRun) -> NamedRun {
    NamedRun {
        route: name_route(cities, &run.route),
        distance: run.distance,
        elapsed_ms: run.elapsed_ms,
    }
}

fn validate(request: &EvaluateRequest) -> Result<(DistanceMatrix, usize, Vec<usize>), SolveError> {
    let cities = &request.cities;
    if cities.is_empty() {
        return Err(SolveError::InvalidInput("city list is empty".to_string()));
    }
    for (i, name) in cities.iter().enumerate() {
        if cities[..i].contains(name) {
            return Err(SolveError::InvalidInput(format!(
                "duplicate city {name:?} in city list"
            )));
        }
    }

    let matrix = DistanceMatrix::new(request.distance_matrix.clone())?;
    if matrix.len() != cities.len() {
        return Err(SolveError::InvalidMatrix(format!(
            "matrix is {}x{} but there are {} cities",
            matrix.len(),
            matrix.len(),
            cities.len()
        )));
    }

    let home = city_index(cities, &request.home_city)?;

    if request.submitted_route.is_empty() {
        return Err(SolveError::InvalidRoute(
            "submitted route must visit at least one city".to_string(),
        ));
    }
    if request.submitted_route.len() > MAX_SELECTED_CITIES {
        return Err(SolveError::InvalidRoute(format!(
            "submitted route visits {} cities, at most {MAX_SELECTED_CITIES} are supported",
            request.submitted_route.len()
        )));
    }
    let mut selected = Vec::with_capacity(request.submitted_route.len());
    for name in &request.submitted_route {
        let index = city_index(cities, name)?;
        if index == home {
            return Err(SolveError::InvalidRoute(format!(
                "home city {name:?} must not appear mid-route"
            )));
        }
        if selected.contains(&index) {
            return Err(SolveError::InvalidRoute(format!(
                "duplicate city {name:?} in submitted route"
            )));
        }
        selected.push(index);
    }

    Ok((matrix, home, selected))
}

/// Grade a submitted route and compare all four algorithms on the same
/// round.
///
/// The submitted route lists the cities between the implicit home endpoints,
/// in visiting order. Validation is all-or-nothing; nothing is computed for
/// a malformed request.
pub fn evaluate(request: &EvaluateRequest) -> Result<Comparison, SolveError> {
    let (matrix, home, selected) = validate(request)?;

    let mut rng = match request.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let runs = route::run_all(home, &selected, &matrix, &mut rng);

    let mut your_route = Vec::with_capacity(selected.len() + 2);
    your_route.push(home);
    your_route.extend_from_slice(&selected);
    your_route.push(home);
    let your_distance = matrix.route_distance(&your_route);

    let optimal_distance = runs.bruteforce.distance;
    let correct = your_distance == optimal_distance;

    let cities = &request.cities;
    Ok(Comparison {
        correct,
        your_route: name_route(cities, &your_route),
        your_distance,
        optimal_route: name_route(cities, &runs.bruteforce.route),
        optimal_distance,
        algorithms: AlgorithmTable {
            bruteforce: name_run(cities, runs.bruteforce),
            nearest_neighbor: name_run(cities, runs.nearest_neighbor),
            mst_prim: name_run(cities, runs.mst_prim),
            random_search: name_run(cities, runs.random_search),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<String> {
        ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect()
    }

    fn matrix() -> Vec<Vec<i64>> {
        vec![
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ]
    }

    fn request(submitted: &[&str]) -> EvaluateRequest {
        EvaluateRequest {
            cities: cities(),
            home_city: "A".to_string(),
            distance_matrix: matrix(),
            submitted_route: submitted.iter().map(|s| s.to_string()).collect(),
            seed: Some(1),
        }
    }

    #[test]
    fn optimal_submission_is_correct() {
        let comparison = evaluate(&request(&["B", "D", "C"])).unwrap();
        assert!(comparison.correct);
        assert_eq!(comparison.your_distance, 80);
        assert_eq!(comparison.optimal_distance, 80);
        assert_eq!(comparison.optimal_route, vec!["A", "B", "D", "C", "A"]);
    }

    #[test]
    fn reversed_optimal_tour_is_still_correct() {
        // Same cycle walked the other way; equal distance must grade as
        // correct even though the route differs from the brute-force one.
        let comparison = evaluate(&request(&["C", "D", "B"])).unwrap();
        assert!(comparison.correct);
        assert_eq!(comparison.your_route, vec!["A", "C", "D", "B", "A"]);
    }

    #[test]
    fn suboptimal_submission_is_incorrect_with_both_distances() {
        let comparison = evaluate(&request(&["B", "C", "D"])).unwrap();
        assert!(!comparison.correct);
        assert_eq!(comparison.your_distance, 95);
        assert_eq!(comparison.optimal_distance, 80);
    }

    #[test]
    fn algorithm_table_covers_all_four() {
        let comparison = evaluate(&request(&["B", "D", "C"])).unwrap();
        let table = &comparison.algorithms;
        assert_eq!(table.bruteforce.distance, 80);
        assert!(table.nearest_neighbor.distance >= 80);
        assert!(table.mst_prim.distance >= 80);
        assert!(table.random_search.distance >= 80);
        for run in [
            &table.bruteforce,
            &table.nearest_neighbor,
            &table.mst_prim,
            &table.random_search,
        ] {
            assert_eq!(run.route.first().map(String::as_str), Some("A"));
            assert_eq!(run.route.last().map(String::as_str), Some("A"));
            assert_eq!(run.route.len(), 5);
        }
    }

    #[test]
    fn rejects_unknown_city_in_route() {
        let err = evaluate(&request(&["B", "X"])).unwrap_err();
        assert!(matches!(err, SolveError::InvalidRoute(_)));
    }

    #[test]
    fn rejects_duplicate_city_in_route() {
        let err = evaluate(&request(&["B", "B"])).unwrap_err();
        assert!(matches!(err, SolveError::InvalidRoute(_)));
    }

    #[test]
    fn rejects_home_city_mid_route() {
        let err = evaluate(&request(&["B", "A"])).unwrap_err();
        assert!(matches!(err, SolveError::InvalidRoute(_)));
    }

    #[test]
    fn rejects_empty_route() {
        let err = evaluate(&request(&[])).unwrap_err();
        assert!(matches!(err, SolveError::InvalidRoute(_)));
    }

    #[test]
    fn rejects_unknown_home_city() {
        let mut req = request(&["B", "C"]);
        req.home_city = "Z".to_string();
        let err = evaluate(&req).unwrap_err();
        assert!(matches!(err, SolveError::InvalidRoute(_)));
    }

    #[test]
    fn rejects_matrix_not_matching_city_count() {
        let mut req = request(&["B", "C"]);
        req.distance_matrix = vec![vec![0, 1], vec![1, 0]];
        let err = evaluate(&req).unwrap_err();
        assert!(matches!(err, SolveError::InvalidMatrix(_)));
    }

    #[test]
    fn rejects_asymmetric_matrix() {
        let mut req = request(&["B", "C"]);
        req.distance_matrix[1][2] = 99;
        let err = evaluate(&req).unwrap_err();
        assert!(matches!(err, SolveError::InvalidMatrix(_)));
    }

    #[test]
    fn rejects_duplicate_city_names() {
        let mut req = request(&["B", "C"]);
        req.cities[3] = "A".to_string();
        let err = evaluate(&req).unwrap_err();
        assert!(matches!(err, SolveError::InvalidInput(_)));
    }

    #[test]
    fn rejects_oversized_selection() {
        let names: Vec<String> = (0..12).map(|i| format!("C{i}")).collect();
        let mut cells = vec![vec![0i64; 12]; 12];
        for i in 0..12 {
            for j in (i + 1)..12 {
                cells[i][j] = 5;
                cells[j][i] = 5;
            }
        }
        let req = EvaluateRequest {
            cities: names.clone(),
            home_city: names[0].clone(),
            distance_matrix: cells,
            submitted_route: names[1..11].to_vec(),
            seed: Some(0),
        };
        let err = evaluate(&req).unwrap_err();
        assert!(matches!(err, SolveError::InvalidRoute(_)));
    }

    #[test]
    fn request_json_round_trips_documented_field_names() {
        let json = r#"{
            "cities": ["A", "B"],
            "homeCity": "A",
            "distanceMatrix": [[0, 4], [4, 0]],
            "submittedRoute": ["B"],
            "seed": 7
        }"#;
        let req: EvaluateRequest = serde_json::from_str(json).unwrap();
        let comparison = evaluate(&req).unwrap();
        assert!(comparison.correct);
        let value = serde_json::to_value(&comparison).unwrap();
        assert!(value.get("yourDistance").is_some());
        assert!(value.get("optimalRoute").is_some());
        let table = value.get("algorithms").unwrap();
        for key in ["bruteforce", "nearest_neighbor", "mst_prim", "random_search"] {
            assert!(table.get(key).unwrap().get("elapsedMs").is_some());
        }
    }
}
