use grid_search_viz::algorithms::common::EventKind;
use grid_search_viz::algorithms::{Algorithm, SearchParams};
use grid_search_viz::grid::{Grid, Position};
use grid_search_viz::simulation::{run, RunResult, SearchRequest};
use grid_search_viz::statistics::optimal_path_length;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn p(x: usize, y: usize) -> Position {
    Position::new(x, y)
}

fn search(grid: &Grid, algorithm: Algorithm, params: SearchParams) -> RunResult {
    run(&SearchRequest::new(grid.clone(), algorithm, params))
}

fn random_grids(count: u64) -> impl Iterator<Item = Grid> {
    (0..count).map(|seed| {
        let mut grid = Grid::new(15, 11);
        let mut rng = StdRng::seed_from_u64(seed);
        grid.randomize_walls(&mut rng, 0.3);
        grid
    })
}

fn assert_valid_path(grid: &Grid, result: &RunResult) {
    assert_eq!(result.path.first(), Some(&grid.start));
    assert_eq!(result.path.last(), Some(&grid.goal));
    for pair in result.path.windows(2) {
        assert_eq!(pair[0].manhattan(&pair[1]), 1, "{} -> {}", pair[0], pair[1]);
        assert!(grid.is_open(pair[1]));
    }
    assert_eq!(result.path_length, result.path.len() - 1);
}

fn visit_order(result: &RunResult) -> Vec<Position> {
    result
        .events
        .iter()
        .filter(|e| e.kind == EventKind::Visited)
        .map(|e| e.cell)
        .collect()
}

#[test_log::test]
fn open_grid_bfs_path() {
    let grid = Grid::new(5, 5);
    let result = search(&grid, Algorithm::Bfs, SearchParams::default());
    assert_eq!(result.path_length, 8);
    assert_valid_path(&grid, &result);
    for pair in result.path.windows(2) {
        assert!(pair[0].x + pair[0].y <= pair[1].x + pair[1].y);
    }
}

#[test]
fn wall_with_single_gap_forces_route() {
    let mut grid = Grid::new(5, 5);
    for y in [0, 1, 3, 4] {
        grid.set_wall(p(2, y), true);
    }
    for algorithm in Algorithm::ALL {
        let result = search(&grid, algorithm, SearchParams::default());
        assert!(result.path.contains(&p(2, 2)), "{} missed the gap", algorithm);
        assert_valid_path(&grid, &result);
    }
}

#[test]
fn astar_matches_dijkstra_on_open_grid() {
    let grid = Grid::new(5, 5);
    let astar = search(&grid, Algorithm::AStar, SearchParams { weight: 1.0, turn_penalty: 0.0 });
    let dijkstra = search(&grid, Algorithm::Dijkstra, SearchParams::default());
    assert_eq!(astar.path_length, 8);
    assert_eq!(astar.path_length, dijkstra.path_length);
    assert!(astar.nodes_expanded <= dijkstra.nodes_expanded);
}

#[test]
fn bfs_and_dijkstra_agree_on_length() {
    for grid in random_grids(40) {
        let bfs = search(&grid, Algorithm::Bfs, SearchParams::default());
        let dijkstra = search(&grid, Algorithm::Dijkstra, SearchParams::default());
        assert_eq!(bfs.path_length, dijkstra.path_length);
        assert_eq!(bfs.found_path(), dijkstra.found_path());
        if bfs.found_path() {
            assert_eq!(Some(bfs.path_length), optimal_path_length(&grid));
        }
    }
}

#[test]
fn zero_weight_astar_visits_like_dijkstra() {
    let params = SearchParams { weight: 0.0, turn_penalty: 0.0 };
    for grid in random_grids(25) {
        let astar = search(&grid, Algorithm::AStar, params);
        let dijkstra = search(&grid, Algorithm::Dijkstra, params);
        assert_eq!(visit_order(&astar), visit_order(&dijkstra));
        assert_eq!(astar.nodes_expanded, dijkstra.nodes_expanded);
    }
}

#[test]
fn admissible_weights_stay_length_optimal() {
    for grid in random_grids(30) {
        let optimal = optimal_path_length(&grid);
        for weight in [0.0, 0.5, 1.0] {
            let result = search(&grid, Algorithm::AStar, SearchParams { weight, turn_penalty: 0.0 });
            match optimal {
                Some(length) => {
                    assert_eq!(result.path_length, length, "weight {}", weight);
                    assert_valid_path(&grid, &result);
                }
                None => assert!(!result.found_path()),
            }
        }
    }
}

#[test]
fn inflated_weights_never_beat_optimal() {
    for grid in random_grids(30) {
        let result = search(&grid, Algorithm::AStar, SearchParams { weight: 3.0, turn_penalty: 1.0 });
        if let Some(length) = optimal_path_length(&grid) {
            assert!(result.path_length >= length);
            assert_valid_path(&grid, &result);
        }
    }
}

#[test]
fn greedy_finds_a_path_whenever_one_exists() {
    for grid in random_grids(40) {
        let result = search(&grid, Algorithm::Greedy, SearchParams::default());
        match optimal_path_length(&grid) {
            Some(length) => {
                assert_valid_path(&grid, &result);
                assert!(result.path_length >= length);
            }
            None => {
                assert!(!result.found_path());
                assert!(result.nodes_expanded > 0);
            }
        }
    }
}

#[test]
fn blocked_endpoints_short_circuit() {
    let mut grid = Grid::new(6, 6);
    grid.set_wall(grid.start, true);
    let mut goal_blocked = Grid::new(6, 6);
    goal_blocked.set_wall(goal_blocked.goal, true);
    let out_of_bounds = Grid::new(6, 6).with_endpoints(p(0, 0), p(9, 9));

    for blocked in [grid, goal_blocked, out_of_bounds] {
        for algorithm in Algorithm::ALL {
            let result = search(&blocked, algorithm, SearchParams::default());
            assert_eq!(result.nodes_expanded, 0);
            assert!(result.events.is_empty());
            assert_eq!(result.path_length, 0);
            assert!(result.scores.is_empty());
        }
    }
}

#[test]
fn unreachable_goal_is_a_full_result() {
    let grid = Grid::from_ascii(
        "
        S..#...
        ...#...
        ...#..G
        ",
    )
    .unwrap();
    for algorithm in Algorithm::ALL {
        let result = search(&grid, algorithm, SearchParams::default());
        assert_eq!(result.nodes_expanded, 9);
        assert_eq!(result.path_length, 0);
        assert!(result.events.iter().all(|e| e.kind != EventKind::Path));
        assert!(!result.events.is_empty());
    }
}

#[test]
fn repeated_runs_are_identical() {
    let params = SearchParams { weight: 1.5, turn_penalty: 0.5 };
    for grid in random_grids(10) {
        for algorithm in Algorithm::ALL {
            let first = search(&grid, algorithm, params);
            let second = search(&grid, algorithm, params);
            assert_eq!(first.events, second.events);
            assert_eq!(
                serde_json::to_string(&first.events).unwrap(),
                serde_json::to_string(&second.events).unwrap()
            );
            assert_eq!(first.scores, second.scores);
        }
    }
}

#[test]
fn path_events_close_every_successful_run() {
    for grid in random_grids(15) {
        for algorithm in Algorithm::ALL {
            let result = search(&grid, algorithm, SearchParams::default());
            let tail: Vec<Position> = result
                .events
                .iter()
                .skip_while(|e| e.kind != EventKind::Path)
                .map(|e| {
                    assert_eq!(e.kind, EventKind::Path);
                    e.cell
                })
                .collect();
            assert_eq!(tail, result.path);
            assert!(!visit_order(&result).contains(&grid.start));
        }
    }
}
