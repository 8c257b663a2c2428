pub mod a_star;
pub mod bfs;
pub mod common;
pub mod dijkstra;
pub mod frontier;
pub mod path;

use self::a_star::{AStar, GreedyBestFirst};
use self::bfs::BreadthFirst;
use self::common::SearchAlgorithm;
use self::dijkstra::Dijkstra;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tuning knobs for the heuristic searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Multiplier on the heuristic term of A*.
    pub weight: f64,
    /// Extra cost of changing direction, A* only.
    pub turn_penalty: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            weight: 1.0,
            turn_penalty: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    AStar,
    Greedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Greedy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Greedy => "greedy",
        }
    }

    /// Builds the search implementation for this algorithm.
    pub fn searcher(&self, params: SearchParams) -> Box<dyn SearchAlgorithm> {
        match self {
            Algorithm::Bfs => Box::new(BreadthFirst::new()),
            Algorithm::Dijkstra => Box::new(Dijkstra::new()),
            Algorithm::AStar => Box::new(AStar::new(params.weight, params.turn_penalty)),
            Algorithm::Greedy => Box::new(GreedyBestFirst::new()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm '{}', expected one of: bfs, dijkstra, astar, greedy",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a_star" | "a*" => Ok(Algorithm::AStar),
            "greedy" => Ok(Algorithm::Greedy),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("A_STAR".parse::<Algorithm>(), Ok(Algorithm::AStar));
        let err = "jps".parse::<Algorithm>().unwrap_err();
        assert!(err.to_string().contains("jps"));
    }

    #[test]
    fn searcher_names_match() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.searcher(SearchParams::default()).name(), algorithm.name());
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Algorithm::AStar).unwrap(), r#""astar""#);
    }
}
