use crate::algorithms::Algorithm;
use crate::grid::Position;
use crate::simulation::RunResult;
use std::fmt;

/// Formats a score for display: whole numbers without decimals, everything
/// else with one decimal, non-finite values as `-`.
pub fn format_score(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    if (value - value.round()).abs() < 1e-6 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Text fields for the hovered cell, as shown by a score inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub x: String,
    pub y: String,
    pub g: String,
    pub h: String,
    pub f: String,
    pub weight: String,
}

impl Inspection {
    fn blank(weight: f64) -> Self {
        let dash = || "-".to_string();
        Inspection {
            x: dash(),
            y: dash(),
            g: dash(),
            h: dash(),
            f: dash(),
            weight: format!("{:.1}", weight),
        }
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {})  g={}  h={}  f={}  [f = g + {}*h]",
            self.x, self.y, self.g, self.h, self.f, self.weight
        )
    }
}

/// Looks up the scores of `cell` in an A* run. Other algorithms, and no
/// hovered cell at all, leave every field blank except the weight.
pub fn inspect(result: &RunResult, cell: Option<Position>) -> Inspection {
    let mut inspection = Inspection::blank(result.heuristic_weight);
    let Some(cell) = cell else {
        return inspection;
    };
    if result.algorithm != Algorithm::AStar {
        return inspection;
    }

    inspection.x = cell.x.to_string();
    inspection.y = cell.y.to_string();
    if let Some(scores) = result.scores.get(cell) {
        inspection.g = format_score(scores.g);
        inspection.h = format_score(scores.h);
        inspection.f = format_score(scores.f);
    }
    inspection
}

/// One `g/h/f` line per scored cell.
pub fn render_score_overlay(result: &RunResult) -> String {
    let mut out = String::new();
    for (cell, scores) in result.scores.iter() {
        out.push_str(&format!(
            "{:>8}  g:{:<5} h:{:<5} f:{}\n",
            cell.to_string(),
            format_score(scores.g),
            format_score(scores.h),
            format_score(scores.f)
        ));
    }
    out
}
