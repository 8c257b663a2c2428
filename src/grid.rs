use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Cell one step away in `direction`, or `None` when that would leave
    /// the non-negative quadrant.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Cardinal directions in neighbor enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridParseError {
    Empty,
    RaggedRow { row: usize, expected: usize, found: usize },
    UnknownSymbol { symbol: char, x: usize, y: usize },
    MissingStart,
    MissingGoal,
    DuplicateStart { x: usize, y: usize },
    DuplicateGoal { x: usize, y: usize },
}

impl fmt::Display for GridParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridParseError::Empty => write!(f, "grid layout has no rows"),
            GridParseError::RaggedRow { row, expected, found } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            GridParseError::UnknownSymbol { symbol, x, y } => {
                write!(f, "unknown symbol '{}' at ({},{})", symbol, x, y)
            }
            GridParseError::MissingStart => write!(f, "grid layout has no 'S' cell"),
            GridParseError::MissingGoal => write!(f, "grid layout has no 'G' cell"),
            GridParseError::DuplicateStart { x, y } => {
                write!(f, "second 'S' cell at ({},{})", x, y)
            }
            GridParseError::DuplicateGoal { x, y } => {
                write!(f, "second 'G' cell at ({},{})", x, y)
            }
        }
    }
}

impl std::error::Error for GridParseError {}

/// Rectangular occupancy grid with its start and goal cells.
///
/// Cells are stored row-major, so `(x, y)` lives at `y * cols + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<Cell>,
    pub start: Position,
    pub goal: Position,
}

impl Grid {
    /// An all-open grid with the start in the top-left corner and the goal
    /// in the bottom-right one.
    pub fn new(cols: usize, rows: usize) -> Self {
        Grid {
            cols,
            rows,
            cells: vec![Cell::Empty; cols * rows],
            start: Position::new(0, 0),
            goal: Position::new(cols.saturating_sub(1), rows.saturating_sub(1)),
        }
    }

    pub fn with_endpoints(mut self, start: Position, goal: Position) -> Self {
        self.start = start;
        self.goal = goal;
        self
    }

    /// Parses a layout where `#` is a wall, `.` is open, `S` marks the start
    /// and `G` marks the goal. Each marker must appear exactly once. Blank lines and surrounding whitespace are
    /// ignored.
    pub fn from_ascii(layout: &str) -> Result<Self, GridParseError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let cols = lines.first().ok_or(GridParseError::Empty)?.chars().count();
        let rows = lines.len();

        let mut cells = Vec::with_capacity(cols * rows);
        let mut start = None;
        let mut goal = None;
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridParseError::RaggedRow { row: y, expected: cols, found });
            }
            for (x, symbol) in line.chars().enumerate() {
                let cell = match symbol {
                    '#' => Cell::Wall,
                    '.' => Cell::Empty,
                    'S' => {
                        if start.replace(Position::new(x, y)).is_some() {
                            return Err(GridParseError::DuplicateStart { x, y });
                        }
                        Cell::Empty
                    }
                    'G' => {
                        if goal.replace(Position::new(x, y)).is_some() {
                            return Err(GridParseError::DuplicateGoal { x, y });
                        }
                        Cell::Empty
                    }
                    _ => return Err(GridParseError::UnknownSymbol { symbol, x, y }),
                };
                cells.push(cell);
            }
        }

        Ok(Grid {
            cols,
            rows,
            cells,
            start: start.ok_or(GridParseError::MissingStart)?,
            goal: goal.ok_or(GridParseError::MissingGoal)?,
        })
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// Out-of-bounds cells are reported as not traversable.
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Empty)
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.y * self.cols + pos.x])
        } else {
            None
        }
    }

    /// Marks a cell as wall or open. Out-of-bounds writes are ignored.
    ///
    /// This does not protect the endpoints; editors should use [`Grid::paint`].
    pub fn set_wall(&mut self, pos: Position, wall: bool) {
        if self.in_bounds(pos) {
            self.cells[pos.y * self.cols + pos.x] = if wall { Cell::Wall } else { Cell::Empty };
        }
    }

    /// Draws (`wall = true`) or erases a wall. The start and goal cannot be
    /// painted over. Returns whether the cell changed.
    pub fn paint(&mut self, pos: Position, wall: bool) -> bool {
        if pos == self.start || pos == self.goal {
            return false;
        }
        let before = self.cell(pos);
        self.set_wall(pos, wall);
        before.is_some() && before != self.cell(pos)
    }

    /// Moves the start onto an open cell other than the goal.
    pub fn move_start(&mut self, pos: Position) -> bool {
        if !self.is_open(pos) || pos == self.goal {
            return false;
        }
        self.start = pos;
        true
    }

    /// Moves the goal onto an open cell other than the start.
    pub fn move_goal(&mut self, pos: Position) -> bool {
        if !self.is_open(pos) || pos == self.start {
            return false;
        }
        self.goal = pos;
        true
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Wall).count()
    }

    pub fn clear_walls(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Replaces the grid with an empty one of the new size, pulling the start
    /// and goal back inside the bounds.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::Empty; cols * rows];
        for pos in [&mut self.start, &mut self.goal] {
            pos.x = pos.x.min(cols.saturating_sub(1));
            pos.y = pos.y.min(rows.saturating_sub(1));
        }
    }

    /// Turns each cell into a wall with probability `density`, leaving the
    /// start and goal open.
    pub fn randomize_walls<R: Rng>(&mut self, rng: &mut R, density: f64) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let pos = Position::new(x, y);
                let wall = pos != self.start && pos != self.goal && rng.gen::<f64>() < density;
                self.set_wall(pos, wall);
            }
        }
    }

    /// Open, in-bounds orthogonal neighbors in East, South, West, North order,
    /// each tagged with the direction taken to reach it.
    pub fn neighbors(&self, pos: Position) -> Vec<(Position, Direction)> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                let next = pos.step(direction)?;
                self.is_open(next).then_some((next, direction))
            })
            .collect()
    }

    /// Renders the grid as text. `mark` can override the symbol of any cell
    /// that is not the start or goal.
    pub fn render<F>(&self, mark: F) -> String
    where
        F: Fn(Position) -> Option<char>,
    {
        let mut out = String::new();
        out.push_str("Legend: S=Start, G=Goal, #=Wall, .=Empty, o=Frontier, *=Visited, @=Path\n");

        out.push_str("   ");
        for x in 0..self.cols {
            out.push_str(&format!("{:2}", x % 10));
        }
        out.push('\n');

        for y in 0..self.rows {
            out.push_str(&format!("{:2} ", y));
            for x in 0..self.cols {
                let pos = Position { x, y };
                let symbol = if pos == self.start {
                    'S'
                } else if pos == self.goal {
                    'G'
                } else if let Some(symbol) = mark(pos) {
                    symbol
                } else {
                    match self.cell(pos) {
                        Some(Cell::Wall) => '#',
                        _ => '.',
                    }
                };
                out.push(symbol);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
