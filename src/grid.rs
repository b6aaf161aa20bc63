use crate::error::{PlannerError, Result};
use rand::Rng;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// A point in continuous world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub const ORIGIN: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        WorldPoint { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

const CARDINAL: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const ALL_DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Cell>>,
    pub cell_size: f32,
    pub origin: WorldPoint,
    pub connectivity: Connectivity,
}

impl Grid {
    /// A fully traversable grid with unit cells anchored at the world origin.
    pub fn open(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![vec![Cell::Empty; height]; width],
            cell_size: 1.0,
            origin: WorldPoint::ORIGIN,
            connectivity: Connectivity::Four,
        }
    }

    /// Builds a grid from ASCII rows, top row first: `.` is open, `#` is a wall.
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Grid::open(width, height);

        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(PlannerError::GridParse {
                    row: y,
                    column: row_width.min(width),
                    reason: format!("expected {} columns, found {}", width, row_width),
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    '#' => Cell::Wall,
                    other => {
                        return Err(PlannerError::GridParse {
                            row: y,
                            column: x,
                            reason: format!("unknown cell '{}'", other),
                        })
                    }
                };
                grid.cells[x][y] = cell;
            }
        }

        Ok(grid)
    }

    /// Scatters up to `num_walls` walls at random, never on a `protected` cell.
    /// Gives up after `3 * num_walls` attempts, so crowded grids get fewer walls.
    /// Never asks for more walls than there are unprotected cells.
    pub fn random<R: Rng>(
        width: usize,
        height: usize,
        num_walls: usize,
        protected: &[Position],
        rng: &mut R,
    ) -> Self {
        let mut grid = Grid::open(width, height);
        if width == 0 || height == 0 {
            return grid;
        }

        let free_cells = (0..width)
            .flat_map(|x| (0..height).map(move |y| Position { x, y }))
            .filter(|pos| !protected.contains(pos))
            .count();
        let num_walls = num_walls.min(free_cells);
        let max_attempts = num_walls.saturating_mul(3);
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < num_walls && attempts < max_attempts {
            let pos = Position {
                x: rng.gen_range(0..width),
                y: rng.gen_range(0..height),
            };

            if !protected.contains(&pos) && grid.cells[pos.x][pos.y] == Cell::Empty {
                grid.cells[pos.x][pos.y] = Cell::Wall;
                walls_placed += 1;
            }
            attempts += 1;
        }

        grid
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_geometry(mut self, origin: WorldPoint, cell_size: f32) -> Self {
        self.origin = origin;
        self.cell_size = cell_size;
        self
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Out-of-bounds positions are never traversable.
    pub fn is_traversable(&self, pos: Position) -> bool {
        self.contains(pos) && self.cells[pos.x][pos.y] == Cell::Empty
    }

    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        if self.contains(pos) {
            self.cells[pos.x][pos.y] = cell;
        }
    }

    pub fn traversable_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Empty)
            .count()
    }

    /// Resolves a world-space point to the cell containing it.
    pub fn node_at(&self, point: WorldPoint) -> Option<Position> {
        if !(point.x.is_finite() && point.y.is_finite()) || self.cell_size <= 0.0 {
            return None;
        }
        let fx = ((point.x - self.origin.x) / self.cell_size).floor();
        let fy = ((point.y - self.origin.y) / self.cell_size).floor();
        if fx < 0.0 || fy < 0.0 {
            return None;
        }

        let pos = Position {
            x: fx as usize,
            y: fy as usize,
        };
        self.contains(pos).then_some(pos)
    }

    /// World-space centre of a cell.
    pub fn world_position(&self, pos: Position) -> WorldPoint {
        WorldPoint {
            x: self.origin.x + (pos.x as f32 + 0.5) * self.cell_size,
            y: self.origin.y + (pos.y as f32 + 0.5) * self.cell_size,
        }
    }

    /// In-bounds neighbours of `pos` in a fixed order, walls included.
    /// Search strategies filter traversability themselves.
    pub fn neighbors_of(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(8);
        let (x, y) = (pos.x as isize, pos.y as isize);

        let offsets: &[(isize, isize)] = match self.connectivity {
            Connectivity::Four => &CARDINAL,
            Connectivity::Eight => &ALL_DIRECTIONS,
        };

        for (dx, dy) in offsets {
            let nx = x + dx;
            let ny = y + dy;

            if nx >= 0 && nx < self.width as isize && ny >= 0 && ny < self.height as isize {
                neighbors.push(Position {
                    x: nx as usize,
                    y: ny as usize,
                });
            }
        }
        neighbors
    }

    pub fn are_neighbors(&self, a: Position, b: Position) -> bool {
        self.neighbors_of(a).contains(&b)
    }

    /// Text rendering: S=Start, G=Goal, A=Agent, *=Route, #=Wall, .=Empty.
    pub fn render(
        &self,
        start: Position,
        goal: Position,
        agent: Option<Position>,
        route: &[Position],
    ) -> String {
        let mut out = String::new();

        out.push_str("   ");
        for x in 0..self.width {
            let _ = write!(out, "{:2}", x % 10);
        }
        out.push('\n');

        for y in 0..self.height {
            let _ = write!(out, "{:2} ", y);
            for x in 0..self.width {
                let pos = Position { x, y };
                let ch = if Some(pos) == agent {
                    'A'
                } else if pos == start {
                    'S'
                } else if pos == goal {
                    'G'
                } else if route.contains(&pos) {
                    '*'
                } else {
                    match self.cells[x][y] {
                        Cell::Wall => '#',
                        Cell::Empty => '.',
                    }
                };
                out.push(ch);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    pub fn print_grid(
        &self,
        start: Position,
        goal: Position,
        agent: Option<Position>,
        route: &[Position],
    ) {
        println!("Legend: S=Start, G=Goal, A=Agent, *=Route, #=Wall, .=Empty");
        println!("{}", self.render(start, goal, agent, route));
    }
}
