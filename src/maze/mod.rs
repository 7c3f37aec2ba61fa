//! # Maze Grid
//!
//! Grid mazes made of [`Cell::Wall`] and [`Cell::Open`] cells.
//!
//! Generated mazes are *perfect*: the carved cells form a spanning tree over
//! every odd-coordinate cell, so there is exactly one path between any two
//! open cells. Generation always succeeds; dimensions are coerced to odd
//! values of at least 3.
//!
//! ```
//! use atelier::maze::Maze;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let maze = Maze::generate_with_rng(10, 12, &mut rng);
//! assert_eq!((maze.rows(), maze.cols()), (11, 13));
//! assert_eq!(maze.open_region_count(), 1);
//! ```

mod generator;
mod parse;

pub use parse::MazeError;

use std::collections::VecDeque;
use std::fmt;

/// Grid coordinate as `(row, col)`.
pub type CellPos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
}

impl Cell {
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    entrance: CellPos,
    exit: CellPos,
}

/// Rounds a requested dimension up to the nearest odd value that is at least 3.
pub fn coerce_dimension(n: usize) -> usize {
    let n = n.max(3);
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Maze {
    /// Solid grid with no openings; generation and parsing start from here.
    pub(crate) fn filled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Wall; rows * cols],
            entrance: (0, 0),
            exit: (0, 0),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn entrance(&self) -> CellPos {
        self.entrance
    }

    pub fn exit(&self) -> CellPos {
        self.exit
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Out-of-bounds cells count as walls.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(Cell::is_open)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), MazeError> {
        let i = self.index(row, col).ok_or(MazeError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })?;
        self.cells[i] = cell;
        Ok(())
    }

    pub(crate) fn open(&mut self, row: usize, col: usize) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = Cell::Open;
        }
    }

    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Row-major iterator over `((row, col), cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i / self.cols, i % self.cols), c))
    }

    fn open_neighbours(&self, (row, col): CellPos) -> impl Iterator<Item = CellPos> + '_ {
        NEIGHBOURS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.is_open(r, c).then_some((r, c))
        })
    }

    /// BFS over open cells; `prev[i]` holds the predecessor of each reached cell.
    fn bfs(&self, start: CellPos) -> Vec<Option<CellPos>> {
        let mut prev = vec![None; self.cells.len()];
        let Some(si) = self.index(start.0, start.1) else {
            return prev;
        };
        if !self.cells[si].is_open() {
            return prev;
        }
        prev[si] = Some(start);
        let mut queue = VecDeque::from([start]);
        while let Some(cur) = queue.pop_front() {
            for next in self.open_neighbours(cur) {
                let ni = next.0 * self.cols + next.1;
                if prev[ni].is_none() {
                    prev[ni] = Some(cur);
                    queue.push_back(next);
                }
            }
        }
        prev
    }

    /// Every open cell reachable from `start`, in row-major order.
    pub fn reachable_from(&self, start: CellPos) -> Vec<CellPos> {
        self.bfs(start)
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_some())
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    /// Number of 4-connected components of open cells.
    pub fn open_region_count(&self) -> usize {
        let mut seen = vec![false; self.cells.len()];
        let mut regions = 0;
        for (i, cell) in self.cells.iter().enumerate() {
            if !cell.is_open() || seen[i] {
                continue;
            }
            regions += 1;
            for (r, c) in self.reachable_from((i / self.cols, i % self.cols)) {
                seen[r * self.cols + c] = true;
            }
        }
        regions
    }

    /// Shortest open path from `from` to `to`, both ends included.
    pub fn shortest_path(&self, from: CellPos, to: CellPos) -> Option<Vec<CellPos>> {
        let ti = self.index(to.0, to.1)?;
        let prev = self.bfs(from);
        prev[ti]?;
        let mut path = vec![to];
        let mut cur = to;
        while cur != from {
            cur = prev[cur.0 * self.cols + cur.1]?;
            path.push(cur);
        }
        path.reverse();
        Some(path)
    }

    pub fn solution(&self) -> Option<Vec<CellPos>> {
        self.shortest_path(self.entrance, self.exit)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                f.write_str(if cell.is_open() { " " } else { "#" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_coerce_dimension() {
        assert_eq!(coerce_dimension(0), 3);
        assert_eq!(coerce_dimension(2), 3);
        assert_eq!(coerce_dimension(3), 3);
        assert_eq!(coerce_dimension(4), 5);
        assert_eq!(coerce_dimension(25), 25);
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut maze = Maze::filled(3, 3);
        assert!(maze.set_cell(1, 1, Cell::Open).is_ok());
        assert!(maze.is_open(1, 1));
        let err = maze.set_cell(3, 0, Cell::Open).unwrap_err();
        assert!(matches!(err, MazeError::OutOfBounds { row: 3, col: 0, .. }));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let maze = Maze::filled(3, 3);
        assert!(!maze.is_open(10, 10));
        assert_eq!(maze.cell(10, 0), None);
    }

    #[test]
    fn test_display_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let maze = Maze::generate_with_rng(5, 7, &mut rng);
        let text = maze.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 7));
    }

    #[test]
    fn test_solution_connects_entrance_and_exit() {
        let mut rng = StdRng::seed_from_u64(99);
        let maze = Maze::generate_with_rng(15, 15, &mut rng);
        let path = maze.solution().expect("entrance and exit are connected");
        assert_eq!(path.first(), Some(&maze.entrance()));
        assert_eq!(path.last(), Some(&maze.exit()));
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
            assert!(maze.is_open(b.0, b.1));
        }
    }

    #[test]
    fn test_shortest_path_to_wall_is_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let maze = Maze::generate_with_rng(7, 7, &mut rng);
        assert!(maze.shortest_path((1, 1), (0, 0)).is_none());
    }

    #[test]
    fn test_region_count_with_isolated_cell() {
        let mut maze = Maze::filled(5, 5);
        maze.open(1, 1);
        maze.open(1, 2);
        maze.open(3, 3);
        assert_eq!(maze.open_region_count(), 2);
        assert_eq!(maze.reachable_from((1, 1)).len(), 2);
    }
}
