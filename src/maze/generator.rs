//! Randomized depth-first backtracking.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{coerce_dimension, Maze};

/// Two-cell steps between lattice cells; the skipped cell is the wall carved.
const STEPS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// One level of the backtracking walk: a cell and its remaining directions.
struct Frame {
    row: usize,
    col: usize,
    dirs: [(isize, isize); 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(row: usize, col: usize, rng: &mut R) -> Self {
        let mut dirs = STEPS;
        dirs.shuffle(rng);
        Self {
            row,
            col,
            dirs,
            next: 0,
        }
    }
}

impl Maze {
    /// Generates a maze using the thread-local RNG.
    pub fn generate(rows: usize, cols: usize) -> Self {
        Self::generate_with_rng(rows, cols, &mut rand::rng())
    }

    /// Generates a perfect maze of at least `rows x cols` cells.
    ///
    /// Dimensions are coerced to odd values of at least 3. Carving starts at
    /// `(1, 1)`; afterwards `(1, 0)` is opened as the entrance and
    /// `(rows - 2, cols - 1)` as the exit.
    pub fn generate_with_rng<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let rows = coerce_dimension(rows);
        let cols = coerce_dimension(cols);
        let mut maze = Maze::filled(rows, cols);

        maze.open(1, 1);
        let mut stack = vec![Frame::new(1, 1, rng)];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            if frame.next >= frame.dirs.len() {
                stack.pop();
                continue;
            }
            let (dr, dc) = frame.dirs[frame.next];
            frame.next += 1;
            let (row, col) = (frame.row, frame.col);

            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            // Stay strictly inside the outer wall ring
            if nr == 0 || nr >= rows - 1 || nc == 0 || nc >= cols - 1 {
                continue;
            }
            if maze.is_open(nr, nc) {
                continue;
            }

            let mid_r = row.wrapping_add_signed(dr / 2);
            let mid_c = col.wrapping_add_signed(dc / 2);
            maze.open(mid_r, mid_c);
            maze.open(nr, nc);
            stack.push(Frame::new(nr, nc, rng));
        }

        maze.entrance = (1, 0);
        maze.exit = (rows - 2, cols - 1);
        maze.open(maze.entrance.0, maze.entrance.1);
        maze.open(maze.exit.0, maze.exit.1);

        debug!(
            "generated {}x{} maze with {} open cells",
            rows,
            cols,
            maze.open_cell_count()
        );
        maze
    }
}

#[cfg(test)]
mod tests {
    use super::super::Cell;
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn lattice_cells(maze: &Maze) -> usize {
        ((maze.rows() - 1) / 2) * ((maze.cols() - 1) / 2)
    }

    #[test]
    fn test_dimensions_are_odd_and_at_least_three() {
        let mut rng = StdRng::seed_from_u64(0);
        for (r, c) in [(0, 0), (1, 2), (3, 3), (4, 6), (10, 11), (24, 25)] {
            let maze = Maze::generate_with_rng(r, c, &mut rng);
            assert!(maze.rows() >= 3 && maze.rows() % 2 == 1);
            assert!(maze.cols() >= 3 && maze.cols() % 2 == 1);
        }
    }

    #[test]
    fn test_single_connected_region() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = Maze::generate_with_rng(9 + seed as usize, 21 - seed as usize / 2, &mut rng);
            assert_eq!(maze.open_region_count(), 1, "seed {}", seed);
            let reached = maze.reachable_from(maze.entrance());
            assert!(reached.contains(&maze.exit()));
            assert!(reached.contains(&(1, 1)));
        }
    }

    #[test]
    fn test_perfect_maze_cell_count() {
        // Spanning tree over k lattice cells opens 2k - 1 cells, plus the two punches
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = Maze::generate_with_rng(13, 17, &mut rng);
            let k = lattice_cells(&maze);
            assert_eq!(maze.open_cell_count(), 2 * k - 1 + 2);
        }
    }

    #[test]
    fn test_every_lattice_cell_is_open() {
        let mut rng = StdRng::seed_from_u64(5);
        let maze = Maze::generate_with_rng(11, 11, &mut rng);
        for r in (1..maze.rows()).step_by(2) {
            for c in (1..maze.cols()).step_by(2) {
                assert!(maze.is_open(r, c), "lattice cell ({}, {}) closed", r, c);
            }
        }
    }

    #[test]
    fn test_boundary_only_open_at_entrance_and_exit() {
        let mut rng = StdRng::seed_from_u64(11);
        let maze = Maze::generate_with_rng(25, 25, &mut rng);
        let (rows, cols) = (maze.rows(), maze.cols());
        let open_boundary: Vec<_> = maze
            .iter()
            .filter(|&((r, c), cell)| {
                cell == Cell::Open && (r == 0 || c == 0 || r == rows - 1 || c == cols - 1)
            })
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(open_boundary, vec![(1, 0), (rows - 2, cols - 1)]);
        assert_eq!(maze.entrance(), (1, 0));
        assert_eq!(maze.exit(), (rows - 2, cols - 1));
    }

    #[test]
    fn test_smallest_maze() {
        let mut rng = StdRng::seed_from_u64(42);
        let maze = Maze::generate_with_rng(1, 1, &mut rng);
        assert_eq!(maze.to_string(), "###\n   \n###\n");
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = Maze::generate_with_rng(21, 21, &mut StdRng::seed_from_u64(8));
        let b = Maze::generate_with_rng(21, 21, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }

    #[test]
    fn test_large_maze_does_not_overflow() {
        let mut rng = StdRng::seed_from_u64(2024);
        let maze = Maze::generate_with_rng(401, 401, &mut rng);
        assert_eq!(maze.open_region_count(), 1);
    }
}
