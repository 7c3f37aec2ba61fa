//! ASCII maze layouts.
//!
//! `#` marks a wall and a space marks an open cell, the same form
//! [`Maze`]'s `Display` impl writes. Trailing carriage returns are ignored.

use std::str::FromStr;

use thiserror::Error;

use super::{Cell, Maze};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze layout is empty")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell character {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .collect();
        let first = lines.first().ok_or(MazeError::Empty)?;
        let cols = first.chars().count();
        let rows = lines.len();

        let mut maze = Maze::filled(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(MazeError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => {}
                    ' ' => maze.open(row, col),
                    _ => return Err(MazeError::UnknownCell { ch, row, col }),
                }
            }
        }

        let boundary: Vec<_> = maze
            .iter()
            .filter(|&((r, c), cell)| {
                cell == Cell::Open && (r == 0 || c == 0 || r == rows - 1 || c == cols - 1)
            })
            .map(|(pos, _)| pos)
            .collect();
        // Without boundary openings the maze is closed; fall back to the carve origin
        let fallback = (1.min(rows - 1), 1.min(cols - 1));
        maze.entrance = boundary.first().copied().unwrap_or(fallback);
        maze.exit = boundary.last().copied().unwrap_or(fallback);

        Ok(maze)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_parse_display_round_trip() {
        let mut rng = StdRng::seed_from_u64(17);
        let maze = Maze::generate_with_rng(9, 13, &mut rng);
        let parsed: Maze = maze.to_string().parse().unwrap();
        assert_eq!(parsed, maze);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!("".parse::<Maze>(), Err(MazeError::Empty));
        assert_eq!("\n\n".parse::<Maze>(), Err(MazeError::Empty));
    }

    #[test]
    fn test_parse_ragged() {
        let err = "###\n# \n###".parse::<Maze>().unwrap_err();
        assert_eq!(
            err,
            MazeError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_parse_unknown_cell() {
        let err = "###\n#x#\n###".parse::<Maze>().unwrap_err();
        assert_eq!(err, MazeError::UnknownCell { ch: 'x', row: 1, col: 1 });
        assert_eq!(err.to_string(), "unknown cell character 'x' at row 1, column 1");
    }

    #[test]
    fn test_parse_closed_maze_uses_fallback_entrance() {
        let maze: Maze = "###\n# #\n###".parse().unwrap();
        assert_eq!(maze.entrance(), (1, 1));
        assert_eq!(maze.exit(), (1, 1));
        assert_eq!(maze.open_cell_count(), 1);
    }
}
