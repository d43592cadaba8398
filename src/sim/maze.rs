//! Perfect maze generation
//!
//! A randomized depth-first traversal carves passages through an R×C grid of
//! cells. The removed walls form a spanning tree: every cell is reachable from
//! every other cell by exactly one path.
//!
//! Passages are stored as two boolean matrices:
//! - `verticals`: R × (C-1), entry (r, c) opens the wall between (r, c) and (r, c+1)
//! - `horizontals`: (R-1) × C, entry (r, c) opens the wall between (r, c) and (r+1, c)

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::MazeError;

/// Grid position as (row, column)
pub type Cell = (usize, usize);

/// Neighbour direction, in the order candidates are listed before shuffling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// The neighbouring cell in this direction, or None if it falls outside the grid
    pub fn step(self, (row, col): Cell, rows: usize, cols: usize) -> Option<Cell> {
        match self {
            Direction::Top => row.checked_sub(1).map(|r| (r, col)),
            Direction::Right => (col + 1 < cols).then_some((row, col + 1)),
            Direction::Bottom => (row + 1 < rows).then_some((row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| (row, c)),
        }
    }
}

/// Which matrix a wall belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallOrientation {
    /// Wall below a cell (from `horizontals`)
    Horizontal,
    /// Wall right of a cell (from `verticals`)
    Vertical,
}

/// A generated perfect maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    cols: usize,
    horizontals: Vec<Vec<bool>>,
    verticals: Vec<Vec<bool>>,
}

/// In-place Fisher-Yates shuffle drawing one index per position, last to first
fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let mut counter = items.len();
    while counter > 0 {
        let index = rng.random_range(0..counter);
        counter -= 1;
        items.swap(counter, index);
    }
}

/// One level of the depth-first traversal
struct Frame {
    cell: Cell,
    candidates: [Direction; 4],
    next: usize,
}

impl Frame {
    /// Candidates are shuffled when the cell is entered, before any child is visited
    fn enter<R: Rng + ?Sized>(cell: Cell, rng: &mut R) -> Self {
        let mut candidates = Direction::ALL;
        shuffle(&mut candidates, rng);
        Self {
            cell,
            candidates,
            next: 0,
        }
    }
}

/// Generate a perfect maze of `rows` × `cols` cells
///
/// Start cell and neighbour order are drawn from `rng`, so a seeded generator
/// always yields the same maze. The traversal uses an explicit stack, so grid
/// size is not limited by call depth.
pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Maze, MazeError> {
    if rows == 0 || cols == 0 {
        return Err(MazeError::InvalidDimension { rows, cols });
    }

    let mut maze = Maze::closed(rows, cols);
    let mut visited = vec![vec![false; cols]; rows];

    let start = (rng.random_range(0..rows), rng.random_range(0..cols));
    visited[start.0][start.1] = true;
    let mut stack = vec![Frame::enter(start, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.candidates.len() {
            stack.pop();
            continue;
        }
        let direction = frame.candidates[frame.next];
        frame.next += 1;
        let cell = frame.cell;

        let Some(next) = direction.step(cell, rows, cols) else {
            continue;
        };
        if visited[next.0][next.1] {
            continue;
        }

        maze.set_passage(cell, direction, true);
        visited[next.0][next.1] = true;
        stack.push(Frame::enter(next, rng));
    }

    log::debug!(
        "Generated {}x{} maze from {:?} with {} passages",
        rows,
        cols,
        start,
        maze.passage_count()
    );

    Ok(maze)
}

impl Maze {
    /// A grid with every wall in place
    fn closed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            horizontals: vec![vec![false; cols]; rows - 1],
            verticals: vec![vec![false; cols - 1]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// (rows - 1) × cols, true where a cell is open to the cell below
    pub fn horizontals(&self) -> &[Vec<bool>] {
        &self.horizontals
    }

    /// rows × (cols - 1), true where a cell is open to the cell on its right
    pub fn verticals(&self) -> &[Vec<bool>] {
        &self.verticals
    }

    fn contains(&self, (row, col): Cell) -> bool {
        row < self.rows && col < self.cols
    }

    fn set_passage(&mut self, (row, col): Cell, direction: Direction, open: bool) {
        match direction {
            Direction::Left => self.verticals[row][col - 1] = open,
            Direction::Right => self.verticals[row][col] = open,
            Direction::Top => self.horizontals[row - 1][col] = open,
            Direction::Bottom => self.horizontals[row][col] = open,
        }
    }

    /// Whether `cell` has a passage in `direction`
    pub fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        if !self.contains(cell) || direction.step(cell, self.rows, self.cols).is_none() {
            return false;
        }
        let (row, col) = cell;
        match direction {
            Direction::Left => self.verticals[row][col - 1],
            Direction::Right => self.verticals[row][col],
            Direction::Top => self.horizontals[row - 1][col],
            Direction::Bottom => self.horizontals[row][col],
        }
    }

    /// Whether two cells are adjacent and joined by a passage
    pub fn has_passage(&self, a: Cell, b: Cell) -> bool {
        Direction::ALL
            .iter()
            .any(|&d| d.step(a, self.rows, self.cols) == Some(b) && self.is_open(a, d))
    }

    /// Cells reachable from `cell` in one step
    pub fn open_neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            if self.is_open(cell, d) {
                d.step(cell, self.rows, self.cols)
            } else {
                None
            }
        })
    }

    /// Total number of open passages across both matrices
    pub fn passage_count(&self) -> usize {
        self.horizontals
            .iter()
            .chain(self.verticals.iter())
            .flatten()
            .filter(|&&open| open)
            .count()
    }

    /// Number of cells a flood fill from `start` reaches
    pub fn reachable_from(&self, start: Cell) -> usize {
        if !self.contains(start) {
            return 0;
        }

        let mut seen = vec![vec![false; self.cols]; self.rows];
        let mut queue = VecDeque::from([start]);
        seen[start.0][start.1] = true;
        let mut count = 0;

        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in self.open_neighbours(cell) {
                if !seen[next.0][next.1] {
                    seen[next.0][next.1] = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    /// Every wall still standing as (orientation, row, col)
    ///
    /// Horizontal walls come first in row-major order, then vertical walls.
    pub fn closed_walls(&self) -> impl Iterator<Item = (WallOrientation, usize, usize)> + '_ {
        let horizontal = self.horizontals.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, open)| !**open)
                .map(move |(c, _)| (WallOrientation::Horizontal, r, c))
        });
        let vertical = self.verticals.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, open)| !**open)
                .map(move |(c, _)| (WallOrientation::Vertical, r, c))
        });
        horizontal.chain(vertical)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+")?;
        for _ in 0..self.cols {
            write!(f, "---+")?;
        }
        writeln!(f)?;

        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.cols {
                let east = if self.is_open((row, col), Direction::Right) {
                    " "
                } else {
                    "|"
                };
                write!(f, "   {}", east)?;
            }
            writeln!(f)?;

            write!(f, "+")?;
            for col in 0..self.cols {
                let south = if self.is_open((row, col), Direction::Bottom) {
                    "   "
                } else {
                    "---"
                };
                write!(f, "{}+", south)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn seeded(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    /// Every passage is a bridge: closing it splits the maze
    fn assert_acyclic(maze: &Maze) {
        let open: Vec<(Cell, Direction)> = (0..maze.rows())
            .flat_map(|r| (0..maze.cols()).map(move |c| (r, c)))
            .flat_map(|cell| {
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter(move |&d| maze.is_open(cell, d))
                    .map(move |d| (cell, d))
            })
            .collect();

        for (cell, direction) in open {
            let mut cut = maze.clone();
            cut.set_passage(cell, direction, false);
            assert!(
                cut.reachable_from((0, 0)) < maze.cell_count(),
                "closing {:?} {:?} left the maze connected",
                cell,
                direction
            );
        }
    }

    /// Straightforward recursive version of the traversal
    fn generate_recursive(rows: usize, cols: usize, rng: &mut Pcg32) -> Maze {
        fn step(maze: &mut Maze, visited: &mut [Vec<bool>], cell: Cell, rng: &mut Pcg32) {
            if visited[cell.0][cell.1] {
                return;
            }
            visited[cell.0][cell.1] = true;
            let mut candidates = Direction::ALL;
            shuffle(&mut candidates, rng);
            for direction in candidates {
                let Some(next) = direction.step(cell, maze.rows, maze.cols) else {
                    continue;
                };
                if visited[next.0][next.1] {
                    continue;
                }
                maze.set_passage(cell, direction, true);
                step(maze, visited, next, rng);
            }
        }

        let mut maze = Maze::closed(rows, cols);
        let mut visited = vec![vec![false; cols]; rows];
        let start = (rng.random_range(0..rows), rng.random_range(0..cols));
        step(&mut maze, &mut visited, start, rng);
        maze
    }

    #[test]
    fn test_matrix_sizes() {
        let maze = generate(4, 7, &mut seeded(1)).unwrap();
        assert_eq!(maze.horizontals().len(), 3);
        assert!(maze.horizontals().iter().all(|row| row.len() == 7));
        assert_eq!(maze.verticals().len(), 4);
        assert!(maze.verticals().iter().all(|row| row.len() == 6));
    }

    #[test]
    fn test_spanning_tree_default_grid() {
        for seed in 0..20 {
            let maze = generate(10, 10, &mut seeded(seed)).unwrap();
            assert_eq!(maze.passage_count(), 99);
            assert_eq!(maze.reachable_from((0, 0)), 100);
            assert_eq!(maze.reachable_from((9, 9)), 100);
        }
    }

    #[test]
    fn test_no_cycles() {
        for seed in [3, 17, 4242] {
            let maze = generate(8, 11, &mut seeded(seed)).unwrap();
            assert_acyclic(&maze);
        }
    }

    #[test]
    fn test_matches_recursive_traversal() {
        for seed in 0..10 {
            let iterative = generate(9, 13, &mut seeded(seed)).unwrap();
            let recursive = generate_recursive(9, 13, &mut seeded(seed));
            assert_eq!(iterative, recursive);
        }
    }

    #[test]
    fn test_determinism() {
        let a = generate(12, 12, &mut seeded(99999)).unwrap();
        let b = generate(12, 12, &mut seeded(99999)).unwrap();
        assert_eq!(a, b);

        let c = generate(12, 12, &mut seeded(12345)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_single_cell() {
        let maze = generate(1, 1, &mut seeded(7)).unwrap();
        assert_eq!(maze.passage_count(), 0);
        assert!(maze.horizontals().is_empty());
        assert!(maze.verticals().iter().all(|row| row.is_empty()));
        assert_eq!(maze.reachable_from((0, 0)), 1);
        assert_eq!(maze.closed_walls().count(), 0);
    }

    #[test]
    fn test_single_row_is_corridor() {
        let maze = generate(1, 5, &mut seeded(7)).unwrap();
        assert!(maze.horizontals().is_empty());
        assert_eq!(maze.verticals(), &[vec![true; 4]]);
    }

    #[test]
    fn test_single_column_is_corridor() {
        let maze = generate(6, 1, &mut seeded(7)).unwrap();
        assert_eq!(maze.horizontals().len(), 5);
        assert!(maze.horizontals().iter().all(|row| row == &[true]));
        assert!(maze.verticals().iter().all(|row| row.is_empty()));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            generate(0, 5, &mut seeded(1)),
            Err(MazeError::InvalidDimension { rows: 0, cols: 5 })
        );
        assert_eq!(
            generate(5, 0, &mut seeded(1)),
            Err(MazeError::InvalidDimension { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn test_has_passage_is_symmetric() {
        let maze = generate(6, 6, &mut seeded(5)).unwrap();
        for r in 0..6 {
            for c in 0..6 {
                for n in maze.open_neighbours((r, c)) {
                    assert!(maze.has_passage(n, (r, c)));
                }
                // Non-adjacent cells never share a passage
                assert!(!maze.has_passage((r, c), (r, c)));
            }
        }
        assert!(!maze.has_passage((0, 0), (6, 0)));
    }

    #[test]
    fn test_closed_walls_match_matrices() {
        let maze = generate(5, 8, &mut seeded(21)).unwrap();
        let total = 4 * 8 + 5 * 7;
        assert_eq!(maze.closed_walls().count(), total - maze.passage_count());
        for (orientation, r, c) in maze.closed_walls() {
            match orientation {
                WallOrientation::Horizontal => assert!(!maze.horizontals()[r][c]),
                WallOrientation::Vertical => assert!(!maze.verticals()[r][c]),
            }
        }
    }

    #[test]
    fn test_display_outline() {
        let maze = generate(1, 3, &mut seeded(0)).unwrap();
        let expected = format!("+---+---+---+\n|{}|\n+---+---+---+\n", " ".repeat(11));
        assert_eq!(maze.to_string(), expected);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = seeded(8);
        for _ in 0..50 {
            let mut items = Direction::ALL;
            shuffle(&mut items, &mut rng);
            for d in Direction::ALL {
                assert!(items.contains(&d));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_perfect_maze(rows in 1usize..16, cols in 1usize..16, seed in any::<u64>()) {
            let maze = generate(rows, cols, &mut seeded(seed)).unwrap();
            prop_assert_eq!(maze.passage_count(), rows * cols - 1);
            prop_assert_eq!(maze.reachable_from((0, 0)), rows * cols);
            prop_assert_eq!(maze.reachable_from((rows - 1, cols - 1)), rows * cols);
        }

        #[test]
        fn prop_every_passage_is_a_bridge(rows in 1usize..7, cols in 1usize..7, seed in any::<u64>()) {
            let maze = generate(rows, cols, &mut seeded(seed)).unwrap();
            assert_acyclic(&maze);
        }

        #[test]
        fn prop_same_seed_same_maze(rows in 1usize..12, cols in 1usize..12, seed in any::<u64>()) {
            let a = generate(rows, cols, &mut seeded(seed)).unwrap();
            let b = generate(rows, cols, &mut seeded(seed)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
