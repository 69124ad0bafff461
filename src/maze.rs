//! Textual mazes: the walkability source and renderer used around the search.
//!
//! One row per line, `#` marks a wall and any other character is walkable.
use crate::error::MazeError;
use crate::node::Node;
use crate::search::{Walkable, NEIGHBOUR_OFFSETS};
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const WALL: char = '#';
const MIN_SIZE: usize = 3;

/// [Maze] keeps the walls in a [BoolGrid] (`true` is a wall) together with the 8-connected
/// components of the walkable cells, so reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: BoolGrid,
    components: UnionFind<usize>,
}

impl Maze {
    /// Parses a maze of at least 3x3 cells with rows of equal width.
    pub fn parse(text: &str) -> Result<Maze, MazeError> {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect_vec())
            .collect_vec();
        let cols = rows.first().map_or(0, Vec::len);
        if rows.len() < MIN_SIZE || cols < MIN_SIZE {
            return Err(MazeError::TooSmall {
                rows: rows.len(),
                cols,
            });
        }
        let mut grid = BoolGrid::new(cols, rows.len(), false);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MazeError::Ragged {
                    row: y,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (x, &tile) in row.iter().enumerate() {
                grid.set(x as i32, y as i32, tile == WALL);
            }
        }
        let mut maze = Maze {
            grid,
            components: UnionFind::new(0),
        };
        maze.generate_components();
        Ok(maze)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Maze, MazeError> {
        let text = fs::read_to_string(path)?;
        Maze::parse(&text)
    }

    pub fn rows(&self) -> usize {
        self.grid.height()
    }

    pub fn cols(&self) -> usize {
        self.grid.width()
    }

    /// The cell one in from the top-left corner.
    pub fn default_start(&self) -> Point {
        Point::new(1, 1)
    }

    /// The cell one in from the bottom-right corner.
    pub fn default_goal(&self) -> Point {
        Point::new(self.cols() as i32 - 2, self.rows() as i32 - 2)
    }

    /// Links every walkable cell to its walkable 8-neighbours.
    fn generate_components(&mut self) {
        let (w, h) = (self.cols() as i32, self.rows() as i32);
        self.components = UnionFind::new(self.cols() * self.rows());
        for y in 0..h {
            for x in 0..w {
                if !self.is_walkable(x, y) {
                    continue;
                }
                let point = Point::new(x, y);
                let point_ix = self.grid.get_ix_point(&point);
                for &(dx, dy) in &NEIGHBOUR_OFFSETS {
                    let n = Point::new(x + dx, y + dy);
                    if self.is_walkable(n.x, n.y) {
                        let n_ix = self.grid.get_ix_point(&n);
                        self.components.union(point_ix, n_ix);
                    }
                }
            }
        }
    }

    /// Checks if both cells are walkable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.is_walkable(start.x, start.y) || !self.is_walkable(goal.x, goal.y) {
            info!("{} or {} is not a walkable cell", start, goal);
            return false;
        }
        let equiv = self
            .components
            .equiv(self.grid.get_ix_point(start), self.grid.get_ix_point(goal));
        if !equiv {
            info!("{} and {} are on different components", start, goal);
        }
        equiv
    }

    /// Draws the maze with closed cells as `.`, open cells as `O` and the path leading to
    /// `path_tip` as `█`. Walls are drawn as `▒`. Cells outside the maze are ignored.
    pub fn render<O, C>(&self, open: O, closed: C, path_tip: Option<&Node>) -> String
    where
        O: IntoIterator<Item = Point>,
        C: IntoIterator<Item = Point>,
    {
        let mut tiles = (0..self.rows() as i32)
            .map(|y| {
                (0..self.cols() as i32)
                    .map(|x| if self.grid.get(x, y) { '▒' } else { ' ' })
                    .collect_vec()
            })
            .collect_vec();
        let mut mark = |p: Point, tile: char| {
            if self.grid.point_in_bounds(p) {
                tiles[p.y as usize][p.x as usize] = tile;
            }
        };
        closed.into_iter().for_each(|p| mark(p, '.'));
        open.into_iter().for_each(|p| mark(p, 'O'));
        if let Some(tip) = path_tip {
            tip.ancestors().for_each(|node| mark(node.position(), '█'));
        }
        tiles
            .into_iter()
            .map(|row| row.into_iter().collect::<String>() + "\n")
            .collect()
    }
}

impl Walkable for Maze {
    /// False for walls and for anything outside the maze.
    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.point_in_bounds(Point::new(x, y)) && !self.grid.get(x, y)
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Maze::parse(s)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.rows() as i32 {
            let row = (0..self.cols() as i32)
                .map(|x| if self.grid.get(x, y) { WALL } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
