//! # maze_astar
//!
//! Step-wise [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search over an implicit
//! 8-connected grid. Moves and the heuristic both use Euclidean distance, so the heuristic is
//! admissible and consistent and the first expansion of a cell is already optimal.
//!
//! The search is driven one expansion at a time through [Search::advance], which leaves the open
//! ([Frontier]) and closed ([Search::visited]) sets available for inspection between steps. The
//! grid itself is only seen through the [Walkable] capability; [Maze] provides one for textual
//! mazes.
//!
//! ```
//! use grid_util::point::Point;
//! use maze_astar::{Maze, Node, Outcome, Search};
//!
//! let maze: Maze = "#####\n#...#\n#...#\n#...#\n#####\n".parse().unwrap();
//! let goal = Node::new(maze.default_goal(), None, None);
//! let start = Node::new(maze.default_start(), None, Some(&goal));
//! let mut search = Search::new(start, goal, maze);
//! match search.run(None).unwrap() {
//!     Outcome::Found(step) => {
//!         assert_eq!(step.node.path(), vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]);
//!     }
//!     other => panic!("no path: {other:?}"),
//! }
//! ```
mod error;
pub mod frontier;
pub mod maze;
pub mod node;
pub mod search;

pub use crate::error::{MazeError, SearchError};
pub use crate::frontier::Frontier;
pub use crate::maze::Maze;
pub use crate::node::{cost, euclidean, heuristic, path_cost, Node};
pub use crate::search::{Outcome, Search, SearchState, Step, Walkable, NEIGHBOUR_OFFSETS};
