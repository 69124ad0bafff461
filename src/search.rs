use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::node::Node;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, error, info, trace, warn};
use smallvec::SmallVec;
use std::rc::Rc;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Offsets of the 8-neighbourhood in expansion order: the four axis-aligned moves first, then the
/// four diagonals.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
    (1, 1),
];

/// The walkability capability the search consumes. Must answer for any coordinate, including
/// ones outside the grid.
pub trait Walkable {
    fn is_walkable(&self, x: i32, y: i32) -> bool;
}

impl<F> Walkable for F
where
    F: Fn(i32, i32) -> bool,
{
    fn is_walkable(&self, x: i32, y: i32) -> bool {
        self(x, y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Running,
    /// The goal was popped from the frontier.
    Found,
    /// The frontier ran empty before the goal was reached.
    Exhausted,
    /// The frontier's heap and position index disagreed. The search cannot continue.
    Failed,
}

/// The result of a single [Search::advance].
#[derive(Clone, Debug)]
pub struct Step {
    /// Whether `node` is the goal.
    pub found: bool,
    /// The node popped during this step.
    pub node: Rc<Node>,
    /// Accumulated cost of `node`.
    pub cost: f64,
    /// Number of nodes popped so far, this one included.
    pub iterations: usize,
}

/// How a driven search ended, see [Search::run].
#[derive(Clone, Debug)]
pub enum Outcome {
    Found(Step),
    Exhausted { iterations: usize },
    Capped { iterations: usize },
}

/// Step-wise A* over an implicit 8-connected grid.
///
/// Each call to [advance](Self::advance) pops one node and expands it, so a driver can inspect
/// the frontier and visited cells or render them between steps. A search serves exactly one
/// start/goal pair and does not resume after it terminates.
pub struct Search<W> {
    goal: Node,
    walkable: W,
    frontier: Frontier,
    visited: FxIndexSet<Point>,
    iterations: usize,
    state: SearchState,
}

impl<W: Walkable> Search<W> {
    pub fn new(start: Node, goal: Node, walkable: W) -> Search<W> {
        debug!(
            "Searching from {} to {}, initial estimate {:.3}",
            start.position(),
            goal.position(),
            start.f()
        );
        let mut frontier = Frontier::new();
        frontier.push(start);
        Search {
            goal,
            walkable,
            frontier,
            visited: FxIndexSet::default(),
            iterations: 0,
            state: SearchState::Running,
        }
    }

    /// Pops the best frontier node and, unless it is the goal, expands its walkable and unvisited
    /// neighbours into the frontier.
    ///
    /// Fails with [SearchError::EmptyFrontier] once the frontier is empty and with
    /// [SearchError::Terminated] after the goal was found or the frontier was found corrupt.
    pub fn advance(&mut self) -> Result<Step, SearchError> {
        match self.state {
            SearchState::Running => {}
            SearchState::Exhausted => return Err(SearchError::EmptyFrontier),
            SearchState::Found | SearchState::Failed => return Err(SearchError::Terminated),
        }
        let node = match self.frontier.pop() {
            Ok(node) => node,
            Err(SearchError::EmptyFrontier) => {
                self.exhaust();
                return Err(SearchError::EmptyFrontier);
            }
            Err(err) => {
                error!("Aborting search after {} iterations: {}", self.iterations, err);
                self.state = SearchState::Failed;
                return Err(err);
            }
        };
        self.iterations += 1;
        trace!(
            "Iteration {}: expanding {} (g = {:.3}, f = {:.3})",
            self.iterations,
            node.position(),
            node.g(),
            node.f()
        );

        if *node == self.goal {
            info!(
                "Reached {} after {} iterations with cost {:.3}",
                node.position(),
                self.iterations,
                node.g()
            );
            self.state = SearchState::Found;
            return Ok(self.step(true, node));
        }

        self.visited.insert(node.position());
        for neighbour in self.neighbours(&node) {
            if self.walkable.is_walkable(neighbour.x(), neighbour.y())
                && !self.visited.contains(&neighbour.position())
            {
                self.frontier.push(neighbour);
            }
        }
        if self.frontier.is_empty() {
            self.exhaust();
        }
        Ok(self.step(false, node))
    }

    fn exhaust(&mut self) {
        warn!(
            "Frontier exhausted after {} iterations, {} is unreachable",
            self.iterations,
            self.goal.position()
        );
        self.state = SearchState::Exhausted;
    }

    /// Drives [advance](Self::advance) until the goal is found, the frontier runs empty or
    /// `max_iterations` nodes have been popped.
    pub fn run(&mut self, max_iterations: Option<usize>) -> Result<Outcome, SearchError> {
        loop {
            if max_iterations.is_some_and(|cap| self.iterations >= cap) {
                debug!("Stopping at the iteration cap of {}", self.iterations);
                return Ok(Outcome::Capped {
                    iterations: self.iterations,
                });
            }
            match self.advance() {
                Ok(step) if step.found => return Ok(Outcome::Found(step)),
                Ok(_) if self.state == SearchState::Exhausted => {
                    return Ok(Outcome::Exhausted {
                        iterations: self.iterations,
                    })
                }
                Ok(_) => {}
                Err(SearchError::EmptyFrontier) => {
                    return Ok(Outcome::Exhausted {
                        iterations: self.iterations,
                    })
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn neighbours(&self, node: &Rc<Node>) -> SmallVec<[Node; 8]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy)| {
                Node::new(
                    Point::new(node.x() + dx, node.y() + dy),
                    Some(node.clone()),
                    Some(&self.goal),
                )
            })
            .collect()
    }

    fn step(&self, found: bool, node: Rc<Node>) -> Step {
        Step {
            found,
            cost: node.g(),
            node,
            iterations: self.iterations,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SearchState::Running
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// The open cells.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The closed cells, in the order they were expanded.
    pub fn visited(&self) -> &FxIndexSet<Point> {
        &self.visited
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn goal(&self) -> &Node {
        &self.goal
    }

    pub fn walkable(&self) -> &W {
        &self.walkable
    }
}
