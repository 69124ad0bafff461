use grid_util::point::Point;
use itertools::Itertools;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Straight-line distance between two grid positions.
pub fn euclidean(a: &Point, b: &Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Cost of moving between two positions. Diagonal steps cost exactly their Euclidean length.
pub fn cost(from: &Point, to: &Point) -> f64 {
    euclidean(from, to)
}

/// Estimated remaining cost to the goal. Identical to [cost], which keeps it admissible and
/// consistent on the 8-connected grid.
pub fn heuristic(goal: &Point, p: &Point) -> f64 {
    euclidean(goal, p)
}

/// Sums [cost] over every consecutive pair of positions in a path.
pub fn path_cost(path: &[Point]) -> f64 {
    path.iter()
        .tuple_windows()
        .map(|(from, to)| cost(from, to))
        .sum()
}

/// A grid position reached through one specific path.
///
/// Nodes are immutable once built. A cheaper route to the same cell is a new [Node], never an
/// update of an old one. Equality and hashing only look at the position, so two nodes for the
/// same cell are "the same node" regardless of cost; use [Node::cmp_cost] to compare costs.
#[derive(Clone, Debug)]
pub struct Node {
    position: Point,
    parent: Option<Rc<Node>>,
    g: f64,
    h: f64,
    f: f64,
}

impl Node {
    /// Builds a node at `position`. Without a parent the accumulated cost is zero, without a goal
    /// the heuristic is zero.
    pub fn new(position: Point, parent: Option<Rc<Node>>, goal: Option<&Node>) -> Node {
        let g = parent
            .as_ref()
            .map_or(0.0, |p| p.g + cost(&p.position, &position));
        let h = goal.map_or(0.0, |goal| heuristic(&goal.position, &position));
        Node {
            position,
            parent,
            g,
            h,
            f: g + h,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }
    pub fn x(&self) -> i32 {
        self.position.x
    }
    pub fn y(&self) -> i32 {
        self.position.y
    }
    pub fn parent(&self) -> Option<&Rc<Node>> {
        self.parent.as_ref()
    }
    /// Accumulated cost from the root of the path.
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Heuristic estimate of the remaining cost.
    pub fn h(&self) -> f64 {
        self.h
    }
    /// Total estimated cost, `g + h`.
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Orders per total estimated cost first, then per accumulated cost, so that on equal `f`
    /// the node with the lower `g` comes first.
    pub fn cmp_cost(&self, other: &Node) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.g.total_cmp(&other.g))
    }

    /// Whether this node should be expanded strictly before `other`.
    pub fn is_better_than(&self, other: &Node) -> bool {
        self.cmp_cost(other) == Ordering::Less
    }

    /// Walks from this node back to the root of its path, this node included.
    pub fn ancestors(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(Some(self), |node| node.parent.as_deref())
    }

    /// The positions on the path from the root to this node.
    pub fn path(&self) -> Vec<Point> {
        let mut path = self.ancestors().map(Node::position).collect::<Vec<_>>();
        path.reverse();
        path
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}
