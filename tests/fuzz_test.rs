/// Fuzzes the search by checking for many random mazes that a path is found exactly when start
/// and goal share a connected component, and that its cost matches a plain Dijkstra search.
use grid_util::point::Point;
use maze_astar::{path_cost, Maze, Node, Outcome, Search, Walkable, NEIGHBOUR_OFFSETS};
use rand::prelude::*;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

fn random_maze(n: usize, rng: &mut StdRng) -> Maze {
    let goal = (n - 2, n - 2);
    let text = (0..n)
        .map(|y| {
            (0..n)
                .map(|x| {
                    let border = x == 0 || y == 0 || x == n - 1 || y == n - 1;
                    let endpoint = (x, y) == (1, 1) || (x, y) == goal;
                    if border || (!endpoint && rng.gen_bool(0.4)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .chain(std::iter::once('\n'))
                .collect::<String>()
        })
        .collect::<String>();
    Maze::parse(&text).unwrap()
}

struct Queued(f64, Point);

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Queued {}
impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.total_cmp(&self.0)
    }
}

/// Shortest distance over the same 8-connected moves, without a heuristic.
fn dijkstra(maze: &Maze, start: Point, goal: Point) -> Option<f64> {
    let mut dist: HashMap<Point, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();
    dist.insert(start, 0.0);
    heap.push(Queued(0.0, start));
    while let Some(Queued(d, p)) = heap.pop() {
        if p == goal {
            return Some(d);
        }
        if d > dist[&p] {
            continue;
        }
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            let n = Point::new(p.x + dx, p.y + dy);
            if !maze.is_walkable(n.x, n.y) {
                continue;
            }
            let nd = d + ((dx * dx + dy * dy) as f64).sqrt();
            if dist.get(&n).map_or(true, |&old| nd < old) {
                dist.insert(n, nd);
                heap.push(Queued(nd, n));
            }
        }
    }
    None
}

#[test]
fn fuzz() {
    const N: usize = 12;
    const N_MAZES: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_MAZES {
        let maze = random_maze(N, &mut rng);
        let start_pos = maze.default_start();
        let goal_pos = maze.default_goal();
        let reachable = maze.reachable(&start_pos, &goal_pos);
        let expected = dijkstra(&maze, start_pos, goal_pos);
        let rendered = maze.to_string();

        let goal = Node::new(goal_pos, None, None);
        let start = Node::new(start_pos, None, Some(&goal));
        let mut search = Search::new(start, goal, maze);
        match search.run(None).unwrap() {
            Outcome::Found(step) => {
                assert!(reachable, "found a path in an unreachable maze:\n{rendered}");
                let expected = expected.unwrap();
                assert!(
                    (step.cost - expected).abs() < 1e-9,
                    "cost {} differs from {} in:\n{rendered}",
                    step.cost,
                    expected
                );
                let path = step.node.path();
                assert!((path_cost(&path) - step.cost).abs() < 1e-9);
                assert!(path
                    .iter()
                    .all(|p| search.walkable().is_walkable(p.x, p.y)));
            }
            Outcome::Exhausted { .. } => {
                assert!(!reachable, "missed a path in:\n{rendered}");
                assert!(expected.is_none());
                assert_eq!(search.frontier_size(), 0);
            }
            Outcome::Capped { .. } => unreachable!("no cap was set"),
        }
    }
}
