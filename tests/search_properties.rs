use grid_util::point::Point;
use itertools::Itertools;
use maze_astar::{path_cost, Maze, Node, Search, SearchError, SearchState, NEIGHBOUR_OFFSETS};
use std::collections::HashSet;

const WINDING: &str = "\
###########
#.....#...#
#.###.#.#.#
#...#.#.#.#
#.#.#...#.#
###########
";

// The goal sits in a sealed pocket on the right.
const SEALED: &str = "\
#########
#...#...#
#...#...#
#...#...#
#########
";

fn search_for(maze: Maze) -> Search<Maze> {
    let goal = Node::new(maze.default_goal(), None, None);
    let start = Node::new(maze.default_start(), None, Some(&goal));
    Search::new(start, goal, maze)
}

#[test]
fn open_grid_takes_two_diagonal_steps() {
    let mut search = search_for("#####\n#...#\n#...#\n#...#\n#####\n".parse().unwrap());
    let step = (0..3)
        .map_while(|_| search.advance().ok())
        .find(|step| step.found)
        .expect("goal within three advances");
    assert!((step.cost - 2.0 * 2f64.sqrt()).abs() < 1e-9);
    assert!(step.iterations <= 3);
    assert_eq!(search.state(), SearchState::Found);
}

/// With a consistent heuristic the f values of expanded nodes never decrease.
#[test]
fn pop_order_is_monotonic() {
    let mut search = search_for(WINDING.parse().unwrap());
    let mut f_values = Vec::new();
    loop {
        let step = search.advance().unwrap();
        f_values.push(step.node.f());
        if step.found {
            break;
        }
    }
    assert!(f_values.len() > 1);
    for (prev, next) in f_values.iter().tuple_windows() {
        assert!(next + 1e-9 >= *prev, "f dropped from {prev} to {next}");
    }
}

#[test]
fn no_cell_is_expanded_twice() {
    let mut search = search_for(SEALED.parse().unwrap());
    let mut expanded = Vec::new();
    while search.frontier_size() > 0 {
        expanded.push(search.advance().unwrap().node.position());
    }
    let unique = expanded.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), expanded.len());
    assert_eq!(search.visited().len(), expanded.len());
    assert!(search
        .visited()
        .iter()
        .copied()
        .eq(expanded.iter().copied()));
}

#[test]
fn path_follows_neighbour_moves() {
    let mut search = search_for(WINDING.parse().unwrap());
    let step = loop {
        let step = search.advance().unwrap();
        if step.found {
            break step;
        }
    };
    let root = step.node.ancestors().last().unwrap();
    assert_eq!(root.position(), Point::new(1, 1));
    assert_eq!(root.g(), 0.0);

    let path = step.node.path();
    assert_eq!(path.first(), Some(&Point::new(1, 1)));
    assert_eq!(path.last(), Some(&Point::new(9, 4)));
    for (a, b) in path.iter().tuple_windows() {
        assert!(NEIGHBOUR_OFFSETS.contains(&(b.x - a.x, b.y - a.y)));
    }
    assert!((path_cost(&path) - step.node.g()).abs() < 1e-9);

    let frame = search.walkable().render(
        search.frontier().iter().map(|node| node.position()),
        search.visited().iter().copied(),
        Some(step.node.as_ref()),
    );
    assert_eq!(frame.matches('█').count(), path.len());
}

#[test]
fn sealed_goal_is_exhausted() {
    let maze: Maze = SEALED.parse().unwrap();
    assert!(!maze.reachable(&maze.default_start(), &maze.default_goal()));
    let mut search = search_for(maze);
    while search.frontier_size() > 0 {
        assert!(!search.advance().unwrap().found);
    }
    // The 3x3 room on the left.
    assert_eq!(search.iterations(), 9);
    assert_eq!(search.state(), SearchState::Exhausted);
    assert!(!search.is_running());
    assert_eq!(search.advance().unwrap_err(), SearchError::EmptyFrontier);
}
