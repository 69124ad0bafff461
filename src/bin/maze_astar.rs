//! Runs A* over a maze file and draws the search as it goes.
//!
//! Usage: `maze_astar [mazefile] [delay_ms]`. The maze defaults to `maze.txt` and the delay to
//! 50 ms; a delay of 0 only prints the final frame.
use log::{error, info, warn};
use maze_astar::{Maze, Node, Search, SearchError, Step};
use std::io::Write;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

const DEFAULT_MAZE: &str = "maze.txt";
const DEFAULT_DELAY_MS: u64 = 50;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

struct Args {
    maze: String,
    delay: Duration,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let maze = args.next().unwrap_or_else(|| DEFAULT_MAZE.to_owned());
    let delay_ms = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| format!("invalid delay '{raw}': {e}"))?,
        None => DEFAULT_DELAY_MS,
    };
    if args.next().is_some() {
        return Err("too many arguments".to_owned());
    }
    Ok(Args {
        maze,
        delay: Duration::from_millis(delay_ms),
    })
}

fn frame(search: &Search<Maze>, tip: Option<&Node>) -> String {
    search.walkable().render(
        search.frontier().iter().map(|node| node.position()),
        search.visited().iter().copied(),
        tip,
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\nusage: maze_astar [mazefile] [delay_ms]");
            return ExitCode::from(2);
        }
    };
    let maze = match Maze::from_file(&args.maze) {
        Ok(maze) => maze,
        Err(err) => {
            error!("{}: {}", args.maze, err);
            return ExitCode::FAILURE;
        }
    };

    let goal = Node::new(maze.default_goal(), None, None);
    let start = Node::new(maze.default_start(), None, Some(&goal));
    if maze.reachable(&start.position(), &goal.position()) {
        info!("{} is reachable from {}", goal.position(), start.position());
    } else {
        warn!("{} is not reachable from {}", goal.position(), start.position());
    }
    let mut search = Search::new(start, goal, maze);

    let mut last: Option<Step> = None;
    while search.frontier_size() > 0 {
        let step = match search.advance() {
            Ok(step) => step,
            Err(SearchError::EmptyFrontier) => break,
            Err(err) => {
                error!("search failed: {err}");
                return ExitCode::FAILURE;
            }
        };
        let done = step.found;
        if !args.delay.is_zero() {
            print!(
                "{CLEAR_SCREEN}{}iterations: {:<6}\npath cost: {:.2}\n",
                frame(&search, Some(step.node.as_ref())),
                step.iterations,
                step.cost
            );
            std::io::stdout().flush().ok();
        }
        last = Some(step);
        if done {
            break;
        }
        thread::sleep(args.delay);
    }

    let found = last.as_ref().is_some_and(|step| step.found);
    let tip = last.as_ref().map(|step| step.node.as_ref());
    print!("{}", frame(&search, tip));
    println!(
        "iterations: {:<6}",
        last.as_ref().map_or(0, |step| step.iterations)
    );
    match last.as_ref().filter(|step| step.found) {
        Some(step) => println!("path cost: {:.2}", step.cost),
        None => println!("path cost: {:.2}", f64::INFINITY),
    }
    if found {
        println!("success!");
        ExitCode::SUCCESS
    } else {
        println!("could not find path to goal :(");
        ExitCode::FAILURE
    }
}
