use thiserror::Error;

/// Failures of the search core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// A node was requested from a frontier with no queued nodes. For a running search this
    /// means the reachable space is exhausted and no path exists.
    #[error("the frontier is empty")]
    EmptyFrontier,
    /// The search already found the goal or exhausted its frontier.
    #[error("the search has already terminated")]
    Terminated,
    /// The ordered heap and the position index of the frontier disagree.
    #[error("frontier heap and position index are out of sync")]
    InconsistentFrontier,
}

/// Failures while loading a maze.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("maze must be at least 3x3, got {rows} rows and {cols} columns")]
    TooSmall { rows: usize, cols: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("could not read maze: {0}")]
    Io(#[from] std::io::Error),
}
