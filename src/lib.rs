//! Maze generation, shortest-path hints and the attempt state machine for a
//! small timed maze game, plus the terminal front end that plays it.

pub mod config;
pub mod game;
pub mod grid;
pub mod input;
pub mod level;
pub mod maze;
pub mod path;
pub mod score;
pub mod timer;
pub mod ui;

pub use game::{Game, HintError, MoveOutcome, Outcome, Phase, Summary};
pub use grid::{Cell, Dir, Grid, Pos};
pub use maze::generate_maze;
pub use path::find_shortest_path;
