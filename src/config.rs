use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Terminal maze game with shortest-path hints
#[derive(Parser, Debug, Clone)]
#[command(name = "logic-maze", version, about)]
pub struct Settings {
    /// Difficulty to start on (1-4)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub level: u32,

    /// Seed for reproducible mazes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Game tick interval in milliseconds
    #[arg(
        long,
        env = "MAZE_TICK_MS",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Render frame rate
    #[arg(
        long,
        env = "MAZE_FPS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub fps: u64,

    /// Write logs to this file; logging is off otherwise
    #[arg(long, env = "MAZE_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps)
    }
}
