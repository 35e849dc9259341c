use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use crate::grid::{Dir, Grid, Pos};
use crate::level::Level;
use crate::maze::generate_maze;
use crate::path::{find_shortest_path, hint_trail};
use crate::score::{compute_score, ScoreInput};
use crate::timer::Countdown;

pub const MAX_HINTS: u32 = 3;
pub const HINT_DISPLAY: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    GoalReached,
    TimeUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Ignored,
    Moved,
    ReachedGoal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintError {
    NotPlaying,
    Exhausted,
    NoPath,
}

impl Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintError::NotPlaying => write!(f, "hints are only available while playing"),
            HintError::Exhausted => write!(f, "all {} hints used", MAX_HINTS),
            HintError::NoPath => write!(f, "no path to the goal"),
        }
    }
}

impl std::error::Error for HintError {}

#[derive(Clone, Debug)]
struct HintOverlay {
    trail: Vec<Pos>,
    until: Instant,
}

/// One play-through of a maze.
#[derive(Clone, Debug)]
pub struct Attempt {
    grid: Grid,
    player: Pos,
    goal: Pos,
    moves: u32,
    hints_used: u32,
    hint: Option<HintOverlay>,
    countdown: Countdown,
}

impl Attempt {
    fn new(grid: Grid, level: &Level, now: Instant) -> Self {
        let player = grid.start().unwrap_or(crate::maze::START);
        let goal = grid.goal().unwrap_or(player);
        Attempt {
            grid,
            player,
            goal,
            moves: 0,
            hints_used: 0,
            hint: None,
            countdown: Countdown::start(now, level.time_limit),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn hints_left(&self) -> u32 {
        MAX_HINTS - self.hints_used
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.countdown.elapsed(now)
    }

    pub fn remaining_secs(&self, now: Instant) -> u64 {
        self.countdown.remaining_secs(now)
    }

    /// The hint overlay, empty once its display time has passed.
    pub fn visible_hint(&self, now: Instant) -> &[Pos] {
        match &self.hint {
            Some(h) if now < h.until => h.trail.as_slice(),
            _ => &[],
        }
    }

    fn try_step(&mut self, dir: Dir) -> bool {
        match self.grid.neighbor(self.player, dir) {
            Some(next) if !self.grid.cell(next).wall => {
                self.player = next;
                self.moves += 1;
                self.grid.mark_visited(next);
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub outcome: Outcome,
    pub score: u32,
    pub elapsed: Duration,
    pub moves: u32,
    pub hints_used: u32,
    pub level: Level,
    pub new_record: bool,
}

#[derive(Clone, Debug)]
pub enum Phase {
    Ready,
    Playing(Attempt),
    Finished(Summary),
}

pub struct Game {
    level: Level,
    best_score: u32,
    phase: Phase,
}

impl Game {
    pub fn new(level_id: u32) -> Self {
        Game {
            level: Level::by_id(level_id),
            best_score: 0,
            phase: Phase::Ready,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        match &self.phase {
            Phase::Playing(a) => Some(a),
            _ => None,
        }
    }

    /// Changes difficulty; refused mid-attempt.
    pub fn select_level(&mut self, id: u32) -> bool {
        if matches!(self.phase, Phase::Playing(_)) {
            return false;
        }
        self.level = Level::by_id(id);
        true
    }

    pub fn start(&mut self, rng: &mut impl Rng, now: Instant) {
        let grid = generate_maze(rng, self.level.size, self.level.id);
        let attempt = Attempt::new(grid, &self.level, now);
        info!(
            level = self.level.id,
            size = self.level.size,
            goal = ?attempt.goal,
            "attempt started"
        );
        self.phase = Phase::Playing(attempt);
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Ready;
    }

    pub fn move_player(&mut self, dir: Dir, now: Instant) -> MoveOutcome {
        let Phase::Playing(attempt) = &mut self.phase else {
            return MoveOutcome::Ignored;
        };
        if attempt.countdown.expired(now) {
            self.finish(Outcome::TimeUp, now);
            return MoveOutcome::Ignored;
        }
        if !attempt.try_step(dir) {
            return MoveOutcome::Ignored;
        }
        if attempt.player == attempt.goal {
            self.finish(Outcome::GoalReached, now);
            return MoveOutcome::ReachedGoal;
        }
        MoveOutcome::Moved
    }

    /// Computes a fresh shortest path from the player's current cell and
    /// shows its first few steps for `HINT_DISPLAY`.
    pub fn request_hint(&mut self, now: Instant) -> Result<&[Pos], HintError> {
        let Phase::Playing(attempt) = &self.phase else {
            return Err(HintError::NotPlaying);
        };
        if attempt.countdown.expired(now) {
            self.finish(Outcome::TimeUp, now);
            return Err(HintError::NotPlaying);
        }
        let Phase::Playing(attempt) = &mut self.phase else {
            return Err(HintError::NotPlaying);
        };
        if attempt.hints_used >= MAX_HINTS {
            return Err(HintError::Exhausted);
        }
        let path = find_shortest_path(&attempt.grid, attempt.player, attempt.goal);
        if path.is_empty() {
            return Err(HintError::NoPath);
        }
        attempt.hints_used += 1;
        debug!(
            used = attempt.hints_used,
            distance = path.len() - 1,
            "hint shown"
        );
        let overlay = attempt.hint.insert(HintOverlay {
            trail: hint_trail(&path).to_vec(),
            until: now + HINT_DISPLAY,
        });
        Ok(overlay.trail.as_slice())
    }

    pub fn tick(&mut self, now: Instant) {
        let Phase::Playing(attempt) = &mut self.phase else {
            return;
        };
        if attempt.hint.as_ref().is_some_and(|h| now >= h.until) {
            attempt.hint = None;
        }
        if attempt.countdown.expired(now) {
            self.finish(Outcome::TimeUp, now);
        }
    }

    fn finish(&mut self, outcome: Outcome, now: Instant) {
        let Phase::Playing(attempt) = &self.phase else {
            return;
        };
        let elapsed = attempt.countdown.elapsed(now).min(self.level.time_limit);
        let score = match outcome {
            Outcome::TimeUp => 0,
            Outcome::GoalReached => compute_score(&ScoreInput {
                level: self.level.id,
                size: self.level.size,
                time_limit: self.level.time_limit,
                elapsed,
                moves: attempt.moves,
                hints_used: attempt.hints_used,
            }),
        };
        let new_record = score > self.best_score;
        self.best_score = self.best_score.max(score);
        let summary = Summary {
            outcome,
            score,
            elapsed,
            moves: attempt.moves,
            hints_used: attempt.hints_used,
            level: self.level,
            new_record,
        };
        info!(
            outcome = ?outcome,
            score,
            moves = summary.moves,
            hints = summary.hints_used,
            "attempt finished"
        );
        self.phase = Phase::Finished(summary);
    }
}
