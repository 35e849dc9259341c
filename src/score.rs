use std::time::Duration;

const BASE_SCORE: f64 = 1000.0;
const MOVE_BONUS_PER_MOVE: f64 = 10.0;
const DIFFICULTY_BONUS_PER_LEVEL: f64 = 200.0;
pub const HINT_PENALTY: f64 = 50.0;

#[derive(Clone, Copy, Debug)]
pub struct ScoreInput {
    pub level: u32,
    pub size: usize,
    pub time_limit: Duration,
    pub elapsed: Duration,
    pub moves: u32,
    pub hints_used: u32,
}

/// Score for reaching the goal. A time-up finish never calls this; it scores 0.
pub fn compute_score(input: &ScoreInput) -> u32 {
    let remaining_ms = input.time_limit.as_millis() as f64 - input.elapsed.as_millis() as f64;
    let time_bonus = (remaining_ms / 100.0).max(0.0);
    let cells = (input.size * input.size) as f64;
    let move_bonus = ((cells - input.moves as f64) * MOVE_BONUS_PER_MOVE).max(0.0);
    let difficulty_bonus = input.level as f64 * DIFFICULTY_BONUS_PER_LEVEL;
    let hint_penalty = input.hints_used as f64 * HINT_PENALTY;

    let total = BASE_SCORE + time_bonus + move_bonus + difficulty_bonus - hint_penalty;
    total.floor().max(0.0) as u32
}
