use std::io::{self, Write};
use std::time::Instant;

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::{Attempt, Game, Outcome, Phase, Summary, MAX_HINTS};
use crate::grid::Pos;
use crate::level::LEVELS;

const CELL_W: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Player,
    Wall,
    Floor,
    Start,
    Goal,
    Hint,
    Visited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub glyph: Glyph,
    pub color: Color,
}

/// Redraws only what changed since the last frame.
pub struct Renderer {
    last: Vec<Sprite>,
    last_size: usize,
    last_hud: String,
    last_text: Vec<String>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_size: 0,
            last_hud: String::new(),
            last_text: Vec::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render<W: Write>(&mut self, out: &mut W, game: &Game, now: Instant) -> io::Result<()> {
        match game.phase() {
            Phase::Ready => self.render_text(out, &ready_lines(game)),
            Phase::Finished(summary) => self.render_text(out, &finished_lines(game, summary)),
            Phase::Playing(attempt) => self.render_board(out, game, attempt, now),
        }
    }

    fn render_text<W: Write>(&mut self, out: &mut W, lines: &[String]) -> io::Result<()> {
        if !self.needs_full && self.last_text == lines {
            return Ok(());
        }
        out.queue(Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            out.queue(MoveTo(2, 1 + row as u16))?;
            out.queue(Print(line))?;
        }
        out.flush()?;
        self.last_text = lines.to_vec();
        self.needs_full = false;
        Ok(())
    }

    fn render_board<W: Write>(
        &mut self,
        out: &mut W,
        game: &Game,
        attempt: &Attempt,
        now: Instant,
    ) -> io::Result<()> {
        let size = attempt.grid().size();
        let hud = hud_line(game, attempt, now);
        let needed_h = (size + 2) as u16;
        let needed_w = ((size * CELL_W) as u16).max(hud.width() as u16);

        if self.last_size != size || !self.last_text.is_empty() {
            self.last = vec![
                Sprite {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                size * size
            ];
            self.last_size = size;
            self.last_text.clear();
            self.needs_full = true;
        }

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(MoveTo(0, 0))?;
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - (size * CELL_W) as u16) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        if self.needs_full || hud != self.last_hud {
            self.draw_hud(out, hud)?;
        }

        let hint = attempt.visible_hint(now);
        for pos in attempt.grid().positions() {
            let sprite = sprite_for(attempt, hint, pos);
            let idx = pos.y * size + pos.x;
            if self.needs_full || sprite != self.last[idx] {
                self.last[idx] = sprite;
                self.draw_cell(out, pos, sprite)?;
            }
        }

        let footer = if hint.is_empty() {
            "arrows/WASD move  h hint  r reset  q quit"
        } else {
            "Hint: follow the yellow trail!"
        };
        out.queue(MoveTo(self.origin_x, self.origin_y + size as u16))?;
        out.queue(Clear(ClearType::CurrentLine))?;
        out.queue(Print(footer))?;

        self.needs_full = false;
        out.flush()
    }

    /// HUD sits on the row above the maze, left-aligned with it.
    fn draw_hud<W: Write>(&mut self, out: &mut W, hud: String) -> io::Result<()> {
        out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
        out.queue(SetForegroundColor(Color::White))?;
        out.queue(Clear(ClearType::CurrentLine))?;
        out.queue(Print(&hud))?;
        out.queue(ResetColor)?;
        self.last_hud = hud;
        Ok(())
    }

    fn draw_cell<W: Write>(&self, out: &mut W, pos: Pos, sprite: Sprite) -> io::Result<()> {
        let text = match sprite.glyph {
            Glyph::Player => "🚀",
            Glyph::Wall => "██",
            Glyph::Floor => "  ",
            Glyph::Start => "S ",
            Glyph::Goal => "G ",
            Glyph::Hint => "··",
            Glyph::Visited => "░░",
        };
        let x_pos = self.origin_x + (pos.x * CELL_W) as u16;
        let y_pos = self.origin_y + pos.y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(sprite.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// What to draw at `pos`. Start and goal markers win over the hint trail,
/// which wins over the visited trail.
pub fn sprite_for(attempt: &Attempt, hint: &[Pos], pos: Pos) -> Sprite {
    if pos == attempt.player() {
        return Sprite {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    let cell = attempt.grid().cell(pos);
    let (glyph, color) = if cell.wall {
        (Glyph::Wall, Color::DarkGrey)
    } else if cell.start {
        (Glyph::Start, Color::Green)
    } else if cell.goal {
        (Glyph::Goal, Color::Red)
    } else if hint.contains(&pos) {
        (Glyph::Hint, Color::Yellow)
    } else if cell.visited {
        (Glyph::Visited, Color::Blue)
    } else {
        (Glyph::Floor, Color::Reset)
    };
    Sprite { glyph, color }
}

fn hud_line(game: &Game, attempt: &Attempt, now: Instant) -> String {
    let secs = attempt.remaining_secs(now);
    format!(
        "{}  Time: {}:{:02}  Moves: {}  Hints: {}/{}",
        game.level().name,
        secs / 60,
        secs % 60,
        attempt.moves(),
        attempt.hints_left(),
        MAX_HINTS
    )
}

fn ready_lines(game: &Game) -> Vec<String> {
    let mut lines = vec![
        "LOGIC MAZE".to_string(),
        String::new(),
        "Find the way from S to G before time runs out.".to_string(),
        String::new(),
    ];
    for level in LEVELS {
        let marker = if level.id == game.level().id { '>' } else { ' ' };
        lines.push(format!(
            "{} {} {:<7} {:>2}x{:<2} {:>3}s  {}",
            marker,
            level.id,
            level.name,
            level.size,
            level.size,
            level.time_limit.as_secs(),
            level.stars()
        ));
    }
    lines.push(String::new());
    lines.push(format!("Best score: {}", game.best_score()));
    lines.push(String::new());
    lines.push("1-4 pick level  Enter start  q quit".to_string());
    lines
}

fn finished_lines(game: &Game, summary: &Summary) -> Vec<String> {
    let headline = match (summary.outcome, summary.new_record) {
        (Outcome::TimeUp, _) => "Time up!",
        (Outcome::GoalReached, true) => "New record!",
        (Outcome::GoalReached, false) => "Goal reached!",
    };
    vec![
        headline.to_string(),
        String::new(),
        format!("Score:  {}", summary.score),
        format!("Time:   {:.1}s", summary.elapsed.as_secs_f64()),
        format!("Moves:  {}", summary.moves),
        format!("Level:  {}", summary.level.name),
        format!("Hints:  {}", summary.hints_used),
        format!("Best:   {}", game.best_score()),
        String::new(),
        "Enter play again  r menu  q quit".to_string(),
    ]
}
