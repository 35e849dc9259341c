use std::fs::File;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use logic_maze::config::Settings;
use logic_maze::game::{Game, Phase};
use logic_maze::input::{action_for, Action};
use logic_maze::ui::Renderer;

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logging(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    stdout
        .execute(EnterAlternateScreen)
        .context("entering alternate screen")?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, settings: &Settings) -> Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(settings.level);
    let mut renderer = Renderer::new();
    let tick = settings.tick();
    let frame_time = settings.frame_time();
    let mut last_tick = Instant::now();
    info!(level = settings.level, seed = ?settings.seed, "session started");

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let Some(action) = action_for(key.code) else {
                        continue;
                    };
                    if action == Action::Quit {
                        info!(best = game.best_score(), "session ended");
                        return Ok(());
                    }
                    apply(&mut game, action, &mut rng, Instant::now());
                }
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            game.tick(last_tick);
        }
        renderer.render(stdout, &game, Instant::now())?;
        stdout.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn apply(game: &mut Game, action: Action, rng: &mut StdRng, now: Instant) {
    let playing = matches!(game.phase(), Phase::Playing(_));
    match action {
        Action::Move(dir) if playing => {
            game.move_player(dir, now);
        }
        Action::Hint if playing => {
            if let Err(err) = game.request_hint(now) {
                debug!(%err, "hint refused");
            }
        }
        Action::Start if !playing => game.start(rng, now),
        Action::SelectLevel(id) if matches!(game.phase(), Phase::Ready) => {
            game.select_level(id);
        }
        Action::Reset => game.reset(),
        _ => {}
    }
}
