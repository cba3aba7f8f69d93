//! Headless harness: plays batches of matches with scripted paddles through
//! the same frame loop the interactive clients use, then reports the results.

use clap::Parser;
use color_eyre::eyre::{bail, Result};
use pong_core::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "cli_harness")]
#[command(about = "Play headless pong matches and report the results", long_about = None)]
struct Args {
    /// Number of matches to play
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// AI difficulty for the right paddle (easy, medium, hard). Omit for local versus.
    #[arg(long, value_parser = parse_difficulty)]
    ai: Option<Difficulty>,

    /// Base seed; match N is played with seed + N
    #[arg(long, default_value_t = Config::default().seed)]
    seed: u64,

    /// Playfield width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Playfield height in pixels
    #[arg(long, default_value_t = 400.0)]
    height: f32,

    #[arg(long, default_value_t = 11)]
    winning_score: u8,

    /// Abandon a match after this many ticks
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u32,

    /// Chance per tick that a scripted paddle keeps its previous keys
    #[arg(long, default_value_t = 0.4)]
    hesitation: f64,

    /// Print one JSON object per match
    #[arg(long)]
    json: bool,

    /// Draw the last frame of each match
    #[arg(long)]
    show_final: bool,
}

fn parse_difficulty(s: &str) -> std::result::Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{}' (easy, medium, hard)", s))
}

/// Scripted player. Chases the ball like the AI does, but with keys, and
/// sometimes fails to react.
struct Autopilot {
    side: Side,
    hesitation: f64,
    rng: StdRng,
    held: Option<Direction>,
}

impl Autopilot {
    fn new(side: Side, hesitation: f64, seed: u64) -> Self {
        Self {
            side,
            hesitation,
            rng: StdRng::seed_from_u64(seed),
            held: None,
        }
    }

    /// Update this paddle's keys for the coming tick
    fn drive<S: Surface>(&mut self, game: &mut Game<S>) {
        let want = if self.rng.gen_bool(self.hesitation) {
            self.held
        } else {
            AiController::decide(game.ball.pos.y, &game.paddles[self.side.index()])
        };

        if want == self.held {
            return;
        }
        if let Some(direction) = self.held {
            game.set_directional_input(self.side, direction, false);
        }
        if let Some(direction) = want {
            game.set_directional_input(self.side, direction, true);
        }
        self.held = want;
    }
}

#[derive(Debug, Serialize)]
struct MatchReport {
    index: u32,
    seed: u64,
    mode: String,
    score: [u8; 2],
    winner: Option<String>,
    ticks: Tick,
    frames: u64,
}

impl MatchReport {
    fn summary(&self) -> String {
        let outcome = match &self.winner {
            Some(winner) => format!("{} wins", winner),
            None => "unfinished".to_string(),
        };
        format!(
            "match {:>3} [{}] seed {:#x}: {} {}-{} after {} ticks",
            self.index, self.mode, self.seed, outcome, self.score[0], self.score[1], self.ticks
        )
    }
}

fn play_match(args: &Args, index: u32, interrupted: &AtomicBool) -> Result<(MatchReport, View)> {
    let seed = args.seed.wrapping_add(u64::from(index));
    let config = Config {
        winning_score: args.winning_score,
        seed,
        ..Config::default()
    };
    let mode = args.ai.map_or(Mode::Versus, Mode::Ai);

    let mut game = Game::new(config, HeadlessSurface::new(args.width, args.height))?;
    let mut scheduler = ManualScheduler::new();
    let mut left = Autopilot::new(Side::Left, args.hesitation, seed ^ 0x1EF7);
    let mut right = match mode {
        Mode::Versus => Some(Autopilot::new(Side::Right, args.hesitation, seed ^ 0x2167)),
        Mode::Ai(_) => None,
    };

    game.start(mode, &mut scheduler);

    while scheduler.take() {
        if interrupted.load(Ordering::Relaxed) {
            log::warn!("match {} interrupted at tick {}", index, game.tick);
            break;
        }
        if game.tick >= args.max_ticks {
            log::warn!("match {} abandoned after {} ticks", index, game.tick);
            break;
        }

        left.drive(&mut game);
        if let Some(right) = right.as_mut() {
            right.drive(&mut game);
        }

        if let Some(Event::Scored { scorer, score }) = game.frame(&mut scheduler) {
            log::debug!("match {}: {:?} scored ({}-{})", index, scorer, score[0], score[1]);
        }
    }

    let view = game.view();
    let report = MatchReport {
        index,
        seed,
        mode: mode.label(),
        score: game.score,
        winner: game.winner_label().map(str::to_string),
        ticks: game.tick,
        frames: game.surface().frames,
    };
    game.stop(&mut scheduler);

    Ok((report, view))
}

fn print_frame(view: &View) {
    let helper = RenderHelper::new(60, 20, view);
    let border = "─".repeat(60);

    println!("┌{}┐", border);
    for line in helper.render_lines(view) {
        println!("│{}│", line);
    }
    println!("└{}┘", border);
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if !(0.0..=1.0).contains(&args.hesitation) {
        bail!("--hesitation must be between 0 and 1, got {}", args.hesitation);
    }

    // Finish the current match cleanly on Ctrl+C
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))?;

    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut unfinished = 0;
    let mut total_ticks: u64 = 0;
    let mut played = 0;

    for index in 0..args.matches {
        if interrupted.load(Ordering::Relaxed) {
            break;
        }

        let (report, view) = play_match(&args, index, &interrupted)?;
        played += 1;
        total_ticks += u64::from(report.ticks);
        match &report.winner {
            Some(winner) => *wins.entry(winner.clone()).or_default() += 1,
            None => unfinished += 1,
        }

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", report.summary());
        }
        if args.show_final {
            print_frame(&view);
        }
    }

    if !args.json && played > 0 {
        println!();
        for (label, count) in &wins {
            println!("{:>10}: {} win(s)", label, count);
        }
        if unfinished > 0 {
            println!("{:>10}: {}", "unfinished", unfinished);
        }
        println!("average length: {} ticks", total_ticks / played);
    }

    log::info!("played {} of {} matches", played, args.matches);
    Ok(())
}
