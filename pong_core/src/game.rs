//! Match state machine: lifecycle, per-tick simulation and command handling.
//!
//! ```text
//! Setup --start--> Running <--toggle_pause--> Paused
//!                     |
//!                 win check
//!                     v
//!                   Ended --restart--> (Setup) --> Running
//! ```
//!
//! Commands that make no sense in the current phase are ignored.

use crate::ai::AiController;
use crate::error::MatchError;
use crate::input::Controls;
use crate::physics::Physics;
use crate::rng::GameRng;
use crate::scheduler::{FrameRequest, FrameScheduler};
use crate::surface::Surface;
use crate::types::*;

/// One match and everything it owns
pub struct Game<S: Surface> {
    pub config: Config,
    pub tick: Tick,
    pub field_width: f32,
    pub field_height: f32,
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub score: [u8; 2],
    phase: Phase,
    mode: Mode,
    winner: Option<Side>,
    controls: Controls,
    ai: Option<AiController>,
    rng: GameRng,
    first_serve: Side,
    next_serve: Side,
    pending_frame: Option<FrameRequest>,
    surface: S,
}

impl<S: Surface> Game<S> {
    /// Create a match drawing to `surface`. The playfield takes the surface's
    /// viewport size.
    pub fn new(config: Config, surface: S) -> Result<Self, MatchError> {
        let viewport = surface.viewport().ok_or(MatchError::MissingSurface)?;
        if !Self::fits(&config, viewport.width, viewport.height) {
            return Err(MatchError::FieldTooSmall {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let mut rng = GameRng::new(config.seed);
        let first_serve = if rng.coin() { Side::Left } else { Side::Right };

        let mut game = Game {
            config,
            tick: 0,
            field_width: viewport.width,
            field_height: viewport.height,
            paddles: [
                Self::initial_paddle(&config, Side::Left, viewport.width, viewport.height),
                Self::initial_paddle(&config, Side::Right, viewport.width, viewport.height),
            ],
            ball: Ball::new(Vec2::zero(), Vec2::zero(), config.ball_radius),
            score: [0, 0],
            phase: Phase::Setup,
            mode: Mode::Versus,
            winner: None,
            controls: Controls::new(),
            ai: None,
            rng,
            first_serve,
            next_serve: first_serve,
            pending_frame: None,
            surface,
        };

        game.serve();
        log::debug!(
            "match created on {}x{} field",
            game.field_width,
            game.field_height
        );
        Ok(game)
    }

    fn fits(config: &Config, width: f32, height: f32) -> bool {
        height >= config.paddle_height
            && width > 2.0 * (config.paddle_offset + config.paddle_width + config.ball_radius)
    }

    fn initial_paddle(config: &Config, side: Side, width: f32, height: f32) -> Paddle {
        Paddle::new(
            config.paddle_x(side, width),
            config.paddle_start_y(height),
            config.paddle_width,
            config.paddle_height,
            config.paddle_speed,
        )
    }

    /// Begin play. Only valid from `Setup`.
    pub fn start(&mut self, mode: Mode, scheduler: &mut impl FrameScheduler) {
        if self.phase != Phase::Setup {
            log::debug!("ignoring start while {}", self.phase.as_str());
            return;
        }

        self.mode = mode;
        self.ai = mode.difficulty().map(AiController::new);
        self.begin(scheduler);
    }

    /// Reinitialize a finished match and play again. Only valid from `Ended`.
    pub fn restart(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.phase != Phase::Ended {
            log::debug!("ignoring restart while {}", self.phase.as_str());
            return;
        }

        self.phase = Phase::Setup;
        self.reset_match();
        self.surface.notify(&Event::Restarted);
        self.begin(scheduler);
    }

    fn begin(&mut self, scheduler: &mut impl FrameScheduler) {
        self.phase = Phase::Running;
        log::info!("match started: {}", self.mode.label());
        self.request_frame(scheduler);
    }

    /// Tear the match down: cancel the pending frame, release overlays and
    /// hand the surface back.
    pub fn stop(mut self, scheduler: &mut impl FrameScheduler) -> S {
        if let Some(request) = self.pending_frame.take() {
            scheduler.cancel_frame(request);
        }
        self.controls.clear();
        self.surface.notify(&Event::Stopped);
        log::info!(
            "match stopped at {}-{} ({})",
            self.score[0],
            self.score[1],
            self.phase.as_str()
        );
        self.surface
    }

    /// Pause a running match or resume a paused one
    pub fn toggle_pause(&mut self) {
        let event = match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                Event::Paused
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                Event::Resumed
            }
            Phase::Setup | Phase::Ended => {
                log::debug!("ignoring pause while {}", self.phase.as_str());
                return;
            }
        };

        log::debug!("{:?} at tick {}", event, self.tick);
        self.surface.notify(&event);
    }

    /// Record a held/released direction key for `side`
    pub fn set_directional_input(&mut self, side: Side, direction: Direction, pressed: bool) {
        if !matches!(self.phase, Phase::Running | Phase::Paused) {
            log::trace!("ignoring input while {}", self.phase.as_str());
            return;
        }
        self.controls.set(side, direction, pressed);
    }

    /// Resize the playfield. Entities are kept and clamped into the new bounds,
    /// except the ball of an ended match, which stays where it finished.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !Self::fits(&self.config, width, height) {
            log::warn!("ignoring resize to {}x{}: too small", width, height);
            return;
        }

        self.field_width = width;
        self.field_height = height;
        self.paddles[Side::Right.index()].x = self.config.paddle_x(Side::Right, width);
        for paddle in &mut self.paddles {
            paddle.y = Physics::clamp_paddle_y(paddle.y, paddle.height, height);
        }
        // An ended match keeps its final frame, ball past the goal line included
        if self.phase != Phase::Ended {
            self.ball.pos.x = self.ball.pos.x.clamp(0.0, width);
            self.ball.pos.y = self.ball.pos.y.clamp(0.0, height);
        }
        log::debug!("field resized to {}x{}", width, height);
    }

    /// One pass of the host's frame loop: advance, draw, and ask for the next
    /// frame while the match is live.
    pub fn frame(&mut self, scheduler: &mut impl FrameScheduler) -> Option<Event> {
        self.pending_frame = None;

        let event = self.step();
        let view = self.view();
        self.surface.present(&view);
        if let Some(ref event) = event {
            self.surface.notify(event);
        }

        if self.is_live() {
            self.request_frame(scheduler);
        }
        event
    }

    fn request_frame(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.pending_frame.is_none() {
            self.pending_frame = Some(scheduler.request_frame());
        }
    }

    /// Step the simulation forward by one tick. Does nothing unless running.
    pub fn step(&mut self) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }

        self.tick += 1;

        self.apply_controls();
        Physics::move_ball(&mut self.ball);

        Physics::paddle_collision(
            &mut self.ball,
            &self.paddles[0],
            Side::Left,
            &self.config,
        );
        Physics::paddle_collision(
            &mut self.ball,
            &self.paddles[1],
            Side::Right,
            &self.config,
        );

        if let Some(ai) = self.ai {
            ai.act(
                &mut self.paddles[Side::Right.index()],
                self.ball.pos.y,
                self.field_height,
                &mut self.rng,
            );
        }

        Physics::wall_collision(&mut self.ball, self.field_height);

        Physics::check_goal(&self.ball, self.field_width).map(|scorer| self.handle_score(scorer))
    }

    fn apply_controls(&mut self) {
        for side in [Side::Left, Side::Right] {
            if side == Side::Right && self.mode.is_ai() {
                continue;
            }
            for direction in self.controls.held(side) {
                Physics::move_paddle(
                    &mut self.paddles[side.index()],
                    direction,
                    self.field_height,
                );
            }
        }
    }

    /// Handle a scoring event
    fn handle_score(&mut self, scorer: Side) -> Event {
        let idx = scorer.index();
        self.score[idx] = self.score[idx].saturating_add(1);
        log::debug!(
            "{:?} scored: {}-{}",
            scorer,
            self.score[0],
            self.score[1]
        );

        // The final frame keeps the ball past the goal line
        if let Some(event) = self.check_winner() {
            return event;
        }

        self.serve();
        Event::Scored {
            scorer,
            score: self.score,
        }
    }

    /// End the match if either side reached the winning score
    fn check_winner(&mut self) -> Option<Event> {
        if self.phase == Phase::Ended {
            return None;
        }

        let winner = [Side::Left, Side::Right]
            .into_iter()
            .find(|side| self.score[side.index()] >= self.config.winning_score)?;

        self.winner = Some(winner);
        self.phase = Phase::Ended;
        self.controls.clear();

        let label = self.winner_label().unwrap_or_default().to_string();
        log::info!(
            "{} wins {}-{} after {} ticks",
            label,
            self.score[0],
            self.score[1],
            self.tick
        );

        Some(Event::GameOver {
            winner,
            label,
            score: self.score,
        })
    }

    /// Reset ball for a serve, alternating direction
    fn serve(&mut self) {
        let toward = self.next_serve;
        Physics::serve_ball(
            &mut self.ball,
            toward,
            &self.config,
            (self.field_width, self.field_height),
            &mut self.rng,
        );
        self.next_serve = toward.opposite();
        log::trace!("serve toward {:?}", toward);
    }

    /// Reset scores, inputs and entities for a rematch
    fn reset_match(&mut self) {
        self.tick = 0;
        self.score = [0, 0];
        self.winner = None;
        self.controls.clear();
        self.rng = GameRng::new(self.config.seed);
        self.rng.coin(); // keep the sequence aligned with a fresh match
        self.next_serve = self.first_serve;
        self.paddles = [
            Self::initial_paddle(&self.config, Side::Left, self.field_width, self.field_height),
            Self::initial_paddle(&self.config, Side::Right, self.field_width, self.field_height),
        ];
        self.ball = Ball::new(Vec2::zero(), Vec2::zero(), self.config.ball_radius);
        self.serve();
    }

    /// Generate a view of the current match state for rendering
    pub fn view(&self) -> View {
        View {
            tick: self.tick,
            phase: self.phase,
            mode: self.mode,
            field_width: self.field_width,
            field_height: self.field_height,
            left: self.paddles[0],
            right: self.paddles[1],
            ball: self.ball,
            score: self.score,
            winner: self.winner,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Get the winner (if the match is over)
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Display name of the winner
    pub fn winner_label(&self) -> Option<&'static str> {
        self.winner.map(|side| match (side, self.mode) {
            (Side::Left, _) => "Player 1",
            (Side::Right, Mode::Ai(_)) => "AI",
            (Side::Right, Mode::Versus) => "Player 2",
        })
    }

    /// Record of the finished match, for history/leaderboards
    pub fn result(&self) -> Option<MatchResult> {
        let winner = self.winner?;
        Some(MatchResult {
            mode: self.mode,
            score: self.score,
            winner,
            winner_label: self.winner_label().unwrap_or_default().to_string(),
            ticks: self.tick,
        })
    }

    /// Check if the match is advancing
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Running or paused: the frame loop keeps going
    pub fn is_live(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Get a human-readable status string
    pub fn status_string(&self) -> &'static str {
        match self.phase {
            Phase::Setup => "Waiting to start",
            Phase::Running => "Playing",
            Phase::Paused => "Paused",
            Phase::Ended => "Game over",
        }
    }
}
