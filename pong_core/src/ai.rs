//! Reactive AI opponent.
//!
//! The controller looks only at the ball's current height and the paddle's
//! centre: no trajectory prediction and no memory between ticks.

use crate::physics::Physics;
use crate::rng::GameRng;
use crate::types::*;

/// Half-width of the band around the paddle centre where the AI holds still
pub const DEAD_ZONE: f32 = 10.0;

/// AI driver for one paddle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AiController {
    difficulty: Difficulty,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Direction that brings the paddle centre toward `ball_y`, or `None`
    /// inside the dead zone.
    pub fn decide(ball_y: f32, paddle: &Paddle) -> Option<Direction> {
        let diff = ball_y - paddle.center_y();

        if diff.abs() <= DEAD_ZONE {
            None
        } else if diff > 0.0 {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    }

    /// Run one tick of AI control. Returns true if the paddle moved.
    pub fn act(
        &self,
        paddle: &mut Paddle,
        ball_y: f32,
        bounds_height: f32,
        rng: &mut GameRng,
    ) -> bool {
        if rng.chance(self.difficulty.skip_chance()) {
            log::trace!("AI ({}) missed its reaction", self.difficulty.as_str());
            return false;
        }

        match Self::decide(ball_y, paddle) {
            Some(direction) => {
                Physics::move_paddle_at(paddle, direction, self.difficulty.speed(), bounds_height);
                true
            }
            None => false,
        }
    }
}
