//! Entity kinematics and the collision/scoring rules for Pong.

use crate::rng::GameRng;
use crate::types::*;

/// Physics calculations for match simulation
pub struct Physics;

impl Physics {
    /// Move a paddle one step at its configured speed, clamped to the field
    pub fn move_paddle(paddle: &mut Paddle, direction: Direction, bounds_height: f32) {
        let speed = paddle.speed;
        Self::move_paddle_at(paddle, direction, speed, bounds_height);
    }

    /// Move a paddle one step at an explicit speed. `paddle.speed` is untouched.
    pub fn move_paddle_at(paddle: &mut Paddle, direction: Direction, speed: f32, bounds_height: f32) {
        paddle.y += direction.sign() * speed;
        paddle.y = Self::clamp_paddle_y(paddle.y, paddle.height, bounds_height);
    }

    /// Constrain a paddle's top edge to `[0, bounds_height - height]`
    pub fn clamp_paddle_y(y: f32, height: f32, bounds_height: f32) -> f32 {
        let max_y = (bounds_height - height).max(0.0);
        y.clamp(0.0, max_y)
    }

    /// Advance the ball by one tick of velocity. No sub-stepping: a fast ball
    /// can pass through a paddle between two ticks.
    pub fn move_ball(ball: &mut Ball) {
        ball.pos.x += ball.vel.x;
        ball.pos.y += ball.vel.y;
    }

    /// Bounce off the top/bottom walls. Returns true on a bounce.
    pub fn wall_collision(ball: &mut Ball, field_height: f32) -> bool {
        let r = ball.radius;

        if ball.pos.y - r < 0.0 && ball.vel.y < 0.0 {
            ball.vel.y = -ball.vel.y;
            ball.pos.y = r.min(field_height);
            true
        } else if ball.pos.y + r > field_height && ball.vel.y > 0.0 {
            ball.vel.y = -ball.vel.y;
            ball.pos.y = (field_height - r).max(0.0);
            true
        } else {
            false
        }
    }

    /// Does the ball's bounding circle overlap the paddle's rectangle?
    pub fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
        let closest_x = ball.pos.x.clamp(paddle.x, paddle.x + paddle.width);
        let closest_y = ball.pos.y.clamp(paddle.y, paddle.y + paddle.height);
        let dx = ball.pos.x - closest_x;
        let dy = ball.pos.y - closest_y;

        dx * dx + dy * dy <= ball.radius * ball.radius
    }

    /// Check for paddle-ball collision and handle it
    pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle, side: Side, config: &Config) -> bool {
        if !Self::overlaps(ball, paddle) {
            return false;
        }

        // Only reflect if moving toward the paddle and not already behind it
        let facing = match side {
            Side::Left => ball.vel.x < 0.0 && ball.pos.x >= paddle.x,
            Side::Right => ball.vel.x > 0.0 && ball.pos.x <= paddle.x + paddle.width,
        };
        if !facing {
            return false;
        }

        let speed_x = (ball.vel.x.abs() * config.ball_speed_up).min(config.max_ball_speed_x);

        // -1 at the top tip, +1 at the bottom tip
        let half_h = paddle.height / 2.0;
        let offset = ((ball.pos.y - paddle.center_y()) / half_h).clamp(-1.0, 1.0);
        ball.vel.y = offset * config.max_deflection;

        match side {
            Side::Left => {
                ball.vel.x = speed_x;
                ball.pos.x = paddle.x + paddle.width + ball.radius;
            }
            Side::Right => {
                ball.vel.x = -speed_x;
                ball.pos.x = paddle.x - ball.radius;
            }
        }

        true
    }

    /// Check if the ball crossed a goal line (scoring condition)
    pub fn check_goal(ball: &Ball, field_width: f32) -> Option<Side> {
        if ball.pos.x < 0.0 {
            Some(Side::Right) // Right player scored
        } else if ball.pos.x > field_width {
            Some(Side::Left) // Left player scored
        } else {
            None
        }
    }

    /// Recenter the ball and send it toward `toward`
    pub fn serve_ball(
        ball: &mut Ball,
        toward: Side,
        config: &Config,
        field: (f32, f32),
        rng: &mut GameRng,
    ) {
        let (field_width, field_height) = field;
        ball.pos = Vec2::new(field_width / 2.0, field_height / 2.0);

        let x_vel = match toward {
            Side::Left => -config.ball_speed_x,
            Side::Right => config.ball_speed_x,
        };
        let y_vel = if rng.coin() {
            config.ball_speed_y
        } else {
            -config.ball_speed_y
        };

        ball.vel = Vec2::new(x_vel, y_vel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_paddle(config: &Config) -> Paddle {
        Paddle::new(
            config.paddle_x(Side::Left, 800.0),
            160.0,
            config.paddle_width,
            config.paddle_height,
            config.paddle_speed,
        )
    }

    fn right_paddle(config: &Config) -> Paddle {
        Paddle::new(
            config.paddle_x(Side::Right, 800.0),
            160.0,
            config.paddle_width,
            config.paddle_height,
            config.paddle_speed,
        )
    }

    #[test]
    fn test_paddle_movement() {
        let mut paddle = Paddle::new(10.0, 160.0, 10.0, 80.0, 5.0);

        Physics::move_paddle(&mut paddle, Direction::Up, 400.0);
        assert_eq!(paddle.y, 155.0);

        Physics::move_paddle(&mut paddle, Direction::Down, 400.0);
        Physics::move_paddle(&mut paddle, Direction::Down, 400.0);
        assert_eq!(paddle.y, 165.0);
    }

    #[test]
    fn test_paddle_bounds() {
        let mut paddle = Paddle::new(10.0, 2.0, 10.0, 80.0, 5.0);

        Physics::move_paddle(&mut paddle, Direction::Up, 400.0);
        assert_eq!(paddle.y, 0.0);

        paddle.y = 318.0;
        Physics::move_paddle(&mut paddle, Direction::Down, 400.0);
        assert_eq!(paddle.y, 320.0);
    }

    #[test]
    fn test_move_paddle_at_keeps_configured_speed() {
        let mut paddle = Paddle::new(10.0, 160.0, 10.0, 80.0, 5.0);

        Physics::move_paddle_at(&mut paddle, Direction::Down, 6.0, 400.0);

        assert_eq!(paddle.y, 166.0);
        assert_eq!(paddle.speed, 5.0);
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let mut ball = Ball::new(Vec2::new(400.0, 200.0), Vec2::new(5.0, -3.0), 10.0);

        Physics::move_ball(&mut ball);

        assert_eq!(ball.pos, Vec2::new(405.0, 197.0));
        assert_eq!(ball.vel, Vec2::new(5.0, -3.0));
    }

    #[test]
    fn test_ball_wall_collision_top() {
        let mut ball = Ball::new(Vec2::new(400.0, 8.0), Vec2::new(5.0, -3.0), 10.0);

        assert!(Physics::wall_collision(&mut ball, 400.0));
        assert_eq!(ball.vel.y, 3.0); // Sign flip, same magnitude
        assert_eq!(ball.vel.x, 5.0);
        assert!(ball.pos.y - ball.radius >= 0.0);
    }

    #[test]
    fn test_ball_wall_collision_bottom() {
        let mut ball = Ball::new(Vec2::new(400.0, 395.0), Vec2::new(-5.0, 4.0), 10.0);

        assert!(Physics::wall_collision(&mut ball, 400.0));
        assert_eq!(ball.vel.y, -4.0);
        assert!(ball.pos.y + ball.radius <= 400.0);
    }

    #[test]
    fn test_no_wall_bounce_when_leaving_wall() {
        let mut ball = Ball::new(Vec2::new(400.0, 5.0), Vec2::new(5.0, 3.0), 10.0);

        assert!(!Physics::wall_collision(&mut ball, 400.0));
        assert_eq!(ball.vel.y, 3.0);
    }

    #[test]
    fn test_left_paddle_collision() {
        let config = Config::default();
        let paddle = left_paddle(&config);

        let mut ball = Ball::new(
            Vec2::new(paddle.x + paddle.width + 5.0, paddle.center_y()),
            Vec2::new(-5.0, 2.0),
            config.ball_radius,
        );

        let hit = Physics::paddle_collision(&mut ball, &paddle, Side::Left, &config);

        assert!(hit);
        assert!(ball.vel.x > 0.0); // Reversed
        assert!((ball.vel.x - 5.25).abs() < 1e-4); // Sped up by 5%
        assert_eq!(ball.vel.y, 0.0); // Dead centre hit
        assert_eq!(ball.pos.x, paddle.x + paddle.width + ball.radius);
    }

    #[test]
    fn test_right_paddle_collision_deflects_by_offset() {
        let config = Config::default();
        let paddle = right_paddle(&config);

        // Hit the upper quarter of the paddle
        let mut ball = Ball::new(
            Vec2::new(paddle.x - 5.0, paddle.y + paddle.height / 4.0),
            Vec2::new(5.0, 0.0),
            config.ball_radius,
        );

        let hit = Physics::paddle_collision(&mut ball, &paddle, Side::Right, &config);

        assert!(hit);
        assert!(ball.vel.x < 0.0);
        assert!((ball.vel.y + config.max_deflection / 2.0).abs() < 1e-4); // Sent upward
    }

    #[test]
    fn test_collision_is_deterministic() {
        let config = Config::default();
        let paddle = left_paddle(&config);
        let start = Ball::new(Vec2::new(25.0, 175.0), Vec2::new(-6.0, 1.0), 10.0);

        let mut a = start;
        let mut b = start;
        Physics::paddle_collision(&mut a, &paddle, Side::Left, &config);
        Physics::paddle_collision(&mut b, &paddle, Side::Left, &config);

        assert_eq!(a, b);
    }

    #[test]
    fn test_ball_speed_capped_on_hit() {
        let config = Config::default();
        let paddle = left_paddle(&config);

        let mut ball = Ball::new(
            Vec2::new(paddle.x + paddle.width + 5.0, paddle.center_y()),
            Vec2::new(-config.max_ball_speed_x, 0.0),
            config.ball_radius,
        );

        Physics::paddle_collision(&mut ball, &paddle, Side::Left, &config);

        assert_eq!(ball.vel.x, config.max_ball_speed_x);
    }

    #[test]
    fn test_no_collision_when_moving_away() {
        let config = Config::default();
        let paddle = left_paddle(&config);

        let mut ball = Ball::new(
            Vec2::new(paddle.x + paddle.width + 5.0, paddle.center_y()),
            Vec2::new(5.0, 0.0),
            config.ball_radius,
        );

        assert!(!Physics::paddle_collision(&mut ball, &paddle, Side::Left, &config));
        assert_eq!(ball.vel.x, 5.0);
    }

    #[test]
    fn test_no_collision_when_apart() {
        let config = Config::default();
        let paddle = left_paddle(&config);

        let mut ball = Ball::new(Vec2::new(400.0, 200.0), Vec2::new(-5.0, 0.0), 10.0);

        assert!(!Physics::paddle_collision(&mut ball, &paddle, Side::Left, &config));
    }

    #[test]
    fn test_goal_detection() {
        let past_left = Ball::new(Vec2::new(-1.0, 200.0), Vec2::zero(), 10.0);
        assert_eq!(Physics::check_goal(&past_left, 800.0), Some(Side::Right));

        let past_right = Ball::new(Vec2::new(801.0, 200.0), Vec2::zero(), 10.0);
        assert_eq!(Physics::check_goal(&past_right, 800.0), Some(Side::Left));

        let on_line = Ball::new(Vec2::new(800.0, 200.0), Vec2::zero(), 10.0);
        assert_eq!(Physics::check_goal(&on_line, 800.0), None);
    }

    #[test]
    fn test_serve_ball() {
        let config = Config::default();
        let mut ball = Ball::new(Vec2::zero(), Vec2::zero(), 10.0);
        let mut rng = GameRng::new(12345);

        Physics::serve_ball(&mut ball, Side::Right, &config, (800.0, 400.0), &mut rng);

        assert_eq!(ball.pos, Vec2::new(400.0, 200.0));
        assert_eq!(ball.vel.x, config.ball_speed_x);
        assert_eq!(ball.vel.y.abs(), config.ball_speed_y);

        Physics::serve_ball(&mut ball, Side::Left, &config, (800.0, 400.0), &mut rng);
        assert_eq!(ball.vel.x, -config.ball_speed_x);
    }

    #[test]
    fn test_deterministic_serve() {
        let config = Config::default();
        let mut ball1 = Ball::new(Vec2::zero(), Vec2::zero(), 10.0);
        let mut ball2 = Ball::new(Vec2::zero(), Vec2::zero(), 10.0);
        let mut rng1 = GameRng::new(99);
        let mut rng2 = GameRng::new(99);

        for _ in 0..8 {
            Physics::serve_ball(&mut ball1, Side::Left, &config, (800.0, 400.0), &mut rng1);
            Physics::serve_ball(&mut ball2, Side::Left, &config, (800.0, 400.0), &mut rng2);
            assert_eq!(ball1.vel, ball2.vel);
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A paddle never leaves the field, whatever it is asked to do
            #[test]
            fn prop_paddle_stays_in_bounds(
                start in -50.0f32..450.0f32,
                speed in 0.0f32..40.0f32,
                moves in proptest::collection::vec(any::<bool>(), 1..64)
            ) {
                let mut paddle = Paddle::new(10.0, start, 10.0, 80.0, speed);
                for up in moves {
                    let direction = if up { Direction::Up } else { Direction::Down };
                    Physics::move_paddle(&mut paddle, direction, 400.0);
                    prop_assert!(paddle.y >= 0.0);
                    prop_assert!(paddle.y <= 400.0 - paddle.height);
                }
            }

            /// A paddle hit never pushes |speed_x| past the rally cap
            #[test]
            fn prop_hit_speed_bounded(
                vx in 0.5f32..12.0f32,
                vy in -6.0f32..6.0f32,
                y in 150.0f32..250.0f32
            ) {
                let config = Config::default();
                let paddle = Paddle::new(10.0, 160.0, 10.0, 80.0, 5.0);
                let mut ball = Ball::new(Vec2::new(25.0, y), Vec2::new(-vx, vy), 10.0);

                Physics::paddle_collision(&mut ball, &paddle, Side::Left, &config);

                prop_assert!(ball.vel.x.abs() <= config.max_ball_speed_x);
                prop_assert!(ball.vel.y.abs() <= config.max_deflection);
            }
        }
    }
}
