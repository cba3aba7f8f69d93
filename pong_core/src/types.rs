//! Core types and constants for the Pong match simulation.
//!
//! All geometry is expressed in playfield pixels with the origin in the
//! top-left corner and y growing downward. Speeds are pixels per tick.

/// Tick counter type
pub type Tick = u32;

/// Player/paddle side
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index into `[left, right]` arrays (scores, controls)
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Vertical paddle direction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign of the y delta (screen y grows downward)
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
        }
    }
}

/// AI opponent difficulty tier
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Paddle speed used while the AI moves (pixels per tick)
    pub fn speed(self) -> f32 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Medium => 4.0,
            Difficulty::Hard => 6.0,
        }
    }

    /// Per-tick probability that the AI does not react at all
    pub fn skip_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium | Difficulty::Hard => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Who controls the right paddle
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Two local players sharing one keyboard
    #[default]
    Versus,
    /// Right paddle driven by the AI controller
    Ai(Difficulty),
}

impl Mode {
    pub fn is_ai(self) -> bool {
        matches!(self, Mode::Ai(_))
    }

    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            Mode::Ai(difficulty) => Some(difficulty),
            Mode::Versus => None,
        }
    }

    /// Header text shown above the playfield
    pub fn label(self) -> String {
        match self {
            Mode::Versus => "Local Versus".to_string(),
            Mode::Ai(difficulty) => format!("VS AI - {}", difficulty.as_str().to_uppercase()),
        }
    }
}

/// Match lifecycle phase
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Entities placed, physics not advancing
    Setup,
    /// Advancing once per tick
    Running,
    /// Frozen, state retained for resume
    Paused,
    /// Terminal: scores and winner frozen
    Ended,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::Ended => "Ended",
        }
    }
}

/// Match configuration
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a paddle and its goal line
    pub paddle_offset: f32,
    /// Paddle movement speed (pixels per tick)
    pub paddle_speed: f32,
    pub ball_radius: f32,
    /// Serve speed along x
    pub ball_speed_x: f32,
    /// Serve speed along y (sign randomized per serve)
    pub ball_speed_y: f32,
    /// Multiplier on |speed_x| per paddle hit
    pub ball_speed_up: f32,
    /// Cap for |speed_x| during rallies
    pub max_ball_speed_x: f32,
    /// |speed_y| after a hit on the very tip of a paddle
    pub max_deflection: f32,
    /// Score to win
    pub winning_score: u8,
    /// Random seed
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paddle_width: 10.0,
            paddle_height: 80.0,
            paddle_offset: 10.0,
            paddle_speed: 5.0,
            ball_radius: 10.0,
            ball_speed_x: 5.0,
            ball_speed_y: 3.0,
            ball_speed_up: 1.05,
            max_ball_speed_x: 12.0,
            max_deflection: 6.0,
            winning_score: 11,
            seed: 0xC0FFEE,
        }
    }
}

impl Config {
    /// Left edge x of the paddle on `side`
    pub fn paddle_x(&self, side: Side, field_width: f32) -> f32 {
        match side {
            Side::Left => self.paddle_offset,
            Side::Right => field_width - self.paddle_offset - self.paddle_width,
        }
    }

    /// Top y of a vertically centered paddle
    pub fn paddle_start_y(&self, field_height: f32) -> f32 {
        field_height / 2.0 - self.paddle_height / 2.0
    }
}

/// 2D vector in playfield pixels
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn zero() -> Self {
        Vec2 { x: 0.0, y: 0.0 }
    }
}

/// Paddle state. `(x, y)` is the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Configured speed (pixels per tick)
    pub speed: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Paddle {
            x,
            y,
            width,
            height,
            speed,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Ball state
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Velocity (pixels per tick)
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Ball { pos, vel, radius }
    }
}

/// View data for rendering, emitted once per tick
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct View {
    pub tick: Tick,
    pub phase: Phase,
    pub mode: Mode,
    pub field_width: f32,
    pub field_height: f32,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// [left, right] scores
    pub score: [u8; 2],
    pub winner: Option<Side>,
}

/// Match events reported to the presentation adapter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Scored {
        scorer: Side,
        score: [u8; 2], // New score after this point
    },
    Paused,
    Resumed,
    GameOver {
        winner: Side,
        label: String,
        score: [u8; 2],
    },
    /// Finished match reset and running again: the game-over modal must go
    Restarted,
    /// Match torn down: transient overlays must be released
    Stopped,
}

/// Final record of a finished match, handed to whoever keeps history
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    pub mode: Mode,
    pub score: [u8; 2],
    pub winner: Side,
    pub winner_label: String,
    pub ticks: Tick,
}
