//! Pong core game engine - single-screen match simulation with an AI opponent

pub mod ai;
pub mod error;
pub mod game;
pub mod input;
pub mod physics;
pub mod render;
pub mod rng;
pub mod scheduler;
pub mod surface;
pub mod types;

// WASM bridge module - only compiled when wasm feature is enabled
#[cfg(feature = "wasm")]
pub mod wasm;

pub use ai::AiController;
pub use error::MatchError;
pub use game::Game;
pub use input::Controls;
pub use physics::Physics;
pub use render::{CellRect, RenderHelper};
pub use rng::GameRng;
pub use scheduler::{FrameRequest, FrameScheduler, ManualScheduler};
pub use surface::{HeadlessSurface, Surface, Viewport};
pub use types::*;
