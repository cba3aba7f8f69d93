//! Pressed-key state consulted once per tick.

use crate::types::{Direction, Side};

/// Held directional inputs for both paddles, `[side][direction]`
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    held: [[bool; 2]; 2],
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release. Later writes win.
    pub fn set(&mut self, side: Side, direction: Direction, pressed: bool) {
        self.held[side.index()][direction.index()] = pressed;
    }

    pub fn is_pressed(&self, side: Side, direction: Direction) -> bool {
        self.held[side.index()][direction.index()]
    }

    /// Directions held for `side`, in the order they are applied
    pub fn held(&self, side: Side) -> impl Iterator<Item = Direction> + '_ {
        [Direction::Up, Direction::Down]
            .into_iter()
            .filter(move |direction| self.is_pressed(side, *direction))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
