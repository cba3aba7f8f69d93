//! Boundary between the match and whatever draws it.
//!
//! The simulation never touches a display API. A presentation adapter hands
//! the match a [`Surface`]; the match reports the drawable area it was given,
//! presents one [`View`] per tick and forwards lifecycle [`Event`]s so the
//! adapter can raise or release overlays.

use crate::types::{Event, View};

/// Widest playfield the responsive layout will produce
pub const MAX_FIELD_WIDTH: f32 = 800.0;
/// Margin kept free around the playfield when fitting
pub const FIELD_MARGIN: f32 = 40.0;

/// Drawable area in playfield pixels
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Responsive 2:1 playfield for a host `available_width` pixels wide
    pub fn fit(available_width: f32) -> Option<Self> {
        let width = MAX_FIELD_WIDTH.min(available_width - FIELD_MARGIN);
        if width <= 0.0 {
            return None;
        }
        Some(Self::new(width, width / 2.0))
    }
}

/// Rendering target supplied by a presentation adapter
pub trait Surface {
    /// Drawable area, or `None` when no rendering context is available
    fn viewport(&self) -> Option<Viewport>;

    /// Draw the state after a tick
    fn present(&mut self, view: &View);

    /// Lifecycle notification (pause, game over, stop)
    fn notify(&mut self, event: &Event) {
        let _ = event;
    }
}

/// Surface that draws nothing and remembers what it was shown
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    viewport: Option<Viewport>,
    /// Number of frames presented
    pub frames: u64,
    /// Most recent frame
    pub last: Option<View>,
    /// Every event received, in order
    pub events: Vec<Event>,
}

impl HeadlessSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Some(Viewport::new(width, height)),
            ..Self::default()
        }
    }

    /// A surface without a rendering context
    pub fn detached() -> Self {
        Self::default()
    }
}

impl Surface for HeadlessSurface {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn present(&mut self, view: &View) {
        self.frames += 1;
        self.last = Some(*view);
    }

    fn notify(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
