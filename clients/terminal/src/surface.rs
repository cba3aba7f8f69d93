use pong_core::{Event, Surface, View, Viewport};

/// Playfield pixels per terminal column when sizing the field
pub const CELL_PIXELS: f32 = 10.0;

/// Overlay drawn over the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    GameOver { label: String, score: [u8; 2] },
}

/// Surface that keeps the latest frame for the next terminal draw
#[derive(Debug)]
pub struct TerminalSurface {
    viewport: Option<Viewport>,
    pub frame: Option<View>,
    pub overlay: Overlay,
}

impl TerminalSurface {
    /// Size the playfield for a field area `columns` wide
    pub fn new(columns: u16) -> Self {
        Self {
            viewport: Self::fit(columns),
            frame: None,
            overlay: Overlay::None,
        }
    }

    pub fn fit(columns: u16) -> Option<Viewport> {
        Viewport::fit(f32::from(columns) * CELL_PIXELS)
    }
}

impl Surface for TerminalSurface {
    fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn present(&mut self, view: &View) {
        self.frame = Some(*view);
    }

    fn notify(&mut self, event: &Event) {
        match event {
            Event::Paused => self.overlay = Overlay::Paused,
            Event::Resumed | Event::Restarted | Event::Stopped => self.overlay = Overlay::None,
            Event::GameOver { label, score, .. } => {
                self.overlay = Overlay::GameOver {
                    label: label.clone(),
                    score: *score,
                }
            }
            Event::Scored { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pong_core::{Config, Game, ManualScheduler, Mode, Side, Vec2};

    #[test]
    fn test_fit_from_columns() {
        assert_eq!(TerminalSurface::fit(80), Some(Viewport::new(760.0, 380.0)));
        assert_eq!(TerminalSurface::fit(200), Some(Viewport::new(800.0, 400.0)));
        assert_eq!(TerminalSurface::fit(4), None);
    }

    #[test]
    fn test_overlay_follows_events() {
        let mut surface = TerminalSurface::new(80);

        surface.notify(&Event::Paused);
        assert_eq!(surface.overlay, Overlay::Paused);

        surface.notify(&Event::Resumed);
        assert_eq!(surface.overlay, Overlay::None);

        surface.notify(&Event::GameOver {
            winner: Side::Left,
            label: "Player 1".to_string(),
            score: [11, 4],
        });
        assert_eq!(
            surface.overlay,
            Overlay::GameOver {
                label: "Player 1".to_string(),
                score: [11, 4]
            }
        );

        surface.notify(&Event::Stopped);
        assert_eq!(surface.overlay, Overlay::None);
    }

    #[test]
    fn test_restart_clears_game_over() {
        let mut game = Game::new(Config::default(), TerminalSurface::new(80)).unwrap();
        let mut scheduler = ManualScheduler::new();
        game.start(Mode::Versus, &mut scheduler);
        game.score = [0, 10];
        game.ball.pos = Vec2::new(2.0, 30.0);
        game.ball.vel = Vec2::new(-5.0, 0.0);
        scheduler.take();
        game.frame(&mut scheduler);
        assert!(matches!(game.surface().overlay, Overlay::GameOver { .. }));

        game.restart(&mut scheduler);
        scheduler.take();
        game.frame(&mut scheduler);

        assert_eq!(game.surface().overlay, Overlay::None);
        assert_eq!(game.surface().frame.map(|view| view.score), Some([0, 0]));
    }
}
