//! Paddle key handling.
//!
//! Terminals with keyboard enhancement report presses and releases, which map
//! straight onto held keys. Other terminals only report presses (plus
//! auto-repeat), so a press latches the key for a few ticks instead.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use pong_core::{Direction, Side};

/// Ticks a press keeps a key held when releases are not reported
const LATCH_TICKS: u8 = 10;

/// A held-state change to forward to the match
pub type KeyChange = (Side, Direction, bool);

pub fn map_key(code: KeyCode) -> Option<(Side, Direction)> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some((Side::Left, Direction::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some((Side::Left, Direction::Down)),
        KeyCode::Up => Some((Side::Right, Direction::Up)),
        KeyCode::Down => Some((Side::Right, Direction::Down)),
        _ => None,
    }
}

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
    }
}

#[derive(Debug)]
pub struct PaddleKeys {
    enhanced: bool,
    /// Remaining latch ticks, `[side][direction]`
    latched: [[u8; 2]; 2],
}

impl PaddleKeys {
    pub fn new(enhanced: bool) -> Self {
        Self {
            enhanced,
            latched: [[0; 2]; 2],
        }
    }

    pub fn is_enhanced(&self) -> bool {
        self.enhanced
    }

    /// Translate a key event into held-state changes
    pub fn key_event(&mut self, event: KeyEvent) -> Vec<KeyChange> {
        let Some((side, direction)) = map_key(event.code) else {
            return Vec::new();
        };

        if self.enhanced {
            let pressed = event.kind != KeyEventKind::Release;
            return vec![(side, direction, pressed)];
        }
        if event.kind == KeyEventKind::Release {
            return Vec::new();
        }

        let mut changes = Vec::with_capacity(2);
        let other = opposite(direction);
        let slot = &mut self.latched[side.index()];
        if slot[other.index()] > 0 {
            slot[other.index()] = 0;
            changes.push((side, other, false));
        }
        slot[direction.index()] = LATCH_TICKS;
        changes.push((side, direction, true));
        changes
    }

    /// Age latched keys by one tick. Returns the keys that just expired.
    pub fn tick(&mut self) -> Vec<KeyChange> {
        let mut released = Vec::new();
        for side in [Side::Left, Side::Right] {
            for direction in [Direction::Up, Direction::Down] {
                let remaining = &mut self.latched[side.index()][direction.index()];
                if *remaining > 0 {
                    *remaining -= 1;
                    if *remaining == 0 {
                        released.push((side, direction, false));
                    }
                }
            }
        }
        released
    }

    pub fn clear(&mut self) {
        self.latched = [[0; 2]; 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_map() {
        assert_eq!(map_key(KeyCode::Char('W')), Some((Side::Left, Direction::Up)));
        assert_eq!(map_key(KeyCode::Down), Some((Side::Right, Direction::Down)));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_enhanced_press_release() {
        let mut keys = PaddleKeys::new(true);

        assert_eq!(
            keys.key_event(key(KeyCode::Up, KeyEventKind::Press)),
            vec![(Side::Right, Direction::Up, true)]
        );
        assert_eq!(
            keys.key_event(key(KeyCode::Up, KeyEventKind::Release)),
            vec![(Side::Right, Direction::Up, false)]
        );
        assert!(keys.tick().is_empty());
    }

    #[test]
    fn test_latch_expires() {
        let mut keys = PaddleKeys::new(false);
        keys.key_event(key(KeyCode::Char('s'), KeyEventKind::Press));

        for _ in 0..LATCH_TICKS - 1 {
            assert!(keys.tick().is_empty());
        }
        assert_eq!(keys.tick(), vec![(Side::Left, Direction::Down, false)]);
    }

    #[test]
    fn test_latch_repeat_extends() {
        let mut keys = PaddleKeys::new(false);
        keys.key_event(key(KeyCode::Char('w'), KeyEventKind::Press));
        for _ in 0..5 {
            keys.tick();
        }

        keys.key_event(key(KeyCode::Char('w'), KeyEventKind::Press));
        for _ in 0..LATCH_TICKS - 1 {
            assert!(keys.tick().is_empty());
        }
    }

    #[test]
    fn test_latch_opposite_releases() {
        let mut keys = PaddleKeys::new(false);
        keys.key_event(key(KeyCode::Char('w'), KeyEventKind::Press));

        let changes = keys.key_event(key(KeyCode::Char('s'), KeyEventKind::Press));

        assert_eq!(
            changes,
            vec![
                (Side::Left, Direction::Up, false),
                (Side::Left, Direction::Down, true)
            ]
        );
    }
}
