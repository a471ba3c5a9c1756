//! Held-key tracker for terminal environments.
//!
//! The engine throttles every motion category with its own cooldown, so this
//! handler only has to answer "which keys are held right now" and re-issue
//! their actions every frame.
//!
//! A press alone is a tap: it yields its action once and nothing more. A key
//! only counts as held once the terminal repeats it, so a tap never turns into
//! several moves. Without key release events, a repeating key is released once
//! no repeat has arrived within `key_release_timeout_ms`, and an unconfirmed
//! press is forgotten after `repeat_window_ms`.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::action_for_code;
use crate::types::GameAction;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

// Terminal auto-repeat typically starts 250-600ms after the press.
const DEFAULT_REPEAT_WINDOW_MS: u64 = 600;
// Repeats arrive every ~30-50ms while held.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone, Copy, Default)]
struct KeyHold {
    down: bool,
    repeating: bool,
    last_ms: u64,
}

impl KeyHold {
    fn press(&mut self, now_ms: u64) {
        // A second press without a release in between is the terminal's auto-repeat.
        self.repeating = self.down;
        self.down = true;
        self.last_ms = now_ms;
    }

    fn release(&mut self) {
        *self = KeyHold::default();
    }

    fn is_held(&self) -> bool {
        self.down && self.repeating
    }
}

/// Tracks which actions are currently held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left: KeyHold,
    right: KeyHold,
    down: KeyHold,
    rotate: KeyHold,
    repeat_window_ms: u64,
    key_release_timeout_ms: u64,
    release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            left: KeyHold::default(),
            right: KeyHold::default(),
            down: KeyHold::default(),
            rotate: KeyHold::default(),
            repeat_window_ms: DEFAULT_REPEAT_WINDOW_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn with_repeat_window_ms(mut self, window_ms: u64) -> Self {
        self.repeat_window_ms = window_ms;
        self
    }

    /// The terminal reports key releases, so held keys never time out.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    pub fn repeat_window_ms(&self) -> u64 {
        self.repeat_window_ms
    }

    /// Horizontal direction of the most recent left/right press still down.
    pub fn horizontal(&self) -> HorizontalDirection {
        if self.left.down {
            HorizontalDirection::Left
        } else if self.right.down {
            HorizontalDirection::Right
        } else {
            HorizontalDirection::None
        }
    }

    fn hold_mut(&mut self, action: GameAction) -> Option<&mut KeyHold> {
        match action {
            GameAction::MoveLeft => Some(&mut self.left),
            GameAction::MoveRight => Some(&mut self.right),
            GameAction::MoveDown => Some(&mut self.down),
            GameAction::Rotate => Some(&mut self.rotate),
            GameAction::Start => None,
        }
    }

    /// Record a press (or auto-repeat) and return the action to apply now.
    ///
    /// `Start` is one-shot and never held.
    pub fn handle_key_press(&mut self, code: KeyCode, now_ms: u64) -> Option<GameAction> {
        let action = action_for_code(code)?;

        match action {
            GameAction::MoveLeft => self.right.release(),
            GameAction::MoveRight => self.left.release(),
            _ => {}
        }
        if let Some(hold) = self.hold_mut(action) {
            hold.press(now_ms);
        }
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let Some(action) = action_for_code(code) else {
            return;
        };
        if let Some(hold) = self.hold_mut(action) {
            hold.release();
        }
    }

    /// Release everything, e.g. when focus is lost.
    pub fn reset(&mut self) {
        self.left.release();
        self.right.release();
        self.down.release();
        self.rotate.release();
    }

    fn expire(&mut self, now_ms: u64) {
        let window = self.repeat_window_ms;
        let timeout = self.key_release_timeout_ms;
        let release_events = self.release_events;

        for hold in [&mut self.left, &mut self.right, &mut self.down, &mut self.rotate] {
            if !hold.down {
                continue;
            }
            let limit = match (hold.repeating, release_events) {
                (true, true) => continue,
                (true, false) => timeout,
                (false, _) => window,
            };
            if now_ms.saturating_sub(hold.last_ms) > limit {
                hold.release();
            }
        }
    }

    /// Actions for every key confirmed held at `now_ms`.
    pub fn update(&mut self, now_ms: u64) -> ArrayVec<GameAction, 4> {
        self.expire(now_ms);

        let mut actions = ArrayVec::<GameAction, 4>::new();
        if self.left.is_held() {
            actions.push(GameAction::MoveLeft);
        } else if self.right.is_held() {
            actions.push(GameAction::MoveRight);
        }
        if self.down.is_held() {
            actions.push(GameAction::MoveDown);
        }
        if self.rotate.is_held() {
            actions.push(GameAction::Rotate);
        }
        actions
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_returns_immediate_action() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_press(KeyCode::Left, 0),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(handler.horizontal(), HorizontalDirection::Left);
        assert_eq!(handler.handle_key_press(KeyCode::Tab, 0), None);
    }

    #[test]
    fn test_single_tap_is_never_reissued() {
        let mut handler = InputHandler::new();
        handler.handle_key_press(KeyCode::Left, 0);
        handler.handle_key_press(KeyCode::Up, 0);

        for now in (16..=640).step_by(16) {
            assert!(handler.update(now).is_empty(), "re-issued at {now}ms");
        }
        assert_eq!(handler.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_repeat_confirms_hold() {
        let mut handler = InputHandler::new();
        handler.handle_key_press(KeyCode::Right, 0);
        handler.handle_key_press(KeyCode::Down, 0);
        assert!(handler.update(16).is_empty());

        handler.handle_key_press(KeyCode::Right, 300);
        handler.handle_key_press(KeyCode::Down, 300);
        for now in [316, 332, 348] {
            assert_eq!(
                handler.update(now).as_slice(),
                &[GameAction::MoveRight, GameAction::MoveDown]
            );
        }
    }

    #[test]
    fn test_opposite_direction_replaces_horizontal() {
        let mut handler = InputHandler::new();
        handler.handle_key_press(KeyCode::Left, 0);
        handler.handle_key_press(KeyCode::Left, 30);
        handler.handle_key_press(KeyCode::Right, 40);
        assert_eq!(handler.horizontal(), HorizontalDirection::Right);

        // The new direction is a fresh tap until it repeats.
        assert!(handler.update(50).is_empty());
        handler.handle_key_press(KeyCode::Right, 80);
        assert_eq!(handler.update(90).as_slice(), &[GameAction::MoveRight]);

        // Releasing the stale direction does not cancel the newer one.
        handler.handle_key_release(KeyCode::Left);
        assert_eq!(handler.update(100).as_slice(), &[GameAction::MoveRight]);
    }

    #[test]
    fn test_release_stops_repeat() {
        let mut handler = InputHandler::new();
        handler.handle_key_press(KeyCode::Up, 0);
        handler.handle_key_press(KeyCode::Up, 40);
        assert_eq!(handler.update(50).as_slice(), &[GameAction::Rotate]);

        handler.handle_key_release(KeyCode::Up);
        assert!(handler.update(66).is_empty());
    }

    #[test]
    fn test_press_after_release_is_a_new_tap() {
        let mut handler = InputHandler::new().with_release_events(true);
        handler.handle_key_press(KeyCode::Left, 0);
        handler.handle_key_release(KeyCode::Left);
        handler.handle_key_press(KeyCode::Left, 100);
        assert!(handler.update(116).is_empty());
    }

    #[test]
    fn test_timeout_releases_without_release_events() {
        let mut handler = InputHandler::new().with_key_release_timeout_ms(100);
        handler.handle_key_press(KeyCode::Char('a'), 0);
        handler.handle_key_press(KeyCode::Char('a'), 30);
        assert_eq!(handler.update(130).len(), 1);
        assert!(handler.update(131).is_empty());
        assert_eq!(handler.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_release_events_keep_hold_until_release() {
        let mut handler = InputHandler::new()
            .with_key_release_timeout_ms(100)
            .with_release_events(true);
        handler.handle_key_press(KeyCode::Down, 0);
        handler.handle_key_press(KeyCode::Down, 30);
        assert_eq!(handler.update(1_000).as_slice(), &[GameAction::MoveDown]);

        handler.handle_key_release(KeyCode::Down);
        assert!(handler.update(1_016).is_empty());
    }

    #[test]
    fn test_unconfirmed_press_expires_after_repeat_window() {
        let mut handler = InputHandler::new().with_repeat_window_ms(200);
        handler.handle_key_press(KeyCode::Down, 0);
        handler.update(201);

        // The window passed, so this press starts over instead of confirming.
        handler.handle_key_press(KeyCode::Down, 210);
        assert!(handler.update(226).is_empty());
    }

    #[test]
    fn test_start_is_not_held() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_press(KeyCode::Char(' '), 0),
            Some(GameAction::Start)
        );
        assert_eq!(
            handler.handle_key_press(KeyCode::Char(' '), 30),
            Some(GameAction::Start)
        );
        assert!(handler.update(46).is_empty());
    }
}
