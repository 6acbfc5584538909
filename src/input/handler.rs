use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map a key event to an action
    ///
    /// Only presses count; repeats from a held key and releases are ignored.
    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Steer(Direction::Up)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(Direction::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(Direction::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(Direction::Right)
            }

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
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
    use crossterm::event::KeyEventState;

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];

        for (code, direction) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(handler.handle_key_event(key), KeyAction::Steer(direction));
        }
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(w), KeyAction::Steer(Direction::Up));

        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(a), KeyAction::Steer(Direction::Left));

        let s_upper = KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(s_upper),
            KeyAction::Steer(Direction::Down)
        );

        let d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        assert_eq!(
            handler.handle_key_event(d),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(q), KeyAction::Quit);

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_held_and_released_keys_ignored() {
        let handler = InputHandler::new();

        let repeat = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(handler.handle_key_event(repeat), KeyAction::None);

        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handler.handle_key_event(release), KeyAction::None);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(handler.handle_key_event(r), KeyAction::None);
    }
}
