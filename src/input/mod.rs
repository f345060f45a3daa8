//! Input module - keyboard events to abstract commands
//!
//! Translation goes through the owned `Bindings` value so rebinding works
//! without touching this code. The quit chord stays hardwired.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Bindings;
use crate::types::Command;

/// Map a key event to a gameplay command via the bindings.
pub fn handle_key_event(key: KeyEvent, bindings: &Bindings) -> Option<Command> {
    bindings.command_for(key.code)
}

/// Check if the key should quit the game (Esc or Ctrl-C).
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_translate() {
        let bindings = Bindings::default();
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left), &bindings),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('e')), &bindings),
            Some(Command::RotateCw)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p')), &bindings),
            Some(Command::TriggerPowerUp)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('x')), &bindings),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
