//! Key mapping from terminal events to scene commands.

use std::io;
use std::time::Duration;

use crate::types::Command;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a command.
///
/// `m`, `q`, `c` and `o` are reserved; Ctrl-C also quits. Any other
/// printable character is echoed. Keys without a character (arrows,
/// function keys) and other Ctrl chords map to nothing.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    let KeyCode::Char(ch) = key.code else {
        return None;
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(ch, 'c' | 'C').then_some(Command::Quit);
    }

    match ch {
        'm' => Some(Command::GenerateMap),
        'q' | 'Q' => Some(Command::Quit),
        'c' => Some(Command::ToggleCodePage),
        'o' => Some(Command::ToggleEcho),
        ch if !ch.is_control() => Some(Command::Echo(ch)),
        _ => None,
    }
}

/// Map a terminal event. Only key presses (and terminal auto-repeat)
/// produce commands; releases, mouse and resize events are dropped.
pub fn map_event(ev: Event) -> Option<Command> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        _ => None,
    }
}

/// Read at most one pending command without blocking.
///
/// Events that map to nothing are consumed and yield `Ok(None)`.
pub fn poll_command() -> io::Result<Option<Command>> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    Ok(map_event(event::read()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_reserved_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('m'))),
            Some(Command::GenerateMap)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('c'))),
            Some(Command::ToggleCodePage)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('o'))),
            Some(Command::ToggleEcho)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Q'))), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_other_characters_echo() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('x'))),
            Some(Command::Echo('x'))
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT)),
            Some(Command::Echo('M'))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::Echo(' '))
        );
    }

    #[test]
    fn test_non_character_keys_are_ignored() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::F(1))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_releases_are_dropped() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_event(Event::Key(release)), None);
        assert_eq!(
            map_event(Event::Key(KeyEvent::from(KeyCode::Char('q')))),
            Some(Command::Quit)
        );
        assert_eq!(map_event(Event::Resize(80, 24)), None);
    }
}
