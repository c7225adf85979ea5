//! Platform-agnostic input event types.
//!
//! Every backend maps its native input to these enums. The core never sees
//! raw platform input.

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down. Repeats are delivered as further presses.
    KeyPress { key: Key, ctrl: bool },
    /// Character typed (used by inline prompts).
    TextInput(char),
    /// The drawable area changed size.
    Resized { width: u32, height: u32 },
    /// User requested quit (window close, etc.).
    Quit,
}

/// Keys the teleprompter reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Enter,
    Escape,
    Backspace,
    F11,
    Plus,
    Minus,
    LeftBracket,
    RightBracket,
    Comma,
    Period,
    /// A digit key `0`-`9`.
    Digit(u8),
    /// A letter key, always lowercase.
    Letter(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_equality_includes_modifier() {
        let plain = InputEvent::KeyPress {
            key: Key::Letter('q'),
            ctrl: false,
        };
        let ctrl = InputEvent::KeyPress {
            key: Key::Letter('q'),
            ctrl: true,
        };
        assert_ne!(plain, ctrl);
    }

    #[test]
    fn key_hash_distinct() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Key::Digit(0));
        set.insert(Key::Digit(1));
        set.insert(Key::Digit(0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn resized_carries_dimensions() {
        let e = InputEvent::Resized {
            width: 1920,
            height: 1080,
        };
        if let InputEvent::Resized { width, height } = e {
            assert_eq!((width, height), (1920, 1080));
        } else {
            panic!("wrong variant");
        }
    }
}
