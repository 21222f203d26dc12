//! Discrete input events consumed by the prompt components.
//!
//! Components never see crossterm types directly. The terminal driver converts
//! what it reads with [`Event::from_terminal`], and tests build events by hand.

use crossterm::event::{self as term, KeyCode, KeyEventKind, KeyModifiers};
use derive_more::Display;

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, including space.
    Char(char),
    /// A character pressed together with Control.
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
    Tab,
    Enter,
    Esc,
}

/// An input event delivered to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    /// Bracketed paste.
    Paste(String),
    Resize { width: u16, height: u16 },
}

impl Event {
    /// Converts a crossterm event. Key releases, focus changes and mouse
    /// events have no meaning to a prompt and map to `None`.
    #[must_use]
    pub fn from_terminal(event: term::Event) -> Option<Self> {
        match event {
            term::Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                key_from_code(key.code, key.modifiers).map(Self::Key)
            }
            term::Event::Paste(text) => Some(Self::Paste(text)),
            term::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }

    /// Shorthand for typing every character of `text` as separate events.
    pub fn typed(text: &str) -> impl Iterator<Item = Self> + '_ {
        text.chars().map(|c| Self::Key(Key::Char(c)))
    }
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

fn key_from_code(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };
    Some(key)
}

/// Outcome of feeding one event to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Signal {
    /// Keep reading events and redraw.
    #[display("continue")]
    Continue,
    /// The user accepted the current state.
    #[display("confirmed")]
    Confirmed,
    /// The user aborted the prompt.
    #[display("cancelled")]
    Cancelled,
}

impl Signal {
    /// Returns true for `Confirmed` and `Cancelled`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

/// Lifecycle of a prompt instance. Moves out of `Active` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Active,
    Confirmed,
    Cancelled,
}

impl Status {
    /// The signal a finished prompt keeps reporting for late events.
    #[must_use]
    pub fn signal(self) -> Signal {
        match self {
            Self::Active => Signal::Continue,
            Self::Confirmed => Signal::Confirmed,
            Self::Cancelled => Signal::Cancelled,
        }
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self != Self::Active
    }

    #[must_use]
    pub fn is_aborted(self) -> bool {
        self == Self::Cancelled
    }
}
