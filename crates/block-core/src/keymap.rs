use serde::{Deserialize, Serialize};

use crate::document::Block;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    Escape,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    OpenPalette,
    Commit,
    RemoveEmpty,
    FocusPrevious,
    FocusNext,
    CancelPalette,
}

impl Intent {
    /// Whether the host must suppress its own handling of the key. The trigger
    /// character still gets typed into the block.
    pub fn suppresses_native(self) -> bool {
        !matches!(self, Intent::OpenPalette)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Handled,
    Native,
}

/// Maps a key event on `block` to at most one intent. First match wins.
pub fn classify(event: &KeyEvent, block: &Block, trigger: char) -> Option<Intent> {
    match &event.key {
        Key::Char(c) if *c == trigger => Some(Intent::OpenPalette),
        Key::Enter if !event.shift => Some(Intent::Commit),
        Key::Backspace if block.plain_text().is_empty() => Some(Intent::RemoveEmpty),
        Key::ArrowUp => Some(Intent::FocusPrevious),
        Key::ArrowDown => Some(Intent::FocusNext),
        Key::Escape if block.menu_opened => Some(Intent::CancelPalette),
        _ => None,
    }
}
