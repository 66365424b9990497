use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Keyboard commands the grid understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
}

/// The key identifier is not one the grid handles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unhandled key: {0:?}")]
pub struct UnknownKey(pub String);

impl Key {
    /// Decodes a DOM `KeyboardEvent.key` value, including legacy aliases
    pub fn from_dom(key: &str) -> Option<Self> {
        let key = match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => return None,
        };
        Some(key)
    }

    /// Enter and Space both commit the focused day
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dom(s).ok_or_else(|| UnknownKey(s.to_owned()))
    }
}
