//! Keyboard navigation shared by the palette and search overlays.

use serde::{Deserialize, Serialize};

/// Navigation keys the overlays react to. Everything else goes to the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
}

impl NavKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowUp" => Some(Self::ArrowUp),
            "Enter" => Some(Self::Enter),
            _ => None,
        }
    }
}

/// Highlighted row in a result list. Stays at 0 when the list is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
}

impl Selection {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn down(&mut self, len: usize) {
        self.index = (self.index + 1).min(len.saturating_sub(1));
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
