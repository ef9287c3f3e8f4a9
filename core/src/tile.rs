use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the game session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineCell {
    Hidden,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
}

impl EngineCell {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn revealed_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::Hidden
    }
}
