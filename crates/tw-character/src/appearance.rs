//! Render-facing attributes carried verbatim by the engine.

/// Draw layer relative to normal characters.  Only `Normal` characters
/// take part in collision with each other.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Below,
    #[default]
    Normal,
    Above,
}

/// Sprite sheet name and cell.  The engine only interprets the `!` prefix,
/// which marks an object (door, chest) that never sinks into bushes.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterImage {
    pub name: String,
    pub index: u8,
}

impl CharacterImage {
    pub fn new(name: impl Into<String>, index: u8) -> Self {
        Self { name: name.into(), index }
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        self.name.starts_with('!')
    }
}
