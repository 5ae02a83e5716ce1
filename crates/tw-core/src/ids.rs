//! Strongly typed, zero-cost identifier wrappers and the character reference.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into entity `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.

use std::fmt;

use crate::VehicleKind;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a roaming entity in the current map's entity list.
    pub struct EntityId(u32);
}

typed_id! {
    /// Identifier of a map.  Vehicles remember the map they are parked on.
    pub struct MapId(u32);
}

// ── CharacterRef ──────────────────────────────────────────────────────────────

/// Addresses one positioned entity inside the world's owning collections.
///
/// Entities never hold references to each other; every cross-entity query
/// (chasing, collision, "turn toward") goes through a `CharacterRef` lookup.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterRef {
    /// The input-driven avatar.
    Player,
    /// Follower at this position in the chain (0 = directly behind the player).
    Follower(u16),
    /// An autonomous roaming entity on the current map.
    Entity(EntityId),
    /// The vehicle of this kind.
    Vehicle(VehicleKind),
}

impl CharacterRef {
    /// Stable 64-bit key used to derive per-character RNG seeds.
    pub fn seed_key(self) -> u64 {
        match self {
            CharacterRef::Player => 0,
            CharacterRef::Follower(i) => 0x1_0000 + i as u64,
            CharacterRef::Entity(id) => 0x1_0000_0000 + id.0 as u64,
            CharacterRef::Vehicle(kind) => 0x2_0000 + kind.index() as u64,
        }
    }

    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, CharacterRef::Player)
    }
}

impl fmt::Display for CharacterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterRef::Player => f.write_str("player"),
            CharacterRef::Follower(i) => write!(f, "follower#{i}"),
            CharacterRef::Entity(id) => write!(f, "entity#{}", id.0),
            CharacterRef::Vehicle(kind) => write!(f, "vehicle:{kind}"),
        }
    }
}
