//! Fluent builder for [`Character`].
//!
//! # Usage
//!
//! ```rust
//! use tw_character::{CharacterBuilder, Priority};
//! use tw_core::{CharacterRef, Direction, EntityId};
//!
//! let guard = CharacterBuilder::new(CharacterRef::Entity(EntityId(0)), /*seed=*/ 42)
//!     .at(3, 4)
//!     .facing(Direction::Left)
//!     .speed(3)
//!     .priority(Priority::Normal)
//!     .build();
//!
//! assert!(guard.pos(3, 4));
//! assert!(!guard.is_moving());
//! ```

use tw_core::{CharacterRef, CharacterRng, Direction};
use tw_route::{MoveRoute, RouteInterpreter};

use crate::{Character, CharacterImage, Priority};

/// Fluent builder for [`Character`].
///
/// The RNG is derived from the run seed and the character's reference, so
/// the same character always rolls the same sequence regardless of how many
/// other characters exist.
pub struct CharacterBuilder {
    character: Character,
}

impl CharacterBuilder {
    pub fn new(who: CharacterRef, seed: u64) -> Self {
        Self { character: Character::new(CharacterRng::new(seed, who)) }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.character.set_position(x, y);
        self
    }

    pub fn facing(mut self, d: Direction) -> Self {
        self.character.direction = d;
        self
    }

    pub fn speed(mut self, move_speed: u8) -> Self {
        self.character.move_speed = move_speed.clamp(1, 6);
        self
    }

    pub fn frequency(mut self, move_frequency: u8) -> Self {
        self.character.move_frequency = move_frequency.clamp(1, 5);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.character.priority = priority;
        self
    }

    pub fn through(mut self, through: bool) -> Self {
        self.character.through = through;
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.character.transparent = transparent;
        self
    }

    pub fn walk_anime(mut self, on: bool) -> Self {
        self.character.walk_anime = on;
        self
    }

    pub fn step_anime(mut self, on: bool) -> Self {
        self.character.step_anime = on;
        self
    }

    pub fn direction_fix(mut self, on: bool) -> Self {
        self.character.direction_fix = on;
        self
    }

    pub fn image(mut self, name: impl Into<String>, index: u8) -> Self {
        self.character.image = CharacterImage::new(name, index);
        self
    }

    /// Install a non-forced route (the custom movement of a roaming entity).
    pub fn route(mut self, route: MoveRoute) -> Self {
        self.character.route = RouteInterpreter::with_route(route);
        self
    }

    pub fn build(self) -> Character {
        self.character
    }
}
