//! The chain of companions trailing the player.
//!
//! # Chase order
//!
//! Followers move tail first: the last follower steps onto the tile its
//! predecessor is about to leave, then the next one, and so on up to the
//! head, which chases the player.  Moving head first would have every
//! follower step onto a tile that is still occupied.
//!
//! # Visibility
//!
//! A follower slot may be empty (no party member).  Empty slots and a hidden
//! chain still move, but only visible followers block roamers and count
//! toward gathering completion.

use tw_character::{Character, CharacterBuilder};
use tw_core::{CharacterRef, Direction};
use tw_map::MapQuery;

use crate::{MobilityError, MobilityResult};

pub struct Follower {
    pub character: Character,
    /// Party member shown in this slot.
    pub member: Option<String>,
}

impl Follower {
    pub fn new(slot: u16, seed: u64) -> Self {
        let character = CharacterBuilder::new(CharacterRef::Follower(slot), seed).through(true).build();
        Self { character, member: None }
    }
}

pub struct FollowerChain {
    pub followers: Vec<Follower>,
    /// Walking onto the player's tile; membership is frozen meanwhile.
    pub gathering: bool,
    pub visible: bool,
}

impl FollowerChain {
    /// A chain of `slots` empty followers.
    pub fn new(slots: usize, seed: u64, visible: bool) -> Self {
        let followers = (0..slots).map(|i| Follower::new(i as u16, seed)).collect();
        Self { followers, gathering: false, visible }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.followers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Follower> {
        self.followers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Follower> {
        self.followers.get_mut(index)
    }

    pub fn visible_followers(&self) -> impl Iterator<Item = &Follower> {
        self.followers.iter().filter(move |f| self.visible && f.member.is_some())
    }

    /// Some visible follower is still mid-step.
    pub fn are_moving(&self) -> bool {
        self.visible_followers().any(|f| f.character.is_moving())
    }

    /// Every visible follower stands still on `(x, y)`.
    pub fn are_gathered(&self, x: i32, y: i32) -> bool {
        self.visible_followers().all(|f| !f.character.is_moving() && f.character.pos(x, y))
    }

    pub fn is_someone_collided(&self, x: i32, y: i32) -> bool {
        self.visible_followers().any(|f| f.character.pos(x, y))
    }

    pub fn gather(&mut self) {
        self.gathering = true;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Stack every follower on `(x, y)` facing `d`.
    pub fn synchronize<M: MapQuery + ?Sized>(&mut self, map: &M, x: i32, y: i32, d: Direction) {
        for f in &mut self.followers {
            f.character.locate(map, x, y);
            f.character.set_direction(d);
        }
    }

    /// Assign party members to slots in order; remaining slots are emptied.
    pub fn set_members<S: AsRef<str>>(&mut self, members: &[S]) -> MobilityResult<()> {
        if self.gathering {
            return Err(MobilityError::ChainGathering);
        }
        if members.len() > self.followers.len() {
            return Err(MobilityError::TooManyMembers {
                capacity:  self.followers.len(),
                requested: members.len(),
            });
        }
        for (i, f) in self.followers.iter_mut().enumerate() {
            f.member = members.get(i).map(|m| m.as_ref().to_string());
        }
        Ok(())
    }
}
