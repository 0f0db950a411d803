//! Actor capabilities the controller needs from the host world.
//!
//! Actors are owned by the host. The controller only borrows them for the
//! duration of a call: it reads the leader through [`Actor`] and steers the
//! follower through [`Follower`], whose mutable surface is limited to the
//! movement intent, placement and the path-controller slot.

use bitflags::bitflags;

use crate::env::TilePath;
use crate::geometry::{BoundingBox, Position};
use crate::types::{ActorId, LocationId, Tick};

/// Read-only view of an actor (the leader, or the follower being inspected).
pub trait Actor {
    fn id(&self) -> ActorId;

    fn location(&self) -> &LocationId;

    /// Tile currently containing the actor.
    fn tile(&self) -> Position;

    /// Collision box in pixel space.
    fn bounding_box(&self) -> BoundingBox;

    /// Base movement speed. Followers report [`MovementIntent::speed`].
    fn speed(&self) -> u32;
}

/// An actor the controller is allowed to steer.
pub trait Follower: Actor {
    fn intent(&self) -> &MovementIntent;

    fn intent_mut(&mut self) -> &mut MovementIntent;

    /// Whether the actor physically moved since the previous step.
    fn is_moving(&self) -> bool;

    fn set_tile(&mut self, tile: Position);

    fn set_location(&mut self, location: LocationId);

    /// Externally assigned path currently driving the actor, if any.
    ///
    /// While the slot is occupied the controller does not issue step intents
    /// of its own.
    fn path_controller(&self) -> Option<&TilePath>;

    fn set_path_controller(&mut self, path: Option<TilePath>);

    fn emote(&mut self, emote: Emote);

    /// Integrates the current intent (or the path controller) for one tick.
    fn move_one_step(&mut self, tick: Tick);

    fn has_path_controller(&self) -> bool {
        self.path_controller().is_some()
    }

    fn halt(&mut self) {
        self.intent_mut().halt();
    }
}

bitflags! {
    /// Directions the actor is currently trying to move in. Empty means halted.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Heading: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Heading {
    /// Unit step in tile space (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.contains(Heading::LEFT) {
            dx -= 1;
        }
        if self.contains(Heading::RIGHT) {
            dx += 1;
        }
        if self.contains(Heading::UP) {
            dy -= 1;
        }
        if self.contains(Heading::DOWN) {
            dy += 1;
        }
        (dx, dy)
    }
}

/// Movement intent the controller communicates to the host movement system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementIntent {
    pub heading: Heading,
    pub speed: u32,
    /// Temporary bonus on top of `speed` used to close gaps.
    pub added_speed: u32,
    /// Forced march: the host lets the actor push through minor obstacles.
    pub charging: bool,
    /// The actor does not collide with other characters.
    pub passes_through: bool,
}

impl MovementIntent {
    pub fn with_speed(speed: u32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    pub fn halt(&mut self) {
        self.heading = Heading::empty();
    }

    pub fn is_halted(&self) -> bool {
        self.heading.is_empty()
    }

    /// Replaces the heading with exactly one direction.
    pub fn set_moving_only(&mut self, direction: Heading) {
        self.heading = direction;
    }

    pub fn effective_speed(&self) -> u32 {
        self.speed + self.added_speed
    }
}

/// Presentation signals the follower may display.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Emote {
    /// Question mark: no path to the leader could be found.
    Confused,
    /// Three dots: a direct path to the leader was found.
    FoundIt,
}

impl Emote {
    /// Emote sprite index understood by the host renderer.
    pub const fn id(self) -> u32 {
        match self {
            Emote::Confused => 8,
            Emote::FoundIt => 40,
        }
    }
}
