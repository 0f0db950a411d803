//! Traits describing the host world.
//!
//! The controller never owns actors, maps or the search graph. Hosts plug
//! them in through these traits: [`Actor`] / [`Follower`] for the two
//! tracked characters, [`Pathfinder`] for bounded tile searches and
//! [`LocationRoster`] for location membership.
mod actor;
mod path;

pub use actor::{Actor, Emote, Follower, Heading, MovementIntent};
pub use path::{PathRequest, Pathfinder, TilePath};

use crate::types::{ActorId, LocationId};

/// Tracks which actors are present in which location.
pub trait LocationRoster {
    fn add(&mut self, location: &LocationId, actor: ActorId);

    /// Removing an actor that is not present is a no-op.
    fn remove(&mut self, location: &LocationId, actor: ActorId);
}
