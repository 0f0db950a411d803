//! Deterministic follow-and-pathing logic for companion characters.
//!
//! `follow-core` keeps one follower trailing one leader through a tile world
//! ([`follow::FollowController`]) and models the companion lifecycle that
//! decides when following is active ([`companion::CompanionStateMachine`]).
//! Actors, maps and the path search stay in the host, which plugs them in
//! through the traits in [`env`].
pub mod companion;
pub mod config;
pub mod env;
pub mod error;
pub mod follow;
pub mod geometry;
pub mod types;

pub use companion::{
    AvailableState, Companion, CompanionState, CompanionStateMachine, ResetState,
    StateMachineError, StateName,
};
pub use config::FollowConfig;
pub use env::{
    Actor, Emote, Follower, Heading, LocationRoster, MovementIntent, PathRequest, Pathfinder,
    TilePath,
};
pub use error::{CoreError, ErrorSeverity};
pub use follow::{FollowController, FollowStep, Recovery, come_to, find_path, warp};
pub use geometry::{BoundingBox, Pixel, Position, near_points, sort_by_nearest};
pub use types::{ActorId, LocationId, Tick};
