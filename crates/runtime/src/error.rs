//! Errors surfaced by the reference host.
//!
//! Scenario files are validated by the loaders; these variants cover what can
//! still go wrong while wiring actors into a [`crate::World`].
use follow_core::{ActorId, LocationId, Position, StateMachineError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown location {0}")]
    UnknownLocation(LocationId),

    #[error("actor {actor} cannot start on blocked tile {tile:?} in {location}")]
    BlockedPlacement {
        actor: ActorId,
        location: LocationId,
        tile: Position,
    },

    #[error(transparent)]
    StateMachine(#[from] StateMachineError),
}
