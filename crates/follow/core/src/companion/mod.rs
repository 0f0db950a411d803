//! Companion lifecycle state machine.
//!
//! The machine decides when a companion is merely around, recruited (and
//! therefore followed), or out of play. Hosts tick a follow controller only
//! while the companion record says it is following.
mod error;
mod machine;
mod states;

pub use error::StateMachineError;
pub use machine::CompanionStateMachine;
pub use states::{AvailableState, Companion, CompanionState, ResetState};

/// Identifiers of the companion lifecycle states.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StateName {
    Reset,
    Available,
    Recruited,
    Unavailable,
}
