//! Reference host for the follow controller.
//!
//! This crate plugs a small tile world into `follow-core` and runs companions
//! through it. Modules are organized by responsibility:
//! - [`world`] holds location grids, rosters and the bounded path search
//! - [`actor`] integrates movement intent and path controllers
//! - [`session`] ties the companion lifecycle to a follow controller
//! - [`simulation`] drives a leader along a scenario route
//! - [`logging`] sets up tracing for binaries
pub mod actor;
pub mod error;
pub mod logging;
pub mod session;
pub mod simulation;
pub mod world;

pub use actor::SimActor;
pub use error::{Result, RuntimeError};
pub use session::{CompanionSession, RecruitedState, UnavailableState};
pub use simulation::{FOLLOWER_ID, LEADER_ID, Simulation, SimulationReport};
pub use world::{GridLocation, World};
