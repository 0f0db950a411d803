//! Data-driven follow content and loaders.
//!
//! This crate reads the files a host needs to run companions:
//! - Follow controller tuning (TOML)
//! - Scenarios with location layouts, placements and a leader route (RON)
//!
//! All loaders deserialize straight into follow-core types.

pub mod loaders;
pub mod scenario;

pub use loaders::{ConfigLoader, LoadResult, ScenarioLoader};
pub use scenario::{LocationLayout, Placement, Scenario, Waypoint};
