//! The follow control loop.
//!
//! [`FollowController`] is driven once per simulation tick and keeps a
//! follower on the leader's heels. It retraces a breadcrumb trail of the
//! leader's past tiles, falls back to a direct path search when the follower
//! gets stuck, and warps the follower as the last resort.
mod controller;
mod navigation;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;

pub use controller::{FollowController, FollowStep, Recovery};
pub use navigation::{come_to, find_path, warp};
