//! One-shot relocation and direct pathfinding for a follower.

use crate::env::{Emote, Follower, LocationRoster, PathRequest, Pathfinder, TilePath};
use crate::geometry::{Position, near_points, sort_by_nearest};
use crate::types::{ActorId, LocationId};

/// Instantly relocates `follower` to `tile`, optionally in another location.
///
/// The follower is halted and its path controller detached. When `location`
/// differs from the follower's current one, the follower leaves the old
/// location's roster and joins the new one; otherwise only the tile changes.
/// Warping never fails and repeating it has no further effect.
pub fn warp<F, R>(follower: &mut F, roster: &mut R, tile: Position, location: Option<&LocationId>)
where
    F: Follower + ?Sized,
    R: LocationRoster + ?Sized,
{
    follower.halt();
    follower.intent_mut().charging = false;
    follower.set_path_controller(None);

    let destination = location.filter(|location| *location != follower.location());
    match destination {
        Some(location) => {
            let id = follower.id();
            let previous = follower.location().clone();
            roster.remove(&previous, id);
            follower.set_location(location.clone());
            follower.set_tile(tile);
            roster.add(location, id);
            tracing::debug!(
                follower = %id,
                from = %previous,
                to = %location,
                ?tile,
                "warped across locations"
            );
        }
        None => {
            follower.set_tile(tile);
            tracing::debug!(follower = %follower.id(), ?tile, "warped");
        }
    }
}

/// Tries to attach a direct path from the follower to `destination`.
///
/// This is a query with a side effect: when a path is found it becomes the
/// follower's path controller. Nothing is attempted while the follower
/// already has a path controller, and `false` is returned. A failed search
/// shows [`Emote::Confused`]; a successful one shows [`Emote::FoundIt`] when
/// `emote_when_found` is set.
pub fn come_to<F, P>(
    follower: &mut F,
    pathfinder: &P,
    destination: Position,
    node_limit: usize,
    emote_when_found: bool,
) -> bool
where
    F: Follower + ?Sized,
    P: Pathfinder + ?Sized,
{
    if follower.has_path_controller() {
        return false;
    }

    follower.halt();
    let location = follower.location().clone();
    let path = find_path(
        pathfinder,
        follower.tile(),
        destination,
        &location,
        follower.id(),
        node_limit,
    );

    match path {
        Some(path) => {
            tracing::debug!(
                follower = %follower.id(),
                ?destination,
                steps = path.len(),
                "direct path found"
            );
            follower.set_path_controller(Some(path));
            if emote_when_found {
                follower.emote(Emote::FoundIt);
            }
            true
        }
        None => {
            tracing::debug!(follower = %follower.id(), ?destination, "no direct path");
            follower.emote(Emote::Confused);
            false
        }
    }
}

/// Searches for a path to any tile around `destination`, nearest to `start`
/// first, returning the first one the pathfinder produces.
pub fn find_path<P>(
    pathfinder: &P,
    start: Position,
    destination: Position,
    location: &LocationId,
    actor: ActorId,
    node_limit: usize,
) -> Option<TilePath>
where
    P: Pathfinder + ?Sized,
{
    sort_by_nearest(near_points(destination, 1), start)
        .into_iter()
        .find_map(|target| {
            pathfinder.find_path(&PathRequest {
                start,
                target,
                location,
                actor,
                node_limit,
            })
        })
}
