use std::collections::VecDeque;

use crate::config::FollowConfig;
use crate::env::{Actor, Follower, Heading, LocationRoster, Pathfinder};
use crate::follow::navigation::{come_to, warp};
use crate::geometry::Position;
use crate::types::Tick;

/// What a single [`FollowController::update`] call decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowStep {
    /// Leader or follower missing; nothing happened.
    Skipped,
    /// Follower was in another location or hopelessly far and got warped.
    Warped,
    /// Follower is stationary but close enough to the leader.
    Standing,
    /// Follower stood still for too long; lost recovery ran.
    Lost(Recovery),
    /// Follower reached the leader and was halted.
    Arrived,
    /// Breadcrumb trail overflowed or the leader got too far; forced recovery ran.
    Overflow(Recovery),
    /// An external path controller is driving the follower.
    Deferred,
    /// Follower stepped along the breadcrumb trail.
    Stepped,
    /// No target left; follower halted in place.
    Idle,
}

/// Outcome of lost recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// A direct path to the leader was attached to the follower.
    PathFound,
    /// No path; the follower charges through the existing trail.
    ForcedMarch,
    /// No path and no usable trail; the follower was warped to the leader.
    Warped,
}

/// Keeps one follower trailing one leader through the tile world.
///
/// The controller owns the breadcrumb trail of the leader's past tiles and
/// the timers that detect a stuck follower. Actors are borrowed per call.
#[derive(Clone, Debug)]
pub struct FollowController {
    config: FollowConfig,
    breadcrumbs: VecDeque<Position>,
    current_target: Option<Position>,
    last_leader_tile: Option<Position>,
    lost_time: u32,
}

impl FollowController {
    pub fn new() -> Self {
        Self::with_config(FollowConfig::default())
    }

    pub fn with_config(config: FollowConfig) -> Self {
        let capacity = config.path_max_node_count + 1;
        Self {
            config,
            breadcrumbs: VecDeque::with_capacity(capacity),
            current_target: None,
            last_leader_tile: None,
            lost_time: 0,
        }
    }

    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    /// Leader tiles still to be retraced, oldest first.
    pub fn breadcrumbs(&self) -> impl ExactSizeIterator<Item = &Position> {
        self.breadcrumbs.iter()
    }

    pub fn breadcrumb_count(&self) -> usize {
        self.breadcrumbs.len()
    }

    /// Tile the follower is currently walking toward.
    pub fn current_target(&self) -> Option<Position> {
        self.current_target
    }

    pub fn last_leader_tile(&self) -> Option<Position> {
        self.last_leader_tile
    }

    pub fn lost_time(&self) -> u32 {
        self.lost_time
    }

    /// Forgets the trail and all targets, as when tracking restarts.
    pub fn reset(&mut self) {
        self.breadcrumbs.clear();
        self.current_target = None;
        self.last_leader_tile = None;
        self.lost_time = 0;
    }

    /// Runs one control step.
    ///
    /// Missing leader or follower is not an error: the follower may not be
    /// assigned yet, so the call does nothing.
    pub fn update<L, F, W>(
        &mut self,
        tick: Tick,
        leader: Option<&L>,
        follower: Option<&mut F>,
        world: &mut W,
    ) -> FollowStep
    where
        L: Actor + ?Sized,
        F: Follower + ?Sized,
        W: Pathfinder + LocationRoster + ?Sized,
    {
        let (Some(leader), Some(follower)) = (leader, follower) else {
            return FollowStep::Skipped;
        };

        let leader_tile = leader.tile();
        if leader.location() != follower.location()
            || leader_tile.distance(follower.tile()) > self.config.out_of_range_distance
        {
            tracing::info!(
                follower = %follower.id(),
                leader = %leader.id(),
                location = %leader.location(),
                ?leader_tile,
                "follower out of range, warping to leader"
            );
            warp(follower, world, leader_tile, Some(leader.location()));
            self.reset_trail();
            follower.intent_mut().passes_through = true;
            return FollowStep::Warped;
        }

        follower.intent_mut().passes_through = true;
        self.update_following(tick, leader, follower, world)
    }

    fn update_following<L, F, W>(
        &mut self,
        tick: Tick,
        leader: &L,
        follower: &mut F,
        world: &mut W,
    ) -> FollowStep
    where
        L: Actor + ?Sized,
        F: Follower + ?Sized,
        W: Pathfinder + LocationRoster + ?Sized,
    {
        let leader_tile = leader.tile();
        let tile_distance = leader_tile.distance(follower.tile());

        if follower.speed() != leader.speed() {
            follower.intent_mut().speed = leader.speed();
        }

        if tile_distance > self.config.speedup_distance {
            follower.intent_mut().added_speed = self.config.speedup_bonus;
        } else if !follower.intent().charging {
            follower.intent_mut().added_speed = 0;
        }

        if follower.is_moving() {
            self.lost_time = 0;
        } else {
            if tile_distance < self.config.move_threshold {
                return FollowStep::Standing;
            }

            self.lost_time += 1;
            if self.lost_time >= self.config.lost_timeout {
                tracing::debug!(
                    follower = %follower.id(),
                    lost_time = self.lost_time,
                    "follower is lost"
                );
                let recovery = self.resolve_lost(leader_tile, follower, world, false, false);
                return FollowStep::Lost(recovery);
            }
        }

        if self.last_leader_tile != Some(leader_tile) {
            self.add_breadcrumb(leader_tile);
        }

        let center_distance = leader
            .bounding_box()
            .center()
            .distance(follower.bounding_box().center());
        if center_distance < self.config.proximity_threshold {
            follower.halt();
            end_forced_march(follower);
            self.breadcrumbs.clear();
            self.current_target = Some(leader_tile);
            return FollowStep::Arrived;
        }

        if self.breadcrumbs.len() > self.config.path_max_node_count
            || tile_distance > self.config.lost_distance
        {
            tracing::debug!(
                follower = %follower.id(),
                breadcrumbs = self.breadcrumbs.len(),
                tile_distance,
                "trail overflow, forcing recovery"
            );
            let recovery = self.resolve_lost(leader_tile, follower, world, true, true);
            return FollowStep::Overflow(recovery);
        }

        if follower.has_path_controller() {
            return FollowStep::Deferred;
        }

        self.advance_target(follower.tile());
        self.follow_current_target(tick, follower)
    }

    fn resolve_lost<F, W>(
        &mut self,
        leader_tile: Position,
        follower: &mut F,
        world: &mut W,
        force_warp: bool,
        emote_when_found: bool,
    ) -> Recovery
    where
        F: Follower + ?Sized,
        W: Pathfinder + LocationRoster + ?Sized,
    {
        self.current_target = Some(leader_tile);
        self.lost_time = 0;

        if come_to(
            follower,
            &*world,
            leader_tile,
            self.config.path_max_node_count,
            emote_when_found,
        ) {
            end_forced_march(follower);
            self.breadcrumbs.clear();
            return Recovery::PathFound;
        }

        if !self.breadcrumbs.is_empty() && !force_warp {
            let intent = follower.intent_mut();
            intent.charging = true;
            intent.added_speed = self.config.forced_march_bonus;
            tracing::debug!(
                follower = %follower.id(),
                breadcrumbs = self.breadcrumbs.len(),
                "no path, forcing march along trail"
            );
            Recovery::ForcedMarch
        } else {
            self.breadcrumbs.clear();
            tracing::info!(
                follower = %follower.id(),
                ?leader_tile,
                "no path, warping to leader"
            );
            warp(follower, world, leader_tile, None);
            Recovery::Warped
        }
    }

    fn add_breadcrumb(&mut self, tile: Position) {
        if self.breadcrumbs.is_empty() {
            self.current_target = Some(tile);
        }
        self.breadcrumbs.push_back(tile);
        self.last_leader_tile = Some(tile);
    }

    /// Pops the next breadcrumb once the current target tile is reached.
    fn advance_target(&mut self, follower_tile: Position) {
        if self.current_target == Some(follower_tile) {
            self.current_target = self.breadcrumbs.pop_front();
        }
    }

    fn follow_current_target<F>(&mut self, tick: Tick, follower: &mut F) -> FollowStep
    where
        F: Follower + ?Sized,
    {
        let Some(target) = self.current_target else {
            follower.halt();
            end_forced_march(follower);
            return FollowStep::Idle;
        };

        let tile_box = target
            .tile_box(self.config.tile_size)
            .inflate(-self.config.horizontal_inset, 0);
        let follower_box = follower.bounding_box();

        // Horizontal alignment wins over vertical.
        let direction = if follower_box.right() > tile_box.right()
            && follower_box.left() > tile_box.left()
        {
            Some(Heading::LEFT)
        } else if follower_box.left() < tile_box.left() && follower_box.right() < tile_box.right()
        {
            Some(Heading::RIGHT)
        } else if follower_box.bottom() >= tile_box.bottom() - self.config.bottom_tolerance {
            Some(Heading::UP)
        } else if follower_box.top() <= tile_box.top() {
            Some(Heading::DOWN)
        } else {
            None
        };

        if let Some(direction) = direction {
            follower.intent_mut().set_moving_only(direction);
        }
        follower.move_one_step(tick);
        FollowStep::Stepped
    }

    fn reset_trail(&mut self) {
        self.breadcrumbs.clear();
        self.current_target = None;
        self.last_leader_tile = None;
    }
}

/// Drops the charge and its speed bonus once the trail no longer needs it.
fn end_forced_march<F>(follower: &mut F)
where
    F: Follower + ?Sized,
{
    let intent = follower.intent_mut();
    if intent.charging {
        intent.charging = false;
        intent.added_speed = 0;
    }
}

impl Default for FollowController {
    fn default() -> Self {
        Self::new()
    }
}
