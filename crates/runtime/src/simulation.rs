//! Tick loop driving a leader along a route with a companion in tow.
use std::collections::VecDeque;
use std::fmt;

use follow_content::{Placement, Scenario, Waypoint};
use follow_core::{
    Actor, ActorId, Companion, FollowConfig, FollowStep, Follower, LocationRoster, PathRequest,
    Pathfinder, Recovery, Tick,
};

use crate::actor::SimActor;
use crate::error::{Result, RuntimeError};
use crate::session::CompanionSession;
use crate::world::World;

pub const LEADER_ID: ActorId = ActorId(0);
pub const FOLLOWER_ID: ActorId = ActorId(1);

/// Tally of controller decisions over a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationReport {
    pub ticks: u64,
    pub stepped: u64,
    pub arrivals: u64,
    pub warps: u64,
    pub paths_found: u64,
    pub forced_marches: u64,
    /// Ticks the companion was not following at all.
    pub inactive: u64,
    pub same_location: bool,
    /// Tile distance between leader and follower when the run ended.
    pub final_distance: f32,
}

impl SimulationReport {
    fn record(&mut self, step: Option<FollowStep>) {
        self.ticks += 1;
        let Some(step) = step else {
            self.inactive += 1;
            return;
        };
        match step {
            FollowStep::Stepped => self.stepped += 1,
            FollowStep::Arrived => self.arrivals += 1,
            FollowStep::Warped => self.warps += 1,
            FollowStep::Lost(recovery) | FollowStep::Overflow(recovery) => match recovery {
                Recovery::PathFound => self.paths_found += 1,
                Recovery::ForcedMarch => self.forced_marches += 1,
                Recovery::Warped => self.warps += 1,
            },
            FollowStep::Skipped
            | FollowStep::Standing
            | FollowStep::Deferred
            | FollowStep::Idle => {}
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks:          {}", self.ticks)?;
        writeln!(f, "stepped:        {}", self.stepped)?;
        writeln!(f, "arrivals:       {}", self.arrivals)?;
        writeln!(f, "warps:          {}", self.warps)?;
        writeln!(f, "paths found:    {}", self.paths_found)?;
        writeln!(f, "forced marches: {}", self.forced_marches)?;
        writeln!(f, "inactive:       {}", self.inactive)?;
        writeln!(f, "same location:  {}", self.same_location)?;
        write!(f, "final distance: {:.1} tiles", self.final_distance)
    }
}

pub struct Simulation {
    world: World,
    leader: SimActor,
    session: CompanionSession,
    route: VecDeque<Waypoint>,
    tick: Tick,
    report: SimulationReport,
}

impl Simulation {
    /// Registers both actors in the world rosters.
    pub fn new(
        mut world: World,
        leader: SimActor,
        session: CompanionSession,
        route: impl IntoIterator<Item = Waypoint>,
    ) -> Self {
        world.add(leader.location(), leader.id());
        let follower = session.follower();
        world.add(follower.location(), follower.id());

        Self {
            world,
            leader,
            session,
            route: route.into_iter().collect(),
            tick: Tick::ZERO,
            report: SimulationReport::default(),
        }
    }

    /// Builds the world from a scenario and starts with the companion recruited.
    pub fn from_scenario(scenario: &Scenario, config: FollowConfig) -> Result<Self> {
        let world = World::from_scenario(scenario);
        let leader = place(&world, LEADER_ID, &scenario.leader, config.tile_size)?;
        let follower = place(&world, FOLLOWER_ID, &scenario.follower, config.tile_size)?;

        let companion = Companion::new(FOLLOWER_ID, scenario.companion.clone());
        let mut session = CompanionSession::new(companion, follower, config)?;
        session.new_day()?;
        session.recruit()?;

        tracing::info!(
            companion = %scenario.companion,
            locations = scenario.locations.len(),
            waypoints = scenario.route.len(),
            "simulation ready"
        );
        Ok(Self::new(world, leader, session, scenario.route.iter().cloned()))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn leader(&self) -> &SimActor {
        &self.leader
    }

    pub fn session(&self) -> &CompanionSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut CompanionSession {
        &mut self.session
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Waypoints the leader has not reached yet.
    pub fn remaining_route(&self) -> usize {
        self.route.len() + usize::from(self.leader.has_path_controller())
    }

    /// Advances the leader, the companion and both movements by one tick.
    pub fn step(&mut self) -> Option<FollowStep> {
        self.advance_leader_route();
        self.leader.integrate(&self.world);

        let step = self
            .session
            .update(self.tick, Some(&self.leader), &mut self.world);
        self.session.follower_mut().integrate(&self.world);

        self.report.record(step);
        self.tick = self.tick.next();
        step
    }

    pub fn run(&mut self, ticks: u64) -> SimulationReport {
        for _ in 0..ticks {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> SimulationReport {
        let follower = self.session.follower();
        SimulationReport {
            same_location: follower.location() == self.leader.location(),
            final_distance: follower.tile().distance(self.leader.tile()),
            ..self.report.clone()
        }
    }

    /// Gives the leader a path to its next waypoint, passing through doors
    /// to other locations instantly.
    fn advance_leader_route(&mut self) {
        while !self.leader.has_path_controller() {
            let Some(waypoint) = self.route.pop_front() else {
                return;
            };

            if &waypoint.location != self.leader.location() {
                tracing::info!(
                    from = %self.leader.location(),
                    to = %waypoint.location,
                    tile = ?waypoint.tile,
                    "leader changes location"
                );
                let leader = self.leader.id();
                self.world.remove(self.leader.location(), leader);
                self.world.add(&waypoint.location, leader);
                self.leader.set_location(waypoint.location);
                self.leader.set_tile(waypoint.tile);
                continue;
            }

            let node_limit = self
                .world
                .location(&waypoint.location)
                .map_or(0, |grid| (grid.width() * grid.height()) as usize);
            let request = PathRequest {
                start: self.leader.tile(),
                target: waypoint.tile,
                location: &waypoint.location,
                actor: self.leader.id(),
                node_limit,
            };
            match self.world.find_path(&request) {
                Some(path) if !path.is_empty() => self.leader.set_path_controller(Some(path)),
                Some(_) => {}
                None => {
                    tracing::warn!(waypoint = ?waypoint.tile, "leader cannot reach waypoint")
                }
            }
        }
    }
}

fn place(world: &World, id: ActorId, placement: &Placement, tile_size: i32) -> Result<SimActor> {
    let grid = world
        .location(&placement.location)
        .ok_or_else(|| RuntimeError::UnknownLocation(placement.location.clone()))?;
    if !grid.is_walkable(placement.tile) {
        return Err(RuntimeError::BlockedPlacement {
            actor: id,
            location: placement.location.clone(),
            tile: placement.tile,
        });
    }
    Ok(SimActor::new(
        id,
        placement.location.clone(),
        placement.tile,
        placement.speed,
        tile_size,
    ))
}
