//! Hand-written doubles for controller tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use crate::env::{
    Actor, Emote, Follower, LocationRoster, MovementIntent, PathRequest, Pathfinder, TilePath,
};
use crate::geometry::{BoundingBox, Position};
use crate::types::{ActorId, LocationId, Tick};

const TILE: i32 = 64;

/// 32x32 box centered in the tile.
fn centered_box(tile: Position) -> BoundingBox {
    BoundingBox::new(tile.x * TILE + 16, tile.y * TILE + 16, 32, 32)
}

pub(crate) struct TestLeader {
    pub id: ActorId,
    pub location: LocationId,
    pub tile: Position,
    pub speed: u32,
}

impl TestLeader {
    pub fn at(location: &str, x: i32, y: i32) -> Self {
        Self {
            id: ActorId(0),
            location: LocationId::new(location),
            tile: Position::new(x, y),
            speed: 2,
        }
    }
}

impl Actor for TestLeader {
    fn id(&self) -> ActorId {
        self.id
    }

    fn location(&self) -> &LocationId {
        &self.location
    }

    fn tile(&self) -> Position {
        self.tile
    }

    fn bounding_box(&self) -> BoundingBox {
        centered_box(self.tile)
    }

    fn speed(&self) -> u32 {
        self.speed
    }
}

/// Follower that never moves on its own; tests place it explicitly.
pub(crate) struct TestFollower {
    pub id: ActorId,
    pub location: LocationId,
    pub tile: Position,
    pub intent: MovementIntent,
    pub moving: bool,
    pub path: Option<TilePath>,
    pub emotes: Vec<Emote>,
    pub steps: u32,
}

impl TestFollower {
    pub fn at(location: &str, x: i32, y: i32) -> Self {
        Self {
            id: ActorId(1),
            location: LocationId::new(location),
            tile: Position::new(x, y),
            intent: MovementIntent::with_speed(2),
            moving: false,
            path: None,
            emotes: Vec::new(),
            steps: 0,
        }
    }

    pub fn moving(mut self) -> Self {
        self.moving = true;
        self
    }
}

impl Actor for TestFollower {
    fn id(&self) -> ActorId {
        self.id
    }

    fn location(&self) -> &LocationId {
        &self.location
    }

    fn tile(&self) -> Position {
        self.tile
    }

    fn bounding_box(&self) -> BoundingBox {
        centered_box(self.tile)
    }

    fn speed(&self) -> u32 {
        self.intent.speed
    }
}

impl Follower for TestFollower {
    fn intent(&self) -> &MovementIntent {
        &self.intent
    }

    fn intent_mut(&mut self) -> &mut MovementIntent {
        &mut self.intent
    }

    fn is_moving(&self) -> bool {
        self.moving
    }

    fn set_tile(&mut self, tile: Position) {
        self.tile = tile;
    }

    fn set_location(&mut self, location: LocationId) {
        self.location = location;
    }

    fn path_controller(&self) -> Option<&TilePath> {
        self.path.as_ref()
    }

    fn set_path_controller(&mut self, path: Option<TilePath>) {
        self.path = path;
    }

    fn emote(&mut self, emote: Emote) {
        self.emotes.push(emote);
    }

    fn move_one_step(&mut self, _tick: Tick) {
        self.steps += 1;
    }
}

/// World whose pathfinder either always or never finds a path.
#[derive(Default)]
pub(crate) struct TestWorld {
    pub reachable: bool,
    pub searched: RefCell<Vec<Position>>,
    pub roster: BTreeMap<LocationId, BTreeSet<ActorId>>,
}

impl TestWorld {
    pub fn reachable() -> Self {
        Self {
            reachable: true,
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn members(&self, location: &str) -> Vec<ActorId> {
        self.roster
            .get(&LocationId::new(location))
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl Pathfinder for TestWorld {
    fn find_path(&self, request: &PathRequest<'_>) -> Option<TilePath> {
        self.searched.borrow_mut().push(request.target);
        self.reachable.then(|| TilePath::new([request.target]))
    }
}

impl LocationRoster for TestWorld {
    fn add(&mut self, location: &LocationId, actor: ActorId) {
        self.roster.entry(location.clone()).or_default().insert(actor);
    }

    fn remove(&mut self, location: &LocationId, actor: ActorId) {
        if let Some(members) = self.roster.get_mut(location) {
            members.remove(&actor);
        }
    }
}

pub(crate) fn tick(n: u64) -> Tick {
    Tick::new(n)
}
