//! Tile world served to the follow controller.
//!
//! [`World`] owns the walkable grid of every location plus the roster of
//! actors present in each one, and answers bounded path searches.
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet};

use follow_content::{LocationLayout, Scenario};
use follow_core::{
    ActorId, LocationId, LocationRoster, PathRequest, Pathfinder, Position, TilePath,
};

/// Walkability grid of a single location.
#[derive(Clone, Debug)]
pub struct GridLocation {
    id: LocationId,
    width: i32,
    height: i32,
    walls: HashSet<Position>,
}

impl GridLocation {
    /// Location without any walls.
    pub fn open(id: impl Into<LocationId>, width: i32, height: i32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            walls: HashSet::new(),
        }
    }

    pub fn from_layout(layout: &LocationLayout) -> Self {
        Self::open(
            layout.id.clone(),
            layout.width() as i32,
            layout.height() as i32,
        )
        .with_walls(layout.walls())
    }

    #[must_use]
    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, tile: Position) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    pub fn is_walkable(&self, tile: Position) -> bool {
        self.contains(tile) && !self.walls.contains(&tile)
    }

    /// Walkable 4-neighbours in a fixed order: up, right, down, left.
    fn neighbours(&self, tile: Position) -> impl Iterator<Item = Position> + '_ {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(move |(dx, dy)| Position::new(tile.x + dx, tile.y + dy))
            .filter(|next| self.is_walkable(*next))
    }
}

/// Every location of the simulation plus who is where.
#[derive(Debug, Default)]
pub struct World {
    locations: HashMap<LocationId, GridLocation>,
    rosters: BTreeMap<LocationId, BTreeSet<ActorId>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut world = Self::new();
        for layout in &scenario.locations {
            world.add_location(GridLocation::from_layout(layout));
        }
        world
    }

    pub fn add_location(&mut self, location: GridLocation) {
        self.locations.insert(location.id.clone(), location);
    }

    pub fn location(&self, id: &LocationId) -> Option<&GridLocation> {
        self.locations.get(id)
    }

    pub fn is_walkable(&self, location: &LocationId, tile: Position) -> bool {
        self.location(location)
            .is_some_and(|grid| grid.is_walkable(tile))
    }

    /// Actors present in `location`, in id order.
    pub fn members(&self, location: &LocationId) -> Vec<ActorId> {
        self.rosters
            .get(location)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_present(&self, location: &LocationId, actor: ActorId) -> bool {
        self.rosters
            .get(location)
            .is_some_and(|members| members.contains(&actor))
    }
}

impl LocationRoster for World {
    fn add(&mut self, location: &LocationId, actor: ActorId) {
        self.rosters
            .entry(location.clone())
            .or_default()
            .insert(actor);
    }

    fn remove(&mut self, location: &LocationId, actor: ActorId) {
        if let Some(members) = self.rosters.get_mut(location) {
            members.remove(&actor);
        }
    }
}

impl Pathfinder for World {
    /// A* over walkable 4-neighbours with a Manhattan heuristic.
    ///
    /// The search gives up once `node_limit` tiles have been expanded. The
    /// returned path excludes the start tile.
    fn find_path(&self, request: &PathRequest<'_>) -> Option<TilePath> {
        let grid = self.location(request.location)?;

        let mut open = BinaryHeap::new();
        let mut closed = HashSet::new();
        let mut cost: HashMap<Position, u32> = HashMap::new();
        let mut came_from: HashMap<Position, Position> = HashMap::new();

        let estimate = manhattan(request.start, request.target);
        cost.insert(request.start, 0);
        open.push(Reverse((estimate, estimate, request.start)));

        while let Some(Reverse((_, _, tile))) = open.pop() {
            if request.is_at_end(tile) {
                return Some(reconstruct(&came_from, request.start, tile));
            }
            if !closed.insert(tile) {
                continue;
            }
            if closed.len() > request.node_limit {
                tracing::trace!(
                    actor = %request.actor,
                    start = ?request.start,
                    target = ?request.target,
                    node_limit = request.node_limit,
                    "path search exhausted node limit"
                );
                return None;
            }

            let Some(&reached) = cost.get(&tile) else {
                continue;
            };
            let next_cost = reached + 1;
            for next in grid.neighbours(tile) {
                if cost.get(&next).is_some_and(|&known| known <= next_cost) {
                    continue;
                }
                cost.insert(next, next_cost);
                came_from.insert(next, tile);
                let remaining = manhattan(next, request.target);
                open.push(Reverse((next_cost + remaining, remaining, next)));
            }
        }
        None
    }
}

fn manhattan(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

fn reconstruct(
    came_from: &HashMap<Position, Position>,
    start: Position,
    end: Position,
) -> TilePath {
    let mut steps = vec![end];
    let mut tile = end;
    while let Some(&previous) = came_from.get(&tile) {
        if previous == start {
            break;
        }
        steps.push(previous);
        tile = previous;
    }
    if end == start {
        steps.clear();
    }
    steps.reverse();
    TilePath::new(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(location: &'a LocationId, start: Position, target: Position) -> PathRequest<'a> {
        PathRequest {
            start,
            target,
            location,
            actor: ActorId(1),
            node_limit: 200,
        }
    }

    fn walled() -> World {
        // Column x = 5 is blocked except for the bottom row.
        let mut world = World::new();
        world.add_location(
            GridLocation::open("Farm", 11, 7).with_walls((0..6).map(|y| Position::new(5, y))),
        );
        world
    }

    #[test]
    fn straight_path_excludes_start() {
        let world = walled();
        let farm = LocationId::new("Farm");

        let path = world
            .find_path(&request(&farm, Position::new(1, 1), Position::new(4, 1)))
            .unwrap();

        let steps: Vec<_> = path.iter().copied().collect();
        assert_eq!(
            steps,
            [Position::new(2, 1), Position::new(3, 1), Position::new(4, 1)]
        );
    }

    #[test]
    fn detours_around_walls() {
        let world = walled();
        let farm = LocationId::new("Farm");

        let path = world
            .find_path(&request(&farm, Position::new(6, 2), Position::new(3, 2)))
            .unwrap();

        // Down to row 6, across, and back up.
        assert_eq!(path.len(), 4 + 3 + 4);
        assert_eq!(path.end(), Some(Position::new(3, 2)));
        assert!(path.iter().all(|tile| world.is_walkable(&farm, *tile)));
    }

    #[test]
    fn node_limit_bounds_the_search() {
        let world = walled();
        let farm = LocationId::new("Farm");

        let mut bounded = request(&farm, Position::new(6, 2), Position::new(3, 2));
        bounded.node_limit = 5;

        assert_eq!(world.find_path(&bounded), None);
    }

    #[test]
    fn unreachable_or_unknown_targets_yield_nothing() {
        let world = walled();
        let farm = LocationId::new("Farm");
        let town = LocationId::new("Town");

        assert_eq!(
            world.find_path(&request(&farm, Position::new(6, 2), Position::new(5, 2))),
            None
        );
        assert_eq!(
            world.find_path(&request(&town, Position::new(1, 1), Position::new(2, 1))),
            None
        );
    }

    #[test]
    fn start_on_target_is_an_empty_path() {
        let world = walled();
        let farm = LocationId::new("Farm");

        let path = world
            .find_path(&request(&farm, Position::new(2, 2), Position::new(2, 2)))
            .unwrap();

        assert!(path.is_empty());
    }

    #[test]
    fn roster_moves_are_idempotent() {
        let mut world = walled();
        let farm = LocationId::new("Farm");

        world.add(&farm, ActorId(3));
        world.add(&farm, ActorId(1));
        world.add(&farm, ActorId(3));
        world.remove(&LocationId::new("Town"), ActorId(3));

        assert_eq!(world.members(&farm), [ActorId(1), ActorId(3)]);
        world.remove(&farm, ActorId(3));
        assert!(!world.is_present(&farm, ActorId(3)));
    }
}
