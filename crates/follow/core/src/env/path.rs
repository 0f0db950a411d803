use std::collections::VecDeque;

use crate::geometry::Position;
use crate::types::{ActorId, LocationId};

/// Parameters of a single bounded path search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathRequest<'a> {
    pub start: Position,
    pub target: Position,
    pub location: &'a LocationId,
    pub actor: ActorId,
    /// Upper bound on the number of nodes the search may expand.
    pub node_limit: usize,
}

impl PathRequest<'_> {
    /// Termination predicate handed to the search.
    pub fn is_at_end(&self, tile: Position) -> bool {
        tile == self.target
    }
}

/// Bounded tile search supplied by the host.
///
/// Implementations must return promptly with `None` once `node_limit` nodes
/// have been expanded without reaching the target.
pub trait Pathfinder {
    fn find_path(&self, request: &PathRequest<'_>) -> Option<TilePath>;
}

/// Walkable route produced by a [`Pathfinder`]: the tiles to visit in order,
/// ending on the target.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TilePath {
    steps: VecDeque<Position>,
}

impl TilePath {
    pub fn new(steps: impl IntoIterator<Item = Position>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Next tile to walk to.
    pub fn next_step(&self) -> Option<Position> {
        self.steps.front().copied()
    }

    /// Drops the next tile once it has been reached.
    pub fn advance(&mut self) -> Option<Position> {
        self.steps.pop_front()
    }

    pub fn end(&self) -> Option<Position> {
        self.steps.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.steps.iter()
    }
}
