//! Simulated character used as both leader and follower.
//!
//! Movement is two-phase. The controller records intent through
//! [`Follower::move_one_step`]; [`SimActor::integrate`] then applies it
//! against the walls of the actor's location once per tick. An attached path
//! controller takes precedence over the intent.
use follow_core::{
    Actor, ActorId, BoundingBox, Emote, Follower, LocationId, MovementIntent, Pixel, Position,
    Tick, TilePath,
};

use crate::world::{GridLocation, World};

#[derive(Clone, Debug)]
pub struct SimActor {
    id: ActorId,
    location: LocationId,
    /// Top-left corner of the collision box.
    origin: Pixel,
    box_size: i32,
    tile_size: i32,
    intent: MovementIntent,
    moving: bool,
    step_requested: bool,
    path: Option<TilePath>,
    emotes: Vec<Emote>,
}

impl SimActor {
    /// Places the actor centered on `tile` with a box half a tile wide.
    pub fn new(
        id: ActorId,
        location: impl Into<LocationId>,
        tile: Position,
        speed: u32,
        tile_size: i32,
    ) -> Self {
        let mut actor = Self {
            id,
            location: location.into(),
            origin: Pixel::default(),
            box_size: tile_size / 2,
            tile_size,
            intent: MovementIntent::with_speed(speed),
            moving: false,
            step_requested: false,
            path: None,
            emotes: Vec::new(),
        };
        actor.origin = actor.origin_on(tile);
        actor
    }

    pub fn origin(&self) -> Pixel {
        self.origin
    }

    /// Emotes shown so far, oldest first.
    pub fn emotes(&self) -> &[Emote] {
        &self.emotes
    }

    /// Applies one tick of movement and updates [`Actor`]-visible motion state.
    pub fn integrate(&mut self, world: &World) {
        let before = self.origin;
        if self.path.is_some() {
            self.drive_path();
        } else if self.step_requested {
            if let Some(grid) = world.location(&self.location) {
                self.walk(grid);
            }
        }
        self.step_requested = false;
        self.moving = self.origin != before;
    }

    fn origin_on(&self, tile: Position) -> Pixel {
        let inset = (self.tile_size - self.box_size) / 2;
        Pixel::new(
            tile.x * self.tile_size + inset,
            tile.y * self.tile_size + inset,
        )
    }

    fn drive_path(&mut self) {
        let speed = self.intent.effective_speed() as i32;
        let Some(next) = self.path.as_ref().and_then(TilePath::next_step) else {
            self.path = None;
            return;
        };

        let goal = self.origin_on(next);
        self.origin = Pixel::new(
            approach(self.origin.x, goal.x, speed),
            approach(self.origin.y, goal.y, speed),
        );

        if self.origin == goal {
            if let Some(path) = self.path.as_mut() {
                path.advance();
                if path.is_empty() {
                    self.path = None;
                }
            }
        }
    }

    /// Moves along the heading, one axis at a time so a blocked axis does not
    /// cancel the other.
    fn walk(&mut self, grid: &GridLocation) {
        let speed = self.intent.effective_speed() as i32;
        let (dx, dy) = self.intent.heading.delta();

        for (step_x, step_y) in [(dx * speed, 0), (0, dy * speed)] {
            if step_x == 0 && step_y == 0 {
                continue;
            }
            let candidate = Pixel::new(self.origin.x + step_x, self.origin.y + step_y);
            if self.can_occupy(grid, candidate) {
                self.origin = candidate;
            }
        }
    }

    /// Charging actors ignore walls but never leave the location.
    fn can_occupy(&self, grid: &GridLocation, origin: Pixel) -> bool {
        let area = BoundingBox::new(origin.x, origin.y, self.box_size, self.box_size);
        let corners = [
            Pixel::new(area.left(), area.top()),
            Pixel::new(area.right() - 1, area.top()),
            Pixel::new(area.left(), area.bottom() - 1),
            Pixel::new(area.right() - 1, area.bottom() - 1),
        ];
        corners.into_iter().all(|corner| {
            let tile = corner.tile(self.tile_size);
            if self.intent.charging {
                grid.contains(tile)
            } else {
                grid.is_walkable(tile)
            }
        })
    }
}

fn approach(from: i32, to: i32, speed: i32) -> i32 {
    if from < to {
        (from + speed).min(to)
    } else {
        (from - speed).max(to)
    }
}

impl Actor for SimActor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn location(&self) -> &LocationId {
        &self.location
    }

    fn tile(&self) -> Position {
        self.bounding_box().center().tile(self.tile_size)
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.origin.x, self.origin.y, self.box_size, self.box_size)
    }

    fn speed(&self) -> u32 {
        self.intent.speed
    }
}

impl Follower for SimActor {
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
        self.origin = self.origin_on(tile);
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
        tracing::debug!(actor = %self.id, %emote, id = emote.id(), "emote");
        self.emotes.push(emote);
    }

    fn move_one_step(&mut self, _tick: Tick) {
        self.step_requested = true;
    }
}
