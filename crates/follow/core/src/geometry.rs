//! Tile and pixel geometry shared by the controller and hosts.
//!
//! Two coordinate spaces coexist: [`Position`] addresses a tile on the world
//! grid, while [`Pixel`] and [`BoundingBox`] live in continuous (integer
//! pixel) space. Both use Euclidean distance.

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in tiles.
    pub fn distance(self, other: Self) -> f32 {
        euclidean(self.x - other.x, self.y - other.y)
    }

    /// Pixel-space box covering this tile.
    pub const fn tile_box(self, tile_size: i32) -> BoundingBox {
        BoundingBox::new(self.x * tile_size, self.y * tile_size, tile_size, tile_size)
    }
}

/// A point in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        euclidean(self.x - other.x, self.y - other.y)
    }

    /// Tile containing this pixel.
    pub const fn tile(self, tile_size: i32) -> Position {
        Position::new(self.x.div_euclid(tile_size), self.y.div_euclid(tile_size))
    }
}

/// Axis-aligned rectangle in pixel space. `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn center(&self) -> Pixel {
        Pixel::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Grows the box by `horizontal` on the left and right edges and by
    /// `vertical` on the top and bottom edges. Negative amounts shrink it.
    #[must_use]
    pub const fn inflate(self, horizontal: i32, vertical: i32) -> Self {
        Self::new(
            self.x - horizontal,
            self.y - vertical,
            self.width + horizontal * 2,
            self.height + vertical * 2,
        )
    }
}

fn euclidean(dx: i32, dy: i32) -> f32 {
    let dx = dx as f32;
    let dy = dy as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Enumerates every tile in the square of the given radius around `center`,
/// the center itself included, row by row.
pub fn near_points(center: Position, radius: i32) -> Vec<Position> {
    let radius = radius.max(0);
    let side = (radius * 2 + 1) as usize;
    let mut points = Vec::with_capacity(side * side);
    for y in (center.y - radius)..=(center.y + radius) {
        for x in (center.x - radius)..=(center.x + radius) {
            points.push(Position::new(x, y));
        }
    }
    points
}

/// Orders `points` by ascending distance from `origin`. Ties keep their
/// enumeration order.
pub fn sort_by_nearest(mut points: Vec<Position>, origin: Position) -> Vec<Position> {
    points.sort_by(|a, b| a.distance(origin).total_cmp(&b.distance(origin)));
    points
}
