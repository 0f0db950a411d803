/// Tunable thresholds of the follow controller.
///
/// Distances are Euclidean. Tile distances compare tile positions, the
/// proximity threshold compares bounding-box centers in pixels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FollowConfig {
    /// Stationary ticks tolerated before lost recovery kicks in.
    pub lost_timeout: u32,
    /// Tile distance above which the follower gets a speed bonus.
    pub speedup_distance: f32,
    /// Tile distance below which standing still is fine.
    pub move_threshold: f32,
    /// Pixel distance between box centers that counts as arrived.
    pub proximity_threshold: f32,
    /// Tile distance that forces lost recovery with warp.
    pub lost_distance: f32,
    /// Tile distance that warps the follower outright.
    pub out_of_range_distance: f32,
    /// Breadcrumb queue length cap, also the pathfinder node limit.
    pub path_max_node_count: usize,
    /// Pixel size of one tile edge.
    pub tile_size: i32,
    /// Horizontal inset applied to the target tile box when steering.
    pub horizontal_inset: i32,
    /// Slack allowed on the bottom edge before steering upwards.
    pub bottom_tolerance: i32,
    /// Speed bonus applied when the leader is getting away.
    pub speedup_bonus: u32,
    /// Speed bonus applied during a forced march.
    pub forced_march_bonus: u32,
}

impl FollowConfig {
    pub const DEFAULT_LOST_TIMEOUT: u32 = 25;
    pub const DEFAULT_SPEEDUP_DISTANCE: f32 = 7.0;
    pub const DEFAULT_MOVE_THRESHOLD: f32 = 3.0;
    pub const DEFAULT_PROXIMITY_THRESHOLD: f32 = 80.0;
    pub const DEFAULT_LOST_DISTANCE: f32 = 16.0;
    pub const DEFAULT_OUT_OF_RANGE_DISTANCE: f32 = 64.0;
    pub const DEFAULT_PATH_MAX_NODE_COUNT: usize = 28;
    pub const DEFAULT_TILE_SIZE: i32 = 64;
    pub const DEFAULT_HORIZONTAL_INSET: i32 = 2;
    pub const DEFAULT_BOTTOM_TOLERANCE: i32 = 2;
    pub const DEFAULT_SPEEDUP_BONUS: u32 = 2;
    pub const DEFAULT_FORCED_MARCH_BONUS: u32 = 4;

    pub fn new() -> Self {
        Self {
            lost_timeout: Self::DEFAULT_LOST_TIMEOUT,
            speedup_distance: Self::DEFAULT_SPEEDUP_DISTANCE,
            move_threshold: Self::DEFAULT_MOVE_THRESHOLD,
            proximity_threshold: Self::DEFAULT_PROXIMITY_THRESHOLD,
            lost_distance: Self::DEFAULT_LOST_DISTANCE,
            out_of_range_distance: Self::DEFAULT_OUT_OF_RANGE_DISTANCE,
            path_max_node_count: Self::DEFAULT_PATH_MAX_NODE_COUNT,
            tile_size: Self::DEFAULT_TILE_SIZE,
            horizontal_inset: Self::DEFAULT_HORIZONTAL_INSET,
            bottom_tolerance: Self::DEFAULT_BOTTOM_TOLERANCE,
            speedup_bonus: Self::DEFAULT_SPEEDUP_BONUS,
            forced_march_bonus: Self::DEFAULT_FORCED_MARCH_BONUS,
        }
    }
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self::new()
    }
}
