use std::time::Duration;

pub const DEFAULT_DIMENSION: usize = 8;
pub const MAX_DIMENSION: usize = 8;
pub const DEFAULT_THRESHOLD: u32 = 2048;
pub const MAX_COMMANDS: usize = 100;
/// Largest tile value; two of these still merge without overflowing `u32`.
pub const MAX_TILE: u32 = 1 << 30;
pub const QUEUE_DELAY: Duration = Duration::from_millis(300);

/// One in `FOUR_TILE_ODDS` inserted tiles is a 4, the rest are 2.
pub const FOUR_TILE_ODDS: u32 = 10;
