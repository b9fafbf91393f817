use crate::error::ConfigError;
use crate::grid::CELL_SIZE;
use crate::search::TrailingRing;

/// Targeting configuration and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetingConfig {
    /// When false, lookups run only the baseline and skip every strategy.
    pub enabled: bool,

    /// Forward the winning producer of each lookup to the diagnostic sink.
    /// Never affects which cell is chosen.
    pub show_diagnostic_overlay: bool,

    /// World units per cell.
    pub cell_size: u32,

    /// Base reach in cells on each axis, before the tool boost.
    pub range_x: i32,
    pub range_y: i32,

    /// World size in cells. Reach is clamped to `[margin, size - margin]`.
    pub world_width: i32,
    pub world_height: i32,
    pub world_margin: i32,

    /// Handling of valid cells left over in the outermost ring.
    pub trailing_ring: TrailingRing,
}

impl TargetingConfig {
    pub const DEFAULT_RANGE_X: i32 = 5;
    pub const DEFAULT_RANGE_Y: i32 = 4;
    pub const DEFAULT_WORLD_WIDTH: i32 = 8400;
    pub const DEFAULT_WORLD_HEIGHT: i32 = 2400;
    pub const DEFAULT_WORLD_MARGIN: i32 = 10;
    /// Largest accepted `range_x`/`range_y`, in cells.
    pub const MAX_RANGE: i32 = 1024;

    pub fn new() -> Self {
        Self {
            enabled: true,
            show_diagnostic_overlay: false,
            cell_size: CELL_SIZE,
            range_x: Self::DEFAULT_RANGE_X,
            range_y: Self::DEFAULT_RANGE_Y,
            world_width: Self::DEFAULT_WORLD_WIDTH,
            world_height: Self::DEFAULT_WORLD_HEIGHT,
            world_margin: Self::DEFAULT_WORLD_MARGIN,
            trailing_ring: TrailingRing::default(),
        }
    }

    pub fn with_world_size(mut self, width: i32, height: i32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    pub fn with_diagnostic_overlay(mut self, show: bool) -> Self {
        self.show_diagnostic_overlay = show;
        self
    }

    /// Checks that the configuration describes a usable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.range_x < 0 || self.range_y < 0 {
            return Err(ConfigError::NegativeRange {
                x: self.range_x,
                y: self.range_y,
            });
        }
        if self.range_x > Self::MAX_RANGE || self.range_y > Self::MAX_RANGE {
            return Err(ConfigError::RangeTooLarge {
                x: self.range_x,
                y: self.range_y,
                max: Self::MAX_RANGE,
            });
        }
        // Both world axes must leave room for at least one cell inside the margin.
        let margin = self.world_margin.max(0);
        let fits = |size: i32| margin.checked_mul(2).is_some_and(|inner| size >= inner);
        if !fits(self.world_width) || !fits(self.world_height) {
            return Err(ConfigError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
                margin: self.world_margin,
            });
        }
        Ok(())
    }
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self::new()
    }
}
