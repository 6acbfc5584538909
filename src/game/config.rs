use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Smallest grid that still fits the spawn layout
pub const MIN_GRID_SIZE: usize = 10;

/// Fastest render rate the loop driver accepts
pub const MAX_FRAMES_PER_SECOND: u32 = 1000;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Cells per side of the square grid
    pub grid_size: usize,
    /// Foods to eat before the level goes up
    pub foods_per_level: u32,
    /// How long the "Level Up" banner stays on screen
    pub level_up_banner_secs: f32,
    /// Real time between two simulation ticks
    pub tick_interval_ms: u64,
    /// Render rate of the loop driver
    pub frames_per_second: u32,

    // Geometry, in terminal character cells
    /// Width of one grid cell
    pub cell_width: u16,
    /// Height of one grid cell
    pub cell_height: u16,
    /// Border around the playfield
    pub border_offset: u16,

    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            foods_per_level: 3,
            level_up_banner_secs: 2.0,
            tick_interval_ms: 1300,
            frames_per_second: 60,
            cell_width: 2,
            cell_height: 1,
            border_offset: 1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < MIN_GRID_SIZE {
            bail!(
                "grid_size must be at least {}, got {}",
                MIN_GRID_SIZE,
                self.grid_size
            );
        }
        if self.grid_size > i32::MAX as usize {
            bail!("grid_size {} is too large", self.grid_size);
        }
        if self.foods_per_level == 0 {
            bail!("foods_per_level must be positive");
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be positive");
        }
        if self.frames_per_second == 0 || self.frames_per_second > MAX_FRAMES_PER_SECOND {
            bail!(
                "frames_per_second must be between 1 and {}, got {}",
                MAX_FRAMES_PER_SECOND,
                self.frames_per_second
            );
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            bail!(
                "cell size must be positive, got {}x{}",
                self.cell_width,
                self.cell_height
            );
        }
        if self.border_offset == 0 {
            bail!("border_offset must be at least 1 to fit the playfield border");
        }
        if Duration::try_from_secs_f32(self.level_up_banner_secs).is_err() {
            bail!(
                "level_up_banner_secs must be a non-negative duration, got {}",
                self.level_up_banner_secs
            );
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        let fps = self.frames_per_second.clamp(1, MAX_FRAMES_PER_SECOND);
        Duration::from_secs(1) / fps
    }

    /// Unrepresentable values saturate; `validate` rejects them up front
    pub fn banner_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.level_up_banner_secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Grid size as a signed coordinate bound
    pub fn grid_extent(&self) -> i32 {
        self.grid_size as i32
    }
}
