//! Mapping from grid cells to screen rectangles
//!
//! Pure arithmetic, no rendering dependencies. Pixels are measured from the
//! top-left corner of the bordered playfield.

use super::config::GameConfig;
use super::state::Cell;

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl PixelRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same rectangle moved by (dx, dy)
    pub fn offset(self, dx: u16, dy: u16) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// Grid layout on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    grid_size: u16,
    cell_width: u16,
    cell_height: u16,
    offset: u16,
}

impl Geometry {
    pub fn new(grid_size: u16, cell_width: u16, cell_height: u16, offset: u16) -> Self {
        Self {
            grid_size,
            cell_width,
            cell_height,
            offset,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let grid_size = u16::try_from(config.grid_size).unwrap_or(u16::MAX);
        Self::new(
            grid_size,
            config.cell_width,
            config.cell_height,
            config.border_offset,
        )
    }

    /// Total size (width, height) including the border on every side
    pub fn window_size(&self) -> (u16, u16) {
        let playfield = self.playfield();
        (
            playfield.width.saturating_add(self.offset.saturating_mul(2)),
            playfield.height.saturating_add(self.offset.saturating_mul(2)),
        )
    }

    /// The whole bordered area
    pub fn frame(&self) -> PixelRect {
        let (width, height) = self.window_size();
        PixelRect::new(0, 0, width, height)
    }

    /// Area inside the border that holds the cells
    pub fn playfield(&self) -> PixelRect {
        PixelRect::new(
            self.offset,
            self.offset,
            self.grid_size.saturating_mul(self.cell_width),
            self.grid_size.saturating_mul(self.cell_height),
        )
    }

    /// Rectangle covered by `cell`, or `None` when the cell is off the grid
    pub fn cell_rect(&self, cell: Cell) -> Option<PixelRect> {
        let x = u16::try_from(cell.x).ok().filter(|&x| x < self.grid_size)?;
        let y = u16::try_from(cell.y).ok().filter(|&y| y < self.grid_size)?;

        Some(PixelRect::new(
            self.offset.saturating_add(x.saturating_mul(self.cell_width)),
            self.offset.saturating_add(y.saturating_mul(self.cell_height)),
            self.cell_width,
            self.cell_height,
        ))
    }
}
