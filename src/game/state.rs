use std::collections::VecDeque;

use super::direction::Direction;

/// A cell on the game grid
///
/// Coordinates are signed so a head that has just left the board (x == -1)
/// can still be represented and detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Check if the cell lies on a square grid of `grid_size` cells per side
    pub fn is_within(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

/// Body the snake starts with, head first
pub const SPAWN_BODY: [Cell; 3] = [Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)];

/// Heading the snake starts with
pub const SPAWN_DIRECTION: Direction = Direction::Right;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Cell>,
    direction: Direction,
    grow_pending: bool,
}

impl Snake {
    /// Create a snake in the spawn layout
    pub fn new() -> Self {
        Self {
            body: VecDeque::from(SPAWN_BODY),
            direction: SPAWN_DIRECTION,
            grow_pending: false,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Returns `None` if `body` is empty.
    pub fn from_body(
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Cell> = body.into_iter().collect();
        if body.is_empty() {
            return None;
        }

        Some(Self {
            body,
            direction,
            grow_pending: false,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grow_pending(&self) -> bool {
        self.grow_pending
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if any segment, head included, occupies `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check if `cell` collides with the snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == cell)
    }

    /// Turn towards `direction` unless it would reverse the snake onto itself
    ///
    /// Returns whether the new heading was accepted. It applies on the next
    /// [`Snake::advance`].
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Keep the tail on the next advance
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Move one cell in the current direction
    ///
    /// Bounds and self-overlap are not checked here.
    pub fn advance(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    /// Restore the spawn layout
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.extend(SPAWN_BODY);
        self.direction = SPAWN_DIRECTION;
        self.grow_pending = false;
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}
