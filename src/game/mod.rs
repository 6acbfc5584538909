//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The loop driver feeds it directions and ticks; everything it reports back
//! comes out as [`GameEvent`]s.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{
    CollisionType, Game, GameEvent, GameStatus, LevelUpBanner, TickOutcome, LEVEL_UP_TEXT,
};
pub use food::Food;
pub use geometry::{Geometry, PixelRect};
pub use state::{Cell, Snake};
