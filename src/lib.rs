//! Cowboy Snake - a single-screen arcade Snake for the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Sound cues and background music (audio module)
//! - Session statistics (metrics module)
//! - The real-time loop driver (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
