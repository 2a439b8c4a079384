//! Heart Arcade - Snake and Winter Heart Chase
//!
//! Core modules:
//! - `sim`: Shared simulation primitives (geometry, placement, scheduling)
//! - `snake`: Grid snake engine
//! - `chase`: Heart chase engine
//! - `settings`: Data-driven game tuning
//! - `web`: Browser bindings (wasm32 only)

pub mod chase;
pub mod error;
pub mod settings;
pub mod sim;
pub mod snake;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ArcadeError;
pub use settings::{ChaseTuning, Settings, SnakeTuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Snake grid cell size (arena units)
    pub const GRID_SIZE: i32 = 20;
    /// Snake arena dimensions
    pub const SNAKE_ARENA_WIDTH: i32 = 700;
    pub const SNAKE_ARENA_HEIGHT: i32 = 500;

    /// Chase arena default dimensions (resizable at runtime)
    pub const CHASE_ARENA_WIDTH: f32 = 800.0;
    pub const CHASE_ARENA_HEIGHT: f32 = 600.0;
    /// Player sprite is square
    pub const PLAYER_SIZE: f32 = 48.0;
    /// Heart sprite is square
    pub const HEART_SIZE: f32 = 30.0;
    /// Maximum hearts alive at once
    pub const MAX_HEARTS: usize = 5;
    /// Lives are capped here
    pub const MAX_LIVES: u32 = 5;
    /// Hearts needed to clear a level
    pub const HEARTS_PER_LEVEL: u32 = 5;
    /// Sprite animation cadence (ms per frame)
    pub const ANIMATION_FRAME_MS: u64 = 150;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
