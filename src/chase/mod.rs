//! Winter heart chase engine
//!
//! A free-moving avatar collects timed hearts among snowy obstacles.
//! Streaks grant lives and temporary climbing; levels speed everything up.

pub mod catalog;
pub mod hearts;
pub mod level;
pub mod obstacles;
pub mod session;
pub mod state;
pub mod tick;
pub mod view;

pub use catalog::{Animal, AnimalSprites, Facing, OBSTACLE_TYPES, ObstacleType, RUINS};
pub use level::LevelParams;
pub use session::ChaseSession;
pub use state::{ChaseEvent, ChaseKey, ChasePhase, ChaseState, Heart, Obstacle, Player};
pub use tick::tick;
pub use view::{ChaseView, HeartView, ObstacleView, PlayerView};
