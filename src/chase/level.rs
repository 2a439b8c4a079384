//! Level progression formulas
//!
//! Levels 1-4 are forgiving (8s hearts down to ~7.5s), then hearts expire
//! and spawn faster each level until the floors.

use serde::Serialize;

use crate::settings::ChaseTuning;

/// Difficulty values derived from the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelParams {
    /// Units moved per frame per axis
    pub player_speed: f32,
    pub heart_lifetime_ms: u32,
    pub heart_spawn_interval_ms: u32,
}

impl LevelParams {
    pub fn for_level(level: u32, tuning: &ChaseTuning) -> Self {
        let difficulty = level.saturating_sub(1);
        let gentle = tuning.gentle_levels;

        let lifetime_reduction = if difficulty <= gentle {
            difficulty * tuning.gentle_lifetime_step_ms
        } else {
            gentle * tuning.gentle_lifetime_step_ms
                + (difficulty - gentle) * tuning.steep_lifetime_step_ms
        };
        let spawn_reduction = if difficulty <= gentle {
            difficulty * tuning.gentle_spawn_step_ms
        } else {
            gentle * tuning.gentle_spawn_step_ms + (difficulty - gentle) * tuning.steep_spawn_step_ms
        };

        Self {
            player_speed: tuning.base_player_speed + difficulty as f32 * tuning.speed_per_level,
            heart_lifetime_ms: tuning
                .base_heart_lifetime_ms
                .saturating_sub(lifetime_reduction)
                .max(tuning.min_heart_lifetime_ms),
            heart_spawn_interval_ms: tuning
                .base_spawn_interval_ms
                .saturating_sub(spawn_reduction)
                .max(tuning.min_spawn_interval_ms),
        }
    }
}

/// Probability that a new heart is a bonus heart
pub fn bonus_chance(level: u32, tuning: &ChaseTuning) -> f64 {
    (tuning.bonus_heart_chance + level.saturating_sub(1) as f64 * tuning.bonus_chance_per_level)
        .min(1.0)
}

/// Scenery obstacles generated for a level (ruins not included)
pub fn obstacle_count(level: u32, tuning: &ChaseTuning) -> u32 {
    tuning.base_obstacles + (level * tuning.obstacles_per_level).min(tuning.max_extra_obstacles)
}

/// Points for collecting a heart
pub fn heart_points(is_bonus: bool, level: u32) -> u32 {
    let base = if is_bonus { 25 } else { 10 };
    base + level * 2
}
