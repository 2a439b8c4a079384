//! Game settings and tuning
//!
//! Every gameplay constant lives here so balance can be changed from JSON
//! without touching the engines. Defaults reproduce the shipped games.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ArcadeError;

/// Snake balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeTuning {
    pub arena_width: i32,
    pub arena_height: i32,
    /// Cell size; every body coordinate is a multiple of this
    pub grid_size: i32,
    /// Initial tick interval (ms)
    pub base_speed_ms: u32,
    /// Tick interval never drops below this
    pub min_speed_ms: u32,
    pub speed_step_ms: u32,
    pub base_segment_size: f32,
    pub segment_growth: f32,
    /// Segment size grows whenever score is a multiple of this
    pub grow_every_points: u32,
    /// Tick interval shrinks whenever score is a multiple of this
    pub speed_up_every_points: u32,
    /// Extra pickup radius around the fruit center
    pub fruit_hitbox: f32,
    pub points_per_fruit: u32,
    /// Rejection sampling budget before scanning free cells (None = unbounded)
    pub fruit_attempts: Option<u32>,
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            arena_width: SNAKE_ARENA_WIDTH,
            arena_height: SNAKE_ARENA_HEIGHT,
            grid_size: GRID_SIZE,
            base_speed_ms: 100,
            min_speed_ms: 30,
            speed_step_ms: 10,
            base_segment_size: GRID_SIZE as f32,
            segment_growth: 5.0,
            grow_every_points: 30,
            speed_up_every_points: 60,
            fruit_hitbox: 15.0,
            points_per_fruit: 10,
            fruit_attempts: Some(10_000),
        }
    }
}

impl SnakeTuning {
    /// Number of grid columns
    pub fn columns(&self) -> i32 {
        self.arena_width / self.grid_size
    }

    /// Number of grid rows
    pub fn rows(&self) -> i32 {
        self.arena_height / self.grid_size
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        if self.grid_size <= 0 {
            return Err(ArcadeError::invalid("snake.grid_size", "must be positive"));
        }
        if self.arena_width % self.grid_size != 0 || self.arena_height % self.grid_size != 0 {
            return Err(ArcadeError::invalid(
                "snake.arena_width",
                "arena must be a whole number of grid cells",
            ));
        }
        // Start body sits at x = 60..100, y = 100
        if self.columns() < 6 || self.rows() < 6 {
            return Err(ArcadeError::invalid("snake.arena_width", "arena too small"));
        }
        if self.min_speed_ms == 0 || self.base_speed_ms < self.min_speed_ms {
            return Err(ArcadeError::invalid(
                "snake.min_speed_ms",
                "must be non-zero and not above base_speed_ms",
            ));
        }
        if self.grow_every_points == 0 || self.speed_up_every_points == 0 {
            return Err(ArcadeError::invalid(
                "snake.grow_every_points",
                "escalation intervals must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Heart chase balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseTuning {
    pub arena_width: f32,
    pub arena_height: f32,

    // === Progression ===
    pub base_player_speed: f32,
    pub speed_per_level: f32,
    pub base_heart_lifetime_ms: u32,
    pub min_heart_lifetime_ms: u32,
    pub base_spawn_interval_ms: u32,
    pub min_spawn_interval_ms: u32,
    /// Levels past the first that use the gentle steps
    pub gentle_levels: u32,
    pub gentle_lifetime_step_ms: u32,
    pub steep_lifetime_step_ms: u32,
    pub gentle_spawn_step_ms: u32,
    pub steep_spawn_step_ms: u32,
    pub bonus_heart_chance: f64,
    pub bonus_chance_per_level: f64,
    /// Bonus hearts decay faster
    pub bonus_lifetime_factor: f32,
    /// Extra life every N levels
    pub life_every_levels: u32,

    // === Lives and streaks ===
    pub starting_lives: u32,
    pub streak_for_life: u32,
    pub streak_for_climb: u32,
    pub climb_duration_ms: u64,

    // === Hearts ===
    pub collect_radius: f32,
    pub expiring_threshold_ms: f32,
    pub heart_spacing: f32,
    pub heart_player_clearance: f32,
    pub heart_obstacle_padding: f32,
    pub heart_attempts: u32,

    // === Obstacles ===
    pub base_obstacles: u32,
    pub obstacles_per_level: u32,
    pub max_extra_obstacles: u32,
    pub obstacle_padding: f32,
    pub corner_clearance: f32,
    pub center_clearance: f32,
    pub obstacle_attempts: u32,
}

impl Default for ChaseTuning {
    fn default() -> Self {
        Self {
            arena_width: CHASE_ARENA_WIDTH,
            arena_height: CHASE_ARENA_HEIGHT,

            base_player_speed: 4.0,
            speed_per_level: 0.3,
            base_heart_lifetime_ms: 8000,
            min_heart_lifetime_ms: 2500,
            base_spawn_interval_ms: 2500,
            min_spawn_interval_ms: 800,
            gentle_levels: 3,
            gentle_lifetime_step_ms: 150,
            steep_lifetime_step_ms: 400,
            gentle_spawn_step_ms: 80,
            steep_spawn_step_ms: 200,
            bonus_heart_chance: 0.1,
            bonus_chance_per_level: 0.02,
            bonus_lifetime_factor: 0.7,
            life_every_levels: 3,

            starting_lives: 3,
            streak_for_life: 2,
            streak_for_climb: 3,
            climb_duration_ms: 5000,

            collect_radius: 35.0,
            expiring_threshold_ms: 1500.0,
            heart_spacing: 50.0,
            heart_player_clearance: 80.0,
            heart_obstacle_padding: 10.0,
            heart_attempts: 100,

            base_obstacles: 12,
            obstacles_per_level: 2,
            max_extra_obstacles: 10,
            obstacle_padding: 15.0,
            corner_clearance: 80.0,
            center_clearance: 120.0,
            obstacle_attempts: 50,
        }
    }
}

impl ChaseTuning {
    pub fn validate(&self) -> Result<(), ArcadeError> {
        // Heart placement draws from [30, size - 30)
        if self.arena_width < PLAYER_SIZE + 60.0 || self.arena_height < PLAYER_SIZE + 60.0 {
            return Err(ArcadeError::invalid("chase.arena_width", "arena too small"));
        }
        if self.starting_lives == 0 || self.starting_lives > MAX_LIVES {
            return Err(ArcadeError::invalid(
                "chase.starting_lives",
                format!("must be within 1..={MAX_LIVES}"),
            ));
        }
        if self.min_heart_lifetime_ms == 0 || self.min_spawn_interval_ms == 0 {
            return Err(ArcadeError::invalid(
                "chase.min_heart_lifetime_ms",
                "timer floors must be non-zero",
            ));
        }
        if !(0.0..=1.0).contains(&self.bonus_heart_chance) {
            return Err(ArcadeError::invalid(
                "chase.bonus_heart_chance",
                "must be a probability",
            ));
        }
        if self.life_every_levels == 0 {
            return Err(ArcadeError::invalid(
                "chase.life_every_levels",
                "must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snake: SnakeTuning,
    pub chase: ChaseTuning,
    /// Fixed RNG seed (random per session when unset)
    pub seed: Option<u64>,
}

impl Settings {
    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ArcadeError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ArcadeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        self.snake.validate()?;
        self.chase.validate()
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, ArcadeError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write settings to a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), ArcadeError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "heart_arcade_settings";

    /// Load settings from LocalStorage, falling back to defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Ignoring stored settings: {err}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
