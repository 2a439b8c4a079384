//! Heart chase state and core types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{Animal, Facing, ObstacleType};
use super::level::LevelParams;
use crate::consts::*;
use crate::settings::ChaseTuning;
use crate::sim::{Deadline, IntervalTicker, LogicalClock, Rect};

/// Player collision footprint relative to the sprite's top-left (the feet)
pub const PLAYER_HITBOX: Rect = Rect::new(12.0, 24.0, 24.0, 20.0);

/// Current phase of a chase session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChasePhase {
    /// Waiting for the player to pick an avatar
    AnimalSelect,
    Running,
    Paused,
    GameOver,
}

/// The avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Player {
    /// Sprite top-left
    pub pos: Vec2,
    pub facing: Facing,
    /// Animation only
    pub moving: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(50.0, 50.0),
            facing: Facing::Down,
            moving: false,
        }
    }
}

impl Player {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(PLAYER_SIZE / 2.0)
    }

    /// World-space collision box if the sprite stood at `pos`
    pub fn hitbox_at(pos: Vec2) -> Rect {
        PLAYER_HITBOX.offset(pos)
    }
}

/// A collectible heart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Heart {
    pub id: u32,
    /// Sprite top-left
    pub pos: Vec2,
    /// Session time of the spawn
    pub spawn_time_ms: u64,
    pub is_bonus: bool,
    /// Lifetime left as of the last aging pass
    pub remaining_ms: f32,
    /// Total lifetime as of the last aging pass
    pub lifetime_ms: f32,
    /// About to expire (render hint)
    pub expiring: bool,
}

impl Heart {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(HEART_SIZE / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(self.pos, HEART_SIZE, HEART_SIZE)
    }
}

/// A static obstacle sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    /// Sprite top-left
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Collidable sub-rectangle relative to `pos`
    pub hitbox: Rect,
    pub source: &'static str,
    /// The fixed centerpiece
    pub is_ruins: bool,
}

impl Obstacle {
    pub fn new(kind: &ObstacleType, pos: Vec2, is_ruins: bool) -> Self {
        Self {
            pos,
            width: kind.width,
            height: kind.height,
            hitbox: kind.hitbox,
            source: kind.source,
            is_ruins,
        }
    }

    /// Full sprite rectangle
    pub fn bounds(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }

    /// Collidable rectangle in world space
    pub fn world_hitbox(&self) -> Rect {
        self.hitbox.offset(self.pos)
    }
}

/// Logical keys the chase game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChaseKey {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Restart,
}

impl ChaseKey {
    /// Map a browser `KeyboardEvent.code` value (arrows or WASD)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Self::Up),
            "ArrowDown" | "KeyS" => Some(Self::Down),
            "ArrowLeft" | "KeyA" => Some(Self::Left),
            "ArrowRight" | "KeyD" => Some(Self::Right),
            "Space" => Some(Self::Pause),
            "Enter" => Some(Self::Restart),
            _ => None,
        }
    }
}

/// Held state of one movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisKeys {
    pub negative: bool,
    pub positive: bool,
}

impl AxisKeys {
    pub fn press(&mut self, positive: bool) {
        self.set(positive, true);
    }

    pub fn release(&mut self, positive: bool) {
        self.set(positive, false);
    }

    fn set(&mut self, positive: bool, down: bool) {
        if positive {
            self.positive = down;
        } else {
            self.negative = down;
        }
    }

    /// -1, 0 or 1; with both keys held the positive side (down/right) wins
    pub fn resolve(&self) -> f32 {
        if self.positive {
            1.0
        } else if self.negative {
            -1.0
        } else {
            0.0
        }
    }
}

/// All held movement keys; axes resolve independently so diagonals work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub horizontal: AxisKeys,
    pub vertical: AxisKeys,
}

impl HeldKeys {
    pub fn set(&mut self, key: ChaseKey, down: bool) {
        let (axis, positive) = match key {
            ChaseKey::Up => (&mut self.vertical, false),
            ChaseKey::Down => (&mut self.vertical, true),
            ChaseKey::Left => (&mut self.horizontal, false),
            ChaseKey::Right => (&mut self.horizontal, true),
            ChaseKey::Pause | ChaseKey::Restart => return,
        };
        if down {
            axis.press(positive);
        } else {
            axis.release(positive);
        }
    }

    /// Unit direction per axis (not normalized; diagonals are faster)
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.horizontal.resolve(), self.vertical.resolve())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Notable things that happened, for banners and effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ChaseEvent {
    GameStarted { animal: Animal },
    HeartSpawned { id: u32, is_bonus: bool },
    HeartCollected { id: u32, points: u32 },
    HeartMissed { id: u32 },
    /// Streak reward: +1 life
    StreakLife { lives: u32 },
    ClimbStarted,
    ClimbRefreshed,
    ClimbEnded,
    LifeLost { lives: u32 },
    LevelUp { level: u32 },
    GameOver { score: u32, level: u32 },
}

/// Complete state of one chase session
#[derive(Debug, Clone)]
pub struct ChaseState {
    pub tuning: ChaseTuning,
    pub phase: ChasePhase,
    pub animal: Option<Animal>,
    pub arena_width: f32,
    pub arena_height: f32,

    pub player: Player,
    pub hearts: Vec<Heart>,
    pub obstacles: Vec<Obstacle>,
    pub keys: HeldKeys,

    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub hearts_this_level: u32,
    /// Consecutive collections without a miss
    pub streak: u32,
    /// Obstacles are passable while set
    pub can_climb: bool,
    pub params: LevelParams,

    /// Sprite animation frame
    pub frame: u32,

    /// Session time; only advances while running
    pub(crate) clock: LogicalClock,
    pub(crate) climb_timer: Deadline,
    pub(crate) animation: IntervalTicker,
    pub(crate) last_spawn_ms: u64,
    pub(crate) rng: Pcg32,
    next_heart_id: u32,
    events: Vec<ChaseEvent>,
}

impl ChaseState {
    /// New session waiting at animal select
    pub fn new(tuning: ChaseTuning, seed: u64) -> Self {
        let params = LevelParams::for_level(1, &tuning);
        let clock = LogicalClock::new();
        Self {
            phase: ChasePhase::AnimalSelect,
            animal: None,
            arena_width: tuning.arena_width,
            arena_height: tuning.arena_height,
            player: Player::default(),
            hearts: Vec::new(),
            obstacles: Vec::new(),
            keys: HeldKeys::default(),
            score: 0,
            lives: tuning.starting_lives.min(MAX_LIVES),
            level: 1,
            hearts_this_level: 0,
            streak: 0,
            can_climb: false,
            params,
            frame: 0,
            clock,
            climb_timer: Deadline::default(),
            animation: IntervalTicker::new(ANIMATION_FRAME_MS, clock.now()),
            last_spawn_ms: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_heart_id: 1,
            events: Vec::new(),
            tuning,
        }
    }

    /// Session time in ms
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Milliseconds of climbing left, if climbing
    pub fn climb_remaining(&self) -> Option<u64> {
        self.climb_timer.remaining(self.clock.now())
    }

    /// Largest top-left coordinate that keeps the sprite inside the arena
    pub fn player_max(&self) -> Vec2 {
        Vec2::new(
            (self.arena_width - PLAYER_SIZE).max(0.0),
            (self.arena_height - PLAYER_SIZE).max(0.0),
        )
    }

    pub fn clamp_to_arena(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.player_max())
    }

    /// Level progress for the HUD bar
    pub fn progress_percent(&self) -> f32 {
        self.hearts_this_level as f32 / HEARTS_PER_LEVEL as f32 * 100.0
    }

    /// Allocate a new heart ID
    pub fn next_heart_id(&mut self) -> u32 {
        let id = self.next_heart_id;
        self.next_heart_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: ChaseEvent) {
        self.events.push(event);
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<ChaseEvent> {
        std::mem::take(&mut self.events)
    }
}
