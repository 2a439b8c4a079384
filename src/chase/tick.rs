//! Per-frame chase update and run lifecycle
//!
//! `tick` is called once per animation frame with the elapsed wall time.
//! Movement is per frame; heart aging, climb expiry and the sprite cadence
//! run on session time, which only advances while the run is live.

use glam::Vec2;

use super::catalog::{Animal, Facing};
use super::hearts::{collect_hearts, spawn_heart, update_hearts};
use super::level::LevelParams;
use super::obstacles::{blocks_player, generate_obstacles};
use super::state::{ChaseEvent, ChaseKey, ChasePhase, ChaseState, Player};
use crate::consts::*;
use crate::sim::LogicalClock;

/// Advance a running session by one frame
pub fn tick(state: &mut ChaseState, dt_ms: u64) {
    if state.phase != ChasePhase::Running {
        return;
    }

    let now = state.clock.advance(dt_ms);

    if state.climb_timer.expired(now) {
        stop_climbing(state);
    }

    advance_animation(state, now);
    move_player(state);

    update_hearts(state, now);
    if state.phase == ChasePhase::GameOver {
        return;
    }
    collect_hearts(state);
}

fn advance_animation(state: &mut ChaseState, now: u64) {
    let frames = state
        .animal
        .map(|a| a.sprites().frame_count)
        .unwrap_or(1)
        .max(1);
    state.animation.begin_poll();
    while state.animation.fire(now).is_some() {
        state.frame = (state.frame + 1) % frames;
    }
}

fn move_player(state: &mut ChaseState) {
    let dir = state.keys.direction();
    let velocity = dir * state.params.player_speed;

    let player = &mut state.player;
    player.moving = dir != Vec2::ZERO;
    if dir.y < 0.0 {
        player.facing = Facing::Up;
    } else if dir.y > 0.0 {
        player.facing = Facing::Down;
    }
    // Horizontal wins the sprite row on diagonals
    if dir.x < 0.0 {
        player.facing = Facing::Left;
    } else if dir.x > 0.0 {
        player.facing = Facing::Right;
    }

    let old = state.player.pos;
    let target = state.clamp_to_arena(old + velocity);

    // x is tested at the old y, then y at the possibly-updated x
    let mut pos = old;
    let moved_x = Vec2::new(target.x, pos.y);
    if can_enter(state, moved_x) {
        pos = moved_x;
    }
    let moved_y = Vec2::new(pos.x, target.y);
    if can_enter(state, moved_y) {
        pos = moved_y;
    }
    state.player.pos = pos;
}

fn can_enter(state: &ChaseState, to: Vec2) -> bool {
    state.can_climb || !blocks_player(to, &state.obstacles)
}

/// Activate climbing, or extend it if already active
pub fn start_climbing(state: &mut ChaseState) {
    let now = state.now();
    state
        .climb_timer
        .arm(now, state.tuning.climb_duration_ms);
    if state.can_climb {
        state.push_event(ChaseEvent::ClimbRefreshed);
    } else {
        state.can_climb = true;
        log::debug!("Climbing for {}ms", state.tuning.climb_duration_ms);
        state.push_event(ChaseEvent::ClimbStarted);
    }
}

fn stop_climbing(state: &mut ChaseState) {
    state.climb_timer.cancel();
    if state.can_climb {
        state.can_climb = false;
        state.push_event(ChaseEvent::ClimbEnded);
    }
}

/// A missed heart: the streak and climbing end and one life is lost
pub fn lose_life(state: &mut ChaseState) {
    if state.phase == ChasePhase::GameOver {
        return;
    }
    state.streak = 0;
    stop_climbing(state);
    state.lives = state.lives.saturating_sub(1);
    state.push_event(ChaseEvent::LifeLost { lives: state.lives });

    if state.lives == 0 {
        state.phase = ChasePhase::GameOver;
        state.animation.cancel();
        state.player.moving = false;
        log::info!(
            "Chase over: score {} at level {}",
            state.score,
            state.level
        );
        state.push_event(ChaseEvent::GameOver {
            score: state.score,
            level: state.level,
        });
    }
}

/// Advance to the next level with a fresh obstacle field
pub fn level_up(state: &mut ChaseState) {
    state.level += 1;
    state.hearts_this_level = 0;
    state.params = LevelParams::for_level(state.level, &state.tuning);

    let every = state.tuning.life_every_levels;
    if every > 0 && state.level % every == 0 && state.lives < MAX_LIVES {
        state.lives += 1;
    }

    state.obstacles = generate_obstacles(
        &state.tuning,
        state.level,
        state.arena_width,
        state.arena_height,
        &mut state.rng,
    );

    log::info!(
        "Level {}: speed {:.1}, hearts last {}ms, spawn every {}ms",
        state.level,
        state.params.player_speed,
        state.params.heart_lifetime_ms,
        state.params.heart_spawn_interval_ms
    );
    state.push_event(ChaseEvent::LevelUp { level: state.level });
}

/// Reset run data and cancel every timer; keeps tuning, arena size and RNG
fn reset_run(state: &mut ChaseState) {
    state.climb_timer.cancel();
    state.animation.cancel();
    state.clock = LogicalClock::new();

    state.player = Player::default();
    state.hearts.clear();
    state.obstacles.clear();
    state.keys.clear();
    state.score = 0;
    state.lives = state.tuning.starting_lives.min(MAX_LIVES);
    state.level = 1;
    state.hearts_this_level = 0;
    state.streak = 0;
    state.can_climb = false;
    state.params = LevelParams::for_level(1, &state.tuning);
    state.frame = 0;
    state.last_spawn_ms = 0;
}

/// Pick an avatar and start a run. Ignored outside animal select.
pub fn select_animal(state: &mut ChaseState, animal: Animal) -> bool {
    if state.phase != ChasePhase::AnimalSelect {
        return false;
    }
    reset_run(state);

    state.animal = Some(animal);
    state.obstacles = generate_obstacles(
        &state.tuning,
        1,
        state.arena_width,
        state.arena_height,
        &mut state.rng,
    );
    state.animation.reschedule(ANIMATION_FRAME_MS, 0);
    state.phase = ChasePhase::Running;

    log::info!(
        "Chase started as {} with {} obstacles",
        animal.as_str(),
        state.obstacles.len()
    );
    state.push_event(ChaseEvent::GameStarted { animal });
    spawn_heart(state, 0);
    true
}

/// Leave game over and go back to animal select
pub fn restart(state: &mut ChaseState) -> bool {
    if state.phase != ChasePhase::GameOver {
        return false;
    }
    reset_run(state);
    state.animal = None;
    state.phase = ChasePhase::AnimalSelect;
    log::info!("Chase restarted");
    true
}

pub fn toggle_pause(state: &mut ChaseState) {
    state.phase = match state.phase {
        ChasePhase::Running => ChasePhase::Paused,
        ChasePhase::Paused => ChasePhase::Running,
        other => other,
    };
}

pub fn key_down(state: &mut ChaseState, key: ChaseKey) {
    match key {
        ChaseKey::Pause => toggle_pause(state),
        ChaseKey::Restart => {
            restart(state);
        }
        _ => state.keys.set(key, true),
    }
}

pub fn key_up(state: &mut ChaseState, key: ChaseKey) {
    state.keys.set(key, false);
}

/// New arena size; the player is pulled back inside during a run
pub fn resize(state: &mut ChaseState, width: f32, height: f32) {
    state.arena_width = width.max(PLAYER_SIZE);
    state.arena_height = height.max(PLAYER_SIZE);
    if matches!(state.phase, ChasePhase::Running | ChasePhase::Paused) {
        state.player.pos = state.clamp_to_arena(state.player.pos);
    }
}
