//! Heart spawning, aging and collection

use glam::Vec2;
use rand::Rng;

use super::level::{bonus_chance, heart_points};
use super::state::{ChaseEvent, ChasePhase, ChaseState, Heart};
use crate::consts::*;
use crate::sim::{Placement, Rect, crowds_any, overlaps_any, within_radius};

/// True if a heart at `pos` satisfies every placement rule
pub fn heart_spot_is_clear(state: &ChaseState, pos: Vec2) -> bool {
    let tuning = &state.tuning;
    let bounds = Rect::at(pos, HEART_SIZE, HEART_SIZE);
    let padded: Vec<Rect> = state
        .obstacles
        .iter()
        .map(|obs| obs.world_hitbox().padded(tuning.heart_obstacle_padding))
        .collect();

    !overlaps_any(&bounds, &padded)
        && pos.distance(state.player.pos) >= tuning.heart_player_clearance
        && !crowds_any(
            pos,
            state.hearts.iter().map(|h| h.pos),
            tuning.heart_spacing,
        )
}

/// Try to spawn one heart at session time `now`.
/// Returns false when full or when no valid spot turned up in time.
pub fn spawn_heart(state: &mut ChaseState, now: u64) -> bool {
    if state.hearts.len() >= MAX_HEARTS {
        return false;
    }

    let span_x = (state.arena_width - 60.0).floor().max(1.0) as u32;
    let span_y = (state.arena_height - 60.0).floor().max(1.0) as u32;
    let placement = Placement::bounded(state.tuning.heart_attempts);

    let mut rng = state.rng.clone();
    let placed = placement.sample(
        &mut rng,
        |rng| {
            Vec2::new(
                30.0 + rng.random_range(0..span_x) as f32,
                30.0 + rng.random_range(0..span_y) as f32,
            )
        },
        |pos| heart_spot_is_clear(state, *pos),
    );
    state.rng = rng;

    let Some(pos) = placed else {
        log::debug!("No room for a heart at {}ms", now);
        return false;
    };

    let is_bonus = state.rng.random::<f64>() < bonus_chance(state.level, &state.tuning);
    let lifetime = heart_lifetime(state, is_bonus);
    let id = state.next_heart_id();
    state.hearts.push(Heart {
        id,
        pos,
        spawn_time_ms: now,
        is_bonus,
        remaining_ms: lifetime,
        lifetime_ms: lifetime,
        expiring: false,
    });
    state.push_event(ChaseEvent::HeartSpawned { id, is_bonus });
    true
}

/// Current lifetime for a heart; follows the level, so a level-up also
/// shortens hearts already on the field
fn heart_lifetime(state: &ChaseState, is_bonus: bool) -> f32 {
    let lifetime = state.params.heart_lifetime_ms as f32;
    if is_bonus {
        lifetime * state.tuning.bonus_lifetime_factor
    } else {
        lifetime
    }
}

/// Spawn on schedule, then age every heart; expired hearts are misses.
pub fn update_hearts(state: &mut ChaseState, now: u64) {
    if now.saturating_sub(state.last_spawn_ms) > state.params.heart_spawn_interval_ms as u64 {
        spawn_heart(state, now);
        state.last_spawn_ms = now;
    }

    let threshold = state.tuning.expiring_threshold_ms;
    let normal = heart_lifetime(state, false);
    let bonus = heart_lifetime(state, true);
    let mut missed = Vec::new();

    state.hearts.retain_mut(|heart| {
        let lifetime = if heart.is_bonus { bonus } else { normal };
        let age = now.saturating_sub(heart.spawn_time_ms) as f32;
        let remaining = lifetime - age;
        heart.lifetime_ms = lifetime;
        heart.remaining_ms = remaining.max(0.0);
        heart.expiring = remaining < threshold;
        if remaining <= 0.0 {
            missed.push(heart.id);
            false
        } else {
            true
        }
    });

    for id in missed {
        log::debug!("Heart {} missed", id);
        state.push_event(ChaseEvent::HeartMissed { id });
        super::tick::lose_life(state);
        if state.phase == ChasePhase::GameOver {
            break;
        }
    }
}

/// Collect every heart within reach of the player's center
pub fn collect_hearts(state: &mut ChaseState) {
    let mut i = 0;
    while i < state.hearts.len() {
        let reach = within_radius(
            state.player.center(),
            state.hearts[i].center(),
            state.tuning.collect_radius,
        );
        if reach {
            let heart = state.hearts.remove(i);
            on_collect(state, &heart);
        } else {
            i += 1;
        }
    }
}

fn on_collect(state: &mut ChaseState, heart: &Heart) {
    let points = heart_points(heart.is_bonus, state.level);
    state.score += points;
    state.hearts_this_level += 1;
    state.streak += 1;
    state.push_event(ChaseEvent::HeartCollected {
        id: heart.id,
        points,
    });

    // Fires only on the exact streak value, once per run
    if state.streak == state.tuning.streak_for_life && state.lives < MAX_LIVES {
        state.lives += 1;
        log::debug!("Streak bonus life: {} lives", state.lives);
        state.push_event(ChaseEvent::StreakLife { lives: state.lives });
    }

    if state.streak >= state.tuning.streak_for_climb {
        super::tick::start_climbing(state);
    }

    if state.hearts_this_level >= HEARTS_PER_LEVEL {
        super::tick::level_up(state);
    }
}
