//! Snake simulation tick
//!
//! One call advances the snake by exactly one grid cell. Timing is the
//! session's job; this module never sees a clock.

use glam::Vec2;

use super::state::{Direction, Segment, SnakeEvent, SnakePhase, SnakeState, place_fruit};
use crate::settings::SnakeTuning;
use crate::sim::within_radius;

/// Step one cell from `from`, wrapping toroidally.
/// Returns the new cell and whether a wrap happened.
pub fn step_wrapped(from: Segment, dir: Direction, tuning: &SnakeTuning) -> (Segment, bool) {
    let g = tuning.grid_size;
    let (dx, dy) = dir.delta();
    let mut next = Segment::new(from.x + dx * g, from.y + dy * g);
    let mut wrapped = false;

    if next.x < 0 {
        next.x = tuning.arena_width - g;
        wrapped = true;
    }
    if next.x >= tuning.arena_width {
        next.x = 0;
        wrapped = true;
    }
    if next.y < 0 {
        next.y = tuning.arena_height - g;
        wrapped = true;
    }
    if next.y >= tuning.arena_height {
        next.y = 0;
        wrapped = true;
    }

    (next, wrapped)
}

/// Size-aware pickup test: the head's reach grows with its render size
pub fn fruit_in_reach(head: Segment, fruit: Segment, segment_size: f32, tuning: &SnakeTuning) -> bool {
    let head_center = Vec2::new(head.x as f32, head.y as f32) + Vec2::splat(segment_size / 2.0);
    let fruit_center =
        Vec2::new(fruit.x as f32, fruit.y as f32) + Vec2::splat(tuning.grid_size as f32 / 2.0);
    within_radius(head_center, fruit_center, tuning.fruit_hitbox + segment_size / 2.0)
}

/// Advance the snake by one cell. Does nothing unless running.
pub fn tick(state: &mut SnakeState) {
    if state.phase != SnakePhase::Running {
        return;
    }
    state.ticks += 1;

    // Commit buffered input
    state.direction = state.next_direction;

    let (head, wrapped) = step_wrapped(state.head(), state.direction, &state.tuning);
    state.wrapped = wrapped;

    // Checked against the full body, tail included, before it moves
    if state.is_occupied(head) {
        state.phase = SnakePhase::GameOver;
        log::info!("Snake game over: score {} after {} ticks", state.score, state.ticks);
        state.push_event(SnakeEvent::GameOver { score: state.score });
        return;
    }

    state.body.push_front(head);

    if !fruit_in_reach(head, state.fruit, state.segment_size, &state.tuning) {
        state.body.pop_back();
        return;
    }

    // Ate: keep the tail so the body grows by one
    state.score += state.tuning.points_per_fruit;
    state.push_event(SnakeEvent::FruitEaten { score: state.score });

    match place_fruit(&state.tuning, &state.body, &mut state.rng) {
        Some(fruit) => state.fruit = fruit,
        None => {
            state.phase = SnakePhase::GameOver;
            log::warn!("Snake filled the board at score {}", state.score);
            state.push_event(SnakeEvent::BoardFull { score: state.score });
            return;
        }
    }

    // A zero interval disables that escalation instead of dividing by zero
    if state.score.checked_rem(state.tuning.grow_every_points) == Some(0) {
        state.segment_size += state.tuning.segment_growth;
        state.push_event(SnakeEvent::Grew {
            segment_size: state.segment_size,
        });
    }

    if state.score.checked_rem(state.tuning.speed_up_every_points) == Some(0)
        && state.speed_ms > state.tuning.min_speed_ms
    {
        state.speed_ms = state
            .speed_ms
            .saturating_sub(state.tuning.speed_step_ms)
            .max(state.tuning.min_speed_ms);
        log::info!("Snake speed up: {}ms per tick", state.speed_ms);
        state.push_event(SnakeEvent::SpeedChanged {
            speed_ms: state.speed_ms,
        });
    }
}
