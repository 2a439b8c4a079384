//! Obstacle field generation and player blocking
//!
//! The ruins are fixed at the arena center; scenery is rejection-sampled
//! away from the corners (spawn points), the center, and each other.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::catalog::{OBSTACLE_TYPES, RUINS};
use super::level::obstacle_count;
use super::state::{Obstacle, Player};
use crate::settings::ChaseTuning;
use crate::sim::{Placement, Rect, crowds_any};

/// Ruins placement for an arena
pub fn ruins(arena_width: f32, arena_height: f32) -> Obstacle {
    let pos = Vec2::new(
        (arena_width - RUINS.width) / 2.0,
        (arena_height - RUINS.height) / 2.0,
    );
    Obstacle::new(&RUINS, pos, true)
}

/// Generate the full field for `level`: ruins first, then scenery.
/// Scenery that can't be placed within the attempt budget is skipped.
pub fn generate_obstacles(
    tuning: &ChaseTuning,
    level: u32,
    arena_width: f32,
    arena_height: f32,
    rng: &mut Pcg32,
) -> Vec<Obstacle> {
    let mut obstacles = vec![ruins(arena_width, arena_height)];

    let corners = [
        Vec2::new(50.0, 50.0),
        Vec2::new(arena_width - 100.0, 50.0),
        Vec2::new(50.0, arena_height - 100.0),
        Vec2::new(arena_width - 100.0, arena_height - 100.0),
    ];
    let center = Vec2::new(arena_width / 2.0, arena_height / 2.0);
    let placement = Placement::bounded(tuning.obstacle_attempts);

    let wanted = obstacle_count(level, tuning);
    let mut skipped = 0u32;

    for _ in 0..wanted {
        let kind = &OBSTACLE_TYPES[rng.random_range(0..OBSTACLE_TYPES.len())];
        let span_x = (arena_width - kind.width).floor().max(1.0) as u32;
        let span_y = (arena_height - kind.height).floor().max(1.0) as u32;

        let placed = placement.sample(
            rng,
            |rng| {
                Vec2::new(
                    rng.random_range(0..span_x) as f32,
                    rng.random_range(0..span_y) as f32,
                )
            },
            |pos| {
                if crowds_any(*pos, corners, tuning.corner_clearance) {
                    return false;
                }
                let mid = Rect::at(*pos, kind.width, kind.height).center();
                if mid.distance(center) < tuning.center_clearance {
                    return false;
                }
                // Candidate footprint grown by the padding on its far sides
                let candidate = Rect::at(
                    *pos,
                    kind.width + tuning.obstacle_padding,
                    kind.height + tuning.obstacle_padding,
                );
                !obstacles.iter().any(|obs| {
                    let b = obs.bounds();
                    let padded = Rect::new(
                        b.x,
                        b.y,
                        b.w + tuning.obstacle_padding,
                        b.h + tuning.obstacle_padding,
                    );
                    candidate.intersects(&padded)
                })
            },
        );

        match placed {
            Some(pos) => obstacles.push(Obstacle::new(kind, pos, false)),
            None => skipped += 1,
        }
    }

    log::debug!(
        "Level {} obstacles: {} placed, {} skipped",
        level,
        obstacles.len() - 1,
        skipped
    );
    obstacles
}

/// True if the player's hitbox at `pos` overlaps any obstacle hitbox
pub fn blocks_player(pos: Vec2, obstacles: &[Obstacle]) -> bool {
    let hitbox = Player::hitbox_at(pos);
    obstacles
        .iter()
        .any(|obs| hitbox.intersects(&obs.world_hitbox()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_ruins_centered() {
        let r = ruins(800.0, 600.0);
        assert_eq!(r.pos, Vec2::new(336.0, 252.0));
        assert!(r.is_ruins);
        assert_eq!(r.world_hitbox(), Rect::new(346.0, 292.0, 108.0, 50.0));
    }

    #[test]
    fn test_field_respects_keep_out_zones() {
        let tuning = ChaseTuning::default();
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let field = generate_obstacles(&tuning, 1 + (seed as u32 % 6), 800.0, 600.0, &mut rng);
            assert!(field[0].is_ruins);
            assert_eq!(field.iter().filter(|o| o.is_ruins).count(), 1);

            let scenery = &field[1..];
            for (i, a) in scenery.iter().enumerate() {
                assert!(a.pos.x >= 0.0 && a.pos.x + a.width <= 800.0);
                assert!(a.pos.y >= 0.0 && a.pos.y + a.height <= 600.0);
                let mid = a.bounds().center();
                assert!(mid.distance(Vec2::new(400.0, 300.0)) >= 120.0);
                assert!(a.pos.distance(Vec2::new(50.0, 50.0)) >= 80.0);
                // Pairwise separation, ruins included
                for b in field.iter().take(i + 1) {
                    let separated = a.bounds().right() + 15.0 <= b.pos.x
                        || b.bounds().right() + 15.0 <= a.pos.x
                        || a.bounds().bottom() + 15.0 <= b.pos.y
                        || b.bounds().bottom() + 15.0 <= a.pos.y;
                    assert!(separated, "seed {seed}: {:?} vs {:?}", a.pos, b.pos);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let tuning = ChaseTuning::default();
        let a = generate_obstacles(&tuning, 2, 800.0, 600.0, &mut Pcg32::seed_from_u64(5));
        let b = generate_obstacles(&tuning, 2, 800.0, 600.0, &mut Pcg32::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_blocks_player() {
        let field = vec![ruins(800.0, 600.0)];
        // Feet land on the ruins hitbox
        assert!(blocks_player(Vec2::new(350.0, 280.0), &field));
        // Standing well above it
        assert!(!blocks_player(Vec2::new(350.0, 200.0), &field));
    }
}
