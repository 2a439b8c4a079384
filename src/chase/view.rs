//! Render projection for the heart chase

use serde::Serialize;

use super::state::{ChasePhase, ChaseState};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Sprite sheet to draw from (walk while moving, idle otherwise)
    pub sheet: Option<&'static str>,
    pub row: u32,
    pub frame: u32,
    pub frame_size: u32,
    pub moving: bool,
    pub climbing: bool,
    /// Climb time left, for the HUD
    pub climb_remaining_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub is_bonus: bool,
    pub expiring: bool,
    /// Lifetime left, 100 when fresh
    pub timer_percent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub source: &'static str,
    pub is_ruins: bool,
}

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChaseView {
    pub phase: ChasePhase,
    pub arena_width: f32,
    pub arena_height: f32,
    pub player: PlayerView,
    pub hearts: Vec<HeartView>,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub streak: u32,
    pub progress_percent: f32,
}

impl ChaseView {
    pub fn from_state(state: &ChaseState) -> Self {
        let sprites = state.animal.map(|a| a.sprites());
        let player = PlayerView {
            x: state.player.pos.x,
            y: state.player.pos.y,
            size: PLAYER_SIZE,
            sheet: sprites.map(|s| if state.player.moving { s.walk } else { s.idle }),
            row: state.player.facing.sprite_row(),
            frame: state.frame,
            frame_size: sprites.map(|s| s.frame_size).unwrap_or(PLAYER_SIZE as u32),
            moving: state.player.moving,
            climbing: state.can_climb,
            climb_remaining_ms: state.climb_remaining(),
        };

        let hearts = state
            .hearts
            .iter()
            .map(|h| HeartView {
                id: h.id,
                x: h.pos.x,
                y: h.pos.y,
                size: HEART_SIZE,
                is_bonus: h.is_bonus,
                expiring: h.expiring,
                timer_percent: if h.lifetime_ms > 0.0 {
                    (h.remaining_ms / h.lifetime_ms * 100.0).clamp(0.0, 100.0)
                } else {
                    0.0
                },
            })
            .collect();

        let obstacles = state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                x: o.pos.x,
                y: o.pos.y,
                width: o.width,
                height: o.height,
                source: o.source,
                is_ruins: o.is_ruins,
            })
            .collect();

        Self {
            phase: state.phase,
            arena_width: state.arena_width,
            arena_height: state.arena_height,
            player,
            hearts,
            obstacles,
            score: state.score,
            lives: state.lives,
            level: state.level,
            streak: state.streak,
            progress_percent: state.progress_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chase::catalog::Animal;
    use crate::chase::tick::{key_down, select_animal, tick};
    use crate::chase::state::ChaseKey;
    use crate::settings::ChaseTuning;

    #[test]
    fn test_select_screen_has_no_sheet() {
        let state = ChaseState::new(ChaseTuning::default(), 1);
        let view = ChaseView::from_state(&state);
        assert_eq!(view.phase, ChasePhase::AnimalSelect);
        assert_eq!(view.player.sheet, None);
        assert!(view.hearts.is_empty());
    }

    #[test]
    fn test_sheet_follows_movement() {
        let mut state = ChaseState::new(ChaseTuning::default(), 1);
        select_animal(&mut state, Animal::Boar);
        let view = ChaseView::from_state(&state);
        assert_eq!(view.player.sheet, Some("assets/animals/Boar/Boar_Idle.png"));
        assert_eq!(view.player.row, 0);

        key_down(&mut state, ChaseKey::Left);
        tick(&mut state, 16);
        let view = ChaseView::from_state(&state);
        assert_eq!(view.player.sheet, Some("assets/animals/Boar/Boar_Walk.png"));
        assert_eq!(view.player.row, 1);
    }

    #[test]
    fn test_heart_timer_percent() {
        let mut state = ChaseState::new(ChaseTuning::default(), 2);
        select_animal(&mut state, Animal::Fox);
        let spawned = state.hearts.len();
        tick(&mut state, 2000);
        let view = ChaseView::from_state(&state);
        assert_eq!(view.hearts.len(), spawned);
        let first = view.hearts[0];
        let expected = if first.is_bonus { 100.0 - 2000.0 / 56.0 } else { 75.0 };
        assert!((first.timer_percent - expected).abs() < 1e-3);
        assert!(!first.expiring);
        assert!(view.obstacles.iter().any(|o| o.is_ruins));
    }

    #[test]
    fn test_view_serializes() {
        let mut state = ChaseState::new(ChaseTuning::default(), 3);
        select_animal(&mut state, Animal::Hare);
        let json = serde_json::to_string(&ChaseView::from_state(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"progress_percent\":0.0"));
    }
}
