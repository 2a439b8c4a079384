//! Render projection for the snake game
//!
//! Recomputed from state every frame; the renderer never writes back.

use serde::Serialize;

use super::state::{SnakePhase, SnakeState};

/// Tail segments shrink to this fraction of the head size
pub const MIN_TAPER_RATIO: f32 = 0.4;

/// One body segment as it should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentView {
    /// Draw position (already centered for tapered segments)
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub is_head: bool,
    /// Animate movement; false for the head on a wrap tick so it doesn't slide across the arena
    pub smooth: bool,
    /// 0.0 at the head, 1.0 at the tail (for color gradients)
    pub shade: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FruitView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnakeView {
    pub arena_width: i32,
    pub arena_height: i32,
    pub segments: Vec<SegmentView>,
    pub fruit: FruitView,
    pub score: u32,
    pub phase: SnakePhase,
    pub paused: bool,
    pub game_over: bool,
}

impl SnakeView {
    pub fn from_state(state: &SnakeState) -> Self {
        let len = state.body.len();
        let base = state.segment_size;
        let taper_start = 3usize.max((len as f32 * 0.3).floor() as usize);

        let segments = state
            .body
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                let size = if index >= taper_start && len > taper_start {
                    let progress = (index - taper_start) as f32 / (len - taper_start) as f32;
                    base * (1.0 - progress * (1.0 - MIN_TAPER_RATIO))
                } else {
                    base
                };
                let offset = (base - size) / 2.0;
                SegmentView {
                    x: cell.x as f32 + offset,
                    y: cell.y as f32 + offset,
                    size,
                    is_head: index == 0,
                    smooth: !(index == 0 && state.wrapped),
                    shade: index as f32 / (len.saturating_sub(1)).max(1) as f32,
                }
            })
            .collect();

        Self {
            arena_width: state.tuning.arena_width,
            arena_height: state.tuning.arena_height,
            segments,
            fruit: FruitView {
                x: state.fruit.x as f32,
                y: state.fruit.y as f32,
                size: base,
            },
            score: state.score,
            phase: state.phase,
            paused: state.phase == SnakePhase::Paused,
            game_over: state.phase == SnakePhase::GameOver,
        }
    }
}
