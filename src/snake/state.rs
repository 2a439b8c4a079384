//! Snake game state and core types

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::SnakeTuning;
use crate::sim::Placement;

/// A grid-aligned body cell (or fruit position), top-left in arena units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
}

impl Segment {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Unit step (dx, dy) in grid cells; y grows downward
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Current phase of a snake session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakePhase {
    Running,
    Paused,
    GameOver,
}

/// Notable things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SnakeEvent {
    FruitEaten { score: u32 },
    Grew { segment_size: f32 },
    SpeedChanged { speed_ms: u32 },
    GameOver { score: u32 },
    BoardFull { score: u32 },
}

/// Complete state of one snake session
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub tuning: SnakeTuning,
    /// Head first
    pub body: VecDeque<Segment>,
    /// Direction used by the in-flight tick
    pub direction: Direction,
    /// Latest accepted input, committed at the start of the next tick
    pub next_direction: Direction,
    pub fruit: Segment,
    pub score: u32,
    /// Rendered head size; also widens the pickup range
    pub segment_size: f32,
    /// Current tick interval
    pub speed_ms: u32,
    pub phase: SnakePhase,
    /// Head wrapped across an edge on the last tick (render hint only)
    pub wrapped: bool,
    /// Ticks advanced while running
    pub ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<SnakeEvent>,
}

impl SnakeState {
    pub fn new(tuning: SnakeTuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    /// Fresh game reusing an existing RNG stream (restart keeps the stream going)
    pub fn with_rng(tuning: SnakeTuning, rng: Pcg32) -> Self {
        let g = tuning.grid_size;
        let body: VecDeque<Segment> = [
            Segment::new(5 * g, 5 * g),
            Segment::new(4 * g, 5 * g),
            Segment::new(3 * g, 5 * g),
        ]
        .into_iter()
        .collect();

        let mut state = Self {
            segment_size: tuning.base_segment_size,
            speed_ms: tuning.base_speed_ms,
            tuning,
            body,
            direction: Direction::Right,
            next_direction: Direction::Right,
            fruit: Segment::default(),
            score: 0,
            phase: SnakePhase::Running,
            wrapped: false,
            ticks: 0,
            rng,
            events: Vec::new(),
        };
        match place_fruit(&state.tuning, &state.body, &mut state.rng) {
            Some(fruit) => state.fruit = fruit,
            None => state.phase = SnakePhase::GameOver,
        }
        state
    }

    /// Head segment
    #[inline]
    pub fn head(&self) -> Segment {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Buffer a direction change.
    ///
    /// The reversal guard compares against the committed direction, not the
    /// buffered one, so two quick presses inside one tick can still reverse.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if self.phase == SnakePhase::GameOver || self.direction.is_opposite(dir) {
            return false;
        }
        self.next_direction = dir;
        true
    }

    /// Toggle pause; ignored after game over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SnakePhase::Running => SnakePhase::Paused,
            SnakePhase::Paused => SnakePhase::Running,
            SnakePhase::GameOver => SnakePhase::GameOver,
        };
    }

    pub fn is_occupied(&self, cell: Segment) -> bool {
        self.body.contains(&cell)
    }

    pub(crate) fn push_event(&mut self, event: SnakeEvent) {
        self.events.push(event);
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SnakeEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Pick a fruit cell not covered by `body`.
///
/// Rejection samples first; if the budget runs out, picks uniformly among the
/// remaining free cells. `None` means the body fills the whole arena.
pub fn place_fruit(tuning: &SnakeTuning, body: &VecDeque<Segment>, rng: &mut Pcg32) -> Option<Segment> {
    let g = tuning.grid_size;
    let cols = tuning.columns();
    let rows = tuning.rows();

    // Every cell is eligible, including the last column and row, so the
    // sampler and the free-cell scan agree on the board
    let sampled = Placement::new(tuning.fruit_attempts).sample(
        rng,
        |rng| Segment::new(rng.random_range(0..cols) * g, rng.random_range(0..rows) * g),
        |cell| !body.contains(cell),
    );
    if sampled.is_some() {
        return sampled;
    }

    let free: Vec<Segment> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| Segment::new(col * g, row * g)))
        .filter(|cell| !body.contains(cell))
        .collect();
    if free.is_empty() {
        log::warn!("No free cell left for fruit ({} segments)", body.len());
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = SnakeState::new(SnakeTuning::default(), 1);
        assert_eq!(state.phase, SnakePhase::Running);
        assert_eq!(
            state.body.iter().copied().collect::<Vec<_>>(),
            vec![
                Segment::new(100, 100),
                Segment::new(80, 100),
                Segment::new(60, 100)
            ]
        );
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.speed_ms, 100);
        assert_eq!(state.segment_size, 20.0);
        assert!(!state.is_occupied(state.fruit));
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_turn_rejects_reversal() {
        let mut state = SnakeState::new(SnakeTuning::default(), 1);
        assert!(!state.turn(Direction::Left));
        assert_eq!(state.next_direction, Direction::Right);
        assert!(state.turn(Direction::Up));
        assert_eq!(state.next_direction, Direction::Up);
    }

    #[test]
    fn test_double_press_checks_committed_direction() {
        let mut state = SnakeState::new(SnakeTuning::default(), 1);
        // Committed direction is still Right, so Up then Down both pass
        assert!(state.turn(Direction::Up));
        assert!(state.turn(Direction::Down));
        assert_eq!(state.next_direction, Direction::Down);
        // Left is still a reversal of the committed Right
        assert!(!state.turn(Direction::Left));
        assert_eq!(state.next_direction, Direction::Down);
    }

    #[test]
    fn test_fruit_reaches_last_column_and_row() {
        let tuning = SnakeTuning::default();
        let g = tuning.grid_size;
        let body: VecDeque<Segment> = [Segment::new(100, 100)].into_iter().collect();
        let mut last_col = false;
        let mut last_row = false;
        for seed in 0..2_000 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let Some(fruit) = place_fruit(&tuning, &body, &mut rng) else {
                panic!("board is nearly empty");
            };
            assert!(fruit.x >= 0 && fruit.x < tuning.arena_width);
            assert!(fruit.y >= 0 && fruit.y < tuning.arena_height);
            last_col |= fruit.x == (tuning.columns() - 1) * g;
            last_row |= fruit.y == (tuning.rows() - 1) * g;
        }
        assert!(last_col && last_row);
    }

    #[test]
    fn test_turn_while_paused_is_buffered() {
        let mut state = SnakeState::new(SnakeTuning::default(), 1);
        state.toggle_pause();
        assert_eq!(state.phase, SnakePhase::Paused);
        assert!(state.turn(Direction::Down));
        state.toggle_pause();
        assert_eq!(state.phase, SnakePhase::Running);
        assert_eq!(state.next_direction, Direction::Down);
    }

    #[test]
    fn test_fruit_falls_back_to_free_cell_scan() {
        let tuning = SnakeTuning {
            arena_width: 120,
            arena_height: 120,
            fruit_attempts: Some(0),
            ..SnakeTuning::default()
        };
        let mut body = VecDeque::new();
        for row in 0..6 {
            for col in 0..6 {
                if (row, col) != (4, 2) {
                    body.push_back(Segment::new(col * 20, row * 20));
                }
            }
        }
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(place_fruit(&tuning, &body, &mut rng), Some(Segment::new(40, 80)));

        body.push_back(Segment::new(40, 80));
        assert_eq!(place_fruit(&tuning, &body, &mut rng), None);
    }
}
