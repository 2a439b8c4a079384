//! Snake session driver
//!
//! Owns the state together with its tick schedule. The host feeds elapsed
//! time and input commands; the session fires ticks at the current speed and
//! reschedules the ticker whenever the speed changes.

use serde::{Deserialize, Serialize};

use super::state::{Direction, SnakeEvent, SnakePhase, SnakeState};
use super::tick::tick;
use super::view::SnakeView;
use crate::settings::SnakeTuning;
use crate::sim::{IntervalTicker, LogicalClock};

/// Input commands accepted by a snake session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeCommand {
    Turn(Direction),
    TogglePause,
    Restart,
}

impl SnakeCommand {
    /// Map a browser `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Turn(Direction::Up)),
            "ArrowDown" => Some(Self::Turn(Direction::Down)),
            "ArrowLeft" => Some(Self::Turn(Direction::Left)),
            "ArrowRight" => Some(Self::Turn(Direction::Right)),
            " " | "Space" => Some(Self::TogglePause),
            "Enter" => Some(Self::Restart),
            _ => None,
        }
    }
}

/// A running snake game plus its timer
#[derive(Debug, Clone)]
pub struct SnakeSession {
    state: SnakeState,
    clock: LogicalClock,
    ticker: IntervalTicker,
    games_played: u32,
}

impl SnakeSession {
    pub fn new(tuning: SnakeTuning, seed: u64) -> Self {
        let state = SnakeState::new(tuning, seed);
        let clock = LogicalClock::new();
        let ticker = IntervalTicker::new(state.speed_ms as u64, clock.now());
        log::info!("Snake session started with seed {}", seed);
        Self {
            state,
            clock,
            ticker,
            games_played: 1,
        }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    /// Mutable access for hosts and tests that script positions
    pub fn state_mut(&mut self) -> &mut SnakeState {
        &mut self.state
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn tick_interval(&self) -> u64 {
        self.ticker.interval()
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn handle(&mut self, command: SnakeCommand) {
        match command {
            SnakeCommand::Turn(dir) => {
                self.state.turn(dir);
            }
            SnakeCommand::TogglePause => {
                self.state.toggle_pause();
                log::debug!("Snake phase now {:?}", self.state.phase);
            }
            SnakeCommand::Restart => {
                if self.state.phase == SnakePhase::GameOver {
                    self.restart();
                }
            }
        }
    }

    /// Cancel the running schedule and start a fresh game
    pub fn restart(&mut self) {
        self.ticker.cancel();
        let rng = self.state.rng.clone();
        self.state = SnakeState::with_rng(self.state.tuning.clone(), rng);
        self.ticker
            .reschedule(self.state.speed_ms as u64, self.clock.now());
        self.games_played += 1;
        log::info!("Snake restarted (game {})", self.games_played);
    }

    /// Advance wall time by `dt_ms`, firing every tick that came due.
    /// Returns the events those ticks produced.
    ///
    /// The ticker keeps firing while paused (ticks are no-ops) so unpausing
    /// needs no re-arm; it is cancelled on game over.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<SnakeEvent> {
        let now = self.clock.advance(dt_ms);
        let mut events = Vec::new();

        self.ticker.begin_poll();
        while let Some(due) = self.ticker.fire(now) {
            tick(&mut self.state);
            for event in self.state.drain_events() {
                if let SnakeEvent::SpeedChanged { speed_ms } = event {
                    self.ticker.reschedule(speed_ms as u64, due);
                }
                events.push(event);
            }
            if self.state.phase == SnakePhase::GameOver {
                self.ticker.cancel();
                break;
            }
        }

        events
    }

    /// Render projection of the current state
    pub fn view(&self) -> SnakeView {
        SnakeView::from_state(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::state::Segment;
    use crate::snake::tick::step_wrapped;

    fn session() -> SnakeSession {
        let mut session = SnakeSession::new(SnakeTuning::default(), 3);
        session.state_mut().fruit = Segment::new(680, 480);
        session
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            SnakeCommand::from_key("ArrowUp"),
            Some(SnakeCommand::Turn(Direction::Up))
        );
        assert_eq!(SnakeCommand::from_key(" "), Some(SnakeCommand::TogglePause));
        assert_eq!(SnakeCommand::from_key("Enter"), Some(SnakeCommand::Restart));
        assert_eq!(SnakeCommand::from_key("q"), None);
    }

    #[test]
    fn test_ticks_follow_interval() {
        let mut s = session();
        s.advance(99);
        assert_eq!(s.state().ticks, 0);
        s.advance(1);
        assert_eq!(s.state().ticks, 1);
        s.advance(250);
        assert_eq!(s.state().ticks, 3);
    }

    #[test]
    fn test_pause_keeps_schedule_armed() {
        let mut s = session();
        s.handle(SnakeCommand::TogglePause);
        s.advance(500);
        assert_eq!(s.state().ticks, 0);
        s.handle(SnakeCommand::TogglePause);
        s.advance(100);
        assert_eq!(s.state().ticks, 1);
    }

    #[test]
    fn test_speed_change_reschedules() {
        let mut s = SnakeSession::new(SnakeTuning::default(), 3);
        s.state_mut().score = 50;
        let (ahead, _) = step_wrapped(s.state().head(), Direction::Right, &s.state().tuning);
        s.state_mut().fruit = ahead;

        let events = s.advance(100);
        assert!(events.contains(&SnakeEvent::SpeedChanged { speed_ms: 90 }));
        assert_eq!(s.tick_interval(), 90);

        // Next tick due 90ms after the one that sped up
        s.state_mut().fruit = Segment::new(-1000, -1000);
        s.advance(89);
        assert_eq!(s.state().ticks, 1);
        s.advance(1);
        assert_eq!(s.state().ticks, 2);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut s = session();
        s.advance(300);
        s.handle(SnakeCommand::Restart);
        assert_eq!(s.games_played(), 1);
        assert_eq!(s.state().ticks, 3);

        s.state_mut().phase = SnakePhase::GameOver;
        s.handle(SnakeCommand::Restart);
        assert_eq!(s.games_played(), 2);
        assert_eq!(s.state().phase, SnakePhase::Running);
        assert_eq!(s.state().ticks, 0);
        assert_eq!(s.state().len(), 3);
        assert_eq!(s.tick_interval(), 100);
    }

    #[test]
    fn test_game_over_stops_ticker() {
        let mut s = session();
        s.state_mut().body = [(100, 100), (80, 100), (60, 100), (40, 100), (20, 100)]
            .into_iter()
            .map(|(x, y)| Segment::new(x, y))
            .collect();
        for dir in [Direction::Down, Direction::Left, Direction::Up] {
            s.handle(SnakeCommand::Turn(dir));
            s.advance(100);
        }
        assert_eq!(s.state().phase, SnakePhase::GameOver);
        let ticks = s.state().ticks;
        s.advance(10_000);
        assert_eq!(s.state().ticks, ticks);
        s.handle(SnakeCommand::Turn(Direction::Right));
        assert_eq!(s.state().next_direction, Direction::Up);
    }
}
