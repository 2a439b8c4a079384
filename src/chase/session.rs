//! Heart chase session driver
//!
//! Thin host-facing wrapper: routes input, feeds frame time into `tick`,
//! and hands back the events each frame produced.

use super::catalog::Animal;
use super::state::{ChaseEvent, ChaseKey, ChasePhase, ChaseState};
use super::tick;
use super::view::ChaseView;
use crate::settings::ChaseTuning;

#[derive(Debug, Clone)]
pub struct ChaseSession {
    state: ChaseState,
    runs: u32,
}

impl ChaseSession {
    pub fn new(tuning: ChaseTuning, seed: u64) -> Self {
        log::info!("Chase session created with seed {}", seed);
        Self {
            state: ChaseState::new(tuning, seed),
            runs: 0,
        }
    }

    pub fn state(&self) -> &ChaseState {
        &self.state
    }

    /// Mutable access for hosts and tests that script positions
    pub fn state_mut(&mut self) -> &mut ChaseState {
        &mut self.state
    }

    pub fn phase(&self) -> ChasePhase {
        self.state.phase
    }

    /// Runs started in this session
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn select_animal(&mut self, animal: Animal) -> bool {
        let started = tick::select_animal(&mut self.state, animal);
        if started {
            self.runs += 1;
        }
        started
    }

    /// Select by display name (case-insensitive); unknown names are ignored
    pub fn select_animal_named(&mut self, name: &str) -> bool {
        match Animal::from_name(name) {
            Some(animal) => self.select_animal(animal),
            None => {
                log::warn!("Unknown animal {:?}", name);
                false
            }
        }
    }

    pub fn key_down(&mut self, key: ChaseKey) {
        tick::key_down(&mut self.state, key);
    }

    pub fn key_up(&mut self, key: ChaseKey) {
        tick::key_up(&mut self.state, key);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        tick::resize(&mut self.state, width, height);
    }

    /// One animation frame with `dt_ms` of elapsed wall time
    pub fn advance(&mut self, dt_ms: u64) -> Vec<ChaseEvent> {
        tick::tick(&mut self.state, dt_ms);
        self.state.drain_events()
    }

    pub fn view(&self) -> ChaseView {
        ChaseView::from_state(&self.state)
    }
}
