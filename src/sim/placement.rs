//! Rejection sampling placement
//!
//! Draw candidates from a caller-supplied distribution until one passes the
//! caller's constraints or the attempt budget runs out. Callers decide what
//! exhaustion means (skip a spawn, fall back to a scan, ...).

use rand::Rng;

/// Attempt budget for a rejection sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// `None` retries forever; only safe when acceptance is guaranteed
    pub max_attempts: Option<u32>,
}

impl Placement {
    pub const fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    pub const fn new(max_attempts: Option<u32>) -> Self {
        Self { max_attempts }
    }

    /// Sample until `accept` passes; `None` when the budget is exhausted
    pub fn sample<T, R, C, A>(&self, rng: &mut R, mut candidate: C, mut accept: A) -> Option<T>
    where
        R: Rng + ?Sized,
        C: FnMut(&mut R) -> T,
        A: FnMut(&T) -> bool,
    {
        let mut attempts = 0u32;
        loop {
            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    log::debug!("Placement exhausted after {} attempts", attempts);
                    return None;
                }
            }
            attempts = attempts.saturating_add(1);

            let value = candidate(rng);
            if accept(&value) {
                return Some(value);
            }
        }
    }
}
