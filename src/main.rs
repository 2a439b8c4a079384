//! Heart Arcade native entry point
//!
//! The games render in the browser; natively this runs both engines
//! headless with a simple autopilot and logs how the runs went.
//!
//! Usage: `heart-arcade [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;

    use heart_arcade::chase::{Animal, ChaseEvent, ChaseKey, ChasePhase, ChaseSession};
    use heart_arcade::snake::{
        Direction, Segment, SnakeCommand, SnakeEvent, SnakePhase, SnakeSession, SnakeState,
        step_wrapped,
    };

    /// Wrapped Manhattan distance on the snake grid
    fn grid_distance(a: Segment, b: Segment, state: &SnakeState) -> i32 {
        let g = state.tuning.grid_size;
        let w = state.tuning.columns() * g;
        let h = state.tuning.rows() * g;
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.min(w - dx) + dy.min(h - dy)
    }

    /// Greedy move toward the fruit that doesn't bite the body
    fn choose_direction(state: &SnakeState) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(state.direction))
            .filter_map(|d| {
                let (cell, _) = step_wrapped(state.head(), d, &state.tuning);
                (!state.is_occupied(cell)).then(|| (d, grid_distance(cell, state.fruit, state)))
            })
            .min_by_key(|(_, dist)| *dist)
            .map(|(d, _)| d)
    }

    pub fn play_snake(session: &mut SnakeSession, max_ms: u64) {
        let mut elapsed = 0;
        let mut speed_changes = 0;
        while elapsed < max_ms && session.state().phase != SnakePhase::GameOver {
            if let Some(dir) = choose_direction(session.state()) {
                session.handle(SnakeCommand::Turn(dir));
            }
            let step = session.tick_interval();
            for event in session.advance(step) {
                match event {
                    SnakeEvent::SpeedChanged { .. } => speed_changes += 1,
                    SnakeEvent::BoardFull { score } => log::warn!("Board full at {score}"),
                    _ => {}
                }
            }
            elapsed += step;
        }

        let state = session.state();
        log::info!(
            "Snake: score {} length {} after {}ms ({:?}, {} speed changes)",
            state.score,
            state.len(),
            elapsed,
            state.phase,
            speed_changes
        );
        println!(
            "Snake    score {:>5}  length {:>4}  speed {}ms",
            state.score,
            state.len(),
            state.speed_ms
        );
    }

    /// Hold the keys that point at the nearest heart
    fn steer(session: &mut ChaseSession) {
        let state = session.state();
        let center = state.player.center();
        let target = state
            .hearts
            .iter()
            .map(|h| h.center())
            .min_by(|a, b| a.distance(center).total_cmp(&b.distance(center)));
        let delta = target.map(|t| t - center).unwrap_or(Vec2::ZERO);

        let wanted = [
            (ChaseKey::Left, delta.x < -2.0),
            (ChaseKey::Right, delta.x > 2.0),
            (ChaseKey::Up, delta.y < -2.0),
            (ChaseKey::Down, delta.y > 2.0),
        ];
        for (key, down) in wanted {
            if down {
                session.key_down(key);
            } else {
                session.key_up(key);
            }
        }
    }

    pub fn play_chase(session: &mut ChaseSession, animal: Animal, max_ms: u64) {
        session.select_animal(animal);
        let mut elapsed = 0;
        let mut collected = 0;
        while elapsed < max_ms && session.phase() != ChasePhase::GameOver {
            steer(session);
            for event in session.advance(16) {
                match event {
                    ChaseEvent::HeartCollected { .. } => collected += 1,
                    ChaseEvent::LevelUp { level } => log::debug!("Reached level {level}"),
                    _ => {}
                }
            }
            elapsed += 16;
        }

        let state = session.state();
        log::info!(
            "Chase ({}): score {} level {} lives {} after {}ms",
            animal.as_str(),
            state.score,
            state.level,
            state.lives,
            elapsed
        );
        println!(
            "Chase    score {:>5}  level {:>4}  hearts {}",
            state.score, state.level, collected
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heart_arcade::Settings;
    use heart_arcade::chase::{Animal, ChaseSession};
    use heart_arcade::snake::SnakeSession;

    env_logger::init();
    log::info!("Heart Arcade (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(&path).unwrap_or_else(|err| {
            log::warn!("Could not load {path}: {err}; using defaults");
            Settings::default()
        }),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed {seed}");

    let mut snake = SnakeSession::new(settings.snake.clone(), seed);
    autopilot::play_snake(&mut snake, 120_000);

    let mut chase = ChaseSession::new(settings.chase.clone(), seed);
    autopilot::play_chase(&mut chase, Animal::Fox, 120_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `heart_arcade::web::start`
}
