//! End-to-end runs of both games through their public session APIs

use heart_arcade::Settings;
use heart_arcade::chase::{Animal, ChaseEvent, ChaseKey, ChasePhase, ChaseSession};
use heart_arcade::snake::{Direction, SnakeCommand, SnakeEvent, SnakePhase, SnakeSession};

#[test]
fn test_snake_runs_into_itself_and_restarts() {
    let mut session = SnakeSession::new(Settings::default().snake, 17);
    // Straight line across the wrap; nothing to hit
    for _ in 0..50 {
        session.advance(100);
    }
    assert_eq!(session.state().phase, SnakePhase::Running);
    assert_eq!(session.state().ticks, 50);

    // Reversal into the body is ignored
    session.handle(SnakeCommand::Turn(Direction::Left));
    assert_eq!(session.state().next_direction, Direction::Right);

    // Stretch to 5 segments by hand, then coil into the body
    let state = session.state_mut();
    let tail = *state.body.back().unwrap();
    state.body.push_back(tail);
    state.body.push_back(tail);
    let turns = [Direction::Down, Direction::Left, Direction::Up];
    let mut over = false;
    for dir in turns {
        session.handle(SnakeCommand::Turn(dir));
        let events = session.advance(100);
        if events.iter().any(|e| matches!(e, SnakeEvent::GameOver { .. })) {
            over = true;
        }
    }
    assert!(over);
    assert_eq!(session.state().phase, SnakePhase::GameOver);

    session.handle(SnakeCommand::Restart);
    assert_eq!(session.state().phase, SnakePhase::Running);
    assert_eq!(session.state().len(), 3);
    assert_eq!(session.games_played(), 2);
}

#[test]
fn test_snake_same_seed_same_game() {
    let mut a = SnakeSession::new(Settings::default().snake, 99);
    let mut b = SnakeSession::new(Settings::default().snake, 99);
    for i in 0..200u32 {
        let dir = Direction::ALL[(i / 7) as usize % 4];
        a.handle(SnakeCommand::Turn(dir));
        b.handle(SnakeCommand::Turn(dir));
        a.advance(37);
        b.advance(37);
    }
    assert_eq!(a.view(), b.view());
}

#[test]
fn test_chase_from_select_to_game_over_and_back() {
    let mut session = ChaseSession::new(Settings::default().chase, 23);
    assert_eq!(session.phase(), ChasePhase::AnimalSelect);
    assert!(session.select_animal(Animal::Hare));

    let mut lives_lost = 0;
    let mut game_over = None;
    for _ in 0..2000 {
        for event in session.advance(50) {
            match event {
                ChaseEvent::LifeLost { .. } => lives_lost += 1,
                ChaseEvent::GameOver { score, level } => game_over = Some((score, level)),
                _ => {}
            }
        }
        if game_over.is_some() {
            break;
        }
    }

    // Standing still never collects, so every heart is eventually missed
    assert_eq!(game_over, Some((0, 1)));
    assert_eq!(lives_lost, 3);

    let view = session.view();
    assert_eq!(view.phase, ChasePhase::GameOver);
    assert_eq!(view.lives, 0);

    session.key_down(ChaseKey::Restart);
    assert_eq!(session.phase(), ChasePhase::AnimalSelect);
}

#[test]
fn test_chase_view_json_shape() {
    let mut session = ChaseSession::new(Settings::default().chase, 4);
    session.select_animal(Animal::Fox);
    session.key_down(ChaseKey::Down);
    session.advance(16);

    let json = serde_json::to_value(session.view()).unwrap();
    assert_eq!(json["player"]["row"], 0);
    assert_eq!(json["player"]["moving"], true);
    assert_eq!(json["lives"], 3);
    assert!(!json["obstacles"].as_array().unwrap().is_empty());
    assert_eq!(json["player"]["y"], 54.0);
}

#[test]
fn test_settings_drive_sessions() {
    let settings =
        Settings::from_json(r#"{"chase": {"starting_lives": 1}, "snake": {"base_speed_ms": 200}}"#)
            .unwrap();

    let snake = SnakeSession::new(settings.snake.clone(), 1);
    assert_eq!(snake.tick_interval(), 200);

    let mut chase = ChaseSession::new(settings.chase.clone(), 1);
    chase.select_animal(Animal::Boar);
    assert_eq!(chase.state().lives, 1);
}
