use pong_core::*;
use proptest::prelude::*;

fn new_match(mode: Mode) -> (Game<HeadlessSurface>, ManualScheduler) {
    let mut game = Game::new(Config::default(), HeadlessSurface::new(800.0, 400.0)).unwrap();
    let mut scheduler = ManualScheduler::new();
    game.start(mode, &mut scheduler);
    (game, scheduler)
}

/// Run the frame the host would run next, if one was requested
fn pump(game: &mut Game<HeadlessSurface>, scheduler: &mut ManualScheduler) -> Option<Event> {
    if scheduler.take() {
        game.frame(scheduler)
    } else {
        None
    }
}

/// Put the ball one tick away from crossing the left goal line, away from the paddle
fn drive_into_left_goal(game: &mut Game<HeadlessSurface>) {
    game.ball.pos = Vec2::new(2.0, 30.0);
    game.ball.vel = Vec2::new(-5.0, 0.0);
}

#[test]
fn test_versus_match_to_eleven() {
    let (mut game, mut scheduler) = new_match(Mode::Versus);

    for goal in 1..=14u8 {
        drive_into_left_goal(&mut game);
        let event = pump(&mut game, &mut scheduler);

        match goal {
            1..=10 => {
                assert_eq!(
                    event,
                    Some(Event::Scored {
                        scorer: Side::Right,
                        score: [0, goal]
                    })
                );
                assert_eq!(game.phase(), Phase::Running);
            }
            11 => {
                assert_eq!(
                    event,
                    Some(Event::GameOver {
                        winner: Side::Right,
                        label: "Player 2".to_string(),
                        score: [0, 11]
                    })
                );
            }
            _ => assert_eq!(event, None),
        }
    }

    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.score, [0, 11]);
    assert_eq!(game.winner(), Some(Side::Right));
    assert_eq!(game.winner_label(), Some("Player 2"));
    assert!(!scheduler.is_pending());

    // Nothing but a restart brings it back
    game.step();
    game.toggle_pause();
    let mut other = ManualScheduler::new();
    game.start(Mode::Versus, &mut other);
    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.score, [0, 11]);
}

#[test]
fn test_restart_after_end() {
    let (mut game, mut scheduler) = new_match(Mode::Versus);
    game.score = [10, 4];
    game.set_directional_input(Side::Left, Direction::Up, true);
    game.ball.pos = Vec2::new(798.0, 30.0);
    game.ball.vel = Vec2::new(5.0, 0.0);
    pump(&mut game, &mut scheduler);
    assert_eq!(game.phase(), Phase::Ended);

    game.restart(&mut scheduler);

    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.score, [0, 0]);
    assert_eq!(game.winner(), None);
    assert_eq!(game.tick, 0);
    assert_eq!((game.paddles[0].x, game.paddles[0].y), (10.0, 160.0));
    assert_eq!((game.paddles[1].x, game.paddles[1].y), (780.0, 160.0));
    assert_eq!(game.ball.pos, Vec2::new(400.0, 200.0));
    assert!(!game.controls().is_pressed(Side::Left, Direction::Up));
    assert!(scheduler.is_pending());
}

#[test]
fn test_restart_replays_fresh_match() {
    let (mut fresh, _) = new_match(Mode::Ai(Difficulty::Easy));
    let (mut game, mut scheduler) = new_match(Mode::Ai(Difficulty::Easy));
    game.score = [0, 10];
    drive_into_left_goal(&mut game);
    pump(&mut game, &mut scheduler);
    game.restart(&mut scheduler);

    for _ in 0..500 {
        assert_eq!(fresh.step(), game.step());
    }
    assert_eq!(fresh.view(), game.view());
}

#[test]
fn test_pause_resume_through_frames() {
    let (mut game, mut scheduler) = new_match(Mode::Ai(Difficulty::Medium));
    for _ in 0..20 {
        pump(&mut game, &mut scheduler);
    }

    game.toggle_pause();
    let frozen = game.view();
    for _ in 0..60 {
        pump(&mut game, &mut scheduler);
    }

    assert_eq!(game.view(), frozen);
    assert!(scheduler.is_pending());

    game.toggle_pause();
    pump(&mut game, &mut scheduler);
    assert_eq!(game.tick, frozen.tick + 1);
}

#[test]
fn test_every_frame_is_presented() {
    let (mut game, mut scheduler) = new_match(Mode::Versus);

    for _ in 0..30 {
        pump(&mut game, &mut scheduler);
    }

    assert_eq!(game.surface().frames, 30);
    assert_eq!(game.surface().last, Some(game.view()));
}

#[test]
fn test_missing_surface() {
    let result = Game::new(Config::default(), HeadlessSurface::detached());

    assert_eq!(result.err(), Some(MatchError::MissingSurface));
}

#[test]
fn test_ai_winner_label() {
    let (mut game, mut scheduler) = new_match(Mode::Ai(Difficulty::Hard));
    game.score = [0, 10];
    drive_into_left_goal(&mut game);

    pump(&mut game, &mut scheduler);

    let result = game.result().unwrap();
    assert_eq!(result.winner_label, "AI");
    assert_eq!(result.mode.label(), "VS AI - HARD");
}

#[test]
fn test_stop_mid_match() {
    let (mut game, mut scheduler) = new_match(Mode::Versus);
    pump(&mut game, &mut scheduler);
    assert!(scheduler.is_pending());

    let surface = game.stop(&mut scheduler);

    assert!(!scheduler.is_pending());
    assert_eq!(surface.events, vec![Event::Stopped]);
}

#[test]
fn test_resize_mid_match_keeps_score() {
    let (mut game, mut scheduler) = new_match(Mode::Versus);
    game.score = [2, 3];

    let viewport = Viewport::fit(500.0).unwrap();
    game.resize(viewport.width, viewport.height);
    pump(&mut game, &mut scheduler);

    assert_eq!(game.score, [2, 3]);
    assert_eq!(game.field_width, 460.0);
    assert_eq!(game.paddles[1].x, 440.0);
    assert!(game.paddles[0].y <= 230.0 - 80.0);
}

#[derive(Debug, Clone)]
enum Command {
    Key(bool, bool, bool),
    Pause,
    Tick,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(left, up, pressed)| Command::Key(left, up, pressed)),
        Just(Command::Pause),
        Just(Command::Tick),
        Just(Command::Tick),
        Just(Command::Tick),
    ]
}

proptest! {
    #[test]
    fn prop_paused_ticks_change_nothing(commands in prop::collection::vec(command(), 1..400)) {
        let (mut game, mut scheduler) = new_match(Mode::Versus);

        for command in commands {
            match command {
                Command::Key(left, up, pressed) => {
                    let side = if left { Side::Left } else { Side::Right };
                    let direction = if up { Direction::Up } else { Direction::Down };
                    game.set_directional_input(side, direction, pressed);
                }
                Command::Pause => game.toggle_pause(),
                Command::Tick => {
                    let before = game.view();
                    pump(&mut game, &mut scheduler);
                    if before.phase == Phase::Paused {
                        prop_assert_eq!(game.view(), before);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_score_moves_by_one_per_goal(
        seed in any::<u64>(),
        ticks in 1usize..3000,
    ) {
        let config = Config { seed, ..Config::default() };
        let mut game = Game::new(config, HeadlessSurface::new(800.0, 400.0)).unwrap();
        let mut scheduler = ManualScheduler::new();
        game.start(Mode::Ai(Difficulty::Easy), &mut scheduler);

        for tick in 0..ticks {
            // Sweep the left paddle up and down
            let up = (tick / 40) % 2 == 0;
            game.set_directional_input(Side::Left, Direction::Up, up);
            game.set_directional_input(Side::Left, Direction::Down, !up);

            let before: u32 = game.score.iter().map(|&s| s as u32).sum();
            let event = pump(&mut game, &mut scheduler);
            let after: u32 = game.score.iter().map(|&s| s as u32).sum();

            let goal = matches!(event, Some(Event::Scored { .. }) | Some(Event::GameOver { .. }));
            prop_assert_eq!(after, before + goal as u32);

            for paddle in &game.paddles {
                prop_assert!(paddle.y >= 0.0 && paddle.y <= 400.0 - paddle.height);
            }
        }
    }
}
