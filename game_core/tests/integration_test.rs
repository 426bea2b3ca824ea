use game_core::systems::check_collisions;
use game_core::*;
use glam::Vec2;
use hecs::World;
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn new_session(readings: Vec<Option<f32>>, seed: u64) -> Session<ScriptedSensor> {
    Session::new(Config::new(), GameRng::new(seed), ScriptedSensor::new(readings))
}

/// Feed ticks until calibration hands over to play
fn run_calibration(session: &mut Session<ScriptedSensor>) -> f32 {
    let mut now = 0.0;
    session.tick(&[InputSignal::BeginMatch], now);
    while session.state() == FsmState::Calibrating {
        now += DT;
        session.tick(&[], now);
    }
    now
}

fn score_point(session: &mut Session<ScriptedSensor>, side: Side, now: f32) {
    let (center, vel) = match side {
        Side::Player => (Vec2::new(1270.0, 300.0), Vec2::new(15.0, 9.0)),
        Side::Opponent => (Vec2::new(10.0, 300.0), Vec2::new(-15.0, 9.0)),
    };
    session.game_mut().place_ball(center, vel);
    session.tick(&[], now);
}

#[test]
fn test_full_match_flow() {
    // raise to 0.3 for the first stage, lower to 0.05 for the second
    let mut readings = vec![Some(0.3); 300];
    readings.extend(vec![Some(0.05); 320]);
    let mut session = new_session(readings, 7);

    let mut now = run_calibration(&mut session);
    assert_eq!(session.state(), FsmState::Playing);
    let range = session.game().range();
    assert_eq!(range.max_diff(), 0.3);
    assert_eq!(range.min_diff(), 0.05);

    // Trade points, opponent ahead 3-4, then the player takes the last two
    for side in [
        Side::Opponent,
        Side::Player,
        Side::Opponent,
        Side::Player,
        Side::Opponent,
        Side::Player,
        Side::Opponent,
    ] {
        now += DT;
        score_point(&mut session, side, now);
    }
    assert_eq!(session.game().score(), Score { player: 3, opponent: 4 });
    assert_eq!(session.state(), FsmState::Playing);

    score_point(&mut session, Side::Player, now);
    score_point(&mut session, Side::Player, now);
    assert_eq!(session.state(), FsmState::GameOver(Side::Player));

    let score = session.game().score();
    let win = session.game().config().winning_score;
    assert!(score.opponent < win && win <= score.player);

    assert_eq!(session.tick(&[InputSignal::PlayAgain], now), FsmState::Start);
    assert_eq!(session.game().score(), Score::new());
    assert_eq!(session.tick(&[InputSignal::Quit], now), FsmState::Terminated);
}

#[test]
fn test_degenerate_calibration_falls_back() {
    // the same offset in both stages leaves min == max
    let mut session = new_session(vec![Some(0.1); 700], 3);
    run_calibration(&mut session);
    assert_eq!(session.state(), FsmState::Playing);
    assert_eq!(session.game().range(), CalibrationRange::fallback());
}

#[test]
fn test_finger_drives_paddle_toward_target() {
    let mut game = Game::new(Config::new(), GameRng::new(11));
    game.set_range(CalibrationRange::new(0.0, 0.2).unwrap());

    // a fully raised finger targets the top of the screen
    for _ in 0..120 {
        game.place_ball(Vec2::new(640.0, 360.0), Vec2::new(1.0, 0.0));
        game.step(Some(0.2));
    }

    let paddle = game.snapshot().player_paddle;
    assert_eq!(paddle.top(), 0.0, "paddle should end up clamped at the top");
}

#[test]
fn test_replay_starts_a_fresh_match() {
    let mut session = new_session(vec![], 5);
    let now = run_calibration(&mut session);
    for _ in 0..5 {
        score_point(&mut session, Side::Opponent, now);
    }
    assert_eq!(session.state(), FsmState::GameOver(Side::Opponent));

    session.tick(&[InputSignal::PlayAgain], now);
    let snap = session.game().snapshot();
    assert_eq!(snap.score, Score::new());
    assert_eq!(snap.ball.center(), Vec2::new(640.0, 360.0));
    assert_eq!(session.game().range(), CalibrationRange::fallback());

    // a second calibration is required before play resumes
    session.tick(&[InputSignal::BeginMatch], now);
    assert_eq!(session.state(), FsmState::Calibrating);
}

#[test]
fn test_equal_extremes_resolve_to_fallback() {
    assert!(CalibrationRange::new(0.5, 0.5).is_err());

    // both stages see the same offset
    let mut calibrator = Calibrator::new(5.0, 0.0);
    calibrator.tick(0.0, Some(0.5));
    calibrator.tick(5.0, Some(0.5));
    assert_eq!(calibrator.tick(10.0, None), CalibrationStatus::Finished);
    assert!(calibrator.finish().is_err());

    let fallback = CalibrationRange::fallback();
    assert_eq!((fallback.min_diff(), fallback.max_diff()), (0.0, 0.2));
}

#[test]
fn test_config_from_partial_json() {
    let config: Config = serde_json::from_str(r#"{ "winning_score": 3, "fps": 30 }"#).unwrap();
    assert_eq!(config.winning_score, 3);
    assert_eq!(config.fps, 30);
    assert_eq!(config.screen_width, Params::SCREEN_WIDTH);
    assert!(config.validate().is_ok());

    let mut game = Game::new(config, GameRng::new(1));
    for _ in 0..3 {
        game.place_ball(Vec2::new(10.0, 300.0), Vec2::new(-15.0, 9.0));
        game.step(None);
    }
    assert_eq!(game.winner(), Some(Side::Opponent));
}

proptest! {
    #[test]
    fn prop_paddles_stay_on_screen(
        seed in any::<u64>(),
        readings in prop::collection::vec(prop::option::of(-0.5f32..1.5), 1..400),
    ) {
        let config = Config::new();
        let height = config.screen_height;
        let mut game = Game::new(config, GameRng::new(seed));
        game.set_range(CalibrationRange::new(0.02, 0.3).unwrap());

        for reading in readings {
            game.step(reading);
            let snap = game.snapshot();
            for paddle in [snap.player_paddle, snap.opponent_paddle] {
                prop_assert!(paddle.top() >= 0.0, "paddle top {} off screen", paddle.top());
                prop_assert!(
                    paddle.bottom() <= height,
                    "paddle bottom {} off screen",
                    paddle.bottom()
                );
            }
        }
    }

    #[test]
    fn prop_scores_never_pass_winning_score(
        seed in any::<u64>(),
        readings in prop::collection::vec(prop::option::of(0.0f32..0.25), 1..600),
    ) {
        let mut game = Game::new(Config::new(), GameRng::new(seed));
        let win = game.config().winning_score;

        for reading in readings {
            game.step(reading);
            let score = game.score();
            prop_assert!(score.player <= win && score.opponent <= win);
            if let Some(winner) = game.winner() {
                prop_assert!(score.get(winner.other()) < win);
            }
        }
    }

    #[test]
    fn prop_wall_bounce_flips_vertical_only(
        seed in any::<u64>(),
        x in 300.0f32..980.0,
        vx in -25.0f32..25.0,
        vy in 1.0f32..30.0,
        top in any::<bool>(),
    ) {
        let config = Config::new();
        let map = GameMap::new(&config);
        let mut world = World::new();
        let mut events = Events::new();
        let mut rng = GameRng::new(seed);

        // ball touching a wall, heading into it
        let (y, vy) = if top { (10.0, -vy) } else { (710.0, vy) };
        let rect = Rect::from_center_size(Vec2::new(x, y), Vec2::splat(config.ball_size));
        let entity = create_ball(&mut world, rect, Vec2::new(vx, vy), config.trail_count);

        check_collisions(&mut world, &map, &config, &mut events, &mut rng);

        let ball = world.get::<&Ball>(entity).unwrap();
        prop_assert!(events.ball_hit_wall);
        prop_assert_eq!(ball.vel, Vec2::new(vx, -vy));
    }

    #[test]
    fn prop_mapping_is_pure_and_bounded(
        min in -0.5f32..0.5,
        width in 0.01f32..0.5,
        offset in -1.0f32..1.0,
    ) {
        let range = CalibrationRange::new(min, min + width).unwrap();
        let first = range.fraction(offset);
        prop_assert_eq!(first, range.fraction(offset));
        let fraction = first.unwrap();
        prop_assert!((0.0..=1.0).contains(&fraction));

        let y = range.target_y(offset, 720.0).unwrap();
        prop_assert!((0.0..=720.0).contains(&y));
    }

    #[test]
    fn prop_paddle_hit_redraws_horizontal_speed(
        seed in any::<u64>(),
        vx in 12.0f32..=25.0,
        vy in -20.0f32..=20.0,
    ) {
        let config = Config::new();
        let map = GameMap::new(&config);
        let mut world = World::new();
        let mut events = Events::new();
        let mut rng = GameRng::new(seed);
        create_paddle(&mut world, Side::Player, map.paddle_spawn(Side::Player));
        create_paddle(&mut world, Side::Opponent, map.paddle_spawn(Side::Opponent));

        // ball overlapping the player paddle, travelling left
        let rect = Rect::from_center_size(Vec2::new(60.0, 360.0), Vec2::splat(config.ball_size));
        let entity = create_ball(&mut world, rect, Vec2::new(-vx, vy), config.trail_count);

        check_collisions(&mut world, &map, &config, &mut events, &mut rng);

        let ball = world.get::<&Ball>(entity).unwrap();
        prop_assert!(events.ball_hit_paddle);
        prop_assert!(ball.vel.x > 0.0, "ball should now travel right");
        prop_assert!((12.0..=25.0).contains(&ball.vel.x.abs()));
        prop_assert!(ball.vel.y.abs() >= config.ball_min_vertical_speed);
    }
}
