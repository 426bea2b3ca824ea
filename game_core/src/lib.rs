pub mod calibration;
pub mod components;
pub mod config;
pub mod fsm;
pub mod game;
pub mod map;
pub mod params;
pub mod resources;
pub mod sensor;
pub mod session;
pub mod systems;

pub use calibration::*;
pub use components::*;
pub use config::*;
pub use fsm::*;
pub use game::*;
pub use map::*;
pub use params::*;
pub use resources::*;
pub use sensor::*;
pub use session::*;

use hecs::World;
use systems::*;

/// Run one fixed tick of the hand-controlled Pong simulation.
///
/// `reading` is this tick's finger offset, if the sensor saw a hand. Returns
/// the winner if this tick decided the match.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    range: &CalibrationRange,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    reading: Option<f32>,
) -> Option<Side> {
    // Clear events at start of tick
    events.clear();

    // 1. Player paddle follows the finger (smoothed)
    steer_player_paddle(world, map, config, range, reading);

    // 2. Opponent paddle chases the ball
    steer_opponent(world, config);

    // 3. Trail records where the ball was
    record_trail(world);

    // 4. Move ball
    move_ball(world);

    // 5. Check collisions (walls, paddles)
    check_collisions(world, map, config, events, rng);

    // 6. Check scoring (ball reached a side edge)
    check_scoring(world, map, score, events, rng, config);

    // 7. Keep paddles on screen
    clamp_paddles(world, map);

    score.has_winner(config.winning_score)
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, rect: Rect) -> hecs::Entity {
    world.spawn((Paddle::new(side, rect),))
}

/// Helper to create the ball entity with its trail
pub fn create_ball(
    world: &mut World,
    rect: Rect,
    vel: glam::Vec2,
    trail_len: usize,
) -> hecs::Entity {
    world.spawn((Ball::new(rect, vel), Trail::new(trail_len, rect.center())))
}
