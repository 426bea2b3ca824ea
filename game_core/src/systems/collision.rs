use hecs::World;
use rand::Rng;
use tracing::debug;

use crate::{Ball, Config, Events, GameMap, GameRng, Paddle, Rect};

/// Check ball collisions with walls and paddles
pub fn check_collisions(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Collect paddle rects before borrowing the ball mutably
    let paddles: Vec<Rect> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| paddle.rect)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        // Top/bottom walls: flip vertical direction only. The ball is not
        // pushed back out, it may sit past the wall for one tick.
        if ball.rect.top() <= 0.0 || ball.rect.bottom() >= map.height {
            ball.vel.y = -ball.vel.y;
            events.ball_hit_wall = true;
            debug!(vy = ball.vel.y, "Ball hit wall");
        }

        if paddles.iter().any(|paddle| ball.rect.intersects(paddle)) {
            ball.vel.x = -ball.vel.x;

            // Redraw horizontal speed, keeping the reflected direction
            let new_speed_x = rng.0.gen_range(
                config.ball_collision_speed_min..=config.ball_collision_speed_max,
            ) as f32;
            let sign_x = if ball.vel.x > 0.0 { 1.0 } else { -1.0 };
            ball.vel.x = new_speed_x * sign_x;

            // Perturb vertical speed, then hold it above the floor
            let jitter = config.ball_vertical_jitter;
            if jitter > 0.0 {
                ball.vel.y += rng.0.gen_range(-jitter..=jitter);
            }
            if ball.vel.y.abs() < config.ball_min_vertical_speed {
                let sign_y = if ball.vel.y >= 0.0 { 1.0 } else { -1.0 };
                ball.vel.y = config.ball_min_vertical_speed * sign_y;
            }

            events.ball_hit_paddle = true;
            debug!(vx = ball.vel.x, vy = ball.vel.y, "Ball hit paddle");
        }
    }
}
