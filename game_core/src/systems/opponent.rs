use hecs::World;

use crate::{Ball, Config, Paddle, Side};

/// Reactive AI: step the opponent paddle a fixed distance toward the ball's
/// vertical centre. No prediction and no dead zone, so it can jitter around
/// the ball; that keeps it beatable.
pub fn steer_opponent(world: &mut World, config: &Config) {
    let ball_y = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| ball.rect.center_y());

    let Some(ball_y) = ball_y else {
        return;
    };

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side != Side::Opponent {
            continue;
        }
        let center_y = paddle.rect.center_y();
        if center_y < ball_y {
            paddle.rect.pos.y += config.opponent_speed;
        }
        if center_y > ball_y {
            paddle.rect.pos.y -= config.opponent_speed;
        }
    }
}
